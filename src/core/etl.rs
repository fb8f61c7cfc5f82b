use crate::core::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::time::Instant;

pub struct AssessmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AssessmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Load, validate and write the module's assessment file.
    pub async fn run(&self) -> Result<PathBuf> {
        let started = Instant::now();

        // Extract
        tracing::info!("Loading questions...");
        let assessment = self.pipeline.extract().await?;
        tracing::info!("Loaded {} question(s)", assessment.len());

        // Transform
        tracing::info!("Validating questions...");
        let validated = self.pipeline.transform(assessment).await?;
        if validated.is_valid() {
            tracing::info!("All questions are valid");
        } else {
            tracing::warn!(
                "{} validation issue(s), writing anyway",
                validated.issues.len()
            );
        }

        // Load
        tracing::info!("Writing assessment file...");
        let output_path = self.pipeline.load(validated).await?;
        tracing::info!(
            "Output saved to: {} ({:?})",
            output_path.display(),
            started.elapsed()
        );

        Ok(output_path)
    }
}
