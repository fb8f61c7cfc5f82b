use crate::core::{ConfigProvider, MarkerSource, Pipeline};
use crate::domain::model::{Assessment, ValidatedAssessment};
use crate::utils::error::{AssessmentError, Result};
use std::fmt;
use std::path::PathBuf;

/// Where a pipeline reads its questions from.
#[derive(Debug, Clone)]
pub enum QuestionSource {
    XmpFiles(Vec<PathBuf>),
    MetaFile(PathBuf),
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::XmpFiles(files) => write!(f, "{} XMP file(s)", files.len()),
            QuestionSource::MetaFile(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct AssessmentPipeline<M: MarkerSource, C: ConfigProvider> {
    marker_source: M,
    config: C,
    source: QuestionSource,
}

impl<M: MarkerSource, C: ConfigProvider> AssessmentPipeline<M, C> {
    pub fn new(marker_source: M, config: C, source: QuestionSource) -> Self {
        Self {
            marker_source,
            config,
            source,
        }
    }
}

#[async_trait::async_trait]
impl<M: MarkerSource, C: ConfigProvider> Pipeline for AssessmentPipeline<M, C> {
    async fn extract(&self) -> Result<Assessment> {
        match &self.source {
            QuestionSource::XmpFiles(files) => {
                Assessment::load_questions_from_xmp_files(
                    &self.marker_source,
                    files,
                    self.config.concurrent_reads(),
                )
                .await
            }
            QuestionSource::MetaFile(path) => Assessment::load_questions_from_meta_file(path).await,
        }
    }

    async fn transform(&self, assessment: Assessment) -> Result<ValidatedAssessment> {
        let issues = assessment.validate(&self.config.limits());

        if !issues.is_empty() {
            if self.config.strict() {
                return Err(AssessmentError::ValidationFailed { issues });
            }
            for issue in &issues {
                tracing::warn!("{}", issue);
            }
        }

        Ok(ValidatedAssessment { assessment, issues })
    }

    async fn load(&self, result: ValidatedAssessment) -> Result<PathBuf> {
        let output_path = self.config.output_path();
        tracing::debug!("Ensuring output directory {}", output_path.display());
        tokio::fs::create_dir_all(output_path).await?;

        result
            .assessment
            .create_assessment_file(self.config.course_id(), self.config.module_number(), output_path)
            .await
    }
}
