use crate::domain::model::{Assessment, Marker, ValidatedAssessment, ValidationLimits};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Supplies the markers embedded in a clip's metadata file.
#[async_trait]
pub trait MarkerSource: Send + Sync {
    async fn markers(&self, path: &Path) -> Result<Vec<Marker>>;
}

pub trait ConfigProvider: Send + Sync {
    fn course_id(&self) -> &str;
    fn module_number(&self) -> u32;
    fn output_path(&self) -> &Path;
    fn limits(&self) -> ValidationLimits;
    fn concurrent_reads(&self) -> usize;
    fn strict(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Assessment>;
    async fn transform(&self, assessment: Assessment) -> Result<ValidatedAssessment>;
    async fn load(&self, result: ValidatedAssessment) -> Result<PathBuf>;
}
