pub mod clip;
pub mod etl;
pub mod marker;
pub mod meta_file;
pub mod pipeline;
pub mod report;
pub mod serializer;
pub mod validator;

pub use crate::domain::model::{Assessment, Question, ValidatedAssessment, ValidationLimits};
pub use crate::domain::ports::{ConfigProvider, MarkerSource, Pipeline};
pub use crate::utils::error::Result;
