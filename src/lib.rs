pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::XmpMarkerSource;
pub use config::{AssessmentConfig, Settings};
pub use crate::core::{
    etl::AssessmentEngine,
    pipeline::{AssessmentPipeline, QuestionSource},
    report::ValidationReport,
};
pub use domain::model::{Assessment, Marker, MarkerQuestion, Question, ValidationLimits};
pub use utils::error::{AssessmentError, Result};
