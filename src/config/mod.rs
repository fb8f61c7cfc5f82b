#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::ValidationLimits;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub use toml_config::AssessmentConfig;

pub const DEFAULT_CONCURRENT_READS: usize = 8;

/// Effective settings for one run, after merging the config file and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub course_id: String,
    pub module_number: u32,
    pub output_path: PathBuf,
    pub limits: ValidationLimits,
    pub concurrent_reads: usize,
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            module_number: 1,
            output_path: PathBuf::from("."),
            limits: ValidationLimits::default(),
            concurrent_reads: DEFAULT_CONCURRENT_READS,
            strict: false,
        }
    }
}

impl Settings {
    pub fn from_config(config: &AssessmentConfig) -> Self {
        let mut settings = Self::default();

        if let Some(course) = &config.course {
            settings.course_id = course.id.clone();
            settings.module_number = course.module_number;
        }
        settings.limits = config.limits();
        if let Some(reads) = config.extract.as_ref().and_then(|e| e.concurrent_reads) {
            settings.concurrent_reads = reads;
        }
        if let Some(output) = &config.output {
            if let Some(path) = &output.path {
                settings.output_path = path.clone();
            }
            if let Some(strict) = output.strict {
                settings.strict = strict;
            }
        }

        settings
    }

    /// Checks needed before anything is read.
    pub fn validate_for_check(&self) -> Result<()> {
        validation::validate_positive_number("question_max_length", self.limits.question_max_length, 1)?;
        validation::validate_positive_number("answer_max_length", self.limits.answer_max_length, 1)?;
        validation::validate_range("concurrent_reads", self.concurrent_reads, 1, 256)?;
        Ok(())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.validate_for_check()?;
        validation::validate_non_empty_string("course_id", &self.course_id)?;
        validation::validate_positive_number("module_number", self.module_number as usize, 1)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn course_id(&self) -> &str {
        &self.course_id
    }

    fn module_number(&self) -> u32 {
        self.module_number
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn limits(&self) -> ValidationLimits {
        self.limits
    }

    fn concurrent_reads(&self) -> usize {
        self.concurrent_reads
    }

    fn strict(&self) -> bool {
        self.strict
    }
}
