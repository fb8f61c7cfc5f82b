use crate::domain::model::ValidationLimits;
use crate::utils::error::{AssessmentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex"));

/// Per-module configuration file, e.g. `assessment.toml`:
///
/// ```toml
/// [course]
/// id = "foo-fundamentals"
/// module_number = 1
///
/// [validation]
/// question_max_length = 65
/// answer_max_length = 65
///
/// [extract]
/// concurrent_reads = 8
///
/// [output]
/// path = "${BUILD_DIR}/m1"
/// strict = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub course: Option<CourseConfig>,
    pub validation: Option<ValidationLimits>,
    pub extract: Option<ExtractConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub id: String,
    pub module_number: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub concurrent_reads: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub strict: Option<bool>,
}

impl AssessmentConfig {
    /// 從檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssessmentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BUILD_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn limits(&self) -> ValidationLimits {
        self.validation.unwrap_or_default()
    }
}

impl Validate for AssessmentConfig {
    fn validate(&self) -> Result<()> {
        if let Some(course) = &self.course {
            validation::validate_non_empty_string("course.id", &course.id)?;
            validation::validate_positive_number("course.module_number", course.module_number as usize, 1)?;
        }

        if let Some(limits) = &self.validation {
            validation::validate_positive_number("validation.question_max_length", limits.question_max_length, 1)?;
            validation::validate_positive_number("validation.answer_max_length", limits.answer_max_length, 1)?;
        }

        if let Some(reads) = self.extract.as_ref().and_then(|e| e.concurrent_reads) {
            validation::validate_range("extract.concurrent_reads", reads, 1, 256)?;
        }

        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_ref()) {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}
