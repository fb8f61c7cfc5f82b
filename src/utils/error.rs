use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Marker source failed for {}: {message}", .path.display())]
    MarkerSourceError { path: PathBuf, message: String },

    #[error("Malformed meta file {} at line {line}: {reason}", .path.display())]
    MalformedMetaFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Cannot derive a clip number from '{name}'")]
    InvalidClipName { name: String },

    #[error("Assessment has {} validation issue(s): {}", .issues.len(), .issues.join("; "))]
    ValidationFailed { issues: Vec<String> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 內容問題，可由作者修正
    Content,
    /// 輸入或配置錯誤
    Input,
    /// 系統層級錯誤 (檔案系統等)
    System,
}

impl AssessmentError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssessmentError::ValidationFailed { .. } => ErrorSeverity::Content,
            AssessmentError::MalformedMetaFile { .. }
            | AssessmentError::InvalidClipName { .. }
            | AssessmentError::ConfigError { .. }
            | AssessmentError::InvalidConfigValueError { .. }
            | AssessmentError::MissingConfigError { .. } => ErrorSeverity::Input,
            AssessmentError::IoError(_)
            | AssessmentError::SerializationError(_)
            | AssessmentError::MarkerSourceError { .. } => ErrorSeverity::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AssessmentError::IoError(_) => "Check that the input files exist and the output directory is writable",
            AssessmentError::SerializationError(_) => "Retry without --json or report the failing input",
            AssessmentError::MarkerSourceError { .. } => "Make sure the XMP sidecar is readable and well-formed",
            AssessmentError::MalformedMetaFile { .. } => {
                "Every '= ' clip line and answer line must follow a 'Q) ' question line"
            }
            AssessmentError::InvalidClipName { .. } => {
                "Clip files must end with '-<number>', e.g. my-course-m1-03.xmp"
            }
            AssessmentError::ValidationFailed { .. } => {
                "Fix the listed questions or run without --strict"
            }
            AssessmentError::ConfigError { .. }
            | AssessmentError::InvalidConfigValueError { .. }
            | AssessmentError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Content => 1,
            ErrorSeverity::Input => 2,
            ErrorSeverity::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssessmentError>;
