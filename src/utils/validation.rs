use crate::utils::error::{AssessmentError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let path_str = path.to_string_lossy();
    if path_str.is_empty() {
        return Err(AssessmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path_str.contains('\0') {
        return Err(AssessmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AssessmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Extensions are compared ASCII case-insensitively.
pub fn validate_file_extensions<P: AsRef<Path>>(
    field_name: &str,
    files: &[P],
    allowed_extensions: &[&str],
) -> Result<()> {
    for file in files {
        let file = file.as_ref();
        match file.extension().and_then(|ext| ext.to_str()) {
            Some(extension)
                if allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(extension)) => {}
            Some(extension) => {
                return Err(AssessmentError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.display().to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(AssessmentError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.display().to_string(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssessmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AssessmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
