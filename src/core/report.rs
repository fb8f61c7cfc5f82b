use crate::domain::model::ValidatedAssessment;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

/// Summary of a validation run, printable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub question_count: usize,
    pub valid: bool,
    pub issues: Vec<String>,
    pub generated_at: String,
}

impl ValidationReport {
    pub fn new(source: impl Into<String>, result: &ValidatedAssessment) -> Self {
        Self {
            source: source.into(),
            question_count: result.assessment.len(),
            valid: result.is_valid(),
            issues: result.issues.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} question(s)", self.source, self.question_count)?;
        if self.valid {
            return writeln!(f, "✅ no issues found");
        }
        writeln!(f, "❌ {} issue(s):", self.issues.len())?;
        for issue in &self.issues {
            writeln!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}
