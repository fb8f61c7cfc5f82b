use serde::{Deserialize, Serialize};

pub const QUESTION_PREFIX: &str = "Q) ";
pub const CORRECT_ANSWER_PREFIX: &str = "* ";
pub const INCORRECT_ANSWER_PREFIX: &str = "- ";
pub const CLIP_REFERENCE_PREFIX: &str = "= ";

pub const QUESTIONS_FILE_NAME: &str = "questions.txt";
pub const NO_QUESTIONS_FILE_NAME: &str = "no-questions.txt";

/// One assessment question attached to a clip of a course module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Full question line, including the leading `Q) `.
    pub question_text: String,
    /// Answer lines in source order; `* ` marks the correct one, `- ` the others.
    pub answers: Vec<String>,
    /// Index of the clip within the module.
    pub clip_number: u32,
    /// Marker position; only known for questions taken from XMP markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_code: Option<String>,
}

impl Question {
    /// Equality on everything the meta file format can carry.
    pub fn same_content(&self, other: &Question) -> bool {
        self.question_text == other.question_text
            && self.answers == other.answers
            && self.clip_number == other.clip_number
    }
}

/// Question and answers read out of a single marker, before any clip context is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerQuestion {
    pub question_text: String,
    pub answers: Vec<String>,
}

/// A timed annotation read from a clip's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub content: String,
    pub timecode: String,
}

/// Ordered question list for one course module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Length caps applied by the validator, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    #[serde(default = "ValidationLimits::default_max_length")]
    pub question_max_length: usize,
    #[serde(default = "ValidationLimits::default_max_length")]
    pub answer_max_length: usize,
}

impl ValidationLimits {
    pub const DEFAULT_MAX_LENGTH: usize = 65;

    fn default_max_length() -> usize {
        Self::DEFAULT_MAX_LENGTH
    }
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            question_max_length: Self::DEFAULT_MAX_LENGTH,
            answer_max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }
}

/// Output of the transform phase: the assessment plus every issue the validator found.
#[derive(Debug, Clone)]
pub struct ValidatedAssessment {
    pub assessment: Assessment,
    pub issues: Vec<String>,
}

impl ValidatedAssessment {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}
