use crate::domain::model::{
    Assessment, Question, ValidationLimits, CORRECT_ANSWER_PREFIX, INCORRECT_ANSWER_PREFIX,
    QUESTION_PREFIX,
};

impl Assessment {
    /// Check every question against the formatting rules.
    ///
    /// All issues are collected; an empty list means the assessment is publishable.
    pub fn validate(&self, limits: &ValidationLimits) -> Vec<String> {
        self.questions
            .iter()
            .enumerate()
            .flat_map(|(index, question)| validate_question(index + 1, question, limits))
            .collect()
    }
}

fn validate_question(number: usize, question: &Question, limits: &ValidationLimits) -> Vec<String> {
    let prefix = format!("Question #{}", number);
    let mut issues = Vec::new();

    let question_length = question.question_text.chars().count();
    if question_length > limits.question_max_length {
        issues.push(format!(
            "{} length ({}) invalid; must be at most {}",
            prefix, question_length, limits.question_max_length
        ));
    }

    if !question.question_text.starts_with(QUESTION_PREFIX) {
        issues.push(format!("{} does not start with '{}'", prefix, QUESTION_PREFIX));
    }

    if question.answers.len() < 2 {
        issues.push(format!("{} does not have at least 2 answer options", prefix));
    }

    // 只看第一個字元，與下方的兩字元前綴檢查分開回報
    let correct_answers = question
        .answers
        .iter()
        .filter(|answer| answer.starts_with('*'))
        .count();
    if correct_answers != 1 {
        issues.push(format!(
            "{} correct answers ({}) invalid; must have exactly 1",
            prefix, correct_answers
        ));
    }

    let all_prefixed = question.answers.iter().all(|answer| {
        answer.starts_with(CORRECT_ANSWER_PREFIX) || answer.starts_with(INCORRECT_ANSWER_PREFIX)
    });
    if !all_prefixed {
        issues.push(format!(
            "{} has invalid answers; all answers must start with '{}' or '{}'",
            prefix, CORRECT_ANSWER_PREFIX, INCORRECT_ANSWER_PREFIX
        ));
    }

    for answer in &question.answers {
        let answer_length = answer.chars().count();
        if answer_length > limits.answer_max_length {
            issues.push(format!(
                "{} answer length ({}) invalid; must be at most {}: {}",
                prefix, answer_length, limits.answer_max_length, answer
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, answers: &[&str]) -> Question {
        Question {
            question_text: text.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            clip_number: 1,
            time_code: Some("12:34".to_string()),
        }
    }

    fn assessment_of(questions: Vec<Question>) -> Assessment {
        Assessment { questions }
    }

    #[test]
    fn test_valid_question_has_no_issues() {
        let assessment = assessment_of(vec![question(
            "Q) Question number 1",
            &["- answer 1", "- answer 2", "* answer 3"],
        )]);
        assert!(assessment.validate(&ValidationLimits::default()).is_empty());
    }

    #[test]
    fn test_reports_question_too_long() {
        let long = format!("Q) Question number {}", "1234567890".repeat(18));
        let assessment = assessment_of(vec![question(
            &long,
            &["- answer 1", "- answer 2", "* answer 3"],
        )]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Question #1 length"));
        assert!(issues[0].contains(&format!("({})", long.chars().count())));
        assert!(issues[0].contains("65"));
    }

    #[test]
    fn test_reports_answer_too_long() {
        let long_answer = format!("* answer 3{}", "2345678901".repeat(18));
        let assessment = assessment_of(vec![question(
            "Q) Question number 1",
            &["- answer 1", "- answer 2", &long_answer],
        )]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains(&long_answer));
    }

    #[test]
    fn test_reports_no_correct_answers() {
        let assessment = assessment_of(vec![question(
            "Q) Question number 1",
            &["- answer 1", "- answer 2", "- answer 3"],
        )]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues, vec!["Question #1 correct answers (0) invalid; must have exactly 1"]);
    }

    #[test]
    fn test_reports_multiple_correct_answers() {
        let assessment = assessment_of(vec![question(
            "Q) Question number 1",
            &["* answer 1", "- answer 2", "* answer 3"],
        )]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues, vec!["Question #1 correct answers (2) invalid; must have exactly 1"]);
    }

    #[test]
    fn test_reports_missing_prefix_and_too_few_answers() {
        let assessment = assessment_of(vec![question("What is Rust?", &["* a language"])]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("does not start with 'Q) '"));
        assert!(issues[1].contains("at least 2 answer options"));
    }

    #[test]
    fn test_bad_answer_prefixes_reported_once_per_question() {
        let assessment = assessment_of(vec![question(
            "Q) Question number 1",
            &["*answer 1", "+ answer 2", "answer 3", "- answer 4"],
        )]);

        let issues = assessment.validate(&ValidationLimits::default());

        // "*answer 1" counts as correct for the one-character check
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("has invalid answers"));
    }

    #[test]
    fn test_collects_issues_across_all_questions() {
        let assessment = assessment_of(vec![
            question("Q) fine", &["* a", "- b"]),
            question("Q) none correct", &["- a", "- b"]),
            question("no prefix", &["* a", "- b"]),
        ]);

        let issues = assessment.validate(&ValidationLimits::default());

        assert_eq!(issues.len(), 2);
        assert!(issues[0].starts_with("Question #2 "));
        assert!(issues[1].starts_with("Question #3 "));
    }

    #[test]
    fn test_custom_limits() {
        let assessment = assessment_of(vec![question("Q) twelve ch", &["* abcdef", "- b"])]);
        let limits = ValidationLimits {
            question_max_length: 10,
            answer_max_length: 5,
        };

        let issues = assessment.validate(&limits);

        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("must be at most 10"));
        assert!(issues[1].contains("must be at most 5: * abcdef"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let text = format!("Q) {}", "é".repeat(62));
        let assessment = assessment_of(vec![question(&text, &["* a", "- b"])]);
        assert!(assessment.validate(&ValidationLimits::default()).is_empty());
    }

    #[test]
    fn test_empty_assessment_is_valid() {
        assert!(Assessment::new().validate(&ValidationLimits::default()).is_empty());
    }
}
