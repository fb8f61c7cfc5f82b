use anyhow::Result;
use course_assessment::{Assessment, Question};
use tempfile::TempDir;

fn question(text: &str, answers: &[&str], clip_number: u32, time_code: &str) -> Question {
    Question {
        question_text: text.to_string(),
        answers: answers.iter().map(|a| a.to_string()).collect(),
        clip_number,
        time_code: Some(time_code.to_string()),
    }
}

#[tokio::test]
async fn test_creates_questions_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut assessment = Assessment::new();
    assessment.push(question(
        "Q) Question number 1",
        &["- answer 1", "- answer 2", "* answer 3"],
        1,
        "12:34",
    ));
    assessment.push(question(
        "Q) Question number 2",
        &["- answer 4", "- answer 5", "* answer 6"],
        1,
        "34:56",
    ));

    let file_path = assessment
        .create_assessment_file("foo-fundamentals", 1, temp_dir.path())
        .await?;

    assert_eq!(file_path, temp_dir.path().join("questions.txt"));
    assert!(file_path.is_file());

    let content = tokio::fs::read_to_string(&file_path).await?;
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "Q) Question number 1",
            "- answer 1",
            "- answer 2",
            "* answer 3",
            "= foo-fundamentals-m1-1.mp4",
            "",
            "Q) Question number 2",
            "- answer 4",
            "- answer 5",
            "* answer 6",
            "= foo-fundamentals-m1-1.mp4",
            "",
            "",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_creates_zero_byte_no_questions_file() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let file_path = Assessment::new()
        .create_assessment_file("foo-fundamentals", 1, temp_dir.path())
        .await?;

    assert_eq!(file_path, temp_dir.path().join("no-questions.txt"));
    assert!(file_path.is_file());
    assert_eq!(tokio::fs::metadata(&file_path).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_round_trip_through_meta_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let fixture = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/questions.txt");

    let original = Assessment::load_questions_from_meta_file(&fixture).await?;
    let written = original
        .create_assessment_file("foo-fundamentals", 1, temp_dir.path())
        .await?;
    let reloaded = Assessment::load_questions_from_meta_file(&written).await?;

    assert_eq!(reloaded, original);

    // 原始檔與輸出應逐位元組相同
    let original_bytes = tokio::fs::read(&fixture).await?;
    let written_bytes = tokio::fs::read(&written).await?;
    assert_eq!(original_bytes, written_bytes);

    Ok(())
}

#[tokio::test]
async fn test_round_trip_drops_time_codes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut assessment = Assessment::new();
    assessment.push(question("Q) One", &["* a", "- b"], 3, "00:10"));
    assessment.push(question("Q) Two", &["- a", "* b", "- c"], 7, "00:20"));

    let written = assessment
        .create_assessment_file("bar-basics", 2, temp_dir.path())
        .await?;
    let reloaded = Assessment::load_questions_from_meta_file(&written).await?;

    assert_eq!(reloaded.questions.len(), 2);
    for (before, after) in assessment.questions.iter().zip(&reloaded.questions) {
        assert!(before.same_content(after));
        assert!(after.time_code.is_none());
    }

    Ok(())
}

#[tokio::test]
async fn test_round_trip_with_dotted_course_id() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut assessment = Assessment::new();
    assessment.push(question("Q) Which runtime?", &["* node", "- deno"], 3, "00:42"));

    let written = assessment
        .create_assessment_file("node.js-fundamentals", 1, temp_dir.path())
        .await?;
    let content = tokio::fs::read_to_string(&written).await?;
    assert!(content.contains("= node.js-fundamentals-m1-3.mp4\n"));

    let reloaded = Assessment::load_questions_from_meta_file(&written).await?;
    assert_eq!(reloaded.questions.len(), 1);
    assert!(assessment.questions[0].same_content(&reloaded.questions[0]));

    Ok(())
}
