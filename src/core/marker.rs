use crate::core::clip::clip_number_from_file_name;
use crate::domain::model::{Assessment, MarkerQuestion, Question};
use crate::domain::ports::MarkerSource;
use crate::utils::error::Result;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};

/// Split raw marker text into the question (first line) and its non-empty answer lines.
pub fn parse_marker_content(content: &str) -> MarkerQuestion {
    let mut lines = content.lines();
    let question_text = lines.next().unwrap_or_default().to_string();
    let answers = lines
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    MarkerQuestion {
        question_text,
        answers,
    }
}

impl Assessment {
    /// Build an assessment from the question markers of every XMP file.
    ///
    /// Files are read concurrently, at most `concurrent_reads` at a time. Results are
    /// merged in input order once every read has finished; the first failure aborts
    /// the whole load and drops the reads still in flight.
    pub async fn load_questions_from_xmp_files<M, P>(
        source: &M,
        xmp_files: &[P],
        concurrent_reads: usize,
    ) -> Result<Assessment>
    where
        M: MarkerSource + ?Sized,
        P: AsRef<Path>,
    {
        tracing::debug!(
            "Loading questions from {} XMP file(s), {} concurrent read(s)",
            xmp_files.len(),
            concurrent_reads
        );

        // futures 是惰性的，buffered 才會真正開始讀取
        let reads: Vec<_> = xmp_files
            .iter()
            .map(|path| questions_from_xmp_file(source, path.as_ref()))
            .collect();
        let per_file: Vec<Vec<Question>> = stream::iter(reads)
            .buffered(concurrent_reads.max(1))
            .try_collect()
            .await?;

        let assessment = Assessment {
            questions: per_file.into_iter().flatten().collect(),
        };
        tracing::info!("Loaded {} question(s) from XMP markers", assessment.len());
        Ok(assessment)
    }
}

async fn questions_from_xmp_file<M>(source: &M, path: &Path) -> Result<Vec<Question>>
where
    M: MarkerSource + ?Sized,
{
    let markers = source.markers(path).await?;

    let mut questions = Vec::new();
    let mut file_clip = None;
    for marker in markers {
        let parsed = parse_marker_content(&marker.content);
        if !parsed.question_text.starts_with('Q') {
            tracing::trace!("Skipping non-question marker at {}", marker.timecode);
            continue;
        }

        // 只在真的有題目時才解析檔名
        let clip_number = match file_clip {
            Some(n) => n,
            None => {
                let n = clip_number_from_file_name(&path.to_string_lossy())?;
                file_clip = Some(n);
                n
            }
        };

        questions.push(Question {
            question_text: parsed.question_text,
            answers: parsed.answers,
            clip_number,
            time_code: Some(marker.timecode),
        });
    }

    tracing::debug!(
        "{}: {} question marker(s)",
        path.display(),
        questions.len()
    );
    Ok(questions)
}

/// Collect every `*.xmp` file directly inside `dir`, sorted by name.
pub async fn xmp_files_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_xmp = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xmp"));
        if is_xmp && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Marker;
    use crate::utils::error::AssessmentError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    struct MockMarkerSource {
        markers: HashMap<PathBuf, Vec<Marker>>,
        delays: HashMap<PathBuf, u64>,
    }

    impl MockMarkerSource {
        fn new() -> Self {
            Self {
                markers: HashMap::new(),
                delays: HashMap::new(),
            }
        }

        fn with_file(mut self, path: &str, markers: Vec<(&str, &str)>) -> Self {
            self.markers.insert(
                PathBuf::from(path),
                markers
                    .into_iter()
                    .map(|(content, timecode)| Marker {
                        content: content.to_string(),
                        timecode: timecode.to_string(),
                    })
                    .collect(),
            );
            self
        }

        fn with_delay(mut self, path: &str, millis: u64) -> Self {
            self.delays.insert(PathBuf::from(path), millis);
            self
        }
    }

    #[async_trait]
    impl MarkerSource for MockMarkerSource {
        async fn markers(&self, path: &Path) -> Result<Vec<Marker>> {
            if let Some(millis) = self.delays.get(path) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            self.markers
                .get(path)
                .cloned()
                .ok_or_else(|| AssessmentError::MarkerSourceError {
                    path: path.to_path_buf(),
                    message: "no such file".to_string(),
                })
        }
    }

    #[test]
    fn test_parse_marker_content() {
        let parsed = parse_marker_content("Q) What is 2 + 2?\n- 3\n\n* 4\n- 5\n");
        assert_eq!(parsed.question_text, "Q) What is 2 + 2?");
        assert_eq!(parsed.answers, vec!["- 3", "* 4", "- 5"]);
    }

    #[test]
    fn test_parse_marker_content_handles_crlf_and_empty_input() {
        let parsed = parse_marker_content("Q) Pick one\r\n* yes\r\n- no");
        assert_eq!(parsed.question_text, "Q) Pick one");
        assert_eq!(parsed.answers, vec!["* yes", "- no"]);

        let empty = parse_marker_content("");
        assert_eq!(empty, MarkerQuestion::default());
    }

    #[test]
    fn test_parse_marker_content_keeps_malformed_text() {
        let parsed = parse_marker_content("Chapter 2");
        assert_eq!(parsed.question_text, "Chapter 2");
        assert!(parsed.answers.is_empty());
    }

    #[tokio::test]
    async fn test_load_skips_non_question_markers() {
        let source = MockMarkerSource::new().with_file(
            "course-m1-2.xmp",
            vec![
                ("Intro", "00:00:01:00"),
                ("Q) Which one?\n* this\n- that", "00:01:10:05"),
            ],
        );

        let assessment =
            Assessment::load_questions_from_xmp_files(&source, &["course-m1-2.xmp"], 4)
                .await
                .unwrap();

        assert_eq!(assessment.len(), 1);
        let question = &assessment.questions[0];
        assert_eq!(question.clip_number, 2);
        assert_eq!(question.time_code.as_deref(), Some("00:01:10:05"));
        assert_eq!(question.answers.len(), 2);
    }

    #[tokio::test]
    async fn test_load_with_dotted_course_id() {
        let source = MockMarkerSource::new().with_file(
            "/media/node.js-fundamentals-m1-3.xmp",
            vec![("Q) Which runtime?\n* node\n- deno", "42")],
        );

        let assessment = Assessment::load_questions_from_xmp_files(
            &source,
            &["/media/node.js-fundamentals-m1-3.xmp"],
            1,
        )
        .await
        .unwrap();

        assert_eq!(assessment.questions[0].clip_number, 3);
    }

    #[tokio::test]
    async fn test_load_merges_in_input_order() {
        // 第一個檔案較慢完成，結果仍需依輸入順序
        let source = MockMarkerSource::new()
            .with_file("course-m1-1.xmp", vec![("Q) first\n* a\n- b", "1")])
            .with_file("course-m1-2.xmp", vec![("Q) second\n* a\n- b", "2")])
            .with_delay("course-m1-1.xmp", 50);

        let assessment = Assessment::load_questions_from_xmp_files(
            &source,
            &["course-m1-1.xmp", "course-m1-2.xmp"],
            2,
        )
        .await
        .unwrap();

        let texts: Vec<&str> = assessment
            .questions
            .iter()
            .map(|q| q.question_text.as_str())
            .collect();
        assert_eq!(texts, vec!["Q) first", "Q) second"]);
    }

    #[tokio::test]
    async fn test_load_fails_when_any_file_fails() {
        let source = MockMarkerSource::new()
            .with_file("course-m1-1.xmp", vec![("Q) first\n* a\n- b", "1")]);

        let result = Assessment::load_questions_from_xmp_files(
            &source,
            &["course-m1-1.xmp", "course-m1-9.xmp"],
            2,
        )
        .await;

        assert!(matches!(
            result,
            Err(AssessmentError::MarkerSourceError { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_unnumbered_clip_with_questions() {
        let source = MockMarkerSource::new()
            .with_file("course-intro.xmp", vec![("Q) first\n* a\n- b", "1")]);

        let result =
            Assessment::load_questions_from_xmp_files(&source, &["course-intro.xmp"], 1).await;

        assert!(matches!(result, Err(AssessmentError::InvalidClipName { .. })));
    }

    #[tokio::test]
    async fn test_load_with_no_files_is_empty() {
        let source = MockMarkerSource::new();
        let files: Vec<PathBuf> = Vec::new();
        let assessment = Assessment::load_questions_from_xmp_files(&source, &files, 4)
            .await
            .unwrap();
        assert!(assessment.is_empty());
    }
}
