//! Reader for the line-oriented meta file format (`questions.txt`).
//!
//! # Format
//! ```text
//! Q) Which keyword declares a constant?
//! - let
//! * const
//! - static mut
//! = foo-fundamentals-m1-3.mp4
//!
//! ```
//! A `Q) ` line opens a question, `* ` / `- ` lines add answers and the `= ` clip
//! reference closes the question. Everything else is ignored.

use crate::core::clip::clip_number_from_file_name;
use crate::domain::model::{
    Assessment, Question, CLIP_REFERENCE_PREFIX, CORRECT_ANSWER_PREFIX, INCORRECT_ANSWER_PREFIX,
    QUESTION_PREFIX,
};
use crate::utils::error::{AssessmentError, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

impl Assessment {
    /// Stream a meta file line by line and rebuild its questions.
    pub async fn load_questions_from_meta_file<P: AsRef<Path>>(path: P) -> Result<Assessment> {
        let path = path.as_ref();
        tracing::debug!("Reading meta file {}", path.display());

        let file = tokio::fs::File::open(path).await?;
        let assessment = Self::load_questions_from_reader(BufReader::new(file), path).await?;

        tracing::info!(
            "Loaded {} question(s) from {}",
            assessment.len(),
            path.display()
        );
        Ok(assessment)
    }

    /// Same as [`Assessment::load_questions_from_meta_file`] over any buffered reader.
    /// `origin` is only used in error messages.
    pub async fn load_questions_from_reader<R>(reader: R, origin: &Path) -> Result<Assessment>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut loader = MetaFileLoader::new(origin);
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            loader.process_line(&line)?;
        }
        Ok(loader.finish())
    }
}

enum MetaLine<'a> {
    Question,
    Answer,
    ClipReference(&'a str),
    Other,
}

impl<'a> MetaLine<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with(QUESTION_PREFIX) {
            MetaLine::Question
        } else if line.starts_with(CORRECT_ANSWER_PREFIX) || line.starts_with(INCORRECT_ANSWER_PREFIX)
        {
            MetaLine::Answer
        } else if let Some(clip) = line.strip_prefix(CLIP_REFERENCE_PREFIX) {
            MetaLine::ClipReference(clip)
        } else {
            MetaLine::Other
        }
    }
}

enum LoaderState {
    AwaitingQuestion,
    AccumulatingAnswers {
        question_text: String,
        answers: Vec<String>,
        opened_at: usize,
    },
}

struct MetaFileLoader {
    origin: PathBuf,
    state: LoaderState,
    line_number: usize,
    questions: Vec<Question>,
}

impl MetaFileLoader {
    fn new(origin: &Path) -> Self {
        Self {
            origin: origin.to_path_buf(),
            state: LoaderState::AwaitingQuestion,
            line_number: 0,
            questions: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str) -> Result<()> {
        self.line_number += 1;

        match MetaLine::classify(line) {
            MetaLine::Question => self.open_question(line),
            MetaLine::Answer => self.push_answer(line)?,
            MetaLine::ClipReference(clip) => self.close_question(clip)?,
            MetaLine::Other => {}
        }
        Ok(())
    }

    fn open_question(&mut self, line: &str) {
        if let LoaderState::AccumulatingAnswers { opened_at, .. } = self.state {
            tracing::warn!(
                "{}: question opened at line {} has no clip reference, discarded",
                self.origin.display(),
                opened_at
            );
        }
        self.state = LoaderState::AccumulatingAnswers {
            question_text: line.to_string(),
            answers: Vec::new(),
            opened_at: self.line_number,
        };
    }

    fn push_answer(&mut self, line: &str) -> Result<()> {
        if let LoaderState::AccumulatingAnswers { answers, .. } = &mut self.state {
            answers.push(line.to_string());
            return Ok(());
        }
        Err(self.malformed("answer line without a question"))
    }

    fn close_question(&mut self, clip: &str) -> Result<()> {
        let state = std::mem::replace(&mut self.state, LoaderState::AwaitingQuestion);
        let LoaderState::AccumulatingAnswers {
            question_text,
            answers,
            ..
        } = state
        else {
            return Err(self.malformed("clip reference without a question"));
        };

        let clip_number = clip_number_from_file_name(clip.trim()).map_err(|_| {
            self.malformed(&format!("cannot read a clip number from '{}'", clip))
        })?;

        self.questions.push(Question {
            question_text,
            answers,
            clip_number,
            time_code: None,
        });
        Ok(())
    }

    fn finish(self) -> Assessment {
        if let LoaderState::AccumulatingAnswers { opened_at, .. } = self.state {
            tracing::warn!(
                "{}: question opened at line {} has no clip reference, discarded",
                self.origin.display(),
                opened_at
            );
        }
        Assessment {
            questions: self.questions,
        }
    }

    fn malformed(&self, reason: &str) -> AssessmentError {
        AssessmentError::MalformedMetaFile {
            path: self.origin.clone(),
            line: self.line_number,
            reason: reason.to_string(),
        }
    }
}
