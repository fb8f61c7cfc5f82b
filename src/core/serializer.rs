use crate::core::clip::clip_file_name;
use crate::domain::model::{
    Assessment, CLIP_REFERENCE_PREFIX, NO_QUESTIONS_FILE_NAME, QUESTIONS_FILE_NAME,
};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

impl Assessment {
    /// Write the module's assessment file into `build_path` and return its full path.
    ///
    /// Writes `questions.txt` in the meta file format, or a zero-byte
    /// `no-questions.txt` when there is nothing to write.
    pub async fn create_assessment_file<P: AsRef<Path>>(
        &self,
        course_id: &str,
        module_number: u32,
        build_path: P,
    ) -> Result<PathBuf> {
        let build_path = build_path.as_ref();

        if self.is_empty() {
            let full_path = build_path.join(NO_QUESTIONS_FILE_NAME);
            tokio::fs::write(&full_path, b"").await?;
            tracing::info!("No questions, wrote {}", full_path.display());
            return Ok(full_path);
        }

        let full_path = build_path.join(QUESTIONS_FILE_NAME);
        let file = tokio::fs::File::create(&full_path).await?;
        let mut writer = BufWriter::new(file);
        self.write_meta(&mut writer, course_id, module_number).await?;
        writer.flush().await?;

        tracing::info!(
            "Wrote {} question(s) to {}",
            self.len(),
            full_path.display()
        );
        Ok(full_path)
    }

    /// Stream the questions in meta file format.
    pub async fn write_meta<W>(&self, writer: &mut W, course_id: &str, module_number: u32) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for question in &self.questions {
            writer.write_all(question.question_text.as_bytes()).await?;
            writer.write_all(b"\n").await?;

            for answer in &question.answers {
                writer.write_all(answer.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }

            let clip_line = format!(
                "{}{}\n\n",
                CLIP_REFERENCE_PREFIX,
                clip_file_name(course_id, module_number, question.clip_number)
            );
            writer.write_all(clip_line.as_bytes()).await?;
        }
        Ok(())
    }
}
