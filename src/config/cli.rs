use crate::config::{AssessmentConfig, Settings};
use crate::core::marker::xmp_files_in_dir;
use crate::core::pipeline::QuestionSource;
use crate::utils::error::{AssessmentError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-assessment")]
#[command(about = "Extract, validate and write the assessment questions of a course module")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load questions, validate them and write questions.txt / no-questions.txt
    Build(BuildArgs),
    /// Load and validate questions without writing anything
    Check(CheckArgs),
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// XMP clip metadata files to read question markers from
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub xmp: Vec<PathBuf>,

    /// Directory whose *.xmp files are read
    #[arg(long, value_name = "DIR")]
    pub xmp_dir: Option<PathBuf>,

    /// Existing meta file (questions.txt)
    #[arg(long, value_name = "FILE")]
    pub meta_file: Option<PathBuf>,
}

impl InputArgs {
    pub async fn question_source(&self) -> Result<QuestionSource> {
        if let Some(path) = &self.meta_file {
            validation::validate_path("meta_file", path)?;
            return Ok(QuestionSource::MetaFile(path.clone()));
        }

        let files = match &self.xmp_dir {
            Some(dir) => xmp_files_in_dir(dir).await?,
            None => self.xmp.clone(),
        };
        validation::validate_file_extensions("xmp", &files, &["xmp"])?;
        Ok(QuestionSource::XmpFiles(files))
    }
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum question length in characters
    #[arg(long)]
    pub question_max_length: Option<usize>,

    /// Maximum answer length in characters
    #[arg(long)]
    pub answer_max_length: Option<usize>,

    /// How many XMP files are read at the same time
    #[arg(long)]
    pub concurrent_reads: Option<usize>,
}

impl SourceArgs {
    /// Settings from the config file (if any) with command line overrides applied.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let config = AssessmentConfig::from_file(path)?;
                config.validate()?;
                Settings::from_config(&config)
            }
            None => Settings::default(),
        };

        if let Some(max) = self.question_max_length {
            settings.limits.question_max_length = max;
        }
        if let Some(max) = self.answer_max_length {
            settings.limits.answer_max_length = max;
        }
        if let Some(reads) = self.concurrent_reads {
            settings.concurrent_reads = reads;
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Course identifier used in clip references, e.g. foo-fundamentals
    #[arg(long)]
    pub course_id: Option<String>,

    /// Module number used in clip references
    #[arg(long)]
    pub module: Option<u32>,

    /// Directory the assessment file is written to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Fail instead of writing when validation finds issues
    #[arg(long)]
    pub strict: bool,
}

impl BuildArgs {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = self.source.settings()?;

        if let Some(course_id) = &self.course_id {
            settings.course_id = course_id.clone();
        }
        if let Some(module) = self.module {
            settings.module_number = module;
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        if self.strict {
            settings.strict = true;
        }

        if settings.course_id.is_empty() {
            return Err(AssessmentError::MissingConfigError {
                field: "course_id".to_string(),
            });
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn settings(&self) -> Result<Settings> {
        let settings = self.source.settings()?;
        settings.validate_for_check()?;
        Ok(settings)
    }
}
