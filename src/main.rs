use clap::Parser;
use course_assessment::config::cli::{BuildArgs, CheckArgs, Command};
use course_assessment::core::Pipeline;
use course_assessment::utils::logger;
use course_assessment::{
    AssessmentEngine, AssessmentError, AssessmentPipeline, CliConfig, ValidationReport,
    XmpMarkerSource,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::Build(args) => build(args).await,
        Command::Check(args) => check(args).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn build(args: &BuildArgs) -> Result<i32, AssessmentError> {
    let settings = args.settings()?;
    let source = args.source.input.question_source().await?;
    tracing::info!(
        "🚀 Building assessment for {} module {} from {}",
        settings.course_id,
        settings.module_number,
        source
    );

    let pipeline = AssessmentPipeline::new(XmpMarkerSource::new(), settings, source);
    let engine = AssessmentEngine::new(pipeline);
    let output_path = engine.run().await?;

    println!("✅ Assessment file written");
    println!("📁 {}", output_path.display());
    Ok(0)
}

async fn check(args: &CheckArgs) -> Result<i32, AssessmentError> {
    let settings = args.settings()?;
    let source = args.source.input.question_source().await?;
    let description = source.to_string();

    // check 只做 extract + transform，不寫檔
    let pipeline = AssessmentPipeline::new(
        XmpMarkerSource::new(),
        course_assessment::Settings {
            strict: false,
            ..settings
        },
        source,
    );
    let assessment = pipeline.extract().await?;
    let validated = pipeline.transform(assessment).await?;

    let report = ValidationReport::new(description, &validated);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(if report.valid { 0 } else { 1 })
}
