//! cv-extract: CV field and work experience extraction tool

use clap::Parser;
use cv_extract::ai::{build_field_extractor, FieldExtractor};
use cv_extract::cli::{self, Cli, Commands, ConfigAction};
use cv_extract::config::{Config, OutputFormat};
use cv_extract::error::{CvExtractError, Result};
use cv_extract::experience::ExperienceAnalyzer;
use cv_extract::input::file_detector::SUPPORTED_EXTENSIONS;
use cv_extract::input::{FileType, InputManager};
use cv_extract::output::ledger::export_records;
use cv_extract::output::{CandidateRecord, ExtractionResult, Ledger, ResultRenderer};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use walkdir::WalkDir;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    let config_path = Config::resolve_path(cli.config.as_deref());

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn resolve_output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(value) => cli::parse_output_format(value).map_err(CvExtractError::InvalidInput),
        None => Ok(config.output.default_format.clone()),
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Process {
            file,
            output,
            no_ai,
            append,
            export,
            position,
            source,
        } => {
            cli::validate_file_extension(&file, &SUPPORTED_EXTENSIONS)
                .map_err(CvExtractError::InvalidInput)?;
            let output_format = resolve_output_format(output.as_deref(), &config)?;

            println!("📄 Processing CV: {}", file.display());

            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;
            info!("Extracted {} characters from {}", text.len(), file.display());

            let field_extractor = build_field_extractor(&config.ai, no_ai);
            let analyzer = ExperienceAnalyzer::from_config(&config.extraction);
            let result = process_cv(
                &file,
                &text,
                field_extractor.as_ref(),
                &analyzer,
                position.as_deref(),
                source.as_deref(),
            )
            .await;

            let renderer = ResultRenderer::with_options(config.output.color_output, false, true);
            println!("{}", renderer.render(&result, &output_format)?);

            if append {
                let ledger = Ledger::from_config(&config.ledger);
                ledger.append(&result.record)?;
                println!("✅ Appended to ledger: {}", ledger.path().display());
            }

            if let Some(export_path) = export {
                export_records(&export_path, std::slice::from_ref(&result.record))?;
                println!("⬇️  Exported to: {}", export_path.display());
            }
        }

        Commands::Batch {
            dir,
            export,
            no_ai,
            append,
        } => {
            if !dir.is_dir() {
                return Err(CvExtractError::InvalidInput(format!(
                    "Not a directory: {}",
                    dir.display()
                )));
            }

            let files = collect_cv_files(&dir);
            if files.is_empty() {
                println!("⚠️  No supported CV files found in {}", dir.display());
                return Ok(());
            }

            println!("📂 Processing {} CV files from {}", files.len(), dir.display());

            let field_extractor = build_field_extractor(&config.ai, no_ai);
            let analyzer = ExperienceAnalyzer::from_config(&config.extraction);
            let ledger = Ledger::from_config(&config.ledger);

            let progress = ProgressBar::new(files.len() as u64);
            progress.set_style(
                ProgressStyle::with_template(
                    "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .map_err(|e| CvExtractError::Processing(e.to_string()))?
                .progress_chars("=>-"),
            );

            // Each file is visited once, so caching full texts buys nothing
            let mut input_manager = InputManager::new().with_cache(false);
            let mut records = Vec::new();
            let mut skipped = 0usize;

            for file in &files {
                let name = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string();
                progress.set_message(name);

                let text = match input_manager.extract_text(file).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Skipping {}: {}", file.display(), e);
                        skipped += 1;
                        progress.inc(1);
                        continue;
                    }
                };

                let result =
                    process_cv(file, &text, field_extractor.as_ref(), &analyzer, None, None).await;

                if append {
                    ledger.append(&result.record)?;
                }
                records.push(result.record);
                progress.inc(1);
            }
            progress.finish_with_message("done");

            println!("\n✅ Processed {} CVs ({} skipped)", records.len(), skipped);
            if append {
                println!("📒 Ledger: {}", ledger.path().display());
            }

            if let Some(export_path) = export {
                export_records(&export_path, &records)?;
                println!(
                    "⬇️  Exported {} rows to: {}",
                    records.len(),
                    export_path.display()
                );
            }
        }

        Commands::Experience { file, output } => {
            let output_format = resolve_output_format(output.as_deref(), &config)?;

            let text = if file == "-" {
                info!("Reading CV text from stdin");
                std::io::read_to_string(std::io::stdin())?
            } else {
                let mut input_manager = InputManager::new();
                input_manager.extract_text(Path::new(&file)).await?
            };

            let analyzer = ExperienceAnalyzer::from_config(&config.extraction);
            let summary = analyzer.analyze(&text);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Console => {
                    println!("🗓 Total experience: {}", summary.total);
                    if !summary.merged_periods.is_empty() {
                        println!("\nPeriods:");
                        for period in &summary.merged_periods {
                            println!(
                                "  • {} - {}",
                                period.start.format("%b %Y"),
                                period.end.format("%b %Y")
                            );
                        }
                    }
                    println!("\nDate ranges found: {}", summary.raw_periods.len());
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", config_path.display());
                println!("\nExtraction:");
                println!("  End year policy: {:?}", config.extraction.end_year_policy);
                println!("  Grace months: {}", config.extraction.grace_months);
                println!("\nAI:");
                println!("  Enabled: {}", config.ai.enabled);
                println!("  Model: {}", config.ai.model);
                println!("  Temperature: {}", config.ai.temperature);
                println!("  Max tokens: {}", config.ai.max_tokens);
                println!("\nLedger: {}", config.ledger.path.display());
                println!("Output format: {:?}", config.output.default_format);
            }
            Some(ConfigAction::Init) => {
                if config_path.exists() {
                    println!(
                        "⚠️  Configuration file already exists: {}",
                        config_path.display()
                    );
                    return Ok(());
                }
                Config::default().save()?;
                println!("✅ Wrote default configuration to {}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn process_cv(
    file: &Path,
    text: &str,
    field_extractor: &dyn FieldExtractor,
    analyzer: &ExperienceAnalyzer,
    position: Option<&str>,
    source: Option<&str>,
) -> ExtractionResult {
    let fields = field_extractor.extract_fields(text).await;
    let experience = analyzer.analyze(text);
    let record = CandidateRecord::from_extraction(&fields, &experience.total, position, source);

    ExtractionResult {
        file: file.display().to_string(),
        record,
        experience,
    }
}

/// Collect supported CV files under a directory, sorted for stable runs
fn collect_cv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FileType::from_extension(ext).is_supported())
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
