//! article-wordfreq: top-N word frequencies for scraped articles

use article_wordfreq::cli::{self, Cli, Commands, ConfigAction, StopwordAction};
use article_wordfreq::config::{Config, OutputFormat};
use article_wordfreq::error::{Result, WordFreqError};
use article_wordfreq::input::manager::InputManager;
use article_wordfreq::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use article_wordfreq::processing::pipeline::FrequencyPipeline;
use article_wordfreq::processing::stopwords::{StopwordList, StopwordSet};
use article_wordfreq::processing::text_processor::tokenize;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::process;
use std::time::Duration;

const SUPPORTED_INPUTS: &[&str] = &["txt", "md", "markdown", "html", "htm", "pdf"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            inputs,
            top_n,
            min_length,
            stopwords,
            no_stopwords,
            output,
            save,
            detailed,
            parallel,
        } => {
            for input in &inputs {
                cli::validate_file_extension(input, SUPPORTED_INPUTS)
                    .map_err(|e| WordFreqError::InvalidInput(format!("{}: {}", input.display(), e)))?;
            }

            if let Some(top_n) = top_n {
                config.extraction.top_n = top_n;
            }
            if let Some(min_length) = min_length {
                config.extraction.min_length = min_length;
            }
            if stopwords.is_some() {
                config.extraction.stopwords_file = stopwords;
            }
            if let Some(format) = output {
                config.output.format = cli::parse_output_format(&format).map_err(WordFreqError::InvalidInput)?;
            }
            config.output.detailed |= detailed;
            config.input.parallel |= parallel;
            config.validate()?;

            let stopword_set = if no_stopwords {
                info!("Stopword filtering disabled");
                StopwordSet::empty()
            } else {
                config.build_stopwords()?
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Loading {} article(s)...", inputs.len()));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let mut input_manager = InputManager::new().with_cache(config.input.enable_caching);
            let documents = input_manager.load_documents(&inputs).await;
            spinner.finish_and_clear();
            let documents = documents?;

            let pipeline = FrequencyPipeline::new(stopword_set, config.extraction_options());
            let report = if config.input.parallel {
                pipeline.analyze_parallel(documents).await?
            } else {
                pipeline.analyze_all(&documents)
            };

            for empty in report.empty_documents() {
                warn!("Article {} produced no qualifying words", empty.document.id);
            }

            // File formats land in the output directory unless a path was given
            let destination = match save {
                Some(path) => Some(path),
                None if config.output.format != OutputFormat::Console => Some(
                    config
                        .output
                        .output_dir
                        .join(suggest_filename(&config.output.format, "articles", true)),
                ),
                None => None,
            };

            let generator = ReportGenerator::with_options(
                config.output.color_output && destination.is_none(),
                config.output.detailed,
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &config.output.format)?;

            match destination {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!(
                        "✅ Saved {} record(s) for {} article(s) to {}",
                        report.record_count(),
                        report.documents.len(),
                        path.display()
                    );
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Stopwords { action } => {
            let stopword_set = config.build_stopwords()?;
            match action {
                StopwordAction::Show => {
                    println!("📚 {} stopword(s)\n", stopword_set.len());
                    for chunk in stopword_set.sorted().chunks(8) {
                        println!("  {}", chunk.join(", "));
                    }
                }
                StopwordAction::Check { words } => {
                    for word in words {
                        let tokens = tokenize(&word);
                        if tokens.is_empty() {
                            println!("  {}: no letters (dropped)", word);
                        }
                        for token in tokens {
                            let verdict = if stopword_set.contains(&token) {
                                "stopword (filtered)"
                            } else if token.chars().count() < config.extraction.min_length {
                                "too short (filtered)"
                            } else {
                                "kept"
                            };
                            if token == word {
                                println!("  {}: {}", word, verdict);
                            } else {
                                println!("  {} -> {}: {}", word, token, verdict);
                            }
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Minimum word length: {}", config.extraction.min_length);
                println!("Top words per article: {}", config.extraction.top_n);
                let list = match config.extraction.stopword_list {
                    StopwordList::English => "english",
                    StopwordList::None => "none",
                };
                println!("Stopword list: {}", list);
                if let Some(path) = &config.extraction.stopwords_file {
                    println!("Stopword file: {}", path.display());
                }
                if !config.extraction.extra_stopwords.is_empty() {
                    println!("Extra stopwords: {}", config.extraction.extra_stopwords.join(", "));
                }
                println!("Output format: {}", format_name(&config.output.format));
                println!("Parallel processing: {}", config.input.parallel);
                println!("Output directory: {}", config.output.output_dir.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn format_name(format: &OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "console",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "markdown",
        OutputFormat::Csv => "csv",
        OutputFormat::Html => "html",
    }
}
