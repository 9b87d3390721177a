// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use speecheval::app_config::{self, Config};
use speecheval::app_controller::Controller;
use speecheval::evaluation::ExportFormat;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Text,
    Json,
    Csv,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Text => ExportFormat::Text,
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one speech against its slides
    Evaluate {
        /// Slide text file
        #[arg(value_name = "SLIDES")]
        slides: PathBuf,

        /// Speech payload (JSON with "plan" and "script")
        #[arg(value_name = "SPEECH")]
        speech: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: CliExportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rank several speeches written for the same slides
    Compare {
        /// Slide text file
        #[arg(value_name = "SLIDES")]
        slides: PathBuf,

        /// Speech payload files or directories
        #[arg(value_name = "SPEECHES", required = true)]
        speeches: Vec<PathBuf>,

        /// Write the comparison to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a text report next to every speech
        #[arg(short, long)]
        write_reports: bool,
    },

    /// Show length statistics of the slides and a speech
    Analyze {
        /// Slide text file
        #[arg(value_name = "SLIDES")]
        slides: PathBuf,

        /// Speech payload
        #[arg(value_name = "SPEECH")]
        speech: PathBuf,
    },

    /// Generate shell completions for speecheval
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// speecheval - rubric-based speech script evaluation
///
/// Scores a generated speech plan and script against the slide deck it was
/// written for, and suggests what to improve.
#[derive(Parser, Debug)]
#[command(name = "speecheval")]
#[command(version = "1.0.0")]
#[command(about = "Rubric-based speech script evaluation")]
#[command(long_about = "speecheval scores a speech script across content consistency, structure, language quality, detail richness and time management.

EXAMPLES:
    speecheval evaluate slides.txt speech.json             # Text report on stdout
    speecheval evaluate -f json slides.txt speech.json     # JSON export
    speecheval compare slides.txt speeches/                # Rank every speech in a directory
    speecheval compare -w slides.txt a.json b.json         # Rank and write per-speech reports
    speecheval analyze slides.txt speech.json              # Length statistics
    speecheval completions bash > speecheval.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in speecheval.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "speecheval.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "speecheval", &mut std::io::stdout());
        return Ok(());
    }

    // Command line log level wins over the config file
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Evaluate {
            slides,
            speech,
            format,
            output,
        } => {
            let rendered = controller.run_evaluate(&slides, &speech, format.into(), output.as_deref())?;
            if output.is_none() {
                println!("{}", rendered);
            }
        }
        Commands::Compare {
            slides,
            speeches,
            output,
            write_reports,
        } => {
            let rendered = controller
                .run_compare(&slides, &speeches, output.as_deref(), write_reports)
                .await?;
            if output.is_none() {
                println!("{}", rendered);
            }
        }
        Commands::Analyze { slides, speech } => {
            println!("{}", controller.run_analyze(&slides, &speech)?);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
