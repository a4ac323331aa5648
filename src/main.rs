// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use subtran::app_config::{Config, DEFAULT_CONFIG_PATH, LogLevel};
use subtran::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an SRT subtitle file using DeepL (default command)
    #[command(alias = "tr")]
    Translate(TranslateArgs),

    /// Store the DeepL API key in the configuration file
    SetKey {
        /// The DeepL API key (free-tier keys end with ':fx')
        key: String,

        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,
    },

    /// Show the account's DeepL character usage
    Usage {
        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,
    },

    /// Generate shell completions for subtran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input subtitle file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Directory for the translated file; defaults to the input's directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Source language code (e.g. 'en'); omit to let DeepL detect it
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subtran - SRT subtitle translation with DeepL
///
/// Parses an SRT file, checks its character volume against the configured
/// quota, translates every cue through the DeepL API, and writes the result
/// with timing untouched.
#[derive(Parser, Debug)]
#[command(name = "subtran")]
#[command(version)]
#[command(about = "DeepL-powered SRT subtitle translator")]
#[command(long_about = "subtran translates SRT subtitle files using the DeepL API.

EXAMPLES:
    subtran movie.srt -t fr                  # Translate to French
    subtran movie.srt -s en -t es            # Translate from English to Spanish
    subtran movie.srt -t de -f               # Force overwrite of movie.de.srt
    subtran set-key 1a2b3c...:fx             # Store a free-tier API key
    subtran usage                            # Show remote character usage
    subtran completions bash > subtran.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

QUOTA:
    DeepL bills by character volume. subtran refuses to submit a file whose
    character count exceeds the configured limit (default 500,000, the free
    tier allowance); the remote quota remains authoritative.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Directory for the translated file; defaults to the input's directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Source language code (e.g. 'en'); omit to let DeepL detect it
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color code for log level
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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:>5} {}\x1B[0m",
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
    // Initialize the logger once with info level by default;
    // the level is updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subtran", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::SetKey { key, config_path }) => {
            Controller::save_api_key(&config_path, &key)
        }
        Some(Commands::Usage { config_path }) => {
            let config = Config::load_or_default(&config_path)?;
            let controller = Controller::with_config(config)?;
            controller.report_usage().await
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - treat top-level args as a translate command
            let input_file = cli.input_file.ok_or_else(|| {
                anyhow!("INPUT_FILE is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_file,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                source_language: cli.source_language,
                target_language: cli.target_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // If log level was not set via command line, apply the configured one
    if options.log_level.is_none() {
        log::set_max_level(level_filter(config.log_level));
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| {
            options
                .input_file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });

    let controller = Controller::with_config(config)?;
    controller
        .run(options.input_file, output_dir, options.force_overwrite)
        .await
}
