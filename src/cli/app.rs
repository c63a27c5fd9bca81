//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use toolbelt::config::Config;
use toolbelt::output::OutputMode;
use toolbelt::tasks::Bucket;
use toolbelt::tictactoe::Mode;
use toolbelt::weather::WeatherOption;

/// toolbelt - a pocket toolbox for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "toolbelt",
    version,
    about = "A pocket toolbox for the terminal",
    long_about = "Small everyday tools behind one binary.\n\n\
                  Fetch crypto prices, headlines, weather and jokes; count words,\n\
                  export people lists to Excel, sort a messy folder, keep a task\n\
                  board; or play hangman and tic-tac-toe."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show cryptocurrency prices, filtered by name or price
    Crypto {
        /// Keep assets whose name contains this text (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Keep assets priced strictly above this many USD
        #[arg(short, long, value_parser = toolbelt::crypto::parse_threshold)]
        above: Option<f64>,
    },

    /// Export a people list to a colour-coded Excel workbook
    Export {
        /// Whitespace-delimited input file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Workbook to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play hangman
    Hangman {
        /// Use this word instead of fetching one
        #[arg(long, hide = true)]
        word: Option<String>,
    },

    /// Fetch jokes, rate them and save the list
    Jokes {
        /// How many jokes to fetch (at most 10)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch top headlines and save them
    News {
        /// News service API key
        api_key: String,

        /// Keyword to search for in the news articles
        #[arg(short, long)]
        query: Option<String>,

        /// Category of the news (e.g. business, technology)
        #[arg(short, long)]
        category: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sort a directory's files into folders by type
    Sort {
        /// Directory to sort
        source_dir: PathBuf,
    },

    /// Show and move tasks on the four-column board
    Tasks {
        /// Board file
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(subcommand)]
        action: Option<TaskAction>,
    },

    /// Show the current weather for a city
    Weather {
        /// City name
        city: String,

        /// Value to display
        #[arg(value_enum)]
        option: WeatherOption,

        /// Weather service API key (overrides config and environment)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print the most frequent words of a text file
    Words {
        /// Text file (defaults to the configured input)
        path: Option<PathBuf>,

        /// How many words to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Play tic-tac-toe
    #[command(name = "tictactoe")]
    TicTacToe {
        /// Game mode; asked interactively when omitted
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
    },

    /// Show or initialise configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Only this status (todo, in_progress, review, done or 1-4)
        #[arg(short, long)]
        status: Option<Bucket>,
    },

    /// Add a task
    Add {
        /// Task name
        name: String,

        /// Starting status
        #[arg(short, long, default_value = "todo")]
        status: Bucket,
    },

    /// Move a task to another status
    Move {
        /// Task name
        name: String,

        /// Target status (todo, in_progress, review, done or 1-4)
        status: Bucket,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the default config file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Crypto { name, above }) => {
            commands::crypto(name, above, &config, output_mode).await
        },
        Some(Command::Export { input, output }) => {
            commands::export(input, output, &config, output_mode)
        },
        Some(Command::Hangman { word }) => commands::hangman(word, &config).await,
        Some(Command::Jokes { count, output }) => {
            commands::jokes(count, output, &config, output_mode).await
        },
        Some(Command::News {
            api_key,
            query,
            category,
            output,
        }) => commands::news(&api_key, query, category, output, &config, output_mode).await,
        Some(Command::Sort { source_dir }) => commands::sort(source_dir, &config, output_mode),
        Some(Command::Tasks { file, action }) => commands::tasks(file, action, &config, output_mode),
        Some(Command::Weather {
            city,
            option,
            api_key,
        }) => commands::weather(&city, option, api_key.as_deref(), &config, output_mode).await,
        Some(Command::Words { path, top }) => commands::words(path, top, &config, output_mode),
        Some(Command::TicTacToe { mode }) => commands::tictactoe(mode),
        Some(Command::Config { action }) => commands::config(action, &config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": toolbelt::VERSION
                    })
                );
            } else {
                println!("toolbelt v{}", toolbelt::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": toolbelt::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("toolbelt v{}", toolbelt::VERSION);
                println!("\nRun 'toolbelt --help' for usage");
            }
            Ok(())
        },
    }
}
