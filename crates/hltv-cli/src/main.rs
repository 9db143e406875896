use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use hltv::envelope::Envelope;
use hltv::utils::ListQuery;
use hltv::{DEFAULT_RANKING_LIMIT, HltvClient, format};

#[derive(Parser)]
#[command(name = "hltv")]
#[command(about = "An hltv.org match, ranking and player scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "warn",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming matches
    Matches {
        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Show the world team ranking
    Rankings {
        #[arg(
            long,
            help = "Maximum number of ranked teams to return",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        limit: Option<u16>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// List recent match results
    Results {
        #[arg(long, help = "Result window in days")]
        days: Option<u32>,

        #[arg(long, help = "Minimum event star rating (0-5)")]
        stars: Option<u32>,

        #[arg(
            long,
            help = "Maximum number of results to return",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        limit: Option<u16>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// List upcoming Major and international LAN events
    Events {
        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Look up a player profile by nickname
    Player {
        #[arg(help = "Player nickname to search for")]
        name: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Look up a team profile by name
    Team {
        #[arg(help = "Team name to search for")]
        name: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn render<T: serde::Serialize>(
    envelope: &Envelope<T>,
    format: &OutputFormat,
    text: impl Fn(&Envelope<T>) -> String,
) {
    match format {
        OutputFormat::Json => serialize_json(envelope),
        OutputFormat::Text => println!("{}", text(envelope).trim_end()),
    }
}

fn validate_query(query: ListQuery) -> ListQuery {
    query.validate().unwrap_or_else(|e| {
        log::error!("Invalid args: {}", e);
        process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let client = HltvClient::new().unwrap_or_else(|e| {
        log::error!("Error creating client: {}", e);
        process::exit(1);
    });

    match cli.command {
        Commands::Matches { format } => {
            let envelope = Envelope::of_list(client.fetch_matches().await, "upcoming matches");
            render(&envelope, &format, format::matches_message);
        }

        Commands::Rankings { limit, format } => {
            let query = validate_query(ListQuery {
                limit: limit.map(usize::from),
                ..Default::default()
            });
            let limit = query.limit.unwrap_or(DEFAULT_RANKING_LIMIT);

            let envelope = Envelope::of_list(client.fetch_rankings(limit).await, "ranked teams");
            render(&envelope, &format, format::rankings_message);
        }

        Commands::Results {
            days,
            stars,
            limit,
            format,
        } => {
            let query = validate_query(ListQuery {
                limit: limit.map(usize::from),
                days,
                stars,
            });

            let envelope = Envelope::of_list(
                client.fetch_results().await.map(|r| query.apply(r)),
                "match results",
            );
            render(&envelope, &format, format::results_message);
        }

        Commands::Events { format } => {
            let envelope = Envelope::of_list(client.fetch_events().await, "events");
            render(&envelope, &format, format::events_message);
        }

        Commands::Player { name, format } => {
            let envelope = Envelope::of_entity(client.fetch_player(&name).await, |p| {
                format!("Found player {}", p.name)
            });
            render(&envelope, &format, format::player_message);
        }

        Commands::Team { name, format } => {
            let envelope = Envelope::of_entity(client.fetch_team(&name).await, |t| {
                format!("Found team {}", t.name)
            });
            render(&envelope, &format, format::team_message);
        }
    }
}
