use scorekeeper::aggregation::{
    box_score, career_aggregate, game_detail, group_games_by_date, leaderboard, BoxScore,
};
use scorekeeper::config::{Config, ConfigError};
use scorekeeper::logging::{self, LoggingError};
use scorekeeper::report::{write_json, write_json_file, ReportError};
use scorekeeper::session::{GameScript, ScriptDefaults, SessionError};
use scorekeeper::storage::{
    build_game_update, GameId, GameStore, HistoricalPlayerStat, JsonFileStore, StorageError,
};

use chrono::Local;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to read '{path}': {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    InputFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Track live basketball stats and browse stored games")]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "SCOREKEEPER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the stored games
    #[arg(long, env = "SCOREKEEPER_STORE")]
    store: Option<PathBuf>,

    /// Threads used to read stored games
    #[arg(long)]
    threads: Option<usize>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded game script and print its box score
    Play {
        /// JSON script with roster, team names and events
        script: PathBuf,

        /// Save the game to the store once replayed
        #[arg(long)]
        save: bool,
    },

    /// List stored games grouped by date
    History,

    /// Show one stored game with player rows and team totals
    Game {
        id: GameId,
    },

    /// Replace player rows of a stored game and set the away score
    Edit {
        id: GameId,

        /// JSON array of edited player rows
        players: PathBuf,

        #[arg(long)]
        away_score: u32,
    },

    /// Delete a stored game and its player rows
    Delete {
        id: GameId,
    },

    /// Career leaderboard by total points
    Leaders,

    /// Player names of the most recent game
    Roster,
}

#[derive(Serialize)]
struct PlayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    game_id: Option<GameId>,
    #[serde(flatten)]
    box_score: BoxScore,
}

#[derive(Serialize)]
struct DeleteReport {
    deleted: GameId,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path).map_err(|source| AppError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| AppError::InputFormat {
        path: path.to_path_buf(),
        source,
    })
}

fn emit<T: Serialize>(output: Option<&Path>, report: &T) -> Result<(), AppError> {
    match output {
        Some(path) => write_json_file(path, report)?,
        None => write_json(io::stdout().lock(), report)?,
    }
    Ok(())
}

fn open_store(config: &Config) -> Result<JsonFileStore, AppError> {
    Ok(JsonFileStore::open(&config.store.path, config.store.threads)?)
}

fn play(config: &Config, script: &Path, save: bool, output: Option<&Path>) -> Result<(), AppError> {
    let script: GameScript = read_json(script)?;
    let defaults = ScriptDefaults {
        date: Local::now().date_naive(),
        home_team_name: config.defaults.home_team_name.clone(),
        away_team_name: config.defaults.away_team_name.clone(),
    };

    let mut session = script.replay(&defaults)?;
    let live = session.live()?;
    let box_score = box_score(&live.ledger().snapshot(), live.on_court());

    let game_id = if save {
        let mut store = open_store(config)?;
        Some(session.finalize(&mut store)?)
    } else {
        None
    };

    emit(output, &PlayReport { game_id, box_score })
}

fn edit(
    config: &Config,
    game_id: GameId,
    players: &Path,
    away_score: u32,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let mut store = open_store(config)?;
    let existing = store.load_game(game_id)?;
    let edited: Vec<HistoricalPlayerStat> = read_json(players)?;

    let update = build_game_update(&existing, edited, away_score)?;
    store.update_game(&update)?;
    info!(game_id, rows = update.players.len(), "game edited");

    emit(output, &game_detail(store.load_game(game_id)?))
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.store, cli.threads)?;
    logging::init(&config.logging)?;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Play { script, save } => play(&config, &script, save, output)?,
        Commands::History => {
            let store = open_store(&config)?;
            emit(output, &group_games_by_date(&store.list_games()?))?;
        }
        Commands::Game { id } => {
            let store = open_store(&config)?;
            emit(output, &game_detail(store.load_game(id)?))?;
        }
        Commands::Edit {
            id,
            players,
            away_score,
        } => edit(&config, id, &players, away_score, output)?,
        Commands::Delete { id } => {
            let mut store = open_store(&config)?;
            store.delete_game(id)?;
            emit(output, &DeleteReport { deleted: id })?;
        }
        Commands::Leaders => {
            let store = open_store(&config)?;
            let careers = career_aggregate(&store.all_player_stats()?);
            emit(output, &leaderboard(careers))?;
        }
        Commands::Roster => {
            let store = open_store(&config)?;
            emit(output, &store.last_game_player_names()?)?;
        }
    }

    Ok(())
}
