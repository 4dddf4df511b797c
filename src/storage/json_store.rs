use crate::storage::game_store::GameStore;
use crate::storage::payload::{GamePayload, GameUpdate};
use crate::storage::records::{
    GameId, HistoricalGameRecord, HistoricalPlayerStat, PlayerRecordId, StoredGame,
};
use crate::storage::storage_error::StorageError;

use chrono::Utc;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use std::fs::{self, read_dir, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const GAME_FILE_PREFIX: &str = "game-";
const GAME_FILE_EXTENSION: &str = "json";
const ID_COUNTERS_FILE: &str = "next-ids.json";

/// Next ids to hand out. Ids of deleted games and rows are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct IdCounters {
    next_game_id: GameId,
    next_player_record_id: PlayerRecordId,
}

/// Game store keeping one pretty-printed JSON file per game in a directory.
///
/// Each file holds the game row together with its player rows, so deleting
/// the file removes both. Bulk reads load the files on a rayon pool of
/// `num_threads` workers.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    num_threads: usize,
}

impl JsonFileStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the game files.
    /// * `num_threads` - Number of threads used when reading every game file.
    pub fn open(dir: impl Into<PathBuf>, num_threads: usize) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        debug!(dir = %dir.display(), num_threads, "json store opened");
        Ok(Self { dir, num_threads })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn game_path(&self, game_id: GameId) -> PathBuf {
        self.dir
            .join(format!("{GAME_FILE_PREFIX}{game_id}.{GAME_FILE_EXTENSION}"))
    }

    /// Collects the game files in the store directory, ordered by game id.
    fn collect_game_files(&self) -> Result<Vec<(GameId, PathBuf)>, StorageError> {
        let entries = read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut files: Vec<(GameId, PathBuf)> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter_map(|path| game_id_from_path(&path).map(|id| (id, path)))
            .collect();
        files.sort_by_key(|(id, _)| *id);
        Ok(files)
    }

    /// Reads every game file in parallel on a pool of `num_threads` workers.
    ///
    /// # Returns
    ///
    /// One result per game file, ordered by game id.
    fn read_all(&self) -> Result<Vec<Result<StoredGame, StorageError>>, StorageError> {
        let files = self.collect_game_files()?;
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()?;

        Ok(thread_pool.install(|| {
            files
                .par_iter()
                .map(|(_, path)| read_stored_game(path))
                .collect()
        }))
    }

    /// Reads every game file, logging and skipping the ones that cannot be
    /// read or parsed so one bad file does not hide the rest of the history.
    fn load_all(&self) -> Result<Vec<StoredGame>, StorageError> {
        let games = self
            .read_all()?
            .into_iter()
            .filter_map(|result| match result {
                Ok(game) => Some(game),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable game file");
                    None
                }
            })
            .collect();
        Ok(games)
    }

    fn id_counters_path(&self) -> PathBuf {
        self.dir.join(ID_COUNTERS_FILE)
    }

    /// Loads the persisted id high-water marks.
    ///
    /// A store without a counters file gets them rebuilt from its game files.
    /// Every game file has to be readable for that, since a skipped file
    /// could hold the highest ids. The game id mark is never lower than the
    /// newest game file, whatever the counters file says.
    fn id_counters(&self) -> Result<IdCounters, StorageError> {
        let path = self.id_counters_path();
        let mut counters: IdCounters = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => self.rebuild_id_counters()?,
            Err(e) => return Err(StorageError::io(path, e)),
        };

        if let Some((last_id, _)) = self.collect_game_files()?.last() {
            counters.next_game_id = counters.next_game_id.max(last_id + 1);
        }
        Ok(counters)
    }

    fn rebuild_id_counters(&self) -> Result<IdCounters, StorageError> {
        let games = self
            .read_all()?
            .into_iter()
            .collect::<Result<Vec<StoredGame>, StorageError>>()?;

        let max_game = games.iter().map(|stored| stored.game.id).max();
        let max_record = games
            .iter()
            .flat_map(|stored| stored.players.iter().map(|row| row.id))
            .max();
        debug!(?max_game, ?max_record, "id counters rebuilt from game files");

        Ok(IdCounters {
            next_game_id: max_game.map_or(1, |id| id + 1),
            next_player_record_id: max_record.map_or(1, |id| id + 1),
        })
    }

    fn read_game(&self, game_id: GameId) -> Result<StoredGame, StorageError> {
        let path = self.game_path(game_id);
        match read_stored_game(&path) {
            Err(StorageError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Err(StorageError::GameNotFound(game_id))
            }
            other => other,
        }
    }
}

impl GameStore for JsonFileStore {
    fn insert_game(&mut self, payload: &GamePayload) -> Result<GameId, StorageError> {
        let counters = self.id_counters()?;
        let game_id = counters.next_game_id;
        let first_record_id = counters.next_player_record_id;

        let game = HistoricalGameRecord {
            id: game_id,
            created_at: Utc::now(),
            date: payload.game.date,
            team_a_name: payload.game.team_a_name.clone(),
            team_b_name: payload.game.team_b_name.clone(),
            team_a_score: payload.game.team_a_score,
            team_b_score: payload.game.team_b_score,
        };
        let players = payload
            .players
            .iter()
            .zip(first_record_id..)
            .map(|(row, id)| HistoricalPlayerStat {
                id,
                game_id,
                player_name: row.player_name.clone(),
                team: row.team.clone(),
                counters: row.counters,
                total_points: row.total_points,
            })
            .collect();

        // Reserve the ids before the game file exists.
        let reserved = IdCounters {
            next_game_id: game_id + 1,
            next_player_record_id: first_record_id + payload.players.len() as PlayerRecordId,
        };
        write_json_atomic(&self.id_counters_path(), &reserved)?;

        write_json_atomic(&self.game_path(game_id), &StoredGame { game, players })?;
        info!(game_id, players = payload.players.len(), "game inserted");
        Ok(game_id)
    }

    fn update_game(&mut self, update: &GameUpdate) -> Result<(), StorageError> {
        let mut stored = self.read_game(update.game_id)?;

        for edited in &update.players {
            let row = stored
                .players
                .iter_mut()
                .find(|row| row.id == edited.id)
                .ok_or(StorageError::PlayerRecordNotFound {
                    game: update.game_id,
                    record: edited.id,
                })?;
            *row = edited.clone();
        }

        stored.game.date = update.game.date;
        stored.game.team_a_name = update.game.team_a_name.clone();
        stored.game.team_b_name = update.game.team_b_name.clone();
        stored.game.team_a_score = stored.players.iter().map(|row| row.total_points).sum();
        stored.game.team_b_score = update.game.team_b_score;

        write_json_atomic(&self.game_path(update.game_id), &stored)?;
        info!(game_id = update.game_id, rows = update.players.len(), "game updated");
        Ok(())
    }

    fn delete_game(&mut self, game_id: GameId) -> Result<(), StorageError> {
        let path = self.game_path(game_id);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(game_id, "game deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::GameNotFound(game_id)),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn list_games(&self) -> Result<Vec<HistoricalGameRecord>, StorageError> {
        let mut games: Vec<HistoricalGameRecord> =
            self.load_all()?.into_iter().map(|stored| stored.game).collect();
        games.sort_by(|g1, g2| {
            g2.date
                .cmp(&g1.date)
                .then_with(|| g2.created_at.cmp(&g1.created_at))
        });
        Ok(games)
    }

    fn load_game(&self, game_id: GameId) -> Result<StoredGame, StorageError> {
        let mut stored = self.read_game(game_id)?;
        stored
            .players
            .sort_by(|p1, p2| p2.total_points.cmp(&p1.total_points));
        Ok(stored)
    }

    fn all_player_stats(&self) -> Result<Vec<HistoricalPlayerStat>, StorageError> {
        Ok(self
            .load_all()?
            .into_iter()
            .flat_map(|stored| stored.players)
            .collect())
    }
}

/// Extracts the game id from a `game-<id>.json` file name.
fn game_id_from_path(path: &Path) -> Option<GameId> {
    if path.extension().map_or(true, |ext| ext != GAME_FILE_EXTENSION) {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix(GAME_FILE_PREFIX)?
        .parse()
        .ok()
}

fn read_stored_game(path: &Path) -> Result<StoredGame, StorageError> {
    let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Serializes `value` and writes it next to its final path before renaming it
/// into place, so readers never see a half-written file.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json_output = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");

    let file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json_output.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))
}
