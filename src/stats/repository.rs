use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{
    codec::{decode_list, decode_stat_line, encode_list},
    models::{MatchOutcome, MatchRecordModel, PlayerModel},
    StatsError,
};

/// Storage operations the stats service depends on
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Applies a whole batch atomically: each outcome upserts its player's totals
    /// and appends one match record. Returns the new match ids in batch order.
    async fn record_batch(&self, outcomes: &[MatchOutcome]) -> Result<Vec<i64>, StatsError>;

    async fn get_player(&self, name: &str) -> Result<Option<PlayerModel>, StatsError>;

    /// Highest score first; equal scores ordered by name
    async fn top_players_by_score(&self, limit: usize) -> Result<Vec<PlayerModel>, StatsError>;

    /// Most recently recorded first
    async fn recent_matches(
        &self,
        player_name: &str,
        limit: usize,
    ) -> Result<Vec<MatchRecordModel>, StatsError>;

    /// Releases storage resources on shutdown
    async fn close(&self) {}
}

#[derive(Debug, Default)]
struct StatsTables {
    players: HashMap<String, PlayerModel>,
    matches: Vec<MatchRecordModel>,
    last_match_id: i64,
}

/// In-memory implementation of StatsRepository for development and testing
///
/// A batch is applied under a single write lock, so concurrent readers never
/// observe half of a submission.
#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    tables: Arc<RwLock<StatsTables>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn player_count(&self) -> usize {
        self.tables.read().await.players.len()
    }

    pub async fn match_count(&self) -> usize {
        self.tables.read().await.matches.len()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    #[instrument(skip(self, outcomes), fields(entries = outcomes.len()))]
    async fn record_batch(&self, outcomes: &[MatchOutcome]) -> Result<Vec<i64>, StatsError> {
        let mut tables = self.tables.write().await;
        let mut match_ids = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            tables
                .players
                .entry(outcome.player_name.clone())
                .or_insert_with(|| PlayerModel::new(outcome.player_name.clone()))
                .apply(outcome.totals_delta());

            tables.last_match_id += 1;
            let id = tables.last_match_id;
            tables.matches.push(MatchRecordModel {
                id,
                player_name: outcome.player_name.clone(),
                is_win: outcome.is_win,
                stat_points: outcome.stat_points,
                chosen_skills: outcome.chosen_skills.clone(),
                recorded_at: Utc::now(),
            });
            match_ids.push(id);
        }

        debug!(recorded = match_ids.len(), "Batch recorded in memory");
        Ok(match_ids)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, name: &str) -> Result<Option<PlayerModel>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables.players.get(name).cloned())
    }

    #[instrument(skip(self))]
    async fn top_players_by_score(&self, limit: usize) -> Result<Vec<PlayerModel>, StatsError> {
        let tables = self.tables.read().await;
        let mut players: Vec<PlayerModel> = tables.players.values().cloned().collect();
        players.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        players.truncate(limit);
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn recent_matches(
        &self,
        player_name: &str,
        limit: usize,
    ) -> Result<Vec<MatchRecordModel>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .iter()
            .rev()
            .filter(|record| record.player_name == player_name)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Row shape of the game table before list columns are decoded
#[derive(Debug, FromRow)]
struct GameRow {
    id: i64,
    player_name: String,
    is_win: bool,
    stat_points: String,
    chosen_skills: String,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<GameRow> for MatchRecordModel {
    type Error = StatsError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            player_name: row.player_name,
            is_win: row.is_win,
            stat_points: decode_stat_line(&row.stat_points)?,
            chosen_skills: decode_list(&row.chosen_skills)?,
            recorded_at: row.recorded_at,
        })
    }
}

/// SQLite implementation of stats repository
pub struct SqliteStatsRepository {
    pool: SqlitePool,
}

impl SqliteStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage_error(context: &'static str) -> impl Fn(sqlx::Error) -> StatsError {
    move |e| {
        warn!(error = %e, "{}", context);
        StatsError::from(e)
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    #[instrument(skip(self, outcomes), fields(entries = outcomes.len()))]
    async fn record_batch(&self, outcomes: &[MatchOutcome]) -> Result<Vec<i64>, StatsError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin batch transaction"))?;
        let mut match_ids = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            let delta = outcome.totals_delta();

            sqlx::query(
                "INSERT INTO player (name, wins, losses, score) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(name) DO UPDATE SET \
                 wins = wins + excluded.wins, \
                 losses = losses + excluded.losses, \
                 score = score + excluded.score",
            )
            .bind(&outcome.player_name)
            .bind(delta.wins)
            .bind(delta.losses)
            .bind(delta.score)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("Failed to upsert player totals"))?;

            let result = sqlx::query(
                "INSERT INTO game (player_name, is_win, stat_points, chosen_skills, recorded_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&outcome.player_name)
            .bind(outcome.is_win)
            .bind(encode_list(&outcome.stat_points))
            .bind(encode_list(&outcome.chosen_skills))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(storage_error("Failed to append match record"))?;

            match_ids.push(result.last_insert_rowid());
        }

        // dropping an uncommitted transaction rolls it back
        tx.commit()
            .await
            .map_err(storage_error("Failed to commit batch transaction"))?;

        debug!(recorded = match_ids.len(), "Batch committed to database");
        Ok(match_ids)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, name: &str) -> Result<Option<PlayerModel>, StatsError> {
        let player = sqlx::query_as::<_, PlayerModel>(
            "SELECT name, wins, losses, score FROM player WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to fetch player"))?;

        match &player {
            Some(_) => debug!(player_name = %name, "Player found in database"),
            None => debug!(player_name = %name, "Player not found in database"),
        }

        Ok(player)
    }

    #[instrument(skip(self))]
    async fn top_players_by_score(&self, limit: usize) -> Result<Vec<PlayerModel>, StatsError> {
        sqlx::query_as::<_, PlayerModel>(
            "SELECT name, wins, losses, score FROM player \
             ORDER BY score DESC, name ASC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to rank players"))
    }

    #[instrument(skip(self))]
    async fn recent_matches(
        &self,
        player_name: &str,
        limit: usize,
    ) -> Result<Vec<MatchRecordModel>, StatsError> {
        let rows = sqlx::query_as::<_, GameRow>(
            "SELECT id, player_name, is_win, stat_points, chosen_skills, recorded_at FROM game \
             WHERE player_name = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .bind(player_name)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to fetch recent matches"))?;

        rows.into_iter().map(MatchRecordModel::try_from).collect()
    }

    async fn close(&self) {
        debug!("Closing database pool");
        self.pool.close().await;
    }
}
