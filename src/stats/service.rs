use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    limits::{LEADERBOARD_SIZE, RECENT_MATCH_WINDOW},
    models::{BatchReceipt, MatchOutcome, PlayerDetails},
    repository::StatsRepository,
    summary::summarize,
    types::{GameSubmission, LeaderboardEntry},
    StatsError,
};

/// Service for recording match results and building leaderboard views
pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Records a batch of match results.
    ///
    /// Every entry is validated before anything is written; one bad entry
    /// rejects the whole batch. Submitting the same batch twice counts it twice.
    #[instrument(skip(self, submissions), fields(entries = submissions.len()))]
    pub async fn submit_games(
        &self,
        submissions: Vec<GameSubmission>,
    ) -> Result<BatchReceipt, StatsError> {
        let outcomes = submissions
            .into_iter()
            .enumerate()
            .map(|(index, submission)| submission.into_outcome(index))
            .collect::<Result<Vec<MatchOutcome>, StatsError>>()
            .map_err(|err| {
                warn!(error = %err, "Rejected game submission batch");
                err
            })?;

        if outcomes.is_empty() {
            debug!("Empty submission batch, nothing to record");
            return Ok(BatchReceipt::default());
        }

        let match_ids = self.repository.record_batch(&outcomes).await?;

        info!(recorded = match_ids.len(), "Game results recorded");
        Ok(BatchReceipt { match_ids })
    }

    /// Top players by score, each annotated with a summary of their latest matches
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StatsError> {
        let players = self
            .repository
            .top_players_by_score(LEADERBOARD_SIZE)
            .await?;

        let mut entries = Vec::with_capacity(players.len());
        for player in players {
            let recent = self
                .repository
                .recent_matches(&player.name, RECENT_MATCH_WINDOW)
                .await?;
            let summary = summarize(&recent);
            debug!(player_name = %player.name, matches = recent.len(), "Summarized recent matches");
            entries.push(LeaderboardEntry::new(player, summary));
        }

        info!(entry_count = entries.len(), "Leaderboard assembled");
        Ok(entries)
    }

    /// Totals and latest raw matches for one player
    #[instrument(skip(self))]
    pub async fn player_details(&self, name: &str) -> Result<PlayerDetails, StatsError> {
        let player = self
            .repository
            .get_player(name)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("player {:?}", name)))?;

        let recent_matches = self
            .repository
            .recent_matches(name, RECENT_MATCH_WINDOW)
            .await?;

        Ok(PlayerDetails {
            player,
            recent_matches,
        })
    }
}
