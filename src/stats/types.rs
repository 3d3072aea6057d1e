use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    models::{MatchOutcome, MatchRecordModel, MatchSummary, PlayerDetails, PlayerModel, StatLine},
    StatsError, STAT_CATEGORIES,
};

/// One entry of a POST /submit_game body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSubmission {
    pub player_name: String,
    pub is_win: bool,
    pub stat_points: Vec<i64>,
    pub chosen_skills: Vec<i64>,
}

impl GameSubmission {
    /// Validates the entry at `index` of a batch and converts it into a recordable outcome
    pub fn into_outcome(self, index: usize) -> Result<MatchOutcome, StatsError> {
        if self.player_name.trim().is_empty() {
            return Err(StatsError::Validation(format!(
                "entry {}: player_name must not be empty",
                index
            )));
        }

        let arity = self.stat_points.len();
        let stat_points: StatLine = self.stat_points.try_into().map_err(|_| {
            StatsError::Validation(format!(
                "entry {}: stat_points must have exactly {} values, got {}",
                index, STAT_CATEGORIES, arity
            ))
        })?;

        if self.chosen_skills.is_empty() {
            return Err(StatsError::Validation(format!(
                "entry {}: chosen_skills must not be empty",
                index
            )));
        }

        Ok(MatchOutcome {
            player_name: self.player_name,
            is_win: self.is_win,
            stat_points,
            chosen_skills: self.chosen_skills,
        })
    }
}

/// Response body for a successful submission
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmitGameResponse {
    pub message: String,
    pub recorded: usize,
    pub match_ids: Vec<i64>,
}

/// One ranked row of GET /player_stats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i64,
    pub wins: i64,
    pub losses: i64,
    pub average_stats: [f64; STAT_CATEGORIES],
    pub common_skills: Vec<i64>,
}

impl LeaderboardEntry {
    pub fn new(player: PlayerModel, summary: MatchSummary) -> Self {
        Self {
            name: player.name,
            score: player.score,
            wins: player.wins,
            losses: player.losses,
            average_stats: summary.average_stats,
            common_skills: summary.common_skills,
        }
    }
}

/// Form body of POST /player_info
#[derive(Debug, Deserialize)]
pub struct PlayerLookupForm {
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchEntryResponse {
    pub id: i64,
    pub is_win: bool,
    pub stat_points: StatLine,
    pub chosen_skills: Vec<i64>,
    pub recorded_at: DateTime<Utc>,
}

impl From<MatchRecordModel> for MatchEntryResponse {
    fn from(record: MatchRecordModel) -> Self {
        Self {
            id: record.id,
            is_win: record.is_win,
            stat_points: record.stat_points,
            chosen_skills: record.chosen_skills,
            recorded_at: record.recorded_at,
        }
    }
}

/// Response body for GET /players/:name
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerInfoResponse {
    pub name: String,
    pub wins: i64,
    pub losses: i64,
    pub score: i64,
    pub recent_matches: Vec<MatchEntryResponse>,
}

impl From<PlayerDetails> for PlayerInfoResponse {
    fn from(details: PlayerDetails) -> Self {
        Self {
            name: details.player.name,
            wins: details.player.wins,
            losses: details.player.losses,
            score: details.player.score,
            recent_matches: details
                .recent_matches
                .into_iter()
                .map(MatchEntryResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn submission(name: &str, stat_points: Vec<i64>, chosen_skills: Vec<i64>) -> GameSubmission {
        GameSubmission {
            player_name: name.to_string(),
            is_win: true,
            stat_points,
            chosen_skills,
        }
    }

    #[test]
    fn deserializes_client_payload() {
        let body = r#"[
            {"player_name": "Player1", "is_win": true, "stat_points": [8, 6, 6], "chosen_skills": [1, 2]},
            {"player_name": "Player2", "is_win": false, "stat_points": [5, 7, 8], "chosen_skills": [3, 4]}
        ]"#;

        let entries: Vec<GameSubmission> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].player_name, "Player2");
        assert!(!entries[1].is_win);
    }

    #[test]
    fn rejects_non_boolean_win_flag() {
        let body = r#"[{"player_name": "P", "is_win": "yes", "stat_points": [1, 1, 1], "chosen_skills": [1]}]"#;
        assert!(serde_json::from_str::<Vec<GameSubmission>>(body).is_err());
    }

    #[test]
    fn valid_entry_becomes_outcome() {
        let outcome = submission("Player1", vec![8, 6, 6], vec![1, 2])
            .into_outcome(0)
            .unwrap();
        assert_eq!(outcome.player_name, "Player1");
        assert_eq!(outcome.stat_points, [8, 6, 6]);
        assert_eq!(outcome.chosen_skills, vec![1, 2]);
    }

    #[rstest]
    #[case(submission("", vec![1, 2, 3], vec![1]), "player_name")]
    #[case(submission("   ", vec![1, 2, 3], vec![1]), "player_name")]
    #[case(submission("P", vec![1, 2], vec![1]), "stat_points")]
    #[case(submission("P", vec![1, 2, 3, 4], vec![1]), "stat_points")]
    #[case(submission("P", vec![1, 2, 3], vec![]), "chosen_skills")]
    fn invalid_entries_name_the_field(#[case] entry: GameSubmission, #[case] field: &str) {
        match entry.into_outcome(3) {
            Err(StatsError::Validation(msg)) => {
                assert!(msg.starts_with("entry 3"), "{}", msg);
                assert!(msg.contains(field), "{}", msg);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn player_names_are_case_sensitive_and_kept_verbatim() {
        let outcome = submission("PlayerOne", vec![0, 0, 0], vec![0])
            .into_outcome(0)
            .unwrap();
        assert_eq!(outcome.player_name, "PlayerOne");
    }
}
