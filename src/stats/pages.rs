//! HTML pages for the human-readable player lookup.

use super::{codec::encode_list, models::PlayerDetails};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wraps `content` in the lookup page layout
pub fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Player lookup</title>
</head>
<body>
<form method="post" action="/player_info">
<label for="player_name">Player name</label>
<input type="text" id="player_name" name="player_name" required>
<button type="submit">Search</button>
</form>
<div id="content">{}</div>
</body>
</html>
"#,
        content
    )
}

pub fn player_details(details: &PlayerDetails) -> String {
    let player = &details.player;
    let mut content = format!(
        "<h1>{}</h1>\n<p>Wins: {}</p>\n<p>Losses: {}</p>\n<p>Score: {}</p>\n",
        escape(&player.name),
        player.wins,
        player.losses,
        player.score
    );

    if details.recent_matches.is_empty() {
        content.push_str("<p>No games recorded.</p>\n");
    } else {
        content.push_str("<h2>Recent games</h2>\n<ul>\n");
        for record in &details.recent_matches {
            content.push_str(&format!(
                "<li>Game {}: {}, stat points {}, skills {}</li>\n",
                record.id,
                if record.is_win { "win" } else { "loss" },
                encode_list(&record.stat_points),
                encode_list(&record.chosen_skills),
            ));
        }
        content.push_str("</ul>\n");
    }

    layout(&content)
}

pub fn player_not_found(name: &str) -> String {
    layout(&format!("<p>Player {} not found.</p>", escape(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::models::{MatchRecordModel, PlayerModel};
    use chrono::Utc;

    #[test]
    fn escapes_markup_in_names() {
        let html = player_not_found("<script>alert('x')</script>");
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn lists_recent_games() {
        let details = PlayerDetails {
            player: PlayerModel {
                name: "Player1".to_string(),
                wins: 1,
                losses: 0,
                score: 2,
            },
            recent_matches: vec![MatchRecordModel {
                id: 7,
                player_name: "Player1".to_string(),
                is_win: true,
                stat_points: [8, 6, 6],
                chosen_skills: vec![1, 2],
                recorded_at: Utc::now(),
            }],
        };

        let html = player_details(&details);
        assert!(html.contains("<h1>Player1</h1>"));
        assert!(html.contains("<p>Score: 2</p>"));
        assert!(html.contains("Game 7: win, stat points 8,6,6, skills 1,2"));
    }

    #[test]
    fn notes_missing_history() {
        let details = PlayerDetails {
            player: PlayerModel::new("Quiet"),
            recent_matches: vec![],
        };
        assert!(player_details(&details).contains("No games recorded."));
    }
}
