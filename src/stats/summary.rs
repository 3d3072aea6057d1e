use std::collections::HashMap;

use super::{
    limits::COMMON_SKILL_COUNT,
    models::{MatchRecordModel, MatchSummary},
    STAT_CATEGORIES,
};

/// Reduces a player's recent matches to average stats and favourite skills.
///
/// Callers pass the window they want summarized (most recent first); an
/// empty window yields zeroed averages and no skills.
pub fn summarize(matches: &[MatchRecordModel]) -> MatchSummary {
    MatchSummary {
        average_stats: average_stats(matches),
        common_skills: common_skills(matches, COMMON_SKILL_COUNT),
    }
}

pub fn average_stats(matches: &[MatchRecordModel]) -> [f64; STAT_CATEGORIES] {
    let mut averages = [0.0; STAT_CATEGORIES];
    if matches.is_empty() {
        return averages;
    }

    // summed as f64 so extreme stored points cannot overflow
    for record in matches {
        for (total, points) in averages.iter_mut().zip(record.stat_points.iter()) {
            *total += *points as f64;
        }
    }

    let count = matches.len() as f64;
    for average in averages.iter_mut() {
        *average /= count;
    }
    averages
}

/// Most frequently chosen skills, highest count first.
///
/// Every occurrence counts, including repeats within one match. Equal counts
/// keep the order in which the skills were first seen.
pub fn common_skills(matches: &[MatchRecordModel], top: usize) -> Vec<i64> {
    let mut first_seen: HashMap<i64, usize> = HashMap::new();
    let mut counts: Vec<(i64, usize)> = Vec::new();

    for skill in matches.iter().flat_map(|record| record.chosen_skills.iter()) {
        match first_seen.get(skill) {
            Some(&index) => counts[index].1 += 1,
            None => {
                first_seen.insert(*skill, counts.len());
                counts.push((*skill, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(top).map(|(skill, _)| skill).collect()
}
