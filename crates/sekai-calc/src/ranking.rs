//! Event ranking: resource planning, border prediction and curve analysis.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use models::{EventAnalysis, EventScoreCurvePoint, EventScoreSample, PeakSpeed, SongData};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::power::{LARGE_DRINK_STAMINA, SMALL_DRINK_STAMINA};
use crate::score_control::{div_ceil_positive, BoostMultiplier};

/// Ranks tracked by curve analysis.
pub const TRACKED_RANKS: [u32; 6] = [1, 10, 100, 1000, 5000, 10000];
/// Natural regeneration per hour (one every five minutes).
pub const NATURAL_STAMINA_PER_HOUR: f64 = 12.0;
pub const STAMINA_PER_CRYSTAL_UNIT: i64 = 10;
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPlanInput {
    pub target_score: i64,
    pub current_score: i64,
    pub remaining_hours: f64,
    pub score_per_game: i64,
    pub game_minutes: f64,
    pub boost: BoostMultiplier,
    pub current_stamina: i64,
    pub max_stamina: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkCount {
    pub small: i64,
    pub large: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEfficiency {
    pub score_per_game: i64,
    pub score_per_hour: f64,
    pub games_per_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPlan {
    pub target_score: i64,
    pub current_score: i64,
    pub score_gap: i64,
    pub remaining_hours: f64,
    pub required_games: i64,
    pub required_stamina: i64,
    pub required_drinks: DrinkCount,
    pub required_crystals: i64,
    pub hours_per_day: f64,
    pub efficiency: PlanEfficiency,
}

pub fn calculate_ranking_plan(input: &RankingPlanInput) -> RankingPlan {
    let score_gap = input.target_score - input.current_score;
    let boosted_score_per_game = input.score_per_game * input.boost.factor();
    let required_games = div_ceil_positive(score_gap, boosted_score_per_game);

    let required_stamina = required_games * input.boost.stamina_cost() - input.current_stamina;
    let natural_recovery = (input.remaining_hours * NATURAL_STAMINA_PER_HOUR).floor() as i64;
    let extra_stamina = (required_stamina - natural_recovery).max(0);

    let large = extra_stamina / LARGE_DRINK_STAMINA;
    let small = div_ceil_positive(extra_stamina % LARGE_DRINK_STAMINA, SMALL_DRINK_STAMINA);
    let required_crystals = div_ceil_positive(extra_stamina, STAMINA_PER_CRYSTAL_UNIT);

    let games_per_hour = if input.game_minutes > 0.0 {
        60.0 / input.game_minutes
    } else {
        0.0
    };
    let score_per_hour = games_per_hour * boosted_score_per_game as f64;
    let days = (input.remaining_hours / 24.0).ceil();
    let hours_per_day = if games_per_hour > 0.0 && days > 0.0 {
        required_games as f64 / games_per_hour / days
    } else {
        0.0
    };

    RankingPlan {
        target_score: input.target_score,
        current_score: input.current_score,
        score_gap,
        remaining_hours: input.remaining_hours,
        required_games,
        required_stamina: required_stamina.max(0),
        required_drinks: DrinkCount { small, large },
        required_crystals,
        hours_per_day,
        efficiency: PlanEfficiency {
            score_per_game: boosted_score_per_game,
            score_per_hour,
            games_per_hour,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Accelerating,
    Steady,
    /// Never produced by [`predict_border`]: its speed comparison only
    /// distinguishes faster-than-average from everything else.
    Decelerating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderPrediction {
    pub rank: u32,
    pub current_score: i64,
    pub predicted_final: i64,
    pub confidence: f64,
    pub trend: Trend,
}

/// Average of final/mid-event score ratios for `rank`, divided over all
/// supplied events (events missing either score count as zero).
fn historical_final_ratio(rank: u32, total_hours: f64, history: &[EventAnalysis]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let midpoint = total_hours / 2.0;

    let sum: f64 = history
        .iter()
        .filter_map(|event| {
            let mid = event
                .score_curve
                .iter()
                .find(|p| p.hours >= midpoint)?
                .scores
                .get(&rank)
                .copied()
                .filter(|s| *s != 0)?;
            let fin = event.final_scores.get(&rank).copied().filter(|s| *s != 0)?;
            Some(fin as f64 / mid as f64)
        })
        .sum();

    sum / history.len() as f64
}

/// Linear extrapolation of a border score, replaced by the historical
/// final/mid ratio once half the event has elapsed.
pub fn predict_border(
    rank: u32,
    current_score: i64,
    elapsed_hours: f64,
    total_hours: f64,
    history: &[EventAnalysis],
) -> BorderPrediction {
    let remaining_hours = total_hours - elapsed_hours;
    let current_speed = if elapsed_hours > 0.0 {
        current_score as f64 / elapsed_hours
    } else {
        0.0
    };

    let mut predicted = current_score as f64 + current_speed * remaining_hours;

    let ratio = historical_final_ratio(rank, total_hours, history);
    if ratio > 0.0 && elapsed_hours >= total_hours / 2.0 {
        predicted = current_score as f64 * ratio;
    }

    let trend = if total_hours > 0.0 && current_speed > predicted / total_hours {
        Trend::Accelerating
    } else {
        Trend::Steady
    };

    BorderPrediction {
        rank,
        current_score,
        predicted_final: predicted.round() as i64,
        confidence: DEFAULT_CONFIDENCE,
        trend,
    }
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

/// Average and peak gain per hour for each tracked rank.
pub fn analyze_event_curve(
    event_id: u32,
    event_name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    samples: &[EventScoreSample],
) -> EventAnalysis {
    let duration = hours_between(start, end);
    let curve: Vec<EventScoreCurvePoint> = samples
        .iter()
        .map(|s| EventScoreCurvePoint {
            timestamp: s.timestamp,
            hours: hours_between(start, s.timestamp),
            scores: s.scores.clone(),
        })
        .collect();

    let final_scores = curve.last().map(|p| p.scores.clone()).unwrap_or_default();
    let score_at = |point: &EventScoreCurvePoint, rank: u32| -> i64 {
        point.scores.get(&rank).copied().unwrap_or(0)
    };

    let mut average_speed = BTreeMap::new();
    let mut peak_speed = BTreeMap::new();

    for rank in TRACKED_RANKS {
        let final_score = curve.last().map(|p| score_at(p, rank)).unwrap_or(0);
        let avg = if duration > 0.0 {
            final_score as f64 / duration
        } else {
            0.0
        };
        average_speed.insert(rank, avg);

        let mut peak = PeakSpeed {
            hour: 0.0,
            speed: 0.0,
        };
        for pair in curve.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let hour_diff = curr.hours - prev.hours;
            if hour_diff <= 0.0 {
                continue;
            }
            let speed = (score_at(curr, rank) - score_at(prev, rank)) as f64 / hour_diff;
            if speed > peak.speed {
                peak = PeakSpeed {
                    hour: curr.hours,
                    speed,
                };
            }
        }
        peak_speed.insert(rank, peak);
    }

    EventAnalysis {
        event_id,
        event_name: event_name.to_string(),
        duration,
        final_scores,
        score_curve: curve,
        average_speed,
        peak_speed,
        predictions: BTreeMap::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEfficiency {
    pub music_id: u32,
    pub title: String,
    pub difficulty: String,
    pub level: u32,
    pub note_count: u32,
    pub duration: f64,
    pub base_score: i64,
    pub score_per_second: f64,
    pub score_per_note: f64,
    pub efficiency: f64,
    pub rank: usize,
}

/// Rough score model: floor((floor(power × 0.01) + notes × 100) × skill × event).
pub fn calculate_song_efficiency(
    song: &SongData,
    difficulty: &str,
    team_power: i64,
    skill_bonus: f64,
    event_bonus: f64,
) -> Option<SongEfficiency> {
    let diff = song.difficulties.iter().find(|d| d.difficulty == difficulty)?;

    let power_score = (team_power as f64 * 0.01).floor();
    let note_score = diff.note_count as f64 * 100.0;
    let base_score = ((power_score + note_score) * skill_bonus * event_bonus).floor() as i64;

    let score_per_second = if diff.play_seconds > 0.0 {
        base_score as f64 / diff.play_seconds
    } else {
        0.0
    };
    let score_per_note = if diff.note_count > 0 {
        base_score as f64 / diff.note_count as f64
    } else {
        0.0
    };

    Some(SongEfficiency {
        music_id: song.id,
        title: song.title.clone(),
        difficulty: difficulty.to_string(),
        level: diff.level,
        note_count: diff.note_count,
        duration: diff.play_seconds,
        base_score,
        score_per_second,
        score_per_note,
        efficiency: score_per_second * 100.0,
        rank: 0,
    })
}

/// Top `limit` songs by efficiency with 1-based ranks.
pub fn best_songs_ranking(
    songs: &[SongData],
    team_power: i64,
    difficulty: &str,
    limit: usize,
) -> Vec<SongEfficiency> {
    let mut ranked: Vec<SongEfficiency> = songs
        .iter()
        .filter_map(|s| calculate_song_efficiency(s, difficulty, team_power, 1.0, 1.0))
        .collect();

    ranked.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));
    ranked.truncate(limit);
    for (i, e) in ranked.iter_mut().enumerate() {
        e.rank = i + 1;
    }
    ranked
}
