use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use models::{EventAnalysis, EventScoreSample, SongData, SongDifficulty};
use sekai_calc::ranking::{
    analyze_event_curve, best_songs_ranking, calculate_ranking_plan, calculate_song_efficiency,
    predict_border, RankingPlanInput, Trend, DEFAULT_CONFIDENCE,
};
use sekai_calc::BoostMultiplier;

fn event_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn sample(hours: i64, rank100: i64) -> EventScoreSample {
    EventScoreSample {
        timestamp: event_start() + Duration::hours(hours),
        scores: BTreeMap::from([(100, rank100)]),
    }
}

fn past_event() -> EventAnalysis {
    event_with_final(500_000)
}

/// Past event at 200k for rank 100 by mid-event, ending at `final_score`.
fn event_with_final(final_score: i64) -> EventAnalysis {
    let samples = vec![sample(0, 0), sample(96, 200_000), sample(192, final_score)];
    analyze_event_curve(
        1,
        "past",
        event_start(),
        event_start() + Duration::hours(192),
        &samples,
    )
}

#[test]
fn event_curve_speeds() {
    let analysis = past_event();
    assert_eq!(analysis.duration, 192.0);
    assert_eq!(analysis.score_curve.len(), 3);
    assert_eq!(analysis.score_curve[1].hours, 96.0);
    assert_eq!(analysis.final_scores.get(&100), Some(&500_000));

    let avg = analysis.average_speed[&100];
    assert!((avg - 500_000.0 / 192.0).abs() < 1e-9);

    let peak = analysis.peak_speed[&100];
    assert_eq!(peak.hour, 192.0);
    assert!((peak.speed - 3125.0).abs() < 1e-9);

    // untracked in samples: no speed at all
    let rank1 = analysis.peak_speed[&1];
    assert_eq!(rank1.speed, 0.0);
    assert_eq!(analysis.average_speed[&1], 0.0);
    assert!(analysis.predictions.is_empty());
}

#[test]
fn event_curve_without_samples() {
    let analysis = analyze_event_curve(2, "empty", event_start(), event_start(), &[]);
    assert_eq!(analysis.duration, 0.0);
    assert!(analysis.final_scores.is_empty());
    assert!(analysis.average_speed.values().all(|v| *v == 0.0));
}

#[test]
fn border_linear_extrapolation() {
    let p = predict_border(100, 100_000, 24.0, 192.0, &[]);
    assert_eq!(p.rank, 100);
    assert_eq!(p.predicted_final, 800_000);
    assert_eq!(p.confidence, DEFAULT_CONFIDENCE);

    let start = predict_border(100, 5_000, 0.0, 192.0, &[]);
    assert_eq!(start.predicted_final, 5_000);
    assert_eq!(start.trend, Trend::Steady);
}

#[test]
fn border_uses_history_after_midpoint() {
    let history = vec![past_event()];

    // before the midpoint the linear model still applies
    let early = predict_border(100, 100_000, 24.0, 192.0, &history);
    assert_eq!(early.predicted_final, 800_000);

    let late = predict_border(100, 300_000, 96.0, 192.0, &history);
    assert_eq!(late.predicted_final, 750_000);
    assert_eq!(late.trend, Trend::Steady);

    // no history for this rank: fall back to linear
    let other = predict_border(1000, 300_000, 96.0, 192.0, &history);
    assert_eq!(other.predicted_final, 600_000);
}

#[test]
fn slowing_history_marks_current_pace_as_accelerating() {
    // final/mid ratio 1.5: the prediction grows slower than the pace so far
    let history = vec![event_with_final(300_000)];
    let p = predict_border(100, 300_000, 96.0, 192.0, &history);
    assert_eq!(p.predicted_final, 450_000);
    assert_eq!(p.trend, Trend::Accelerating);
}

#[test]
fn trend_is_never_decelerating() {
    let histories = [
        Vec::new(),
        vec![event_with_final(250_000)],
        vec![event_with_final(500_000)],
        vec![event_with_final(900_000)],
    ];
    for history in &histories {
        for elapsed in [0.0, 1.0, 24.0, 95.0, 96.0, 150.0, 192.0] {
            for score in [0, 1_000, 300_000, 5_000_000] {
                let p = predict_border(100, score, elapsed, 192.0, history);
                assert_ne!(p.trend, Trend::Decelerating);
            }
        }
    }
}

#[test]
fn ranking_plan_resources() {
    let plan = calculate_ranking_plan(&RankingPlanInput {
        target_score: 1_000_000,
        current_score: 200_000,
        remaining_hours: 24.0,
        score_per_game: 20_000,
        game_minutes: 2.5,
        boost: BoostMultiplier::Three,
        current_stamina: 0,
        max_stamina: 10,
    });

    assert_eq!(plan.score_gap, 800_000);
    assert_eq!(plan.required_games, 14);
    assert_eq!(plan.required_stamina, 420);
    // 420 - 288 natural
    assert_eq!(plan.required_drinks.large, 13);
    assert_eq!(plan.required_drinks.small, 2);
    assert_eq!(plan.required_crystals, 14);
    assert_eq!(plan.efficiency.score_per_game, 60_000);
    assert!((plan.efficiency.games_per_hour - 24.0).abs() < 1e-9);
    assert!((plan.hours_per_day - 14.0 / 24.0).abs() < 1e-9);
}

#[test]
fn ranking_plan_already_reached() {
    let plan = calculate_ranking_plan(&RankingPlanInput {
        target_score: 100,
        current_score: 500,
        remaining_hours: 10.0,
        score_per_game: 20_000,
        game_minutes: 2.5,
        boost: BoostMultiplier::One,
        current_stamina: 5,
        max_stamina: 10,
    });
    assert_eq!(plan.required_games, 0);
    assert_eq!(plan.required_stamina, 0);
    assert_eq!(plan.required_crystals, 0);
    assert_eq!(plan.required_drinks.large + plan.required_drinks.small, 0);
}

fn song(id: u32, title: &str, notes: u32, seconds: f64) -> SongData {
    SongData {
        id,
        title: title.to_string(),
        difficulties: vec![SongDifficulty {
            difficulty: "master".to_string(),
            level: 30,
            note_count: notes,
            play_seconds: seconds,
        }],
    }
}

#[test]
fn song_efficiency_model() {
    let s = song(1, "short", 1000, 120.0);
    let e = calculate_song_efficiency(&s, "master", 200_000, 1.0, 1.0).unwrap();
    assert_eq!(e.base_score, 102_000);
    assert!((e.score_per_second - 850.0).abs() < 1e-9);
    assert!((e.score_per_note - 102.0).abs() < 1e-9);
    assert!((e.efficiency - 85_000.0).abs() < 1e-6);

    assert!(calculate_song_efficiency(&s, "expert", 200_000, 1.0, 1.0).is_none());
}

#[test]
fn best_songs_are_ranked() {
    let songs = vec![
        song(1, "slow", 800, 160.0),
        song(2, "dense", 1200, 100.0),
        song(3, "mid", 1000, 120.0),
    ];
    let ranked = best_songs_ranking(&songs, 200_000, "master", 2);
    let ids: Vec<(u32, usize)> = ranked.iter().map(|e| (e.music_id, e.rank)).collect();
    assert_eq!(ids, vec![(2, 1), (3, 2)]);
}
