//! Score -> event PT conversion ("score control").
//!
//! PT = floor(basePT × (1 + bonus)), basePT = 100 + min(floor(score / 20000), 124).
//! The closed form is an approximation; per-song [`ScoreControlData`] tables are
//! authoritative and the two are allowed to disagree.

use models::{ScoreControlData, ScoreRange};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

pub const SCORE_BUCKET_WIDTH: i64 = 20_000;
pub const MAX_SCORE_RANGE_INDEX: i64 = 124;
pub const MIN_BASE_PT: i64 = 100;
pub const MAX_BASE_PT: i64 = MIN_BASE_PT + MAX_SCORE_RANGE_INDEX;
/// Tolerance when matching a bonus against a table column.
pub const BONUS_EPSILON: f64 = 0.001;
/// Half-width of the "range" control mode window.
pub const RANGE_MODE_TOLERANCE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtResult {
    pub base_pt: i64,
    pub final_pt: i64,
    pub score_range: ScoreRange,
    pub bonus: f64,
}

pub fn bucket_range(index: i64) -> ScoreRange {
    ScoreRange {
        min: index * SCORE_BUCKET_WIDTH,
        max: index * SCORE_BUCKET_WIDTH + SCORE_BUCKET_WIDTH - 1,
    }
}

pub fn calculate_pt(score: i64, bonus: f64) -> PtResult {
    let index = score.div_euclid(SCORE_BUCKET_WIDTH).min(MAX_SCORE_RANGE_INDEX);
    let base_pt = MIN_BASE_PT + index;

    PtResult {
        base_pt,
        final_pt: (base_pt as f64 * (1.0 + bonus)).floor() as i64,
        score_range: bucket_range(index),
        bonus,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredScore {
    pub min_score: i64,
    /// `None` on the last row: no known maximum score.
    pub max_score: Option<i64>,
    pub base_pt: i64,
}

/// Lowest score bucket reaching `target_pt`, or `None` when no score can.
///
/// The division can land one off in either direction (`136 / 1.36` is
/// `100.00000000000001`), so the estimate is settled against the forward
/// formula: the result is the smallest basePT whose [`calculate_pt`] reaches
/// the target.
pub fn calculate_required_score(target_pt: i64, bonus: f64) -> Option<RequiredScore> {
    let factor = 1.0 + bonus;
    let reaches = |base_pt: i64| (base_pt as f64 * factor).floor() as i64 >= target_pt;

    let estimate = (target_pt as f64 / factor).ceil() as i64;
    let mut base_pt = estimate.clamp(MIN_BASE_PT - 1, MAX_BASE_PT + 1);
    if (MIN_BASE_PT..=MAX_BASE_PT).contains(&base_pt) {
        while base_pt > MIN_BASE_PT && reaches(base_pt - 1) {
            base_pt -= 1;
        }
        if !reaches(base_pt) {
            base_pt += 1;
        }
    }
    if !(MIN_BASE_PT..=MAX_BASE_PT).contains(&base_pt) {
        return None;
    }

    let index = base_pt - MIN_BASE_PT;
    let range = bucket_range(index);
    Some(RequiredScore {
        min_score: range.min,
        max_score: (index < MAX_SCORE_RANGE_INDEX).then_some(range.max),
        base_pt,
    })
}

pub fn bonus_index(data: &ScoreControlData, bonus: f64) -> Option<usize> {
    data.bonuses
        .iter()
        .position(|b| (b - bonus).abs() < BONUS_EPSILON)
}

pub fn score_index(data: &ScoreControlData, score: i64) -> Option<usize> {
    data.score_ranges.iter().position(|r| r.contains(score))
}

/// PT from the table, `None` when the score or bonus is not covered.
pub fn lookup_pt(data: &ScoreControlData, score: i64, bonus: f64) -> Option<i64> {
    let row = score_index(data, score)?;
    let col = bonus_index(data, bonus)?;
    data.pt_table.get(row)?.get(col).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtCrossCheck {
    pub formula: PtResult,
    pub table_pt: Option<i64>,
}

impl PtCrossCheck {
    pub fn disagrees(&self) -> bool {
        self.table_pt
            .is_some_and(|pt| pt != self.formula.final_pt)
    }
}

/// Formula result next to the table value; both are kept when they differ.
pub fn cross_check_pt(data: Option<&ScoreControlData>, score: i64, bonus: f64) -> PtCrossCheck {
    let check = PtCrossCheck {
        formula: calculate_pt(score, bonus),
        table_pt: data.and_then(|d| lookup_pt(d, score, bonus)),
    };
    if check.disagrees() {
        debug!(
            score,
            bonus,
            formula_pt = check.formula.final_pt,
            table_pt = ?check.table_pt,
            "score control table disagrees with formula"
        );
    }
    check
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMatch {
    pub score_range: ScoreRange,
    pub actual_pt: i64,
}

/// Every table row whose PT equals `target_pt` exactly.
pub fn lookup_required_score(data: &ScoreControlData, target_pt: i64, bonus: f64) -> Vec<TableMatch> {
    let Some(col) = bonus_index(data, bonus) else {
        return Vec::new();
    };

    data.pt_table
        .iter()
        .zip(&data.score_ranges)
        .filter_map(|(row, range)| {
            let pt = *row.get(col)?;
            (pt == target_pt).then_some(TableMatch {
                score_range: *range,
                actual_pt: pt,
            })
        })
        .collect()
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Exact,
    /// Within ±10 PT of the target.
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSuggestion {
    pub score_range: ScoreRange,
    pub pt: i64,
    pub base_pt: i64,
}

/// Table rows that land on (or near) a single-play PT target at `bonus`.
pub fn control_suggestions(
    data: &ScoreControlData,
    target_pt: i64,
    bonus: f64,
    mode: ControlMode,
) -> Vec<ControlSuggestion> {
    let Some(col) = bonus_index(data, bonus) else {
        return Vec::new();
    };

    data.pt_table
        .iter()
        .zip(&data.score_ranges)
        .enumerate()
        .filter_map(|(i, (row, range))| {
            let pt = *row.get(col)?;
            let hit = match mode {
                ControlMode::Exact => pt == target_pt,
                ControlMode::Range => (pt - target_pt).abs() <= RANGE_MODE_TOLERANCE,
            };
            hit.then_some(ControlSuggestion {
                score_range: *range,
                pt,
                base_pt: MIN_BASE_PT + i as i64,
            })
        })
        .collect()
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum BoostMultiplier {
    #[default]
    One,
    Two,
    Three,
}

impl BoostMultiplier {
    pub const ALL: [BoostMultiplier; 3] = [Self::One, Self::Two, Self::Three];

    pub const fn factor(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Stamina spent per play at this boost.
    pub const fn stamina_cost(self) -> i64 {
        self.factor() * 10
    }
}

impl TryFrom<u8> for BoostMultiplier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("boost multiplier must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<BoostMultiplier> for u8 {
    fn from(value: BoostMultiplier) -> Self {
        value.factor() as u8
    }
}

pub(crate) fn div_ceil_positive(amount: i64, per_unit: i64) -> i64 {
    if amount <= 0 || per_unit <= 0 {
        return 0;
    }
    (amount + per_unit - 1) / per_unit
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlanResult {
    pub games_needed: i64,
    #[serde(rename = "totalPTFromGames")]
    pub total_pt_from_games: i64,
    #[serde(rename = "ptPerGame")]
    pub pt_per_game: i64,
    #[serde(rename = "targetPT")]
    pub target_pt: i64,
    #[serde(rename = "currentPT")]
    pub current_pt: i64,
    pub remaining: i64,
}

pub fn calculate_game_plan(
    target_pt: i64,
    current_pt: i64,
    score: i64,
    bonus: f64,
    boost: BoostMultiplier,
) -> GamePlanResult {
    let pt_per_game = calculate_pt(score, bonus).final_pt * boost.factor();
    let remaining = (target_pt - current_pt).max(0);
    let games_needed = div_ceil_positive(remaining, pt_per_game);

    GamePlanResult {
        games_needed,
        total_pt_from_games: games_needed * pt_per_game,
        pt_per_game,
        target_pt,
        current_pt,
        remaining,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostOption {
    pub multiplier: BoostMultiplier,
    pub pt: i64,
    pub games: i64,
}

/// PT per play and plays needed for each boost level.
pub fn boost_comparison(final_pt: i64, remaining: i64) -> Vec<BoostOption> {
    BoostMultiplier::ALL
        .into_iter()
        .map(|multiplier| {
            let pt = final_pt * multiplier.factor();
            BoostOption {
                multiplier,
                pt,
                games: div_ceil_positive(remaining, pt),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreControlSuggestion {
    #[serde(rename = "targetPT")]
    pub target_pt: i64,
    pub score_range: ScoreRange,
    pub bonus: f64,
    #[serde(rename = "basePT")]
    pub base_pt: i64,
    pub games_needed: i64,
    #[serde(rename = "totalPT")]
    pub total_pt: i64,
}

pub const DEFAULT_MAX_GAMES: i64 = 1000;

/// Rows that reach `target_total_pt` within `max_games` plays, fewest plays first.
pub fn find_optimal_score(
    data: &ScoreControlData,
    target_total_pt: i64,
    current_pt: i64,
    bonus: f64,
    boost: BoostMultiplier,
    max_games: i64,
) -> Vec<ScoreControlSuggestion> {
    let remaining = target_total_pt - current_pt;
    if remaining <= 0 {
        return Vec::new();
    }
    let Some(col) = bonus_index(data, bonus) else {
        return Vec::new();
    };

    let mut suggestions: Vec<ScoreControlSuggestion> = data
        .pt_table
        .iter()
        .zip(&data.score_ranges)
        .enumerate()
        .filter_map(|(i, (row, range))| {
            let table_pt = *row.get(col)?;
            let pt = table_pt * boost.factor();
            if pt <= 0 {
                return None;
            }
            let games = div_ceil_positive(remaining, pt);
            (games <= max_games).then_some(ScoreControlSuggestion {
                target_pt: table_pt,
                score_range: *range,
                bonus,
                base_pt: MIN_BASE_PT + i as i64,
                games_needed: games,
                total_pt: games * pt,
            })
        })
        .collect();

    suggestions.sort_by_key(|s| s.games_needed);
    suggestions
}

/// Formula-generated table over bonuses `start..=end` (rounded to 2 decimals).
pub fn generate_score_control_table(start: f64, end: f64, step: f64) -> ScoreControlData {
    let mut bonuses = Vec::new();
    if step > 0.0 {
        let mut b = start;
        while b <= end + BONUS_EPSILON {
            bonuses.push((b * 100.0).round() / 100.0);
            b += step;
        }
    } else {
        bonuses.push((start * 100.0).round() / 100.0);
    }

    let mut score_ranges = Vec::new();
    let mut pt_table = Vec::new();
    for i in 0..=MAX_SCORE_RANGE_INDEX {
        let base_pt = MIN_BASE_PT + i;
        score_ranges.push(bucket_range(i));
        pt_table.push(
            bonuses
                .iter()
                .map(|bonus| (base_pt as f64 * (1.0 + bonus)).floor() as i64)
                .collect(),
        );
    }

    ScoreControlData {
        song_name: "formula".to_string(),
        song_name_tw: String::new(),
        mode: "formula".to_string(),
        bonuses,
        score_ranges,
        pt_table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bucket_edges() {
        let r = calculate_pt(0, 0.0);
        assert_eq!(r.base_pt, 100);
        assert_eq!(r.score_range, ScoreRange { min: 0, max: 19_999 });

        assert_eq!(calculate_pt(19_999, 0.0).base_pt, 100);
        assert_eq!(calculate_pt(20_000, 0.0).base_pt, 101);
        assert_eq!(calculate_pt(2_480_000, 0.0).base_pt, 224);
        assert_eq!(calculate_pt(9_999_999, 0.0).base_pt, 224);
    }

    #[test]
    fn required_score_last_row_is_open_ended() {
        let r = calculate_required_score(224, 0.0).unwrap();
        assert_eq!(r.min_score, 124 * 20_000);
        assert_eq!(r.max_score, None);

        let r = calculate_required_score(223, 0.0).unwrap();
        assert_eq!(r.max_score, Some(123 * 20_000 + 19_999));
    }

    #[test]
    fn required_score_out_of_reach() {
        assert_eq!(calculate_required_score(225, 0.0), None);
        assert_eq!(calculate_required_score(99, 0.0), None);
        // 1000 / 3.5 = 285.7 -> 286 > 224
        assert_eq!(calculate_required_score(1000, 2.5), None);
    }

    #[test]
    fn required_score_settles_float_division() {
        // 136 / 1.36 is just above 100
        let r = calculate_required_score(136, 0.36).unwrap();
        assert_eq!(r.base_pt, 100);
        assert_eq!(r.min_score, 0);

        // 138 / 1.15 is just above 120
        let r = calculate_required_score(138, 0.15).unwrap();
        assert_eq!(r.base_pt, 120);
        assert_eq!(calculate_pt(r.min_score, 0.15).final_pt, 138);
    }

    #[test]
    fn boost_multiplier_conversions() {
        assert_eq!(BoostMultiplier::try_from(2).unwrap(), BoostMultiplier::Two);
        assert!(BoostMultiplier::try_from(4).is_err());
        assert_eq!(BoostMultiplier::Three.stamina_cost(), 30);
        assert_eq!(u8::from(BoostMultiplier::Three), 3);
    }

    #[test]
    fn control_mode_parses() {
        assert_eq!("range".parse::<ControlMode>().unwrap(), ControlMode::Range);
        assert_eq!(ControlMode::Exact.to_string(), "exact");
    }

    #[test]
    fn div_ceil_handles_degenerate_inputs() {
        assert_eq!(div_ceil_positive(10, 3), 4);
        assert_eq!(div_ceil_positive(9, 3), 3);
        assert_eq!(div_ceil_positive(0, 3), 0);
        assert_eq!(div_ceil_positive(10, 0), 0);
    }
}
