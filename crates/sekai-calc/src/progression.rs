//! Bond and character rank progression estimates.

use models::{unit_of, CharacterId, Unit, CHARACTER_COUNT};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::score_control::div_ceil_positive;
use crate::tables::{
    character_rank_power, BOND_EXP_TABLE, BOND_MAX_LEVEL, CHARACTER_RANK_EXP_TABLE,
};

pub const DEFAULT_BOND_EXP_PER_PLAY: i64 = 10;
pub const DEFAULT_RANK_EXP_PER_PLAY: i64 = 15;
pub const DEFAULT_MINUTES_PER_PLAY: f64 = 3.0;
pub const DEFAULT_DAILY_PLAY_HOURS: f64 = 2.0;
/// Stamina assumed per play by the level-up speed estimate.
pub const STAMINA_PER_PLAY: i64 = 10;

/// Levels that grant an extra live bonus slot.
pub const LIVE_BONUS_LEVELS: [u32; 5] = [20, 40, 60, 80, 100];

pub fn calculate_bond_exp_required(current_level: u32, current_exp: i64, target_level: u32) -> i64 {
    BOND_EXP_TABLE.required_exp(current_level, current_exp, target_level)
}

pub fn calculate_cr_exp_required(current_level: u32, current_exp: i64, target_level: u32) -> i64 {
    CHARACTER_RANK_EXP_TABLE.required_exp(current_level, current_exp, target_level)
}

pub fn estimated_plays(required_exp: i64, exp_per_play: i64) -> i64 {
    div_ceil_positive(required_exp, exp_per_play)
}

pub fn estimated_hours(plays: i64, minutes_per_play: f64) -> f64 {
    plays as f64 * minutes_per_play / 60.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum BondRewardKind {
    Crystal,
    Title,
    LiveBonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondReward {
    pub level: u32,
    pub kind: BondRewardKind,
    pub amount: u32,
}

fn crystal_amount(level: u32) -> u32 {
    match level {
        0..=50 => 10,
        51..=100 => 20,
        _ => 30,
    }
}

/// Milestone rewards for every level in `(current_level, target_level]`,
/// up to the bond level cap.
pub fn bond_rewards(current_level: u32, target_level: u32) -> Vec<BondReward> {
    let mut rewards = Vec::new();

    for level in current_level.saturating_add(1)..=target_level.min(BOND_MAX_LEVEL) {
        if level % 5 == 0 {
            rewards.push(BondReward {
                level,
                kind: BondRewardKind::Crystal,
                amount: crystal_amount(level),
            });
        }
        if level % 10 == 0 {
            rewards.push(BondReward {
                level,
                kind: BondRewardKind::Title,
                amount: 1,
            });
        }
        if LIVE_BONUS_LEVELS.contains(&level) {
            rewards.push(BondReward {
                level,
                kind: BondRewardKind::LiveBonus,
                amount: 1,
            });
        }
    }

    rewards
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondProgress {
    pub current_level: u32,
    pub current_exp: i64,
    pub target_level: u32,
    pub required_exp: i64,
    pub estimated_plays: i64,
    pub estimated_hours: f64,
    pub rewards: Vec<BondReward>,
}

pub fn calculate_bond_progress(
    current_level: u32,
    current_exp: i64,
    target_level: u32,
    exp_per_play: i64,
) -> BondProgress {
    let required_exp = calculate_bond_exp_required(current_level, current_exp, target_level);
    let plays = estimated_plays(required_exp, exp_per_play);

    BondProgress {
        current_level,
        current_exp,
        target_level,
        required_exp,
        estimated_plays: plays,
        estimated_hours: estimated_hours(plays, DEFAULT_MINUTES_PER_PLAY),
        rewards: bond_rewards(current_level, target_level),
    }
}

pub fn calculate_cr_power_increase(current_level: u32, target_level: u32) -> i64 {
    character_rank_power(target_level as i64) - character_rank_power(current_level as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRankProgress {
    pub current_level: u32,
    pub current_exp: i64,
    pub target_level: u32,
    pub required_exp: i64,
    pub power_increase: i64,
    pub estimated_plays: i64,
    pub estimated_hours: f64,
}

pub fn calculate_cr_progress(
    current_level: u32,
    current_exp: i64,
    target_level: u32,
    exp_per_play: i64,
) -> CharacterRankProgress {
    let required_exp = calculate_cr_exp_required(current_level, current_exp, target_level);
    let plays = estimated_plays(required_exp, exp_per_play);

    CharacterRankProgress {
        current_level,
        current_exp,
        target_level,
        required_exp,
        power_increase: calculate_cr_power_increase(current_level, target_level),
        estimated_plays: plays,
        estimated_hours: estimated_hours(plays, DEFAULT_MINUTES_PER_PLAY),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSpeedEstimate {
    pub target_level: u32,
    pub games_per_day: i64,
    /// `None` when not a single play fits in the daily budget.
    pub days_required: Option<i64>,
    pub weeks_required: Option<i64>,
    pub games_required: i64,
    pub stamina_required: i64,
}

/// Calendar time to raise a character rank from `current_level` (at 0 exp).
pub fn estimate_level_up_speed(
    current_level: u32,
    target_level: u32,
    daily_play_hours: f64,
    minutes_per_play: f64,
) -> LevelSpeedEstimate {
    let required_exp = calculate_cr_exp_required(current_level, 0, target_level);
    let games_required = estimated_plays(required_exp, DEFAULT_RANK_EXP_PER_PLAY);

    let games_per_day = if minutes_per_play > 0.0 {
        (daily_play_hours * 60.0 / minutes_per_play).floor() as i64
    } else {
        0
    };

    let days_required = if games_required == 0 {
        Some(0)
    } else if games_per_day > 0 {
        Some(div_ceil_positive(games_required, games_per_day))
    } else {
        None
    };

    LevelSpeedEstimate {
        target_level,
        games_per_day,
        days_required,
        weeks_required: days_required.map(|d| div_ceil_positive(d, 7)),
        games_required,
        stamina_required: games_required * STAMINA_PER_PLAY,
    }
}

/// Bond pair scope: both characters' shared unit, or `Cross` for mixed pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BondScope {
    Unit(Unit),
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondPair {
    pub character1: CharacterId,
    pub character2: CharacterId,
    pub scope: BondScope,
}

/// Every unordered pair of distinct characters.
pub fn bond_pairs() -> Vec<BondPair> {
    let mut pairs = Vec::new();
    for a in 1..=CHARACTER_COUNT {
        for b in (a + 1)..=CHARACTER_COUNT {
            let scope = match (unit_of(a), unit_of(b)) {
                (Some(ua), Some(ub)) if ua == ub => BondScope::Unit(ua),
                _ => BondScope::Cross,
            };
            pairs.push(BondPair {
                character1: a,
                character2: b,
                scope,
            });
        }
    }
    pairs
}

pub fn character_bond_pairs(character_id: CharacterId) -> Vec<BondPair> {
    bond_pairs()
        .into_iter()
        .filter(|p| p.character1 == character_id || p.character2 == character_id)
        .collect()
}
