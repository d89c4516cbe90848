//! Rule-table driven deck power.
//!
//! Unlike [`crate::power`], bonuses here come from master data records: area
//! item levels are filtered per card, character rank and MySEKAI bonuses are
//! looked up. Missing records contribute nothing.

use std::collections::HashMap;

use models::{
    unit_of, AreaItemLevel, Attribute, CanvasBonus, Card, CardParameterType, CharacterId,
    DeckCard, MysekaiDollBonus, MysekaiGateBonus, Unit, UnitTarget,
};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::tables::{character_rank_power_bonus, master_rank_bonus};

/// Parameters plus training and master rank bonuses at `level`.
pub fn card_base_power(card: &Card, level: u32, special_training: bool, master_rank: u32) -> i64 {
    let mut power = card.parameter(level, CardParameterType::Param1)
        + card.parameter(level, CardParameterType::Param2)
        + card.parameter(level, CardParameterType::Param3);

    if special_training {
        power += card.special_training_bonus();
    }

    power + master_rank_bonus(master_rank)
}

pub fn canvas_bonus(card: &Card, frameless: bool, canvas_bonuses: &[CanvasBonus]) -> i64 {
    if !frameless {
        return 0;
    }
    canvas_bonuses
        .iter()
        .find(|b| b.card_id == card.id)
        .map(CanvasBonus::total)
        .unwrap_or(0)
}

fn unit_matches(target: UnitTarget, card_unit: Option<Unit>, team_unit: Unit) -> bool {
    match target {
        UnitTarget::All => true,
        UnitTarget::Nobody => false,
        UnitTarget::Only(unit) => Some(unit) == card_unit || unit == team_unit,
    }
}

/// Summed bonus percentage of every area item level that applies to `card`.
pub fn area_item_bonus_rate(
    card: &Card,
    area_item_levels: &[AreaItemLevel],
    team_unit: Unit,
    all_match: bool,
) -> f64 {
    let card_unit = unit_of(card.character_id);

    area_item_levels
        .iter()
        .filter(|l| unit_matches(l.target_unit, card_unit, team_unit))
        .filter(|l| l.target_card_attr.matches(card.attr))
        .map(|l| l.bonus_rate(all_match))
        .sum()
}

/// Characters without a recorded rank count as rank 1.
pub fn character_rank_bonus(
    character_id: CharacterId,
    character_ranks: &HashMap<CharacterId, u32>,
) -> i64 {
    let rank = character_ranks.get(&character_id).copied().unwrap_or(1);
    character_rank_power_bonus(rank)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysekaiBonus {
    pub gate_bonus: i64,
    pub doll_bonus: i64,
}

/// Gate bonus applies to every card; doll bonus only to the doll's character.
pub fn mysekai_bonus(
    card: &Card,
    gate_level: u32,
    doll_level: u32,
    gate_bonuses: &[MysekaiGateBonus],
    doll_bonuses: &[MysekaiDollBonus],
) -> MysekaiBonus {
    let gate_bonus = gate_bonuses
        .iter()
        .find(|g| g.level == gate_level)
        .map(|g| g.bonus_power)
        .unwrap_or(0);

    let doll_bonus = doll_bonuses
        .iter()
        .find(|d| d.character_id == card.character_id && d.level == doll_level)
        .map(|d| d.bonus_power)
        .unwrap_or(0);

    MysekaiBonus {
        gate_bonus,
        doll_bonus,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerCalculation {
    pub base_power: i64,
    pub area_item_bonus: i64,
    pub character_rank_bonus: i64,
    pub mysekai_gate_bonus: i64,
    pub mysekai_doll_bonus: i64,
    pub total_power: i64,
}

#[derive(Debug, Clone)]
pub struct FullPowerParams<'a> {
    pub deck: &'a [DeckCard],
    pub area_item_levels: &'a [AreaItemLevel],
    pub character_ranks: &'a HashMap<CharacterId, u32>,
    pub mysekai_gate_level: u32,
    /// Character id -> doll level.
    pub mysekai_doll_levels: &'a HashMap<CharacterId, u32>,
    pub gate_bonuses: &'a [MysekaiGateBonus],
    pub doll_bonuses: &'a [MysekaiDollBonus],
    pub canvas_bonuses: &'a [CanvasBonus],
    pub team_unit: Unit,
    pub team_attribute: Option<Attribute>,
}

impl FullPowerParams<'_> {
    /// Every card is from the team unit and, when one is given, shares the team attribute.
    pub fn is_all_match(&self) -> bool {
        let same_unit = self
            .deck
            .iter()
            .all(|dc| unit_of(dc.card.character_id) == Some(self.team_unit));
        let same_attr = match self.team_attribute {
            Some(attr) => self.deck.iter().all(|dc| dc.card.attr == attr),
            None => true,
        };
        same_unit && same_attr
    }
}

pub fn calculate_full_deck_power(params: &FullPowerParams<'_>) -> PowerCalculation {
    let all_match = params.is_all_match();
    let mut calc = PowerCalculation::default();

    for dc in params.deck {
        let card = &dc.card;
        let base = card_base_power(card, dc.level, dc.special_training, dc.master_rank);
        let canvas = canvas_bonus(card, dc.frameless, params.canvas_bonuses);
        calc.base_power += base + canvas;

        // area rate applies to the pre-canvas power
        let rate =
            area_item_bonus_rate(card, params.area_item_levels, params.team_unit, all_match);
        calc.area_item_bonus += (base as f64 * (rate / 100.0)).floor() as i64;

        calc.character_rank_bonus += character_rank_bonus(card.character_id, params.character_ranks);

        let doll_level = params
            .mysekai_doll_levels
            .get(&card.character_id)
            .copied()
            .unwrap_or(0);
        let mysekai = mysekai_bonus(
            card,
            params.mysekai_gate_level,
            doll_level,
            params.gate_bonuses,
            params.doll_bonuses,
        );
        calc.mysekai_gate_bonus += mysekai.gate_bonus;
        calc.mysekai_doll_bonus += mysekai.doll_bonus;
    }

    calc.total_power = calc.base_power
        + calc.area_item_bonus
        + calc.character_rank_bonus
        + calc.mysekai_gate_bonus
        + calc.mysekai_doll_bonus;
    calc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PowerCategory {
    #[strum(serialize = "Base power")]
    Base,
    #[strum(serialize = "Area items")]
    AreaItem,
    #[strum(serialize = "Character rank")]
    CharacterRank,
    #[strum(serialize = "MySEKAI gate")]
    MysekaiGate,
    #[strum(serialize = "MySEKAI doll")]
    MysekaiDoll,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub category: PowerCategory,
    pub value: i64,
    pub percentage: f64,
}

pub fn analyze_power_breakdown(calc: &PowerCalculation) -> Vec<PowerBreakdown> {
    let share = |value: i64| {
        if calc.total_power == 0 {
            0.0
        } else {
            value as f64 / calc.total_power as f64 * 100.0
        }
    };

    [
        (PowerCategory::Base, calc.base_power),
        (PowerCategory::AreaItem, calc.area_item_bonus),
        (PowerCategory::CharacterRank, calc.character_rank_bonus),
        (PowerCategory::MysekaiGate, calc.mysekai_gate_bonus),
        (PowerCategory::MysekaiDoll, calc.mysekai_doll_bonus),
    ]
    .into_iter()
    .map(|(category, value)| PowerBreakdown {
        category,
        value,
        percentage: share(value),
    })
    .collect()
}
