//! Simplified deck power calculator.
//!
//! Every bonus is a flat multiple of the card's canvas-enhanced power, floored
//! per term:
//!
//! - area = floor(P × 0.01 × (group × 0.5 × (1 + same unit) + personal × 2 + plant × 0.5 × (1 + same attribute)))
//! - character rank = floor(P × 0.001 × min(rank, 50))
//! - doll = floor(P × 0.001 × doll level), gate = floor(P × 0.001 × gate level)
//!
//! Inputs are not clamped to game-valid ranges.

use serde::{Deserialize, Serialize};

pub const CANVAS_BONUS: i64 = 1500;
pub const CHARACTER_RANK_CAP: i64 = 50;
pub const TITLE_BONUS_PER_TITLE: i64 = 10;
pub const AREA_ITEM_MAX_LEVEL: i64 = 15;
/// Levels a MySEKAI doll can actually reach.
pub const DOLL_LEVELS: [i64; 7] = [0, 1, 3, 6, 10, 15, 20];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardInput {
    pub id: u32,
    pub base_power: i64,
    pub rarity: u8,
    pub has_canvas: bool,
    pub group_item_level: i64,
    pub personal_item_level: i64,
    pub plant_level: i64,
    pub character_rank: i64,
    pub doll_level: i64,
    pub gate_level: i64,
    pub is_same_unit: bool,
    pub is_same_attribute: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResult {
    pub id: u32,
    pub enhanced_power: i64,
    pub area_bonus: i64,
    pub cr_bonus: i64,
    pub doll_bonus: i64,
    pub gate_bonus: i64,
    pub total_power: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckResult {
    pub cards: Vec<CardResult>,
    pub subtotal: i64,
    pub title_bonus: i64,
    pub total_power: i64,
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn per_mille(power: i64, level: i64) -> i64 {
    (power as f64 * 0.001 * level as f64).floor() as i64
}

pub fn area_multiplier(card: &CardInput) -> f64 {
    let group = card.group_item_level as f64 * 0.5 * (1.0 + flag(card.is_same_unit));
    let personal = card.personal_item_level as f64 * 2.0;
    let plant = card.plant_level as f64 * 0.5 * (1.0 + flag(card.is_same_attribute));
    group + personal + plant
}

pub fn calculate_card_power(card: &CardInput) -> CardResult {
    let enhanced_power = card.base_power + if card.has_canvas { CANVAS_BONUS } else { 0 };

    let area_bonus = (enhanced_power as f64 * 0.01 * area_multiplier(card)).floor() as i64;
    let cr_bonus = per_mille(enhanced_power, card.character_rank.min(CHARACTER_RANK_CAP));
    let doll_bonus = per_mille(enhanced_power, card.doll_level);
    let gate_bonus = per_mille(enhanced_power, card.gate_level);

    CardResult {
        id: card.id,
        enhanced_power,
        area_bonus,
        cr_bonus,
        doll_bonus,
        gate_bonus,
        total_power: enhanced_power + area_bonus + cr_bonus + doll_bonus + gate_bonus,
    }
}

pub fn calculate_deck_power(cards: &[CardInput], title_count: i64) -> DeckResult {
    let cards: Vec<CardResult> = cards.iter().map(calculate_card_power).collect();
    let subtotal = cards.iter().map(|c| c.total_power).sum::<i64>();
    let title_bonus = title_count * TITLE_BONUS_PER_TITLE;

    DeckResult {
        cards,
        subtotal,
        title_bonus,
        total_power: subtotal + title_bonus,
    }
}

/// Energy drinks restore 10 (large) or 1 (small) stamina.
pub const LARGE_DRINK_STAMINA: i64 = 10;
pub const SMALL_DRINK_STAMINA: i64 = 1;
/// Natural regeneration: one stamina every five minutes.
pub const MINUTES_PER_NATURAL_STAMINA: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaminaPlan {
    pub total_stamina: i64,
    pub large_items: i64,
    pub small_items: i64,
    pub natural_recovery: i64,
    pub remaining_hours: f64,
}

pub fn calculate_stamina_plan(
    games_needed: i64,
    stamina_per_game: i64,
    remaining_hours: f64,
    current_stamina: i64,
    prioritize_large: bool,
) -> StaminaPlan {
    let total_stamina = games_needed * stamina_per_game - current_stamina;
    let natural_recovery = (remaining_hours * 60.0 / MINUTES_PER_NATURAL_STAMINA).floor() as i64;
    let stamina_needed = (total_stamina - natural_recovery).max(0);

    let (large_items, small_items) = if prioritize_large {
        (
            stamina_needed / LARGE_DRINK_STAMINA,
            stamina_needed % LARGE_DRINK_STAMINA,
        )
    } else {
        (0, stamina_needed / SMALL_DRINK_STAMINA)
    };

    StaminaPlan {
        total_stamina,
        large_items,
        small_items,
        natural_recovery,
        remaining_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maxed() -> CardInput {
        CardInput {
            base_power: 35000,
            rarity: 4,
            has_canvas: true,
            group_item_level: 15,
            personal_item_level: 15,
            plant_level: 15,
            character_rank: 50,
            doll_level: 20,
            gate_level: 30,
            is_same_unit: true,
            is_same_attribute: true,
            ..Default::default()
        }
    }

    #[test]
    fn area_multiplier_doubles_matching_items() {
        assert_eq!(area_multiplier(&maxed()), 60.0);
        let off = CardInput {
            is_same_unit: false,
            is_same_attribute: false,
            ..maxed()
        };
        assert_eq!(area_multiplier(&off), 7.5 + 30.0 + 7.5);
    }

    #[test]
    fn canvas_adds_flat_bonus() {
        let card = CardInput {
            base_power: 1000,
            has_canvas: true,
            ..Default::default()
        };
        let r = calculate_card_power(&card);
        assert_eq!(r.enhanced_power, 2500);
        assert_eq!(r.total_power, 2500);
    }

    #[test]
    fn stamina_plan_prefers_large_drinks() {
        // 100 games × 10 stamina - 50 on hand - 24 regenerated over 2h
        let plan = calculate_stamina_plan(100, 10, 2.0, 50, true);
        assert_eq!(plan.total_stamina, 950);
        assert_eq!(plan.natural_recovery, 24);
        assert_eq!(plan.large_items, 92);
        assert_eq!(plan.small_items, 6);

        let plan = calculate_stamina_plan(100, 10, 2.0, 50, false);
        assert_eq!(plan.large_items, 0);
        assert_eq!(plan.small_items, 926);
    }

    #[test]
    fn stamina_plan_never_negative() {
        let plan = calculate_stamina_plan(1, 10, 100.0, 0, true);
        assert_eq!(plan.large_items, 0);
        assert_eq!(plan.small_items, 0);
    }
}
