//! Gacha pull simulation.
//!
//! Rarity is drawn from cumulative thresholds (★4 3%, ★3 8.5%, ★2 the rest).
//! In a 10-pull the last slot is restricted to ★3/★4 when the first nine
//! produced nothing above ★2. Cards are then picked uniformly within the tier.

use models::{Card, CardRarityType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TEN_PULL: usize = 10;
pub const SINGLE_PULL_CRYSTALS: u64 = 300;
pub const TEN_PULL_CRYSTALS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityRates {
    pub star4: f64,
    pub star3: f64,
    pub star2: f64,
}

impl Default for RarityRates {
    fn default() -> Self {
        Self {
            star4: 0.03,
            star3: 0.085,
            star2: 0.885,
        }
    }
}

impl RarityRates {
    pub fn roll(&self, rng: &mut impl Rng) -> CardRarityType {
        let r: f64 = rng.gen();
        if r < self.star4 {
            CardRarityType::Rarity4
        } else if r < self.star4 + self.star3 {
            CardRarityType::Rarity3
        } else {
            CardRarityType::Rarity2
        }
    }

    /// Guaranteed slot: ★4 at its normal rate, ★3 otherwise.
    pub fn roll_guaranteed(&self, rng: &mut impl Rng) -> CardRarityType {
        let r: f64 = rng.gen();
        if r < self.star4 {
            CardRarityType::Rarity4
        } else {
            CardRarityType::Rarity3
        }
    }
}

/// Pullable cards split by rarity tier.
#[derive(Debug, Clone, Default)]
pub struct GachaPool<'a> {
    star4: Vec<&'a Card>,
    star3: Vec<&'a Card>,
    star2: Vec<&'a Card>,
}

impl<'a> GachaPool<'a> {
    pub fn from_cards(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut pool = Self::default();
        for card in cards {
            match card.card_rarity_type {
                CardRarityType::Rarity4 => pool.star4.push(card),
                CardRarityType::Rarity3 => pool.star3.push(card),
                CardRarityType::Rarity2 => pool.star2.push(card),
                CardRarityType::Rarity1 | CardRarityType::Birthday => {}
            }
        }
        pool
    }

    pub fn is_empty(&self) -> bool {
        self.star4.is_empty() && self.star3.is_empty() && self.star2.is_empty()
    }

    pub fn tier(&self, rarity: CardRarityType) -> &[&'a Card] {
        match rarity {
            CardRarityType::Rarity4 => &self.star4,
            CardRarityType::Rarity3 => &self.star3,
            CardRarityType::Rarity2 => &self.star2,
            CardRarityType::Rarity1 | CardRarityType::Birthday => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GachaPull<'a> {
    pub rarity: CardRarityType,
    /// `None` when the pool has no card of the drawn rarity.
    pub card: Option<&'a Card>,
}

fn pick<'a>(pool: &GachaPool<'a>, rarity: CardRarityType, rng: &mut impl Rng) -> GachaPull<'a> {
    GachaPull {
        rarity,
        card: pool.tier(rarity).choose(rng).copied(),
    }
}

pub fn pull_single<'a>(
    pool: &GachaPool<'a>,
    rates: &RarityRates,
    rng: &mut impl Rng,
) -> GachaPull<'a> {
    let rarity = rates.roll(rng);
    pick(pool, rarity, rng)
}

/// `count` pulls, sorted ★4 first. A 10-pull always contains a ★3 or better.
pub fn pull<'a>(
    pool: &GachaPool<'a>,
    count: usize,
    rates: &RarityRates,
    rng: &mut impl Rng,
) -> Vec<GachaPull<'a>> {
    let mut results: Vec<GachaPull<'a>> = Vec::with_capacity(count);

    for i in 0..count {
        let guarantee = count == TEN_PULL
            && i == TEN_PULL - 1
            && results.iter().all(|p| !p.rarity.is_three_star_or_higher());

        let rarity = if guarantee {
            rates.roll_guaranteed(rng)
        } else {
            rates.roll(rng)
        };
        results.push(pick(pool, rarity, rng));
    }

    results.sort_by_key(|p| p.rarity.display_order());
    results
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GachaStats {
    pub total_pulls: u64,
    pub star4_count: u64,
    pub star3_count: u64,
    pub crystals_spent: u64,
}

impl GachaStats {
    /// Count one batch; a full 10-pull is charged at the 10-pull price.
    pub fn record(&mut self, pulls: &[GachaPull<'_>]) {
        self.total_pulls += pulls.len() as u64;
        self.crystals_spent += if pulls.len() == TEN_PULL {
            TEN_PULL_CRYSTALS
        } else {
            SINGLE_PULL_CRYSTALS * pulls.len() as u64
        };
        for p in pulls {
            match p.rarity {
                CardRarityType::Rarity4 => self.star4_count += 1,
                CardRarityType::Rarity3 => self.star3_count += 1,
                _ => {}
            }
        }
    }

    pub fn star4_rate(&self) -> f64 {
        if self.total_pulls == 0 {
            0.0
        } else {
            self.star4_count as f64 / self.total_pulls as f64
        }
    }
}
