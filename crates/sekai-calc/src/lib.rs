//! Game-mechanics calculators for Project SEKAI: deck power, score control
//! PT, bond / character rank progression, border prediction and gacha.
//!
//! Everything here is a pure function over caller-supplied records. Missing
//! table entries contribute `0` instead of failing.

pub mod deck;
pub mod format;
pub mod gacha;
pub mod power;
pub mod progression;
pub mod ranking;
pub mod score_control;
pub mod tables;

pub use deck::{calculate_full_deck_power, FullPowerParams, PowerCalculation};
pub use power::{calculate_card_power, calculate_deck_power, CardInput, CardResult, DeckResult};
pub use score_control::{calculate_pt, calculate_required_score, BoostMultiplier, PtResult};
