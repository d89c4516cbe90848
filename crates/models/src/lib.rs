use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod roster;

pub use roster::{unit_of, CharacterId, CHARACTER_COUNT};

pub const MAX_DECK_SIZE: usize = 5;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
pub enum Unit {
    #[serde(rename = "ln", alias = "light_sound")]
    #[strum(to_string = "ln", serialize = "light_sound")]
    LeoNeed,
    #[serde(rename = "mmj", alias = "idol")]
    #[strum(to_string = "mmj", serialize = "idol")]
    MoreMoreJump,
    #[serde(rename = "vbs", alias = "street")]
    #[strum(to_string = "vbs", serialize = "street")]
    VividBadSquad,
    #[serde(rename = "wxs", alias = "theme_park")]
    #[strum(to_string = "wxs", serialize = "theme_park")]
    WonderlandsShowtime,
    #[serde(rename = "niigo", alias = "school_refusal")]
    #[strum(to_string = "niigo", serialize = "school_refusal")]
    NightCord,
    #[serde(rename = "vs", alias = "piapro")]
    #[strum(to_string = "vs", serialize = "piapro")]
    VirtualSinger,
}

impl Unit {
    pub const ALL: [Unit; 6] = [
        Self::LeoNeed,
        Self::MoreMoreJump,
        Self::VividBadSquad,
        Self::WonderlandsShowtime,
        Self::NightCord,
        Self::VirtualSinger,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeoNeed => "ln",
            Self::MoreMoreJump => "mmj",
            Self::VividBadSquad => "vbs",
            Self::WonderlandsShowtime => "wxs",
            Self::NightCord => "niigo",
            Self::VirtualSinger => "vs",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LeoNeed => "Leo/need",
            Self::MoreMoreJump => "MORE MORE JUMP!",
            Self::VividBadSquad => "Vivid BAD SQUAD",
            Self::WonderlandsShowtime => "Wonderlands×Showtime",
            Self::NightCord => "25-ji, Nightcord de.",
            Self::VirtualSinger => "VIRTUAL SINGER",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Attribute {
    Cute,
    Cool,
    Pure,
    Happy,
    Mysterious,
}

impl Attribute {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cute => "cute",
            Self::Cool => "cool",
            Self::Pure => "pure",
            Self::Happy => "happy",
            Self::Mysterious => "mysterious",
        }
    }
}

/// Unit scope of an area item level. Master data spells the wildcard as
/// either `all` or `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitTarget {
    #[serde(rename = "all", alias = "any")]
    All,
    #[serde(rename = "none")]
    Nobody,
    #[serde(untagged)]
    Only(Unit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeTarget {
    #[serde(rename = "all", alias = "any")]
    All,
    #[serde(untagged)]
    Only(Attribute),
}

impl AttributeTarget {
    pub fn matches(self, attr: Attribute) -> bool {
        match self {
            Self::All => true,
            Self::Only(a) => a == attr,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
pub enum CardRarityType {
    #[serde(rename = "rarity_1")]
    #[strum(serialize = "rarity_1")]
    Rarity1,
    #[serde(rename = "rarity_2")]
    #[strum(serialize = "rarity_2")]
    Rarity2,
    #[serde(rename = "rarity_3")]
    #[strum(serialize = "rarity_3")]
    Rarity3,
    #[serde(rename = "rarity_4")]
    #[strum(serialize = "rarity_4")]
    Rarity4,
    #[serde(rename = "rarity_birthday")]
    #[strum(serialize = "rarity_birthday")]
    Birthday,
}

impl CardRarityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rarity1 => "rarity_1",
            Self::Rarity2 => "rarity_2",
            Self::Rarity3 => "rarity_3",
            Self::Rarity4 => "rarity_4",
            Self::Birthday => "rarity_birthday",
        }
    }

    pub const fn stars_label(self) -> &'static str {
        match self {
            Self::Rarity1 => "★1",
            Self::Rarity2 => "★2",
            Self::Rarity3 => "★3",
            Self::Rarity4 => "★4",
            Self::Birthday => "★BD",
        }
    }

    pub const fn max_level(self) -> u32 {
        match self {
            Self::Rarity1 => 20,
            Self::Rarity2 => 30,
            Self::Rarity3 => 50,
            Self::Rarity4 | Self::Birthday => 60,
        }
    }

    /// Ordering used when presenting pulls: ★4 first, then birthday, ★3, ★2, ★1.
    pub const fn display_order(self) -> u8 {
        match self {
            Self::Rarity4 => 0,
            Self::Birthday => 1,
            Self::Rarity3 => 2,
            Self::Rarity2 => 3,
            Self::Rarity1 => 4,
        }
    }

    pub const fn is_three_star_or_higher(self) -> bool {
        matches!(self, Self::Rarity3 | Self::Rarity4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardParameterType {
    Param1,
    Param2,
    Param3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameter {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub card_id: u32,
    pub card_level: u32,
    pub card_parameter_type: CardParameterType,
    pub power: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub character_id: CharacterId,
    pub card_rarity_type: CardRarityType,
    pub attr: Attribute,
    #[serde(default)]
    pub special_training_power1_bonus_fixed: i64,
    #[serde(default)]
    pub special_training_power2_bonus_fixed: i64,
    #[serde(default)]
    pub special_training_power3_bonus_fixed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_unit: Option<String>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub card_parameters: Vec<CardParameter>,
}

impl Card {
    /// Power component at the given level, `0` when the level is not listed.
    pub fn parameter(&self, level: u32, kind: CardParameterType) -> i64 {
        self.card_parameters
            .iter()
            .find(|p| p.card_level == level && p.card_parameter_type == kind)
            .map(|p| p.power)
            .unwrap_or(0)
    }

    pub fn special_training_bonus(&self) -> i64 {
        self.special_training_power1_bonus_fixed
            + self.special_training_power2_bonus_fixed
            + self.special_training_power3_bonus_fixed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRarity {
    pub card_rarity_type: CardRarityType,
    pub max_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_max_level: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaItemLevel {
    #[serde(default)]
    pub area_item_id: u32,
    pub level: u32,
    pub target_unit: UnitTarget,
    pub target_card_attr: AttributeTarget,
    #[serde(default)]
    pub power1_bonus_rate: f64,
    #[serde(default)]
    pub power1_all_match_bonus_rate: f64,
    #[serde(default)]
    pub power2_bonus_rate: f64,
    #[serde(default)]
    pub power2_all_match_bonus_rate: f64,
    #[serde(default)]
    pub power3_bonus_rate: f64,
    #[serde(default)]
    pub power3_all_match_bonus_rate: f64,
}

impl AreaItemLevel {
    pub fn bonus_rate(&self, all_match: bool) -> f64 {
        if all_match {
            self.power1_all_match_bonus_rate
                + self.power2_all_match_bonus_rate
                + self.power3_all_match_bonus_rate
        } else {
            self.power1_bonus_rate + self.power2_bonus_rate + self.power3_bonus_rate
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBonus {
    pub card_id: u32,
    #[serde(default)]
    pub power1_bonus_fixed: i64,
    #[serde(default)]
    pub power2_bonus_fixed: i64,
    #[serde(default)]
    pub power3_bonus_fixed: i64,
}

impl CanvasBonus {
    pub fn total(&self) -> i64 {
        self.power1_bonus_fixed + self.power2_bonus_fixed + self.power3_bonus_fixed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysekaiGateBonus {
    pub level: u32,
    #[serde(default)]
    pub bonus_power: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysekaiDollBonus {
    pub character_id: CharacterId,
    pub level: u32,
    #[serde(default)]
    pub bonus_power: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    pub card: Card,
    pub level: u32,
    #[serde(default)]
    pub skill_level: u32,
    #[serde(default)]
    pub master_rank: u32,
    #[serde(default)]
    pub special_training: bool,
    #[serde(default)]
    pub frameless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub fn contains(&self, score: i64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Per-song PT table scraped from community data, indexed `[score row][bonus column]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreControlData {
    pub song_name: String,
    #[serde(default, rename = "songNameTW")]
    pub song_name_tw: String,
    pub mode: String,
    pub bonuses: Vec<f64>,
    pub score_ranges: Vec<ScoreRange>,
    pub pt_table: Vec<Vec<i64>>,
}

/// One leaderboard snapshot: rank -> score at `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventScoreSample {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub scores: BTreeMap<u32, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventScoreCurvePoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Hours since the event started.
    pub hours: f64,
    pub scores: BTreeMap<u32, i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakSpeed {
    pub hour: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalysis {
    pub event_id: u32,
    pub event_name: String,
    /// Event length in hours.
    pub duration: f64,
    pub final_scores: BTreeMap<u32, i64>,
    pub score_curve: Vec<EventScoreCurvePoint>,
    pub average_speed: BTreeMap<u32, f64>,
    pub peak_speed: BTreeMap<u32, PeakSpeed>,
    #[serde(default)]
    pub predictions: BTreeMap<u32, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDifficulty {
    pub difficulty: String,
    pub level: u32,
    pub note_count: u32,
    pub play_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongData {
    pub id: u32,
    pub title: String,
    pub difficulties: Vec<SongDifficulty>,
}
