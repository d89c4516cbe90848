//! Local master-data loader.
//!
//! Reads already-downloaded master-data JSON from a directory into the
//! `models` records. A missing file is non-fatal and yields an empty
//! collection; a file that exists but does not parse is an error.

use eyre::{eyre, WrapErr};
use models::{
    AreaItemLevel, Attribute, CanvasBonus, Card, CardRarity, CharacterId, DeckCard,
    MysekaiDollBonus, MysekaiGateBonus, ScoreControlData, Unit, MAX_DECK_SIZE,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

pub const CARDS_FILE: &str = "cards.json";
pub const CARD_RARITIES_FILE: &str = "cardRarities.json";
pub const AREA_ITEM_LEVELS_FILE: &str = "areaItemLevels.json";
pub const CANVAS_BONUSES_FILE: &str = "cardMysekaiCanvasBonuses.json";
pub const GATE_BONUSES_FILE: &str = "mysekaiGateBonuses.json";
pub const DOLL_BONUSES_FILE: &str = "mysekaiDollBonuses.json";

#[derive(Debug, Clone, Default)]
pub struct MasterData {
    pub cards: Vec<Card>,
    pub card_rarities: Vec<CardRarity>,
    pub area_item_levels: Vec<AreaItemLevel>,
    pub canvas_bonuses: Vec<CanvasBonus>,
    pub gate_bonuses: Vec<MysekaiGateBonus>,
    pub doll_bonuses: Vec<MysekaiDollBonus>,
    card_index: HashMap<u32, usize>,
}

/// Parse a JSON file, or `None` when it does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path).wrap_err_with(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .wrap_err_with(|| format!("parse {}", path.display()))?;
    Ok(Some(value))
}

fn read_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> eyre::Result<Vec<T>> {
    let path = dir.join(name);
    match read_json::<Vec<T>>(&path)? {
        Some(items) => {
            debug!("loaded {} records from {}", items.len(), path.display());
            Ok(items)
        }
        None => {
            warn!(
                "master data not found at {} (non-fatal); using an empty table",
                path.display()
            );
            Ok(Vec::new())
        }
    }
}

impl MasterData {
    pub fn load_from_dir(dir: &Path) -> eyre::Result<Self> {
        let data = Self {
            cards: read_collection(dir, CARDS_FILE)?,
            card_rarities: read_collection(dir, CARD_RARITIES_FILE)?,
            area_item_levels: read_collection(dir, AREA_ITEM_LEVELS_FILE)?,
            canvas_bonuses: read_collection(dir, CANVAS_BONUSES_FILE)?,
            gate_bonuses: read_collection(dir, GATE_BONUSES_FILE)?,
            doll_bonuses: read_collection(dir, DOLL_BONUSES_FILE)?,
            card_index: HashMap::new(),
        }
        .indexed();

        info!(
            cards = data.cards.len(),
            area_item_levels = data.area_item_levels.len(),
            "master data loaded from {}",
            dir.display()
        );
        Ok(data)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
        .indexed()
    }

    fn indexed(mut self) -> Self {
        self.card_index = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        self
    }

    pub fn card(&self, id: u32) -> Option<&Card> {
        self.card_index.get(&id).map(|&i| &self.cards[i])
    }

    /// Max level of a card, raised to the training cap once trained.
    pub fn max_level(&self, card: &Card, special_training: bool) -> u32 {
        let rarity = self
            .card_rarities
            .iter()
            .find(|r| r.card_rarity_type == card.card_rarity_type);

        match rarity {
            Some(r) if special_training => r.training_max_level.unwrap_or(r.max_level),
            Some(r) => r.max_level,
            None => card.card_rarity_type.max_level(),
        }
    }

    /// Join deck slots with their cards. Slots without a level use the max level.
    pub fn resolve_deck(&self, slots: &[DeckSlot]) -> eyre::Result<Vec<DeckCard>> {
        if slots.len() > MAX_DECK_SIZE {
            return Err(eyre!(
                "deck has {} cards, at most {MAX_DECK_SIZE} allowed",
                slots.len()
            ));
        }

        slots
            .iter()
            .map(|slot| {
                let card = self
                    .card(slot.card_id)
                    .ok_or_else(|| eyre!("unknown card id {}", slot.card_id))?;
                let level = slot
                    .level
                    .unwrap_or_else(|| self.max_level(card, slot.special_training));

                Ok(DeckCard {
                    card: card.clone(),
                    level,
                    skill_level: slot.skill_level,
                    master_rank: slot.master_rank,
                    special_training: slot.special_training,
                    frameless: slot.frameless,
                })
            })
            .collect()
    }
}

/// One deck position as written in a deck file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSlot {
    pub card_id: u32,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default = "default_skill_level")]
    pub skill_level: u32,
    #[serde(default)]
    pub master_rank: u32,
    #[serde(default)]
    pub special_training: bool,
    #[serde(default)]
    pub frameless: bool,
}

fn default_skill_level() -> u32 {
    1
}

/// A player's deck and account-wide progress, as read by `full-deck`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSetup {
    pub team_unit: Unit,
    #[serde(default)]
    pub team_attribute: Option<Attribute>,
    pub cards: Vec<DeckSlot>,
    #[serde(default)]
    pub character_ranks: HashMap<CharacterId, u32>,
    #[serde(default)]
    pub mysekai_gate_level: u32,
    #[serde(default)]
    pub mysekai_doll_levels: HashMap<CharacterId, u32>,
}

pub fn load_deck_setup(path: &Path) -> eyre::Result<DeckSetup> {
    read_json(path)?.ok_or_else(|| eyre!("deck file not found: {}", path.display()))
}

/// Precomputed score-control table; `None` when the file is absent.
pub fn load_score_control(path: &Path) -> eyre::Result<Option<ScoreControlData>> {
    let data: Option<ScoreControlData> = read_json(path)?;
    match &data {
        Some(d) => debug!(
            bonuses = d.bonuses.len(),
            rows = d.score_ranges.len(),
            "score control table loaded from {}",
            path.display()
        ),
        None => warn!(
            "score control table not found at {} (non-fatal); table lookups disabled",
            path.display()
        ),
    }
    Ok(data)
}
