use std::fs;
use std::path::Path;

use models::{Attribute, Unit, UnitTarget};
use sekai_master_data::{
    load_deck_setup, load_score_control, MasterData, AREA_ITEM_LEVELS_FILE, CARDS_FILE,
    GATE_BONUSES_FILE,
};

const CARDS: &str = r#"[
  {
    "id": 101,
    "characterId": 17,
    "cardRarityType": "rarity_4",
    "attr": "mysterious",
    "specialTrainingPower1BonusFixed": 400,
    "specialTrainingPower2BonusFixed": 400,
    "specialTrainingPower3BonusFixed": 400,
    "prefix": "test card",
    "cardParameters": [
      {"cardLevel": 60, "cardParameterType": "param1", "power": 10000},
      {"cardLevel": 60, "cardParameterType": "param2", "power": 11000},
      {"cardLevel": 60, "cardParameterType": "param3", "power": 9000}
    ],
    "someUnusedField": true
  },
  {
    "id": 102,
    "characterId": 21,
    "cardRarityType": "rarity_2",
    "attr": "happy",
    "supportUnit": "school_refusal"
  }
]"#;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn missing_files_degrade_to_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    let data = MasterData::load_from_dir(dir.path()).unwrap();
    assert!(data.cards.is_empty());
    assert!(data.area_item_levels.is_empty());
    assert!(data.doll_bonuses.is_empty());
    assert!(data.card(1).is_none());
}

#[test]
fn loads_and_indexes_cards() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CARDS_FILE, CARDS);
    write(
        dir.path(),
        AREA_ITEM_LEVELS_FILE,
        r#"[{"areaItemId": 1, "level": 15, "targetUnit": "school_refusal",
             "targetCardAttr": "any", "power1BonusRate": 20.0}]"#,
    );
    write(
        dir.path(),
        GATE_BONUSES_FILE,
        r#"[{"level": 1, "bonusPower": 50}]"#,
    );

    let data = MasterData::load_from_dir(dir.path()).unwrap();
    assert_eq!(data.cards.len(), 2);

    let card = data.card(101).unwrap();
    assert_eq!(card.attr, Attribute::Mysterious);
    assert_eq!(card.card_parameters.len(), 3);
    assert_eq!(data.card(102).unwrap().support_unit.as_deref(), Some("school_refusal"));

    assert_eq!(
        data.area_item_levels[0].target_unit,
        UnitTarget::Only(Unit::NightCord)
    );
    assert_eq!(data.gate_bonuses[0].bonus_power, 50);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CARDS_FILE, "[{\"id\": ");

    let err = MasterData::load_from_dir(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains(CARDS_FILE));
}

#[test]
fn deck_setup_resolves_against_cards() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CARDS_FILE, CARDS);
    let deck_path = dir.path().join("deck.json");
    fs::write(
        &deck_path,
        r#"{
          "teamUnit": "niigo",
          "teamAttribute": "mysterious",
          "cards": [{"cardId": 101, "specialTraining": true, "masterRank": 2}],
          "characterRanks": {"17": 40},
          "mysekaiGateLevel": 1
        }"#,
    )
    .unwrap();

    let data = MasterData::load_from_dir(dir.path()).unwrap();
    let setup = load_deck_setup(&deck_path).unwrap();
    assert_eq!(setup.team_unit, Unit::NightCord);
    assert_eq!(setup.character_ranks.get(&17), Some(&40));
    assert!(setup.mysekai_doll_levels.is_empty());

    let deck = data.resolve_deck(&setup.cards).unwrap();
    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].level, 60);
    assert_eq!(deck[0].skill_level, 1);
    assert_eq!(deck[0].master_rank, 2);
    assert!(deck[0].special_training);

    assert!(load_deck_setup(&dir.path().join("nope.json")).is_err());
}

#[test]
fn score_control_table_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score-control-data.json");
    assert!(load_score_control(&path).unwrap().is_none());

    fs::write(
        &path,
        r#"{
          "songName": "Envy",
          "songNameTW": "Envy",
          "mode": "solo",
          "bonuses": [0.0, 2.5],
          "scoreRanges": [{"min": 0, "max": 19999}, {"min": 20000, "max": 39999}],
          "ptTable": [[100, 350], [101, 352]]
        }"#,
    )
    .unwrap();
    let data = load_score_control(&path).unwrap().unwrap();
    assert_eq!(data.song_name_tw, "Envy");
    assert_eq!(data.pt_table[1][1], 352);
}
