use sekai_calc::power::{calculate_card_power, calculate_deck_power, CardInput};

fn maxed_card() -> CardInput {
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
fn maxed_card_breakdown() {
    let r = calculate_card_power(&maxed_card());
    assert_eq!(r.enhanced_power, 36500);
    assert_eq!(r.area_bonus, 21900);
    assert_eq!(r.cr_bonus, 1825);
    assert_eq!(r.doll_bonus, 730);
    assert_eq!(r.gate_bonus, 1095);
    assert_eq!(r.total_power, 62050);
}

#[test]
fn character_rank_saturates_at_fifty() {
    let at_cap = calculate_card_power(&maxed_card());
    let over = calculate_card_power(&CardInput {
        character_rank: 999,
        ..maxed_card()
    });
    assert_eq!(at_cap.cr_bonus, over.cr_bonus);
    assert_eq!(at_cap.total_power, over.total_power);
}

#[test]
fn card_power_is_monotonic_in_each_input() {
    let base = CardInput {
        base_power: 28000,
        group_item_level: 5,
        personal_item_level: 5,
        plant_level: 5,
        character_rank: 20,
        doll_level: 3,
        gate_level: 10,
        ..Default::default()
    };

    type Bump = fn(&mut CardInput);
    let bumps: [Bump; 7] = [
        |c| c.base_power += 137,
        |c| c.group_item_level += 1,
        |c| c.personal_item_level += 1,
        |c| c.plant_level += 1,
        |c| c.character_rank += 1,
        |c| c.doll_level += 1,
        |c| c.gate_level += 1,
    ];

    for bump in bumps {
        let mut card = base.clone();
        let mut prev = calculate_card_power(&card).total_power;
        for _ in 0..40 {
            bump(&mut card);
            let next = calculate_card_power(&card).total_power;
            assert!(next >= prev, "power dropped: {prev} -> {next} for {card:?}");
            prev = next;
        }
    }
}

#[test]
fn empty_deck_is_title_bonus_only() {
    let deck = calculate_deck_power(&[], 7);
    assert!(deck.cards.is_empty());
    assert_eq!(deck.subtotal, 0);
    assert_eq!(deck.title_bonus, 70);
    assert_eq!(deck.total_power, 70);
}

#[test]
fn deck_sums_cards_and_titles() {
    let cards = vec![maxed_card(); 5];
    let deck = calculate_deck_power(&cards, 3);
    assert_eq!(deck.cards.len(), 5);
    assert_eq!(deck.subtotal, 62050 * 5);
    assert_eq!(deck.total_power, 62050 * 5 + 30);
}

#[test]
fn card_input_deserializes_from_camel_case() {
    let json = r#"{"basePower": 35000, "hasCanvas": true, "characterRank": 50, "isSameUnit": true}"#;
    let card: CardInput = serde_json::from_str(json).unwrap();
    assert_eq!(card.base_power, 35000);
    assert!(card.has_canvas);
    assert!(card.is_same_unit);
    assert_eq!(card.gate_level, 0);
}
