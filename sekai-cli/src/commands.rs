use std::path::Path;

use eyre::{eyre, WrapErr};
use models::{unit_of, CharacterId, EventAnalysis, ScoreControlData, Unit};
use rand::Rng;
use sekai_calc::deck::{analyze_power_breakdown, calculate_full_deck_power, FullPowerParams};
use sekai_calc::format::{format_number, format_percentage, format_score, format_time};
use sekai_calc::gacha::{self, GachaPool, GachaStats, RarityRates};
use sekai_calc::power::{calculate_stamina_plan, CardInput, AREA_ITEM_MAX_LEVEL, DOLL_LEVELS};
use sekai_calc::progression::{
    calculate_bond_progress, calculate_cr_progress, character_bond_pairs,
    estimate_level_up_speed,
};
use sekai_calc::ranking::{calculate_ranking_plan, predict_border, RankingPlanInput};
use sekai_calc::score_control::{
    boost_comparison, calculate_game_plan, control_suggestions, cross_check_pt,
    find_optimal_score, lookup_required_score,
};
use sekai_calc::{calculate_card_power, calculate_deck_power, calculate_required_score, BoostMultiplier};
use sekai_master_data::{load_deck_setup, load_score_control, read_json, MasterData};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::Command;
use crate::config::AppConfig;

pub fn parse_boost(value: u8) -> eyre::Result<BoostMultiplier> {
    BoostMultiplier::try_from(value).map_err(|e| eyre!(e))
}

/// Reject levels the game cannot produce; the engines themselves accept anything.
pub fn validate_card_input(card: &CardInput) -> eyre::Result<()> {
    for (name, level) in [
        ("group item", card.group_item_level),
        ("personal item", card.personal_item_level),
        ("plant", card.plant_level),
    ] {
        if !(0..=AREA_ITEM_MAX_LEVEL).contains(&level) {
            return Err(eyre!(
                "{name} level must be 0..={AREA_ITEM_MAX_LEVEL}, got {level}"
            ));
        }
    }
    if !DOLL_LEVELS.contains(&card.doll_level) {
        return Err(eyre!(
            "doll level must be one of {DOLL_LEVELS:?}, got {}",
            card.doll_level
        ));
    }
    Ok(())
}

fn unit_summary(unit: Unit) -> Value {
    let members: Vec<CharacterId> = unit.members().collect();
    json!({
        "code": unit.as_str(),
        "name": unit.display_name(),
        "members": members,
    })
}

fn score_control_table(config: &AppConfig) -> eyre::Result<Option<ScoreControlData>> {
    load_score_control(&config.score_control_path).wrap_err("load score control table")
}

fn require_score_control_table(config: &AppConfig) -> eyre::Result<ScoreControlData> {
    score_control_table(config)?.ok_or_else(|| {
        eyre!(
            "score control table not found: {}",
            config.score_control_path.display()
        )
    })
}

fn to_value<T: Serialize>(value: &T) -> eyre::Result<Value> {
    serde_json::to_value(value).wrap_err("serialize result")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PulledCard {
    rarity: &'static str,
    rarity_type: &'static str,
    card_id: Option<u32>,
    prefix: Option<String>,
}

/// Run `batches` gacha simulations of `count` pulls over the master data pool.
pub fn simulate_gacha(
    data: &MasterData,
    count: usize,
    batches: usize,
    rng: &mut impl Rng,
) -> eyre::Result<Value> {
    let pool = GachaPool::from_cards(&data.cards);
    let rates = RarityRates::default();
    let mut stats = GachaStats::default();
    let mut last = Vec::new();

    for _ in 0..batches {
        let pulls = gacha::pull(&pool, count, &rates, rng);
        stats.record(&pulls);
        last = pulls;
    }

    let last: Vec<PulledCard> = last
        .iter()
        .map(|p| PulledCard {
            rarity: p.rarity.stars_label(),
            rarity_type: p.rarity.as_str(),
            card_id: p.card.map(|c| c.id),
            prefix: p.card.map(|c| c.prefix.clone()),
        })
        .collect();

    Ok(json!({
        "stats": to_value(&stats)?,
        "star4Rate": format_percentage(stats.star4_rate() * 100.0, 2),
        "crystalsSpent": format_number(stats.crystals_spent as i64),
        "lastPulls": to_value(&last)?,
    }))
}

fn full_deck(config: &AppConfig, file: &Path) -> eyre::Result<Value> {
    let data = MasterData::load_from_dir(&config.data_dir).wrap_err("load master data")?;
    let setup = load_deck_setup(file).wrap_err("load deck setup")?;
    let deck = data.resolve_deck(&setup.cards).wrap_err("resolve deck")?;

    let params = FullPowerParams {
        deck: &deck,
        area_item_levels: &data.area_item_levels,
        character_ranks: &setup.character_ranks,
        mysekai_gate_level: setup.mysekai_gate_level,
        mysekai_doll_levels: &setup.mysekai_doll_levels,
        gate_bonuses: &data.gate_bonuses,
        doll_bonuses: &data.doll_bonuses,
        canvas_bonuses: &data.canvas_bonuses,
        team_unit: setup.team_unit,
        team_attribute: setup.team_attribute,
    };
    let calc = calculate_full_deck_power(&params);
    info!(total_power = calc.total_power, "full deck power calculated");

    Ok(json!({
        "team": unit_summary(setup.team_unit),
        "teamAttribute": setup.team_attribute.map(|a| a.as_str()),
        "allMatch": params.is_all_match(),
        "power": to_value(&calc)?,
        "breakdown": to_value(&analyze_power_breakdown(&calc))?,
        "totalPower": format_number(calc.total_power),
    }))
}

pub fn run(command: Command, config: &AppConfig) -> eyre::Result<Value> {
    match command {
        Command::Power {
            base_power,
            canvas,
            group_item_level,
            personal_item_level,
            plant_level,
            character_rank,
            doll_level,
            gate_level,
            same_unit,
            same_attribute,
        } => {
            let card = CardInput {
                base_power,
                has_canvas: canvas,
                group_item_level,
                personal_item_level,
                plant_level,
                character_rank,
                doll_level,
                gate_level,
                is_same_unit: same_unit,
                is_same_attribute: same_attribute,
                ..CardInput::default()
            };
            validate_card_input(&card)?;
            to_value(&calculate_card_power(&card))
        }
        Command::Deck { file, titles } => {
            let cards: Vec<CardInput> = read_json(&file)?
                .ok_or_else(|| eyre!("deck file not found: {}", file.display()))?;
            for card in &cards {
                validate_card_input(card).wrap_err_with(|| format!("card {}", card.id))?;
            }
            to_value(&calculate_deck_power(&cards, titles))
        }
        Command::Pt { score, bonus } => {
            let table = score_control_table(config)?;
            let check = cross_check_pt(table.as_ref(), score, bonus);
            Ok(json!({
                "result": to_value(&check.formula)?,
                "tablePT": check.table_pt,
                "tableDisagrees": check.disagrees(),
            }))
        }
        Command::RequiredScore { target_pt, bonus } => {
            let table = score_control_table(config)?;
            let matches = table
                .as_ref()
                .map(|t| lookup_required_score(t, target_pt, bonus))
                .unwrap_or_default();
            Ok(json!({
                "formula": to_value(&calculate_required_score(target_pt, bonus))?,
                "tableMatches": to_value(&matches)?,
            }))
        }
        Command::Control {
            target_pt,
            bonus,
            mode,
        } => {
            let table = require_score_control_table(config)?;
            to_value(&control_suggestions(&table, target_pt, bonus, mode))
        }
        Command::Plan {
            target_pt,
            current_pt,
            score,
            bonus,
            boost,
            remaining_hours,
            current_stamina,
            small_drinks,
            optimal,
            max_games,
        } => {
            let boost = parse_boost(boost)?;
            let plan = calculate_game_plan(target_pt, current_pt, score, bonus, boost);
            let final_pt = plan.pt_per_game / boost.factor();
            let boosts = boost_comparison(final_pt, plan.remaining);

            let stamina = remaining_hours.map(|hours| {
                calculate_stamina_plan(
                    plan.games_needed,
                    boost.stamina_cost(),
                    hours,
                    current_stamina,
                    !small_drinks,
                )
            });

            let optimal_scores = if optimal {
                let table = require_score_control_table(config)?;
                Some(find_optimal_score(
                    &table, target_pt, current_pt, bonus, boost, max_games,
                ))
            } else {
                None
            };

            Ok(json!({
                "plan": to_value(&plan)?,
                "boosts": to_value(&boosts)?,
                "stamina": to_value(&stamina)?,
                "optimalScores": to_value(&optimal_scores)?,
            }))
        }
        Command::Bond {
            current_level,
            current_exp,
            target_level,
            exp_per_play,
            character,
        } => {
            let progress =
                calculate_bond_progress(current_level, current_exp, target_level, exp_per_play);
            let pairs = character.map(character_bond_pairs);
            let unit = character.and_then(unit_of).map(unit_summary);
            Ok(json!({
                "progress": to_value(&progress)?,
                "estimatedTime": format_time(progress.estimated_hours),
                "unit": unit,
                "pairs": to_value(&pairs)?,
            }))
        }
        Command::Cr {
            current_level,
            current_exp,
            target_level,
            exp_per_play,
        } => to_value(&calculate_cr_progress(
            current_level,
            current_exp,
            target_level,
            exp_per_play,
        )),
        Command::LevelSpeed {
            current_level,
            target_level,
            daily_hours,
            minutes_per_play,
        } => to_value(&estimate_level_up_speed(
            current_level,
            target_level,
            daily_hours,
            minutes_per_play,
        )),
        Command::Border {
            rank,
            current_score,
            elapsed_hours,
            total_hours,
            history,
        } => {
            let history: Vec<EventAnalysis> = match history {
                Some(path) => read_json(&path)?
                    .ok_or_else(|| eyre!("history file not found: {}", path.display()))?,
                None => Vec::new(),
            };
            let prediction =
                predict_border(rank, current_score, elapsed_hours, total_hours, &history);
            Ok(json!({
                "prediction": to_value(&prediction)?,
                "predictedFinal": format_score(prediction.predicted_final),
            }))
        }
        Command::RankingPlan {
            target_score,
            current_score,
            remaining_hours,
            score_per_game,
            game_minutes,
            boost,
            current_stamina,
            max_stamina,
        } => {
            let plan = calculate_ranking_plan(&RankingPlanInput {
                target_score,
                current_score,
                remaining_hours,
                score_per_game,
                game_minutes,
                boost: parse_boost(boost)?,
                current_stamina,
                max_stamina,
            });
            Ok(json!({
                "plan": to_value(&plan)?,
                "scoreGap": format_number(plan.score_gap),
                "scorePerHour": format_score(plan.efficiency.score_per_hour as i64),
                "hoursPerDay": format_time(plan.hours_per_day),
            }))
        }
        Command::Gacha { count, batches } => {
            let data = MasterData::load_from_dir(&config.data_dir).wrap_err("load master data")?;
            simulate_gacha(&data, count, batches, &mut rand::thread_rng())
        }
        Command::FullDeck { file } => full_deck(config, &file),
    }
}
