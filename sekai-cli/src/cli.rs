use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sekai_calc::score_control::{ControlMode, DEFAULT_MAX_GAMES};

#[derive(Debug, Parser)]
#[command(name = "sekai")]
#[command(about = "Project SEKAI calculators: deck power, event PT, progression, borders, gacha")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Directory with downloaded master data JSON (default: $SEKAI_DATA_DIR or data)"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Score control table JSON (default: $SEKAI_SCORE_CONTROL or data/score-control-data.json)"
    )]
    pub score_control: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Power of a single card in the simplified model")]
    Power {
        #[arg(long, help = "Card power before bonuses")]
        base_power: i64,
        #[arg(long, help = "Card has its MySEKAI canvas (+1500)")]
        canvas: bool,
        #[arg(long, default_value_t = 0)]
        group_item_level: i64,
        #[arg(long, default_value_t = 0)]
        personal_item_level: i64,
        #[arg(long, default_value_t = 0)]
        plant_level: i64,
        #[arg(long, default_value_t = 1)]
        character_rank: i64,
        #[arg(long, default_value_t = 0)]
        doll_level: i64,
        #[arg(long, default_value_t = 0)]
        gate_level: i64,
        #[arg(long)]
        same_unit: bool,
        #[arg(long)]
        same_attribute: bool,
    },
    #[command(about = "Deck power from a JSON array of card inputs")]
    Deck {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 0, help = "Number of owned titles")]
        titles: i64,
    },
    #[command(about = "Event PT for one play, checked against the score control table")]
    Pt {
        #[arg(long, default_value_t = 800_000)]
        score: i64,
        #[arg(long, default_value_t = 2.5, help = "Event bonus as a fraction (2.5 = +250%)")]
        bonus: f64,
    },
    #[command(about = "Lowest score that reaches a PT target")]
    RequiredScore {
        #[arg(long)]
        target_pt: i64,
        #[arg(long, default_value_t = 2.5)]
        bonus: f64,
    },
    #[command(about = "Score ranges that land on a single-play PT target")]
    Control {
        #[arg(long)]
        target_pt: i64,
        #[arg(long, default_value_t = 2.5)]
        bonus: f64,
        #[arg(long, default_value = "exact", help = "exact or range (within 10 PT)")]
        mode: ControlMode,
    },
    #[command(about = "Plays, boosts and stamina to reach a total PT")]
    Plan {
        #[arg(long)]
        target_pt: i64,
        #[arg(long, default_value_t = 0)]
        current_pt: i64,
        #[arg(long, default_value_t = 800_000)]
        score: i64,
        #[arg(long, default_value_t = 2.5)]
        bonus: f64,
        #[arg(long, default_value_t = 1, help = "Boost multiplier: 1, 2 or 3")]
        boost: u8,
        #[arg(long, help = "Hours left in the event, adds a stamina plan")]
        remaining_hours: Option<f64>,
        #[arg(long, default_value_t = 0)]
        current_stamina: i64,
        #[arg(long, help = "Use only small drinks in the stamina plan")]
        small_drinks: bool,
        #[arg(long, help = "Also list table scores sorted by plays needed")]
        optimal: bool,
        #[arg(long, default_value_t = DEFAULT_MAX_GAMES)]
        max_games: i64,
    },
    #[command(about = "Bond experience and rewards between two levels")]
    Bond {
        #[arg(long)]
        current_level: u32,
        #[arg(long, default_value_t = 0)]
        current_exp: i64,
        #[arg(long)]
        target_level: u32,
        #[arg(long, default_value_t = sekai_calc::progression::DEFAULT_BOND_EXP_PER_PLAY)]
        exp_per_play: i64,
        #[arg(long, help = "Also list every bond pair containing this character")]
        character: Option<u32>,
    },
    #[command(about = "Character rank experience and power gain")]
    Cr {
        #[arg(long)]
        current_level: u32,
        #[arg(long, default_value_t = 0)]
        current_exp: i64,
        #[arg(long)]
        target_level: u32,
        #[arg(long, default_value_t = sekai_calc::progression::DEFAULT_RANK_EXP_PER_PLAY)]
        exp_per_play: i64,
    },
    #[command(about = "Days and weeks to raise a character rank")]
    LevelSpeed {
        #[arg(long)]
        current_level: u32,
        #[arg(long)]
        target_level: u32,
        #[arg(long, default_value_t = sekai_calc::progression::DEFAULT_DAILY_PLAY_HOURS)]
        daily_hours: f64,
        #[arg(long, default_value_t = sekai_calc::progression::DEFAULT_MINUTES_PER_PLAY)]
        minutes_per_play: f64,
    },
    #[command(about = "Predict the final border score of a rank")]
    Border {
        #[arg(long)]
        rank: u32,
        #[arg(long)]
        current_score: i64,
        #[arg(long)]
        elapsed_hours: f64,
        #[arg(long)]
        total_hours: f64,
        #[arg(long, value_name = "FILE", help = "JSON array of past event analyses")]
        history: Option<PathBuf>,
    },
    #[command(about = "Plays, drinks and crystals to reach a ranking score")]
    RankingPlan {
        #[arg(long)]
        target_score: i64,
        #[arg(long, default_value_t = 0)]
        current_score: i64,
        #[arg(long)]
        remaining_hours: f64,
        #[arg(long)]
        score_per_game: i64,
        #[arg(long, default_value_t = 2.5)]
        game_minutes: f64,
        #[arg(long, default_value_t = 1)]
        boost: u8,
        #[arg(long, default_value_t = 0)]
        current_stamina: i64,
        #[arg(long, default_value_t = 10)]
        max_stamina: i64,
    },
    #[command(about = "Simulate gacha pulls over the master data card pool")]
    Gacha {
        #[arg(long, default_value_t = 10, help = "Pulls per batch; 10 enables the ★3 guarantee")]
        count: usize,
        #[arg(long, default_value_t = 1)]
        batches: usize,
    },
    #[command(about = "Deck power from master data rules and a deck setup file")]
    FullDeck {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
