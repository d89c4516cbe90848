use std::sync::LazyLock;

pub const BOND_MAX_LEVEL: u32 = 200;
pub const CHARACTER_RANK_MAX_LEVEL: u32 = 200;
pub const CHARACTER_RANK_BONUS_MAX_LEVEL: u32 = 100;

/// Bond exp needed to clear `level`.
pub fn bond_exp_for_level(level: u32) -> i64 {
    match level {
        0..=10 => 100,
        11..=20 => 200,
        21..=30 => 300,
        31..=50 => 400,
        51..=70 => 500,
        71..=100 => 600,
        101..=130 => 700,
        131..=160 => 800,
        161..=200 => 900,
        _ => 1000,
    }
}

/// Character rank exp needed to clear `level`.
pub fn character_rank_exp_for_level(level: u32) -> i64 {
    match level {
        0..=10 => 100,
        11..=20 => 150,
        21..=30 => 200,
        31..=50 => 300,
        51..=70 => 400,
        71..=100 => 500,
        _ => 600,
    }
}

/// Cumulative power granted by a character rank.
pub fn character_rank_power(level: i64) -> i64 {
    if level <= 10 {
        (level - 1) * 10
    } else if level <= 20 {
        90 + (level - 10) * 20
    } else if level <= 30 {
        290 + (level - 20) * 30
    } else if level <= 50 {
        590 + (level - 30) * 40
    } else {
        1390 + (level - 50) * 50
    }
}

/// Per-level and cumulative experience for a progression track.
///
/// `total_exp(n)` is the experience accumulated on reaching level `n`, so
/// `total_exp(1) == 0`. Levels past the table keep accumulating at the rule's
/// value for the first level past the table; the rule must be constant from
/// there on.
#[derive(Debug, Clone)]
pub struct ExpTable {
    per_level: Vec<i64>,
    cumulative: Vec<i64>,
    rule: fn(u32) -> i64,
    tail_exp: i64,
}

impl ExpTable {
    pub fn build(max_level: u32, rule: fn(u32) -> i64) -> Self {
        let per_level: Vec<i64> = (1..=max_level).map(rule).collect();

        // cumulative[i] = total exp at level i + 1
        let mut cumulative = Vec::with_capacity(per_level.len() + 1);
        let mut total = 0;
        cumulative.push(total);
        for exp in &per_level {
            total += exp;
            cumulative.push(total);
        }

        Self {
            tail_exp: rule(max_level + 1),
            per_level,
            cumulative,
            rule,
        }
    }

    pub fn max_level(&self) -> u32 {
        self.per_level.len() as u32
    }

    pub fn exp_for_level(&self, level: u32) -> i64 {
        level
            .checked_sub(1)
            .and_then(|i| self.per_level.get(i as usize))
            .copied()
            .unwrap_or_else(|| (self.rule)(level))
    }

    pub fn total_exp(&self, level: u32) -> i64 {
        if level == 0 {
            return 0;
        }
        let idx = (level - 1) as usize;
        if let Some(total) = self.cumulative.get(idx) {
            return *total;
        }

        // cumulative ends at level max_level + 1
        let past_table = i64::from(level) - i64::from(self.max_level()) - 1;
        self.cumulative[self.cumulative.len() - 1] + past_table * self.tail_exp
    }

    /// Exp still needed to go from (`current_level`, `current_exp`) to `target_level`.
    pub fn required_exp(&self, current_level: u32, current_exp: i64, target_level: u32) -> i64 {
        if target_level <= current_level {
            return 0;
        }
        self.total_exp(target_level) - (self.total_exp(current_level) + current_exp)
    }
}

pub static BOND_EXP_TABLE: LazyLock<ExpTable> =
    LazyLock::new(|| ExpTable::build(BOND_MAX_LEVEL, bond_exp_for_level));

pub static CHARACTER_RANK_EXP_TABLE: LazyLock<ExpTable> =
    LazyLock::new(|| ExpTable::build(CHARACTER_RANK_MAX_LEVEL, character_rank_exp_for_level));

/// Character rank -> flat power bonus, ranks 1-100.
pub static CHARACTER_RANK_POWER_BONUS: LazyLock<Vec<i64>> = LazyLock::new(|| {
    (1..=CHARACTER_RANK_BONUS_MAX_LEVEL as i64)
        .map(character_rank_power)
        .collect()
});

/// Flat power bonus from the character rank table; ranks outside 1-100 give nothing.
pub fn character_rank_power_bonus(rank: u32) -> i64 {
    rank.checked_sub(1)
        .and_then(|i| CHARACTER_RANK_POWER_BONUS.get(i as usize))
        .copied()
        .unwrap_or(0)
}

/// Master rank (0-5) -> flat power bonus.
pub const MASTER_RANK_BONUS: [i64; 6] = [0, 50, 150, 300, 500, 750];

pub fn master_rank_bonus(master_rank: u32) -> i64 {
    MASTER_RANK_BONUS
        .get(master_rank as usize)
        .copied()
        .unwrap_or(0)
}
