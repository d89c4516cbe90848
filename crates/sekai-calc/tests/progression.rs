use sekai_calc::progression::{
    bond_rewards, calculate_bond_exp_required, calculate_bond_progress,
    calculate_cr_exp_required, calculate_cr_power_increase, calculate_cr_progress,
    estimate_level_up_speed, BondRewardKind, DEFAULT_BOND_EXP_PER_PLAY,
    DEFAULT_RANK_EXP_PER_PLAY,
};

#[test]
fn bond_exp_same_level_is_zero() {
    for level in [1, 10, 57, 200] {
        assert_eq!(calculate_bond_exp_required(level, 0, level), 0);
        assert_eq!(calculate_bond_exp_required(level, 75, level), 0);
        assert_eq!(calculate_bond_exp_required(level, 75, level - 1), 0);
    }
}

#[test]
fn bond_exp_spans_bands() {
    assert_eq!(calculate_bond_exp_required(1, 0, 11), 1000);
    // 900 done at lv10, +50 exp; lv12 needs 1000 + 200
    assert_eq!(calculate_bond_exp_required(10, 50, 12), 250);
    assert_eq!(calculate_bond_exp_required(1, 0, 201), {
        10 * 100 + 10 * 200 + 10 * 300 + 20 * 400 + 20 * 500 + 30 * 600 + 30 * 700 + 30 * 800
            + 40 * 900
    });
}

#[test]
fn bond_progress_estimates() {
    let p = calculate_bond_progress(10, 50, 12, DEFAULT_BOND_EXP_PER_PLAY);
    assert_eq!(p.required_exp, 250);
    assert_eq!(p.estimated_plays, 25);
    assert!((p.estimated_hours - 1.25).abs() < 1e-9);
    assert!(p.rewards.is_empty());
}

#[test]
fn bond_rewards_up_to_twenty() {
    let rewards = bond_rewards(0, 20);
    let summary: Vec<(u32, BondRewardKind, u32)> =
        rewards.iter().map(|r| (r.level, r.kind, r.amount)).collect();
    assert_eq!(
        summary,
        vec![
            (5, BondRewardKind::Crystal, 10),
            (10, BondRewardKind::Crystal, 10),
            (10, BondRewardKind::Title, 1),
            (15, BondRewardKind::Crystal, 10),
            (20, BondRewardKind::Crystal, 10),
            (20, BondRewardKind::Title, 1),
            (20, BondRewardKind::LiveBonus, 1),
        ]
    );
}

#[test]
fn bond_rewards_exclude_current_level() {
    assert!(bond_rewards(20, 20).is_empty());
    assert!(bond_rewards(30, 10).is_empty());
    let r = bond_rewards(20, 25);
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].level, 25);
}

#[test]
fn live_bonus_only_at_fixed_levels() {
    let live: Vec<u32> = bond_rewards(0, 200)
        .into_iter()
        .filter(|r| r.kind == BondRewardKind::LiveBonus)
        .map(|r| r.level)
        .collect();
    assert_eq!(live, vec![20, 40, 60, 80, 100]);

    let crystals_at_150: Vec<u32> = bond_rewards(145, 150)
        .into_iter()
        .filter(|r| r.kind == BondRewardKind::Crystal)
        .map(|r| r.amount)
        .collect();
    assert_eq!(crystals_at_150, vec![30]);
}

#[test]
fn character_rank_exp_and_power() {
    assert_eq!(calculate_cr_exp_required(1, 0, 11), 1000);
    assert_eq!(calculate_cr_exp_required(1, 0, 21), 2500);
    assert_eq!(calculate_cr_exp_required(21, 0, 21), 0);
    assert_eq!(calculate_cr_power_increase(1, 50), 1390);
    assert_eq!(calculate_cr_power_increase(50, 60), 500);

    let p = calculate_cr_progress(1, 0, 21, DEFAULT_RANK_EXP_PER_PLAY);
    assert_eq!(p.required_exp, 2500);
    assert_eq!(p.estimated_plays, 167);
    assert!((p.estimated_hours - 8.35).abs() < 1e-9);
    // rank 21: 290 + 1 × 30
    assert_eq!(p.power_increase, 320);
    assert_eq!(calculate_cr_progress(1, 0, 30, DEFAULT_RANK_EXP_PER_PLAY).power_increase, 590);
}

#[test]
fn level_up_speed() {
    let e = estimate_level_up_speed(1, 21, 2.0, 3.0);
    assert_eq!(e.games_required, 167);
    assert_eq!(e.games_per_day, 40);
    assert_eq!(e.days_required, Some(5));
    assert_eq!(e.weeks_required, Some(1));
    assert_eq!(e.stamina_required, 1670);

    let idle = estimate_level_up_speed(1, 21, 0.0, 3.0);
    assert_eq!(idle.days_required, None);
    assert_eq!(idle.weeks_required, None);

    let done = estimate_level_up_speed(30, 30, 0.0, 3.0);
    assert_eq!(done.days_required, Some(0));
}
