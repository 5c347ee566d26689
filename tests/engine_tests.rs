use demo_analyzer::aggregator::{
    aggregate_player_stats, correlate_all_players, detect_multi_kills, MultiKillKind,
    PositionIndex, RoundTable,
};
use demo_analyzer::parser::schema::{
    DamageEvent, KillEvent, MatchEvents, PositionSample, RoundEndEvent,
};
use demo_analyzer::pipeline::analyze_match;
use demo_analyzer::rating::{dense_rank, rate_players, RatingWeights};
use demo_analyzer::utils::{EngineConfig, EngineError};
use pretty_assertions::assert_eq;

fn kill(tick: i64, attacker: &str, victim: &str) -> KillEvent {
    KillEvent {
        tick,
        attacker_name: Some(attacker.to_string()),
        victim_name: victim.to_string(),
        assister_name: None,
        weapon: None,
        is_headshot: false,
    }
}

fn damage(tick: i64, attacker: &str, amount: u32) -> DamageEvent {
    DamageEvent {
        tick,
        attacker_name: attacker.to_string(),
        damage_amount: amount,
    }
}

fn round_end(tick: i64) -> RoundEndEvent {
    RoundEndEvent {
        tick,
        round_winner: None,
    }
}

fn sample(tick: i64, player: &str, x: f64) -> PositionSample {
    PositionSample {
        tick,
        player_name: player.to_string(),
        x,
        y: 0.0,
        z: 0.0,
    }
}

fn scenario_events() -> MatchEvents {
    MatchEvents {
        kills: Some(vec![
            kill(100, "A", "B"),
            kill(150, "A", "C"),
            kill(3000, "A", "D"),
        ]),
        damages: Some(vec![damage(100, "A", 40), damage(150, "A", 60)]),
        rounds: vec![round_end(2000), round_end(4000)],
        positions: Vec::new(),
    }
}

#[test]
fn test_scenario_player_stat_line() {
    let report = analyze_match(&scenario_events(), &EngineConfig::default(), "scenario").unwrap();

    let a = report
        .player_stats
        .iter()
        .find(|l| l.player_name == "A")
        .unwrap();

    assert_eq!(a.kills, 3);
    assert_eq!(a.deaths, 0);
    assert_eq!(a.kd_ratio, 3.0);
    assert_eq!(a.total_damage, 100);
    assert_eq!(a.adr, 50.0);
    assert_eq!(report.rounds.len(), 2);
    assert_eq!(report.player_stats.len(), 4);
}

#[test]
fn test_scenario_multi_kill_and_rank() {
    let report = analyze_match(&scenario_events(), &EngineConfig::default(), "scenario").unwrap();

    assert_eq!(report.multi_kills.len(), 1);
    let mk = &report.multi_kills[0];
    assert_eq!(mk.player_name, "A");
    assert_eq!(mk.round_index, 1);
    assert_eq!(mk.kill_count, 2);
    assert_eq!(mk.first_kill_tick, 100);
    assert_eq!(mk.kind, MultiKillKind::Double);

    assert_eq!(report.rated_stats[0].stats.player_name, "A");
    assert_eq!(report.rated_stats[0].rank, 1);
    // B, C and D all have identical zero lines
    for line in &report.rated_stats[1..] {
        assert_eq!(line.rank, 2);
        assert_eq!(line.overall_rating, 0.0);
    }
}

#[test]
fn test_kills_deaths_conservation() {
    let kills = vec![
        kill(10, "A", "B"),
        kill(20, "B", "C"),
        kill(30, "C", "A"),
        kill(40, "A", "C"),
        kill(50, "D", "A"),
    ];
    let stats = aggregate_player_stats(&kills, &[], 1);

    let total_kills: u32 = stats.iter().map(|s| s.kills).sum();
    let total_deaths: u32 = stats.iter().map(|s| s.deaths).sum();

    assert_eq!(total_kills as usize, kills.len());
    assert_eq!(total_deaths as usize, kills.len());
}

#[test]
fn test_kd_ratio_without_deaths_is_kill_count() {
    let kills = vec![kill(1, "A", "B"), kill(2, "A", "C")];
    let stats = aggregate_player_stats(&kills, &[], 1);
    let a = stats.iter().find(|s| s.player_name == "A").unwrap();
    assert_eq!(a.kd_ratio, 2.0);
}

#[test]
fn test_round_intervals_cover_every_tick_once() {
    let rounds = RoundTable::from_round_ends(&[round_end(300), round_end(100), round_end(200)]);

    assert_eq!(rounds.len(), 3);
    for tick in 0..=300 {
        let containing = rounds
            .intervals()
            .iter()
            .filter(|iv| iv.contains(tick))
            .count();
        assert_eq!(containing, 1, "tick {}", tick);
    }
    assert_eq!(rounds.find_round(100), 1);
    assert_eq!(rounds.find_round(101), 2);
    assert_eq!(rounds.find_round(300), 3);
}

#[test]
fn test_multi_kill_at_most_once_per_player_round() {
    let kills = vec![
        kill(10, "A", "B"),
        kill(11, "A", "C"),
        kill(12, "A", "D"),
        kill(13, "A", "E"),
        kill(14, "A", "F"),
        kill(15, "A", "G"),
        kill(150, "B", "A"),
    ];
    let rounds = RoundTable::from_round_ends(&[round_end(100), round_end(200)]);
    let tagged = rounds.tag_kills(&kills).unwrap();

    let events = detect_multi_kills(&tagged);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kill_count, 6);
    assert_eq!(events[0].kind, MultiKillKind::Ace);
    assert!(events.iter().all(|e| e.kill_count >= 2));
}

#[test]
fn test_position_correlation_respects_tolerance() {
    let samples = vec![
        sample(0, "A", 0.0),
        sample(64, "A", 1.0),
        sample(128, "A", 2.0),
        sample(100, "B", 9.0),
    ];
    let index = PositionIndex::build(&samples);

    let hits = index.correlate("A", &[60, 96, 300], 8);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].event_tick, 60);
    assert_eq!(hits[0].sample_tick, 64);
    for hit in &hits {
        assert!((hit.event_tick - hit.sample_tick).abs() <= 8);
    }
}

#[test]
fn test_positions_for_every_player() {
    let kills = vec![kill(100, "A", "B")];
    let samples = vec![sample(98, "A", 1.0), sample(101, "B", 2.0)];

    let positions = correlate_all_players(&kills, &samples, 32);

    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].player_name, "A");
    assert_eq!(positions[0].kill_positions.len(), 1);
    assert_eq!(positions[0].kill_positions[0].x, 1.0);
    assert!(positions[0].death_positions.is_empty());
    assert_eq!(positions[1].death_positions[0].x, 2.0);
}

#[test]
fn test_dense_rank_next_rank_follows_tie() {
    let ranks = dense_rank(&[90.0, 90.0, 90.0, 70.0, 50.0, 50.0, 10.0]);
    assert_eq!(ranks, vec![1, 1, 1, 2, 3, 3, 4]);
}

#[test]
fn test_in_band_weights_used_unmodified() {
    let config = EngineConfig {
        weights: RatingWeights::new(0.5, 0.5, 0.0, 0.0),
        ..Default::default()
    };
    let stats = aggregate_player_stats(&[kill(1, "A", "B")], &[], 1);

    let outcome = rate_players(&stats, &[], &config);

    assert_eq!(outcome.effective_weights, config.weights);
    assert!(outcome.anomaly.is_none());
}

#[test]
fn test_sum_four_weights_normalized_to_quarters() {
    let config = EngineConfig {
        weights: RatingWeights::new(1.0, 1.0, 1.0, 1.0),
        ..Default::default()
    };
    let report = analyze_match(&scenario_events(), &config, "scenario").unwrap();

    assert_eq!(
        report.effective_weights,
        RatingWeights::new(0.25, 0.25, 0.25, 0.25)
    );
    assert_eq!(report.warnings.len(), 1);
    for line in &report.rated_stats {
        assert!((0.0..=100.0).contains(&line.overall_rating));
    }
}

#[test]
fn test_zero_kill_player_hs_score_is_zero() {
    let report = analyze_match(&scenario_events(), &EngineConfig::default(), "scenario").unwrap();
    let b = report
        .rated_stats
        .iter()
        .find(|l| l.stats.player_name == "B")
        .unwrap();

    assert_eq!(b.stats.kills, 0);
    assert_eq!(b.hs_score, 0.0);
    assert!(!b.overall_rating.is_nan());
}

#[test]
fn test_missing_damage_table_aborts() {
    let events = MatchEvents {
        damages: None,
        ..scenario_events()
    };
    let result = analyze_match(&events, &EngineConfig::default(), "scenario");
    assert!(matches!(result, Err(EngineError::MissingPrerequisite(_))));
}

#[test]
fn test_missing_weapon_tags_keep_core_stats() {
    let report = analyze_match(&scenario_events(), &EngineConfig::default(), "scenario").unwrap();

    assert!(report.weapon_usage.is_empty());
    assert_eq!(report.player_stats.len(), 4);
    assert_eq!(report.timeline.len(), 5);
}

#[test]
fn test_trends_cumulate_over_rounds() {
    let report = analyze_match(&scenario_events(), &EngineConfig::default(), "scenario").unwrap();

    let a: Vec<_> = report
        .trends
        .iter()
        .filter(|t| t.player_name == "A")
        .collect();

    assert_eq!(a.len(), 2);
    assert_eq!(a[0].cumulative_kills, 2);
    assert_eq!(a[1].cumulative_kills, 3);
    assert_eq!(a[1].cumulative_kd, 1.5);
}
