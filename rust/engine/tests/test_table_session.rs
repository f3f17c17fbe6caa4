use ridesim_engine::cards::Rank;
use ridesim_engine::config::{SessionConfig, TableConfig, TableMode};
use ridesim_engine::result::{StopReason, TableEndReason};
use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};
use ridesim_engine::table::TableSession;

struct PullAll;

impl Strategy for PullAll {
    fn decide_bet_one(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Pull
    }
    fn decide_bet_two(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Pull
    }
    fn name(&self) -> &str {
        "pull_all"
    }
}

/// Rides with any pair of high cards among the visible cards.
struct HighPairs;

impl HighPairs {
    fn decide(ctx: &DecisionContext<'_>) -> Decision {
        let cards = ctx.cards;
        let paired = cards.iter().enumerate().any(|(i, a)| {
            a.rank >= Rank::Ten && cards[i + 1..].iter().any(|b| b.rank == a.rank)
        });
        if paired { Decision::Ride } else { Decision::Pull }
    }
}

impl Strategy for HighPairs {
    fn decide_bet_one(&self, ctx: &DecisionContext<'_>) -> Decision {
        assert_eq!(ctx.cards.len(), 3);
        Self::decide(ctx)
    }
    fn decide_bet_two(&self, ctx: &DecisionContext<'_>) -> Decision {
        assert_eq!(ctx.cards.len(), 4);
        Self::decide(ctx)
    }
    fn name(&self) -> &str {
        "high_pairs"
    }
}

fn standard_session() -> SessionConfig {
    SessionConfig::builder(500, 5)
        .win_limit(100)
        .loss_limit(100)
        .max_hands(200)
        .build()
        .unwrap()
}

#[test]
fn same_seed_replays_identically() {
    let table = TableConfig::new(4, standard_session(), None).unwrap();
    let a = TableSession::new(&table, &HighPairs, 42)
        .run_to_completion()
        .unwrap();
    let b = TableSession::new(&table, &HighPairs, 42)
        .run_to_completion()
        .unwrap();
    assert_eq!(a, b);

    let c = TableSession::new(&table, &HighPairs, 43)
        .run_to_completion()
        .unwrap();
    assert_ne!(a, c, "different seeds should play differently (high probability)");
}

#[test]
fn classic_mode_yields_one_finished_session_per_seat() {
    let table = TableConfig::new(6, standard_session(), None).unwrap();
    let result = TableSession::new(&table, &HighPairs, 7)
        .run_to_completion()
        .unwrap();

    assert_eq!(result.mode, TableMode::Classic);
    assert_eq!(result.end_reason, TableEndReason::AllSeatsStopped);
    assert_eq!(result.seats.len(), 6);
    let longest = result
        .seats
        .iter()
        .map(|s| s.rounds_participated)
        .max()
        .unwrap();
    assert_eq!(result.rounds_played, longest);
    for seat in &result.seats {
        assert_eq!(seat.sessions.len(), 1);
        let session = &seat.sessions[0];
        assert!(session.is_complete());
        assert!(session.hands_played <= 200);
        assert!(seat.is_consistent());
        assert_eq!(session.start_round, 0);
    }
}

#[test]
fn seat_replacement_fills_every_round_for_every_seat() {
    let session = SessionConfig::builder(100, 5)
        .max_hands(5)
        .loss_limit(20)
        .build()
        .unwrap();
    let table = TableConfig::new(6, session, Some(50)).unwrap();
    let result = TableSession::new(&table, &HighPairs, 42)
        .run_to_completion()
        .unwrap();

    assert_eq!(result.end_reason, TableEndReason::TableRoundsComplete);
    assert_eq!(result.rounds_played, 50);
    for seat in &result.seats {
        assert_eq!(seat.rounds_participated, 50);
        assert_eq!(seat.hands_played(), 50);
        // max_hands 5 forces at least ten sessions per seat
        assert!(seat.sessions.len() >= 10);

        let mut expected_start = 0;
        for (i, s) in seat.sessions.iter().enumerate() {
            assert_eq!(s.start_round, expected_start);
            assert!(s.hands_played >= 1 && s.hands_played <= 5);
            if i + 1 < seat.sessions.len() {
                assert!(s.is_complete());
            }
            expected_start += u64::from(s.hands_played);
        }
    }
}

#[test]
fn session_cut_off_by_table_end_is_in_progress() {
    let session = SessionConfig::builder(100, 5)
        .max_hands(3)
        .build()
        .unwrap();
    // 7 rounds of 3-hand sessions leaves one hand in the last session
    let table = TableConfig::new(1, session, Some(7)).unwrap();
    let result = TableSession::new(&table, &PullAll, 5)
        .run_to_completion()
        .unwrap();
    let seat = &result.seats[0];
    let reasons: Vec<StopReason> = seat.sessions.iter().map(|s| s.stop_reason).collect();
    assert_eq!(
        reasons,
        vec![StopReason::MaxHands, StopReason::MaxHands, StopReason::InProgress]
    );
    assert_eq!(seat.sessions[2].hands_played, 1);
    assert!(!seat.sessions[2].is_complete());
}

#[test]
fn loss_limit_stops_at_the_exact_boundary() {
    // Pulling both bets risks exactly one unit per hand, so losses move in
    // steps of 5 and a loss-limited session must land on -20.
    let session = SessionConfig::builder(200, 5)
        .loss_limit(20)
        .max_hands(500)
        .build()
        .unwrap();
    let table = TableConfig::new(6, session, Some(400)).unwrap();
    let result = TableSession::new(&table, &PullAll, 99)
        .run_to_completion()
        .unwrap();

    let loss_limited: Vec<_> = result
        .sessions()
        .filter(|s| s.stop_reason == StopReason::LossLimit)
        .collect();
    assert!(!loss_limited.is_empty());
    for s in loss_limited {
        assert_eq!(s.profit(), -20);
        assert!(s.max_drawdown >= 20);
    }
}

#[test]
fn insufficient_funds_stops_before_the_bankroll_runs_dry() {
    let session = SessionConfig::builder(30, 5)
        .max_hands(1_000)
        .bonus_bet(5)
        .build()
        .unwrap();
    let table = TableConfig::new(2, session, None).unwrap();
    let result = TableSession::new(&table, &PullAll, 3)
        .run_to_completion()
        .unwrap();
    for s in result.sessions() {
        if s.stop_reason == StopReason::InsufficientFunds {
            assert!(s.final_bankroll < 20);
            assert!(s.final_bankroll >= 0);
        }
    }
}

#[test]
fn credit_play_is_bounded_by_max_hands() {
    let session = SessionConfig::builder(15, 5)
        .max_hands(40)
        .stop_on_insufficient_funds(false)
        .build()
        .unwrap();
    let table = TableConfig::single_seat(session);
    let result = TableSession::new(&table, &PullAll, 8)
        .run_to_completion()
        .unwrap();
    let s = &result.seats[0].sessions[0];
    assert_eq!(s.stop_reason, StopReason::MaxHands);
    assert_eq!(s.hands_played, 40);
}
