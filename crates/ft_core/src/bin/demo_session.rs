// Manual demo runner for the fair-play clock engine
// Run with: cargo run --bin demo_session
//
// Plays a scripted two-quarter rotation on a manual clock and prints the
// playing-time table, fairness report and JSON view.

use std::sync::Arc;

use ft_core::export::{header_row, player_rows};
use ft_core::{
    session_state_json, GameConfig, GameFormat, GameSession, ManualClock, TickOutcome,
};

fn main() {
    let clock = Arc::new(ManualClock::new());
    let config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
    let mut session = GameSession::with_time_source(config, clock.clone());
    session.set_roster_name("Demo Team");

    println!("=== Quarter 1: starters ===");
    session.start();
    clock.advance(480_000);
    report_tick(session.tick());

    println!("=== Substitution: full line change ===");
    for index in 0..5 {
        session.toggle_player(index);
    }
    for index in 5..10 {
        session.toggle_player(index);
    }

    println!("=== Quarter 2: bench five ===");
    session.advance_period();
    session.start();
    clock.advance(480_000);
    report_tick(session.tick());

    println!("\n=== Playing-time table ===");
    println!("{}", header_row(session.config().format()).join("  "));
    for row in player_rows(session.roster()) {
        println!("{}", row.join("  "));
    }

    let report = session.metrics();
    println!("\n=== Fairness ===");
    println!("game elapsed: {} ms", report.game_elapsed_ms);
    println!("ideal so far: {} ms", report.ideal_ms_so_far);
    println!("full-game goal: {} ms", report.goal_full_game_ms);

    match session_state_json(&session) {
        Ok(json) => println!("\n=== JSON view ===\n{}", json),
        Err(err) => eprintln!("JSON view failed: {}", err),
    }
}

fn report_tick(outcome: TickOutcome) {
    match outcome {
        TickOutcome::PeriodComplete { applied_ms } => {
            println!("period complete, {} ms applied", applied_ms)
        }
        TickOutcome::Applied { applied_ms } => println!("{} ms applied", applied_ms),
        TickOutcome::Idle => println!("clock idle"),
    }
}
