//! Derived fairness metrics.
//!
//! Pure functions over the ledger and configuration, recomputed on every
//! read. Nothing here is cached in a mutable field, so staleness bugs are not
//! possible when the numbers are derived on demand.

use serde::Serialize;

use crate::engine::ledger::PeriodLedger;
use crate::models::{GameConfig, Player};

/// Which fair-share figure a player's time is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Baseline {
    /// Fair share of the game time elapsed so far.
    #[default]
    IdealSoFar,
    /// Fair share of the full scheduled game.
    FullGameGoal,
}

/// Fair-share figures for the current game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FairnessReport {
    /// Total elapsed game time across all periods.
    pub game_elapsed_ms: u64,
    /// What each player would have by now if elapsed time were divided in
    /// proportion to the on-court slot count.
    pub ideal_ms_so_far: u64,
    /// Per-player fair share of the entire scheduled game.
    pub goal_full_game_ms: u64,
}

/// Compute the fairness baselines for the current state.
///
/// A zero-player roster yields zeroed metrics rather than a division fault;
/// the configuration clamps to at least one player, but the guard keeps this
/// function total.
pub fn compute_fairness(ledger: &PeriodLedger, config: &GameConfig) -> FairnessReport {
    let num_players = config.num_players() as u64;
    let game_elapsed_ms = ledger.game_elapsed_ms();
    if num_players == 0 {
        return FairnessReport { game_elapsed_ms, ideal_ms_so_far: 0, goal_full_game_ms: 0 };
    }
    let on_court = config.on_court() as u64;
    FairnessReport {
        game_elapsed_ms,
        ideal_ms_so_far: game_elapsed_ms * on_court / num_players,
        goal_full_game_ms: config.scheduled_game_ms() * on_court / num_players,
    }
}

/// Signed distance of a player's accrued time from the selected baseline.
/// Positive means over-played, negative under-played.
pub fn time_delta_ms(player: &Player, report: &FairnessReport, baseline: Baseline) -> i64 {
    let base = match baseline {
        Baseline::IdealSoFar => report.ideal_ms_so_far,
        Baseline::FullGameGoal => report.goal_full_game_ms,
    };
    player.total_ms() as i64 - base as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualTable, GameFormat};

    #[test]
    fn test_full_game_goal_arithmetic() {
        // 4 periods x 8 min x 5-of-10 roster = 16:00 per player.
        let config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
        let ledger = PeriodLedger::new(4, config.period_length_ms());
        let report = compute_fairness(&ledger, &config);
        assert_eq!(report.goal_full_game_ms, 960_000);
    }

    #[test]
    fn test_ideal_tracks_elapsed_time() {
        let config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
        let mut ledger = PeriodLedger::new(4, config.period_length_ms());
        ledger.record_delta(0, 480_000);
        ledger.record_delta(1, 120_000);

        let report = compute_fairness(&ledger, &config);
        assert_eq!(report.game_elapsed_ms, 600_000);
        assert_eq!(report.ideal_ms_so_far, 300_000);
    }

    #[test]
    fn test_delta_against_both_baselines() {
        let config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
        let mut ledger = PeriodLedger::new(4, config.period_length_ms());
        ledger.record_delta(0, 480_000);

        let mut roster = AccrualTable::with_shape(10, 4, 5);
        roster.force_accrual(0, vec![300_000, 0, 0, 0]);

        let report = compute_fairness(&ledger, &config);
        let player = &roster.players()[0];
        assert_eq!(time_delta_ms(player, &report, Baseline::IdealSoFar), 60_000);
        assert_eq!(time_delta_ms(player, &report, Baseline::FullGameGoal), -660_000);
    }

    #[test]
    fn test_uneven_roster_truncates_down() {
        let config = GameConfig::new(7, 5, GameFormat::Halves, 10);
        let mut ledger = PeriodLedger::new(2, config.period_length_ms());
        ledger.record_delta(0, 100_000);

        let report = compute_fairness(&ledger, &config);
        // 100000 * 5 / 7 = 71428.57..., floor-truncated.
        assert_eq!(report.ideal_ms_so_far, 71_428);
    }
}
