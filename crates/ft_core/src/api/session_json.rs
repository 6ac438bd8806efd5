//! Serializable read-only view of a live session.
//!
//! Everything a host UI needs to render one frame: configuration, clock
//! phase, formatted clocks, per-player rows with fairness deltas, timeout
//! and overtime state. Built fresh on every call from a `&GameSession`;
//! rendering can never mutate the engine.

use serde::Serialize;

use crate::engine::{EnginePhase, FairnessReport};
use crate::export::format_clock_ms;
use crate::session::GameSession;

pub const VIEW_SCHEMA_VERSION: u8 = 1;

#[derive(Serialize, Debug, Clone)]
pub struct SessionView {
    pub schema_version: u8,
    pub roster_name: String,
    pub config: ConfigView,
    pub running: bool,
    pub current_period: usize,
    pub period_label: String,
    pub period_clock: String,
    pub period_remaining: String,
    pub game_clock: String,
    pub metrics: MetricsView,
    pub timeouts: TimeoutView,
    pub overtime: OvertimeView,
    pub players: Vec<PlayerView>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ConfigView {
    pub num_players: u32,
    pub on_court: u32,
    pub format: String,
    pub period_minutes: u32,
    pub num_periods: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct MetricsView {
    #[serde(flatten)]
    pub report: FairnessReport,
    pub ideal_so_far: String,
    pub goal_full_game: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct TimeoutView {
    pub used: u32,
    pub cap: u32,
    pub remaining: u32,
    pub overtimes: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct OvertimeView {
    pub running: bool,
    pub elapsed: String,
    pub remaining: String,
    pub complete: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct PlayerView {
    pub id: u32,
    pub name: String,
    pub active: bool,
    pub total_ms: u64,
    pub total_clock: String,
    pub period_clocks: Vec<String>,
    /// Signed distance from the session's fairness baseline (ms).
    pub delta_ms: i64,
    pub delta_clock: String,
}

/// Build the view for the current state.
pub fn session_view(session: &GameSession) -> SessionView {
    let config = session.config();
    let report = session.metrics();
    let current_period = session.current_period();

    let players = session
        .roster()
        .players()
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let delta_ms = session.player_delta_ms(index).unwrap_or(0);
            PlayerView {
                id: player.id(),
                name: player.name().to_string(),
                active: player.is_active(),
                total_ms: player.total_ms(),
                total_clock: format_clock_ms(player.total_ms()),
                period_clocks: player.period_ms().iter().map(|&ms| format_clock_ms(ms)).collect(),
                delta_ms,
                delta_clock: format_signed_clock(delta_ms),
            }
        })
        .collect();

    SessionView {
        schema_version: VIEW_SCHEMA_VERSION,
        roster_name: session.roster_name().to_string(),
        config: ConfigView {
            num_players: config.num_players(),
            on_court: config.on_court(),
            format: format!("{:?}", config.format()),
            period_minutes: config.period_minutes(),
            num_periods: config.period_count(),
        },
        running: session.phase() == EnginePhase::Running,
        current_period,
        period_label: config.format().period_label(current_period),
        period_clock: format_clock_ms(session.ledger().elapsed_ms(current_period)),
        period_remaining: format_clock_ms(session.ledger().remaining_ms(current_period)),
        game_clock: format_clock_ms(report.game_elapsed_ms),
        metrics: MetricsView {
            ideal_so_far: format_clock_ms(report.ideal_ms_so_far),
            goal_full_game: format_clock_ms(report.goal_full_game_ms),
            report,
        },
        timeouts: TimeoutView {
            used: session.timeouts().used(),
            cap: session.timeouts().cap(),
            remaining: session.timeouts().remaining(),
            overtimes: session.timeouts().overtimes(),
        },
        overtime: OvertimeView {
            running: session.overtime().is_running(),
            elapsed: format_clock_ms(session.overtime().elapsed_ms()),
            remaining: format_clock_ms(session.overtime().remaining_ms()),
            complete: session.overtime().is_complete(),
        },
        players,
    }
}

/// Serialize the view for a host that consumes JSON.
pub fn session_state_json(session: &GameSession) -> Result<String, serde_json::Error> {
    serde_json::to_string(&session_view(session))
}

fn format_signed_clock(delta_ms: i64) -> String {
    let sign = if delta_ms < 0 { "-" } else { "+" };
    format!("{}{}", sign, format_clock_ms(delta_ms.unsigned_abs()))
}
