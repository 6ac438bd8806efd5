//! Session-scoped runtime state.
//!
//! One `GameSession` owns every mutable entity for a live game: the
//! configuration, the clock engine with its period ledger, the player
//! accrual table, the timeout counters and the independent overtime clock.
//! There is no global singleton and no background timer; the host drives
//! `tick()` on its own cadence and reads derived state between ticks.

use std::sync::Arc;

use crate::engine::{
    compute_fairness, time_delta_ms, Baseline, ClockTicker, EnginePhase, FairnessReport,
    GameClockEngine, OvertimeClock, PeriodLedger, TickOutcome, TimeSource,
};
use crate::models::{
    AccrualTable, CapacityPolicy, GameConfig, TimeoutLedger, ToggleOutcome,
};
use crate::save::{PlayerName, SessionSnapshot, StoredRoster, SNAPSHOT_VERSION};

/// Default label for an unnamed roster.
pub const DEFAULT_ROSTER_NAME: &str = "My Team";

pub struct GameSession {
    config: GameConfig,
    engine: GameClockEngine,
    roster: AccrualTable,
    timeouts: TimeoutLedger,
    overtime: OvertimeClock,
    roster_name: String,
    capacity_policy: CapacityPolicy,
    baseline: Baseline,
    dirty: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameSession {
    /// Session on the real wall clock.
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, ClockTicker::system(), ClockTicker::system())
    }

    /// Session on an injected time source; both clocks share it. This is
    /// how tests run a whole game without waiting on wall time.
    pub fn with_time_source(config: GameConfig, source: Arc<dyn TimeSource>) -> Self {
        let game = ClockTicker::new(Box::new(Arc::clone(&source)));
        let ot = ClockTicker::new(Box::new(source));
        Self::build(config, game, ot)
    }

    fn build(config: GameConfig, game_ticker: ClockTicker, ot_ticker: ClockTicker) -> Self {
        let engine =
            GameClockEngine::new(config.period_count(), config.period_length_ms(), game_ticker);
        let roster = AccrualTable::with_shape(
            config.num_players() as usize,
            config.period_count(),
            config.on_court(),
        );
        Self {
            config,
            engine,
            roster,
            timeouts: TimeoutLedger::default(),
            overtime: OvertimeClock::new(ot_ticker),
            roster_name: DEFAULT_ROSTER_NAME.to_string(),
            capacity_policy: CapacityPolicy::default(),
            baseline: Baseline::default(),
            dirty: false,
        }
    }

    // ========================
    // Read access
    // ========================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &AccrualTable {
        &self.roster
    }

    pub fn ledger(&self) -> &PeriodLedger {
        self.engine.ledger()
    }

    pub fn phase(&self) -> EnginePhase {
        self.engine.phase()
    }

    pub fn current_period(&self) -> usize {
        self.engine.current_period()
    }

    pub fn timeouts(&self) -> &TimeoutLedger {
        &self.timeouts
    }

    pub fn overtime(&self) -> &OvertimeClock {
        &self.overtime
    }

    pub fn roster_name(&self) -> &str {
        &self.roster_name
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity_policy
    }

    /// Fairness baselines, recomputed from the live ledger on every call.
    pub fn metrics(&self) -> FairnessReport {
        compute_fairness(self.engine.ledger(), &self.config)
    }

    /// A player's signed distance from the session baseline.
    pub fn player_delta_ms(&self, index: usize) -> Option<i64> {
        let report = self.metrics();
        self.roster.player(index).map(|p| time_delta_ms(p, &report, self.baseline))
    }

    // ========================
    // Clock control
    // ========================

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    /// Drive the main clock. Call on the host's polling cadence.
    pub fn tick(&mut self) -> TickOutcome {
        self.engine.tick(&mut self.roster)
    }

    pub fn advance_period(&mut self) {
        self.engine.advance_period();
    }

    pub fn start_overtime(&mut self) -> bool {
        self.overtime.start()
    }

    pub fn pause_overtime(&mut self) {
        self.overtime.pause();
    }

    /// Drive the overtime clock, independent of the main clock.
    pub fn tick_overtime(&mut self) -> u64 {
        let applied = self.overtime.tick();
        if applied > 0 {
            self.dirty = true;
        }
        applied
    }

    /// Zero periods and player accrual, rewind to period 0. The overtime
    /// clock and timeout counters are deliberately untouched.
    pub fn reset_game(&mut self) {
        self.engine.reset(&mut self.roster);
    }

    /// Full reset: game clock, then explicitly the overtime clock and the
    /// timeout counters.
    pub fn reset_all(&mut self) {
        self.reset_game();
        self.overtime.reset();
        self.timeouts.reset();
        self.dirty = true;
    }

    // ========================
    // Roster & configuration
    // ========================

    /// Apply a configuration change, reconciling every dependent shape.
    ///
    /// `GameConfig` clamps `on_court <= num_players` before this runs, so
    /// the reshapes below always see a consistent pair regardless of which
    /// field the caller changed first. Surviving players keep their time for
    /// surviving periods.
    pub fn apply_config(&mut self, config: GameConfig) {
        self.engine.reshape(config.period_count(), config.period_length_ms());
        self.roster.reshape(
            config.num_players() as usize,
            config.period_count(),
            config.on_court(),
        );
        if self.config != config {
            self.dirty = true;
        }
        self.config = config;
    }

    pub fn set_num_players(&mut self, num_players: u32) {
        let mut config = self.config;
        config.set_num_players(num_players);
        self.apply_config(config);
    }

    pub fn set_on_court(&mut self, on_court: u32) {
        let mut config = self.config;
        config.set_on_court(on_court);
        self.apply_config(config);
    }

    pub fn set_format(&mut self, format: crate::models::GameFormat) {
        let mut config = self.config;
        config.set_format(format);
        self.apply_config(config);
    }

    pub fn set_period_minutes(&mut self, period_minutes: u32) {
        let mut config = self.config;
        config.set_period_minutes(period_minutes);
        self.apply_config(config);
    }

    /// Toggle a player's active flag under the session's capacity policy.
    pub fn toggle_player(&mut self, index: usize) -> ToggleOutcome {
        self.roster.toggle_active(index, self.config.on_court(), self.capacity_policy)
    }

    pub fn set_capacity_policy(&mut self, policy: CapacityPolicy) {
        self.capacity_policy = policy;
    }

    pub fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = baseline;
    }

    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> bool {
        let renamed = self.roster.rename(index, name);
        if renamed {
            self.dirty = true;
        }
        renamed
    }

    pub fn set_roster_name(&mut self, name: impl Into<String>) {
        self.roster_name = name.into();
        self.dirty = true;
    }

    // ========================
    // Timeouts
    // ========================

    pub fn use_timeout(&mut self) -> bool {
        let used = self.timeouts.use_timeout();
        if used {
            self.dirty = true;
        }
        used
    }

    pub fn undo_timeout(&mut self) -> bool {
        let undone = self.timeouts.undo();
        if undone {
            self.dirty = true;
        }
        undone
    }

    pub fn add_overtime(&mut self) {
        self.timeouts.add_overtime();
        self.dirty = true;
    }

    // ========================
    // Persistence collaborator
    // ========================

    /// True once any snapshot-included field changed since the last drain.
    /// The persistence collaborator polls this and stores `snapshot()`.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Point-in-time copy of everything the persistence collaborator keeps.
    /// Period and accrual progress are intentionally absent: a reload
    /// always starts the game at zero.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at_ms: crate::save::current_timestamp_ms(),
            num_players: self.config.num_players(),
            on_court: self.config.on_court(),
            format: self.config.format(),
            period_minutes: self.config.period_minutes(),
            roster_name: self.roster_name.clone(),
            players: self
                .roster
                .players()
                .iter()
                .map(|p| PlayerName { name: p.name().to_string() })
                .collect(),
            timeouts_used: self.timeouts.used(),
            overtimes: self.timeouts.overtimes(),
            ot_elapsed_ms: self.overtime.elapsed_ms(),
        }
    }

    /// Seed a fresh session from a stored snapshot: configuration, names,
    /// timeout counters and overtime elapsed. Periods and accrual start at
    /// zero.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let config = GameConfig::new(
            snapshot.num_players,
            snapshot.on_court,
            snapshot.format,
            snapshot.period_minutes,
        );
        let mut session = Self::new(config);
        session.seed_from(snapshot);
        session
    }

    /// Deterministic variant of [`GameSession::from_snapshot`].
    pub fn from_snapshot_with_time_source(
        snapshot: &SessionSnapshot,
        source: Arc<dyn TimeSource>,
    ) -> Self {
        let config = GameConfig::new(
            snapshot.num_players,
            snapshot.on_court,
            snapshot.format,
            snapshot.period_minutes,
        );
        let mut session = Self::with_time_source(config, source);
        session.seed_from(snapshot);
        session
    }

    fn seed_from(&mut self, snapshot: &SessionSnapshot) {
        self.roster_name = snapshot.roster_name.clone();
        for (index, stored) in snapshot.players.iter().enumerate().take(self.roster.len()) {
            self.roster.rename(index, stored.name.clone());
        }
        self.timeouts.seed(snapshot.timeouts_used, snapshot.overtimes);
        self.overtime.seed_elapsed(snapshot.ot_elapsed_ms);
        self.dirty = false;
    }

    // ========================
    // Roster library collaborator
    // ========================

    /// Current roster in the library's stored shape.
    pub fn stored_roster(&self) -> StoredRoster {
        StoredRoster {
            num_players: self.config.num_players(),
            on_court: self.config.on_court(),
            players: self
                .roster
                .players()
                .iter()
                .map(|p| PlayerName { name: p.name().to_string() })
                .collect(),
        }
    }

    /// Load a named roster: size, on-court count and names. All runtime
    /// accrual state is reset; a loaded roster starts a fresh game.
    pub fn load_roster(&mut self, name: impl Into<String>, stored: &StoredRoster) {
        let mut config = self.config;
        config.set_num_players(stored.num_players);
        config.set_on_court(stored.on_court);
        self.apply_config(config);

        for (index, player) in stored.players.iter().enumerate().take(self.roster.len()) {
            self.roster.rename(index, player.name.clone());
        }
        self.roster_name = name.into();
        self.roster.set_starters(self.config.on_court());
        self.reset_game();
        self.dirty = true;
    }
}
