//! Player roster and active-time accrual table.
//!
//! The table is the only writer of per-player time. Each tick fans one
//! clamped delta out to every active player, so `total_ms` always equals the
//! sum of `period_ms`, the accounting invariant the fairness metrics rely on.

/// One roster member.
///
/// Time fields are private: they only move through [`AccrualTable`] so the
/// `total_ms == sum(period_ms)` invariant cannot be broken from outside.
/// Persistence never sees this type; only name snapshots cross that
/// boundary.
#[derive(Debug, Clone)]
pub struct Player {
    id: u32,
    name: String,
    active: bool,
    total_ms: u64,
    period_ms: Vec<u64>,
}

impl Player {
    fn new(id: u32, period_count: usize, active: bool) -> Self {
        Self {
            id,
            name: format!("Player {}", id),
            active,
            total_ms: 0,
            period_ms: vec![0; period_count],
        }
    }

    /// Stable per-session id, assigned once at creation and never reused.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Accumulated active time across the whole game.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Per-period breakdown, one slot per period.
    pub fn period_ms(&self) -> &[u64] {
        &self.period_ms
    }
}

/// What to do when a toggle would exceed the on-court limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    /// Silent no-op.
    Silent,
    /// Reject with a user-visible, auto-dismissing notice.
    #[default]
    Notice,
}

/// Result of an activation toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The flag was flipped; carries the new state.
    Applied { active: bool },
    /// Activation refused: the on-court limit is already met. `notice` is
    /// the user-facing message under [`CapacityPolicy::Notice`], `None` when
    /// the policy is silent. State is unchanged either way.
    Rejected { notice: Option<String> },
}

/// Roster collection plus the accrual bookkeeping over it.
#[derive(Debug, Clone)]
pub struct AccrualTable {
    players: Vec<Player>,
    next_id: u32,
}

impl Default for AccrualTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AccrualTable {
    pub fn new() -> Self {
        Self { players: Vec::new(), next_id: 1 }
    }

    /// Build an initial table of `count` players. The first `on_court` are
    /// marked active, mirroring a fresh game setup.
    pub fn with_shape(count: usize, period_count: usize, on_court: u32) -> Self {
        let mut table = Self::new();
        table.reshape(count, period_count, on_court);
        table
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn active_count(&self) -> u32 {
        self.players.iter().filter(|p| p.active).count() as u32
    }

    /// Rename a player. Returns false when the index is out of range.
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.players.get_mut(index) {
            Some(player) => {
                player.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Fan a clamped tick delta out to every active player.
    ///
    /// The caller (the clock engine) guarantees `apply_ms` never exceeds the
    /// current period's remainder; this method only distributes it.
    pub fn apply_delta(&mut self, period: usize, apply_ms: u64) {
        if apply_ms == 0 {
            return;
        }
        for player in self.players.iter_mut().filter(|p| p.active) {
            if let Some(slot) = player.period_ms.get_mut(period) {
                *slot += apply_ms;
                player.total_ms += apply_ms;
            }
        }
    }

    /// Flip one player's active flag, enforcing the on-court capacity.
    ///
    /// Deactivating is always permitted. Activating while `on_court` players
    /// are already active is rejected per `policy`.
    pub fn toggle_active(
        &mut self,
        index: usize,
        on_court: u32,
        policy: CapacityPolicy,
    ) -> ToggleOutcome {
        let active_count = self.active_count();
        match self.players.get_mut(index) {
            Some(player) if player.active => {
                player.active = false;
                ToggleOutcome::Applied { active: false }
            }
            Some(player) => {
                if active_count >= on_court {
                    let notice = match policy {
                        CapacityPolicy::Silent => None,
                        CapacityPolicy::Notice => Some(format!(
                            "All {} on-court spots are filled. Sit a player down first.",
                            on_court
                        )),
                    };
                    return ToggleOutcome::Rejected { notice };
                }
                player.active = true;
                ToggleOutcome::Applied { active: true }
            }
            None => ToggleOutcome::Rejected { notice: None },
        }
    }

    /// Reconcile the table with a new roster size and period count.
    ///
    /// Growing appends fresh zeroed players (active only when the table was
    /// previously empty, for the first `on_court` slots). Shrinking truncates
    /// from the end. Every survivor keeps its per-period time for periods
    /// that still exist; totals are recomputed so the sum invariant holds.
    pub fn reshape(&mut self, new_count: usize, new_period_count: usize, on_court: u32) {
        let was_empty = self.players.is_empty();

        if new_count < self.players.len() {
            self.players.truncate(new_count);
        }

        for player in &mut self.players {
            player.period_ms.resize(new_period_count, 0);
            player.total_ms = player.period_ms.iter().sum();
        }

        while self.players.len() < new_count {
            let active = was_empty && (self.players.len() as u32) < on_court;
            let player = Player::new(self.next_id, new_period_count, active);
            self.next_id += 1;
            self.players.push(player);
        }
    }

    /// Put the first `on_court` players on court and bench the rest: the
    /// starting lineup of a fresh game.
    pub fn set_starters(&mut self, on_court: u32) {
        for (index, player) in self.players.iter_mut().enumerate() {
            player.active = (index as u32) < on_court;
        }
    }

    /// Zero all accrued time. Identity, names and active flags survive.
    pub fn reset_accrual(&mut self) {
        for player in &mut self.players {
            player.total_ms = 0;
            player.period_ms.iter_mut().for_each(|slot| *slot = 0);
        }
    }

    #[cfg(test)]
    pub(crate) fn force_accrual(&mut self, index: usize, period_ms: Vec<u64>) {
        let player = &mut self.players[index];
        player.total_ms = period_ms.iter().sum();
        player.period_ms = period_ms;
    }
}
