//! Game configuration with clamped numeric inputs.
//!
//! Every setter clamps out-of-range values to the nearest valid one instead
//! of returning an error; a configuration is valid at all times. In
//! particular `on_court <= num_players` is re-established on every mutation.

use serde::{Deserialize, Serialize};

/// Game format: how many fixed periods the game is divided into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameFormat {
    #[default]
    Quarters,
    Halves,
}

impl GameFormat {
    pub fn period_count(self) -> usize {
        match self {
            GameFormat::Quarters => 4,
            GameFormat::Halves => 2,
        }
    }

    /// Short label for period `index` ("Q1".."Q4" or "H1"/"H2").
    pub fn period_label(self, index: usize) -> String {
        match self {
            GameFormat::Quarters => format!("Q{}", index + 1),
            GameFormat::Halves => format!("H{}", index + 1),
        }
    }
}

/// Roster size, on-court slot count, format and period length.
///
/// Fields are private so that the clamping invariants cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    num_players: u32,
    on_court: u32,
    format: GameFormat,
    period_minutes: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { num_players: 10, on_court: 5, format: GameFormat::Quarters, period_minutes: 8 }
    }
}

impl GameConfig {
    /// Build a configuration, clamping every value into range.
    pub fn new(num_players: u32, on_court: u32, format: GameFormat, period_minutes: u32) -> Self {
        let num_players = num_players.max(1);
        Self {
            num_players,
            on_court: on_court.clamp(1, num_players),
            format,
            period_minutes: period_minutes.max(1),
        }
    }

    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    pub fn on_court(&self) -> u32 {
        self.on_court
    }

    pub fn format(&self) -> GameFormat {
        self.format
    }

    pub fn period_minutes(&self) -> u32 {
        self.period_minutes
    }

    /// Shrinking the roster below the on-court count drags on-court down.
    pub fn set_num_players(&mut self, num_players: u32) {
        self.num_players = num_players.max(1);
        self.on_court = self.on_court.clamp(1, self.num_players);
    }

    pub fn set_on_court(&mut self, on_court: u32) {
        self.on_court = on_court.clamp(1, self.num_players);
    }

    pub fn set_format(&mut self, format: GameFormat) {
        self.format = format;
    }

    pub fn set_period_minutes(&mut self, period_minutes: u32) {
        self.period_minutes = period_minutes.max(1);
    }

    pub fn period_count(&self) -> usize {
        self.format.period_count()
    }

    pub fn period_length_ms(&self) -> u64 {
        self.period_minutes as u64 * 60_000
    }

    /// Full scheduled game duration.
    pub fn scheduled_game_ms(&self) -> u64 {
        self.period_count() as u64 * self.period_length_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_into_range() {
        let config = GameConfig::new(0, 0, GameFormat::Quarters, 0);
        assert_eq!(config.num_players(), 1);
        assert_eq!(config.on_court(), 1);
        assert_eq!(config.period_minutes(), 1);
    }

    #[test]
    fn test_on_court_never_exceeds_roster() {
        let mut config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
        config.set_on_court(12);
        assert_eq!(config.on_court(), 10);

        config.set_num_players(3);
        assert_eq!(config.on_court(), 3);
    }

    #[test]
    fn test_period_shape() {
        let config = GameConfig::new(10, 5, GameFormat::Quarters, 8);
        assert_eq!(config.period_count(), 4);
        assert_eq!(config.period_length_ms(), 480_000);
        assert_eq!(config.scheduled_game_ms(), 1_920_000);

        let halves = GameConfig::new(10, 5, GameFormat::Halves, 20);
        assert_eq!(halves.period_count(), 2);
        assert_eq!(halves.scheduled_game_ms(), 2_400_000);
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(GameFormat::Quarters.period_label(0), "Q1");
        assert_eq!(GameFormat::Quarters.period_label(3), "Q4");
        assert_eq!(GameFormat::Halves.period_label(1), "H2");
    }
}
