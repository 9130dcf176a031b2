use std::fmt;

/// Results counted from the human player's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatistics {
    wins: u32,
    losses: u32,
    ties: u32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the counters, e.g. for display fixtures.
    pub fn with_values(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn ties(&self) -> u32 {
        self.ties
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub(crate) fn register_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn register_loss(&mut self) {
        self.losses += 1;
    }

    pub(crate) fn register_tie(&mut self) {
        self.ties += 1;
    }
}

impl fmt::Display for GameStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_register_bumps_one_counter() {
        let mut stats = GameStatistics::with_values(1, 2, 3);

        stats.register_win();
        stats.register_loss();
        stats.register_loss();
        stats.register_tie();

        assert_eq!(stats, GameStatistics::with_values(2, 4, 4));
        assert_eq!(stats.games(), 10);
        assert_eq!(stats.to_string(), "2-4-4");
    }
}
