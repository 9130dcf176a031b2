use super::session::GameSession;

/// What a single session operation touched. Observers decide what to redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionChange {
    pub board: bool,
    pub turn: bool,
    pub active: bool,
    pub statistics: bool,
}

impl SessionChange {
    pub fn any(&self) -> bool {
        self.board || self.turn || self.active || self.statistics
    }
}

pub trait SessionObserver {
    /// Called once per public session operation, after the session settled.
    fn session_changed(&self, session: &GameSession, change: &SessionChange);
}
