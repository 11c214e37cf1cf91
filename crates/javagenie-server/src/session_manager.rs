use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use javagenie_core::view::DemoPanel;
use javagenie_core::{GalleryView, NumberGuessGame, ViewController};

/// One browser tab's worth of gallery state.
pub struct Session {
    pub controller: ViewController,
    pub demo: NumberGuessGame,
    last_activity: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            controller: ViewController::new(),
            demo: NumberGuessGame::new(),
            last_activity: Instant::now(),
        }
    }

    pub fn view(&self) -> GalleryView {
        GalleryView::build(&self.controller, &self.demo)
    }

    pub fn demo_panel(&self) -> DemoPanel {
        DemoPanel::from(&self.demo)
    }
}

/// In-memory session table with a hard cap and idle eviction.
pub struct SessionManager {
    sessions: HashMap<Uuid, Session>,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions,
        }
    }

    /// Create a session with a freshly started demo game.
    /// Returns Err(reason) when the table is full.
    pub fn create(&mut self) -> Result<Uuid, String> {
        if self.sessions.len() >= self.max_sessions {
            return Err(format!(
                "Session limit reached ({} active)",
                self.sessions.len()
            ));
        }
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new());
        tracing::debug!(session = %id, active = self.sessions.len(), "Session created");
        Ok(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Mutable access. Counts as activity.
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Session> {
        let session = self.sessions.get_mut(id)?;
        session.last_activity = Instant::now();
        Some(session)
    }

    #[cfg(test)]
    fn touch(&mut self, id: &Uuid) -> bool {
        self.get_mut(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove sessions idle for longer than `max_idle`.
    /// Returns the number of sessions removed.
    pub fn cleanup_idle_sessions(&mut self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| now.duration_since(s.last_activity) < max_idle);
        before - self.sessions.len()
    }
}
