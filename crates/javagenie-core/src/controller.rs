use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, GameKind, STATIC_NUMBER_GUESS_CODE};
use crate::codegen::{CodeGenerator, CodegenError};

/// Which panel the main area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Demo,
    Code,
}

/// The per-session view state the page renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub selected_id: GameKind,
    pub mode: ViewMode,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_id: GameKind::DEMO,
            mode: ViewMode::Demo,
            loading: false,
            error: None,
        }
    }
}

/// Generated source per catalog entry. Entries are only ever added or
/// overwritten by a successful regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCache {
    entries: BTreeMap<GameKind, String>,
}

impl Default for CodeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeCache {
    /// A cache seeded with the demo game's static sample.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(GameKind::DEMO, STATIC_NUMBER_GUESS_CODE.to_string());
        Self { entries }
    }

    pub fn get(&self, id: GameKind) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: GameKind) -> bool {
        self.entries.contains_key(&id)
    }

    fn insert(&mut self, id: GameKind, code: String) {
        self.entries.insert(id, code);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A generation the controller wants run. The caller executes it against a
/// [`CodeGenerator`] and hands the outcome back via
/// [`ViewController::complete_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: GameKind,
    pub title: &'static str,
    pub tags: &'static [&'static str],
}

impl GenerationRequest {
    pub fn for_game(id: GameKind) -> Self {
        let descriptor = catalog::find(id);
        Self {
            id,
            title: descriptor.title,
            tags: descriptor.tags,
        }
    }

    pub async fn run(&self, generator: &dyn CodeGenerator) -> Result<String, CodegenError> {
        generator.generate(self.title, self.tags).await
    }
}

/// Single source of truth for one gallery session.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
    cache: CodeCache,
    /// Games with a navigation-triggered request outstanding.
    in_flight: HashSet<GameKind>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a catalog entry. Returns a request when the entry needs code
    /// generated: not the demo game, nothing cached, nothing in flight.
    ///
    /// Selecting a game without a demo forces code mode. Selecting the demo
    /// game keeps whatever mode was active.
    pub fn select_game(&mut self, id: GameKind) -> Option<GenerationRequest> {
        self.state.selected_id = id;
        if !catalog::find(id).has_demo {
            self.state.mode = ViewMode::Code;
        }

        if id.is_demo() || self.cache.contains(id) || self.in_flight.contains(&id) {
            return None;
        }
        Some(self.begin_generation(id))
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.state.mode = mode;
    }

    /// Unconditionally request fresh code for `id`, even if cached.
    pub fn regenerate(&mut self, id: GameKind) -> GenerationRequest {
        self.begin_generation(id)
    }

    fn begin_generation(&mut self, id: GameKind) -> GenerationRequest {
        self.state.loading = true;
        self.state.error = None;
        self.in_flight.insert(id);
        tracing::debug!(game = %id, "Code generation requested");
        GenerationRequest::for_game(id)
    }

    /// Apply the outcome of a request. `loading` and `error` are shared by
    /// all requests, so the last one to complete wins them.
    pub fn complete_generation(
        &mut self,
        request: &GenerationRequest,
        result: Result<String, CodegenError>,
    ) {
        self.in_flight.remove(&request.id);
        match result {
            Ok(code) => {
                tracing::debug!(game = %request.id, bytes = code.len(), "Code generated");
                self.cache.insert(request.id, code);
            },
            Err(e) => {
                tracing::debug!(game = %request.id, error = %e, "Code generation failed");
                self.state.error = Some(e.user_message().to_string());
            },
        }
        self.state.loading = false;
    }

    /// Run a request to completion while holding the controller.
    #[cfg(test)]
    async fn run_generation(
        &mut self,
        request: GenerationRequest,
        generator: &dyn CodeGenerator,
    ) {
        let result = request.run(generator).await;
        self.complete_generation(&request, result);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selected(&self) -> GameKind {
        self.state.selected_id
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn cache(&self) -> &CodeCache {
        &self.cache
    }

    pub fn code_for(&self, id: GameKind) -> Option<&str> {
        self.cache.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::StubGenerator;

    #[test]
    fn initial_state() {
        let ctl = ViewController::new();
        assert_eq!(ctl.selected(), GameKind::NumberGuess);
        assert_eq!(ctl.mode(), ViewMode::Demo);
        assert!(!ctl.is_loading());
        assert!(ctl.error().is_none());
        assert_eq!(ctl.code_for(GameKind::DEMO), Some(STATIC_NUMBER_GUESS_CODE));
        assert_eq!(ctl.cache().len(), 1);
    }

    #[test]
    fn selecting_demo_never_requests() {
        let mut ctl = ViewController::new();
        assert!(ctl.select_game(GameKind::NumberGuess).is_none());
        assert!(!ctl.is_loading());

        // Still nothing after bouncing through another game.
        let req = ctl.select_game(GameKind::Snake).unwrap();
        ctl.complete_generation(&req, Ok("class Snake {}".into()));
        assert!(ctl.select_game(GameKind::NumberGuess).is_none());
    }

    #[test]
    fn first_selection_requests_once_then_caches() {
        let mut ctl = ViewController::new();
        let req = ctl.select_game(GameKind::Hangman).expect("first visit generates");
        assert_eq!(req.id, GameKind::Hangman);
        assert_eq!(req.title, "Hangman");
        assert!(ctl.is_loading());

        ctl.complete_generation(&req, Ok("class Hangman {}".into()));
        assert!(!ctl.is_loading());
        assert_eq!(ctl.code_for(GameKind::Hangman), Some("class Hangman {}"));

        if let Some(req) = ctl.select_game(GameKind::Quiz) {
            ctl.complete_generation(&req, Ok("q".into()));
        }
        assert!(ctl.select_game(GameKind::Hangman).is_none());
    }

    #[test]
    fn reselecting_while_in_flight_does_not_duplicate() {
        let mut ctl = ViewController::new();
        let req = ctl.select_game(GameKind::Maze).unwrap();
        assert!(ctl.select_game(GameKind::Maze).is_none());
        ctl.complete_generation(&req, Err(CodegenError::Generation));

        // After a failure nothing is cached, so visiting again retries.
        assert!(ctl.select_game(GameKind::Maze).is_some());
    }

    #[test]
    fn non_demo_selection_forces_code_mode() {
        let mut ctl = ViewController::new();
        assert_eq!(ctl.mode(), ViewMode::Demo);
        ctl.select_game(GameKind::Rps);
        assert_eq!(ctl.mode(), ViewMode::Code);
    }

    #[test]
    fn returning_to_demo_keeps_previous_mode() {
        let mut ctl = ViewController::new();
        ctl.select_game(GameKind::Rps);
        ctl.select_game(GameKind::NumberGuess);
        assert_eq!(ctl.mode(), ViewMode::Code);

        ctl.set_mode(ViewMode::Demo);
        ctl.select_game(GameKind::NumberGuess);
        assert_eq!(ctl.mode(), ViewMode::Demo);
    }

    #[test]
    fn set_mode_is_not_validated() {
        let mut ctl = ViewController::new();
        ctl.select_game(GameKind::Snake);
        ctl.set_mode(ViewMode::Demo);
        assert_eq!(ctl.mode(), ViewMode::Demo);
    }

    #[test]
    fn regenerate_replaces_on_success() {
        let mut ctl = ViewController::new();
        let req = ctl.select_game(GameKind::DiceRoll).unwrap();
        ctl.complete_generation(&req, Ok("v1".into()));

        let req = ctl.regenerate(GameKind::DiceRoll);
        assert!(ctl.is_loading());
        ctl.complete_generation(&req, Ok("v2".into()));
        assert_eq!(ctl.code_for(GameKind::DiceRoll), Some("v2"));
    }

    #[test]
    fn regenerate_keeps_entry_on_failure() {
        let mut ctl = ViewController::new();
        let req = ctl.select_game(GameKind::DiceRoll).unwrap();
        ctl.complete_generation(&req, Ok("v1".into()));

        let req = ctl.regenerate(GameKind::DiceRoll);
        ctl.complete_generation(&req, Err(CodegenError::Generation));
        assert_eq!(ctl.code_for(GameKind::DiceRoll), Some("v1"));
        assert_eq!(ctl.error(), Some(crate::codegen::GENERATION_FAILED_MESSAGE));
        assert!(!ctl.is_loading());
    }

    #[test]
    fn new_request_clears_previous_error() {
        let mut ctl = ViewController::new();
        let req = ctl.select_game(GameKind::Quiz).unwrap();
        ctl.complete_generation(&req, Err(CodegenError::missing_credential()));
        assert_eq!(
            ctl.error(),
            Some(crate::codegen::MISSING_CREDENTIAL_MESSAGE)
        );

        ctl.regenerate(GameKind::Quiz);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn last_completion_owns_shared_flags() {
        let mut ctl = ViewController::new();
        let snake = ctl.select_game(GameKind::Snake).unwrap();
        let pong = ctl.select_game(GameKind::PingPong).unwrap();

        ctl.complete_generation(&pong, Ok("pong".into()));
        assert!(!ctl.is_loading());
        ctl.complete_generation(&snake, Err(CodegenError::Generation));

        // Viewing Ping Pong, but the late Snake failure set the error.
        assert_eq!(ctl.selected(), GameKind::PingPong);
        assert!(ctl.error().is_some());
        assert_eq!(ctl.code_for(GameKind::PingPong), Some("pong"));
        assert!(!ctl.cache().contains(GameKind::Snake));
    }

    #[tokio::test]
    async fn run_generation_uses_generator() {
        let generator = StubGenerator::new();
        let mut ctl = ViewController::new();

        let req = ctl.select_game(GameKind::TicTacToe).unwrap();
        ctl.run_generation(req, &generator).await;
        assert_eq!(generator.calls(), 1);
        assert_eq!(ctl.code_for(GameKind::TicTacToe), Some("// Tic-Tac-Toe"));

        assert!(ctl.select_game(GameKind::TicTacToe).is_none());
        assert_eq!(generator.calls(), 1);

        let req = ctl.regenerate(GameKind::TicTacToe);
        ctl.run_generation(req, &generator).await;
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn every_non_demo_game_generates_exactly_once() {
        let generator = StubGenerator::new();
        let mut ctl = ViewController::new();
        for _ in 0..2 {
            for kind in GameKind::ALL {
                if let Some(req) = ctl.select_game(kind) {
                    ctl.run_generation(req, &generator).await;
                }
            }
        }
        assert_eq!(generator.calls(), GameKind::ALL.len() - 1);
        assert_eq!(ctl.cache().len(), GameKind::ALL.len());
    }
}
