use serde::Serialize;

use crate::catalog::{self, Difficulty, GameKind};
use crate::controller::{ViewController, ViewMode};
use crate::guessing::{GuessRecord, GuessState, NumberGuessGame};

/// One sidebar card.
#[derive(Debug, Clone, Serialize)]
pub struct GameCard {
    pub id: GameKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub difficulty: Difficulty,
    pub tags: &'static [&'static str],
    /// Shows the "Playable" badge.
    pub playable: bool,
    pub active: bool,
}

/// Props for the code display surface.
#[derive(Debug, Clone, Serialize)]
pub struct CodePanel {
    pub code: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub title: &'static str,
    pub file_name: String,
}

/// Snapshot of the number-guessing demo.
#[derive(Debug, Clone, Serialize)]
pub struct DemoPanel {
    pub message: String,
    pub attempts: u32,
    pub history: Vec<GuessRecord>,
    pub won: bool,
}

impl From<&NumberGuessGame> for DemoPanel {
    fn from(game: &NumberGuessGame) -> Self {
        Self {
            message: game.message().to_string(),
            attempts: game.attempts(),
            history: game.history().to_vec(),
            won: game.state() == GuessState::Won,
        }
    }
}

/// Everything the page needs to render one frame of the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub games: Vec<GameCard>,
    pub selected: GameKind,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub mode: ViewMode,
    pub show_demo_tab: bool,
    /// Demo mode only renders the demo for an entry that has one.
    pub showing_demo: bool,
    pub ai_generated: bool,
    pub show_regenerate: bool,
    pub code_panel: CodePanel,
    pub demo: Option<DemoPanel>,
}

impl GalleryView {
    pub fn build(controller: &ViewController, demo: &NumberGuessGame) -> Self {
        let selected = controller.selected();
        let descriptor = catalog::find(selected);
        let state = controller.state();
        let showing_demo = state.mode == ViewMode::Demo && descriptor.has_demo;

        let games = catalog::list()
            .iter()
            .map(|g| GameCard {
                id: g.id,
                title: g.title,
                description: g.description,
                icon: g.icon,
                difficulty: g.difficulty,
                tags: g.tags,
                playable: g.has_demo,
                active: g.id == selected,
            })
            .collect();

        Self {
            games,
            selected,
            title: descriptor.title,
            difficulty: descriptor.difficulty,
            mode: state.mode,
            show_demo_tab: descriptor.has_demo,
            showing_demo,
            ai_generated: !selected.is_demo(),
            show_regenerate: !selected.is_demo() && !state.loading && state.error.is_none(),
            code_panel: CodePanel {
                code: controller.code_for(selected).map(str::to_string),
                loading: state.loading,
                error: state.error.clone(),
                title: descriptor.title,
                file_name: catalog::source_file_name(descriptor.title),
            },
            demo: showing_demo.then(|| DemoPanel::from(demo)),
        }
    }
}
