//! Shared types and state for the JavaGenie gallery.
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `catalog`    | The ten fixed teaching games and their metadata |
//! | `guessing`   | Number-guessing demo played in the browser |
//! | `codegen`    | Generator contract, prompt text, fence stripping, errors |
//! | `controller` | Per-session view state and code cache |
//! | `view`       | Render-ready snapshot consumed by the page |

pub mod catalog;
pub mod codegen;
pub mod controller;
pub mod guessing;
pub mod view;

pub use catalog::{Difficulty, GameDescriptor, GameKind};
pub use codegen::{CodeGenerator, CodegenError};
pub use controller::{GenerationRequest, ViewController, ViewMode, ViewState};
pub use guessing::{GuessOutcome, GuessRecord, GuessResult, GuessState, NumberGuessGame};
pub use view::GalleryView;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::BoxFuture;

    use crate::codegen::{CodeGenerator, CodegenError};

    /// In-memory generator that counts calls. Replies come from a script
    /// first; once the script runs dry it answers `// {title}`.
    #[derive(Default)]
    pub struct StubGenerator {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<String, CodegenError>>>,
        titles: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_script(script: Vec<Result<String, CodegenError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Titles passed to `generate`, oldest first.
        pub fn titles(&self) -> Vec<String> {
            self.titles.lock().unwrap().clone()
        }
    }

    impl CodeGenerator for StubGenerator {
        fn generate<'a>(
            &'a self,
            title: &'a str,
            _tags: &'a [&'a str],
        ) -> BoxFuture<'a, Result<String, CodegenError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.titles.lock().unwrap().push(title.to_string());
            let scripted = self.script.lock().unwrap().pop_front();
            let reply = scripted.unwrap_or_else(|| Ok(format!("// {title}")));
            Box::pin(async move { reply })
        }
    }
}
