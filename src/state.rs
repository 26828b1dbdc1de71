use crate::ai::{EngineHandle, init_engine};
use crate::core::config::AppConfig;
use crate::summarizer::Summarizer;
use crate::views::PageRenderer;

/// Process-lifetime state shared by every invocation.
pub struct AppState {
    pub summarizer: Summarizer,
    pub pages: PageRenderer,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the page template fails to compile.
    pub fn new(engine: EngineHandle) -> Result<Self, minijinja::Error> {
        Ok(Self {
            summarizer: Summarizer::new(engine),
            pages: PageRenderer::new()?,
        })
    }

    /// Loads the configured engine, keeping a failed load as `Unavailable`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page template fails to compile.
    pub fn from_config(config: &AppConfig) -> Result<Self, minijinja::Error> {
        Self::new(init_engine(config))
    }
}
