use minijinja::Environment;
use serde::Serialize;

use crate::core::models::DEFAULT_SENTENCE_COUNT;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Values bound into the input page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageContext {
    pub summary: Option<String>,
    pub text: String,
    pub num_sentences: i64,
    pub error: Option<String>,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            summary: None,
            text: String::new(),
            num_sentences: DEFAULT_SENTENCE_COUNT,
            error: None,
        }
    }
}

/// Renders the HTML input page. Templates ending in `.html` are auto-escaped.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// # Errors
    ///
    /// Returns an error if the bundled template fails to compile.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// # Errors
    ///
    /// Returns an error if template evaluation fails.
    pub fn render(&self, page: &PageContext) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX_TEMPLATE_NAME)?.render(page)
    }
}
