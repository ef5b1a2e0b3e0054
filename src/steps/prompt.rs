//! Prompt steps: one line of operator input threaded into state.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::state::State;
use crate::ui::{Prompt, UserInterface};

use super::callback::{self, Callback};
use super::value::Dynamic;

/// What the response handler receives.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// The submitted text, or the default when nothing was typed.
    /// Empty when reading failed.
    pub response: String,
    /// Why reading failed (closed input, interrupted), if it did.
    pub error: Option<String>,
    /// The run's shared state.
    pub state: State,
}

/// How a prompt step asks its question and handles the answer.
#[derive(Clone)]
pub struct PromptInstructions {
    /// Question shown to the operator.
    pub query: Dynamic<String>,
    /// Awaited before the question is shown, e.g. to list choices.
    pub on_ready: Option<Callback<State>>,
    /// Receives the response; typically stores it in state.
    pub on_response: Option<Callback<PromptContext>>,
    /// Mask typed characters.
    pub silent: bool,
    /// Substituted for empty input.
    pub default_value: Dynamic<String>,
}

impl PromptInstructions {
    /// Ask `query` with no default and no handlers.
    pub fn new(query: impl Into<Dynamic<String>>) -> Self {
        Self {
            query: query.into(),
            on_ready: None,
            on_response: None,
            silent: false,
            default_value: Dynamic::default(),
        }
    }

    /// Mask the operator's input.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Value used when the operator submits an empty line.
    pub fn default_value(mut self, value: impl Into<Dynamic<String>>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Run `f` before showing the prompt.
    pub fn on_ready<F>(mut self, f: F) -> Self
    where
        F: Fn(State) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_ready = Some(callback::from_fn(f));
        self
    }

    /// Await `f` before showing the prompt.
    pub fn on_ready_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_ready = Some(callback::from_async(f));
        self
    }

    /// Handle the response.
    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(PromptContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_response = Some(callback::from_fn(f));
        self
    }

    /// Handle the response asynchronously.
    pub fn on_response_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(PromptContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_response = Some(callback::from_async(f));
        self
    }
}

impl fmt::Debug for PromptInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptInstructions")
            .field("query", &self.query)
            .field("silent", &self.silent)
            .field("default_value", &self.default_value)
            .field("on_ready", &self.on_ready.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish()
    }
}

/// Whether a yes/no answer means yes (`y`, `ye`, `yes`, any case).
pub fn is_affirmative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "ye" | "yes")
}

/// Show a prompt and hand the answer to the response handler.
///
/// `key` identifies the asking step to the UI. Reading happens on the
/// blocking pool since terminal input blocks.
pub async fn execute_prompt(
    key: &str,
    instructions: &PromptInstructions,
    state: &State,
    ui: &Arc<dyn UserInterface>,
) -> Result<()> {
    if let Some(on_ready) = &instructions.on_ready {
        on_ready(state.clone()).await?;
    }

    let default = instructions.default_value.resolve(state);
    let prompt = Prompt {
        key: key.to_string(),
        query: instructions.query.resolve(state),
        default: Some(default.clone()).filter(|d| !d.is_empty()),
        silent: instructions.silent,
    };

    let reader = Arc::clone(ui);
    let answer = tokio::task::spawn_blocking(move || reader.prompt(&prompt)).await?;

    let context = match answer {
        Ok(input) if input.is_empty() => PromptContext {
            response: default,
            error: None,
            state: state.clone(),
        },
        Ok(input) => PromptContext {
            response: input,
            error: None,
            state: state.clone(),
        },
        Err(e) => {
            debug!("Prompt '{}' got no response: {}", key, e);
            PromptContext {
                response: String::new(),
                error: Some(e.to_string()),
                state: state.clone(),
            }
        }
    };

    if let Some(on_response) = &instructions.on_response {
        on_response(context).await?;
    }

    Ok(())
}
