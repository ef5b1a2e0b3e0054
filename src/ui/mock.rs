//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use runbook::ui::{MockUI, Prompt, UserInterface};
//!
//! let ui = MockUI::new();
//! ui.set_prompt_response("get hostname", "archbox");
//!
//! assert_eq!(ui.prompt(&Prompt::new("get hostname", "enter a hostname:")).unwrap(), "archbox");
//! assert_eq!(ui.prompts_shown()[0].query, "enter a hostname:");
//! ```

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::Result;

use super::{Prompt, UserInterface};

#[derive(Debug, Default)]
struct Captured {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(u32, String)>,
    completions: Vec<usize>,
    prompts_shown: Vec<Prompt>,
    events: Vec<String>,
    prompt_responses: HashMap<String, String>,
    queued_responses: VecDeque<std::result::Result<String, String>>,
}

/// Mock UI implementation for testing.
///
/// Prompt answers come from, in order: a response set for the prompt's key,
/// then the queue. With neither, the prompt fails as if input were closed.
#[derive(Debug, Default)]
pub struct MockUI {
    captured: Mutex<Captured>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    fn captured(&self) -> MutexGuard<'_, Captured> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer every prompt whose key is `key` with `response`.
    pub fn set_prompt_response(&self, key: &str, response: &str) {
        self.captured()
            .prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue a response for the next prompt without a keyed response.
    pub fn queue_response(&self, response: &str) {
        self.captured()
            .queued_responses
            .push_back(Ok(response.to_string()));
    }

    /// Queue a failure (e.g. closed input) for the next prompt.
    pub fn queue_error(&self, message: &str) {
        self.captured()
            .queued_responses
            .push_back(Err(message.to_string()));
    }

    /// Get all captured messages.
    pub fn messages(&self) -> Vec<String> {
        self.captured().messages.clone()
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> Vec<String> {
        self.captured().successes.clone()
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.captured().warnings.clone()
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> Vec<String> {
        self.captured().errors.clone()
    }

    /// Get all captured headers.
    pub fn headers(&self) -> Vec<String> {
        self.captured().headers.clone()
    }

    /// Progress updates as (rounded percent, step name).
    pub fn progress(&self) -> Vec<(u32, String)> {
        self.captured().progress.clone()
    }

    /// Step counts passed to each completion announcement.
    pub fn completions(&self) -> Vec<usize> {
        self.captured().completions.clone()
    }

    /// Get all prompts that were shown.
    pub fn prompts_shown(&self) -> Vec<Prompt> {
        self.captured().prompts_shown.clone()
    }

    /// Every interaction in order, e.g. `progress:25:set time`,
    /// `prompt:get hostname`, `complete:4`.
    pub fn events(&self) -> Vec<String> {
        self.captured().events.clone()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.captured().messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.captured().errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&self, msg: &str) {
        let mut captured = self.captured();
        captured.messages.push(msg.to_string());
        captured.events.push(format!("message:{}", msg));
    }

    fn success(&self, msg: &str) {
        self.captured().successes.push(msg.to_string());
    }

    fn warning(&self, msg: &str) {
        self.captured().warnings.push(msg.to_string());
    }

    fn error(&self, msg: &str) {
        let mut captured = self.captured();
        captured.errors.push(msg.to_string());
        captured.events.push(format!("error:{}", msg));
    }

    fn show_header(&self, title: &str) {
        self.captured().headers.push(title.to_string());
    }

    fn show_progress(&self, percent: f64, name: &str) {
        let rounded = percent.round() as u32;
        let mut captured = self.captured();
        captured.progress.push((rounded, name.to_string()));
        captured.events.push(format!("progress:{}:{}", rounded, name));
    }

    fn show_completion(&self, steps: usize, _elapsed: Duration) {
        let mut captured = self.captured();
        captured.completions.push(steps);
        captured.events.push(format!("complete:{}", steps));
    }

    fn prompt(&self, prompt: &Prompt) -> Result<String> {
        let mut captured = self.captured();
        captured.prompts_shown.push(prompt.clone());
        captured.events.push(format!("prompt:{}", prompt.key));

        if let Some(response) = captured.prompt_responses.get(&prompt.key) {
            return Ok(response.clone());
        }

        match captured.queued_responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(io::Error::new(io::ErrorKind::Other, message).into()),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no response queued").into()),
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_and_errors() {
        let ui = MockUI::new();
        ui.message("hello");
        ui.error("bad");
        ui.success("ok");
        ui.warning("hmm");
        assert!(ui.has_message("hello"));
        assert!(ui.has_error("bad"));
        assert_eq!(ui.successes(), vec!["ok"]);
        assert_eq!(ui.warnings(), vec!["hmm"]);
        assert_eq!(ui.events(), vec!["message:hello", "error:bad"]);
    }

    #[test]
    fn keyed_response_wins_over_queue() {
        let ui = MockUI::new();
        ui.set_prompt_response("host", "keyed");
        ui.queue_response("queued");
        assert_eq!(ui.prompt(&Prompt::new("host", "?")).unwrap(), "keyed");
        assert_eq!(ui.prompt(&Prompt::new("other", "?")).unwrap(), "queued");
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let ui = MockUI::new();
        assert!(ui.prompt(&Prompt::new("x", "?")).is_err());
        assert_eq!(ui.prompts_shown().len(), 1);
    }

    #[test]
    fn queued_error_is_returned() {
        let ui = MockUI::new();
        ui.queue_error("stream closed");
        let err = ui.prompt(&Prompt::new("x", "?")).unwrap_err();
        assert!(err.to_string().contains("stream closed"));
    }

    #[test]
    fn progress_is_rounded() {
        let ui = MockUI::new();
        ui.show_progress(100.0 / 3.0, "b");
        ui.show_completion(3, Duration::ZERO);
        assert_eq!(ui.progress(), vec![(33, "b".to_string())]);
        assert_eq!(ui.completions(), vec![3]);
        assert_eq!(ui.events(), vec!["progress:33:b", "complete:3"]);
    }
}
