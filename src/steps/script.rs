//! Script steps: arbitrary state-mutating callbacks.

use std::fmt;
use std::future::Future;

use crate::error::Result;
use crate::state::State;

use super::callback::{self, Callback};

/// A callback run as a full step.
#[derive(Clone)]
pub struct ScriptInstructions {
    /// The callback. Receives a handle to the run's state.
    pub script: Callback<State>,
}

impl ScriptInstructions {
    /// Script that finishes when the closure returns.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(State) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            script: callback::from_fn(script),
        }
    }

    /// Script that finishes when the returned future does.
    pub fn new_async<F, Fut>(script: F) -> Self
    where
        F: Fn(State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            script: callback::from_async(script),
        }
    }
}

impl fmt::Debug for ScriptInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptInstructions").finish_non_exhaustive()
    }
}

/// Invoke a script and wait for it.
pub async fn execute_script(instructions: &ScriptInstructions, state: &State) -> Result<()> {
    (instructions.script)(state.clone()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunbookError;
    use std::time::Duration;

    #[tokio::test]
    async fn sync_script_mutates_state() {
        let state = State::new();
        let script = ScriptInstructions::new(|state| {
            state.set("configured", true);
            Ok(())
        });
        execute_script(&script, &state).await.unwrap();
        assert_eq!(state.get_bool("configured"), Some(true));
    }

    #[tokio::test]
    async fn async_script_is_awaited() {
        let state = State::new();
        let script = ScriptInstructions::new_async(|state| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            state.set("fetched", "mirrorlist");
            Ok(())
        });
        execute_script(&script, &state).await.unwrap();
        assert_eq!(state.get_str("fetched"), Some("mirrorlist".to_string()));
    }

    #[tokio::test]
    async fn script_error_propagates() {
        let script = ScriptInstructions::new(|_| Err(anyhow::anyhow!("no network")));
        let err = execute_script(&script, &State::new()).await.unwrap_err();
        assert!(matches!(err, RunbookError::Other(_)));
        assert!(err.to_string().contains("no network"));
    }
}
