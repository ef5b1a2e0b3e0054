//! Caller-supplied step callbacks.
//!
//! Scripts, output handlers and prompt hooks may finish immediately or return
//! a future. Both shapes are stored as [`Callback`], a function returning a
//! boxed future, so executors always have something to await.
//!
//! A panic inside a callback is caught and returned as an error, so it fails
//! the step through the runner like any other callback error.

use futures::future::{self, BoxFuture, FutureExt};
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Future produced by a callback invocation.
pub type CallbackFuture = BoxFuture<'static, anyhow::Result<()>>;

/// A callback taking `A` (state, output context or prompt context).
pub type Callback<A> = Arc<dyn Fn(A) -> CallbackFuture + Send + Sync>;

/// Wrap a synchronous closure. It runs at invocation time; the returned
/// future is already resolved.
pub fn from_fn<A, F>(f: F) -> Callback<A>
where
    A: 'static,
    F: Fn(A) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(move |arg| {
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(arg)))
            .unwrap_or_else(|payload| Err(panicked(payload)));
        future::ready(result).boxed()
    })
}

/// Wrap a closure returning a future.
pub fn from_async<A, F, Fut>(f: F) -> Callback<A>
where
    A: 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |arg| match panic::catch_unwind(AssertUnwindSafe(|| f(arg))) {
        Ok(fut) => AssertUnwindSafe(fut)
            .catch_unwind()
            .map(|outcome| outcome.unwrap_or_else(|payload| Err(panicked(payload))))
            .boxed(),
        Err(payload) => future::ready(Err(panicked(payload))).boxed(),
    })
}

fn panicked(payload: Box<dyn Any + Send>) -> anyhow::Error {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    anyhow::anyhow!("callback panicked: {}", message)
}
