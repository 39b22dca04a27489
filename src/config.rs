//! Process-wide hooks: the current-context provider and the error callback.
//!
//! Both are meant to be set once, from the thread that owns setup, before
//! any context is initialized or queried. Callbacks are cloned out of their
//! slot before being invoked, so a callback may reconfigure either hook.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::context::Context;
use crate::error::Error;

/// Shared handle to a caller-owned [`Context`], as handed out by the provider.
pub type ContextRef = Arc<RwLock<Context>>;

type ContextProvider = Arc<dyn Fn() -> Option<ContextRef> + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct ProcessConfig {
    context_provider: RwLock<Option<ContextProvider>>,
    error_callback: RwLock<Option<ErrorCallback>>,
}

static CONFIG: Lazy<ProcessConfig> = Lazy::new(ProcessConfig::default);

/// Sets the function that maps "the logically current GL context on this
/// thread" to its [`Context`].
///
/// Thread-safety: call during setup, before other threads use the loader.
pub fn set_current_context_provider<F>(provider: F)
where
    F: Fn() -> Option<ContextRef> + Send + Sync + 'static,
{
    *CONFIG.context_provider.write() = Some(Arc::new(provider));
}

pub fn clear_current_context_provider() {
    *CONFIG.context_provider.write() = None;
}

/// Sets the function that receives a diagnostic for every genuine fault.
/// Without one, diagnostics only reach the `log` facade.
pub fn set_error_callback<F>(callback: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    *CONFIG.error_callback.write() = Some(Arc::new(callback));
}

pub fn clear_error_callback() {
    *CONFIG.error_callback.write() = None;
}

/// The context the configured provider considers current, if any.
///
/// Returns `None` both when the provider yields no context and when no
/// provider has been configured; use [`try_current_context`] to tell
/// these apart.
pub fn current_context() -> Option<ContextRef> {
    try_current_context().ok()
}

pub fn try_current_context() -> Result<ContextRef, Error> {
    let provider = CONFIG
        .context_provider
        .read()
        .clone()
        .ok_or(Error::NoContextProvider)?;
    provider().ok_or(Error::ContextNull)
}

/// Hands `err` to the error callback, if one is set.
pub(crate) fn report(err: &Error) {
    log::error!("{}", err);

    let callback = CONFIG.error_callback.read().clone();
    if let Some(callback) = callback {
        callback(&err.to_string());
    }
}
