use thiserror::Error;

/// Faults detected while validating or loading a context.
///
/// An entry point that simply could not be resolved is not an error; it
/// shows up as an empty slot in the [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `set_current_context_provider` was never called.
    #[error("no current context provider has been configured")]
    NoContextProvider,
    /// The current context provider returned no context.
    #[error("context is null")]
    ContextNull,
    /// The native GL library could not be opened.
    #[error("failed to load {library}: {reason}")]
    ModuleLoad { library: String, reason: String },
    /// No native GL context is current on the calling thread.
    #[error("no current native graphics context")]
    NoCurrentNativeContext,
}

impl Error {
    pub(crate) fn module_load(library: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ModuleLoad {
            library: library.into(),
            reason: reason.into(),
        }
    }
}
