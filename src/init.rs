//! Filling a [`Context`] with entry points for the current native context.
//!
//! Validation happens before any slot is touched: a failed check leaves the
//! context exactly as it was. Once validation passes, the sweep over the
//! registry always runs to completion; unresolvable names just stay empty.

use crate::config::{self, ContextRef};
use crate::context::Context;
use crate::entry_points::EntryPoint;
use crate::error::Error;
use crate::resolver::ProcAddressResolver;

/// Outcome of a completed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSummary {
    pub resolved: usize,
    pub total: usize,
}

/// Drives a resolver over the entry point registry.
pub struct Initializer<'r, R: ProcAddressResolver> {
    resolver: &'r R,
}

impl<'r, R: ProcAddressResolver> Initializer<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Initializer { resolver }
    }

    /// Opens the native module if needed and checks that a native GL
    /// context is current on this thread.
    pub fn validate(&self) -> Result<Validated<'r, R>, Error> {
        self.resolver.load()?;
        if !self.resolver.has_current_context() {
            return Err(Error::NoCurrentNativeContext);
        }
        Ok(Validated {
            resolver: self.resolver,
        })
    }

    pub fn init(&self, context: &mut Context) -> Result<InitSummary, Error> {
        Ok(self.validate()?.populate(context))
    }
}

/// Proof that a native context was current when validation ran.
pub struct Validated<'r, R: ProcAddressResolver> {
    resolver: &'r R,
}

impl<'r, R: ProcAddressResolver> Validated<'r, R> {
    /// Overwrites every slot of `context`.
    pub fn populate(self, context: &mut Context) -> InitSummary {
        let mut resolved = 0;
        for &entry_point in EntryPoint::ALL {
            let address = self.resolver.resolve(entry_point.c_name());
            resolved += address.is_some() as usize;
            context.set(entry_point, address);
        }

        let summary = InitSummary {
            resolved,
            total: EntryPoint::COUNT,
        };
        log::debug!("resolved {}/{} GL entry points", summary.resolved, summary.total);
        summary
    }
}

/// Initializes the context returned by the current-context provider.
pub fn try_init_current_context_with<R: ProcAddressResolver>(resolver: &R) -> Result<InitSummary, Error> {
    let context: ContextRef = config::try_current_context()?;
    let validated = Initializer::new(resolver).validate()?;
    let mut context = context.write();
    Ok(validated.populate(&mut context))
}

/// Like [`try_init_current_context_with`], but reports a failure through the
/// error callback and returns whether initialization succeeded.
pub fn init_current_context_with<R: ProcAddressResolver>(resolver: &R) -> bool {
    match try_init_current_context_with(resolver) {
        Ok(summary) => {
            log::info!("GL context loaded ({} of {} entry points)", summary.resolved, summary.total);
            true
        }
        Err(err) => {
            config::report(&err);
            false
        }
    }
}

/// Initializes the current context with this target's native resolver.
#[cfg(any(unix, windows))]
pub fn init_current_context() -> bool {
    init_current_context_with(crate::platform::resolver())
}

#[cfg(any(unix, windows))]
pub fn try_init_current_context() -> Result<InitSummary, Error> {
    try_init_current_context_with(crate::platform::resolver())
}

/// Whether `entry_point` is available in the current context.
///
/// `false` when there is no current context, rather than an error.
pub fn is_available(entry_point: EntryPoint) -> bool {
    config::current_context().map_or(false, |context| context.read().is_available(entry_point))
}

/// Checks a GL function by name against the current context.
///
/// ```ignore
/// if has_entry_point!(glDebugMessageCallback) {
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! has_entry_point {
    ($name:ident) => {
        $crate::is_available($crate::EntryPoint::$name)
    };
}
