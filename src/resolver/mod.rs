//! Entry point resolution.
//!
//! Each platform resolves GL names through a different native mechanism with
//! its own failure modes. The strategies here normalize them behind
//! [`ProcAddressResolver`]: a name resolves to a usable address or to `None`.
//!
//! The strategies are generic over their native backend so the same logic
//! runs against the real driver (see [`platform`](crate::platform)) and
//! against simulated ones in tests. Exactly one backend is bound per target,
//! so all calls are statically dispatched.

use core::ffi::{c_void, CStr};

use once_cell::sync::OnceCell;

use crate::context::ProcAddress;
use crate::error::Error;

mod sentinel;
mod symbol;
mod total;

pub use self::sentinel::{is_sentinel, SentinelFallback};
pub use self::symbol::SymbolLookup;
pub use self::total::DriverTotal;

/// Resolves GL entry point names to addresses.
pub trait ProcAddressResolver: Send + Sync {
    /// Opens the native module backing this resolver, once per process.
    ///
    /// A failed open is not cached; the next call tries again.
    fn load(&self) -> Result<(), Error>;

    fn is_loaded(&self) -> bool;

    /// Whether a native GL context is current on the calling thread.
    /// Always `false` until [`load`](Self::load) has succeeded.
    fn has_current_context(&self) -> bool;

    /// Resolves `name`, or `None` if it is not available this way.
    fn resolve(&self, name: &CStr) -> Option<ProcAddress>;
}

/// A native GL library binding.
pub trait Native: Send + Sync {
    /// Process-lifetime handle produced by [`open`](Self::open). Never closed.
    type Module: Send + Sync;

    fn open(&self) -> Result<Self::Module, Error>;

    fn has_current_context(&self, module: &Self::Module) -> bool;
}

/// The driver's own "get proc address" entry point.
pub trait DriverResolver: Native {
    fn driver_proc_address(&self, module: &Self::Module, name: &CStr) -> *const c_void;
}

/// Direct lookup in the export table of the opened module.
pub trait ExportTable: Native {
    fn export_address(&self, module: &Self::Module, name: &CStr) -> *const c_void;
}

/// Generic dynamic-symbol lookup with loader-side error state.
pub trait SymbolLoader: Native {
    fn symbol_address(&self, module: &Self::Module, name: &CStr) -> *const c_void;

    /// Returns the pending loader diagnostic, clearing it.
    fn take_error(&self, module: &Self::Module) -> Option<String>;
}

/// Opens the module on first use. Concurrent first calls are serialized by
/// the cell; a failure leaves it empty.
fn open_module<'a, N: Native>(
    native: &N,
    module: &'a OnceCell<N::Module>,
) -> Result<&'a N::Module, Error> {
    module.get_or_try_init(|| {
        let opened = native.open()?;
        log::debug!("native GL module opened");
        Ok(opened)
    })
}
