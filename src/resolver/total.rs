use core::ffi::CStr;

use once_cell::sync::OnceCell;

use super::{open_module, DriverResolver, Native, ProcAddressResolver};
use crate::context::ProcAddress;
use crate::error::Error;

/// The driver resolver alone.
///
/// For resolvers that return a valid address or null for any well-formed
/// name, so the result is used as is.
pub struct DriverTotal<N: DriverResolver> {
    native: N,
    module: OnceCell<N::Module>,
}

impl<N: DriverResolver> DriverTotal<N> {
    pub const fn new(native: N) -> Self {
        DriverTotal {
            native,
            module: OnceCell::new(),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }
}

impl<N: DriverResolver> ProcAddressResolver for DriverTotal<N> {
    fn load(&self) -> Result<(), Error> {
        open_module(&self.native, &self.module).map(drop)
    }

    fn is_loaded(&self) -> bool {
        self.module.get().is_some()
    }

    fn has_current_context(&self) -> bool {
        self.module
            .get()
            .map_or(false, |module| self.native.has_current_context(module))
    }

    fn resolve(&self, name: &CStr) -> Option<ProcAddress> {
        let module = open_module(&self.native, &self.module).ok()?;
        ProcAddress::new(self.native.driver_proc_address(module, name))
    }
}
