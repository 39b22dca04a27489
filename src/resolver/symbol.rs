use core::ffi::CStr;

use once_cell::sync::OnceCell;

use super::{open_module, Native, ProcAddressResolver, SymbolLoader};
use crate::context::ProcAddress;
use crate::error::Error;

/// Plain dynamic-symbol lookup against the system GL library.
///
/// Missing symbols are routine here (most extensions are absent), so the
/// loader diagnostic a miss leaves behind is read and dropped right after
/// the lookup. Only the module open counts as an error.
pub struct SymbolLookup<N: SymbolLoader> {
    native: N,
    module: OnceCell<N::Module>,
}

impl<N: SymbolLoader> SymbolLookup<N> {
    pub const fn new(native: N) -> Self {
        SymbolLookup {
            native,
            module: OnceCell::new(),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }
}

impl<N: SymbolLoader> ProcAddressResolver for SymbolLookup<N> {
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

        // A stale diagnostic would be indistinguishable from this lookup's.
        self.native.take_error(module);
        let address = ProcAddress::new(self.native.symbol_address(module, name));
        if address.is_none() {
            if let Some(message) = self.native.take_error(module) {
                log::trace!("{:?} not exported: {}", name, message);
            }
        }
        address
    }
}
