use core::ffi::{c_void, CStr};

use once_cell::sync::OnceCell;

use super::{open_module, DriverResolver, ExportTable, Native, ProcAddressResolver};
use crate::context::ProcAddress;
use crate::error::Error;

/// Whether a driver resolver result means "not resolvable this way".
///
/// Some drivers hand back small integers or all-ones instead of null for
/// functions exported directly by the system library (GL 1.1 and older).
/// Compared at native pointer width.
#[inline]
pub fn is_sentinel(address: *const c_void) -> bool {
    matches!(address as usize, 0 | 1 | 2 | 3 | usize::MAX)
}

/// Driver resolver first, export table of the system GL library second.
///
/// Used where the driver resolver only knows extension and post-1.1
/// functions and may return a sentinel for everything else.
pub struct SentinelFallback<N: DriverResolver + ExportTable> {
    native: N,
    module: OnceCell<N::Module>,
}

impl<N: DriverResolver + ExportTable> SentinelFallback<N> {
    pub const fn new(native: N) -> Self {
        SentinelFallback {
            native,
            module: OnceCell::new(),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }
}

impl<N: DriverResolver + ExportTable> ProcAddressResolver for SentinelFallback<N> {
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

        let address = self.native.driver_proc_address(module, name);
        if !is_sentinel(address) {
            return ProcAddress::new(address);
        }

        log::trace!("{:?}: driver returned {:p}, using export table", name, address);
        ProcAddress::new(self.native.export_address(module, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use rstest::rstest;

    #[derive(Default)]
    struct FakeWgl {
        driver: HashMap<&'static str, usize>,
        exports: HashMap<&'static str, usize>,
        fail_open: AtomicBool,
        opens: AtomicUsize,
        current: bool,
    }

    struct FakeModule;

    impl Native for FakeWgl {
        type Module = FakeModule;

        fn open(&self) -> Result<FakeModule, Error> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            if self.fail_open.load(Ordering::SeqCst) {
                return Err(Error::module_load("opengl32.dll", "not found"));
            }
            Ok(FakeModule)
        }

        fn has_current_context(&self, _: &FakeModule) -> bool {
            self.current
        }
    }

    fn lookup(table: &HashMap<&'static str, usize>, name: &CStr) -> *const c_void {
        name.to_str()
            .ok()
            .and_then(|name| table.get(name))
            .map_or(core::ptr::null(), |&addr| addr as *const c_void)
    }

    impl DriverResolver for FakeWgl {
        fn driver_proc_address(&self, _: &FakeModule, name: &CStr) -> *const c_void {
            lookup(&self.driver, name)
        }
    }

    impl ExportTable for FakeWgl {
        fn export_address(&self, _: &FakeModule, name: &CStr) -> *const c_void {
            lookup(&self.exports, name)
        }
    }

    fn resolved(resolver: &impl ProcAddressResolver, name: &CStr) -> usize {
        resolver.resolve(name).map_or(0, |a| a.as_ptr() as usize)
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(usize::MAX)]
    fn sentinel_falls_back_to_export(#[case] sentinel: usize) {
        let mut native = FakeWgl::default();
        native.driver.insert("glViewport", sentinel);
        native.exports.insert("glViewport", 0x7000);

        let resolver = SentinelFallback::new(native);
        assert_eq!(resolved(&resolver, c"glViewport"), 0x7000);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(usize::MAX)]
    fn sentinel_without_export_is_absent(#[case] sentinel: usize) {
        let mut native = FakeWgl::default();
        native.driver.insert("glFooEXT", sentinel);

        let resolver = SentinelFallback::new(native);
        assert!(resolver.resolve(c"glFooEXT").is_none());
    }

    #[test]
    fn driver_address_wins_when_valid() {
        let mut native = FakeWgl::default();
        native.driver.insert("glBindBuffer", 0x5000);
        native.exports.insert("glBindBuffer", 0x6000);

        let resolver = SentinelFallback::new(native);
        assert_eq!(resolved(&resolver, c"glBindBuffer"), 0x5000);
        assert_eq!(resolved(&resolver, c"glBindBuffer"), 0x5000);
    }

    #[test]
    fn sentinel_detection_is_exact() {
        assert!(is_sentinel(core::ptr::null()));
        assert!(is_sentinel(usize::MAX as *const c_void));
        assert!(!is_sentinel(4 as *const c_void));
        assert!(!is_sentinel((usize::MAX - 1) as *const c_void));
    }

    #[test]
    fn module_opens_once() {
        let mut native = FakeWgl::default();
        native.exports.insert("glClear", 0x10);
        let resolver = SentinelFallback::new(native);

        resolver.load().unwrap();
        resolver.load().unwrap();
        resolver.resolve(c"glClear");
        assert_eq!(resolver.native().opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_open_is_retried() {
        let native = FakeWgl::default();
        native.fail_open.store(true, Ordering::SeqCst);
        let resolver = SentinelFallback::new(native);

        assert!(matches!(resolver.load(), Err(Error::ModuleLoad { .. })));
        assert!(!resolver.is_loaded());
        assert!(!resolver.has_current_context());

        resolver.native().fail_open.store(false, Ordering::SeqCst);
        assert_eq!(resolver.load(), Ok(()));
        assert_eq!(resolver.native().opens.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn current_context_requires_loaded_module() {
        let native = FakeWgl {
            current: true,
            ..FakeWgl::default()
        };
        let resolver = SentinelFallback::new(native);

        assert!(!resolver.has_current_context());
        resolver.load().unwrap();
        assert!(resolver.has_current_context());
    }
}
