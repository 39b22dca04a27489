//! An in-memory GL driver implementing every native backend trait.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::{c_void, CStr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use gl_context_loader::resolver::{DriverResolver, ExportTable, Native, SymbolLoader};
use gl_context_loader::Error;
use parking_lot::Mutex;

pub const BASELINE: &[&str] = &["glClear", "glClearColor", "glViewport", "glDrawArrays", "glGetError"];

#[derive(Default)]
pub struct SimulatedGl {
    driver: HashMap<String, usize>,
    exports: HashMap<String, usize>,
    current: AtomicBool,
    fail_open: AtomicBool,
    pub opens: AtomicUsize,
    pending_error: Mutex<Option<String>>,
}

impl SimulatedGl {
    /// A driver exporting the baseline functions from its module and
    /// resolving nothing else.
    pub fn baseline() -> Self {
        let mut gl = SimulatedGl::default();
        for (i, name) in BASELINE.iter().enumerate() {
            gl.exports.insert((*name).to_owned(), 0x1_0000 + i * 0x10);
        }
        gl
    }

    pub fn with_driver(mut self, name: &str, address: usize) -> Self {
        self.driver.insert(name.to_owned(), address);
        self
    }

    pub fn with_export(mut self, name: &str, address: usize) -> Self {
        self.exports.insert(name.to_owned(), address);
        self
    }

    pub fn make_current(&self, current: bool) {
        self.current.store(current, Ordering::SeqCst);
    }

    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    pub fn pending_error(&self) -> Option<String> {
        self.pending_error.lock().clone()
    }

    fn lookup(table: &HashMap<String, usize>, name: &CStr) -> *const c_void {
        name.to_str()
            .ok()
            .and_then(|name| table.get(name))
            .map_or(std::ptr::null(), |&address| address as *const c_void)
    }
}

pub struct SimulatedModule;

impl Native for SimulatedGl {
    type Module = SimulatedModule;

    fn open(&self) -> Result<SimulatedModule, Error> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(Error::ModuleLoad {
                library: "libSimulatedGL.so".to_owned(),
                reason: "cannot open shared object file".to_owned(),
            });
        }
        Ok(SimulatedModule)
    }

    fn has_current_context(&self, _: &SimulatedModule) -> bool {
        self.current.load(Ordering::SeqCst)
    }
}

impl DriverResolver for SimulatedGl {
    fn driver_proc_address(&self, _: &SimulatedModule, name: &CStr) -> *const c_void {
        Self::lookup(&self.driver, name)
    }
}

impl ExportTable for SimulatedGl {
    fn export_address(&self, _: &SimulatedModule, name: &CStr) -> *const c_void {
        Self::lookup(&self.exports, name)
    }
}

impl SymbolLoader for SimulatedGl {
    fn symbol_address(&self, _: &SimulatedModule, name: &CStr) -> *const c_void {
        let address = Self::lookup(&self.exports, name);
        if address.is_null() {
            *self.pending_error.lock() = Some(format!("undefined symbol: {}", name.to_string_lossy()));
        }
        address
    }

    fn take_error(&self, _: &SimulatedModule) -> Option<String> {
        self.pending_error.lock().take()
    }
}
