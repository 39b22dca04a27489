//! WGL backend.
//!
//! `wglGetProcAddress` only knows functions newer than OpenGL 1.1 and, for
//! the rest, may return a small sentinel instead of null. Those functions
//! (`glViewport`, `glClear`, ...) are exported directly by `opengl32.dll`,
//! which is loaded once and never freed.

use core::ffi::{c_void, CStr};
use std::io;

use winapi::shared::minwindef::HMODULE;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::{GetProcAddress, LoadLibraryW};
use winapi::um::wingdi::{wglGetCurrentContext, wglGetProcAddress};

use crate::error::Error;
use crate::resolver::{DriverResolver, ExportTable, Native};

const OPENGL32_DLL: &str = "opengl32.dll";

#[derive(Debug, Default)]
pub struct Wgl;

/// Handle to the loaded `opengl32.dll`.
pub struct Opengl32(HMODULE);

// The module handle is only read after loading.
unsafe impl Send for Opengl32 {}
unsafe impl Sync for Opengl32 {}

fn encode_wide(input: &str) -> Vec<u16> {
    input.encode_utf16().chain(Some(0)).collect()
}

fn last_error() -> String {
    let code = unsafe { GetLastError() };
    io::Error::from_raw_os_error(code as i32).to_string()
}

impl Native for Wgl {
    type Module = Opengl32;

    fn open(&self) -> Result<Opengl32, Error> {
        let dll_name = encode_wide(OPENGL32_DLL);
        let module = unsafe { LoadLibraryW(dll_name.as_ptr()) };
        if module.is_null() {
            return Err(Error::module_load(OPENGL32_DLL, last_error()));
        }
        Ok(Opengl32(module))
    }

    fn has_current_context(&self, _: &Opengl32) -> bool {
        !unsafe { wglGetCurrentContext() }.is_null()
    }
}

impl DriverResolver for Wgl {
    fn driver_proc_address(&self, _: &Opengl32, name: &CStr) -> *const c_void {
        unsafe { wglGetProcAddress(name.as_ptr()) as *const c_void }
    }
}

impl ExportTable for Wgl {
    fn export_address(&self, module: &Opengl32, name: &CStr) -> *const c_void {
        // NOTE: regular GetProcAddress, not wglGetProcAddress
        unsafe { GetProcAddress(module.0, name.as_ptr()) as *const c_void }
    }
}
