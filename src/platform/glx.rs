//! GLX backend.
//!
//! `glXGetProcAddress` returns a usable address or null for any name, so no
//! fallback is needed. libGL is opened at runtime rather than linked, which
//! keeps the crate usable on machines without GL installed.

use core::ffi::{c_void, CStr};
use core::mem;

use super::dl::Library;
use crate::error::Error;
use crate::resolver::{DriverResolver, Native};

const LIBGL: &[&CStr] = &[c"libGL.so.1", c"libGL.so"];

type GlxGetProcAddress = unsafe extern "C" fn(*const u8) -> *const c_void;
type GlxGetCurrentContext = unsafe extern "C" fn() -> *mut c_void;

#[derive(Debug, Default)]
pub struct Glx;

pub struct LibGl {
    _library: Library,
    get_proc_address: GlxGetProcAddress,
    get_current_context: GlxGetCurrentContext,
}

fn required(library: &Library, names: &[&CStr]) -> Result<*const c_void, Error> {
    names
        .iter()
        .map(|name| library.symbol_quiet(name))
        .find(|address| !address.is_null())
        .ok_or_else(|| {
            Error::module_load(
                LIBGL[0].to_string_lossy(),
                format!("{:?} is not exported", names[0]),
            )
        })
}

impl Native for Glx {
    type Module = LibGl;

    fn open(&self) -> Result<LibGl, Error> {
        let library = Library::open(LIBGL)?;
        // glXGetProcAddress is GLX 1.4; the ARB variant covers older servers.
        let get_proc_address = required(&library, &[c"glXGetProcAddress", c"glXGetProcAddressARB"])?;
        let get_current_context = required(&library, &[c"glXGetCurrentContext"])?;

        // SAFETY: both symbols come from libGL with the declared GLX signatures.
        unsafe {
            Ok(LibGl {
                get_proc_address: mem::transmute::<*const c_void, GlxGetProcAddress>(get_proc_address),
                get_current_context: mem::transmute::<*const c_void, GlxGetCurrentContext>(
                    get_current_context,
                ),
                _library: library,
            })
        }
    }

    fn has_current_context(&self, module: &LibGl) -> bool {
        !unsafe { (module.get_current_context)() }.is_null()
    }
}

impl DriverResolver for Glx {
    fn driver_proc_address(&self, module: &LibGl, name: &CStr) -> *const c_void {
        unsafe { (module.get_proc_address)(name.as_ptr().cast()) }
    }
}
