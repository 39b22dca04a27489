//! Thin `dlopen` helpers shared by the Unix backends.

use core::ffi::{c_void, CStr};

use crate::error::Error;

/// An open `dlopen` handle. Never closed.
pub struct Library {
    handle: *mut c_void,
}

// dlsym on a handle that stays open is thread-safe.
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

impl Library {
    /// Opens the first of `candidates` that loads.
    pub fn open(candidates: &[&'static CStr]) -> Result<Library, Error> {
        let mut reason = String::from("no candidate library names");
        for &name in candidates {
            take_error();
            let handle = unsafe { libc::dlopen(name.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
            if !handle.is_null() {
                log::debug!("opened {:?}", name);
                return Ok(Library { handle });
            }
            reason = take_error().unwrap_or_else(|| String::from("dlopen failed"));
            log::debug!("could not open {:?}: {}", name, reason);
        }

        let library = candidates
            .first()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        Err(Error::module_load(library, reason))
    }

    /// Raw `dlsym`. A miss leaves a diagnostic behind for [`take_error`].
    pub fn symbol(&self, name: &CStr) -> *const c_void {
        unsafe { libc::dlsym(self.handle, name.as_ptr()) as *const c_void }
    }

    /// `dlsym` with the miss diagnostic already discarded.
    pub fn symbol_quiet(&self, name: &CStr) -> *const c_void {
        take_error();
        let address = self.symbol(name);
        if address.is_null() {
            take_error();
        }
        address
    }
}

/// Reads and clears the thread's pending `dlerror` message.
pub fn take_error() -> Option<String> {
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned())
}
