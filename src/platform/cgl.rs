//! macOS backend: every GL function is a plain export of the OpenGL
//! framework, so lookup is `dlsym` against it.

use core::ffi::{c_void, CStr};

use super::dl::{self, Library};
use crate::error::Error;
use crate::resolver::{Native, SymbolLoader};

const OPENGL_FRAMEWORK: &CStr = c"/System/Library/Frameworks/OpenGL.framework/OpenGL";

type CglGetCurrentContext = unsafe extern "C" fn() -> *mut c_void;

#[derive(Debug, Default)]
pub struct Cgl;

pub struct OpenGlFramework {
    library: Library,
    get_current_context: Option<CglGetCurrentContext>,
}

impl Native for Cgl {
    type Module = OpenGlFramework;

    fn open(&self) -> Result<OpenGlFramework, Error> {
        let library = Library::open(&[OPENGL_FRAMEWORK])?;
        let address = library.symbol_quiet(c"CGLGetCurrentContext");
        let get_current_context = if address.is_null() {
            None
        } else {
            Some(unsafe { core::mem::transmute::<*const c_void, CglGetCurrentContext>(address) })
        };
        Ok(OpenGlFramework {
            library,
            get_current_context,
        })
    }

    fn has_current_context(&self, module: &OpenGlFramework) -> bool {
        module
            .get_current_context
            .map_or(false, |current| !unsafe { current() }.is_null())
    }
}

impl SymbolLoader for Cgl {
    fn symbol_address(&self, module: &OpenGlFramework, name: &CStr) -> *const c_void {
        module.library.symbol(name)
    }

    fn take_error(&self, _: &OpenGlFramework) -> Option<String> {
        dl::take_error()
    }
}
