//! The native backend and resolution strategy compiled in for this target.
//!
//! | target      | strategy             | driver resolver       | fallback                  |
//! |-------------|----------------------|-----------------------|---------------------------|
//! | Windows     | [`SentinelFallback`](crate::resolver::SentinelFallback) | `wglGetProcAddress`   | `GetProcAddress(opengl32)`|
//! | macOS       | [`SymbolLookup`](crate::resolver::SymbolLookup) | -                     | `dlsym(OpenGL.framework)` |
//! | other Unix  | [`DriverTotal`](crate::resolver::DriverTotal) | `glXGetProcAddress`   | -                         |

use once_cell::sync::Lazy;

#[cfg(unix)]
mod dl;

#[cfg(windows)]
mod wgl;
#[cfg(windows)]
pub use self::wgl::Wgl;
#[cfg(windows)]
use crate::resolver::SentinelFallback;
#[cfg(windows)]
pub type PlatformResolver = SentinelFallback<Wgl>;

#[cfg(target_os = "macos")]
mod cgl;
#[cfg(target_os = "macos")]
pub use self::cgl::Cgl;
#[cfg(target_os = "macos")]
use crate::resolver::SymbolLookup;
#[cfg(target_os = "macos")]
pub type PlatformResolver = SymbolLookup<Cgl>;

#[cfg(all(unix, not(target_os = "macos")))]
mod glx;
#[cfg(all(unix, not(target_os = "macos")))]
pub use self::glx::Glx;
#[cfg(all(unix, not(target_os = "macos")))]
use crate::resolver::DriverTotal;
#[cfg(all(unix, not(target_os = "macos")))]
pub type PlatformResolver = DriverTotal<Glx>;

static RESOLVER: Lazy<PlatformResolver> = Lazy::new(|| PlatformResolver::new(Default::default()));

/// The process-wide resolver for this target.
pub fn resolver() -> &'static PlatformResolver {
    &RESOLVER
}
