//! Per-context OpenGL entry point loading.
//!
//! Every native GL context gets its own [`Context`]: a table with one slot
//! per known [`EntryPoint`], filled by resolving each name through the
//! platform's loader. Slots that cannot be resolved stay empty, and
//! [`Context::is_available`] (or [`has_entry_point!`]) tells which ones did.
//!
//! ```ignore
//! use std::sync::Arc;
//! use parking_lot::RwLock;
//! use gl_context_loader::{Context, EntryPoint};
//!
//! let context = Arc::new(RwLock::new(Context::new()));
//! let current = context.clone();
//! gl_context_loader::set_current_context_provider(move || Some(current.clone()));
//! gl_context_loader::set_error_callback(|message| eprintln!("GL loader: {message}"));
//!
//! // ... create a native GL context and make it current ...
//!
//! if gl_context_loader::init_current_context() {
//!     assert!(context.read().is_available(EntryPoint::glClear));
//! }
//! ```
//!
//! Windows resolves through `wglGetProcAddress` with `opengl32.dll` as a
//! fallback, macOS through `dlsym` on the OpenGL framework, and other Unix
//! systems through `glXGetProcAddress`. See [`platform`].

mod config;
mod context;
mod entry_points;
mod error;
#[cfg(feature = "gleam")]
mod gleam_bridge;
mod init;
#[cfg(any(unix, windows))]
pub mod platform;
pub mod resolver;

pub use crate::config::{
    clear_current_context_provider, clear_error_callback, current_context, set_current_context_provider,
    set_error_callback, try_current_context, ContextRef,
};
pub use crate::context::{Context, ProcAddress};
pub use crate::entry_points::EntryPoint;
pub use crate::error::Error;
#[cfg(any(unix, windows))]
pub use crate::init::{init_current_context, try_init_current_context};
pub use crate::init::{
    init_current_context_with, is_available, try_init_current_context_with, InitSummary, Initializer,
    Validated,
};
pub use crate::resolver::ProcAddressResolver;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
