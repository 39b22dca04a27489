//! Building a [`gleam`] dispatcher from a populated [`Context`].

use std::rc::Rc;

use gleam::gl::{Gl, GlFns};

use crate::context::Context;

impl Context {
    /// Wraps the resolved slots in gleam's typed GL interface.
    ///
    /// Names gleam asks for that are not in the registry, or that did not
    /// resolve, load as null.
    ///
    /// # Safety
    ///
    /// The native context this `Context` was initialized against must be
    /// current whenever the returned `Gl` is used.
    pub unsafe fn load_gleam(&self) -> Rc<dyn Gl> {
        GlFns::load_with(|name| self.address_of(name))
    }
}
