//! The per-native-context dispatch table.

use core::ffi::c_void;
use core::fmt;
use core::mem;
use core::ops::Index;
use core::ptr::{self, NonNull};

use crate::entry_points::EntryPoint;

/// A resolved, non-null native entry point address.
///
/// Only valid while the native GL context it was resolved for is alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcAddress(NonNull<c_void>);

// A code address is plain data; calling through it is what needs care.
unsafe impl Send for ProcAddress {}
unsafe impl Sync for ProcAddress {}

impl ProcAddress {
    /// Wraps a raw address, returning `None` for null.
    #[inline]
    pub fn new(address: *const c_void) -> Option<Self> {
        NonNull::new(address as *mut c_void).map(ProcAddress)
    }

    #[inline]
    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for ProcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcAddress({:p})", self.0)
    }
}

/// One slot per [`EntryPoint`], each either empty or a resolved address.
///
/// A fresh context has every slot empty. Slots are filled by
/// [`Initializer`](crate::Initializer); the values are meaningless once the
/// native context they were resolved against is destroyed.
#[derive(Clone, PartialEq, Eq)]
pub struct Context {
    slots: Box<[Option<ProcAddress>; EntryPoint::COUNT]>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            slots: Box::new([None; EntryPoint::COUNT]),
        }
    }

    #[inline]
    pub fn get(&self, entry_point: EntryPoint) -> Option<ProcAddress> {
        self.slots[entry_point.index()]
    }

    /// Whether the slot for `entry_point` holds an address.
    ///
    /// This says nothing about whether the driver actually supports the
    /// function, only that it could be resolved.
    #[inline]
    pub fn is_available(&self, entry_point: EntryPoint) -> bool {
        self.get(entry_point).is_some()
    }

    /// Looks up a slot by GL name. Unknown names and empty slots yield null.
    pub fn address_of(&self, name: &str) -> *const c_void {
        EntryPoint::from_name(name)
            .and_then(|ep| self.get(ep))
            .map_or(ptr::null(), ProcAddress::as_ptr)
    }

    /// Entry points whose slot holds an address, in registry order.
    pub fn available(&self) -> impl Iterator<Item = EntryPoint> + '_ {
        EntryPoint::ALL
            .iter()
            .copied()
            .filter(move |&ep| self.is_available(ep))
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Reinterprets the slot as a function pointer of type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `extern` function pointer type whose signature and
    /// calling convention match the native entry point.
    pub unsafe fn function<F: Copy>(&self, entry_point: EntryPoint) -> Option<F> {
        debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*const c_void>());
        self.get(entry_point)
            .map(|address| mem::transmute_copy::<*const c_void, F>(&address.as_ptr()))
    }

    pub(crate) fn set(&mut self, entry_point: EntryPoint, address: Option<ProcAddress>) {
        self.slots[entry_point.index()] = address;
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<EntryPoint> for Context {
    type Output = Option<ProcAddress>;

    fn index(&self, entry_point: EntryPoint) -> &Self::Output {
        &self.slots[entry_point.index()]
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("available", &self.available_count())
            .field("total", &EntryPoint::COUNT)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(value: usize) -> Option<ProcAddress> {
        ProcAddress::new(value as *const c_void)
    }

    #[test]
    fn new_context_is_empty() {
        let ctx = Context::new();
        assert_eq!(ctx.available_count(), 0);
        assert!(EntryPoint::ALL.iter().all(|&ep| !ctx.is_available(ep)));
    }

    #[test]
    fn null_is_never_stored_as_an_address() {
        assert_eq!(ProcAddress::new(ptr::null()), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut ctx = Context::new();
        ctx.set(EntryPoint::glClear, addr(0x1000));

        assert!(ctx.is_available(EntryPoint::glClear));
        assert!(!ctx.is_available(EntryPoint::glClearColor));
        assert_eq!(ctx[EntryPoint::glClear], addr(0x1000));
        assert_eq!(ctx.available().collect::<Vec<_>>(), vec![EntryPoint::glClear]);
    }

    #[test]
    fn address_of_by_name() {
        let mut ctx = Context::new();
        ctx.set(EntryPoint::glViewport, addr(0x2000));

        assert_eq!(ctx.address_of("glViewport") as usize, 0x2000);
        assert!(ctx.address_of("glScissor").is_null());
        assert!(ctx.address_of("glDoesNotExist").is_null());
    }

    #[test]
    fn clear_empties_all_slots() {
        let mut ctx = Context::new();
        ctx.set(EntryPoint::glFlush, addr(0x10));
        ctx.set(EntryPoint::glFinish, addr(0x20));
        ctx.clear();
        assert_eq!(ctx.available_count(), 0);
    }

    #[test]
    fn contexts_do_not_alias() {
        let mut a = Context::new();
        let b = a.clone();
        a.set(EntryPoint::glEnable, addr(0x30));
        assert!(a.is_available(EntryPoint::glEnable));
        assert!(!b.is_available(EntryPoint::glEnable));
    }

    #[test]
    fn typed_function_from_slot() {
        extern "C" fn answer() -> i32 {
            42
        }

        let mut ctx = Context::new();
        ctx.set(EntryPoint::glGetError, ProcAddress::new(answer as *const c_void));

        let f = unsafe { ctx.function::<extern "C" fn() -> i32>(EntryPoint::glGetError) };
        assert_eq!(f.map(|f| f()), Some(42));
        let missing = unsafe { ctx.function::<extern "C" fn() -> i32>(EntryPoint::glFinish) };
        assert!(missing.is_none());
    }
}
