mod common;

use std::sync::Arc;

use gl_context_loader::resolver::SentinelFallback;
use gl_context_loader::{
    has_entry_point, init_current_context_with, is_available, try_init_current_context_with, Context,
    ContextRef, EntryPoint, Error,
};
use parking_lot::{Mutex, RwLock};
use serial_test::serial;

use common::SimulatedGl;

/// Installs a provider and an error callback that records every message.
fn configure(context: Option<ContextRef>) -> Arc<Mutex<Vec<String>>> {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();
    gl_context_loader::set_error_callback(move |message| sink.lock().push(message.to_owned()));
    gl_context_loader::set_current_context_provider(move || context.clone());
    messages
}

fn current_resolver() -> SentinelFallback<SimulatedGl> {
    let gl = SimulatedGl::baseline();
    gl.make_current(true);
    SentinelFallback::new(gl)
}

#[test]
#[serial]
fn null_context_reports_once_and_aborts() {
    let messages = configure(None);
    let resolver = current_resolver();

    assert!(!init_current_context_with(&resolver));

    assert_eq!(*messages.lock(), vec!["context is null".to_owned()]);
}

#[test]
#[serial]
fn no_native_context_reports_distinct_message() {
    let context: ContextRef = Arc::new(RwLock::new(Context::new()));
    let messages = configure(Some(context.clone()));
    let resolver = SentinelFallback::new(SimulatedGl::baseline());

    assert!(!init_current_context_with(&resolver));

    assert_eq!(*messages.lock(), vec!["no current native graphics context".to_owned()]);
    assert_eq!(context.read().available_count(), 0);
}

#[test]
#[serial]
fn module_load_failure_carries_system_text() {
    let context: ContextRef = Arc::new(RwLock::new(Context::new()));
    let messages = configure(Some(context));
    let resolver = current_resolver();
    resolver.native().fail_open(true);

    assert!(!init_current_context_with(&resolver));

    let messages = messages.lock();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("cannot open shared object file"), "{}", messages[0]);
}

#[test]
#[serial]
fn successful_init_is_silent_and_queryable() {
    let context: ContextRef = Arc::new(RwLock::new(Context::new()));
    let messages = configure(Some(context.clone()));
    let resolver = current_resolver();

    assert!(init_current_context_with(&resolver));

    assert!(messages.lock().is_empty());
    assert!(is_available(EntryPoint::glClear));
    assert!(has_entry_point!(glViewport));
    assert!(!has_entry_point!(glDebugMessageCallback));
    assert!(context.read().is_available(EntryPoint::glClearColor));
}

#[test]
#[serial]
fn availability_is_false_without_a_context() {
    configure(None);
    assert!(!is_available(EntryPoint::glClear));

    gl_context_loader::clear_current_context_provider();
    assert!(!is_available(EntryPoint::glClear));
    assert!(gl_context_loader::current_context().is_none());
}

#[test]
#[serial]
fn missing_provider_is_its_own_error() {
    configure(None);
    gl_context_loader::clear_current_context_provider();

    let err = try_init_current_context_with(&current_resolver()).unwrap_err();
    assert_eq!(err, Error::NoContextProvider);
}

#[test]
#[serial]
fn diagnostics_are_dropped_without_callback() {
    configure(None);
    gl_context_loader::clear_error_callback();

    assert!(!init_current_context_with(&current_resolver()));
}

#[test]
#[serial]
fn provider_selects_context_per_thread() {
    thread_local! {
        static CURRENT: std::cell::RefCell<Option<ContextRef>> = const { std::cell::RefCell::new(None) };
    }

    configure(None);
    gl_context_loader::set_current_context_provider(|| CURRENT.with(|current| current.borrow().clone()));

    let with_debug = SimulatedGl::baseline().with_driver("glDebugMessageCallback", 0xdeb0);
    with_debug.make_current(true);
    let resolvers = [SentinelFallback::new(with_debug), current_resolver()];

    let available: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = resolvers
            .iter()
            .map(|resolver| {
                scope.spawn(move || {
                    let context: ContextRef = Arc::new(RwLock::new(Context::new()));
                    CURRENT.with(|current| *current.borrow_mut() = Some(context));
                    assert!(init_current_context_with(resolver));
                    has_entry_point!(glDebugMessageCallback)
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(available, vec![true, false]);
}
