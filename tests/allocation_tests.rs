//! Heap allocations on the steady-state logging path
//!
//! A counting global allocator tallies allocations made by the current
//! thread. Once the pools are warm, a log call with fixed prefix and suffix
//! arguments should not touch the heap at all. `Local::now()` may refresh
//! its timezone cache about once a second, so a small slack is allowed.

use rust_logx::core::diagnostic;
use rust_logx::prelude::*;
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const CALLS: usize = 100;
const SLACK: usize = 8;

fn allocations_during(f: impl Fn()) -> usize {
    let before = ALLOCATIONS.with(Cell::get);
    f();
    ALLOCATIONS.with(Cell::get) - before
}

fn configured(format: &str) -> Logger {
    let config = LoggerConfig::from_json(&format!(
        r#"{{
            "format": "{}",
            "output": "discard",
            "prefix": ["service", "billing", "host", "node-1"],
            "suffix": ["version", "1.4.2"]
        }}"#,
        format
    ))
    .expect("valid config");
    let mut logger = config.build().expect("buildable config");
    logger.push_prefix_arg("labels");
    logger.push_prefix_arg(serde_json::json!({"region": "eu", "tier": 2}));
    logger
}

#[test]
fn test_steady_state_logging_does_not_allocate() {
    for format in ["text", "text_field", "json"] {
        let logger = configured(format);
        let log = || {
            for i in 0..CALLS {
                logger.info("request handled", args!["status", 200, "attempt", i, "ok", true]);
            }
        };

        // Fill the pools and size the pooled buffers
        log();

        let allocations = allocations_during(log);
        assert!(
            allocations <= SLACK,
            "{} format: {} allocations for {} calls",
            format,
            allocations,
            CALLS
        );
    }

    // The default diagnostic line is written in place as well
    diagnostic::reset_handler();
    let err = LoggerError::other("allocation check");
    diagnostic::report("allocation test", &err);
    let allocations = allocations_during(|| {
        for _ in 0..10 {
            diagnostic::report("allocation test", &err);
        }
    });
    assert!(allocations <= SLACK, "{} allocations for 10 reports", allocations);
}
