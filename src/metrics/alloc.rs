//! Allocation accounting
//!
//! A counting global allocator wraps the system allocator so benchmark cases
//! can diff heap activity across a measured region. Counters are global and
//! monotonic; samples are deltas between two snapshots.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static BYTES_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static BYTES_FREED: AtomicU64 = AtomicU64::new(0);
static ALLOC_CALLS: AtomicU64 = AtomicU64::new(0);
static DEALLOC_CALLS: AtomicU64 = AtomicU64::new(0);
static REALLOC_CALLS: AtomicU64 = AtomicU64::new(0);

/// System allocator wrapper that counts every heap operation
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            BYTES_ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
            ALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        BYTES_FREED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        DEALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            REALLOC_CALLS.fetch_add(1, Ordering::Relaxed);
            let old_size = layout.size() as u64;
            let new_size = new_size as u64;
            if new_size > old_size {
                BYTES_ALLOCATED.fetch_add(new_size - old_size, Ordering::Relaxed);
            } else {
                BYTES_FREED.fetch_add(old_size - new_size, Ordering::Relaxed);
            }
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Point-in-time reading of the global allocation counters
#[derive(Debug, Clone, Copy)]
pub struct AllocSnapshot {
    pub bytes_allocated: u64,
    pub bytes_freed: u64,
    pub alloc_calls: u64,
    pub dealloc_calls: u64,
    pub realloc_calls: u64,
}

impl AllocSnapshot {
    /// Capture the current counter values
    pub fn capture() -> Self {
        Self {
            bytes_allocated: BYTES_ALLOCATED.load(Ordering::Relaxed),
            bytes_freed: BYTES_FREED.load(Ordering::Relaxed),
            alloc_calls: ALLOC_CALLS.load(Ordering::Relaxed),
            dealloc_calls: DEALLOC_CALLS.load(Ordering::Relaxed),
            realloc_calls: REALLOC_CALLS.load(Ordering::Relaxed),
        }
    }
}

/// Heap-activity delta across a measured region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocSample {
    /// Bytes allocated during the region
    pub bytes_allocated: u64,
    /// Bytes freed during the region
    pub bytes_freed: u64,
    /// Allocation calls during the region
    pub alloc_calls: u64,
    /// Deallocation calls during the region
    pub dealloc_calls: u64,
    /// Reallocation calls during the region
    pub realloc_calls: u64,
}

impl AllocSample {
    /// Delta between two snapshots taken before and after a region
    pub fn between(before: &AllocSnapshot, after: &AllocSnapshot) -> Self {
        Self {
            bytes_allocated: after.bytes_allocated.saturating_sub(before.bytes_allocated),
            bytes_freed: after.bytes_freed.saturating_sub(before.bytes_freed),
            alloc_calls: after.alloc_calls.saturating_sub(before.alloc_calls),
            dealloc_calls: after.dealloc_calls.saturating_sub(before.dealloc_calls),
            realloc_calls: after.realloc_calls.saturating_sub(before.realloc_calls),
        }
    }

    /// Merge another sample into this one
    pub fn merge(&mut self, other: &AllocSample) {
        self.bytes_allocated += other.bytes_allocated;
        self.bytes_freed += other.bytes_freed;
        self.alloc_calls += other.alloc_calls;
        self.dealloc_calls += other.dealloc_calls;
        self.realloc_calls += other.realloc_calls;
    }

    /// Format as compact string for summaries
    pub fn format(&self) -> String {
        format!(
            "allocated {} in {} allocs | freed {} in {} deallocs | {} reallocs",
            format_bytes(self.bytes_allocated),
            self.alloc_calls,
            format_bytes(self.bytes_freed),
            self.dealloc_calls,
            self.realloc_calls
        )
    }
}

/// Format a byte count with a binary unit suffix
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

    let b = bytes as f64;
    if b >= GIB {
        format!("{:.2} GiB", b / GIB)
    } else if b >= MIB {
        format!("{:.2} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.2} KiB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}
