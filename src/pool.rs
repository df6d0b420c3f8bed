//! # Fixed-size-class pool allocator
//!
//! Backs every out-of-line [`crate::strval::Str`] buffer (buffers larger
//! than the 16-byte inline threshold). Requests are rounded up to a size
//! class; freed blocks are kept on a per-class free list and handed back
//! out on the next request of the same class instead of going back to the
//! system allocator.
//!
//! The free lists are `thread_local`: per spec.md's concurrency note, each
//! interpreter instance should either own a private table or share one
//! behind a mutex. String allocation is the hottest path in the substrate,
//! so this core picks the thread-local option here (see [`crate::strname`]
//! for the other option, used on the colder interning path).
//!
//! Freed blocks are never returned to the system allocator; they are
//! recycled within the owning thread for the lifetime of the process. This
//! matches the "pool" framing in spec.md §6/§9 rather than a general-purpose
//! allocator.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::cell::RefCell;
use std::collections::HashMap;

/// All size classes share this alignment; `Str` buffers are raw bytes and
/// never need anything stricter.
const ALIGN: usize = 8;

fn size_class(n: usize) -> usize {
    n.max(1).div_ceil(ALIGN) * ALIGN
}

fn layout_for(class: usize) -> Layout {
    Layout::from_size_align(class, ALIGN).expect("pool size class overflowed Layout limits")
}

thread_local! {
    static FREE_LISTS: RefCell<HashMap<usize, Vec<*mut u8>>> = RefCell::new(HashMap::new());
}

/// Size-class pool allocator for out-of-line string buffers (`pool64` in
/// spec.md's vocabulary).
pub struct SizeClassPool;

impl SizeClassPool {
    /// Allocate a buffer able to hold at least `n` bytes. Never returns a
    /// null pointer: on allocator failure this calls
    /// [`handle_alloc_error`], which aborts the process — the allocator
    /// failure is specified (spec.md §7.3) as unrecoverable.
    pub fn alloc(n: usize) -> *mut u8 {
        let class = size_class(n);
        let reused = FREE_LISTS.with(|fl| fl.borrow_mut().get_mut(&class).and_then(Vec::pop));
        if let Some(ptr) = reused {
            tracing::trace!(class, "pool64: reused freed block");
            return ptr;
        }
        let layout = layout_for(class);
        // SAFETY: `layout` has non-zero size (class >= ALIGN) and valid alignment.
        let ptr = unsafe { alloc(layout) };
        if ptr.is_null() {
            handle_alloc_error(layout);
        }
        tracing::trace!(class, "pool64: allocated new block");
        ptr
    }

    /// Return a buffer previously obtained from [`SizeClassPool::alloc`]
    /// with the same `n`. The block is kept on this thread's free list for
    /// reuse rather than freed immediately.
    pub fn dealloc(ptr: *mut u8, n: usize) {
        let class = size_class(n);
        FREE_LISTS.with(|fl| fl.borrow_mut().entry(class).or_default().push(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_class_rounds_up_to_alignment() {
        assert_eq!(size_class(1), 8);
        assert_eq!(size_class(8), 8);
        assert_eq!(size_class(9), 16);
        assert_eq!(size_class(17), 24);
    }

    #[test]
    fn alloc_dealloc_roundtrip_reuses_block() {
        let a = SizeClassPool::alloc(20);
        unsafe {
            a.write_bytes(0xAB, 20);
        }
        SizeClassPool::dealloc(a, 20);
        let b = SizeClassPool::alloc(20);
        // Same size class and same thread: the free list should hand back `a`.
        assert_eq!(a, b);
        SizeClassPool::dealloc(b, 20);
    }
}
