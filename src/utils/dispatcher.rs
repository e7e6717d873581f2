//! Fixed-size worker-pool fan-out over an index range.
//!
//! Workers claim indices from a shared cursor and write each result into its
//! own output slot, so no merging or locking of results is needed. The pool
//! is created fresh per call and torn down before the call returns; per-item
//! work is expected to dwarf that setup cost.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Shared claim cursor over `0..len`.
///
/// `claim` hands out each index exactly once and returns `None` once the
/// range is exhausted. There is no sentinel value and no blocking; a worker
/// that gets `None` is done.
pub struct IndexQueue {
    next: AtomicUsize,
    len: usize,
}

impl IndexQueue {
    /// Create a cursor over `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            len,
        }
    }

    /// Claim the next unprocessed index, if any remain.
    pub fn claim(&self) -> Option<usize> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index < self.len { Some(index) } else { None }
    }
}

// Shared view of the output slice. Each index is claimed by exactly one
// worker, so writes never alias.
struct OutputSlots<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Sync for OutputSlots<'_, T> {}

impl<'a, T> OutputSlots<'a, T> {
    fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    unsafe fn write(&self, index: usize, value: T) {
        debug_assert!(index < self.len);
        unsafe {
            *self.ptr.add(index) = value;
        }
    }
}

/// Run `work_fn` for every index in `0..item_count` on a pool of
/// `worker_count` threads, storing `work_fn(i)` into `output[i]`.
///
/// Blocks until every item is processed and all workers have exited. With a
/// single worker (or a single item) the pool is skipped and the work runs as
/// a plain loop, so sequential and parallel runs perform identical
/// arithmetic per item.
///
/// A panicking work item propagates out of this call once the pool is
/// joined; results are never silently dropped.
///
/// # Panics
/// Panics if `output.len() != item_count`; slots are matched to items by
/// construction, not checked at runtime per write.
pub fn run_parallel<T, F>(item_count: usize, worker_count: usize, work_fn: F, output: &mut [T])
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    assert_eq!(output.len(), item_count, "one output slot per work item");
    if item_count == 0 {
        return;
    }

    let workers = worker_count.clamp(1, item_count);
    if workers == 1 {
        for (index, slot) in output.iter_mut().enumerate() {
            *slot = work_fn(index);
        }
        return;
    }

    let queue = IndexQueue::new(item_count);
    let slots = OutputSlots::new(output);
    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                while let Some(index) = queue.claim() {
                    let value = work_fn(index);
                    unsafe { slots.write(index, value) };
                }
            });
        }
    });
}
