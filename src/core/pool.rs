//! Reusable object pools for the logging hot path
//!
//! A [`Pool`] is a bounded, lock-free free list. Checking out an object
//! reuses a previously returned one when available and creates a fresh one
//! otherwise. The [`Pooled`] guard hands the object back when it is dropped,
//! so every exit path of the pipeline returns what it borrowed.

use super::value::Value;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

/// Initial capacity of a freshly created buffer
pub const BUFFER_CAPACITY: usize = 1024;

/// Buffers that grew beyond this are dropped instead of recycled
pub const MAX_RECYCLED_BUFFER: usize = 64 * 1024;

/// How many idle objects each process-wide pool keeps
pub const POOL_SIZE: usize = 256;

/// Objects that can be reset to a reusable state
///
/// `Default` must not allocate; the guard swaps it in when handing the
/// object back.
pub trait Recycle: Default {
    /// Clear contents while keeping the allocation. Returning `false` drops
    /// the object instead of putting it back in the pool.
    fn recycle(&mut self) -> bool;
}

impl Recycle for Vec<u8> {
    fn recycle(&mut self) -> bool {
        self.clear();
        self.capacity() <= MAX_RECYCLED_BUFFER
    }
}

/// Backing storage of an [`Entry`](super::log_entry::Entry): the message
/// and argument list allocations that survive between calls.
#[derive(Debug, Default)]
pub struct EntrySlot {
    pub message: String,
    pub args: Vec<Value>,
}

impl Recycle for EntrySlot {
    fn recycle(&mut self) -> bool {
        self.message.clear();
        // Drops the previous call's values so nothing leaks into the next entry
        self.args.clear();
        true
    }
}

pub struct Pool<T: Recycle> {
    sender: Sender<T>,
    receiver: Receiver<T>,
    create: fn() -> T,
}

impl<T: Recycle> Pool<T> {
    pub fn new(capacity: usize, create: fn() -> T) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            create,
        }
    }

    /// Check out an object, creating one if the pool is empty
    pub fn get(&self) -> Pooled<'_, T> {
        let value = self.receiver.try_recv().unwrap_or_else(|_| (self.create)());
        Pooled { pool: self, value }
    }

    /// Return an object. Full pools drop it.
    pub fn put(&self, mut value: T) {
        if value.recycle() {
            let _ = self.sender.try_send(value);
        }
    }

    /// Number of idle objects currently held
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }
}

/// Scoped checkout of a pooled object
pub struct Pooled<'p, T: Recycle> {
    pool: &'p Pool<T>,
    value: T,
}

impl<T: Recycle> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.put(mem::take(&mut self.value));
    }
}

pub static BUFFER_POOL: LazyLock<Pool<Vec<u8>>> =
    LazyLock::new(|| Pool::new(POOL_SIZE, || Vec::with_capacity(BUFFER_CAPACITY)));

pub static ENTRY_POOL: LazyLock<Pool<EntrySlot>> =
    LazyLock::new(|| Pool::new(POOL_SIZE, EntrySlot::default));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_reuse_keeps_capacity() {
        let pool: Pool<Vec<u8>> = Pool::new(4, || Vec::with_capacity(16));
        {
            let mut buf = pool.get();
            buf.extend_from_slice(&[1u8; 100]);
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.get();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 100);
    }

    #[test]
    fn test_guard_returns_the_same_allocation() {
        let pool: Pool<Vec<u8>> = Pool::new(1, || Vec::with_capacity(32));
        let first = {
            let mut buf = pool.get();
            buf.push(b'x');
            buf.as_ptr()
        };
        let buf = pool.get();
        assert_eq!(buf.as_ptr(), first);
        assert!(buf.capacity() >= 32);
    }

    #[test]
    fn test_oversized_buffers_are_dropped() {
        let pool: Pool<Vec<u8>> = Pool::new(4, Vec::new);
        {
            let mut buf = pool.get();
            buf.resize(MAX_RECYCLED_BUFFER + 1, 0);
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_full_pool_drops_extra() {
        let pool: Pool<Vec<u8>> = Pool::new(1, Vec::new);
        let a = pool.get();
        let b = pool.get();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_entry_slot_recycle_clears_args() {
        let pool: Pool<EntrySlot> = Pool::new(2, EntrySlot::default);
        {
            let mut slot = pool.get();
            slot.message.push_str("first");
            slot.args.push(Value::from("leak"));
        }
        let slot = pool.get();
        assert!(slot.message.is_empty());
        assert!(slot.args.is_empty());
        assert!(slot.args.capacity() >= 1);
    }
}
