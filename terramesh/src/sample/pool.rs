//! Bounded pool of reusable elevation sample buffers.
//!
//! Every mesh request needs an `N²` sample array for the duration of its
//! elevation query and mesh build. The pool pre-allocates one buffer per
//! permitted concurrent request and hands them out exclusively, so it
//! doubles as the admission-control semaphore for mesh generation.
//!
//! # Example
//!
//! ```ignore
//! use terramesh::sample::SampleBufferPool;
//! use tokio_util::sync::CancellationToken;
//!
//! let pool = SampleBufferPool::new(4, 33 * 33);
//! let cancellation = CancellationToken::new();
//!
//! let mut buffer = pool.acquire(&cancellation).await?;
//! // Fill and consume buffer...
//! drop(buffer); // Returns the buffer to the pool
//! ```

use super::ElevationPointSample;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Errors returned by [`SampleBufferPool::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Cancellation fired before a buffer became free
    #[error("buffer acquisition cancelled")]
    Cancelled,

    /// The pool has been closed
    #[error("sample buffer pool closed")]
    Closed,

    /// A permit was granted but no buffer was on the free list
    #[error("sample buffer pool exhausted")]
    Exhausted,
}

/// A semaphore-backed pool of fixed-length sample buffers.
#[derive(Debug)]
pub struct SampleBufferPool {
    semaphore: Arc<Semaphore>,
    free: Mutex<Vec<Vec<ElevationPointSample>>>,
    capacity: usize,
    buffer_len: usize,
    allocated: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl SampleBufferPool {
    /// Creates a pool of `capacity` buffers, each `buffer_len` samples long.
    pub fn new(capacity: usize, buffer_len: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        let free: Vec<_> = (0..capacity)
            .map(|_| vec![ElevationPointSample::default(); buffer_len])
            .collect();

        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            free: Mutex::new(free),
            capacity,
            buffer_len,
            allocated: AtomicUsize::new(capacity),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Acquires a buffer, waiting until one is free.
    ///
    /// Waiting yields to the runtime; it never spins. Returns
    /// [`PoolError::Cancelled`] if `cancellation` fires first, in which case
    /// the pool is left untouched.
    pub async fn acquire(
        &self,
        cancellation: &CancellationToken,
    ) -> Result<SampleBuffer<'_>, PoolError> {
        if cancellation.is_cancelled() {
            return Err(PoolError::Cancelled);
        }

        let permit = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(PoolError::Cancelled),
            permit = self.semaphore.clone().acquire_owned() => {
                permit.map_err(|_| PoolError::Closed)?
            }
        };

        self.checkout(permit)
    }

    /// Acquires a buffer without waiting.
    ///
    /// Returns `None` if every buffer is in use.
    pub fn try_acquire(&self) -> Option<SampleBuffer<'_>> {
        let permit = self.semaphore.clone().try_acquire_owned().ok()?;
        self.checkout(permit).ok()
    }

    fn checkout(&self, permit: OwnedSemaphorePermit) -> Result<SampleBuffer<'_>, PoolError> {
        let samples = self.free.lock().pop().ok_or(PoolError::Exhausted)?;

        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.update_peak(current);

        Ok(SampleBuffer {
            samples: Some(samples),
            pool: self,
            _permit: permit,
        })
    }

    /// Returns a buffer to the free list.
    fn release(&self, samples: Vec<ElevationPointSample>) {
        self.free.lock().push(samples);
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }

    /// Updates the peak counter if current exceeds it.
    fn update_peak(&self, current: usize) {
        let mut peak = self.peak_in_flight.load(Ordering::Relaxed);
        while current > peak {
            match self.peak_in_flight.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }

    /// Stops handing out buffers. Pending and future acquires fail with
    /// [`PoolError::Closed`]; buffers already out are still returned.
    pub fn close(&self) {
        self.semaphore.close();
    }

    /// Maximum number of buffers in circulation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of every buffer, in samples.
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Number of buffers currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Number of buffers currently handed out.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Peak number of buffers handed out at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    /// Resets the peak counter.
    pub fn reset_peak(&self) {
        self.peak_in_flight.store(0, Ordering::Relaxed);
    }

    /// Total number of buffers this pool has ever allocated.
    pub fn allocated_buffers(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }
}

/// A sample buffer checked out of a [`SampleBufferPool`].
///
/// Dereferences to the sample slice. The buffer goes back to the pool when
/// this guard is dropped, on every exit path.
pub struct SampleBuffer<'a> {
    samples: Option<Vec<ElevationPointSample>>,
    pool: &'a SampleBufferPool,
    // Declared last so the buffer is back on the free list before the
    // permit lets the next waiter in.
    _permit: OwnedSemaphorePermit,
}

impl Deref for SampleBuffer<'_> {
    type Target = [ElevationPointSample];

    fn deref(&self) -> &Self::Target {
        self.samples.as_deref().unwrap_or_default()
    }
}

impl DerefMut for SampleBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.samples.as_deref_mut().unwrap_or_default()
    }
}

impl Drop for SampleBuffer<'_> {
    fn drop(&mut self) {
        if let Some(samples) = self.samples.take() {
            self.pool.release(samples);
        }
    }
}

impl std::fmt::Debug for SampleBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleBuffer")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_and_release() {
        let pool = SampleBufferPool::new(2, 9);
        let cancellation = CancellationToken::new();

        let buffer = pool.acquire(&cancellation).await.unwrap();
        assert_eq!(buffer.len(), 9);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.in_flight(), 1);

        drop(buffer);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_buffers_are_reused() {
        let pool = SampleBufferPool::new(1, 4);
        let cancellation = CancellationToken::new();

        {
            let mut buffer = pool.acquire(&cancellation).await.unwrap();
            buffer[0].elevation = 42.0;
        }
        let buffer = pool.acquire(&cancellation).await.unwrap();

        // Same allocation comes back; callers repopulate before use
        assert_eq!(buffer[0].elevation, 42.0);
        assert_eq!(pool.allocated_buffers(), 1);
    }

    #[test]
    fn test_try_acquire_when_exhausted() {
        let pool = SampleBufferPool::new(1, 4);

        let first = pool.try_acquire();
        assert!(first.is_some());
        assert!(pool.try_acquire().is_none());

        drop(first);
        assert!(pool.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_cancelled_before_acquire() {
        let pool = SampleBufferPool::new(1, 4);
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = pool.acquire(&cancellation).await;
        assert_eq!(result.unwrap_err(), PoolError::Cancelled);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_while_waiting() {
        let pool = Arc::new(SampleBufferPool::new(1, 4));
        let held = pool.try_acquire().unwrap();

        let cancellation = CancellationToken::new();
        let waiter = {
            let pool = Arc::clone(&pool);
            let cancellation = cancellation.clone();
            tokio::spawn(async move { pool.acquire(&cancellation).await.map(|_| ()) })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancellation.cancel();

        let result = waiter.await.unwrap();
        assert_eq!(result, Err(PoolError::Cancelled));

        drop(held);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_waiter_wakes_on_release() {
        let pool = Arc::new(SampleBufferPool::new(1, 4));
        let held = pool.try_acquire().unwrap();

        let waiter = {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move {
                let cancellation = CancellationToken::new();
                pool.acquire(&cancellation).await.map(|b| b.len())
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(held);
        assert_eq!(waiter.await.unwrap(), Ok(4));
    }

    #[tokio::test]
    async fn test_peak_tracking() {
        let pool = SampleBufferPool::new(3, 1);

        let a = pool.try_acquire().unwrap();
        let b = pool.try_acquire().unwrap();
        assert_eq!(pool.peak_in_flight(), 2);

        drop(a);
        drop(b);
        assert_eq!(pool.peak_in_flight(), 2);

        pool.reset_peak();
        assert_eq!(pool.peak_in_flight(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool() {
        let pool = SampleBufferPool::new(1, 1);
        pool.close();

        let result = pool.acquire(&CancellationToken::new()).await;
        assert_eq!(result.unwrap_err(), PoolError::Closed);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        let _ = SampleBufferPool::new(0, 1);
    }
}
