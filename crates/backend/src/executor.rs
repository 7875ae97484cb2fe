//! Backend executors.
//!
//! An executor is the mechanism that actually carries out work once a
//! strategy permits it. Two exist: [`SerialExecutor`] on the calling thread,
//! and [`RayonExecutor`] on rayon's work-stealing pool. [`ActiveExecutor`]
//! names the one this build was configured with.

use execsel_core::ParallelBackend;

#[cfg(feature = "backend-rayon")]
use rayon::prelude::*;

const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Chunk size used to split `total_items` between workers.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        DEFAULT_CHUNK_SIZE.min(total_items)
    }
}

/// Carries out chunked work over slices and plain iterators.
pub trait Executor {
    /// Which backend this executor implements.
    const BACKEND: ParallelBackend;

    /// Apply `f` to every chunk of `data`.
    fn for_each_chunk<T, F>(data: &mut [T], chunk_size: usize, f: F)
    where
        T: Send,
        F: Fn(&mut [T]) + Sync + Send;

    /// Map every element of `data`, preserving order.
    fn map<T, U, F>(data: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send;

    /// Fold each chunk with `fold`, then combine partial results with `op`.
    fn reduce_chunks<T, G, F>(data: &[T], chunk_size: usize, identity: T, fold: G, op: F) -> T
    where
        T: Copy + Send + Sync,
        G: Fn(&[T]) -> T + Sync + Send,
        F: Fn(T, T) -> T + Sync + Send;

    /// Apply `f` to every item of an iterator that cannot be split by index.
    fn for_each_item<I, F>(iter: I, f: F)
    where
        I: Iterator + Send,
        I::Item: Send,
        F: Fn(I::Item) + Sync + Send;
}

/// Runs everything on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    const BACKEND: ParallelBackend = ParallelBackend::Serial;

    fn for_each_chunk<T, F>(data: &mut [T], chunk_size: usize, f: F)
    where
        T: Send,
        F: Fn(&mut [T]) + Sync + Send,
    {
        data.chunks_mut(chunk_size.max(1)).for_each(f);
    }

    fn map<T, U, F>(data: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        data.iter().map(f).collect()
    }

    fn reduce_chunks<T, G, F>(data: &[T], chunk_size: usize, identity: T, fold: G, op: F) -> T
    where
        T: Copy + Send + Sync,
        G: Fn(&[T]) -> T + Sync + Send,
        F: Fn(T, T) -> T + Sync + Send,
    {
        data.chunks(chunk_size.max(1)).map(fold).fold(identity, op)
    }

    fn for_each_item<I, F>(iter: I, f: F)
    where
        I: Iterator + Send,
        I::Item: Send,
        F: Fn(I::Item) + Sync + Send,
    {
        iter.for_each(f);
    }
}

/// Runs work on rayon's global thread pool.
#[cfg(feature = "backend-rayon")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RayonExecutor;

#[cfg(feature = "backend-rayon")]
impl Executor for RayonExecutor {
    const BACKEND: ParallelBackend = ParallelBackend::TaskParallel;

    fn for_each_chunk<T, F>(data: &mut [T], chunk_size: usize, f: F)
    where
        T: Send,
        F: Fn(&mut [T]) + Sync + Send,
    {
        data.par_chunks_mut(chunk_size.max(1)).for_each(f);
    }

    fn map<T, U, F>(data: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        data.par_iter().map(f).collect()
    }

    fn reduce_chunks<T, G, F>(data: &[T], chunk_size: usize, identity: T, fold: G, op: F) -> T
    where
        T: Copy + Send + Sync,
        G: Fn(&[T]) -> T + Sync + Send,
        F: Fn(T, T) -> T + Sync + Send,
    {
        data.par_chunks(chunk_size.max(1))
            .map(fold)
            .reduce(|| identity, op)
    }

    fn for_each_item<I, F>(iter: I, f: F)
    where
        I: Iterator + Send,
        I::Item: Send,
        F: Fn(I::Item) + Sync + Send,
    {
        iter.par_bridge().for_each(f);
    }
}

/// The executor behind [`execsel_core::BackendKind::Parallel`] in this build.
#[cfg(feature = "backend-rayon")]
pub type ActiveExecutor = RayonExecutor;

/// The executor behind [`execsel_core::BackendKind::Parallel`] in this build.
#[cfg(not(feature = "backend-rayon"))]
pub type ActiveExecutor = SerialExecutor;

// The executor alias and the core backend constant come from the same feature.
const _: () = assert!(matches!(
    (ActiveExecutor::BACKEND, execsel_core::PAR_BACKEND),
    (ParallelBackend::TaskParallel, ParallelBackend::TaskParallel)
        | (ParallelBackend::Serial, ParallelBackend::Serial)
));

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_preferred_chunk_size() {
        assert_eq!(preferred_chunk_size(0), 1);
        assert_eq!(preferred_chunk_size(10), 10);
        assert_eq!(preferred_chunk_size(1_000_000), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_active_executor_matches_core() {
        assert_eq!(ActiveExecutor::BACKEND, execsel_core::PAR_BACKEND);
    }

    #[test]
    fn test_for_each_chunk_matches_serial() {
        let mut serial: Vec<u64> = (0..5000).collect();
        let mut active = serial.clone();
        let double = |chunk: &mut [u64]| chunk.iter_mut().for_each(|x| *x *= 2);

        SerialExecutor::for_each_chunk(&mut serial, 64, double);
        ActiveExecutor::for_each_chunk(&mut active, 64, double);

        assert_eq!(serial, active);
        assert_eq!(serial[4999], 9998);
    }

    #[test]
    fn test_map_preserves_order() {
        let input: Vec<u32> = (0..3000).collect();
        let serial = SerialExecutor::map(&input, |x| x + 1);
        let active = ActiveExecutor::map(&input, |x| x + 1);
        assert_eq!(serial, active);
        assert_eq!(active.first(), Some(&1));
        assert_eq!(active.last(), Some(&3000));
    }

    #[test]
    fn test_reduce_chunks_matches_serial() {
        let input: Vec<u64> = (1..=10_000).collect();
        let sum = |chunk: &[u64]| chunk.iter().sum::<u64>();
        let serial = SerialExecutor::reduce_chunks(&input, 128, 0, sum, |a, b| a + b);
        let active = ActiveExecutor::reduce_chunks(&input, 128, 0, sum, |a, b| a + b);
        assert_eq!(serial, 50_005_000);
        assert_eq!(serial, active);
    }

    #[test]
    fn test_reduce_chunks_empty_is_identity() {
        let input: Vec<u64> = Vec::new();
        let result = ActiveExecutor::reduce_chunks(&input, 0, 7, |c| c.iter().sum(), |a, b| a + b);
        assert_eq!(result, 7);
    }

    #[test]
    fn test_for_each_item_visits_everything() {
        let visited = AtomicUsize::new(0);
        let list: std::collections::LinkedList<usize> = (0..500).collect();
        ActiveExecutor::for_each_item(list.iter(), |x| {
            visited.fetch_add(*x, Ordering::Relaxed);
        });
        assert_eq!(visited.load(Ordering::Relaxed), (0..500).sum::<usize>());
    }
}
