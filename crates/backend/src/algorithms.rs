//! Policy-driven algorithm entry points.
//!
//! Each entry point selects a strategy from its policy and iterator types,
//! then picks one of three paths:
//! ```text
//! backend none      → calling thread (lanes when vector is allowed)
//! backend parallel  → ActiveExecutor (lanes inside each chunk when allowed)
//! ```

use execsel_core::{BackendKind, Categorized, ExecutionPolicy, Selected};
use tracing::debug;

use crate::executor::{preferred_chunk_size, ActiveExecutor, Executor};
use crate::lanes;

/// Apply `f` to every element of `data` in place.
pub fn for_each<P, T, F>(_policy: P, data: &mut [T], f: F)
where
    P: ExecutionPolicy,
    T: Send,
    F: Fn(&mut T) + Sync + Send,
{
    let descriptor = Selected::<P, (std::slice::IterMut<'_, T>,)>::DESCRIPTOR;
    debug!("for_each over {} items: policy={} {}", data.len(), P::KIND, descriptor);

    let kernel = |chunk: &mut [T]| {
        if descriptor.vector {
            lanes::for_each(chunk, &f);
        } else {
            chunk.iter_mut().for_each(&f);
        }
    };

    match descriptor.backend {
        BackendKind::None => kernel(data),
        BackendKind::Parallel => {
            let chunk_size = preferred_chunk_size(data.len());
            ActiveExecutor::for_each_chunk(data, chunk_size, kernel);
        }
    }
}

/// Map every element of `input` into a new vector, preserving order.
pub fn transform<P, T, U, F>(_policy: P, input: &[T], f: F) -> Vec<U>
where
    P: ExecutionPolicy,
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    let descriptor = Selected::<P, (std::slice::Iter<'_, T>,)>::DESCRIPTOR;
    debug!("transform over {} items: policy={} {}", input.len(), P::KIND, descriptor);

    match descriptor.backend {
        BackendKind::None => input.iter().map(f).collect(),
        BackendKind::Parallel => ActiveExecutor::map(input, f),
    }
}

/// Combine every element of `data` with `op`.
///
/// `identity` must be a true identity of `op`, and `op` must be associative.
/// Policies that allow vectorization also require `op` to be commutative.
pub fn reduce<P, T, F>(_policy: P, data: &[T], identity: T, op: F) -> T
where
    P: ExecutionPolicy,
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync + Send,
{
    let descriptor = Selected::<P, (std::slice::Iter<'_, T>,)>::DESCRIPTOR;
    debug!("reduce over {} items: policy={} {}", data.len(), P::KIND, descriptor);

    let fold = |chunk: &[T]| {
        if descriptor.vector {
            lanes::reduce(chunk, identity, &op)
        } else {
            lanes::reduce_scalar(chunk, identity, &op)
        }
    };

    match descriptor.backend {
        BackendKind::None => fold(data),
        BackendKind::Parallel => {
            let chunk_size = preferred_chunk_size(data.len());
            ActiveExecutor::reduce_chunks(data, chunk_size, identity, fold, &op)
        }
    }
}

/// Apply `f` to every item of an arbitrary categorized iterator.
///
/// Iterators that are not random-access never take the vectorized path; on
/// the parallel backend their items are handed out one at a time.
pub fn for_each_iter<P, I, F>(_policy: P, iter: I, f: F)
where
    P: ExecutionPolicy,
    I: Iterator + Categorized + Send,
    I::Item: Send,
    F: Fn(I::Item) + Sync + Send,
{
    let descriptor = Selected::<P, (I,)>::DESCRIPTOR;
    debug!("for_each_iter over {} iterator: policy={} {}", I::CATEGORY, P::KIND, descriptor);

    match descriptor.backend {
        BackendKind::None => iter.for_each(f),
        BackendKind::Parallel => ActiveExecutor::for_each_item(iter, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use execsel_core::{Opaque, PAR, PAR_UNSEQ, SEQ, UNSEQ};
    use proptest::prelude::*;
    use std::collections::LinkedList;
    use std::sync::Mutex;

    #[test]
    fn test_for_each_same_under_every_policy() {
        let base: Vec<i64> = (0..4097).collect();
        let square = |x: &mut i64| *x *= *x;

        let mut seq = base.clone();
        for_each(SEQ, &mut seq, square);
        let mut unseq = base.clone();
        for_each(UNSEQ, &mut unseq, square);
        let mut par = base.clone();
        for_each(PAR, &mut par, square);
        let mut par_unseq = base;
        for_each(PAR_UNSEQ, &mut par_unseq, square);

        assert_eq!(seq, unseq);
        assert_eq!(seq, par);
        assert_eq!(seq, par_unseq);
        assert_eq!(seq[4096], 4096 * 4096);
    }

    #[test]
    fn test_transform_preserves_order() {
        let input: Vec<u32> = (0..2500).collect();
        let expected: Vec<String> = input.iter().map(|x| x.to_string()).collect();
        assert_eq!(transform(SEQ, &input, |x| x.to_string()), expected);
        assert_eq!(transform(PAR, &input, |x| x.to_string()), expected);
        assert_eq!(transform(PAR_UNSEQ, &input, |x| x.to_string()), expected);
    }

    #[test]
    fn test_reduce_sum() {
        let input: Vec<u64> = (1..=100_000).collect();
        let expected = 100_000 * 100_001 / 2;
        assert_eq!(reduce(SEQ, &input, 0, |a, b| a + b), expected);
        assert_eq!(reduce(UNSEQ, &input, 0, |a, b| a + b), expected);
        assert_eq!(reduce(PAR, &input, 0, |a, b| a + b), expected);
        assert_eq!(reduce(PAR_UNSEQ, &input, 0, |a, b| a + b), expected);
    }

    #[test]
    fn test_reduce_empty() {
        let input: [u8; 0] = [];
        assert_eq!(reduce(PAR_UNSEQ, &input, 0, |a, b| a.max(b)), 0);
        assert_eq!(reduce(SEQ, &input, 0, |a, b| a.max(b)), 0);
    }

    #[test]
    fn test_for_each_iter_linked_list() {
        let list: LinkedList<u32> = (1..=200).collect();
        let seen = Mutex::new(Vec::new());
        for_each_iter(PAR_UNSEQ, list.iter(), |x| seen.lock().unwrap().push(*x));

        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn test_for_each_iter_sequenced_keeps_order() {
        let seen = Mutex::new(Vec::new());
        for_each_iter(SEQ, Opaque::new(0..10u32), |x| seen.lock().unwrap().push(x));
        assert_eq!(seen.into_inner().unwrap(), (0..10).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_reduce_agrees_across_policies(data in prop::collection::vec(any::<u32>(), 0..3000)) {
            let add = |a: u32, b: u32| a.wrapping_add(b);
            let expected = reduce(SEQ, &data, 0, add);
            prop_assert_eq!(reduce(UNSEQ, &data, 0, add), expected);
            prop_assert_eq!(reduce(PAR, &data, 0, add), expected);
            prop_assert_eq!(reduce(PAR_UNSEQ, &data, 0, add), expected);
        }
    }
}
