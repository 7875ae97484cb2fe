//! Lane kernels for the vectorized path.
//!
//! Work is laid out in fixed-width lanes with independent accumulators so
//! the compiler can keep each lane in a SIMD register. Reductions regroup
//! the operands, so results only match the scalar path for operations that
//! are associative and commutative.

/// Lane width.
pub const LANES: usize = 8;

/// Apply `f` to every element, lane by lane.
pub fn for_each<T, F>(data: &mut [T], f: &F)
where
    F: Fn(&mut T),
{
    let mut lanes = data.chunks_exact_mut(LANES);
    for lane in &mut lanes {
        for item in lane.iter_mut() {
            f(item);
        }
    }
    for item in lanes.into_remainder() {
        f(item);
    }
}

/// Reduce with one accumulator per lane.
pub fn reduce<T, F>(data: &[T], identity: T, op: &F) -> T
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    let mut acc = [identity; LANES];
    let lanes = data.chunks_exact(LANES);
    let rest = lanes.remainder();
    for lane in lanes {
        for (slot, &value) in acc.iter_mut().zip(lane) {
            *slot = op(*slot, value);
        }
    }

    let total = acc.into_iter().fold(identity, |a, b| op(a, b));
    rest.iter().fold(total, |a, &b| op(a, b))
}

/// Reduce without lanes, in element order.
pub fn reduce_scalar<T, F>(data: &[T], identity: T, op: &F) -> T
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    data.iter().fold(identity, |a, &b| op(a, b))
}
