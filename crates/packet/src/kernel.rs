//! Slice kernels: the evaluator side of the packet contract
//!
//! These functions drive packets over contiguous slices the way an
//! expression evaluator does:
//! - Chunking the slices into whole packets
//! - Loading each chunk, applying the operator, storing the result
//! - Processing the remainder with the scalar form of the same operator
//!
//! The architecture is a type parameter, so a call such as
//! `map_binary::<Native, f32, Plus>` is resolved entirely at compile time.
//! Slice lengths are checked once per call; the per-packet loop carries no
//! checks.

use crate::arch::{Arch, Supports};
use crate::ops::{BinaryOp, SaveOp};
use crate::traits::{Element, SimdPacket};

#[inline(always)]
fn trace_call<A: Arch, T: Element>(kernel: &str, op: &str, len: usize, size: usize) {
    log::trace!(
        "{}<{}, {}, {}>: {} elements, {} packets of {}, {} tail",
        kernel,
        A::KIND,
        T::NAME,
        op,
        len,
        len / size,
        size,
        len % size
    );
}

/// Compute `out[i] = O(lhs[i], rhs[i])` for every element
///
/// # Panics
///
/// Panics if the three slices do not have the same length.
///
/// # Example
///
/// ```rust
/// use tensor_packet::kernel::map_binary;
/// use tensor_packet::ops::Minus;
/// use tensor_packet::Native;
///
/// let a = [1.0f32, 2.0, 3.0, 4.0, 5.0];
/// let b = [4.0f32, 3.0, 2.0, 1.0, 0.0];
/// let mut out = [0.0f32; 5];
/// map_binary::<Native, f32, Minus>(&a, &b, &mut out);
/// assert_eq!(out, [-3.0, -1.0, 1.0, 3.0, 5.0]);
/// ```
#[inline]
pub fn map_binary<A, T, O>(lhs: &[T], rhs: &[T], out: &mut [T])
where
    A: Supports<T>,
    T: Element,
    O: BinaryOp,
{
    assert_eq!(
        lhs.len(),
        out.len(),
        "Left input and output slices must have the same length"
    );
    assert_eq!(
        rhs.len(),
        out.len(),
        "Right input and output slices must have the same length"
    );

    let size = <A::Packet as SimdPacket>::SIZE;
    trace_call::<A, T>("map_binary", O::NAME, out.len(), size);

    let mut out_chunks = out.chunks_exact_mut(size);
    let mut lhs_chunks = lhs.chunks_exact(size);
    let mut rhs_chunks = rhs.chunks_exact(size);

    for ((dst, a), b) in (&mut out_chunks).zip(&mut lhs_chunks).zip(&mut rhs_chunks) {
        // SAFETY: chunks_exact yields exactly SIZE elements per chunk
        unsafe {
            let a = A::Packet::load_unaligned(a.as_ptr());
            let b = A::Packet::load_unaligned(b.as_ptr());
            O::packet(a, b).store(dst.as_mut_ptr());
        }
    }

    // Process remainder with the scalar form
    for ((dst, &a), &b) in out_chunks
        .into_remainder()
        .iter_mut()
        .zip(lhs_chunks.remainder())
        .zip(rhs_chunks.remainder())
    {
        *dst = O::scalar(a, b);
    }
}

/// Compute `out[i] = O(lhs[i], rhs)` with a broadcast right operand
///
/// # Panics
///
/// Panics if `lhs` and `out` differ in length.
#[inline]
pub fn map_scalar<A, T, O>(lhs: &[T], rhs: T, out: &mut [T])
where
    A: Supports<T>,
    T: Element,
    O: BinaryOp,
{
    assert_eq!(
        lhs.len(),
        out.len(),
        "Input and output slices must have the same length"
    );

    let size = <A::Packet as SimdPacket>::SIZE;
    trace_call::<A, T>("map_scalar", O::NAME, out.len(), size);

    let broadcast = A::Packet::fill(rhs);
    let mut out_chunks = out.chunks_exact_mut(size);
    let mut lhs_chunks = lhs.chunks_exact(size);

    for (dst, a) in (&mut out_chunks).zip(&mut lhs_chunks) {
        // SAFETY: chunks_exact yields exactly SIZE elements per chunk
        unsafe {
            let a = A::Packet::load_unaligned(a.as_ptr());
            O::packet(a, broadcast).store(dst.as_mut_ptr());
        }
    }

    for (dst, &a) in out_chunks
        .into_remainder()
        .iter_mut()
        .zip(lhs_chunks.remainder())
    {
        *dst = O::scalar(a, rhs);
    }
}

/// Write `src` into `dst` through saver `S` (`dst[i] = S(dst[i], src[i])`)
///
/// # Panics
///
/// Panics if `dst` and `src` differ in length.
///
/// # Example
///
/// ```rust
/// use tensor_packet::kernel::save;
/// use tensor_packet::ops::PlusTo;
/// use tensor_packet::Native;
///
/// let mut acc = [1.0f64; 3];
/// save::<Native, f64, PlusTo>(&mut acc, &[1.0, 2.0, 3.0]);
/// assert_eq!(acc, [2.0, 3.0, 4.0]);
/// ```
#[inline]
pub fn save<A, T, S>(dst: &mut [T], src: &[T])
where
    A: Supports<T>,
    T: Element,
    S: SaveOp,
{
    assert_eq!(
        dst.len(),
        src.len(),
        "Destination and source slices must have the same length"
    );

    let size = <A::Packet as SimdPacket>::SIZE;
    trace_call::<A, T>("save", <S::Op as BinaryOp>::NAME, dst.len(), size);

    let mut dst_chunks = dst.chunks_exact_mut(size);
    let mut src_chunks = src.chunks_exact(size);

    for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
        // SAFETY: chunks_exact yields exactly SIZE elements per chunk
        unsafe {
            let value = A::Packet::load_unaligned(s.as_ptr());
            let result = if S::READS_DST {
                let old = A::Packet::load_unaligned(d.as_ptr());
                <S::Op as BinaryOp>::packet(old, value)
            } else {
                value
            };
            result.store(d.as_mut_ptr());
        }
    }

    for (d, &s) in dst_chunks
        .into_remainder()
        .iter_mut()
        .zip(src_chunks.remainder())
    {
        *d = <S::Op as BinaryOp>::scalar(*d, s);
    }
}

/// Broadcast `value` into every element of `dst`
#[inline]
pub fn fill<A, T>(dst: &mut [T], value: T)
where
    A: Supports<T>,
    T: Element,
{
    let size = <A::Packet as SimdPacket>::SIZE;
    trace_call::<A, T>("fill", "splat", dst.len(), size);

    let broadcast = A::Packet::fill(value);
    let mut chunks = dst.chunks_exact_mut(size);
    for chunk in &mut chunks {
        // SAFETY: chunks_exact yields exactly SIZE elements per chunk
        unsafe { broadcast.store(chunk.as_mut_ptr()) };
    }
    for slot in chunks.into_remainder() {
        *slot = value;
    }
}

/// Sum every element of `data`
///
/// Whole packets are accumulated lane-wise, the accumulator is reduced with
/// [`SimdPacket::sum`], and the tail is added last. The result is therefore
/// not bit-identical to a sequential scalar sum, and may differ between
/// backends with different lane counts.
///
/// # Example
///
/// ```rust
/// use tensor_packet::kernel::sum;
/// use tensor_packet::Native;
///
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert_eq!(sum::<Native, f64>(&data), 55.0);
/// ```
#[inline]
pub fn sum<A, T>(data: &[T]) -> T
where
    A: Supports<T>,
    T: Element,
{
    let size = <A::Packet as SimdPacket>::SIZE;
    trace_call::<A, T>("sum", "plus", data.len(), size);

    let chunks = data.chunks_exact(size);
    let tail = chunks.remainder();

    let mut acc = A::Packet::fill(T::ZERO);
    for chunk in chunks {
        // SAFETY: chunks_exact yields exactly SIZE elements per chunk
        acc += unsafe { A::Packet::load_unaligned(chunk.as_ptr()) };
    }

    let mut total = acc.sum();
    for &x in tail {
        total += x;
    }
    total
}
