//! Alignment helpers for buffers that feed packet loads
//!
//! The aligned [`SimdPacket::load`] path requires addresses aligned to the
//! register width. These helpers let the caller check pointers and size row
//! pitches so every row starts on an aligned boundary.

use crate::arch::Arch;
use crate::traits::SimdPacket;

/// Returns true if `ptr` satisfies the buffer alignment of architecture `A`
#[inline]
pub fn is_aligned<A: Arch, T>(ptr: *const T) -> bool {
    (ptr as usize) % A::ALIGN_BYTES == 0
}

/// Returns true if `ptr` can be passed to `P::load`
#[inline]
pub fn is_packet_aligned<P: SimdPacket>(ptr: *const P::Scalar) -> bool {
    (ptr as usize) % P::ALIGN == 0
}

/// Number of `T` elements in one alignment unit of architecture `A`
#[inline]
pub const fn align_elements<A: Arch, T>() -> usize {
    let per_unit = A::ALIGN_BYTES / core::mem::size_of::<T>();
    if per_unit == 0 {
        1
    } else {
        per_unit
    }
}

/// Round an element count up to a whole number of alignment units
///
/// Used to pick a row pitch: rows of `upper_align::<A, T>(width)` elements in
/// an aligned allocation all begin on an aligned address.
///
/// # Example
///
/// ```rust
/// use tensor_packet::align::upper_align;
/// use tensor_packet::Plain;
///
/// // Plain aligns to 8 bytes: two f32 per unit
/// assert_eq!(upper_align::<Plain, f32>(5), 6);
/// assert_eq!(upper_align::<Plain, f64>(5), 5);
/// ```
#[inline]
pub const fn upper_align<A: Arch, T>(len: usize) -> usize {
    let unit = align_elements::<A, T>();
    len.div_ceil(unit) * unit
}

/// Split a length into the part covered by whole packets and the tail
///
/// Returns `(body, tail)` with `body` a multiple of `P::SIZE` and
/// `body + tail == len`.
#[inline]
pub const fn packet_split<P: SimdPacket>(len: usize) -> (usize, usize) {
    let tail = len % P::SIZE;
    (len - tail, tail)
}
