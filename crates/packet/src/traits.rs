//! Core packet abstraction traits
//!
//! This module defines the contract every backend implements. Generic
//! evaluator code is written once against [`SimdPacket`] and monomorphizes to
//! the register operations of whichever backend the build selected.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::arch::Arch;

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Scalar element type a packet can hold (`f32` or `f64`)
///
/// Sealed: integer and mixed-precision packets are not supported.
pub trait Element:
    Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + sealed::Sealed
    + 'static
{
    /// Additive identity
    const ZERO: Self;

    /// Type name used in diagnostics
    const NAME: &'static str;
}

impl Element for f32 {
    const ZERO: Self = 0.0;
    const NAME: &'static str = "f32";
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const NAME: &'static str = "f64";
}

/// Fixed-width SIMD packet of `SIZE` lanes of [`Element`]
///
/// Every `(element, architecture)` pair has exactly one implementor. The
/// arithmetic operators are supertraits, so `a + b` only type-checks when both
/// operands are the same packet type; mixing architectures or element types
/// is rejected by the compiler.
///
/// There is deliberately no `Default` bound: a packet is only ever created by
/// [`fill`](SimdPacket::fill), a load, or an operator.
///
/// # Example
///
/// ```rust
/// use tensor_packet::{Native, Packet, SimdPacket};
///
/// let a = Packet::<f32, Native>::fill(2.0);
/// let b = Packet::<f32, Native>::fill(3.0);
/// let sum = (a + b).sum();
/// assert_eq!(sum, 5.0 * Packet::<f32, Native>::SIZE as f32);
/// ```
pub trait SimdPacket:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Lane element type
    type Scalar: Element;

    /// Architecture tag this packet belongs to
    type Arch: Arch;

    /// Number of lanes (register width / element width)
    const SIZE: usize;

    /// Natural alignment of the aligned [`load`](SimdPacket::load), in bytes
    const ALIGN: usize = core::mem::size_of::<Self>();

    /// Broadcast `value` to every lane
    fn fill(value: Self::Scalar) -> Self;

    /// Load `SIZE` contiguous elements from an aligned address
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `SIZE` elements and aligned to
    /// [`ALIGN`](SimdPacket::ALIGN) bytes.
    unsafe fn load(src: *const Self::Scalar) -> Self;

    /// Load `SIZE` contiguous elements from any address
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `SIZE` elements.
    unsafe fn load_unaligned(src: *const Self::Scalar) -> Self;

    /// Write all `SIZE` lanes to contiguous memory starting at `dst`
    ///
    /// Exactly `SIZE * size_of::<Scalar>()` bytes are written. No alignment
    /// is required.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `SIZE` elements.
    unsafe fn store(self, dst: *mut Self::Scalar);

    /// Sum of all lanes, folded as a pairwise tree
    ///
    /// The fold order is backend specific, so the result may differ from a
    /// left-to-right scalar sum in the last bits.
    fn sum(self) -> Self::Scalar;

    /// Overwrite every lane with `value`
    #[inline(always)]
    fn assign(&mut self, value: Self::Scalar) {
        *self = Self::fill(value);
    }

    /// Load the first `SIZE` elements of a slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` has fewer than `SIZE` elements.
    #[inline(always)]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        assert!(slice.len() >= Self::SIZE, "Slice too short for packet load");
        // SAFETY: length checked above, no alignment required
        unsafe { Self::load_unaligned(slice.as_ptr()) }
    }

    /// Store all lanes into the first `SIZE` elements of a slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` has fewer than `SIZE` elements.
    #[inline(always)]
    fn to_slice(self, slice: &mut [Self::Scalar]) {
        assert!(slice.len() >= Self::SIZE, "Slice too short for packet store");
        // SAFETY: length checked above, store has no alignment requirement
        unsafe { self.store(slice.as_mut_ptr()) }
    }
}
