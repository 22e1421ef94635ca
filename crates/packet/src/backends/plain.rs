//! Plain backend implementation
//!
//! A one-lane packet wrapping the element itself. It compiles everywhere and
//! serves as the scalar reference the vector backends are tested against.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use super::debug_assert_aligned;
use crate::arch::Plain;
use crate::traits::{Element, SimdPacket};

/// Plain packet wrapper (single lane)
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct PlainPacket<T>(pub T);

impl<T: Element> SimdPacket for PlainPacket<T> {
    type Scalar = T;
    type Arch = Plain;

    const SIZE: usize = 1;

    #[inline(always)]
    fn fill(value: T) -> Self {
        PlainPacket(value)
    }

    #[inline(always)]
    unsafe fn load(src: *const T) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        PlainPacket(src.read())
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const T) -> Self {
        PlainPacket(src.read_unaligned())
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut T) {
        dst.write_unaligned(self.0)
    }

    #[inline(always)]
    fn sum(self) -> T {
        self.0
    }
}

impl<T: Element> Add for PlainPacket<T> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        PlainPacket(self.0 + rhs.0)
    }
}

impl<T: Element> Sub for PlainPacket<T> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        PlainPacket(self.0 - rhs.0)
    }
}

impl<T: Element> Mul for PlainPacket<T> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        PlainPacket(self.0 * rhs.0)
    }
}

impl<T: Element> Div for PlainPacket<T> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        PlainPacket(self.0 / rhs.0)
    }
}

impl<T: Element> AddAssign for PlainPacket<T> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl<T: Element> SubAssign for PlainPacket<T> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl<T: Element> MulAssign for PlainPacket<T> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl<T: Element> DivAssign for PlainPacket<T> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        self.0 /= rhs.0;
    }
}
