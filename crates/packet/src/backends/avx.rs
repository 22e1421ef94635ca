//! AVX backend implementation (x86-64)
//!
//! 256-bit packets: 8 lanes of f32 (`__m256`) and 4 lanes of f64 (`__m256d`).
//! Compiled only when the build enables AVX (for example
//! `-C target-cpu=native` on a Sandy Bridge or newer host); there is no
//! runtime CPU detection.

use super::sse2::{fold_pd, fold_ps};
use super::{debug_assert_aligned, impl_register_ops};
use crate::arch::Avx;
use crate::traits::SimdPacket;

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX packet of 8 × f32
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct AvxPacketF32(__m256);

/// AVX packet of 4 × f64
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct AvxPacketF64(__m256d);

impl SimdPacket for AvxPacketF32 {
    type Scalar = f32;
    type Arch = Avx;

    const SIZE: usize = 8;

    #[inline(always)]
    fn fill(value: f32) -> Self {
        unsafe { AvxPacketF32(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        AvxPacketF32(_mm256_load_ps(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f32) -> Self {
        AvxPacketF32(_mm256_loadu_ps(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        _mm256_storeu_ps(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe {
            // Fold the upper 128-bit half onto the lower, then fold 4 lanes
            let high = _mm256_extractf128_ps::<1>(self.0);
            let low = _mm256_castps256_ps128(self.0);
            fold_ps(_mm_add_ps(low, high))
        }
    }
}

impl SimdPacket for AvxPacketF64 {
    type Scalar = f64;
    type Arch = Avx;

    const SIZE: usize = 4;

    #[inline(always)]
    fn fill(value: f64) -> Self {
        unsafe { AvxPacketF64(_mm256_set1_pd(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f64) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        AvxPacketF64(_mm256_load_pd(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f64) -> Self {
        AvxPacketF64(_mm256_loadu_pd(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f64) {
        _mm256_storeu_pd(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe {
            let high = _mm256_extractf128_pd::<1>(self.0);
            let low = _mm256_castpd256_pd128(self.0);
            fold_pd(_mm_add_pd(low, high))
        }
    }
}

impl_register_ops!(
    AvxPacketF32,
    add = _mm256_add_ps,
    sub = _mm256_sub_ps,
    mul = _mm256_mul_ps,
    div = _mm256_div_ps
);

impl_register_ops!(
    AvxPacketF64,
    add = _mm256_add_pd,
    sub = _mm256_sub_pd,
    mul = _mm256_mul_pd,
    div = _mm256_div_pd
);

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C, align(32))]
    struct Aligned<T>(T);

    #[test]
    fn test_avx_arithmetic() {
        let a = AvxPacketF32::fill(2.0);
        let b = AvxPacketF32::fill(3.0);

        assert_eq!((a + b).sum(), 40.0); // 5.0 * 8 lanes
        assert_eq!((a - b).sum(), -8.0); // -1.0 * 8 lanes
        assert_eq!((a * b).sum(), 48.0); // 6.0 * 8 lanes
    }

    #[test]
    fn test_avx_sum_sequence() {
        let data = Aligned([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let packet = unsafe { AvxPacketF32::load(data.0.as_ptr()) };
        assert_eq!(packet.sum(), 36.0);

        let data = Aligned([0.5f64, 1.5, 2.5, 3.5]);
        let packet = unsafe { AvxPacketF64::load(data.0.as_ptr()) };
        assert_eq!(packet.sum(), 8.0);
    }

    #[test]
    fn test_avx_unaligned_matches_aligned() {
        let data = Aligned([0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let aligned = unsafe { AvxPacketF64::load(data.0.as_ptr().add(4)) };
        let unaligned = unsafe { AvxPacketF64::load_unaligned(data.0.as_ptr().add(4)) };

        let mut a = [0.0f64; 4];
        let mut b = [0.0f64; 4];
        aligned.to_slice(&mut a);
        unaligned.to_slice(&mut b);
        assert_eq!(a, b);
        assert_eq!(a, [4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_avx_div_by_zero() {
        let q = AvxPacketF64::fill(-2.0) / AvxPacketF64::fill(0.0);
        let mut buf = [0.0f64; 4];
        q.to_slice(&mut buf);
        assert!(buf.iter().all(|&x| x == f64::NEG_INFINITY));
    }
}
