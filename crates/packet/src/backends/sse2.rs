//! SSE2 backend implementation (x86 / x86-64)
//!
//! 128-bit packets: 4 lanes of f32 (`__m128`) and 2 lanes of f64 (`__m128d`).
//! SSE2 is part of the x86-64 baseline, so this backend is compiled on every
//! x86-64 build.

use super::{debug_assert_aligned, impl_register_ops};
use crate::arch::Sse2;
use crate::traits::SimdPacket;

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// SSE2 packet of 4 × f32
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Sse2PacketF32(__m128);

/// SSE2 packet of 2 × f64
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Sse2PacketF64(__m128d);

/// Fold four f32 lanes as `(a0 + a2) + (a1 + a3)`
#[inline(always)]
pub(crate) unsafe fn fold_ps(v: __m128) -> f32 {
    let high = _mm_movehl_ps(v, v); // [a2, a3, a2, a3]
    let pairs = _mm_add_ps(v, high); // [a0+a2, a1+a3, ..]
    let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
    _mm_cvtss_f32(_mm_add_ss(pairs, odd))
}

/// Fold two f64 lanes as `a0 + a1`
#[inline(always)]
pub(crate) unsafe fn fold_pd(v: __m128d) -> f64 {
    let high = _mm_unpackhi_pd(v, v);
    _mm_cvtsd_f64(_mm_add_sd(v, high))
}

impl SimdPacket for Sse2PacketF32 {
    type Scalar = f32;
    type Arch = Sse2;

    const SIZE: usize = 4;

    #[inline(always)]
    fn fill(value: f32) -> Self {
        unsafe { Sse2PacketF32(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        Sse2PacketF32(_mm_load_ps(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f32) -> Self {
        Sse2PacketF32(_mm_loadu_ps(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        _mm_storeu_ps(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe { fold_ps(self.0) }
    }
}

impl SimdPacket for Sse2PacketF64 {
    type Scalar = f64;
    type Arch = Sse2;

    const SIZE: usize = 2;

    #[inline(always)]
    fn fill(value: f64) -> Self {
        unsafe { Sse2PacketF64(_mm_set1_pd(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f64) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        Sse2PacketF64(_mm_load_pd(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f64) -> Self {
        Sse2PacketF64(_mm_loadu_pd(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f64) {
        _mm_storeu_pd(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe { fold_pd(self.0) }
    }
}

impl_register_ops!(
    Sse2PacketF32,
    add = _mm_add_ps,
    sub = _mm_sub_ps,
    mul = _mm_mul_ps,
    div = _mm_div_ps
);

impl_register_ops!(
    Sse2PacketF64,
    add = _mm_add_pd,
    sub = _mm_sub_pd,
    mul = _mm_mul_pd,
    div = _mm_div_pd
);
