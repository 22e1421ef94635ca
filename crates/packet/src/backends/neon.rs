//! NEON backend implementation (ARM64)
//!
//! 128-bit packets: 4 lanes of f32 (`float32x4_t`) and 2 lanes of f64
//! (`float64x2_t`). NEON is mandatory on aarch64, so no detection is needed.
//!
//! `vld1q`/`vst1q` accept any element-aligned address, so the aligned and
//! unaligned loads compile to the same instruction.

use super::{debug_assert_aligned, impl_register_ops};
use crate::arch::Neon;
use crate::traits::SimdPacket;
use core::arch::aarch64::*;

/// NEON packet of 4 × f32
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct NeonPacketF32(float32x4_t);

/// NEON packet of 2 × f64
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct NeonPacketF64(float64x2_t);

impl SimdPacket for NeonPacketF32 {
    type Scalar = f32;
    type Arch = Neon;

    const SIZE: usize = 4;

    #[inline(always)]
    fn fill(value: f32) -> Self {
        unsafe { NeonPacketF32(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        NeonPacketF32(vld1q_f32(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f32) -> Self {
        NeonPacketF32(vld1q_f32(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        vst1q_f32(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe {
            // Pairwise addition: (a0 + a1) + (a2 + a3)
            let pairs = vpaddq_f32(self.0, self.0); // [a0+a1, a2+a3, a0+a1, a2+a3]
            let total = vpaddq_f32(pairs, pairs);
            vgetq_lane_f32::<0>(total)
        }
    }
}

impl SimdPacket for NeonPacketF64 {
    type Scalar = f64;
    type Arch = Neon;

    const SIZE: usize = 2;

    #[inline(always)]
    fn fill(value: f64) -> Self {
        unsafe { NeonPacketF64(vdupq_n_f64(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f64) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        NeonPacketF64(vld1q_f64(src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f64) -> Self {
        NeonPacketF64(vld1q_f64(src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f64) {
        vst1q_f64(dst, self.0)
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        unsafe {
            let total = vpaddq_f64(self.0, self.0);
            vgetq_lane_f64::<0>(total)
        }
    }
}

impl_register_ops!(
    NeonPacketF32,
    add = vaddq_f32,
    sub = vsubq_f32,
    mul = vmulq_f32,
    div = vdivq_f32
);

impl_register_ops!(
    NeonPacketF64,
    add = vaddq_f64,
    sub = vsubq_f64,
    mul = vmulq_f64,
    div = vdivq_f64
);
