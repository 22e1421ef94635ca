//! AltiVec/VSX backend implementation (PowerPC64)
//!
//! 128-bit packets: 4 lanes of f32 (`vector_float`) and 2 lanes of f64
//! (`vector_double`). VSX loads and stores (`lxvw4x`/`stxvw4x` via
//! `vec_xl`/`vec_xst` for f32, `lxvd2x`/`stxvd2x` for f64) tolerate any
//! element-aligned address, so the aligned and unaligned loads share one
//! instruction.
//!
//! `core::arch::powerpc64` only provides `vec_*` memory and arithmetic
//! intrinsics for `vector_float`. The f64 packet therefore moves through
//! memory with plain unaligned register reads and writes. All four
//! operators go through `core::simd` lanes, which lower to
//! `xvadd`/`xvsub`/`xvmul`/`xvdiv`.
//!
//! The PowerPC intrinsics and `core::simd` are both unstable; this module is
//! only built with the `altivec` feature on a nightly toolchain.

use core::arch::powerpc64::*;
use core::mem::transmute;
use core::simd::{f32x4, f64x2};

use super::{debug_assert_aligned, impl_register_ops};
use crate::arch::AltiVec;
use crate::traits::SimdPacket;

/// Lane-wise binary operator on a register type, through its `core::simd` view
macro_rules! lanewise {
    ($name:ident, $reg:ty, $lanes:ty, $op:tt) => {
        #[inline(always)]
        unsafe fn $name(lhs: $reg, rhs: $reg) -> $reg {
            let lhs: $lanes = transmute(lhs);
            let rhs: $lanes = transmute(rhs);
            transmute(lhs $op rhs)
        }
    };
}

lanewise!(add_ps, vector_float, f32x4, +);
lanewise!(sub_ps, vector_float, f32x4, -);
lanewise!(mul_ps, vector_float, f32x4, *);
lanewise!(div_ps, vector_float, f32x4, /);

lanewise!(add_pd, vector_double, f64x2, +);
lanewise!(sub_pd, vector_double, f64x2, -);
lanewise!(mul_pd, vector_double, f64x2, *);
lanewise!(div_pd, vector_double, f64x2, /);

/// AltiVec packet of 4 × f32
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct AltiVecPacketF32(vector_float);

/// VSX packet of 2 × f64
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct AltiVecPacketF64(vector_double);

impl SimdPacket for AltiVecPacketF32 {
    type Scalar = f32;
    type Arch = AltiVec;

    const SIZE: usize = 4;

    #[inline(always)]
    fn fill(value: f32) -> Self {
        unsafe { AltiVecPacketF32(vec_splats(value)) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        AltiVecPacketF32(vec_xl(0, src))
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f32) -> Self {
        AltiVecPacketF32(vec_xl(0, src))
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        vec_xst(self.0, 0, dst)
    }

    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe {
            // Rotate by one lane and add: every lane holds an adjacent pair.
            // Rotate by two lanes and add: every lane holds the total.
            let pairs = add_ps(self.0, vec_sld::<vector_float, 12>(self.0, self.0));
            let total = add_ps(pairs, vec_sld::<vector_float, 8>(pairs, pairs));
            transmute::<vector_float, [f32; 4]>(total)[0]
        }
    }
}

impl SimdPacket for AltiVecPacketF64 {
    type Scalar = f64;
    type Arch = AltiVec;

    const SIZE: usize = 2;

    #[inline(always)]
    fn fill(value: f64) -> Self {
        unsafe { AltiVecPacketF64(transmute::<[f64; 2], vector_double>([value; 2])) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f64) -> Self {
        debug_assert_aligned(src, Self::ALIGN);
        AltiVecPacketF64(src.cast::<vector_double>().read())
    }

    #[inline(always)]
    unsafe fn load_unaligned(src: *const f64) -> Self {
        AltiVecPacketF64(src.cast::<vector_double>().read_unaligned())
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f64) {
        dst.cast::<vector_double>().write_unaligned(self.0)
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        // A single add of the two lanes; no fold order to choose
        let lanes = unsafe { transmute::<vector_double, [f64; 2]>(self.0) };
        lanes[0] + lanes[1]
    }
}

impl_register_ops!(
    AltiVecPacketF32,
    add = add_ps,
    sub = sub_ps,
    mul = mul_ps,
    div = div_ps
);

impl_register_ops!(
    AltiVecPacketF64,
    add = add_pd,
    sub = sub_pd,
    mul = mul_pd,
    div = div_pd
);
