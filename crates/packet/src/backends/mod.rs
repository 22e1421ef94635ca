//! Packet backend implementations
//!
//! Each backend is an independent module. The plain backend is always
//! compiled; the vector backends are compiled when the build target provides
//! their instruction set (`target_feature`), so they are selected entirely at
//! build time and never dispatched at runtime.

// Plain backend (always available as fallback)
pub mod plain;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub mod sse2;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
pub mod avx;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;

#[cfg(all(feature = "altivec", target_arch = "powerpc64", target_feature = "vsx"))]
pub mod altivec;

// The AltiVec intrinsics need VSX for unaligned and f64 vector access
#[cfg(all(feature = "altivec", target_arch = "powerpc64", not(target_feature = "vsx")))]
compile_error!(
    "The altivec backend requires VSX. Build with RUSTFLAGS=\"-C target-feature=+vsx\" or drop the altivec feature."
);

/// Implement the four arithmetic operators (and their compound-assignment
/// forms) for a register-wrapping packet type.
///
/// `$wrap` is the tuple struct, the remaining arguments are the intrinsics
/// taking two registers and returning one.
#[allow(unused_macros)]
macro_rules! impl_register_ops {
    ($wrap:ident, add = $add:path, sub = $sub:path, mul = $mul:path, div = $div:path) => {
        impl core::ops::Add for $wrap {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { $wrap($add(self.0, rhs.0)) }
            }
        }

        impl core::ops::Sub for $wrap {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { $wrap($sub(self.0, rhs.0)) }
            }
        }

        impl core::ops::Mul for $wrap {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { $wrap($mul(self.0, rhs.0)) }
            }
        }

        impl core::ops::Div for $wrap {
            type Output = Self;

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                unsafe { $wrap($div(self.0, rhs.0)) }
            }
        }

        impl core::ops::AddAssign for $wrap {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::SubAssign for $wrap {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::ops::MulAssign for $wrap {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl core::ops::DivAssign for $wrap {
            #[inline(always)]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use impl_register_ops;

/// Debug-only check of the aligned-load precondition
#[inline(always)]
pub(crate) fn debug_assert_aligned<T>(ptr: *const T, align: usize) {
    debug_assert!(
        (ptr as usize) % align == 0,
        "aligned packet load from {:p} is not {}-byte aligned",
        ptr,
        align
    );
}
