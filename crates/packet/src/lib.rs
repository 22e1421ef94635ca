#![cfg_attr(not(test), no_std)]
#![cfg_attr(
    all(feature = "altivec", target_arch = "powerpc64"),
    feature(stdarch_powerpc, portable_simd)
)]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! tensor-packet: compile-time selected SIMD packets for tensor expression loops
//!
//! A packet is one hardware vector register viewed as `SIZE` lanes of `f32`
//! or `f64`. This crate gives every supported instruction set the same
//! packet interface, so an evaluator can be written once and monomorphize to
//! the best backend of the build target.
//!
//! # Features
//!
//! - **One contract, many backends**: plain (scalar), SSE2, AVX, NEON and
//!   AltiVec/VSX implement [`SimdPacket`]
//! - **Compile-time selection**: architecture tags are types; [`Native`]
//!   resolves to the best backend the build target provides
//! - **IEEE arithmetic**: `+ - * /` map to one vector instruction each, with
//!   no fused or reduced-precision shortcuts
//! - **Tree reductions**: [`SimdPacket::sum`] folds lanes pairwise
//! - **No allocations, no runtime checks** on the raw load/store path
//!
//! # Quick Start
//!
//! ```rust
//! use tensor_packet::{Packet, SimdPacket};
//!
//! fn dot(a: &[f32], b: &[f32]) -> f32 {
//!     let size = <Packet<f32> as SimdPacket>::SIZE;
//!     let mut acc = Packet::<f32>::fill(0.0);
//!     for (x, y) in a.chunks_exact(size).zip(b.chunks_exact(size)) {
//!         acc += Packet::<f32>::from_slice(x) * Packet::<f32>::from_slice(y);
//!     }
//!     acc.sum()
//! }
//!
//! let a = [1.0f32; 16];
//! let b = [2.0f32; 16];
//! assert_eq!(dot(&a, &b), 32.0);
//! ```

// Core trait definitions
pub mod traits;

// Architecture tags and backend selection
pub mod arch;

// Backend implementations
pub mod backends;

// Alignment helpers
pub mod align;

// Operator tags for kernels
pub mod ops;

// Slice kernels
pub mod kernel;

// Aligned fixed-size buffers
pub mod block;

// Public re-exports for convenience
pub use traits::{Element, SimdPacket};

pub use arch::{describe_native, native_kind, Arch, ArchKind, Native, Packet, Plain, Supports};

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use arch::Sse2;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
pub use arch::Avx;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use arch::Neon;

#[cfg(all(feature = "altivec", target_arch = "powerpc64", target_feature = "vsx"))]
pub use arch::AltiVec;

pub use backends::plain::PlainPacket;

pub use block::AlignedBlock;
