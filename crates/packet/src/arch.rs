//! Architecture tags and compile-time backend selection
//!
//! An architecture tag is a zero-sized marker type. It carries no runtime
//! state; its only job is to pick, through [`Supports`], the packet type that
//! implements a given element type on that instruction set.
//!
//! Tags exist only for backends compiled into this build. Naming a tag the
//! target does not provide (for example [`Neon`] on x86_64) is a compile
//! error, as is asking a tag for an element type it does not support.

use core::fmt::{self, Debug, Display};

use crate::traits::{Element, SimdPacket};

mod sealed {
    pub trait Sealed {}
}

/// Enumerated identity of every backend family this crate knows about
///
/// Unlike the tag types, this enum is always complete, so it can be matched
/// on and printed regardless of which backends the build target compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchKind {
    /// One-lane scalar fallback
    Plain,
    /// x86 SSE2, 128-bit registers
    Sse2,
    /// x86 AVX, 256-bit registers
    Avx,
    /// AArch64 Advanced SIMD, 128-bit registers
    Neon,
    /// PowerPC AltiVec/VSX, 128-bit registers
    AltiVec,
}

impl ArchKind {
    /// Short lowercase name of the backend
    pub const fn name(self) -> &'static str {
        match self {
            ArchKind::Plain => "plain",
            ArchKind::Sse2 => "sse2",
            ArchKind::Avx => "avx",
            ArchKind::Neon => "neon",
            ArchKind::AltiVec => "altivec",
        }
    }

    /// Register width in bytes
    pub const fn register_bytes(self) -> usize {
        match self {
            ArchKind::Plain => 8,
            ArchKind::Sse2 | ArchKind::Neon | ArchKind::AltiVec => 16,
            ArchKind::Avx => 32,
        }
    }
}

impl Display for ArchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time architecture tag
///
/// Sealed: backends are added inside this crate only.
pub trait Arch: Copy + Default + Debug + Send + Sync + sealed::Sealed + 'static {
    /// Enumerated identity of this tag
    const KIND: ArchKind;

    /// Alignment, in bytes, that buffers should honour to use aligned loads
    /// for every element type on this architecture
    const ALIGN_BYTES: usize = Self::KIND.register_bytes();
}

/// Maps an architecture tag and element type to its concrete packet
///
/// Only implemented for pairs that have a specialization; anything else fails
/// to compile.
pub trait Supports<T: Element>: Arch {
    /// The packet type for `T` on this architecture
    type Packet: SimdPacket<Scalar = T, Arch = Self>;
}

/// The packet type holding `T` lanes on architecture `A`
///
/// `A` defaults to [`Native`].
///
/// Operators only accept two packets of the same `(T, A)`:
///
/// ```compile_fail
/// use tensor_packet::{Packet, Plain, SimdPacket};
///
/// let a = Packet::<f32, Plain>::fill(1.0);
/// let b = Packet::<f64, Plain>::fill(1.0);
/// let _ = a + b;
/// ```
pub type Packet<T, A = Native> = <A as Supports<T>>::Packet;

/// One-lane scalar fallback, available on every target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Plain;

impl sealed::Sealed for Plain {}

impl Arch for Plain {
    const KIND: ArchKind = ArchKind::Plain;
}

impl Supports<f32> for Plain {
    type Packet = crate::backends::plain::PlainPacket<f32>;
}

impl Supports<f64> for Plain {
    type Packet = crate::backends::plain::PlainPacket<f64>;
}

/// x86 SSE2 (4 × f32, 2 × f64)
///
/// Its packets never combine with another backend's, even for the same
/// element type:
///
/// ```compile_fail
/// use tensor_packet::{Packet, Plain, SimdPacket, Sse2};
///
/// let _ = Packet::<f32, Plain>::fill(1.0) + Packet::<f32, Sse2>::fill(1.0);
/// ```
///
/// Two packets of the same tag do:
///
/// ```rust
/// use tensor_packet::{Packet, SimdPacket, Sse2};
///
/// let two = Packet::<f32, Sse2>::fill(1.0) + Packet::<f32, Sse2>::fill(1.0);
/// assert_eq!(two.sum(), 8.0);
/// ```
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sse2;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
mod sse2_tag {
    use super::*;
    use crate::backends::sse2::{Sse2PacketF32, Sse2PacketF64};

    impl sealed::Sealed for Sse2 {}

    impl Arch for Sse2 {
        const KIND: ArchKind = ArchKind::Sse2;
    }

    impl Supports<f32> for Sse2 {
        type Packet = Sse2PacketF32;
    }

    impl Supports<f64> for Sse2 {
        type Packet = Sse2PacketF64;
    }
}

/// x86 AVX (8 × f32, 4 × f64)
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Avx;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
mod avx_tag {
    use super::*;
    use crate::backends::avx::{AvxPacketF32, AvxPacketF64};

    impl sealed::Sealed for Avx {}

    impl Arch for Avx {
        const KIND: ArchKind = ArchKind::Avx;
    }

    impl Supports<f32> for Avx {
        type Packet = AvxPacketF32;
    }

    impl Supports<f64> for Avx {
        type Packet = AvxPacketF64;
    }
}

/// AArch64 NEON (4 × f32, 2 × f64)
///
/// Its packets never combine with another backend's, even for the same
/// element type:
///
/// ```compile_fail
/// use tensor_packet::{Packet, Plain, SimdPacket, Neon};
///
/// let _ = Packet::<f32, Plain>::fill(1.0) + Packet::<f32, Neon>::fill(1.0);
/// ```
///
/// Two packets of the same tag do:
///
/// ```rust
/// use tensor_packet::{Packet, SimdPacket, Neon};
///
/// let two = Packet::<f32, Neon>::fill(1.0) + Packet::<f32, Neon>::fill(1.0);
/// assert_eq!(two.sum(), 8.0);
/// ```
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Neon;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon_tag {
    use super::*;
    use crate::backends::neon::{NeonPacketF32, NeonPacketF64};

    impl sealed::Sealed for Neon {}

    impl Arch for Neon {
        const KIND: ArchKind = ArchKind::Neon;
    }

    impl Supports<f32> for Neon {
        type Packet = NeonPacketF32;
    }

    impl Supports<f64> for Neon {
        type Packet = NeonPacketF64;
    }
}

/// PowerPC AltiVec/VSX (4 × f32, 2 × f64)
///
/// Its packets never combine with another backend's, even for the same
/// element type:
///
/// ```compile_fail
/// use tensor_packet::{Packet, Plain, SimdPacket, AltiVec};
///
/// let _ = Packet::<f32, Plain>::fill(1.0) + Packet::<f32, AltiVec>::fill(1.0);
/// ```
///
/// Two packets of the same tag do:
///
/// ```rust
/// use tensor_packet::{Packet, SimdPacket, AltiVec};
///
/// let two = Packet::<f32, AltiVec>::fill(1.0) + Packet::<f32, AltiVec>::fill(1.0);
/// assert_eq!(two.sum(), 8.0);
/// ```
#[cfg(all(feature = "altivec", target_arch = "powerpc64", target_feature = "vsx"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AltiVec;

#[cfg(all(feature = "altivec", target_arch = "powerpc64", target_feature = "vsx"))]
mod altivec_tag {
    use super::*;
    use crate::backends::altivec::{AltiVecPacketF32, AltiVecPacketF64};

    impl sealed::Sealed for AltiVec {}

    impl Arch for AltiVec {
        const KIND: ArchKind = ArchKind::AltiVec;
    }

    impl Supports<f32> for AltiVec {
        type Packet = AltiVecPacketF32;
    }

    impl Supports<f64> for AltiVec {
        type Packet = AltiVecPacketF64;
    }
}

/// Best backend compiled for this build target
///
/// Resolves to AVX, then SSE2 on x86; NEON on aarch64; AltiVec on powerpc64
/// with the `altivec` feature; [`Plain`] otherwise or when `force-scalar` is
/// enabled.
#[cfg(all(
    not(feature = "force-scalar"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx"
))]
pub type Native = Avx;

/// Best backend compiled for this build target (SSE2)
#[cfg(all(
    not(feature = "force-scalar"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(target_feature = "avx")
))]
pub type Native = Sse2;

/// Best backend compiled for this build target (NEON)
#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub type Native = Neon;

/// Best backend compiled for this build target (AltiVec)
#[cfg(all(
    not(feature = "force-scalar"),
    feature = "altivec",
    target_arch = "powerpc64",
    target_feature = "vsx"
))]
pub type Native = AltiVec;

/// Best backend compiled for this build target (plain fallback)
#[cfg(any(
    feature = "force-scalar",
    not(any(
        all(
            any(target_arch = "x86", target_arch = "x86_64"),
            any(target_feature = "sse2", target_feature = "avx")
        ),
        all(target_arch = "aarch64", target_feature = "neon"),
        all(
            feature = "altivec",
            target_arch = "powerpc64",
            target_feature = "vsx"
        )
    ))
))]
pub type Native = Plain;

/// Identity of the [`Native`] backend
#[inline]
pub const fn native_kind() -> ArchKind {
    <Native as Arch>::KIND
}

/// Log which backend [`Native`] resolved to, with its lane counts
///
/// Returns the backend identity so callers can print or assert on it.
pub fn describe_native() -> ArchKind {
    let kind = native_kind();
    log::debug!(
        "native packet backend: {} ({} x f32, {} x f64, {}-byte alignment)",
        kind,
        <Packet<f32> as SimdPacket>::SIZE,
        <Packet<f64> as SimdPacket>::SIZE,
        <Native as Arch>::ALIGN_BYTES
    );
    kind
}
