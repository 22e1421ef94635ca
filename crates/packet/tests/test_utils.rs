//! Test utilities for tensor-packet
//!
//! Provides proptest strategies, lane extraction and assertion helpers, and a
//! macro that runs a generic check against every backend compiled for the
//! current target.
#![allow(dead_code, unused_macros)]

use proptest::prelude::*;
use tensor_packet::{Element, SimdPacket, Supports};

/// Every architecture tag supports both element types
pub trait TestArch: Supports<f32> + Supports<f64> {}

impl<A: Supports<f32> + Supports<f64>> TestArch for A {}

/// Run `$check::<Arch>()` for every architecture tag compiled in this build
macro_rules! for_each_arch {
    ($check:ident) => {{
        $check::<tensor_packet::Plain>();

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
        $check::<tensor_packet::Sse2>();

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
        $check::<tensor_packet::Avx>();

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        $check::<tensor_packet::Neon>();

        #[cfg(all(feature = "altivec", target_arch = "powerpc64", target_feature = "vsx"))]
        $check::<tensor_packet::AltiVec>();
    }};
}

// ============================================================================
// Lane helpers
// ============================================================================

/// Store every lane of `packet` into a fresh vector
pub fn lanes<P: SimdPacket>(packet: P) -> Vec<P::Scalar> {
    let mut out = vec![<P::Scalar as Element>::ZERO; P::SIZE];
    packet.to_slice(&mut out);
    out
}

/// Packet type for element `T` on architecture `A`
pub type PacketOf<A, T> = <A as Supports<T>>::Packet;

/// Build a packet from the first `SIZE` values of `values`
pub fn packet_from<A: Supports<T>, T: Element>(values: &[T]) -> PacketOf<A, T> {
    <PacketOf<A, T> as SimdPacket>::from_slice(values)
}

/// Lane count of packet type for `T` on `A`
pub fn size_of_packet<A: Supports<T>, T: Element>() -> usize {
    <PacketOf<A, T> as SimdPacket>::SIZE
}

/// Bit patterns of an f32 slice (distinguishes -0.0 and NaN payloads)
pub fn bits_f32(values: &[f32]) -> Vec<u32> {
    values.iter().map(|x| x.to_bits()).collect()
}

/// Bit patterns of an f64 slice
pub fn bits_f64(values: &[f64]) -> Vec<u64> {
    values.iter().map(|x| x.to_bits()).collect()
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert lane-for-lane IEEE equality, treating NaN as equal to NaN
pub fn assert_lanes_ieee_eq<T: Element>(actual: &[T], expected: &[T], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: lane count mismatch",
        context
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        #[allow(clippy::eq_op)]
        let both_nan = a != a && e != e;
        assert!(
            both_nan || a == e,
            "{} (lane {}): expected {:?}, got {:?}",
            context,
            i,
            e,
            a
        );
    }
}

/// Assert that a reduction result is within `ulps * n * eps * sum(|x|)`
///
/// This is the standard bound for any summation order of `n` terms.
pub fn assert_sum_within_bound_f64(actual: f64, values: &[f64], context: &str) {
    let exact: f64 = values.iter().sum();
    let magnitude: f64 = values.iter().map(|x| x.abs()).sum();
    let bound = values.len() as f64 * f64::EPSILON * magnitude;
    assert!(
        (actual - exact).abs() <= bound,
        "{}: sum {} too far from {} (bound {:e})",
        context,
        actual,
        exact,
        bound
    );
}

/// f32 version of [`assert_sum_within_bound_f64`], reference computed in f64
pub fn assert_sum_within_bound_f32(actual: f32, values: &[f32], context: &str) {
    let exact: f64 = values.iter().map(|&x| x as f64).sum();
    let magnitude: f64 = values.iter().map(|&x| (x as f64).abs()).sum();
    let bound = values.len() as f64 * f32::EPSILON as f64 * magnitude;
    assert!(
        (actual as f64 - exact).abs() <= bound,
        "{}: sum {} too far from {} (bound {:e})",
        context,
        actual,
        exact,
        bound
    );
}

// ============================================================================
// Proptest Strategies
// ============================================================================

/// Normal f32 values in [-1000, 1000], plus zero
pub fn normal_f32() -> impl Strategy<Value = f32> {
    (-1000.0f32..=1000.0f32).prop_filter("not denormal or special", |&x| x.is_normal() || x == 0.0)
}

/// Normal f64 values in [-1e6, 1e6], plus zero
pub fn normal_f64() -> impl Strategy<Value = f64> {
    (-1.0e6f64..=1.0e6f64).prop_filter("not denormal or special", |&x| x.is_normal() || x == 0.0)
}

/// Any f32 bit pattern class, including NaN, infinities, signed zeros and
/// subnormals
pub fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => normal_f32(),
        1 => Just(0.0f32),
        1 => Just(-0.0f32),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
        1 => Just(f32::NAN),
        1 => Just(f32::MIN_POSITIVE / 4.0),
        1 => Just(f32::MAX),
    ]
}

/// Any f64 class, including specials
pub fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => normal_f64(),
        1 => Just(0.0f64),
        1 => Just(-0.0f64),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => Just(f64::NAN),
        1 => Just(f64::MIN_POSITIVE / 4.0),
        1 => Just(f64::MAX),
    ]
}

/// Eight f32 values: enough lanes for the widest backend
pub fn lanes_f32() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(any_f32(), 8)
}

/// Eight f64 values: enough lanes for the widest backend
pub fn lanes_f64() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(any_f64(), 8)
}
