//! Packet contract tests
//!
//! Every check is generic over the architecture tag and runs once per backend
//! compiled for the current target.

use tensor_packet::{AlignedBlock, Native, SimdPacket};

#[macro_use]
mod test_utils;

use test_utils::*;

fn check_lane_counts<A: TestArch>() {
    let f32_size = size_of_packet::<A, f32>();
    let f64_size = size_of_packet::<A, f64>();

    assert!(f32_size >= 1 && f32_size.is_power_of_two());
    assert!(f64_size >= 1 && f64_size.is_power_of_two());

    if A::KIND != tensor_packet::ArchKind::Plain {
        // Vector backends: register width / element width
        assert_eq!(f32_size * 4, A::KIND.register_bytes(), "{}", A::KIND);
        assert_eq!(f64_size * 8, A::KIND.register_bytes(), "{}", A::KIND);
        assert_eq!(<PacketOf<A, f32> as SimdPacket>::ALIGN, A::ALIGN_BYTES);
    }
}

#[test]
fn test_lane_counts() {
    for_each_arch!(check_lane_counts);
}

fn check_fill_store<A: TestArch>() {
    for s in [0.0f32, -0.0, 1.5, -3.25, f32::MAX, f32::INFINITY] {
        let got = lanes(<PacketOf<A, f32>>::fill(s));
        assert_eq!(bits_f32(&got), vec![s.to_bits(); got.len()], "{} fill {}", A::KIND, s);
    }

    for s in [0.0f64, -0.0, 2.5e-300, -7.0, f64::NEG_INFINITY] {
        let got = lanes(<PacketOf<A, f64>>::fill(s));
        assert_eq!(bits_f64(&got), vec![s.to_bits(); got.len()], "{} fill {}", A::KIND, s);
    }

    let nan = lanes(<PacketOf<A, f32>>::fill(f32::NAN));
    assert!(nan.iter().all(|x| x.is_nan()));
}

#[test]
fn test_fill_broadcasts_every_lane() {
    for_each_arch!(check_fill_store);
}

fn check_fill_matches_load<A: TestArch>() {
    let mut block = AlignedBlock::<f64, 8>::new();
    for i in 0..8 {
        block[i] = 0.1;
    }
    let loaded = lanes(block.load_packet::<PacketOf<A, f64>>(0));
    let filled = lanes(<PacketOf<A, f64>>::fill(0.1));
    assert_eq!(bits_f64(&loaded), bits_f64(&filled), "{}", A::KIND);
}

#[test]
fn test_fill_bit_identical_to_load_of_copies() {
    for_each_arch!(check_fill_matches_load);
}

fn check_assign<A: TestArch>() {
    let mut packet = <PacketOf<A, f32>>::fill(1.0);
    packet.assign(-2.0);
    assert!(lanes(packet).iter().all(|&x| x == -2.0), "{}", A::KIND);
}

#[test]
fn test_scalar_assignment_broadcasts() {
    for_each_arch!(check_assign);
}

fn check_store_writes_exactly_size<A: TestArch>() {
    let size = size_of_packet::<A, f32>();
    let mut buf = vec![-1.0f32; size + 2];
    let packet = <PacketOf<A, f32>>::fill(9.0);

    // SAFETY: buf has room for SIZE elements from offset 1
    unsafe { packet.store(buf.as_mut_ptr().add(1)) };

    assert_eq!(buf[0], -1.0, "{}: wrote before dst", A::KIND);
    assert!(buf[1..=size].iter().all(|&x| x == 9.0));
    assert_eq!(buf[size + 1], -1.0, "{}: wrote past SIZE", A::KIND);
}

#[test]
fn test_store_writes_exactly_size_elements() {
    for_each_arch!(check_store_writes_exactly_size);
}

fn check_sum_sequence<A: TestArch>() {
    let values: Vec<f32> = (1..=8).map(|i| i as f32).collect();
    let size = size_of_packet::<A, f32>();
    let packet = packet_from::<A, f32>(&values);
    let expected: f32 = values[..size].iter().sum();
    assert_eq!(packet.sum(), expected, "{}", A::KIND);
}

#[test]
fn test_sum_of_sequential_lanes() {
    for_each_arch!(check_sum_sequence);
}

fn check_sum_of_fill<A: TestArch>() {
    let size = size_of_packet::<A, f64>();
    for c in [0.25f64, 1.0, -8.0, 1024.0] {
        assert_eq!(<PacketOf<A, f64>>::fill(c).sum(), c * size as f64, "{}", A::KIND);
    }

    let size = size_of_packet::<A, f32>();
    for c in [0.5f32, 2.0, -16.0] {
        assert_eq!(<PacketOf<A, f32>>::fill(c).sum(), c * size as f32, "{}", A::KIND);
    }
}

#[test]
fn test_sum_of_fill_is_c_times_size() {
    for_each_arch!(check_sum_of_fill);
}

fn check_elementwise<A: TestArch>() {
    let a = [1.5f64, -2.0, 3.0, 0.1, 7.0, -0.0, 1e300, 5.0];
    let b = [0.5f64, 4.0, -3.0, 0.2, 0.0, 2.0, 1e300, -5.0];
    let size = size_of_packet::<A, f64>();

    let pa = packet_from::<A, f64>(&a);
    let pb = packet_from::<A, f64>(&b);

    let scalar = |f: fn(f64, f64) -> f64| -> Vec<f64> {
        a[..size].iter().zip(&b[..size]).map(|(&x, &y)| f(x, y)).collect()
    };

    assert_lanes_ieee_eq(&lanes(pa + pb), &scalar(|x, y| x + y), "add");
    assert_lanes_ieee_eq(&lanes(pa - pb), &scalar(|x, y| x - y), "sub");
    assert_lanes_ieee_eq(&lanes(pa * pb), &scalar(|x, y| x * y), "mul");
    assert_lanes_ieee_eq(&lanes(pa / pb), &scalar(|x, y| x / y), "div");

    let mut acc = pa;
    acc += pb;
    acc *= pb;
    assert_lanes_ieee_eq(&lanes(acc), &scalar(|x, y| (x + y) * y), "compound");
}

#[test]
fn test_elementwise_operators_match_scalar() {
    for_each_arch!(check_elementwise);
}

// ============================================================================
// Concrete scenarios
// ============================================================================

fn check_four_lane_sum<A: TestArch>() {
    if size_of_packet::<A, f32>() != 4 {
        return;
    }
    let block = AlignedBlock::<f32, 4>::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(block.load_packet::<PacketOf<A, f32>>(0).sum(), 10.0, "{}", A::KIND);
}

#[test]
fn test_four_lane_f32_sum_one_to_four() {
    for_each_arch!(check_four_lane_sum);
}

#[test]
fn test_native_f64_fill_times_fill() {
    let size = size_of_packet::<Native, f64>();
    let product = <PacketOf<Native, f64>>::fill(3.0) * <PacketOf<Native, f64>>::fill(4.0);

    let mut out = vec![0.0f64; size];
    product.to_slice(&mut out);
    assert_eq!(out, vec![12.0; size]);
}

#[test]
fn test_native_f32_subtract_lanes() {
    let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let b = [4.0f32, 3.0, 2.0, 1.0, 0.0, -1.0, -2.0, -3.0];
    let expected = [-3.0f32, -1.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0];
    let size = size_of_packet::<Native, f32>();

    let diff = packet_from::<Native, f32>(&a) - packet_from::<Native, f32>(&b);
    assert_eq!(lanes(diff), expected[..size].to_vec());
}

#[test]
fn test_describe_native_reports_backend() {
    let kind = tensor_packet::describe_native();
    assert_eq!(kind, tensor_packet::native_kind());
    assert!(!kind.name().is_empty());
}
