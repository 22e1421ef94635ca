//! Fixed-size aligned buffers with packet-granular access
//!
//! An [`AlignedBlock`] is 64-byte aligned, which satisfies the natural
//! alignment of every backend's packets. Packet `k` of a block therefore
//! always starts on an aligned address, and the block can use the aligned
//! [`SimdPacket::load`] path safely.
//!
//! # Memory Layout
//!
//! Elements are stored sequentially and processed in packet-sized chunks:
//!
//! ```text
//! AlignedBlock<f32, 16> with 4-lane packets:
//! [0  1  2  3] [4  5  6  7] [8  9  10 11] [12 13 14 15]
//!  └ packet 0┘  └ packet 1┘  └ packet 2 ┘  └ packet 3 ┘
//! ```

use core::marker::PhantomData;

use crate::traits::{Element, SimdPacket};

/// Fixed-size buffer aligned for packet loads
///
/// # Example
///
/// ```rust
/// use tensor_packet::{AlignedBlock, Packet, SimdPacket};
///
/// let mut block = AlignedBlock::<f32, 16>::new();
/// for i in 0..16 {
///     block[i] = i as f32;
/// }
///
/// let half = Packet::<f32>::fill(0.5);
/// for k in 0..block.packet_count::<Packet<f32>>() {
///     let p = block.load_packet::<Packet<f32>>(k);
///     block.store_packet(k, p * half);
/// }
/// assert_eq!(block[15], 7.5);
/// ```
#[derive(Clone, Copy, PartialEq)]
#[repr(C, align(64))] // 64-byte alignment covers every register width
pub struct AlignedBlock<T, const N: usize> {
    data: [T; N],
}

impl<T: Element, const N: usize> AlignedBlock<T, N> {
    /// Create a new block filled with zeros
    #[inline]
    pub fn new() -> Self {
        Self { data: [T::ZERO; N] }
    }

    /// Create a block from a slice
    ///
    /// # Panics
    ///
    /// Panics if slice length doesn't match block size N
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            N,
            "Slice length {} doesn't match block size {}",
            slice.len(),
            N
        );
        let mut data = [T::ZERO; N];
        data.copy_from_slice(slice);
        Self { data }
    }

    /// Returns the number of elements in this block
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true if the block holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns a slice view of the entire block
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice view of the entire block
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of whole packets of type `P` in the block
    ///
    /// # Panics
    ///
    /// Panics if N is not a multiple of `P::SIZE`.
    #[inline]
    pub fn packet_count<P: SimdPacket<Scalar = T>>(&self) -> usize {
        assert_eq!(
            N % P::SIZE,
            0,
            "Block size {} must be divisible by packet size {}",
            N,
            P::SIZE
        );
        N / P::SIZE
    }

    /// Load packet `index` with the aligned load
    ///
    /// # Panics
    ///
    /// Panics if the packet would extend past the end of the block.
    #[inline]
    pub fn load_packet<P: SimdPacket<Scalar = T>>(&self, index: usize) -> P {
        assert!(index < N / P::SIZE, "Packet {} out of block bounds", index);
        let start = index * P::SIZE;
        // SAFETY: bounds checked above; the block is 64-byte aligned and
        // `start * size_of::<T>()` is a multiple of the packet width
        unsafe { P::load(self.data.as_ptr().add(start)) }
    }

    /// Store `packet` into packet slot `index`
    ///
    /// # Panics
    ///
    /// Panics if the packet would extend past the end of the block.
    #[inline]
    pub fn store_packet<P: SimdPacket<Scalar = T>>(&mut self, index: usize, packet: P) {
        assert!(index < N / P::SIZE, "Packet {} out of block bounds", index);
        let start = index * P::SIZE;
        // SAFETY: bounds checked above
        unsafe { packet.store(self.data.as_mut_ptr().add(start)) }
    }

    /// Iterate over the block as packets of type `P`
    ///
    /// # Panics
    ///
    /// Panics if N is not a multiple of `P::SIZE`.
    #[inline]
    pub fn packets<P: SimdPacket<Scalar = T>>(&self) -> Packets<'_, T, P> {
        let count = self.packet_count::<P>();
        Packets {
            data: &self.data,
            index: 0,
            count,
            _phantom: PhantomData,
        }
    }
}

impl<T: Element, const N: usize> Default for AlignedBlock<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const N: usize> core::fmt::Debug for AlignedBlock<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T, const N: usize> core::ops::Index<usize> for AlignedBlock<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize> core::ops::IndexMut<usize> for AlignedBlock<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// Iterator over the aligned packets of a block
pub struct Packets<'a, T, P: SimdPacket<Scalar = T>> {
    data: &'a [T],
    index: usize,
    count: usize,
    _phantom: PhantomData<P>,
}

impl<'a, T, P: SimdPacket<Scalar = T>> Iterator for Packets<'a, T, P> {
    type Item = P;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.count {
            // SAFETY: index < count keeps the load inside the block, and the
            // block's alignment carries over to every packet boundary
            let packet = unsafe { P::load(self.data.as_ptr().add(self.index * P::SIZE)) };
            self.index += 1;
            Some(packet)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T, P: SimdPacket<Scalar = T>> ExactSizeIterator for Packets<'a, T, P> {}
