//! Compile-time operator tags
//!
//! Kernels take the operation as a zero-sized type parameter instead of a
//! closure or enum, so each `(operation, backend)` pair monomorphizes to a
//! straight-line loop with the operator inlined. Every tag has a packet form
//! and a scalar form; the scalar form handles the tail that does not fill a
//! whole packet and must agree lane-for-lane with the packet form.

use crate::traits::{Element, SimdPacket};

/// Elementwise binary operation
pub trait BinaryOp {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// Apply to every lane of two packets
    fn packet<P: SimdPacket>(lhs: P, rhs: P) -> P;

    /// Apply to two scalars
    fn scalar<T: Element>(lhs: T, rhs: T) -> T;
}

/// `lhs + rhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Plus;

/// `lhs - rhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Minus;

/// `lhs * rhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply;

/// `lhs / rhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Divide;

/// `rhs`, ignoring `lhs`
#[derive(Debug, Clone, Copy, Default)]
pub struct Right;

impl BinaryOp for Plus {
    const NAME: &'static str = "plus";

    #[inline(always)]
    fn packet<P: SimdPacket>(lhs: P, rhs: P) -> P {
        lhs + rhs
    }

    #[inline(always)]
    fn scalar<T: Element>(lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}

impl BinaryOp for Minus {
    const NAME: &'static str = "minus";

    #[inline(always)]
    fn packet<P: SimdPacket>(lhs: P, rhs: P) -> P {
        lhs - rhs
    }

    #[inline(always)]
    fn scalar<T: Element>(lhs: T, rhs: T) -> T {
        lhs - rhs
    }
}

impl BinaryOp for Multiply {
    const NAME: &'static str = "mul";

    #[inline(always)]
    fn packet<P: SimdPacket>(lhs: P, rhs: P) -> P {
        lhs * rhs
    }

    #[inline(always)]
    fn scalar<T: Element>(lhs: T, rhs: T) -> T {
        lhs * rhs
    }
}

impl BinaryOp for Divide {
    const NAME: &'static str = "div";

    #[inline(always)]
    fn packet<P: SimdPacket>(lhs: P, rhs: P) -> P {
        lhs / rhs
    }

    #[inline(always)]
    fn scalar<T: Element>(lhs: T, rhs: T) -> T {
        lhs / rhs
    }
}

impl BinaryOp for Right {
    const NAME: &'static str = "right";

    #[inline(always)]
    fn packet<P: SimdPacket>(_lhs: P, rhs: P) -> P {
        rhs
    }

    #[inline(always)]
    fn scalar<T: Element>(_lhs: T, rhs: T) -> T {
        rhs
    }
}

/// How a computed value is written into its destination
///
/// A saver is a binary operation whose left operand is the current content of
/// the destination.
pub trait SaveOp {
    /// Operation combining `(dst, value)` into the new `dst`
    type Op: BinaryOp;

    /// False when the old destination content is never read
    const READS_DST: bool = true;
}

/// `dst = value`
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveTo;

/// `dst += value`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlusTo;

/// `dst -= value`
#[derive(Debug, Clone, Copy, Default)]
pub struct MinusTo;

/// `dst *= value`
#[derive(Debug, Clone, Copy, Default)]
pub struct MulTo;

/// `dst /= value`
#[derive(Debug, Clone, Copy, Default)]
pub struct DivTo;

impl SaveOp for SaveTo {
    type Op = Right;
    const READS_DST: bool = false;
}

impl SaveOp for PlusTo {
    type Op = Plus;
}

impl SaveOp for MinusTo {
    type Op = Minus;
}

impl SaveOp for MulTo {
    type Op = Multiply;
}

impl SaveOp for DivTo {
    type Op = Divide;
}
