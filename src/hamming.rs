//! Bitwise toggle counting.

use crate::resample::Value;

/// Hamming distance between two decoded samples: the number of
/// bit positions in which they differ.
#[inline]
pub fn distance(a: Value, b: Value) -> u32 {
    (a ^ b).count_ones()
}

/// Extract the inclusive bit range `[high:low]` of `v`.
#[inline]
pub fn mask_range(v: Value, high: u32, low: u32) -> Value {
    debug_assert!(high >= low);
    if low >= Value::BITS {
        return 0;
    }
    let width = high - low + 1;
    let mask = if width >= Value::BITS {
        Value::MAX
    } else {
        (1 << width) - 1
    };
    (v >> low) & mask
}
