//! Clock period inference from the raw clock trace.

use crate::wave::RawTrace;
use crate::{Error, Result};

/// Sampling geometry derived once from the clock signal.
///
/// The inference assumes a regular, glitch-free clock whose trace
/// alternates one low and one high entry per half period. An
/// irregular clock yields a silently wrong period; this is a
/// precondition on the input, not something we validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockGeometry {
    /// Timestamp of the first rising edge (the cycle 0 sample
    /// instant).
    pub first_edge: u64,
    /// Constant sampling period, in waveform time units.
    pub period: u64,
}

impl ClockGeometry {
    /// Scan `trace` for the first entry decoding to logic 1 (the
    /// first rising edge) and derive the period from the next
    /// rising edge, two entries later.
    pub fn infer(name: &str, trace: &RawTrace) -> Result<ClockGeometry> {
        let (idx, entry) = trace.iter().enumerate()
            .find(|(_, (_, bits))| is_high(bits))
            .ok_or_else(|| Error::NoRisingEdge(name.to_string()))?;
        let first_edge = entry.0;
        let next_edge = trace.get(idx + 2)
            .ok_or_else(|| Error::ClockTraceTooShort(name.to_string()))?
            .0;
        if next_edge <= first_edge {
            return Err(Error::BadClockPeriod {
                first: first_edge, next: next_edge
            });
        }
        Ok(ClockGeometry {
            first_edge,
            period: next_edge - first_edge,
        })
    }
}

/// A clock entry is high when its bit string decodes to exactly 1.
#[inline]
fn is_high(bits: &[u8]) -> bool {
    let mut v = 0u64;
    for &b in bits {
        v = (v << 1) | u64::from(b == b'1');
    }
    v == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(entries: &[(u64, &str)]) -> RawTrace {
        entries.iter()
            .map(|&(t, bits)| (t, bits.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn period_between_consecutive_rising_edges() {
        let clk = trace(&[
            (0, "0"), (5, "1"), (10, "0"), (15, "1"), (20, "0"),
        ]);
        let geom = ClockGeometry::infer("clk", &clk).unwrap();
        assert_eq!(geom.first_edge, 5);
        assert_eq!(geom.period, 10);
    }

    #[test]
    fn leading_high_entry_counts_as_rising_edge() {
        let clk = trace(&[(0, "1"), (5, "0"), (10, "1")]);
        let geom = ClockGeometry::infer("clk", &clk).unwrap();
        assert_eq!(geom.first_edge, 0);
        assert_eq!(geom.period, 10);
    }

    #[test]
    fn stuck_low_clock_is_fatal() {
        let clk = trace(&[(0, "0"), (10, "x"), (20, "0")]);
        let err = ClockGeometry::infer("clk", &clk).unwrap_err();
        assert!(matches!(err, Error::NoRisingEdge(_)));
    }

    #[test]
    fn trace_ending_before_second_edge_is_fatal() {
        let clk = trace(&[(0, "0"), (5, "1"), (10, "0")]);
        let err = ClockGeometry::infer("clk", &clk).unwrap_err();
        assert!(matches!(err, Error::ClockTraceTooShort(_)));
    }
}
