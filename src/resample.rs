//! Event-driven to per-cycle resampling.
//!
//! Every sampled signal is put on the clock grid by hold-last-value
//! sampling: at each sample instant, the value in effect is the
//! last change at or before that instant. Indeterminate bits decode
//! to 0 and are tallied for an aggregate diagnostic.

use crate::clock::ClockGeometry;
use crate::siglist::SignalList;
use crate::wave::{RawTrace, Waveform};
use compact_str::CompactString;
use indexmap::IndexMap;

/// A decoded sample. Bit strings wider than 128 bits keep their
/// low 128 bits.
pub type Value = u128;

/// A signal's decoded value for every cycle index, dense.
pub type CycleTrace = Vec<Value>;

/// One signal's resampling result.
pub struct Resampled {
    pub values: CycleTrace,
    /// Indeterminate (`x`/`z`) bits substituted with 0 while
    /// decoding this signal.
    pub xz_count: u64,
}

/// Decode an MSB-first bit string, substituting 0 for every
/// indeterminate bit and counting the substitutions.
fn decode_bits(bits: &[u8], xz_count: &mut u64) -> Value {
    let mut v: Value = 0;
    for &b in bits {
        let bit = match b {
            b'1' => 1,
            b'x' | b'z' | b'X' | b'Z' => {
                *xz_count += 1;
                0
            }
            _ => 0,
        };
        v = v.wrapping_shl(1) | bit;
    }
    v
}

/// Resample one signal's raw trace onto the clock grid.
///
/// The cursor seeks while transitions remain ahead of it and the
/// next one is at or before the sample instant; once it sits on
/// the last event the signal is exhausted and cycle advancement
/// stops (the trace is later padded to the global cycle count).
/// A trace whose cursor never produced a sample decodes its last
/// entry directly as the sole cycle-0 value.
pub fn resample(trace: &RawTrace, geom: ClockGeometry) -> Resampled {
    let mut values = CycleTrace::new();
    let mut xz_count = 0;
    let mut sample_time = geom.first_edge;
    let mut cursor = 0;
    while cursor + 1 < trace.len() {
        while cursor + 1 < trace.len() && trace[cursor + 1].0 <= sample_time {
            cursor += 1;
        }
        values.push(decode_bits(&trace[cursor].1, &mut xz_count));
        if cursor + 1 < trace.len() {
            sample_time += geom.period;
        }
    }
    if values.is_empty() {
        if let Some((_, bits)) = trace.last() {
            values.push(decode_bits(bits, &mut xz_count));
        }
    }
    Resampled { values, xz_count }
}

/// All sampled signals on the common cycle grid.
pub struct CycleTraces {
    /// Name to dense per-cycle values, in resolved signal order;
    /// every trace has exactly `max_cycle + 1` entries.
    pub traces: IndexMap<CompactString, CycleTrace>,
    pub max_cycle: usize,
    /// Total indeterminate bits substituted across all signals.
    pub xz_count: u64,
}

impl CycleTraces {
    /// Resample every sampled (non-clock) signal of `list`.
    pub fn build(list: &SignalList, wave: &Waveform, geom: ClockGeometry) -> CycleTraces {
        Self::from_traces(
            list.sampled().iter()
                .map(|spec| (spec.name.clone(), wave.trace(&spec.name))),
            geom,
        )
    }

    /// Resample the given raw traces and equalize their lengths:
    /// signals that stopped toggling early repeat their final
    /// value up to the global maximum cycle index.
    pub fn from_traces<'t>(
        sigs: impl Iterator<Item = (CompactString, &'t RawTrace)>,
        geom: ClockGeometry,
    ) -> CycleTraces {
        let mut traces = IndexMap::new();
        let mut max_cycle = 0;
        let mut xz_count = 0;
        for (name, raw) in sigs {
            let r = resample(raw, geom);
            xz_count += r.xz_count;
            max_cycle = max_cycle.max(r.values.len().saturating_sub(1));
            traces.insert(name, r.values);
        }
        for values in traces.values_mut() {
            let last = values.last().copied().unwrap_or(0);
            values.resize(max_cycle + 1, last);
        }
        CycleTraces { traces, max_cycle, xz_count }
    }

    /// Number of cycles in the table.
    #[inline]
    pub fn cycles(&self) -> usize {
        self.max_cycle + 1
    }
}
