//! ## `simtoggle`: cycle-aligned waveform toggle extraction
//!
//! This converts an event-driven waveform trace (VCD) into a
//! clock-cycle-aligned table, annotating every sampled signal with
//! its per-cycle value and the Hamming distance (bitwise toggle
//! count) from the previous cycle, plus a global toggle aggregate
//! per cycle.
//!
//! See the `simtoggle` binary for example usage.

pub mod clock;
pub mod hamming;
pub mod resample;
pub mod siglist;
pub mod table;
pub mod wave;

pub use clock::ClockGeometry;
pub use resample::{CycleTrace, CycleTraces, Value};
pub use siglist::{SignalList, SignalSpec};
pub use wave::{RawTrace, Waveform};

use thiserror::Error;

/// Fatal conditions. Any of these aborts the whole conversion:
/// a partial conversion has no defined meaning since every later
/// stage depends on invariants established by earlier ones.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// No signal in the list carries the `CLOCK` marker.
    #[error("no clock signal in the signal list")]
    NoClock,
    /// More than one signal carries the `CLOCK` marker.
    #[error("multiple clock signals in the signal list: {0} and {1}")]
    MultipleClocks(String, String),
    /// A `[H:L]` range token without its closing bracket.
    #[error("incompletely specified range for signal {signal}: {token}")]
    UnclosedRange { signal: String, token: String },
    /// A range token that is neither a bit index nor `[H:L]`.
    #[error("malformed range token for signal {signal}: {token}")]
    BadRangeToken { signal: String, token: String },
    /// A `[H:L]` range with H < L.
    #[error("illegal range for signal {signal}: [{high}:{low}]")]
    IllegalRange { signal: String, high: u32, low: u32 },
    /// A requested signal is absent from the waveform's declared
    /// variable list.
    #[error("signal {0} not found in the waveform")]
    SignalNotFound(String),
    /// The clock trace never decodes to logic 1.
    #[error("could not find a rising edge on clock {0}")]
    NoRisingEdge(String),
    /// The clock trace ends before a full period elapses after the
    /// first rising edge.
    #[error("clock trace of {0} is too short to infer a period")]
    ClockTraceTooShort(String),
    /// Two consecutive rising edges with non-increasing timestamps.
    #[error("inferred clock period is not positive ({first} -> {next})")]
    BadClockPeriod { first: u64, next: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
