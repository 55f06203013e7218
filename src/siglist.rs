//! Target signal list parsing.
//!
//! Each line names one signal in its full hierarchical
//! "scope.signal" form, optionally followed by either the literal
//! marker `CLOCK` (as the sole remaining token) or one or more
//! bit-range tokens: `7` for a single bit, `[7:4]` for an
//! inclusive high:low range.

use crate::{Error, Result};
use compact_str::CompactString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One requested signal with its optional bit ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSpec {
    pub name: CompactString,
    /// Inclusive (high, low) ranges, in declaration order.
    /// Empty means the full signal width.
    pub ranges: Vec<(u32, u32)>,
    pub is_clock: bool,
}

/// The resolved signal list: the clock at index 0 (it anchors
/// cycle 0), every other signal in file order.
#[derive(Debug, Clone)]
pub struct SignalList {
    pub signals: Vec<SignalSpec>,
}

impl SignalList {
    /// Read and parse a signal list file.
    pub fn load(path: impl AsRef<Path>) -> Result<SignalList> {
        let f = BufReader::new(File::open(path)?);
        let lines = f.lines().collect::<std::io::Result<Vec<_>>>()?;
        Self::parse(lines.iter().map(|l| l.as_str()))
    }

    /// Parse signal list lines. Blank lines are skipped.
    pub fn parse<'i>(lines: impl Iterator<Item = &'i str>) -> Result<SignalList> {
        let mut signals: Vec<SignalSpec> = Vec::new();
        let mut clock_at = None;
        for line in lines {
            let mut toks = line.split_whitespace();
            let name: CompactString = match toks.next() {
                Some(t) => t.into(),
                None => continue,
            };
            let toks: Vec<&str> = toks.collect();
            if toks == ["CLOCK"] {
                if let Some(at) = clock_at {
                    let prev: &SignalSpec = &signals[at];
                    return Err(Error::MultipleClocks(
                        prev.name.to_string(), name.to_string()));
                }
                clock_at = Some(signals.len());
                clilog::info!(SIMTG_CLOCK, "found clock signal {}", name);
                signals.push(SignalSpec {
                    name, ranges: Vec::new(), is_clock: true
                });
                continue;
            }
            let ranges = toks.iter()
                .map(|tok| parse_range(&name, tok))
                .collect::<Result<Vec<_>>>()?;
            signals.push(SignalSpec { name, ranges, is_clock: false });
        }
        let clock_at = clock_at.ok_or(Error::NoClock)?;
        let clock = signals.remove(clock_at);
        signals.insert(0, clock);
        Ok(SignalList { signals })
    }

    /// The clock signal.
    #[inline]
    pub fn clock(&self) -> &SignalSpec {
        &self.signals[0]
    }

    /// The sampled (non-clock) signals, in resolved order.
    #[inline]
    pub fn sampled(&self) -> &[SignalSpec] {
        &self.signals[1..]
    }
}

/// Parse one bit-range token: `N` or `[H:L]`.
fn parse_range(signal: &str, tok: &str) -> Result<(u32, u32)> {
    let bad = || Error::BadRangeToken {
        signal: signal.to_string(), token: tok.to_string()
    };
    let (high, low) = match tok.strip_prefix('[') {
        Some(body) => {
            let body = body.strip_suffix(']')
                .ok_or_else(|| Error::UnclosedRange {
                    signal: signal.to_string(), token: tok.to_string()
                })?;
            let (h, l) = body.split_once(':').ok_or_else(bad)?;
            (h.parse().map_err(|_| bad())?,
             l.parse().map_err(|_| bad())?)
        }
        None => {
            let bit: u32 = tok.parse().map_err(|_| bad())?;
            (bit, bit)
        }
    };
    if high < low {
        return Err(Error::IllegalRange {
            signal: signal.to_string(), high, low
        });
    }
    Ok((high, low))
}
