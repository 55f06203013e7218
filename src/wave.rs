//! Waveform access on top of the `vcd-ng` parser.
//!
//! The header's scope tree is walked once to build an explicit
//! keyed lookup from full hierarchical names ("scope.sub.signal")
//! to the abbreviated VCD identifier codes; requested signals are
//! resolved against it before the value-change section is read.
//! The value changes are then streamed with `FastFlow` and the
//! chronological (timestamp, bit string) trace of every requested
//! signal is materialized.

use crate::{Error, Result, SignalList};
use compact_str::CompactString;
use indexmap::IndexMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use vcd_ng::{FFValueChange, FastFlow, FastFlowToken, Parser, ScopeItem, Var};

/// A signal's raw change events, chronologically ordered.
/// Bit strings are ASCII `0`/`1`/`x`/`z`, most significant first.
pub type RawTrace = Vec<(u64, Vec<u8>)>;

/// The traces of all requested signals, addressable by full
/// hierarchical name. Owned read-only for the run's duration.
pub struct Waveform {
    /// Requested name to trace slot. Aliased variables (two names
    /// declared with one id code) share a slot.
    name2slot: IndexMap<CompactString, usize>,
    traces: Vec<RawTrace>,
}

impl Waveform {
    /// Read `path`, keeping the traces of every signal in `list`.
    ///
    /// Fails with [`Error::SignalNotFound`] before any value
    /// change is read if a requested name is not declared.
    pub fn load(path: impl AsRef<Path>, list: &SignalList) -> Result<Waveform> {
        let f = File::open(path.as_ref())?;
        let mut f = BufReader::with_capacity(65536, f);
        let mut parser = Parser::new(&mut f);
        let header = parser.parse_header()?;

        // full hierarchical name -> id code
        let mut name2code = IndexMap::<CompactString, u64>::new();
        let mut max_code = 0u64;
        let mut hier = Vec::new();
        collect_vars(&header.items, &mut hier, &mut |var, hier: &[CompactString]| {
            let mut full = String::new();
            for part in hier {
                full.push_str(part);
                full.push('.');
            }
            full.push_str(var.reference.as_str());
            max_code = max_code.max(var.code.0);
            name2code.entry(full.into()).or_insert(var.code.0);
        });

        let mut name2slot = IndexMap::new();
        let mut traces: Vec<RawTrace> = Vec::new();
        let mut code2slot = vec![usize::MAX; max_code as usize + 1];
        for spec in &list.signals {
            let code = *name2code.get(spec.name.as_str())
                .ok_or_else(|| Error::SignalNotFound(spec.name.to_string()))?;
            let slot = code2slot[code as usize];
            let slot = if slot != usize::MAX { slot } else {
                traces.push(Vec::new());
                code2slot[code as usize] = traces.len() - 1;
                traces.len() - 1
            };
            name2slot.insert(spec.name.clone(), slot);
        }

        // stream the value changes of the requested codes
        let f = File::open(path.as_ref())?;
        let mut flow = FastFlow::new(f, 65536);
        let mut now = 0u64;
        while let Some(tok) = flow.next_token()? {
            match tok {
                FastFlowToken::Timestamp(t) => now = t,
                FastFlowToken::Value(FFValueChange { id, bits }) => {
                    let slot = code2slot[id.0 as usize];
                    if slot != usize::MAX {
                        traces[slot].push((now, bits.to_vec()));
                    }
                }
            }
        }
        Ok(Waveform { name2slot, traces })
    }

    /// The raw trace of a requested signal.
    ///
    /// Panics if `name` was not in the signal list given to
    /// [`Waveform::load`].
    #[inline]
    pub fn trace(&self, name: &str) -> &RawTrace {
        &self.traces[self.name2slot[name]]
    }
}

/// Recursively visit every declared variable with its scope path.
fn collect_vars(
    items: &[ScopeItem],
    hier: &mut Vec<CompactString>,
    f: &mut impl FnMut(&Var, &[CompactString]),
) {
    for item in items {
        match item {
            ScopeItem::Var(var) => f(var, hier),
            ScopeItem::Scope(scope) => {
                hier.push(scope.identifier.as_str().into());
                collect_vars(&scope.children[..], hier, f);
                hier.pop();
            }
            _ => {}
        }
    }
}
