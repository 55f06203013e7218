//! Assembly and serialization of the cycle-aligned table.
//!
//! One header row, then one row per cycle: cycle index, global
//! distance, then per sampled signal (or per declared bit range)
//! the decoded value and its local Hamming distance from the
//! previous cycle. All values are plain decimal, comma separated.

use crate::hamming;
use crate::resample::{CycleTrace, CycleTraces, Value};
use crate::siglist::{SignalList, SignalSpec};
use itertools::Itertools;
use std::io::{self, Write};

/// Header columns: `Cycle`, `Global_Distance`, then per sampled
/// signal either `<name>`, `d_<name>` or, per declared range,
/// `<name>[H:L]`, `d_<name>[H:L]`, in declaration order.
fn header(list: &SignalList) -> Vec<String> {
    let mut cols = vec!["Cycle".to_string(), "Global_Distance".to_string()];
    for spec in list.sampled() {
        if spec.ranges.is_empty() {
            cols.push(spec.name.to_string());
            cols.push(format!("d_{}", spec.name));
        } else {
            for &(high, low) in &spec.ranges {
                let name = format!("{}[{}:{}]", spec.name, high, low);
                cols.push(name.clone());
                cols.push(format!("d_{}", name));
            }
        }
    }
    cols
}

/// Append one signal's value/distance column pair(s) for `cycle`.
fn push_signal_cols(row: &mut Vec<Value>, spec: &SignalSpec, values: &CycleTrace, cycle: usize) {
    let local = |cur, prev: Option<Value>| match prev {
        // cycle 0 has no prior sample
        None => 0,
        Some(prev) => Value::from(hamming::distance(prev, cur)),
    };
    let prev = cycle.checked_sub(1).map(|p| values[p]);
    if spec.ranges.is_empty() {
        row.push(values[cycle]);
        row.push(local(values[cycle], prev));
    } else {
        for &(high, low) in &spec.ranges {
            let cur = hamming::mask_range(values[cycle], high, low);
            row.push(cur);
            row.push(local(cur, prev.map(|p| hamming::mask_range(p, high, low))));
        }
    }
}

/// Serialize the whole table to `out`.
pub fn write_table(
    out: &mut impl Write,
    list: &SignalList,
    cycles: &CycleTraces,
) -> io::Result<()> {
    writeln!(out, "{}", header(list).iter().format(","))?;
    let mut row: Vec<Value> = Vec::new();
    for cycle in 0..cycles.cycles() {
        row.clear();
        row.push(cycle as Value);
        let global = match cycle.checked_sub(1) {
            None => 0,
            Some(prev) => list.sampled().iter()
                .map(|spec| {
                    let values = &cycles.traces[spec.name.as_str()];
                    Value::from(hamming::distance(values[prev], values[cycle]))
                })
                .sum(),
        };
        row.push(global);
        for spec in list.sampled() {
            push_signal_cols(&mut row, spec, &cycles.traces[spec.name.as_str()], cycle);
        }
        writeln!(out, "{}", row.iter().format(","))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;
    use indexmap::IndexMap;

    fn cycle_traces(sigs: &[(&str, &[Value])]) -> CycleTraces {
        let mut traces = IndexMap::<CompactString, CycleTrace>::new();
        let mut max_cycle = 0;
        for &(name, values) in sigs {
            max_cycle = max_cycle.max(values.len() - 1);
            traces.insert(name.into(), values.to_vec());
        }
        CycleTraces { traces, max_cycle, xz_count: 0 }
    }

    fn render(list: &SignalList, cycles: &CycleTraces) -> String {
        let mut out = Vec::new();
        write_table(&mut out, list, cycles).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_width_table() {
        let list = SignalList::parse("clk CLOCK\na\nb".lines()).unwrap();
        let ct = cycle_traces(&[
            ("a", &[0, 3, 3]),
            ("b", &[5, 4, 0]),
        ]);
        assert_eq!(render(&list, &ct), "\
Cycle,Global_Distance,a,d_a,b,d_b
0,0,0,0,5,0
1,3,3,2,4,1
2,1,3,0,0,1
");
    }

    #[test]
    fn ranged_header_and_columns() {
        let list = SignalList::parse("clk CLOCK\nfoo [3:0] 7".lines()).unwrap();
        let ct = cycle_traces(&[("foo", &[0x00, 0x8f])]);
        assert_eq!(render(&list, &ct), "\
Cycle,Global_Distance,foo[3:0],d_foo[3:0],foo[7:7],d_foo[7:7]
0,0,0,0,0,0
1,5,15,4,1,1
");
    }

    #[test]
    fn cycle_zero_distances_are_zero() {
        let list = SignalList::parse("clk CLOCK\nx [2:0]".lines()).unwrap();
        let ct = cycle_traces(&[("x", &[7, 7])]);
        let out = render(&list, &ct);
        let row0 = out.lines().nth(1).unwrap();
        assert_eq!(row0, "0,0,7,0");
    }
}
