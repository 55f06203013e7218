//! End-to-end conversion of a small checked-in VCD file.

use simtoggle::{ClockGeometry, CycleTraces, Error, SignalList, Waveform};

const VCD: &str = "tests/inputs/toggle.vcd";

fn convert(siglist: &str) -> simtoggle::Result<Vec<u8>> {
    let list = SignalList::parse(siglist.lines())?;
    let wave = Waveform::load(VCD, &list)?;
    let clock = &list.clock().name;
    let geom = ClockGeometry::infer(clock, wave.trace(clock))?;
    let cycles = CycleTraces::build(&list, &wave, geom);
    let mut out = Vec::new();
    simtoggle::table::write_table(&mut out, &list, &cycles)?;
    Ok(out)
}

#[test]
fn converts_vcd_to_cycle_table() {
    let list = "top.clk CLOCK\ntop.data\ntop.bus [3:0] 2\n";
    let out = convert(list).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\
Cycle,Global_Distance,top.data,d_top.data,top.bus[3:0],d_top.bus[3:0],top.bus[2:2],d_top.bus[2:2]
0,0,0,0,0,0,0,0
1,3,2,1,6,2,1,1
2,4,2,0,9,4,0,1
3,0,2,0,9,0,0,0
4,2,2,0,15,2,1,1
");
}

#[test]
fn inferred_clock_geometry() {
    let list = SignalList::parse("top.clk CLOCK\ntop.data".lines()).unwrap();
    let wave = Waveform::load(VCD, &list).unwrap();
    let geom = ClockGeometry::infer("top.clk", wave.trace("top.clk")).unwrap();
    assert_eq!(geom.first_edge, 5);
    assert_eq!(geom.period, 10);
}

#[test]
fn indeterminate_bits_are_tallied() {
    let list = SignalList::parse("top.clk CLOCK\ntop.data".lines()).unwrap();
    let wave = Waveform::load(VCD, &list).unwrap();
    let geom = ClockGeometry::infer("top.clk", wave.trace("top.clk")).unwrap();
    let cycles = CycleTraces::build(&list, &wave, geom);
    assert_eq!(cycles.xz_count, 1);
}

#[test]
fn missing_signal_aborts_conversion() {
    let err = convert("top.clk CLOCK\ntop.nonexistent\n").unwrap_err();
    assert!(matches!(err, Error::SignalNotFound(name) if name == "top.nonexistent"));
}

#[test]
fn output_is_deterministic() {
    let list = "top.clk CLOCK\ntop.bus\ntop.data 1 0\n";
    assert_eq!(convert(list).unwrap(), convert(list).unwrap());
}
