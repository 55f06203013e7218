//! Cycle-aligned toggle extraction.
//!
//! This program reads one VCD file and a target signal list,
//! samples every listed signal on the clock grid, and writes a CSV
//! table with per-cycle values, per-signal Hamming distances and a
//! global toggle aggregate per cycle.

use itertools::Itertools;
use simtoggle::{ClockGeometry, CycleTraces, SignalList, Waveform};
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

#[derive(clap::Parser, Debug)]
struct SimToggleArgs {
    /// The input VCD file path
    vcd: String,
    /// The target signal list file path
    signals: String,
    /// The output CSV file path
    output: String,
}

fn main() -> ExitCode {
    clilog::init_stderr_color_debug();
    let args = <SimToggleArgs as clap::Parser>::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            clilog::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &SimToggleArgs) -> simtoggle::Result<()> {
    let list = SignalList::load(&args.signals)?;
    clilog::info!(SIMTG_SIGS, "signals to extract: {}",
                  list.signals.iter().map(|s| &s.name).format(", "));
    let wave = Waveform::load(&args.vcd, &list)?;
    let clock = &list.clock().name;
    let geom = ClockGeometry::infer(clock, wave.trace(clock))?;
    clilog::info!(SIMTG_CLOCK, "clock period {} (first rising edge at {})",
                  geom.period, geom.first_edge);
    let cycles = CycleTraces::build(&list, &wave, geom);
    if cycles.xz_count > 0 {
        clilog::warn!(SIMTG_XZ,
                      "{} undefined or high-impedance bit values \
                       were substituted with 0",
                      cycles.xz_count);
    }
    // all fatal stages are behind us: safe to create the output
    let mut out = BufWriter::new(File::create(&args.output)?);
    simtoggle::table::write_table(&mut out, &list, &cycles)?;
    Ok(())
}
