use fate_core::prelude::*;
use std::io::{self, Write};
use std::process;

const DEMO_VALUES: [i32; 5] = [10, 25, 7, 42, 18];
const DEMO_SPINS: usize = 5;
const DEMO_ROLLBACK: usize = 2;
const DEMO_TRACE_STEPS: usize = 8;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run_demo(&mut io::stdout().lock()) {
        log::error!("Demo failed: {}", e);
        process::exit(1);
    }

    trace_dump!();
}

fn run_demo<W: Write>(out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    let mut wheel = WheelOfFate::new();
    for value in DEMO_VALUES {
        wheel.insert(value);
    }
    log::info!("Wheel built with {} entries", wheel.len());

    wheel.spin_until(DEMO_SPINS);
    wheel.print_current(out)?;

    wheel.rollback(DEMO_ROLLBACK);
    wheel.print_current(out)?;

    writeln!(out, "\nFate Trace:")?;
    writeln!(out, "{}", TRACE_HEADER)?;
    for row in wheel.traverse_with_trace(DEMO_TRACE_STEPS)? {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}
