//! Counter-loop fixture for profiler and disassembler tests.
//!
//! The only code of interest is [`counter::correct`]: it is never inlined and
//! it starts a page-aligned section of its own named `.text.correct`, so
//! tooling can find it by section name or symbol alone. Running
//! `segments <count>` spins the loop `count` times and exits 0.

mod args;
mod counter;

use std::env;

fn main() {
    let arg = env::args_os().nth(1).unwrap_or_default();
    counter::correct(args::parse_count(&arg));
}
