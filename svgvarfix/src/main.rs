//! Main binary entry point for svgvarfix.
//!
//! Delegates to the shared `entry_point::run_with_args()` function so every
//! binary behaves the same way.

use anyhow::Result;

fn main() -> Result<()> {
    let code = svgvarfix::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
