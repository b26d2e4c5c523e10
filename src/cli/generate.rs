//! Generate mode CLI logic
//!
//! Prints a fresh local fallback id without touching the network.

use anyhow::Result;

/// Arguments for generate mode
#[derive(Debug)]
pub struct GenerateArgs {
    /// Number of ids to print
    pub count: usize,
}

/// Run generate mode with the given arguments
pub fn run_generate_mode(args: GenerateArgs) -> Result<()> {
    for id in generate_ids(args.count) {
        println!("{}", id);
    }
    Ok(())
}

fn generate_ids(count: usize) -> Vec<String> {
    (0..count).map(|_| crate::id::generate()).collect()
}
