//! Interactive Token Editing
//!
//! This example walks through the manual editing commands: setting bytes,
//! pasting a whole hash, locking slots, randomizing, and undoing.
//!
//! Key concepts:
//! - Every state-changing command records the prior hash for undo
//! - Locked bytes survive randomization
//! - Commands are plain data dispatched through one engine instance
//!
//! Run with: cargo run --example token_editing

use tokenlab::{ManualScheduler, TokenEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Token Editing Example ===\n");

    let mut engine = TokenEngine::builder(ManualScheduler::new())
        .seed(42)
        .build()?;

    println!("initial hash: {}", engine.hash());

    // Edit individual bytes
    engine.set_value(0, 0xff)?;
    engine.set_value(31, 0x7f)?;
    println!("after edits:  {}", engine.hash());

    // Paste a complete hash (uppercase input is canonicalized)
    engine.set_hash(format!("0x{}", "AB".repeat(32)))?;
    println!("after paste:  {}", engine.hash());

    // Lock byte 0, then randomize everything else
    engine.toggle_lock(0)?;
    engine.randomize()?;
    println!("randomized:   {} (byte 0 still 0xab)", engine.hash());

    // Rewind one commit at a time
    engine.undo()?;
    println!("undo #1:      {}", engine.hash());
    engine.undo()?;
    println!("undo #2:      {}", engine.hash());

    println!(
        "\nhistory depth: {}, commits: {}",
        engine.state().history().len(),
        engine.metadata().commits
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
