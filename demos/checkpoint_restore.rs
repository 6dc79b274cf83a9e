//! Checkpoint and Restore
//!
//! This example captures a session mid-edit, serializes it both ways, and
//! restores it into a fresh engine.
//!
//! Key concepts:
//! - JSON for readability, binary for compactness
//! - Checkpoints are validated before restore; tampered data is rejected
//! - Where the bytes are stored is the caller's concern
//!
//! Run with: cargo run --example checkpoint_restore

use tokenlab::{ManualScheduler, TokenEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Checkpoint / Restore Example ===\n");

    let mut engine = TokenEngine::builder(ManualScheduler::new())
        .seed(99)
        .build()?;

    engine.set_hash(format!("0x{}", "c4".repeat(32)))?;
    engine.toggle_lock(5)?;
    engine.set_number(12)?;

    let checkpoint = engine.checkpoint();
    let json = checkpoint.to_json()?;
    let bytes = checkpoint.to_bytes()?;
    println!("checkpoint id: {}", checkpoint.id);
    println!("json size:     {} bytes", json.len());
    println!("binary size:   {} bytes", bytes.len());

    // Restore into a fresh engine
    let mut replica = TokenEngine::builder(ManualScheduler::new()).build()?;
    replica.restore(tokenlab::checkpoint::Checkpoint::from_json(&json)?)?;

    println!("\nrestored hash:   {}", replica.hash());
    println!("restored number: {}", replica.state().number());
    println!("locked slots:    {}", replica.state().locked().locked_count());
    assert_eq!(replica.state(), engine.state());

    // A tampered checkpoint fails validation
    let tampered = json.replacen("c4c4", "0000", 1);
    match tokenlab::checkpoint::Checkpoint::from_json(&tampered) {
        Err(error) => println!("\ntampered checkpoint rejected: {error}"),
        Ok(_) => println!("\nunexpected: tampered checkpoint accepted"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
