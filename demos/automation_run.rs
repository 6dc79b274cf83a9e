//! Automated Token Evolution
//!
//! This example drives the automation loop with a real timer: the engine
//! decides what each tick does, the host owns the clock and delivers
//! ticks at the configured interval.
//!
//! Key concepts:
//! - The seed randomization fires immediately on start
//! - Each tick commits through the same path as manual edits
//! - The snapshot sink receives one hash per visible frame
//!
//! Run with: cargo run --example automation_run

use tokenlab::automation::AutomationConfig;
use tokenlab::render::{MemorySink, RendererTarget};
use tokenlab::{AutomationTick, ManualScheduler, TokenEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let sink = MemorySink::new();
    let mut engine = TokenEngine::builder(ManualScheduler::new())
        .seed(7)
        .sink(sink.clone())
        .renderer(RendererTarget::new("https://viewer.example/token/0", true))
        .build()?;

    let seed = engine.start_automation(AutomationConfig::new(8, 250))?;
    if let AutomationTick::Stepped { tick, hash } = seed {
        println!("tick {tick} (seed): {hash}");
    }

    let period = engine
        .automation()
        .scheduler()
        .period()
        .expect("a run is in flight");

    let mut timer = tokio::time::interval(period);
    timer.tick().await; // the first interval tick completes immediately

    loop {
        timer.tick().await;
        match engine.automation_tick()? {
            AutomationTick::Stepped { tick, hash } => {
                println!(
                    "tick {tick}: {hash} ({}%)",
                    engine.automation().progress_percent()
                );
            }
            AutomationTick::Finished => break,
            AutomationTick::Idle => break,
        }
    }

    println!(
        "\ncaptured {} frames, history depth {}, progress {}%",
        sink.len(),
        engine.state().history().len(),
        engine.automation().progress_percent()
    );
    Ok(())
}
