// SPDX-License-Identifier: MPL-2.0

//! Receiver polling example.
//!
//! Connects to a receiver, prints its state, then polls it periodically and
//! prints every change reported by the refresh callbacks.
//!
//! # Usage
//!
//! ```bash
//! # Receiver on the network (telnet port) or behind a serial terminal server
//! cargo run --example poll -- tcp <host[:port]> [interval_secs]
//!
//! # Receiver wired to a local RS-232 port
//! cargo run --example poll -- serial <device_path> [interval_secs]
//! ```
//!
//! # Examples
//!
//! ```bash
//! cargo run --example poll -- tcp 192.168.1.40
//! RUST_LOG=avrctl_lib=debug cargo run --example poll -- serial /dev/ttyUSB0 5
//! ```

use std::env;
use std::time::Duration;

use avrctl_lib::protocol::Transport;
use avrctl_lib::{Receiver, ReceiverBuilder};
use tracing_subscriber::EnvFilter;

const DEFAULT_INTERVAL_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let interval = match args.get(3) {
        Some(secs) => Duration::from_secs(secs.parse()?),
        None => Duration::from_secs(DEFAULT_INTERVAL_SECS),
    };

    match args[1].as_str() {
        "tcp" => run(Receiver::tcp(&args[2])?, interval).await,
        "serial" => run(Receiver::serial(&args[2]), interval).await,
        mode => {
            eprintln!("Unknown mode: {mode}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} tcp <host[:port]> [interval_secs]");
    eprintln!("  {program} serial <device_path> [interval_secs]");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} tcp 192.168.1.40");
    eprintln!("  {program} serial /dev/ttyUSB0 5");
}

/// Builds the receiver, prints its state and keeps polling.
async fn run<T: Transport>(
    builder: ReceiverBuilder<T>,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let receiver = builder.with_name("Demo").build().await?;

    let state = receiver.state();
    println!("Receiver: {}", receiver.name());
    println!("  Power:    {}", receiver.power_state());
    println!("  Volume:   {}", state.volume());
    println!("  Muted:    {}", state.is_muted());
    println!(
        "  Source:   {}",
        receiver.current_source_name().unwrap_or(state.source_code())
    );
    println!("  Features: {}", receiver.supported_features());
    if receiver.supported_features().contains(avrctl_lib::Features::NOW_PLAYING) {
        println!("  Now playing:");
        for line in receiver.media_text().lines() {
            println!("    {line}");
        }
    }
    println!();
    println!("Available sources: {}", receiver.all_available_sources().join(", "));
    println!();
    println!("Polling every {}s, press Ctrl+C to stop", interval.as_secs());

    receiver.on_state_changed(|change| {
        println!("[{}] {change}", change.field());
    });

    loop {
        tokio::time::sleep(interval).await;
        if !receiver.refresh().await {
            eprintln!("Receiver did not answer, keeping last known state");
        }
    }
}
