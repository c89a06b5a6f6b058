//! Bitcoin Vanity Address Generator CLI
//!
//! Usage:
//!   btc_vanity                    # Derive one random key/WIF/address
//!   btc_vanity -p Bit             # Find an address starting with "1Bit..."
//!   btc_vanity -p cafe -a         # ... containing "cafe" anywhere
//!   btc_vanity -p Moon -n litecoin -w 8

use std::process;
use std::time::Duration;

use clap::Parser;

use btc_vanity::{
    crypto, Config, Error, KeyDeriver, Pattern, PoolWait, VanityResult, WorkerPool,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = Config::parse();
    config.validate()?;

    let params = config.network.parameters();
    let seed = crypto::random_seed()?;

    // No pattern: degenerate one-shot case, no workers.
    let Some(ref target) = config.pattern else {
        let keypair = KeyDeriver::new().derive(seed)?;
        let address = btc_vanity::Address::derive(keypair.public_key(), &params)?;
        println!("{}", keypair.private_key_hex());
        println!("{}", keypair.to_wif(&params)?);
        println!("{}", address);
        return Ok(());
    };

    let pattern = Pattern::new(target.clone(), config.match_mode(), config.case_sensitive);

    println!("Bitcoin Vanity Address Generator");
    println!("================================");
    println!("Pattern:    {} ({})", pattern.pattern(), pattern.mode());
    println!("Difficulty: {}", pattern.difficulty_description());
    println!("Network:    {}", config.network);
    println!("Workers:    {}", config.worker_count());
    println!();

    let pool = WorkerPool::new(config.worker_count(), pattern, params, seed);

    // Ctrl-C funnels into the same cooperative stop path as a match.
    ctrlc_handler(pool.stop_flag_clone());

    println!("Searching... (Press Ctrl+C to stop)\n");

    let report_interval = Duration::from_secs(config.report_interval.max(1));
    let outcome = loop {
        match pool.wait(report_interval) {
            PoolWait::Result(result) => break Some(result?),
            PoolWait::Timeout => {
                if config.verbose {
                    print_progress(&pool);
                }
                if pool.is_stopped() {
                    println!("\nStopped by user.");
                    break None;
                }
            }
            PoolWait::Exhausted => {
                // All workers exited: either Ctrl-C or (in theory) every
                // worker wrapped its window.
                if pool.is_stopped() {
                    println!("\nStopped by user.");
                } else {
                    println!("\nSearch space exhausted without a match.");
                }
                break None;
            }
        }
    };

    if let Some(ref result) = outcome {
        print_result(result);
    }

    let elapsed = pool.elapsed();
    let attempts = pool.join();
    let rate = if elapsed.as_secs_f64() > 0.0 {
        attempts as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("--- Final Statistics ---");
    println!("Total keys tested: {}", format_number(attempts));
    println!("Time elapsed:      {:.2}s", elapsed.as_secs_f64());
    println!("Average speed:     {}/s", format_number(rate as u64));

    Ok(())
}

fn print_result(result: &VanityResult) {
    println!("=== Match found (worker {}) ===", result.worker_id);
    println!("Private Key: {}", result.private_key);
    println!("WIF:         {}", result.wif);
    println!("Address:     {}", result.address);
    println!();
}

fn print_progress(pool: &WorkerPool) {
    println!(
        "[{:>4}s] Tested {} keys ({}/s)",
        pool.elapsed().as_secs(),
        format_number(pool.total_keys()),
        format_number(pool.keys_per_second() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(stop_flag: std::sync::Arc<std::sync::atomic::AtomicBool>) {
    ctrlc::set_handler(move || {
        stop_flag.store(true, std::sync::atomic::Ordering::Relaxed);
    })
    .expect("Error setting Ctrl-C handler");
}
