//! Fan-out pipeline demonstrating unordered parallel forwarding
//!
//! Squares 1-1000 and pushes the results through four racing workers. The
//! collected output arrives in worker order, not source order, so the demo
//! sorts before printing the extremes.
//!
//! Usage: cargo run --example fanout --release

use flowline::Stream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fan-out Pipeline");
    println!("================");
    println!();

    let stream = Stream::from_vec((1..=1000u64).collect::<Vec<u64>>())
        .map(|n| n * n)
        .parallel(4)?;

    let stats = stream.stats();
    let mut squares = stream.collect()?;

    println!("Collected {} squares (unordered)", squares.len());
    squares.sort_unstable();
    println!(
        "Smallest: {}, largest: {}",
        squares.first().copied().unwrap_or(0),
        squares.last().copied().unwrap_or(0)
    );
    println!();
    println!("{}", stats.summary());

    Ok(())
}
