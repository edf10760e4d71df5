//! Even-number pipeline demonstrating filtering, transformation, and a fold
//!
//! Pipeline:
//! 1. Source: numbers 1-100
//! 2. Filter: keep only even numbers
//! 3. Transform: multiply by 10
//! 4. Reduce: sum everything
//!
//! Usage: cargo run --example even_sum --release

use flowline::Stream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Even Sum Pipeline");
    println!("=================");
    println!("Filtering evens out of 1-100, scaling by 10, folding the total");
    println!();

    let stream = Stream::from_vec((1..=100u64).collect::<Vec<u64>>())
        .filter(|n| n % 2 == 0)
        .map(|n| n * 10);

    let stats = stream.stats();
    let total = stream.reduce(0, |acc, n| acc + n)?;

    println!("Sum of scaled evens: {total}");
    println!();
    println!("{}", stats.summary());

    Ok(())
}
