//! Dealer Benchmark Binary
//!
//! Deals full decks with every requested algorithm and reports throughput
//! alongside the theoretical state size of a fresh deal.
//!
//! Options: --n, --repeats, --m-bits, --algorithms, --json

use clap::Parser;
use colored::Colorize;
use dealerlab::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Benchmark deals per second for each dealer")]
struct Args {
    /// cards per deck
    #[arg(short, long, default_value_t = 104)]
    n: usize,
    /// full permutations dealt per algorithm
    #[arg(short, long, default_value_t = 200)]
    repeats: usize,
    /// memory budget for the adaptive dealer
    #[arg(short, long, default_value_t = DEFAULT_M_BITS)]
    m_bits: usize,
    /// algorithms to run, all when empty
    #[arg(short, long, value_delimiter = ',')]
    algorithms: Vec<Algorithm>,
    /// print one JSON object per algorithm instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Report {
    algorithm: Algorithm,
    n: usize,
    repeats: usize,
    draws: usize,
    elapsed_s: f64,
    draws_per_sec: f64,
    theoretical_bits_used: usize,
}

fn bench(algorithm: Algorithm, args: &Args) -> anyhow::Result<Report> {
    let config = Config::default().with_m_bits(args.m_bits);
    let ref mut rng = SmallRng::seed_from_u64(u64::MAX);
    let mut warmup = algorithm.dealer();
    warmup.initialize(args.n, rng, config)?;
    warmup.drain()?;
    let start = std::time::Instant::now();
    for seed in 0..args.repeats as u64 {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let mut dealer = algorithm.dealer();
        dealer.initialize(args.n, rng, config)?;
        dealer.drain()?;
    }
    let elapsed = start.elapsed().as_secs_f64();
    let ref mut rng = SmallRng::seed_from_u64(0);
    let mut fresh = algorithm.dealer();
    fresh.initialize(args.n, rng, config)?;
    let draws = args.n * args.repeats;
    Ok(Report {
        algorithm,
        n: args.n,
        repeats: args.repeats,
        draws,
        elapsed_s: elapsed,
        draws_per_sec: draws as f64 / elapsed.max(f64::MIN_POSITIVE),
        theoretical_bits_used: fresh.summarize()?.theoretical_bits_used,
    })
}

fn main() -> anyhow::Result<()> {
    dealerlab::log()?;
    let args = Args::parse();
    let algorithms = match args.algorithms.as_slice() {
        [] => Algorithm::all().to_vec(),
        some => some.to_vec(),
    };
    log::info!(
        "benchmarking {} dealers on n={}, {} permutations each",
        algorithms.len(),
        args.n,
        args.repeats
    );
    if !args.json {
        println!(
            "{}",
            format!(
                "{:<14} {:>14} {:>10} {:>12}",
                "dealer", "draws/s", "time (s)", "theory bits"
            )
            .bold()
        );
    }
    for algorithm in algorithms {
        let report = bench(algorithm, &args)?;
        match args.json {
            true => println!("{}", serde_json::to_string(&report)?),
            false => println!(
                "{:<14} {:>14.0} {:>10.3} {:>12}",
                report.algorithm.to_string(),
                report.draws_per_sec,
                report.elapsed_s,
                report.theoretical_bits_used
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_draws_per_second() {
        let args = Args::parse_from(["bench", "--n", "52", "--repeats", "3"]);
        let report = bench(Algorithm::FisherYates, &args).expect("bench");
        assert_eq!(report.draws, 156);
        let json = serde_json::to_value(&report).expect("json");
        assert!(json.get("draws_per_sec").is_some());
        assert!(json.get("deals_per_sec").is_none());
    }
}
