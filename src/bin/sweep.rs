//! Adversary Sweep Binary
//!
//! Plays a myopic guesser and a blind baseline against the adaptive dealer
//! for each memory budget, and reports how well each one predicts card types.
//!
//! Options: --m-bits, --episodes, --n, --types, --seed, --json

use clap::Parser;
use colored::Colorize;
use dealerlab::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Sweep adaptive memory budgets against a guessing adversary")]
struct Args {
    /// memory budgets to sweep
    #[arg(short, long, value_delimiter = ',', default_value = "8,16,32,64,128")]
    m_bits: Vec<usize>,
    /// deals per budget
    #[arg(short, long, default_value_t = 50)]
    episodes: usize,
    /// cards per deck
    #[arg(short, long, default_value_t = 104)]
    n: usize,
    /// distinct card types guessed at
    #[arg(short, long, default_value_t = 52)]
    types: usize,
    /// base seed, episode k uses seed + k
    #[arg(short, long, default_value_t = 100)]
    seed: u64,
    /// print one JSON object per budget instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Row {
    m_bits: usize,
    minidecks: usize,
    episodes: usize,
    blind: Score,
    myopic: Score,
    blind_accuracy: Probability,
    myopic_accuracy: Probability,
}

/// One deal per guesser from identically seeded sources.
fn episode(args: &Args, config: Config, seed: u64) -> Result<(Score, Score), DealError> {
    let ref mut a = SmallRng::seed_from_u64(seed);
    let ref mut b = SmallRng::seed_from_u64(seed);
    let mut dealer = AdaptiveDealer::default();
    dealer.initialize(args.n, a, config)?;
    let mut blind = Blind::new(args.types, SmallRng::seed_from_u64(!seed))?;
    let blind = play(&mut blind, &mut dealer)?;
    let mut dealer = AdaptiveDealer::default();
    dealer.initialize(args.n, b, config)?;
    let myopic = play(&mut Myopic::new(args.types)?, &mut dealer)?;
    Ok((blind, myopic))
}

fn sweep(args: &Args, m_bits: usize) -> anyhow::Result<Row> {
    let config = Config::default().with_m_bits(m_bits);
    let minidecks = config.minidecks(args.n)?;
    let (blind, myopic) = (0..args.episodes as u64)
        .into_par_iter()
        .map(|k| episode(args, config, args.seed + k))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .fold((Score::default(), Score::default()), |(x, y), (a, b)| {
            (x + a, y + b)
        });
    log::info!(
        "m_bits {:>4} -> {:>3} mini-decks, myopic {:.3}",
        m_bits,
        minidecks,
        myopic.accuracy()
    );
    Ok(Row {
        m_bits,
        minidecks,
        episodes: args.episodes,
        blind,
        myopic,
        blind_accuracy: blind.accuracy(),
        myopic_accuracy: myopic.accuracy(),
    })
}

fn main() -> anyhow::Result<()> {
    dealerlab::log()?;
    let args = Args::parse();
    log::info!(
        "sweeping {} budgets, {} episodes of n={} guessed over {} types",
        args.m_bits.len(),
        args.episodes,
        args.n,
        args.types
    );
    if !args.json {
        println!(
            "{}",
            format!(
                "{:>8} {:>10} {:>10} {:>10}",
                "m_bits", "d", "random", "myopic"
            )
            .bold()
        );
    }
    for &m_bits in args.m_bits.iter() {
        let row = sweep(&args, m_bits)?;
        match args.json {
            true => println!("{}", serde_json::to_string(&row)?),
            false => println!(
                "{:>8} {:>10} {:>10.3} {:>10.3}",
                row.m_bits, row.minidecks, row.blind_accuracy, row.myopic_accuracy
            ),
        }
    }
    Ok(())
}
