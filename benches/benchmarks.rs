criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        dealing_bitmap_deck,
        dealing_fisher_yates_deck,
        dealing_adaptive_deck,
        dealing_perfect_deck,
        peeking_adaptive_distribution,
        selecting_bits_in_words,
}

/// Initialize and drain one full deck.
fn deal(algorithm: Algorithm, n: usize, config: Config, seed: u64) -> Vec<Identity> {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    let mut dealer = algorithm.dealer();
    dealer.initialize(n, rng, config).expect("init");
    dealer.drain().expect("drain")
}

fn dealing_bitmap_deck(c: &mut criterion::Criterion) {
    c.bench_function("deal 104 cards by bitmap rejection", |b| {
        b.iter(|| deal(Algorithm::Bitmap, 104, Config::default(), 0))
    });
}

fn dealing_fisher_yates_deck(c: &mut criterion::Criterion) {
    c.bench_function("deal 104 cards by swap-delete", |b| {
        b.iter(|| deal(Algorithm::FisherYates, 104, Config::default(), 0))
    });
}

fn dealing_adaptive_deck(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("deal 104 cards by adaptive threshold");
    for m_bits in [8, 32, 128] {
        let config = Config::default().with_m_bits(m_bits);
        group.bench_function(format!("m_bits={}", m_bits), |b| {
            b.iter(|| deal(Algorithm::Adaptive, 104, config, 0))
        });
    }
    group.finish();
}

fn dealing_perfect_deck(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("deal 104 cards by cell rank sampling");
    for width in [1, 7, 64] {
        let config = Config::default().with_cell_width(width);
        group.bench_function(format!("width={}", width), |b| {
            b.iter(|| deal(Algorithm::Perfect, 104, config, 0))
        });
    }
    group.finish();
}

fn peeking_adaptive_distribution(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let mut dealer = AdaptiveDealer::default();
    dealer.initialize(104, rng, Config::default()).expect("init");
    c.bench_function("peek the adaptive next-draw distribution", |b| {
        b.iter(|| dealer.peek_distribution().expect("peek"))
    });
}

fn selecting_bits_in_words(c: &mut criterion::Criterion) {
    let words = [u64::MAX, 0xAAAA_AAAA_AAAA_AAAA];
    c.bench_function("select the 90th set bit of two words", |b| {
        b.iter(|| bit_select(criterion::black_box(&words), 90))
    });
}

use dealerlab::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
