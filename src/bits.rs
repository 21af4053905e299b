use rand::RngCore;

/// Bits per storage word of every bitmask in this crate.
pub const WORD: usize = u64::BITS as usize;

/// Uniform integer in `lo..hi` with no modulo bias.
///
/// Lemire's widening-multiply method: one `next_u64` per attempt, and an
/// attempt is rejected only when it lands in the `2^64 mod span` zone that
/// would bias the result. Call order and count depend only on the rng
/// stream, so draws are reproducible for a given source state.
/// Requires `lo < hi`.
pub fn uniform_int<R>(rng: &mut R, lo: usize, hi: usize) -> usize
where
    R: RngCore + ?Sized,
{
    debug_assert!(lo < hi, "empty range {}..{}", lo, hi);
    let span = (hi - lo) as u64;
    let threshold = span.wrapping_neg() % span;
    loop {
        let x = rng.next_u64();
        let m = (x as u128) * (span as u128);
        if m as u64 >= threshold {
            return lo + (m >> 64) as usize;
        }
    }
}

/// Number of set bits across a word sequence.
pub fn popcount(bits: &[u64]) -> usize {
    bits.iter().map(|w| w.count_ones() as usize).sum()
}

/// Position of the k-th set bit (0-indexed), scanning words low to high.
/// Requires `k < popcount(bits)`; the result is meaningless otherwise.
pub fn bit_select(bits: &[u64], k: usize) -> usize {
    let mut k = k;
    for (i, &word) in bits.iter().enumerate() {
        let ones = word.count_ones() as usize;
        if k < ones {
            let mut word = word;
            for _ in 0..k {
                word = word & (word - 1);
            }
            return i * WORD + word.trailing_zeros() as usize;
        }
        k -= ones;
    }
    bits.len() * WORD
}

/// Words needed to hold `n` bits.
pub(crate) fn words(n: usize) -> usize {
    n.div_ceil(WORD)
}

/// A word sequence with exactly the low `n` bits set.
pub(crate) fn filled(n: usize) -> Vec<u64> {
    let mut bits = vec![u64::MAX; words(n)];
    if n % WORD != 0 {
        if let Some(last) = bits.last_mut() {
            *last = (1u64 << (n % WORD)) - 1;
        }
    }
    bits
}

pub(crate) fn is_set(bits: &[u64], pos: usize) -> bool {
    bits[pos / WORD] >> (pos % WORD) & 1 == 1
}

pub(crate) fn clear(bits: &mut [u64], pos: usize) {
    bits[pos / WORD] &= !(1u64 << (pos % WORD));
}

/// Set positions, low to high.
pub(crate) fn ones(bits: &[u64]) -> impl Iterator<Item = usize> + '_ {
    bits.iter().enumerate().flat_map(|(i, &word)| {
        let mut word = word;
        std::iter::from_fn(move || {
            if word == 0 {
                None
            } else {
                let bit = word.trailing_zeros() as usize;
                word = word & (word - 1);
                Some(i * WORD + bit)
            }
        })
    })
}

/// ⌈log2 x⌉, with a floor of 1 bit.
pub fn log2_ceil(x: usize) -> usize {
    (x.max(2) - 1).ilog2() as usize + 1
}

/// Length of the Elias-gamma code of `x + 1`, i.e. `2⌊log2(x+1)⌋ + 1`.
pub fn elias_gamma(x: usize) -> usize {
    2 * (x + 1).ilog2() as usize + 1
}
