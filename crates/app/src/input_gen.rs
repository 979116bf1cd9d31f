//! Sample input generation for the demo command.
//!
//! Generated data mixes sections with very different byte distributions so
//! the Huffman statistics are worth looking at:
//! - runs of one byte (single-symbol stretches)
//! - text over a small alphabet (skewed, compresses well)
//! - short repeating patterns
//! - uniformly random bytes (no gain at all)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(8192);

        match rng.gen_range(0..10u8) {
            // 30% runs
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 30% text-like
            3..=5 => {
                let alphabet = b"etaoin shrdlu cmfwyp vbgkqj xz.,\n";
                for _ in 0..section {
                    // Square the draw to favour the front of the alphabet
                    let r: f64 = rng.gen();
                    let idx = ((r * r) * alphabet.len() as f64) as usize;
                    data.push(alphabet[idx.min(alphabet.len() - 1)]);
                }
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern = generate_pattern(&mut rng);
                data.extend(pattern.iter().cycle().take(section));
            }

            // 20% random
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let len = rng.gen_range(4..=32);
    (0..len).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sizes() {
        for size in [0, 1, 100, 8192, 8193, 100_000] {
            assert_eq!(generate_sample_data(999, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_data(12345, 5000), generate_sample_data(12345, 5000));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_sample_data(1, 20_000), generate_sample_data(2, 20_000));
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample_data(42, 50_000);
        let container = huffpack_core::compress(&data).unwrap();
        assert_eq!(huffpack_core::decompress(&container).unwrap(), data);
    }
}
