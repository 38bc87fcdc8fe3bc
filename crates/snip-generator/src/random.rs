use crate::Generator;
use rand::Rng;
use snip_core::ShortCode;
use typed_builder::TypedBuilder;

/// The 62 symbols a random code is drawn from.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_LENGTH: usize = 6;

/// Draws fixed-length codes uniformly from [`ALPHABET`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws a code from the given source of randomness.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ShortCode {
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        self.generate_with(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn default_length_is_six() {
        let generator = RandomGenerator::new();
        assert_eq!(generator.length(), 6);
        assert_eq!(generator.generate().as_str().len(), 6);
    }

    #[test]
    fn codes_use_the_alphabet_and_validate() {
        let generator = RandomGenerator::new();
        for _ in 0..200 {
            let code = generator.generate();
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn custom_length() {
        let generator = RandomGenerator::builder().length(10).build();
        assert_eq!(generator.generate().as_str().len(), 10);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let generator = RandomGenerator::new();
        let a = generator.generate_with(&mut StdRng::seed_from_u64(7));
        let b = generator.generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn draws_are_spread_out() {
        let generator = RandomGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);
        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate_with(&mut rng)).collect();
        assert_eq!(codes.len(), 1_000);

        let symbols: HashSet<u8> = codes.iter().flat_map(|c| c.as_str().bytes()).collect();
        assert_eq!(symbols.len(), ALPHABET.len());
    }

    #[test]
    fn alphabet_has_62_distinct_symbols() {
        let symbols: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(symbols.len(), 62);
    }
}
