//! Uniform random sampling for "surprise me" interactions.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one element uniformly at random, or `None` for an empty slice.
///
/// Each call is independent; repeated clicks may repeat picks. Whether the
/// caller samples the filtered or the full collection is the caller's choice.
pub fn sample<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// Seedable variant of [`sample`] for deterministic tests.
pub fn sample_with<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_empty_collection_returns_none() {
        let items: Vec<i32> = Vec::new();
        assert!(sample(&items).is_none());
    }

    #[test]
    fn test_sample_is_element_of_collection() {
        let items = vec!["a", "b", "c"];
        for _ in 0..100 {
            let picked = sample(&items).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_single_element_always_picked() {
        let items = vec![7];
        assert_eq!(sample(&items), Some(&7));
    }

    #[test]
    fn test_distribution_is_approximately_uniform() {
        let items: Vec<u32> = (0..10).collect();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut counts: HashMap<u32, u32> = HashMap::new();

        for _ in 0..10_000 {
            let picked = sample_with(&items, &mut rng).unwrap();
            *counts.entry(*picked).or_default() += 1;
        }

        // Expected 1000 per element; accept [500, 2000].
        for value in &items {
            let count = counts.get(value).copied().unwrap_or(0);
            assert!(
                (500..=2000).contains(&count),
                "element {value} drawn {count} times"
            );
        }
    }
}
