// 🎲 Sampler - uniform draw without replacement

use crate::code::Code;
use crate::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Draw `min(count, candidates.len())` distinct positions uniformly at random.
///
/// A count above the candidate size is clamped, not rejected. The result is
/// in draw order, not pool order.
pub fn sample<R: Rng + ?Sized>(candidates: &[Code], count: usize, rng: &mut R) -> Result<Vec<Code>> {
    if count == 0 {
        return Err(Error::InvalidCount(count));
    }

    let amount = count.min(candidates.len());
    let picked = index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect();

    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn candidates(n: usize) -> Vec<Code> {
        (0..n)
            .map(|i| Code::parse(&format!("{:05}", i * 11)).unwrap())
            .collect()
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            sample(&candidates(3), 0, &mut rng),
            Err(Error::InvalidCount(0))
        ));
    }

    #[test]
    fn test_count_above_size_returns_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = candidates(4);

        let picked = sample(&pool, 10, &mut rng).unwrap();
        assert_eq!(picked.len(), 4);

        let picked: HashSet<_> = picked.into_iter().collect();
        let expected: HashSet<_> = pool.into_iter().collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn test_no_duplicates_and_drawn_from_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = candidates(50);

        for count in [1, 5, 25, 50] {
            let picked = sample(&pool, count, &mut rng).unwrap();
            assert_eq!(picked.len(), count);

            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), count);
            assert!(picked.iter().all(|code| pool.contains(code)));
        }
    }

    #[test]
    fn test_empty_input_yields_empty_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(&[], 3, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let pool = candidates(10);
        let mut hits: HashMap<Code, usize> = HashMap::new();

        let rounds = 20_000;
        for _ in 0..rounds {
            for code in sample(&pool, 3, &mut rng).unwrap() {
                *hits.entry(code).or_default() += 1;
            }
        }

        // Each code expected 3/10 of the rounds = 6000
        for code in &pool {
            let count = hits.get(code).copied().unwrap_or(0);
            assert!((5400..=6600).contains(&count), "{} drawn {} times", code, count);
        }
    }

    #[test]
    fn test_same_seed_same_selection() {
        let pool = candidates(30);
        let a = sample(&pool, 5, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = sample(&pool, 5, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
