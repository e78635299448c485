use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `min(count, items.len())` distinct elements in random order.
pub fn pick_random<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    items.choose_multiple(rng, count).cloned().collect()
}

/// Draw one element, `None` for an empty slice.
pub fn pick_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_random_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let items: Vec<u32> = (0..10).collect();

        assert_eq!(pick_random(&items, 4, &mut rng).len(), 4);
        assert_eq!(pick_random(&items, 25, &mut rng).len(), 10);
        assert!(pick_random(&items, 0, &mut rng).is_empty());
        assert!(pick_random::<u32, _>(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_pick_random_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..20).collect();

        for _ in 0..50 {
            let drawn = pick_random(&items, 8, &mut rng);
            let unique: HashSet<_> = drawn.iter().collect();
            assert_eq!(unique.len(), drawn.len());
            assert!(drawn.iter().all(|n| items.contains(n)));
        }
    }

    #[test]
    fn test_pick_random_is_seed_deterministic() {
        let items: Vec<u32> = (0..30).collect();
        let a = pick_random(&items, 5, &mut StdRng::seed_from_u64(9));
        let b = pick_random(&items, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_one() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_one::<u8, _>(&[], &mut rng).is_none());
        assert_eq!(pick_one(&[5], &mut rng), Some(&5));
    }
}
