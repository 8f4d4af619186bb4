use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::Entity;

/// Outcome of drawing one record the caller has not seen yet.
#[derive(Debug, PartialEq, Eq)]
pub enum Pick<'a, T> {
    Selected(&'a T),
    /// Every record in the pool has already been seen.
    Exhausted,
    /// There was nothing to draw from.
    EmptyPool,
}

/// Draw a record uniformly at random from `pool`, excluding `seen` ids.
///
/// Exhaustion is detected before sampling, so this always terminates. Ids in
/// `seen` that are not part of the pool do not count towards exhaustion.
pub fn pick_unseen<'a, T, R>(pool: &'a [T], seen: &HashSet<T::Id>, rng: &mut R) -> Pick<'a, T>
where
    T: Entity,
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Pick::EmptyPool;
    }

    let unseen: Vec<&T> = pool.iter().filter(|r| !seen.contains(&r.id())).collect();
    match unseen.choose(rng) {
        Some(record) => Pick::Selected(*record),
        None => Pick::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, PartialEq, Eq)]
    struct Card(u32);

    impl Entity for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn empty_pool_is_reported() {
        let pool: Vec<Card> = vec![];
        assert_eq!(pick_unseen(&pool, &HashSet::new(), &mut rng()), Pick::EmptyPool);
    }

    #[test]
    fn all_seen_is_exhausted() {
        let pool = vec![Card(1), Card(2)];
        let seen: HashSet<u32> = [1, 2].into_iter().collect();
        assert_eq!(pick_unseen(&pool, &seen, &mut rng()), Pick::Exhausted);
    }

    #[test]
    fn foreign_seen_ids_do_not_exhaust_the_pool() {
        let pool = vec![Card(1), Card(2)];
        let seen: HashSet<u32> = [1, 99].into_iter().collect();
        assert_eq!(pick_unseen(&pool, &seen, &mut rng()), Pick::Selected(&Card(2)));
    }

    #[test]
    fn every_unseen_record_is_reachable() {
        let pool: Vec<Card> = (1..=4).map(Card).collect();
        let seen: HashSet<u32> = [2].into_iter().collect();
        let mut rng = rng();
        let mut hits = HashSet::new();
        for _ in 0..200 {
            if let Pick::Selected(card) = pick_unseen(&pool, &seen, &mut rng) {
                hits.insert(card.0);
            }
        }
        assert_eq!(hits, [1, 3, 4].into_iter().collect());
    }

    proptest! {
        /// Property: a selection is never a seen id; exhaustion only when nothing is left.
        #[test]
        fn never_returns_seen(ids in proptest::collection::hash_set(0u32..30, 0..15),
                              seen in proptest::collection::hash_set(0u32..30, 0..20),
                              seed in any::<u64>()) {
            let pool: Vec<Card> = ids.iter().copied().map(Card).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            match pick_unseen(&pool, &seen, &mut rng) {
                Pick::Selected(card) => prop_assert!(!seen.contains(&card.0)),
                Pick::Exhausted => prop_assert!(!pool.is_empty() && ids.is_subset(&seen)),
                Pick::EmptyPool => prop_assert!(pool.is_empty()),
            }
        }
    }
}
