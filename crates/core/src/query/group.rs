/// Fold runs of records sharing a key into groups, in input order.
///
/// Records with equal keys end up in one group only when they are adjacent;
/// sort by the key first if the input is not already clustered.
pub fn group_contiguous<T, K, F>(records: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for record in records {
        let k = key(&record);
        match groups.last_mut() {
            Some((last, members)) if *last == k => members.push(record),
            _ => groups.push((k, vec![record])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_adjacent_keys() {
        let rows = vec![("SF", 1), ("SF", 2), ("NY", 3), ("NY", 4), ("SF", 5)];
        let groups = group_contiguous(rows, |r| r.0);
        let keys: Vec<_> = groups.iter().map(|g| g.0).collect();
        assert_eq!(keys, vec!["SF", "NY", "SF"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let groups = group_contiguous(Vec::<(u8, u8)>::new(), |r| r.0);
        assert!(groups.is_empty());
    }

    proptest! {
        /// Property: with clustered input each key yields exactly one group.
        #[test]
        fn clustered_keys_never_split(mut keys in proptest::collection::vec(0u8..5, 0..40)) {
            keys.sort();
            let groups = group_contiguous(keys.clone(), |k| *k);

            let mut seen = std::collections::HashSet::new();
            for (k, members) in &groups {
                prop_assert!(seen.insert(*k));
                prop_assert!(members.iter().all(|m| m == k));
            }
            let flattened: Vec<u8> = groups.into_iter().flat_map(|(_, m)| m).collect();
            prop_assert_eq!(flattened, keys);
        }
    }
}
