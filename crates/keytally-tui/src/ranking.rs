//! Ranking: orders a snapshot by count for the list view.

use keytally_core::{KeyId, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedKey {
    pub id: KeyId,
    pub count: u64,
}

/// Keys sorted by count, highest first, truncated to `top_n` when given.
///
/// Ties keep the snapshot's ascending `KeyId` order (the sort is stable), so
/// the same tally always ranks the same way.
pub fn rank(snapshot: &Snapshot, top_n: Option<usize>) -> Vec<RankedKey> {
    let mut ranked: Vec<RankedKey> = snapshot
        .iter()
        .map(|(id, count)| RankedKey { id: id.clone(), count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(pairs: &[(&str, u64)]) -> Snapshot {
        pairs.iter().map(|(k, v)| (KeyId::new(*k), *v)).collect()
    }

    fn pairs(ranked: &[RankedKey]) -> Vec<(&str, u64)> {
        ranked.iter().map(|r| (r.id.as_str(), r.count)).collect()
    }

    #[test]
    fn top_two_descending() {
        let s = snap(&[("a", 5), ("b", 3), ("c", 9), ("d", 1)]);
        assert_eq!(pairs(&rank(&s, Some(2))), vec![("c", 9), ("a", 5)]);
    }

    #[test]
    fn no_limit_returns_all() {
        let s = snap(&[("a", 5), ("b", 3), ("c", 9), ("d", 1)]);
        assert_eq!(
            pairs(&rank(&s, None)),
            vec![("c", 9), ("a", 5), ("b", 3), ("d", 1)]
        );
    }

    #[test]
    fn ties_break_by_key_id() {
        let s = snap(&[("z", 2), ("Key.space", 2), ("m", 2), ("a", 1)]);
        assert_eq!(
            pairs(&rank(&s, None)),
            vec![("Key.space", 2), ("m", 2), ("z", 2), ("a", 1)]
        );
    }

    #[test]
    fn limit_larger_than_tally_and_zero() {
        let s = snap(&[("a", 1)]);
        assert_eq!(rank(&s, Some(10)).len(), 1);
        assert!(rank(&s, Some(0)).is_empty());
        assert!(rank(&Snapshot::default(), None).is_empty());
    }
}
