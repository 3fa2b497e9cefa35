use std::collections::HashSet;

use tgscan_core::{ScanResult, StoreRecord};

/// Running set of unique store records for one scan.
///
/// Keyed by record id; the first record seen for an id is kept and later
/// duplicates (from overlapping zone radii) are discarded. Records keep
/// first-seen order.
#[derive(Debug, Default)]
pub(crate) struct Aggregator {
    stores: Vec<StoreRecord>,
    ids: HashSet<String>,
}

impl Aggregator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `record` unless its id is already present. Returns whether it was added.
    pub(crate) fn insert(&mut self, record: StoreRecord) -> bool {
        if self.ids.contains(&record.id) {
            return false;
        }
        self.ids.insert(record.id.clone());
        self.stores.push(record);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.stores.len()
    }

    /// A timestamped copy of the current state, for incremental saves.
    pub(crate) fn snapshot(&self) -> ScanResult {
        ScanResult::stamped_now(self.stores.clone())
    }

    pub(crate) fn into_result(self) -> ScanResult {
        ScanResult::stamped_now(self.stores)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(id: &str, name: &str) -> StoreRecord {
        StoreRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            lat: 40.7,
            lng: -73.9,
            available: 1,
            rating: 0.0,
            ratings_count: 0,
            price: Decimal::new(499, 2),
            original_price: Decimal::new(1500, 2),
            currency: "USD".to_owned(),
            category: "MEAL".to_owned(),
            pickup_start: None,
            pickup_end: None,
            tags: vec![],
            cover_image: None,
        }
    }

    #[test]
    fn first_write_wins_on_duplicate_id() {
        let mut agg = Aggregator::new();
        assert!(agg.insert(record("1", "first")));
        assert!(!agg.insert(record("1", "second")));
        assert_eq!(agg.len(), 1);

        let result = agg.into_result();
        assert_eq!(result.stores()[0].name, "first");
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut agg = Aggregator::new();
        for id in ["c", "a", "b", "a"] {
            agg.insert(record(id, id));
        }
        let snapshot = agg.snapshot();
        let ids: Vec<&str> = snapshot.stores().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn snapshot_total_matches_store_count() {
        let mut agg = Aggregator::new();
        agg.insert(record("1", "one"));
        agg.insert(record("2", "two"));
        let snapshot = agg.snapshot();
        assert_eq!(snapshot.total_stores(), snapshot.stores().len());
        assert_eq!(snapshot.total_stores(), 2);
    }
}
