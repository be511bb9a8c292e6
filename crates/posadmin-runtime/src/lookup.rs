//! id → label joins against a referenced collection.

use once_cell::unsync::OnceCell;
use posadmin_types::{Client, ClientId, Product, ProductId};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use tracing::warn;

/// Resolves foreign keys to display labels.
///
/// The id → label map is built lazily on first resolve and kept until the
/// referenced collection is replaced. Unknown keys resolve to `#<id>`.
pub struct LookupJoin<K, V> {
    records: Vec<V>,
    revision: u64,
    key_of: fn(&V) -> K,
    label_of: fn(&V) -> String,
    map: OnceCell<HashMap<K, String>>,
    builds: Cell<usize>,
}

impl<K: Eq + Hash + Display, V> LookupJoin<K, V> {
    pub fn new(key_of: fn(&V) -> K, label_of: fn(&V) -> String) -> Self {
        Self {
            records: Vec::new(),
            revision: 0,
            key_of,
            label_of,
            map: OnceCell::new(),
            builds: Cell::new(0),
        }
    }

    /// Swap in a freshly loaded collection; the map is rebuilt on next use.
    pub fn replace(&mut self, records: Vec<V>) {
        self.records = records;
        self.revision += 1;
        self.map.take();
    }

    /// Take the outcome of loading the referenced collection.
    ///
    /// A failed load is logged and leaves an empty map: rows still render,
    /// with fallback labels.
    pub fn load_from<E: Display>(&mut self, entity: &str, result: Result<Vec<V>, E>) {
        match result {
            Ok(records) => self.replace(records),
            Err(e) => {
                warn!(entity, error = %e, "lookup load failed; labels fall back to ids");
                self.replace(Vec::new());
            }
        }
    }

    /// Bumped on every [`LookupJoin::replace`]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a collection has been supplied yet
    pub fn is_loaded(&self) -> bool {
        self.revision > 0
    }

    /// How many times the map has been built
    pub fn builds(&self) -> usize {
        self.builds.get()
    }

    pub fn get(&self, key: &K) -> Option<&str> {
        self.map().get(key).map(String::as_str)
    }

    /// Label for `key`, or `#<key>` when the key is unknown
    pub fn resolve(&self, key: &K) -> String {
        match self.get(key) {
            Some(label) => label.to_string(),
            None => format!("#{}", key),
        }
    }

    fn map(&self) -> &HashMap<K, String> {
        self.map.get_or_init(|| {
            self.builds.set(self.builds.get() + 1);
            self.records
                .iter()
                .map(|record| ((self.key_of)(record), (self.label_of)(record)))
                .collect()
        })
    }
}

impl LookupJoin<ClientId, Client> {
    /// Client name by client id
    pub fn client_names() -> Self {
        Self::new(|c| c.id, |c| c.name.clone())
    }
}

impl LookupJoin<ProductId, Product> {
    /// Product name by product id
    pub fn product_names() -> Self {
        Self::new(|p| p.id, |p| p.name.clone())
    }

    /// Barcode by product id
    pub fn product_barcodes() -> Self {
        Self::new(|p| p.id, |p| p.barcode.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i64, name: &str) -> Client {
        Client {
            id: ClientId::new(id),
            name: name.to_string(),
            enabled: true,
        }
    }

    #[test]
    fn test_resolve_known_and_missing_keys() {
        let mut join = LookupJoin::client_names();
        join.replace(vec![client(1, "Acme"), client(2, "Globex")]);

        assert_eq!(join.resolve(&ClientId::new(2)), "Globex");
        assert_eq!(join.resolve(&ClientId::new(9)), "#9");
        assert_eq!(join.get(&ClientId::new(9)), None);
    }

    #[test]
    fn test_map_is_memoized_until_revision_changes() {
        let mut join = LookupJoin::client_names();
        join.replace(vec![client(1, "Acme")]);

        for _ in 0..5 {
            join.resolve(&ClientId::new(1));
        }
        assert_eq!(join.builds(), 1);

        join.replace(vec![client(1, "Acme Renamed")]);
        assert_eq!(join.revision(), 2);
        assert_eq!(join.resolve(&ClientId::new(1)), "Acme Renamed");
        assert_eq!(join.builds(), 2);
    }

    #[test]
    fn test_failed_load_yields_empty_map() {
        let mut join = LookupJoin::client_names();
        join.load_from::<String>("clients", Err("connection refused".to_string()));

        assert!(join.is_loaded());
        assert_eq!(join.resolve(&ClientId::new(4)), "#4");
    }

    #[test]
    fn test_barcode_lookup() {
        let mut join = LookupJoin::product_barcodes();
        join.replace(vec![Product {
            id: ProductId::new(7),
            name: "Tea".to_string(),
            barcode: "tea-007".to_string(),
            mrp: 4.5,
            client_id: ClientId::new(1),
            image_url: None,
        }]);

        assert_eq!(join.resolve(&ProductId::new(7)), "tea-007");
    }
}
