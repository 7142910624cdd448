use std::sync::Arc;
use std::time::Duration;

use stashdb_common::StorageError;

use crate::entry::Entry;
use crate::keyspace::Keyspace;

/// Handle para o store de strings. Clonar é barato: todos os clones
/// compartilham o mesmo mapa.
#[derive(Clone)]
pub struct StringStore {
    keyspace: Arc<Keyspace<String>>,
}

impl StringStore {
    pub fn new() -> Self {
        Self {
            keyspace: Arc::new(Keyspace::new()),
        }
    }

    /// Cria a chave. `ttl` zero significa sem expiração.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) -> Result<(), StorageError> {
        self.keyspace.set(key.into(), value.into(), ttl)
    }

    /// Lê o valor; uma chave expirada é removida e retorna `Expired`.
    pub fn get(&self, key: &str) -> Result<Entry<String>, StorageError> {
        self.keyspace.get(key)
    }

    /// Substitui o valor sem alterar a expiração.
    pub fn update(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.keyspace.update(key, value.into())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.keyspace.remove(key)
    }

    pub fn len(&self) -> usize {
        self.keyspace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn set_get_basic() {
        let store = StringStore::new();
        store.set("key", "value", Duration::ZERO).unwrap();

        let entry = store.get("key").unwrap();
        assert_eq!(entry.value, "value");
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn set_existing_key_fails() {
        let store = StringStore::new();
        store.set("key", "v1", Duration::ZERO).unwrap();

        assert_eq!(
            store.set("key", "v2", Duration::ZERO),
            Err(StorageError::AlreadyExists)
        );
        assert_eq!(store.get("key").unwrap().value, "v1");
    }

    #[test]
    fn get_nonexistent() {
        let store = StringStore::new();
        assert_eq!(store.get("missing"), Err(StorageError::NotFound));
    }

    #[test]
    fn set_with_expiry() {
        let store = StringStore::new();
        store.set("key", "value", Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(2));

        assert_eq!(store.get("key"), Err(StorageError::Expired));
        assert_eq!(store.get("key"), Err(StorageError::NotFound));
    }

    #[test]
    fn ttl_not_reached_returns_value_and_deadline() {
        let store = StringStore::new();
        store.set("key", "value", Duration::from_secs(1)).unwrap();

        let entry = store.get("key").unwrap();
        assert_eq!(entry.value, "value");
        assert!(entry.expires_at().is_some());
    }

    #[test]
    fn zero_ttl_never_expires() {
        let store = StringStore::new();
        store.set("key", "value", Duration::ZERO).unwrap();
        thread::sleep(Duration::from_millis(5));

        assert_eq!(store.get("key").unwrap().value, "value");
    }

    #[test]
    fn update_existing() {
        let store = StringStore::new();
        store.set("key", "v1", Duration::ZERO).unwrap();
        store.update("key", "v2").unwrap();

        assert_eq!(store.get("key").unwrap().value, "v2");
    }

    #[test]
    fn missing_key_operations() {
        let store = StringStore::new();
        assert_eq!(store.update("missing", "v"), Err(StorageError::NotFound));
        assert_eq!(store.remove("missing"), Err(StorageError::NotFound));
        assert_eq!(store.get("missing"), Err(StorageError::NotFound));
        // UPDATE não cria a chave
        assert!(store.is_empty());
    }

    #[test]
    fn remove_then_get() {
        let store = StringStore::new();
        store.set("key", "value", Duration::ZERO).unwrap();
        store.remove("key").unwrap();

        assert_eq!(store.get("key"), Err(StorageError::NotFound));
    }

    #[test]
    fn clones_share_data() {
        let store = StringStore::new();
        let other = store.clone();
        store.set("key", "value", Duration::ZERO).unwrap();

        assert_eq!(other.get("key").unwrap().value, "value");
    }

    #[test]
    fn concurrent_set_distinct_keys() {
        let store = StringStore::new();
        const N: usize = 100;

        thread::scope(|s| {
            for i in 0..N {
                let store = &store;
                s.spawn(move || {
                    store
                        .set(format!("key-{i}"), format!("val-{i}"), Duration::ZERO)
                        .unwrap();
                });
            }
        });

        assert_eq!(store.len(), N);
        for i in 0..N {
            assert_eq!(store.get(&format!("key-{i}")).unwrap().value, format!("val-{i}"));
        }
    }

    #[test]
    fn concurrent_update_one_key() {
        let store = StringStore::new();
        store.set("key", "initial", Duration::ZERO).unwrap();
        const N: usize = 100;

        thread::scope(|s| {
            for i in 0..N {
                let store = &store;
                s.spawn(move || store.update("key", format!("val-{i}")).unwrap());
            }
        });

        let attempted: Vec<String> = (0..N).map(|i| format!("val-{i}")).collect();
        let value = store.get("key").unwrap().value;
        assert!(attempted.contains(&value), "valor inesperado: {value}");
    }
}
