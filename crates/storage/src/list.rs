use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use stashdb_common::StorageError;

use crate::entry::Entry;
use crate::keyspace::Keyspace;

/// Handle para o store de listas FIFO.
///
/// Genérico no tipo do item; o servidor usa `ListStore<String>`.
pub struct ListStore<T = String> {
    keyspace: Arc<Keyspace<VecDeque<T>>>,
}

impl<T> Clone for ListStore<T> {
    fn clone(&self) -> Self {
        Self {
            keyspace: Arc::clone(&self.keyspace),
        }
    }
}

impl<T: Clone> ListStore<T> {
    pub fn new() -> Self {
        Self {
            keyspace: Arc::new(Keyspace::new()),
        }
    }

    /// Cria a lista (pode ser vazia). `ttl` zero significa sem expiração.
    pub fn set(&self, key: impl Into<String>, items: Vec<T>, ttl: Duration) -> Result<(), StorageError> {
        self.keyspace.set(key.into(), items.into(), ttl)
    }

    pub fn get(&self, key: &str) -> Result<Entry<Vec<T>>, StorageError> {
        self.keyspace.get(key).map(|entry| entry.map(Vec::from))
    }

    /// Substitui a lista inteira sem alterar a expiração.
    pub fn update(&self, key: &str, items: Vec<T>) -> Result<(), StorageError> {
        self.keyspace.update(key, items.into())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.keyspace.remove(key)
    }

    /// Adiciona no fim da lista. Nunca cria a chave.
    pub fn push(&self, key: &str, item: T) -> Result<(), StorageError> {
        self.keyspace.mutate(key, |list| {
            list.push_back(item);
            Ok(())
        })
    }

    /// Remove e retorna o primeiro item (FIFO). A chave continua existindo
    /// mesmo que a lista fique vazia.
    pub fn pop(&self, key: &str) -> Result<T, StorageError> {
        self.keyspace
            .mutate(key, |list| list.pop_front().ok_or(StorageError::EmptyList))
    }

    pub fn len(&self) -> usize {
        self.keyspace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for ListStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
