//! Primitivas genéricas sobre o mapa chave → entrada.
//!
//! Assumem que o chamador já segura o lock apropriado; nenhuma delas olha
//! para a expiração.

use std::collections::HashMap;
use std::collections::hash_map;

use stashdb_common::StorageError;

use crate::entry::Entry;

pub(crate) type EntryMap<V> = HashMap<String, Entry<V>>;

/// Insere somente se a chave não existir.
pub(crate) fn insert<V>(map: &mut EntryMap<V>, key: String, entry: Entry<V>) -> Result<(), StorageError> {
    match map.entry(key) {
        hash_map::Entry::Occupied(_) => Err(StorageError::AlreadyExists),
        hash_map::Entry::Vacant(slot) => {
            slot.insert(entry);
            Ok(())
        }
    }
}

pub(crate) fn read<'a, V>(map: &'a EntryMap<V>, key: &str) -> Result<&'a Entry<V>, StorageError> {
    map.get(key).ok_or(StorageError::NotFound)
}

/// Substitui o valor mantendo o prazo de expiração intacto.
pub(crate) fn overwrite<V>(map: &mut EntryMap<V>, key: &str, value: V) -> Result<(), StorageError> {
    let entry = map.get_mut(key).ok_or(StorageError::NotFound)?;
    entry.value = value;
    Ok(())
}

pub(crate) fn delete<V>(map: &mut EntryMap<V>, key: &str) -> Result<Entry<V>, StorageError> {
    map.remove(key).ok_or(StorageError::NotFound)
}
