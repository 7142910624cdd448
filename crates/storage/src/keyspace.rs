use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;
use tracing::debug;

use stashdb_common::StorageError;

use crate::entry::{Deadline, Entry};
use crate::map::{self, EntryMap};

/// Mapa protegido por um único RwLock, com expiração lazy.
///
/// Compartilhado pelo store de strings e pelo de listas; cada um instancia
/// o seu com o tipo de valor que guarda.
pub(crate) struct Keyspace<V> {
    data: RwLock<EntryMap<V>>,
}

impl<V: Clone> Keyspace<V> {
    pub(crate) fn new() -> Self {
        Self {
            data: RwLock::new(EntryMap::new()),
        }
    }

    pub(crate) fn set(&self, key: String, value: V, ttl: Duration) -> Result<(), StorageError> {
        let now = Instant::now();
        let entry = Entry::new(value, Deadline::after(ttl, now));

        let mut data = self.data.write();
        // Chave expirada ainda não removida não bloqueia um novo SET
        purge_if_expired(&mut data, &key, now);
        map::insert(&mut data, key, entry)
    }

    pub(crate) fn get(&self, key: &str) -> Result<Entry<V>, StorageError> {
        let now = Instant::now();
        {
            let data = self.data.read();
            let entry = map::read(&data, key)?;
            if !entry.is_expired_at(now) {
                return Ok(entry.clone());
            }
        }

        let mut data = self.data.write();
        Err(finish_expired_read(&mut data, key, now))
    }

    pub(crate) fn update(&self, key: &str, value: V) -> Result<(), StorageError> {
        let mut data = self.data.write();
        ensure_live(&mut data, key, Instant::now())?;
        map::overwrite(&mut data, key, value)
    }

    pub(crate) fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.data.write();
        ensure_live(&mut data, key, Instant::now())?;
        map::delete(&mut data, key).map(drop)
    }

    /// Aplica `f` ao valor de uma chave viva, sob o lock exclusivo.
    pub(crate) fn mutate<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut V) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let mut data = self.data.write();
        ensure_live(&mut data, key, Instant::now())?;
        let entry = data.get_mut(key).ok_or(StorageError::NotFound)?;
        f(&mut entry.value)
    }

    /// Chaves fisicamente presentes, incluindo expiradas ainda não removidas.
    pub(crate) fn len(&self) -> usize {
        self.data.read().len()
    }
}

/// Segunda metade de um GET que viu a entrada expirada sob o read lock.
///
/// Entre soltar o read lock e pegar o write lock, outro GET pode ter removido
/// a chave, ou um SET pode tê-la recriado. Só remove o que ainda está expirado
/// em `now`, e o resultado é sempre `Expired`.
fn finish_expired_read<V>(data: &mut EntryMap<V>, key: &str, now: Instant) -> StorageError {
    purge_if_expired(data, key, now);
    StorageError::Expired
}

/// Remove a chave se ela existir e estiver expirada. Retorna se removeu.
fn purge_if_expired<V>(data: &mut EntryMap<V>, key: &str, now: Instant) -> bool {
    let expired = data.get(key).is_some_and(|e| e.is_expired_at(now));
    if expired {
        // Ausência aqui é benigna: a checagem acima garante presença
        let _ = map::delete(data, key);
        debug!("key expirada removida: {key}");
    }
    expired
}

fn ensure_live<V>(data: &mut EntryMap<V>, key: &str, now: Instant) -> Result<(), StorageError> {
    if purge_if_expired(data, key, now) {
        return Err(StorageError::Expired);
    }
    map::read(data, key).map(drop)
}
