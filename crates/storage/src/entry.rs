use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

/// Prazo de expiração. A checagem usa o relógio monotônico; o horário de
/// parede é guardado só para exibir ao cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    wall: DateTime<Utc>,
}

impl Deadline {
    /// TTL zero nunca expira; um TTL que não cabe num instante ou num
    /// timestamp também é tratado como sem expiração.
    pub(crate) fn after(ttl: Duration, now: Instant) -> Option<Self> {
        if ttl.is_zero() {
            return None;
        }
        let at = now.checked_add(ttl)?;
        let wall = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta))?;
        Some(Self { at, wall })
    }

    pub fn wall_clock(&self) -> DateTime<Utc> {
        self.wall
    }
}

/// Entrada no store: valor + expiração opcional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    pub value: V,
    pub deadline: Option<Deadline>,
}

impl<V> Entry<V> {
    pub fn new(value: V, deadline: Option<Deadline>) -> Self {
        Self { value, deadline }
    }

    /// Momento de expiração em UTC, para respostas.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.deadline.map(|d| d.wall)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d.at)
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(V) -> U) -> Entry<U> {
        Entry::new(f(self.value), self.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_expiry_never_expires() {
        let entry = Entry::new("v", None);
        assert!(!entry.is_expired_at(Instant::now() + Duration::from_secs(86_400)));
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn entry_expires_at_deadline() {
        let now = Instant::now();
        let entry = Entry::new("v", Deadline::after(Duration::from_secs(10), now));
        assert!(!entry.is_expired_at(now));
        assert!(!entry.is_expired_at(now + Duration::from_secs(9)));
        assert!(entry.is_expired_at(now + Duration::from_secs(10)));
    }

    #[test]
    fn zero_ttl_has_no_expiry() {
        assert_eq!(Deadline::after(Duration::ZERO, Instant::now()), None);
    }

    #[test]
    fn wall_clock_follows_ttl() {
        let before = Utc::now();
        let deadline = Deadline::after(Duration::from_secs(60), Instant::now()).unwrap();
        let after = Utc::now();
        assert!(deadline.wall_clock() >= before + TimeDelta::seconds(60));
        assert!(deadline.wall_clock() <= after + TimeDelta::seconds(60));
    }

    #[test]
    fn huge_ttl_saturates_to_no_expiry() {
        assert_eq!(Deadline::after(Duration::MAX, Instant::now()), None);
    }
}
