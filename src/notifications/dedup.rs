// ABOUTME: Bounded expiring cache that lets each achievement notify once per user and day
// ABOUTME: LRU eviction plus per-entry TTL with an optional background sweep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use chrono::NaiveDate;
use gohealth_core::models::NotificationKind;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identity of one achievement: who, which day, which kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AchievementKey {
    /// Recipient
    pub user_id: Uuid,
    /// Day the achievement belongs to
    pub date: NaiveDate,
    /// Notification kind
    pub kind: NotificationKind,
}

type Store = Arc<RwLock<LruCache<AchievementKey, Instant>>>;

/// Remembers claimed achievement keys until their TTL passes
///
/// Capacity is bounded; when full, the least recently claimed key is evicted.
#[derive(Clone)]
pub struct AchievementDeduplicator {
    store: Store,
    ttl: Duration,
    shutdown_tx: Option<Arc<tokio::sync::mpsc::Sender<()>>>,
}

impl AchievementDeduplicator {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a de-duplicator without a background sweep
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl,
            shutdown_tx: None,
        }
    }

    /// Create a de-duplicator that sweeps expired keys every `cleanup_interval`
    ///
    /// Must be called inside a Tokio runtime. The sweep stops once every clone is dropped.
    #[must_use]
    pub fn with_cleanup(capacity: usize, ttl: Duration, cleanup_interval: Duration) -> Self {
        let mut dedup = Self::new(capacity, ttl);
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
        let store = dedup.store.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(cleanup_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        Self::cleanup_expired(&store).await;
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Achievement de-duplication sweep stopped");
                        break;
                    }
                }
            }
        });

        dedup.shutdown_tx = Some(Arc::new(shutdown_tx));
        dedup
    }

    /// Claim `key`; returns `false` when it was already claimed and has not expired
    pub async fn try_claim(&self, key: AchievementKey) -> bool {
        let mut store = self.store.write().await;
        if let Some(expires_at) = store.get(&key) {
            if Instant::now() < *expires_at {
                return false;
            }
        }
        store.put(key, Instant::now() + self.ttl);
        drop(store);
        true
    }

    /// Forget `key` so a later attempt can claim it again
    pub async fn release(&self, key: &AchievementKey) {
        self.store.write().await.pop(key);
    }

    /// Number of remembered keys, expired ones included until swept
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether no keys are remembered
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Drop expired keys now
    pub async fn purge_expired(&self) -> usize {
        Self::cleanup_expired(&self.store).await
    }

    async fn cleanup_expired(store: &Store) -> usize {
        let mut guard = store.write().await;
        let now = Instant::now();

        let expired: Vec<AchievementKey> = guard
            .iter()
            .filter(|(_, expires_at)| now >= **expires_at)
            .map(|(key, _)| *key)
            .collect();

        for key in &expired {
            guard.pop(key);
        }
        drop(guard);

        if !expired.is_empty() {
            tracing::debug!("Removed {} expired achievement keys", expired.len());
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(day: u32) -> AchievementKey {
        AchievementKey {
            user_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            kind: NotificationKind::DailyCaloryAchievement,
        }
    }

    #[tokio::test]
    async fn test_claim_once_per_key() {
        let dedup = AchievementDeduplicator::new(10, Duration::from_secs(60));
        assert!(dedup.try_claim(key(1)).await);
        assert!(!dedup.try_claim(key(1)).await);
        assert!(dedup.try_claim(key(2)).await);
    }

    #[tokio::test]
    async fn test_expired_key_can_be_claimed_again() {
        let dedup = AchievementDeduplicator::new(10, Duration::ZERO);
        assert!(dedup.try_claim(key(1)).await);
        assert!(dedup.try_claim(key(1)).await);
        assert_eq!(dedup.purge_expired().await, 1);
        assert!(dedup.is_empty().await);
    }
}
