//! Process-wide interning of block metadata compounds.
//!
//! Structurally equal compounds share one `Arc` while any block still holds
//! it. Slots are keyed by the compound's structural hash and hold a
//! [`Weak`] reference plus the time it was written, so an entry goes away on
//! either of two independent triggers:
//!
//! - **liveness**: the last block referencing the compound was dropped;
//! - **expiry**: `expire_after_write` elapsed since the slot was written.
//!
//! Dead and expired slots are pruned from the bucket being interned into, and
//! from the whole map by [`NbtCache::sweep`], which also runs every
//! `sweep_interval` interns.

use std::hash::{BuildHasher, RandomState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use mc_block_nbt::NbtCompound;
use tracing::{debug, trace};

use crate::config::CacheConfig;

static GLOBAL_CACHE: OnceLock<NbtCache> = OnceLock::new();

/// The cache blocks intern their metadata through. Created with
/// [`CacheConfig::default`] unless [`install_nbt_cache`] ran first.
pub fn nbt_cache() -> &'static NbtCache {
    GLOBAL_CACHE.get_or_init(|| NbtCache::new(&CacheConfig::default()))
}

/// Installs the process-wide cache with `config`.
///
/// Returns `false` if the cache was already created (explicitly or by a first
/// intern), in which case `config` is ignored.
pub fn install_nbt_cache(config: &CacheConfig) -> bool {
    let mut installed = false;
    GLOBAL_CACHE.get_or_init(|| {
        installed = true;
        NbtCache::new(config)
    });
    installed
}

struct CacheSlot {
    value: Weak<NbtCompound>,
    written: Instant,
}

impl CacheSlot {
    fn is_live(&self, now: Instant, expire_after_write: Duration) -> bool {
        self.value.strong_count() > 0
            && now.saturating_duration_since(self.written) < expire_after_write
    }
}

pub struct NbtCache {
    buckets: DashMap<u64, Vec<CacheSlot>>,
    hasher: RandomState,
    expire_after_write: Duration,
    sweep_interval: u64,
    interns: AtomicU64,
}

impl NbtCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            hasher: RandomState::new(),
            expire_after_write: config.expire_after_write(),
            sweep_interval: config.sweep_interval,
            interns: AtomicU64::new(0),
        }
    }

    /// Returns the shared instance structurally equal to `compound`, admitting
    /// `compound` itself when no live one exists.
    ///
    /// The bucket's shard lock is held for the lookup and the admission, so of
    /// two threads interning equal compounds exactly one admits and the other
    /// gets the winner back.
    pub fn intern(&self, compound: NbtCompound) -> Arc<NbtCompound> {
        let hash = self.hasher.hash_one(&compound);
        let now = Instant::now();

        let interned = {
            let mut bucket = self.buckets.entry(hash).or_default();
            bucket.retain(|slot| slot.is_live(now, self.expire_after_write));

            let hit = bucket
                .iter()
                .find_map(|slot| slot.value.upgrade().filter(|c| **c == compound));
            match hit {
                Some(shared) => {
                    trace!("NBT cache hit ({} entries)", shared.len());
                    shared
                }
                None => {
                    let admitted = Arc::new(compound);
                    bucket.push(CacheSlot {
                        value: Arc::downgrade(&admitted),
                        written: now,
                    });
                    trace!("NBT cache admitted compound ({} entries)", admitted.len());
                    admitted
                }
            }
        };

        // The shard lock above must be released before sweeping.
        let count = self.interns.fetch_add(1, Ordering::Relaxed) + 1;
        if self.sweep_interval > 0 && count % self.sweep_interval == 0 {
            self.sweep();
        }
        interned
    }

    /// Drops every dead or expired slot. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut evicted = 0;
        self.buckets.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|slot| slot.is_live(now, self.expire_after_write));
            evicted += before - bucket.len();
            !bucket.is_empty()
        });
        if evicted > 0 {
            debug!("NBT cache sweep evicted {evicted} entries");
        }
        evicted
    }

    /// Number of slots currently held, including ones not yet swept.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_block_nbt::NbtTag;
    use std::thread;

    fn cache(expire_after_write_secs: u64, sweep_interval: u64) -> NbtCache {
        NbtCache::new(&CacheConfig {
            expire_after_write_secs,
            sweep_interval,
        })
    }

    fn compound(text: &str) -> NbtCompound {
        let mut c = NbtCompound::new();
        c.insert("Text".into(), NbtTag::String(text.into()));
        c.insert("IsEditable".into(), NbtTag::Byte(1));
        c
    }

    #[test]
    fn equal_compounds_share_one_instance() {
        let cache = cache(300, 0);
        let a = cache.intern(compound("hello"));
        let b = cache.intern(compound("hello"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_compounds_stay_apart() {
        let cache = cache(300, 0);
        let a = cache.intern(compound("hello"));
        let b = cache.intern(compound("world"));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_does_not_keep_values_alive() {
        let cache = cache(300, 0);
        let a = cache.intern(compound("hello"));
        let weak = Arc::downgrade(&a);
        drop(a);
        assert!(weak.upgrade().is_none());
        assert_eq!(cache.sweep(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn dropped_value_is_readmitted() {
        let cache = cache(300, 0);
        drop(cache.intern(compound("hello")));
        let again = cache.intern(compound("hello"));
        assert_eq!(*again, compound("hello"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_slots_may_be_evicted() {
        let cache = cache(0, 0);
        let a = cache.intern(compound("hello"));
        // Still referenced, but past the expiry window: absence is permitted.
        cache.sweep();
        assert!(cache.len() <= 1);
        assert_eq!(*a, compound("hello"));
    }

    #[test]
    fn periodic_sweep_prunes_other_buckets() {
        let cache = cache(300, 2);
        drop(cache.intern(compound("one")));
        let kept = cache.intern(compound("two"));
        // Second intern triggered a sweep that removed the dead slot.
        assert_eq!(cache.len(), 1);
        assert_eq!(*kept, compound("two"));
    }

    #[test]
    fn concurrent_interns_agree_on_one_winner() {
        let cache = cache(300, 0);
        let results: Vec<Arc<NbtCompound>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.intern(compound("race"))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for r in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], r));
        }
        assert_eq!(cache.len(), 1);
    }
}
