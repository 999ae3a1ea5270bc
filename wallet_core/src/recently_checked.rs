//! Recently-checked transaction cache. Bounds how often the status of one
//! transaction is queried from the external classifier.
//!
//! Entries expire after `max_age_secs` and the cache is a bounded FIFO: when
//! full, the oldest entry is evicted to make room. Expiry is checked lazily
//! on access, there is no timer.

use ccwallet_types::{Timestamp, TxId};
use std::collections::{HashMap, VecDeque};

pub struct RecentlyChecked {
    checked: HashMap<TxId, Timestamp>,
    /// Insertion order. May hold superseded `(id, time)` pairs for ids that
    /// were re-marked after expiring; those are skipped on eviction.
    order: VecDeque<(TxId, Timestamp)>,
    capacity: usize,
    max_age_secs: u64,
}

impl RecentlyChecked {
    pub fn new(capacity: usize, max_age_secs: u64) -> Self {
        Self {
            checked: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            max_age_secs,
        }
    }

    fn is_fresh(&self, at: Timestamp, now: Timestamp) -> bool {
        at.elapsed_since(now) <= self.max_age_secs
    }

    /// Whether `tx_id` was checked no more than `max_age_secs` before `now`.
    pub fn contains(&self, tx_id: &TxId, now: Timestamp) -> bool {
        self.checked
            .get(tx_id)
            .is_some_and(|at| self.is_fresh(*at, now))
    }

    /// Record `tx_id` as checked at `now`, evicting the oldest entry if at
    /// capacity.
    pub fn insert(&mut self, tx_id: TxId, now: Timestamp) {
        if self.capacity == 0 {
            return;
        }
        self.prune(now);
        self.checked.insert(tx_id, now);
        self.order.push_back((tx_id, now));
        while self.order.len() > self.capacity {
            self.evict_front();
        }
    }

    /// Mark `tx_id` as checked unless it already is. Returns `true` when the
    /// caller should go ahead with the check.
    pub fn check_and_insert(&mut self, tx_id: TxId, now: Timestamp) -> bool {
        if self.contains(&tx_id, now) {
            return false;
        }
        self.insert(tx_id, now);
        true
    }

    /// Drop expired entries from the front of the queue.
    fn prune(&mut self, now: Timestamp) {
        while let Some(&(_, at)) = self.order.front() {
            if self.is_fresh(at, now) {
                break;
            }
            self.evict_front();
        }
    }

    fn evict_front(&mut self) {
        if let Some((id, at)) = self.order.pop_front() {
            if self.checked.get(&id) == Some(&at) {
                self.checked.remove(&id);
            }
        }
    }

    /// Number of ids currently remembered, fresh or not yet pruned.
    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }
}
