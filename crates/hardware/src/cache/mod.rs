//! Set-Associative Cache with Victim Cache.
//!
//! This module implements the cache model replayed by the simulator. It performs:
//! 1. **Lookup:** Decodes each address and probes its main-cache set.
//! 2. **Victim swap:** On a main miss that hits the victim cache, swaps the block back
//!    into its set and moves the set's eviction into the victim cache.
//! 3. **Fill:** On a miss in both, fills the block (or the missing half of a
//!    sub-blocked line) and spills the set's eviction into the victim cache.
//! 4. **Accounting:** Feeds each outcome to the statistics counters.

/// Cache block entry.
pub mod block;

/// Cache replacement policy implementations (LRU, NMRU-FIFO).
pub mod policies;

/// Associative set container.
pub mod set;

/// Fully-associative victim cache.
pub mod victim;

use std::collections::HashMap;

use tracing::trace;

pub use self::block::Block;
pub use self::set::{CacheSet, Eviction};
pub use self::victim::VictimCache;
use crate::common::addr::Address;
use crate::common::data::{AccessResult, Operation};
use crate::config::{Geometry, StoragePolicy};
use crate::stats::CacheStats;

/// Main cache plus victim cache.
///
/// Sets are created on first use, so sparse traces over large geometries only pay
/// for the sets they touch.
#[derive(Debug, Clone)]
pub struct Cache {
    geometry: Geometry,
    sets: HashMap<u64, CacheSet>,
    victim: VictimCache,
}

impl Cache {
    /// Creates an empty cache for `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            victim: VictimCache::new(&geometry),
            sets: HashMap::new(),
            geometry,
        }
    }

    /// Geometry and policies this cache was built with.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Main-cache set `index`, or `None` if no access has reached it yet.
    pub fn set(&self, index: u64) -> Option<&CacheSet> {
        self.sets.get(&index)
    }

    /// The victim cache.
    pub const fn victim(&self) -> &VictimCache {
        &self.victim
    }

    /// Returns `true` if the block containing `raw` is resident in the main cache.
    pub fn contains(&self, raw: u64) -> bool {
        let adr = Address::decode(raw, &self.geometry);
        self.sets
            .get(&adr.index)
            .is_some_and(|set| set.contains(adr.tag))
    }

    /// Returns `true` if the block containing `raw` is held by the victim cache.
    pub fn victim_contains(&self, raw: u64) -> bool {
        let adr = Address::decode(raw, &self.geometry);
        self.victim.contains(&adr)
    }

    /// Replays one trace event and records it in `stats`.
    ///
    /// # Arguments
    ///
    /// * `op` - Read or write.
    /// * `raw` - Any 64-bit address.
    /// * `stats` - Counters updated in place.
    ///
    /// # Returns
    ///
    /// Whether the access hit in the main cache, hit in the victim cache, or missed.
    pub fn access(&mut self, op: Operation, raw: u64, stats: &mut CacheStats) -> AccessResult {
        let result = self.lookup(raw);
        stats.record(op, result);
        trace!(%op, %result, "access {raw:#x}");
        result
    }

    fn lookup(&mut self, raw: u64) -> AccessResult {
        let geometry = self.geometry;
        let adr = Address::decode(raw, &geometry);
        let set = self.sets.entry(adr.index).or_insert_with(|| {
            CacheSet::new(
                geometry.associativity() as usize,
                adr.index,
                geometry.block_size(),
                geometry.storage_policy,
                geometry.replace_policy,
            )
        });
        let victim = &mut self.victim;

        if set.access(&adr) {
            return AccessResult::Hit;
        }

        // The promoted block starts fresh: only the addressed half is valid.
        if victim.access(&adr) {
            let _ = victim.remove(&adr);
            if let Some(evicted) = set.add(&adr, None) {
                spill(victim, evicted);
            }
            return AccessResult::HitVictim;
        }

        // The set holds the tag with only the other half valid: fill the missing half.
        if geometry.storage_policy == StoragePolicy::Subblocking {
            if let Some(existing) = set.fetch(&adr) {
                let _ = set.add(&adr, Some(existing));
                return AccessResult::Miss;
            }
        }

        // Not taken while the victim cache is blocking: `victim.access` hit above.
        if let Some(mut partial) = victim.fetch(&adr) {
            partial.merge(geometry.fill_mask(adr.offset));
            let _ = victim.remove(&adr);
            if let Some(evicted) = set.add(&adr, Some(partial)) {
                spill(victim, evicted);
            }
            return AccessResult::Miss;
        }

        if let Some(evicted) = set.add(&adr, None) {
            spill(victim, evicted);
        }
        AccessResult::Miss
    }
}

/// Moves a block evicted from a main-cache set into the victim cache.
fn spill(victim: &mut VictimCache, evicted: Eviction) {
    trace!(
        index = evicted.address.index,
        valid = evicted.block.valid,
        "main set eviction of tag {:#x}",
        evicted.address.tag
    );
    if let Some(dropped) = victim.add(&evicted.address, Some(evicted.block)) {
        trace!("victim cache eviction of flat tag {:#x}", dropped.address.tag);
    }
}
