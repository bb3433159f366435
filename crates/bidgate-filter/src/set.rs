//! Fixed-universe bitmask over configuration ids.
//!
//! Every per-request filtering structure is a set of configuration ids drawn
//! from a universe whose size is fixed when the request's `FilterState` is
//! built. Storing those sets as packed `u64` words makes membership O(1),
//! intersection O(words), and forward iteration a hardware bit-scan, which is
//! what keeps the per-request narrowing pass inside the exchange's latency
//! budget.

use bidgate_core::types::ConfigId;
use std::ops::BitAndAssign;

const BITS_PER_WORD: usize = 64;

/// A set of configuration ids over a fixed universe, backed by `u64` words.
///
/// The universe size doubles as the "none remaining" sentinel returned by
/// [`ConfigSet::next`]. Bits at indices at or beyond the universe size are
/// never set, so iteration never yields an out-of-universe id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSet {
    words: Vec<u64>,
    size: usize,
}

impl ConfigSet {
    /// Create an empty set over a universe of `size` configuration ids.
    pub fn with_capacity(size: usize) -> Self {
        let num_words = (size + BITS_PER_WORD - 1) / BITS_PER_WORD;
        Self {
            words: vec![0; num_words],
            size,
        }
    }

    /// Create a set with every id in the universe present.
    pub fn full(size: usize) -> Self {
        let mut set = Self::with_capacity(size);
        for word in &mut set.words {
            *word = !0;
        }
        // Keep the unused tail bits of the last word clear.
        let tail = size % BITS_PER_WORD;
        if tail != 0 {
            if let Some(last) = set.words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        set
    }

    /// Universe size; also the sentinel value meaning "no member remaining".
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `id` is in the set.
    #[inline]
    pub fn contains(&self, id: ConfigId) -> bool {
        let idx = id as usize;
        debug_assert!(idx < self.size, "ConfigSet::contains out of universe");
        (self.words[idx / BITS_PER_WORD] & (1u64 << (idx % BITS_PER_WORD))) != 0
    }

    /// Add `id` to the set.
    #[inline]
    pub fn insert(&mut self, id: ConfigId) {
        let idx = id as usize;
        debug_assert!(idx < self.size, "ConfigSet::insert out of universe");
        self.words[idx / BITS_PER_WORD] |= 1u64 << (idx % BITS_PER_WORD);
    }

    /// Remove `id` from the set.
    #[inline]
    pub fn remove(&mut self, id: ConfigId) {
        let idx = id as usize;
        debug_assert!(idx < self.size, "ConfigSet::remove out of universe");
        self.words[idx / BITS_PER_WORD] &= !(1u64 << (idx % BITS_PER_WORD));
    }

    /// In-place intersection with another set over the same universe.
    #[inline]
    pub fn intersect(&mut self, other: &ConfigSet) {
        debug_assert_eq!(self.size, other.size, "ConfigSet universe mismatch");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= other_word;
        }
    }

    /// Index of the first set member at or after `from`, or [`size`] when
    /// none remain.
    ///
    /// Repeating with `from = previous + 1` until the sentinel walks every
    /// member in ascending order.
    ///
    /// [`size`]: ConfigSet::size
    #[inline]
    pub fn next(&self, from: usize) -> usize {
        if from >= self.size {
            return self.size;
        }
        let mut word_idx = from / BITS_PER_WORD;
        // Mask off members below `from` in the first word.
        let mut word = self.words[word_idx] & (!0u64 << (from % BITS_PER_WORD));
        loop {
            if word != 0 {
                return word_idx * BITS_PER_WORD + word.trailing_zeros() as usize;
            }
            word_idx += 1;
            if word_idx == self.words.len() {
                return self.size;
            }
            word = self.words[word_idx];
        }
    }

    /// Number of members in the set.
    #[inline]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no members remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Returns true if every member of `self` is also a member of `other`.
    pub fn is_subset_of(&self, other: &ConfigSet) -> bool {
        debug_assert_eq!(self.size, other.size, "ConfigSet universe mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .all(|(word, other_word)| word & !other_word == 0)
    }

    /// Iterate members in ascending order.
    pub fn iter(&self) -> ConfigSetIter<'_> {
        ConfigSetIter {
            set: self,
            cursor: 0,
        }
    }
}

impl BitAndAssign<&ConfigSet> for ConfigSet {
    fn bitand_assign(&mut self, rhs: &ConfigSet) {
        self.intersect(rhs);
    }
}

/// Ascending iterator over the members of a [`ConfigSet`].
pub struct ConfigSetIter<'a> {
    set: &'a ConfigSet,
    cursor: usize,
}

impl Iterator for ConfigSetIter<'_> {
    type Item = ConfigId;

    fn next(&mut self) -> Option<ConfigId> {
        let id = self.set.next(self.cursor);
        if id == self.set.size() {
            return None;
        }
        self.cursor = id + 1;
        Some(id as ConfigId)
    }
}

impl<'a> IntoIterator for &'a ConfigSet {
    type Item = ConfigId;
    type IntoIter = ConfigSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = ConfigSet::with_capacity(100);
        assert_eq!(set.size(), 100);
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert_eq!(set.next(0), 100);
    }

    #[test]
    fn test_full_set_masks_tail() {
        let set = ConfigSet::full(70);
        assert_eq!(set.count(), 70);
        // Nothing past the universe boundary, even though the last word has
        // room for 128 bits.
        assert_eq!(set.next(69), 69);
        assert_eq!(set.next(70), 70);
    }

    #[test]
    fn test_full_set_word_aligned() {
        let set = ConfigSet::full(128);
        assert_eq!(set.count(), 128);
        assert_eq!(set.next(127), 127);
        assert_eq!(set.next(128), 128);
    }

    #[test]
    fn test_insert_remove_contains() {
        let mut set = ConfigSet::with_capacity(80);
        set.insert(0);
        set.insert(63);
        set.insert(64);
        set.insert(79);

        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(set.contains(79));
        assert!(!set.contains(1));
        assert_eq!(set.count(), 4);

        set.remove(63);
        assert!(!set.contains(63));
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn test_next_walks_members_in_order() {
        let mut set = ConfigSet::with_capacity(200);
        for id in [3u32, 64, 65, 130, 199] {
            set.insert(id);
        }

        let mut members = Vec::new();
        let mut cursor = set.next(0);
        while cursor < set.size() {
            members.push(cursor as u32);
            cursor = set.next(cursor + 1);
        }
        assert_eq!(members, vec![3, 64, 65, 130, 199]);
    }

    #[test]
    fn test_next_from_mid_word() {
        let mut set = ConfigSet::with_capacity(64);
        set.insert(10);
        set.insert(40);
        assert_eq!(set.next(0), 10);
        assert_eq!(set.next(10), 10);
        assert_eq!(set.next(11), 40);
        assert_eq!(set.next(41), 64);
    }

    #[test]
    fn test_intersect() {
        let mut a = ConfigSet::with_capacity(128);
        let mut b = ConfigSet::with_capacity(128);
        for id in [1u32, 5, 70, 100] {
            a.insert(id);
        }
        for id in [5u32, 70, 101] {
            b.insert(id);
        }

        a &= &b;
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![5, 70]);
    }

    #[test]
    fn test_is_subset_of() {
        let full = ConfigSet::full(96);
        let mut sub = ConfigSet::with_capacity(96);
        sub.insert(0);
        sub.insert(95);

        assert!(sub.is_subset_of(&full));
        assert!(!full.is_subset_of(&sub));
        assert!(sub.is_subset_of(&sub));
    }

    #[test]
    fn test_iterator() {
        let mut set = ConfigSet::with_capacity(10);
        set.insert(2);
        set.insert(7);
        let members: Vec<_> = set.iter().collect();
        assert_eq!(members, vec![2, 7]);
    }

    #[test]
    fn test_zero_universe() {
        let set = ConfigSet::with_capacity(0);
        assert_eq!(set.next(0), 0);
        assert!(set.is_empty());
        assert_eq!(ConfigSet::full(0).count(), 0);
    }
}
