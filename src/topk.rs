//! Bounded, comparator-ordered top-K retention.
//!
//! A [`TopK`] keeps only the K "heaviest" items ever inserted, sorted
//! descending by a caller-supplied comparator. Once the set is warm, the
//! common case is an O(1) rejection: most late arrivals are lighter than
//! the established top-K.
//!
//! The comparator implements a *non-strict* "a is at least as heavy as b"
//! relation. Non-strict is what keeps ties stable: an incoming item equal
//! to a retained one sorts after it, so earlier-inserted elements keep
//! their rank without any extra bookkeeping.

use crate::utils::error::ConfigError;

/// Comparator type: returns true when `a` is at least as heavy as `b`.
pub type HeavierOrEqual<T> = fn(&T, &T) -> bool;

/// A capacity-limited set retaining the K heaviest insertions.
#[derive(Debug)]
pub struct TopK<T> {
    capacity: usize,
    cmp: HeavierOrEqual<T>,
    items: Vec<T>,
}

impl<T> TopK<T> {
    /// Create a set retaining at most `capacity` items.
    ///
    /// # Errors
    /// * `ConfigError::ZeroCapacity` - capacity must be at least 1
    pub fn new(capacity: usize, cmp: HeavierOrEqual<T>) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            cmp,
            items: Vec::with_capacity(capacity),
        })
    }

    /// Offer an item; it is retained only while it ranks in the top K.
    pub fn insert(&mut self, item: T) {
        // Warm-set fast path: reject anything not strictly heavier than
        // the lightest retained element.
        if self.items.len() == self.capacity {
            let lightest = &self.items[self.items.len() - 1];
            if (self.cmp)(lightest, &item) {
                return;
            }
        }

        // First position where the existing element is no longer >= item.
        // Equal elements report "heavier or equal", so the new item lands
        // after them (first-seen ordering).
        let pos = self.items.partition_point(|existing| (self.cmp)(existing, &item));
        self.items.insert(pos, item);

        if self.items.len() > self.capacity {
            self.items.pop();
        }
    }

    /// Ordered view of the retained items, heaviest first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> TopK<T> {
    /// Clone the retained items into a vector, heaviest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(a: &u64, b: &u64) -> bool {
        a >= b
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(TopK::<u64>::new(0, desc).is_err());
    }

    #[test]
    fn test_keeps_heaviest_sorted() {
        let mut set = TopK::new(3, desc as HeavierOrEqual<u64>).unwrap();
        for v in [5, 1, 9, 3, 7, 2] {
            set.insert(v);
        }
        assert_eq!(set.as_slice(), &[9, 7, 5]);
    }

    #[test]
    fn test_len_is_min_of_n_and_k() {
        let mut set = TopK::new(10, desc as HeavierOrEqual<u64>).unwrap();
        set.insert(4);
        set.insert(2);
        assert_eq!(set.len(), 2);
        for v in 0..50 {
            set.insert(v);
        }
        assert_eq!(set.len(), 10);
    }
}
