//! Frequency bucket: an insertion-ordered key set
//!
//! Keys are linked oldest → newest through slot indices, with a hash index
//! for O(1) membership and removal. Eviction drains from the oldest end.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use ahash::RandomState;

/// Link in the bucket's doubly-linked order
struct Link<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered set of keys sharing one frequency rung
pub struct FrequencyBucket<K> {
    index: HashMap<K, usize, RandomState>,
    links: Vec<Option<Link<K>>>,
    /// Oldest key
    head: Option<usize>,
    /// Most recently appended key
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl<K> FrequencyBucket<K>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty bucket
    pub fn new() -> Self {
        Self {
            index: HashMap::with_hasher(RandomState::new()),
            links: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    /// Append a key at the most recent end.
    ///
    /// Returns `false` and leaves the existing position alone if the key is
    /// already present.
    pub fn append(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let idx = self.alloc_link();
        self.links[idx] = Some(Link {
            key: key.clone(),
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.links[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }
        self.tail = Some(idx);

        self.index.insert(key, idx);
        true
    }

    /// Remove a key, handing back the owned key if it was present
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        self.release(idx)
    }

    /// Remove and return the oldest key
    pub fn pop_oldest(&mut self) -> Option<K> {
        let idx = self.head?;
        let key = self.release(idx)?;
        self.index.remove(&key);
        Some(key)
    }

    /// Remove up to `n` keys from the oldest end, yielding each as it goes.
    ///
    /// Keys not yet yielded stay in the bucket if the iterator is dropped.
    pub fn drain_oldest(&mut self, n: usize) -> DrainOldest<'_, K> {
        DrainOldest {
            bucket: self,
            remaining: n,
        }
    }

    /// Check membership
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Peek the oldest key
    pub fn oldest(&self) -> Option<&K> {
        self.head
            .and_then(|idx| self.links[idx].as_ref())
            .map(|link| &link.key)
    }

    /// Peek the most recently appended key
    pub fn newest(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.links[idx].as_ref())
            .map(|link| &link.key)
    }

    /// Iterate keys oldest first
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            links: &self.links,
            next: self.head,
            remaining: self.index.len(),
        }
    }

    /// Number of keys in the bucket
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the bucket is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn alloc_link(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.links.len();
            self.links.push(None);
            idx
        }
    }

    /// Unlink a slot and free it. The caller keeps the index in sync.
    fn release(&mut self, idx: usize) -> Option<K> {
        let link = self.links[idx].take()?;

        match link.prev {
            Some(prev_idx) => {
                if let Some(prev) = &mut self.links[prev_idx] {
                    prev.next = link.next;
                }
            }
            None => {
                self.head = link.next;
            }
        }

        match link.next {
            Some(next_idx) => {
                if let Some(next) = &mut self.links[next_idx] {
                    next.prev = link.prev;
                }
            }
            None => {
                self.tail = link.prev;
            }
        }

        if self.head.is_none() {
            // Last key left: drop the slot storage instead of growing the free list.
            self.links.clear();
            self.free_list.clear();
        } else {
            self.free_list.push(idx);
        }

        Some(link.key)
    }
}

impl<K> Default for FrequencyBucket<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a FrequencyBucket<K>
where
    K: Hash + Eq + Clone,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a bucket's keys, oldest first
pub struct Iter<'a, K> {
    links: &'a [Option<Link<K>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.links[self.next?].as_ref()?;
        self.next = link.next;
        self.remaining -= 1;
        Some(&link.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

/// Draining iterator returned by [`FrequencyBucket::drain_oldest`]
pub struct DrainOldest<'a, K>
where
    K: Hash + Eq + Clone,
{
    bucket: &'a mut FrequencyBucket<K>,
    remaining: usize,
}

impl<K> Iterator for DrainOldest<'_, K>
where
    K: Hash + Eq + Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.bucket.pop_oldest()?;
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.min(self.bucket.len());
        (n, Some(n))
    }
}
