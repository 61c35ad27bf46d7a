//! Borrowing iterators over `ChainedTable`.
//!
//! `Iter` walks buckets in ascending order and each chain head to tail, so
//! within a bucket the most recently inserted key comes first. It borrows
//! the table, which rules out structural mutation while it is alive.

use crate::chain_table::{first_occupied, Entry};
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SecondaryMap, SlotMap};

pub struct Iter<'a, V> {
    buckets: &'a [Option<DefaultKey>],
    slots: &'a SlotMap<DefaultKey, Entry<V>>,
    bucket: usize,
    next: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(
        buckets: &'a [Option<DefaultKey>],
        slots: &'a SlotMap<DefaultKey, Entry<V>>,
    ) -> Self {
        let (bucket, next) = match first_occupied(buckets, 0) {
            Some((b, k)) => (b, Some(k)),
            None => (buckets.len(), None),
        };
        Self {
            buckets,
            slots,
            bucket,
            next,
            remaining: slots.len(),
        }
    }

    /// True while another entry remains.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            slots: self.slots,
            bucket: self.bucket,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.next?;
        let slots: &'a SlotMap<DefaultKey, Entry<V>> = self.slots;
        let e = &slots[k];
        self.next = match e.next {
            Some(n) => Some(n),
            None => match first_occupied(self.buckets, self.bucket + 1) {
                Some((b, head)) => {
                    self.bucket = b;
                    Some(head)
                }
                None => {
                    self.bucket = self.buckets.len();
                    None
                }
            },
        };
        self.remaining -= 1;
        Some((&*e.key, &e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Mutable iteration over values; keys stay immutable. Same order as `Iter`.
pub struct IterMut<'a, V> {
    inner: std::vec::IntoIter<(&'a str, &'a mut V)>,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(
        buckets: &[Option<DefaultKey>],
        slots: &'a mut SlotMap<DefaultKey, Entry<V>>,
    ) -> Self {
        let order: Vec<DefaultKey> = {
            let slots: &SlotMap<DefaultKey, Entry<V>> = slots;
            let mut order = Vec::with_capacity(slots.len());
            let mut from = 0;
            while let Some((b, head)) = first_occupied(buckets, from) {
                let mut cur = Some(head);
                while let Some(k) = cur {
                    order.push(k);
                    cur = slots[k].next;
                }
                from = b + 1;
            }
            order
        };

        let mut by_handle: SecondaryMap<DefaultKey, &'a mut Entry<V>> =
            slots.iter_mut().collect();
        let pairs: Vec<(&'a str, &'a mut V)> = order
            .into_iter()
            .filter_map(|k| by_handle.remove(k))
            .map(|e| (&*e.key, &mut e.value))
            .collect();
        Self {
            inner: pairs.into_iter(),
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
