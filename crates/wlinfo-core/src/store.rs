// Author: Dustin Pilgrim
// License: MIT

//! Append-only record storage addressed by position.
//!
//! The store starts with room for exactly one record and doubles its
//! capacity whenever a `push` finds it full. Growth reallocates the backing
//! buffer, so a reference handed out by [`RecordStore::push`] or
//! [`RecordStore::get_mut`] is only valid until the next `push`. To find a
//! record again, keep its index (or [`Slot`]) and look it up.

use crate::error::StoreError;

/// Position of a record inside a [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(usize);

impl Slot {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct RecordStore<T> {
    buf: Vec<T>,
    capacity: usize,
    growths: usize,
}

impl<T> RecordStore<T> {
    /// Empty store with one pre-allocated slot.
    pub fn new() -> Result<Self, StoreError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(1)
            .map_err(|_| StoreError::Alloc { requested: 1 })?;

        Ok(Self {
            buf,
            capacity: 1,
            growths: 0,
        })
    }

    /// Append `value` and return a reference to its slot.
    ///
    /// Doubles the capacity first when the store is full. Any reference
    /// obtained before this call must be considered dangling afterwards.
    pub fn push(&mut self, value: T) -> Result<&mut T, StoreError> {
        if self.buf.len() >= self.capacity {
            self.grow()?;
        }

        self.buf.push(value);
        let last = self.buf.len() - 1;
        Ok(&mut self.buf[last])
    }

    fn grow(&mut self) -> Result<(), StoreError> {
        let requested = self.capacity * 2;
        self.buf
            .try_reserve_exact(requested - self.buf.len())
            .map_err(|_| StoreError::Alloc { requested })?;

        self.capacity = requested;
        self.growths += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    pub fn first(&self) -> Option<Slot> {
        self.slot(0)
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        (index < self.buf.len()).then_some(Slot(index))
    }

    /// The slot right after `slot`, or `None` at the end of the store.
    pub fn next(&self, slot: Slot) -> Option<Slot> {
        self.slot(slot.0 + 1)
    }

    pub fn at(&self, slot: Slot) -> Option<&T> {
        self.get(slot.0)
    }

    pub fn position<F>(&self, mut pred: F) -> Option<Slot>
    where
        F: FnMut(&T) -> bool,
    {
        self.buf.iter().position(|r| pred(r)).map(Slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Logical capacity: 1, 2, 4, 8, ...
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the backing buffer has been reallocated.
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// Hand every record to `teardown` in index order, then release the buffer.
    pub fn free<F>(self, mut teardown: F)
    where
        F: FnMut(T),
    {
        for record in self.buf {
            teardown(record);
        }
    }
}

impl<T: Default> RecordStore<T> {
    /// Append a default-initialised record.
    pub fn push_default(&mut self) -> Result<&mut T, StoreError> {
        self.push(T::default())
    }
}

impl<'a, T> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
