//! Fluent, chainable operations over an in-memory ordered sequence.
//!
//! Adapters (`filter`, `map`, `flat_map`, `limit`, `range`) consume the
//! sequence and return it, so calls chain; accessors return `Option` so an
//! absent element is never conflated with a default-valued one.

/// An ordered in-memory sequence with chainable transforms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence<T> {
    data: Vec<T>,
}

impl<T> Sequence<T> {
    /// Wrap an existing vector.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keep only elements for which `predicate` returns true, in order.
    pub fn filter<P>(mut self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.data.retain(|item| predicate(item));
        self
    }

    /// Transform each element in place.
    pub fn map<F>(mut self, transform: F) -> Self
    where
        F: FnMut(T) -> T,
    {
        self.data = self.data.into_iter().map(transform).collect();
        self
    }

    /// Expand each element into zero or more elements, in order.
    pub fn flat_map<F>(mut self, expand: F) -> Self
    where
        F: FnMut(T) -> Vec<T>,
    {
        self.data = self.data.into_iter().flat_map(expand).collect();
        self
    }

    /// Keep at most the first `n` elements.
    pub fn limit(mut self, n: usize) -> Self {
        self.data.truncate(n);
        self
    }

    /// Keep the half-open slice `[start, end)`.
    ///
    /// Indices are clamped: `end` to the length, `start` to `end`. A
    /// start at or past the end yields an empty sequence.
    pub fn range(mut self, start: usize, end: usize) -> Self {
        let end = end.min(self.data.len());
        let start = start.min(end);
        let kept: Vec<T> = self.data.drain(start..end).collect();
        self.data = kept;
        self
    }

    /// Element at `index`, or `None` when out of range.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// First element, or `None` when empty.
    pub fn head(&self) -> Option<&T> {
        self.data.first()
    }

    /// Last element, or `None` when empty.
    pub fn tail(&self) -> Option<&T> {
        self.data.last()
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Remove and return the first element, or `None` when empty.
    pub fn shift(&mut self) -> Option<T> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.data.remove(0))
        }
    }

    /// First element satisfying `predicate`, or `None`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.data.iter().find(|item| predicate(item))
    }

    /// Whether all elements satisfy `predicate`.
    ///
    /// An empty sequence is not a guarantee: this returns false, unlike
    /// `Iterator::all`'s vacuous truth.
    pub fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        !self.data.is_empty() && self.data.iter().all(|item| predicate(item))
    }

    /// Index/value pairs, in order.
    pub fn entries(&self) -> Vec<(usize, &T)> {
        self.data.iter().enumerate().collect()
    }

    /// Left-fold every element into an accumulator starting from `initial`.
    pub fn reduce<F>(self, initial: T, combine: F) -> T
    where
        F: FnMut(T, T) -> T,
    {
        self.data.into_iter().fold(initial, combine)
    }

    /// Unwrap into the underlying vector.
    pub fn collect(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
