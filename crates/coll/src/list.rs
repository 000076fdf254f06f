use std::ops::{Deref, DerefMut};

/// A `Vec` with a chainable append, for building lists inline.
///
/// ```
/// use taskkit_coll::ListBuilder;
///
/// let names = ListBuilder::new().append("--file").append("--lines");
/// assert_eq!(names.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBuilder<T> {
    items: Vec<T>,
}

impl<T> ListBuilder<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `item` and return the builder.
    pub fn append(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    /// In-place form of [`append`](Self::append).
    pub fn push(&mut self, item: T) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for ListBuilder<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for ListBuilder<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for ListBuilder<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ListBuilder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ListBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for ListBuilder<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListBuilder<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
