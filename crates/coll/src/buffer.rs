use std::any::Any;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::BufferError;

/// Fixed-capacity rotating buffer that keeps the most recent items.
///
/// Backed by a `Vec<Option<T>>` whose length is the capacity, plus a cursor
/// (`head`) pointing at the oldest slot, which is also the slot the next
/// [`add`](Self::add) overwrites. Slots that were never written stay `None`.
///
/// The buffer always reports its capacity as its size: an export taken before
/// the buffer fills up has the same shape as one taken after, with the
/// unwritten slots surfacing as leading `None`s.
///
/// Not synchronized. Wrap it in a lock to share it between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingBuffer<T> {
    storage: Vec<Option<T>>,
    head: usize,
}

impl<T> RotatingBuffer<T> {
    /// Create a buffer with `capacity` empty slots.
    ///
    /// Fails with [`BufferError::CapacityTooLarge`] if the slots cannot be
    /// allocated.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| BufferError::CapacityTooLarge { capacity })?;
        storage.resize_with(capacity, || None);
        Ok(Self { storage, head: 0 })
    }

    /// Use `storage` as the backing store. Its length becomes the capacity
    /// and its current contents are kept, with index 0 as the oldest slot.
    pub fn from_storage(storage: Vec<Option<T>>) -> Result<Self, BufferError> {
        if storage.is_empty() {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self { storage, head: 0 })
    }

    /// Store `item`, overwriting (and dropping) the oldest slot.
    pub fn add(&mut self, item: T) {
        self.storage[self.head] = Some(item);
        self.head = (self.head + 1) % self.storage.len();
    }

    /// Logical size. Always equal to [`capacity`](Self::capacity), however
    /// many items have been added.
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Iterate over every slot from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        let (newer, older) = self.storage.split_at(self.head);
        older.iter().chain(newer.iter()).map(Option::as_ref)
    }

    /// The most recently written slot, `None` if nothing was added yet.
    pub fn latest(&self) -> Option<&T> {
        let cap = self.storage.len();
        self.storage[(self.head + cap - 1) % cap].as_ref()
    }
}

impl<T: Clone> RotatingBuffer<T> {
    /// Copy the contents, oldest → newest, into `destination` or a new vector.
    ///
    /// With `n` the capacity:
    /// - `None`, or a destination shorter than `n`: a new vector of exactly
    ///   `n` slots is returned and the destination is dropped.
    /// - a destination of `n` slots or more is written in place and handed
    ///   back (the same allocation, so a caller can keep reusing one snapshot
    ///   vector). If it is longer than `n`, slot `n` is set to `None` to mark
    ///   the end; slots after that are left alone.
    pub fn export(&self, destination: Option<Vec<Option<T>>>) -> Vec<Option<T>> {
        let n = self.storage.len();
        match destination {
            Some(mut dest) if dest.len() >= n => {
                self.copy_ordered(&mut dest[..n]);
                if dest.len() > n {
                    dest[n] = None;
                }
                dest
            }
            _ => {
                let mut out = Vec::with_capacity(n);
                out.extend_from_slice(&self.storage[self.head..]);
                out.extend_from_slice(&self.storage[..self.head]);
                out
            }
        }
    }

    /// Borrowing form of [`export`](Self::export) for a caller-owned slice.
    ///
    /// The slice must hold at least `capacity` slots; the end marker rule is
    /// the same as for `export`.
    pub fn export_into(&self, destination: &mut [Option<T>]) -> Result<(), BufferError> {
        let n = self.storage.len();
        if destination.len() < n {
            return Err(BufferError::DestinationTooShort {
                required: n,
                actual: destination.len(),
            });
        }
        self.copy_ordered(&mut destination[..n]);
        if let Some(marker) = destination.get_mut(n) {
            *marker = None;
        }
        Ok(())
    }

    /// [`export`](Self::export) for a type-erased destination.
    ///
    /// Fails with [`BufferError::IncompatibleDestination`] unless the
    /// destination is a `Vec<Option<T>>`.
    pub fn export_any(&self, destination: Box<dyn Any>) -> Result<Vec<Option<T>>, BufferError>
    where
        T: 'static,
    {
        match destination.downcast::<Vec<Option<T>>>() {
            Ok(dest) => Ok(self.export(Some(*dest))),
            Err(_) => Err(BufferError::IncompatibleDestination {
                expected: std::any::type_name::<T>(),
            }),
        }
    }

    /// `dest.len()` must equal the capacity.
    fn copy_ordered(&self, dest: &mut [Option<T>]) {
        let split = self.storage.len() - self.head;
        dest[..split].clone_from_slice(&self.storage[self.head..]);
        dest[split..].clone_from_slice(&self.storage[..self.head]);
    }
}

impl<T> Extend<T> for RotatingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

/// Serializes as a sequence of `capacity` nullable elements, oldest first.
impl<T: Serialize> Serialize for RotatingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.storage.len()))?;
        for slot in self.iter() {
            seq.serialize_element(&slot)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[Option<&str>]) -> Vec<Option<String>> {
        items.iter().map(|s| s.map(String::from)).collect()
    }

    fn add_all(rb: &mut RotatingBuffer<String>, items: &[&str]) {
        for s in items {
            rb.add((*s).to_owned());
        }
    }

    #[test]
    fn partial_fill_then_reuse_snapshot() {
        let mut rb = RotatingBuffer::new(4).unwrap();
        add_all(&mut rb, &["str1", "str2", "str3"]);

        let snap = rb.export(Some(Vec::new()));
        assert_eq!(snap.len(), 4);
        assert_eq!(snap, strs(&[None, Some("str1"), Some("str2"), Some("str3")]));

        rb.add("str4".into());
        let ptr = snap.as_ptr();
        let snap = rb.export(Some(snap));
        assert_eq!(snap.as_ptr(), ptr);
        assert_eq!(
            snap,
            strs(&[Some("str1"), Some("str2"), Some("str3"), Some("str4")])
        );

        add_all(&mut rb, &["str5", "str6"]);
        let snap = rb.export(Some(snap));
        assert_eq!(snap.as_ptr(), ptr);
        assert_eq!(
            snap,
            strs(&[Some("str3"), Some("str4"), Some("str5"), Some("str6")])
        );
    }

    #[test]
    fn longer_destination_gets_end_marker() {
        let mut rb = RotatingBuffer::new(2).unwrap();
        add_all(
            &mut rb,
            &["str1", "str2", "str3", "str4", "str5", "str6", "str7", "str8"],
        );

        let dest = strs(&[Some("x"), Some("y"), Some("z")]);
        let ptr = dest.as_ptr();
        let out = rb.export(Some(dest));

        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out, strs(&[Some("str7"), Some("str8"), None]));
    }

    #[test]
    fn slots_past_end_marker_untouched() {
        let mut rb = RotatingBuffer::new(2).unwrap();
        rb.add(1);
        rb.add(2);

        let out = rb.export(Some(vec![Some(9); 5]));
        assert_eq!(out, vec![Some(1), Some(2), None, Some(9), Some(9)]);
    }

    #[test]
    fn no_destination_allocates() {
        let mut rb = RotatingBuffer::new(3).unwrap();
        rb.add('a');

        assert_eq!(rb.export(None), vec![None, None, Some('a')]);
    }

    #[test]
    fn short_destination_not_reused() {
        let mut rb = RotatingBuffer::new(3).unwrap();
        rb.extend([1, 2, 3, 4]);

        let short = vec![Some(0); 2];
        let out = rb.export(Some(short));
        assert_eq!(out.len(), 3);
        assert_eq!(out, vec![Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn export_does_not_mutate() {
        let mut rb = RotatingBuffer::new(3).unwrap();
        rb.extend([1, 2]);
        let before = rb.clone();

        let _ = rb.export(None);
        let _ = rb.export(Some(vec![None; 10]));

        assert_eq!(rb, before);
    }

    #[test]
    fn size_is_always_capacity() {
        let mut rb = RotatingBuffer::new(5).unwrap();
        assert_eq!(rb.size(), 5);

        for i in 0..12 {
            rb.add(i);
            assert_eq!(rb.size(), 5);
            assert_eq!(rb.capacity(), 5);
        }
    }

    #[test]
    fn eviction_keeps_last_capacity_items() {
        for k in 3..20 {
            let mut rb = RotatingBuffer::new(3).unwrap();
            rb.extend(0..k);
            let expected: Vec<Option<i32>> = (k - 3..k).map(Some).collect();
            assert_eq!(rb.export(None), expected, "after {k} adds");
        }
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            RotatingBuffer::<i32>::new(0).unwrap_err(),
            BufferError::ZeroCapacity
        );
        assert_eq!(
            RotatingBuffer::<i32>::from_storage(Vec::new()).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn unallocatable_capacity_rejected() {
        assert_eq!(
            RotatingBuffer::<String>::new(usize::MAX).unwrap_err(),
            BufferError::CapacityTooLarge {
                capacity: usize::MAX
            }
        );
        assert!(RotatingBuffer::<u64>::new(usize::MAX / 4).is_err());
    }

    #[test]
    fn from_storage_keeps_contents() {
        let mut rb = RotatingBuffer::from_storage(vec![Some(1), None, Some(3)]).unwrap();
        assert_eq!(rb.capacity(), 3);
        assert_eq!(rb.export(None), vec![Some(1), None, Some(3)]);

        rb.add(4); // overwrites index 0
        assert_eq!(rb.export(None), vec![None, Some(3), Some(4)]);
    }

    #[test]
    fn iter_and_latest() {
        let mut rb = RotatingBuffer::new(3).unwrap();
        assert_eq!(rb.latest(), None);
        assert_eq!(rb.iter().count(), 3);

        rb.extend([10, 20, 30, 40]);
        let items: Vec<Option<&i32>> = rb.iter().collect();
        assert_eq!(items, vec![Some(&20), Some(&30), Some(&40)]);
        assert_eq!(rb.latest(), Some(&40));
    }

    #[test]
    fn export_into_slice() {
        let mut rb = RotatingBuffer::new(2).unwrap();
        rb.extend([1, 2, 3]);

        let mut exact = [None; 2];
        rb.export_into(&mut exact).unwrap();
        assert_eq!(exact, [Some(2), Some(3)]);

        let mut long = [Some(0); 4];
        rb.export_into(&mut long).unwrap();
        assert_eq!(long, [Some(2), Some(3), None, Some(0)]);
    }

    #[test]
    fn export_into_short_slice_fails() {
        let rb = RotatingBuffer::<u8>::new(4).unwrap();
        let mut short = [Some(7); 3];

        let err = rb.export_into(&mut short).unwrap_err();
        assert_eq!(
            err,
            BufferError::DestinationTooShort {
                required: 4,
                actual: 3
            }
        );
        assert_eq!(short, [Some(7); 3]);
    }

    #[test]
    fn export_any_accepts_matching_vec() {
        let mut rb = RotatingBuffer::new(2).unwrap();
        rb.add("a".to_owned());

        let dest: Box<dyn Any> = Box::new(vec![None::<String>; 2]);
        let out = rb.export_any(dest).unwrap();
        assert_eq!(out, strs(&[None, Some("a")]));
    }

    #[test]
    fn export_any_rejects_wrong_element_type() {
        let mut rb = RotatingBuffer::new(2).unwrap();
        rb.add("a".to_owned());
        let before = rb.clone();

        let dest: Box<dyn Any> = Box::new(vec![Some(1_u32); 2]);
        let err = rb.export_any(dest).unwrap_err();
        assert!(matches!(err, BufferError::IncompatibleDestination { .. }));
        assert_eq!(rb, before);
    }

    #[test]
    fn serializes_oldest_first_with_nulls() {
        let mut rb = RotatingBuffer::new(3).unwrap();
        rb.extend(["a", "b"]);

        let json = serde_json::to_string(&rb).unwrap();
        assert_eq!(json, r#"[null,"a","b"]"#);
    }
}
