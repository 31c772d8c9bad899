use crate::binary::{ByteOrder, FromBinary, Reader, ToBinary, Writer};
use crate::Error;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::hash::Hash;

/// A collection that preserves insertion order and rejects duplicates
///
/// Set operations keep the order of the left operand.
///
/// ```
/// use robtop::OrderedSet;
///
/// let a: OrderedSet<i32> = vec![3, 1, 2, 1].into_iter().collect();
/// let b: OrderedSet<i32> = vec![2, 4, 3].into_iter().collect();
/// assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
/// assert_eq!(a.intersection(&b).into_vec(), vec![3, 2]);
/// assert_eq!(a.union(&b).into_vec(), vec![3, 1, 2, 4]);
/// assert_eq!(a.difference(&b).into_vec(), vec![1]);
/// assert_eq!(a.symmetric_difference(&b).into_vec(), vec![1, 4]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
#[cfg_attr(feature = "derive", serde(transparent))]
pub struct OrderedSet<T: Hash + Eq> {
    items: IndexSet<T>,
}

impl<T: Hash + Eq> Default for OrderedSet<T> {
    fn default() -> Self {
        OrderedSet {
            items: IndexSet::new(),
        }
    }
}

/// Equality also compares order, so equal sets encode to equal bytes
impl<T: Hash + Eq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

impl<T: Hash + Eq> Eq for OrderedSet<T> {}

impl<T: Hash + Eq> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the end, returning false when the value was already present
    pub fn insert(&mut self, value: T) -> bool {
        self.items.insert(value)
    }

    /// Remove the value while keeping the order of the rest
    pub fn remove(&mut self, value: &T) -> bool {
        self.items.shift_remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items.into_iter().collect()
    }
}

impl<T: Hash + Eq + Clone> OrderedSet<T> {
    fn filtered(&self, other: &HashSet<&T>, keep: bool) -> OrderedSet<T> {
        self.iter()
            .filter(|x| other.contains(x) == keep)
            .cloned()
            .collect()
    }

    pub fn union(&self, other: &OrderedSet<T>) -> OrderedSet<T> {
        self.iter().chain(other.iter()).cloned().collect()
    }

    pub fn intersection(&self, other: &OrderedSet<T>) -> OrderedSet<T> {
        let other: HashSet<&T> = other.iter().collect();
        self.filtered(&other, true)
    }

    pub fn difference(&self, other: &OrderedSet<T>) -> OrderedSet<T> {
        let other: HashSet<&T> = other.iter().collect();
        self.filtered(&other, false)
    }

    pub fn symmetric_difference(&self, other: &OrderedSet<T>) -> OrderedSet<T> {
        let left: HashSet<&T> = self.iter().collect();
        let right: HashSet<&T> = other.iter().collect();
        self.filtered(&right, false)
            .union(&other.filtered(&left, false))
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrderedSet {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter)
    }
}

impl<T: Hash + Eq> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Hash + Eq + FromBinary> FromBinary for OrderedSet<T> {
    fn from_binary(reader: &mut Reader<'_>, order: ByteOrder) -> Result<Self, Error> {
        let count = reader.read_count(order, 1)?;
        let mut result = OrderedSet::new();
        for _ in 0..count {
            result.insert(T::from_binary(reader, order)?);
        }
        Ok(result)
    }
}

impl<T: Hash + Eq + ToBinary> ToBinary for OrderedSet<T> {
    fn to_binary(&self, writer: &mut Writer, order: ByteOrder) {
        writer.write_count(self.len(), order);
        for item in self {
            item.to_binary(writer, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{from_bytes, to_bytes, BinaryOptions};
    use quickcheck_macros::quickcheck;

    #[test]
    fn duplicate_insert_is_noop() {
        let mut set = OrderedSet::new();
        assert!(set.insert(5));
        assert!(set.insert(1));
        assert!(!set.insert(5));
        assert_eq!(set.into_vec(), vec![5, 1]);
    }

    #[test]
    fn remove_keeps_order() {
        let mut set: OrderedSet<u32> = vec![1, 2, 3].into_iter().collect();
        set.remove(&2);
        assert_eq!(set.into_vec(), vec![1, 3]);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: OrderedSet<u32> = vec![1, 2].into_iter().collect();
        let b: OrderedSet<u32> = vec![2, 1].into_iter().collect();
        assert_ne!(a, b);
    }

    #[quickcheck]
    fn binary_round_trip(data: Vec<u32>) -> bool {
        let set: OrderedSet<u32> = data.into_iter().collect();
        let options = BinaryOptions::new();
        from_bytes::<OrderedSet<u32>>(&to_bytes(&set, &options).unwrap(), &options).unwrap() == set
    }

    #[quickcheck]
    fn set_algebra_laws(a: Vec<u8>, b: Vec<u8>) -> bool {
        let a: OrderedSet<u8> = a.into_iter().collect();
        let b: OrderedSet<u8> = b.into_iter().collect();
        let union = a.union(&b);
        let inter = a.intersection(&b);
        let sym = a.symmetric_difference(&b);
        union.len() == inter.len() + sym.len()
            && a.difference(&b).iter().all(|x| !b.contains(x))
            && inter.iter().all(|x| a.contains(x) && b.contains(x))
    }
}
