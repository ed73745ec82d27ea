use std::cmp::Ordering;

/// The opaque payload identifier stored alongside each key name.
pub type Payload = u32;

/// An index key: an orderable name and its payload. Keys are ordered and compared by name only,
/// the payload carries no ordering semantics.
#[derive(Clone, Debug)]
pub struct Key<T> {
    pub name: T,
    pub value: Payload,
}

impl<T> Key<T> {
    /// Creates a new key.
    pub fn new(name: T, value: Payload) -> Self {
        Self { name, value }
    }
}

impl<T: Ord> Key<T> {
    /// Returns true if this key sorts strictly before the other.
    pub fn lt(&self, other: &Key<T>) -> bool {
        self.name < other.name
    }
}

impl<T: PartialEq> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: Eq> Eq for Key<T> {}

impl<T: PartialOrd> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.name.partial_cmp(&other.name)
    }
}

impl<T: Ord> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<T> From<(T, Payload)> for Key<T> {
    fn from((name, value): (T, Payload)) -> Self {
        Self { name, value }
    }
}
