use slab::Slab;

/// An index into an [`Arena`], invalidated when the element it refers to is removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Index {
    index: u32,
    generation: u32,
}

impl Index {
    /// Rebuilds an index from its slot and generation numbers.
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot and generation numbers of this index.
    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

/// A [`Slab`] whose indices carry a generation number.
///
/// Removing an element bumps the generation of its slot, so an index obtained before the removal
/// never resolves to an element inserted afterwards in the same slot.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    entries: Slab<T>,
    generations: Vec<u32>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// An empty arena.
    pub fn new() -> Self {
        Self {
            entries: Slab::new(),
            generations: Vec::new(),
        }
    }

    /// Inserts an element and returns its index.
    pub fn insert(&mut self, value: T) -> Index {
        let slot = self.entries.insert(value);
        if slot >= self.generations.len() {
            self.generations.resize(slot + 1, 0);
        }

        Index {
            index: slot as u32,
            generation: self.generations[slot],
        }
    }

    /// Removes the element at `index`, if it is still alive.
    pub fn remove(&mut self, index: Index) -> Option<T> {
        if !self.contains(index) {
            return None;
        }

        let slot = index.slot();
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        Some(self.entries.remove(slot))
    }

    /// Is `index` referring to a live element?
    #[inline]
    pub fn contains(&self, index: Index) -> bool {
        self.entries.contains(index.slot())
            && self.generations.get(index.slot()) == Some(&index.generation)
    }

    /// The element at `index`, if it is still alive.
    pub fn get(&self, index: Index) -> Option<&T> {
        if self.contains(index) {
            self.entries.get(index.slot())
        } else {
            None
        }
    }

    /// The element at `index`, if it is still alive.
    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        if self.contains(index) {
            self.entries.get_mut(index.slot())
        } else {
            None
        }
    }

    /// The number of live elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is this arena empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates through the live elements and their indices.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        let generations = &self.generations;
        self.entries.iter().map(move |(slot, value)| {
            let index = Index::from_raw_parts(slot as u32, generations[slot]);
            (index, value)
        })
    }

    /// Iterates mutably through the live elements and their indices.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Index, &mut T)> {
        let generations = &self.generations;
        self.entries.iter_mut().map(move |(slot, value)| {
            let index = Index::from_raw_parts(slot as u32, generations[slot]);
            (index, value)
        })
    }
}

impl<T> std::ops::Index<Index> for Arena<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: Index) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("the index {:?} does not refer to a live element", index),
        }
    }
}

impl<T> std::ops::IndexMut<Index> for Arena<T> {
    #[track_caller]
    fn index_mut(&mut self, index: Index) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("the index {:?} does not refer to a live element", index),
        }
    }
}
