use super::Arena;
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

/// The handle of a block allocated by a [`BlockAllocator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct BlockHandle(pub(crate) super::Index);

impl BlockHandle {
    /// The slot and generation numbers of this handle.
    pub fn into_raw_parts(self) -> (u32, u32) {
        self.0.into_raw_parts()
    }

    /// Rebuilds a handle from its slot and generation numbers.
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self(super::Index::from_raw_parts(index, generation))
    }
}

/// Allocation statistics of all the blocks sharing the same size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeClass {
    /// The size, in bytes, of the blocks of this class.
    pub block_size: usize,
    /// The number of blocks of this class currently allocated.
    pub outstanding: usize,
    /// The total number of allocations made in this class.
    pub allocations: u64,
    /// The total number of blocks of this class that were freed.
    pub frees: u64,
}

#[derive(Clone, Debug)]
struct Block<T> {
    size: usize,
    value: T,
}

/// A fixed-size-block allocator keyed by block size.
///
/// Every value stored here is accounted in the size class given at allocation. The exact same
/// size must be given back when the block is freed: a mismatch means that a value was freed
/// as the wrong variant, which is a programming error, so it panics. Freed slots are recycled
/// by subsequent allocations, under a new generation.
#[derive(Clone, Debug)]
pub struct BlockAllocator<T> {
    blocks: Arena<Block<T>>,
    classes: BTreeMap<usize, SizeClass>,
}

impl<T> Default for BlockAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockAllocator<T> {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self {
            blocks: Arena::new(),
            classes: BTreeMap::new(),
        }
    }

    /// Stores `value` into a block of `size` bytes.
    pub fn allocate(&mut self, size: usize, value: T) -> BlockHandle {
        assert!(size > 0, "cannot allocate a zero-sized block");
        let class = self.classes.entry(size).or_insert(SizeClass {
            block_size: size,
            ..SizeClass::default()
        });
        class.outstanding += 1;
        class.allocations += 1;

        BlockHandle(self.blocks.insert(Block { size, value }))
    }

    /// Frees the block `handle` and returns its content.
    ///
    /// Panics if `handle` isn't allocated or if `size` isn't the size the block was allocated
    /// with.
    pub fn free(&mut self, handle: BlockHandle, size: usize) -> T {
        let block_size = match self.blocks.get(handle.0) {
            Some(block) => block.size,
            None => panic!("attempt to free the unallocated block {:?}", handle),
        };
        assert_eq!(
            block_size, size,
            "the block {:?} was allocated with {} bytes but freed with {} bytes",
            handle, block_size, size
        );

        let Some(block) = self.blocks.remove(handle.0) else {
            unreachable!("the block was checked above")
        };
        match self.classes.get_mut(&size) {
            Some(class) => {
                class.outstanding -= 1;
                class.frees += 1;
            }
            None => unreachable!("allocated block without size class"),
        }
        block.value
    }

    /// Gets the value stored in the block `handle`, if it is allocated.
    pub fn get(&self, handle: BlockHandle) -> Option<&T> {
        self.blocks.get(handle.0).map(|b| &b.value)
    }

    /// Gets a mutable reference to the value stored in the block `handle`, if it is allocated.
    pub fn get_mut(&mut self, handle: BlockHandle) -> Option<&mut T> {
        self.blocks.get_mut(handle.0).map(|b| &mut b.value)
    }

    /// The size the block `handle` was allocated with.
    pub fn block_size(&self, handle: BlockHandle) -> Option<usize> {
        self.blocks.get(handle.0).map(|b| b.size)
    }

    /// Is the block `handle` currently allocated?
    pub fn contains(&self, handle: BlockHandle) -> bool {
        self.blocks.contains(handle.0)
    }

    /// The number of blocks currently allocated, all sizes combined.
    pub fn outstanding(&self) -> usize {
        self.blocks.len()
    }

    /// The number of values stored in this allocator.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Is this allocator empty?
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The number of blocks of `size` bytes currently allocated.
    pub fn outstanding_in_class(&self, size: usize) -> usize {
        self.classes.get(&size).map(|c| c.outstanding).unwrap_or(0)
    }

    /// The statistics of every size class this allocator has served, by increasing block size.
    pub fn size_classes(&self) -> impl Iterator<Item = &SizeClass> {
        self.classes.values()
    }

    /// Iterates through all the allocated blocks.
    pub fn iter(&self) -> impl Iterator<Item = (BlockHandle, &T)> {
        self.blocks.iter().map(|(i, b)| (BlockHandle(i), &b.value))
    }

    /// Iterates mutably through all the allocated blocks.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BlockHandle, &mut T)> {
        self.blocks
            .iter_mut()
            .map(|(i, b)| (BlockHandle(i), &mut b.value))
    }
}

impl<T> Index<BlockHandle> for BlockAllocator<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, handle: BlockHandle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("the block {:?} is not allocated", handle),
        }
    }
}

impl<T> IndexMut<BlockHandle> for BlockAllocator<T> {
    #[track_caller]
    fn index_mut(&mut self, handle: BlockHandle) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("the block {:?} is not allocated", handle),
        }
    }
}
