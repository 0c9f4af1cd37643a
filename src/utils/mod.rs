//! Various unsorted utilities.

pub use self::arena::{Arena, Index};
pub use self::block_allocator::{BlockAllocator, BlockHandle, SizeClass};

mod arena;
mod block_allocator;
