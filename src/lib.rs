/*!
rebound3d
========

**rebound3d** is the contact and joint bookkeeping core of a 3-dimensional rigid-body
physics engine written with the rust programming language.

It keeps track of which colliders touch each other from one simulation step to the next,
dispatches every pair of shapes to the right narrow-phase routine, and manages the lifetime of
contacts and joints through a block allocator keyed by object size. The geometric queries
themselves are delegated to [`parry3d`](https://parry.rs).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

pub extern crate parry3d as parry;
pub use parry::na;

pub mod dynamics;
pub mod utils;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use parry::math::{Isometry, Point, Real, Rotation, Translation, Vector, DEFAULT_EPSILON};

    /// The unit vector type.
    pub type UnitVector<N> = crate::na::Unit<Vector<N>>;
}

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::dynamics::*;
    pub use crate::math::*;
    pub use crate::utils::{BlockAllocator, BlockHandle};
}
