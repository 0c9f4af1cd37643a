use super::{Joint, JointDef, JointHandle};
use crate::utils::BlockAllocator;

/// The set of all the joints of a world.
///
/// The joints are stored in a block allocator: each joint occupies a block sized after its
/// type.
#[derive(Clone, Debug, Default)]
pub struct JointSet {
    joints: BlockAllocator<Joint>,
}

impl JointSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a joint. The bodies aren't checked nor linked to the joint.
    pub fn insert(&mut self, def: &JointDef) -> JointHandle {
        Joint::create(def, &mut self.joints)
    }

    /// Destroys a joint.
    pub fn remove(&mut self, handle: JointHandle) -> Option<Joint> {
        if self.joints.contains(handle.0) {
            Some(Joint::destroy(handle, &mut self.joints))
        } else {
            None
        }
    }

    /// The joint identified by `handle`.
    pub fn get(&self, handle: JointHandle) -> Option<&Joint> {
        self.joints.get(handle.0)
    }

    /// The joint identified by `handle`.
    pub fn get_mut(&mut self, handle: JointHandle) -> Option<&mut Joint> {
        self.joints.get_mut(handle.0)
    }

    /// Iterates through all the joints.
    pub fn iter(&self) -> impl Iterator<Item = (JointHandle, &Joint)> {
        self.joints.iter().map(|(h, j)| (JointHandle(h), j))
    }

    /// The number of joints.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// The allocator the joints are stored in.
    pub fn allocator(&self) -> &BlockAllocator<Joint> {
        &self.joints
    }

    /// The number of blocks currently allocated for joints.
    pub fn outstanding_blocks(&self) -> usize {
        self.joints.outstanding()
    }
}
