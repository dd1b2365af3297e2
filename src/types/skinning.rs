use super::base::{NiTransform, RecordLink, Vector3};
use std::fmt::Debug;

/// Links a mesh to its skinning data and skeleton root.
#[derive(Debug, Clone, Default)]
pub struct NiSkinInstance {
    // Note: Inherits NiObject, not NiObjectNET
    /// Link to the NiSkinData block (required).
    pub data: RecordLink,
    /// Link to the root NiNode of the skeleton (required). This is a
    /// back-reference into the node hierarchy, not a child.
    pub skeleton_root: RecordLink,
    /// Links to the NiNode bones, in skin-data order.
    pub bones: Vec<RecordLink>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoneVertData {
    /// Index into the mesh's vertex list.
    pub index: u16,
    /// Influence weight, 0.0 to 1.0.
    pub weight: f32,
}

#[derive(Debug, Clone, Default)]
pub struct BoneData {
    pub bone_transform: NiTransform,
    pub bounding_sphere_offset: Vector3,
    pub bounding_sphere_radius: f32,
    pub vertex_weights: Vec<BoneVertData>,
}

/// Per-vertex bone weights for a skinned mesh. Referenced by
/// NiSkinInstance; entries pair positionally with the instance's bone
/// links.
#[derive(Debug, Clone, Default)]
pub struct NiSkinData {
    /// Overall transformation applied to the skin before bone influences.
    pub skin_transform: NiTransform,
    pub bone_list: Vec<BoneData>,
}
