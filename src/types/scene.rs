use super::base::{BoundingSphere, NiTransform, RecordLink, Vector3};
use std::fmt::Debug;
use std::ops::Deref;

// --- Structs using Pure Composition ---

#[derive(Debug, Clone, Default)]
pub struct NiObjectNET {
    pub name: String,
    pub extra_data_link: RecordLink,
    pub controller_link: RecordLink,
}

impl NiObjectNET {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiAVObject {
    pub net_base: NiObjectNET,
    pub flags: u16,
    pub transform: NiTransform,
    pub velocity: Vector3,
    /// Ordered property list; attachment order is render-state order.
    pub properties: Vec<RecordLink>,
    pub bounding_volume: Option<BoundingSphere>,
}

impl NiAVObject {
    pub fn flags(&self) -> u16 {
        self.flags
    }
    pub fn transform(&self) -> &NiTransform {
        &self.transform
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiNode {
    pub av_base: NiAVObject,
    pub children: Vec<RecordLink>,
}

impl NiNode {
    pub fn children(&self) -> &[RecordLink] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiTriShape {
    pub av_base: NiAVObject,
    pub data_link: RecordLink,
    pub skin_link: RecordLink,
}

/// Strip-order variant of NiTriShape; identical link layout, the
/// geometry data block differs.
#[derive(Debug, Clone, Default)]
pub struct NiTriStrips {
    pub av_base: NiAVObject,
    pub data_link: RecordLink,
    pub skin_link: RecordLink,
}

// --- Deref Implementations for Automatic Method/Field Forwarding ---

impl Deref for NiAVObject {
    type Target = NiObjectNET;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.net_base
    }
}

impl Deref for NiNode {
    type Target = NiAVObject;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.av_base
    }
}

impl Deref for NiTriShape {
    type Target = NiAVObject;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.av_base
    }
}

impl Deref for NiTriStrips {
    type Target = NiAVObject;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.av_base
    }
}
