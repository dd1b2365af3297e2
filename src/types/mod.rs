//! This module defines the core data structures representing NIF file blocks.

// Declare the sub-modules
pub mod animation;
pub mod base;
pub mod block;
pub mod geometry;
pub mod properties;
pub mod scene;
pub mod skinning;
pub mod textures;

pub use animation::NiKeyframeController;
pub use base::{BoundingSphere, Matrix3x3, NiTransform, RecordLink, Vector2, Vector3, Vector4};
pub use block::{Block, BlockKind, FieldValue};
pub use geometry::{NiGeometryData, NiTriBasedGeomData, NiTriShapeData};
pub use properties::{
    AlphaFlags, LightMode, NiAlphaProperty, NiMaterialProperty, NiProperty, NiSpecularProperty,
    NiStencilProperty, NiVertexColorProperty, NiWireframeProperty, NiZBufferProperty, StencilFlags,
    VertexMode,
};
pub use scene::{NiAVObject, NiNode, NiObjectNET, NiTriShape, NiTriStrips};
pub use skinning::{BoneData, BoneVertData, NiSkinData, NiSkinInstance};
pub use textures::{
    AlphaFormat, ApplyMode, ClampMode, FilterMode, MipMapFormat, NiPixelData, NiSourceTexture,
    NiTexturingProperty, PixelFormat, PixelLayout, TextureSlot,
};
