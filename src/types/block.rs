use log::debug;

use super::animation::NiKeyframeController;
use super::base::RecordLink;
use super::geometry::NiTriShapeData;
use super::properties::{
    NiAlphaProperty, NiMaterialProperty, NiSpecularProperty, NiStencilProperty,
    NiVertexColorProperty, NiWireframeProperty, NiZBufferProperty,
};
use super::scene::{NiAVObject, NiNode, NiObjectNET, NiTriShape, NiTriStrips};
use super::skinning::{NiSkinData, NiSkinInstance};
use super::textures::{NiPixelData, NiSourceTexture, NiTexturingProperty};
use crate::error::NifError;

/// Closed set of block type tags. Replaces string-typed dispatch: a tag
/// is resolved once, and everything downstream matches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Node,
    TriShape,
    TriStrips,
    TriShapeData,
    MaterialProperty,
    AlphaProperty,
    SpecularProperty,
    StencilProperty,
    VertexColorProperty,
    ZBufferProperty,
    WireframeProperty,
    TexturingProperty,
    SourceTexture,
    PixelData,
    SkinInstance,
    SkinData,
    KeyframeController,
}

impl BlockKind {
    /// The canonical NIF type name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Node => "NiNode",
            BlockKind::TriShape => "NiTriShape",
            BlockKind::TriStrips => "NiTriStrips",
            BlockKind::TriShapeData => "NiTriShapeData",
            BlockKind::MaterialProperty => "NiMaterialProperty",
            BlockKind::AlphaProperty => "NiAlphaProperty",
            BlockKind::SpecularProperty => "NiSpecularProperty",
            BlockKind::StencilProperty => "NiStencilProperty",
            BlockKind::VertexColorProperty => "NiVertexColorProperty",
            BlockKind::ZBufferProperty => "NiZBufferProperty",
            BlockKind::WireframeProperty => "NiWireframeProperty",
            BlockKind::TexturingProperty => "NiTexturingProperty",
            BlockKind::SourceTexture => "NiSourceTexture",
            BlockKind::PixelData => "NiPixelData",
            BlockKind::SkinInstance => "NiSkinInstance",
            BlockKind::SkinData => "NiSkinData",
            BlockKind::KeyframeController => "NiKeyframeController",
        }
    }

    /// Resolve a NIF type tag. An unrecognized tag is the fatal
    /// "unsupported block type" condition.
    pub fn parse(tag: &str) -> Result<BlockKind, NifError> {
        Ok(match tag {
            "NiNode" => BlockKind::Node,
            "NiTriShape" => BlockKind::TriShape,
            "NiTriStrips" => BlockKind::TriStrips,
            "NiTriShapeData" => BlockKind::TriShapeData,
            "NiMaterialProperty" => BlockKind::MaterialProperty,
            "NiAlphaProperty" => BlockKind::AlphaProperty,
            "NiSpecularProperty" => BlockKind::SpecularProperty,
            "NiStencilProperty" => BlockKind::StencilProperty,
            "NiVertexColorProperty" => BlockKind::VertexColorProperty,
            "NiZBufferProperty" => BlockKind::ZBufferProperty,
            "NiWireframeProperty" => BlockKind::WireframeProperty,
            "NiTexturingProperty" => BlockKind::TexturingProperty,
            "NiSourceTexture" => BlockKind::SourceTexture,
            "NiPixelData" => BlockKind::PixelData,
            "NiSkinInstance" => BlockKind::SkinInstance,
            "NiSkinData" => BlockKind::SkinData,
            "NiKeyframeController" => BlockKind::KeyframeController,
            unknown => return Err(NifError::UnsupportedBlockType(unknown.to_string())),
        })
    }
}

/// One typed record of a NIF file's in-memory graph.
#[derive(Debug, Clone)]
pub enum Block {
    Node(NiNode),
    TriShape(NiTriShape),
    TriStrips(NiTriStrips),
    TriShapeData(NiTriShapeData),
    MaterialProperty(NiMaterialProperty),
    AlphaProperty(NiAlphaProperty),
    SpecularProperty(NiSpecularProperty),
    StencilProperty(NiStencilProperty),
    VertexColorProperty(NiVertexColorProperty),
    ZBufferProperty(NiZBufferProperty),
    WireframeProperty(NiWireframeProperty),
    TexturingProperty(NiTexturingProperty),
    SourceTexture(NiSourceTexture),
    PixelData(NiPixelData),
    SkinInstance(NiSkinInstance),
    SkinData(NiSkinData),
    KeyframeController(NiKeyframeController),
}

/// Scalar/link value exchanged through named field access. This is the
/// currency of property dedup criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    F32(f32),
    Color([f32; 3]),
    Text(String),
    Link(RecordLink),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}
impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::U8(v)
    }
}
impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::U16(v)
    }
}
impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::U32(v)
    }
}
impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::F32(v)
    }
}
impl From<[f32; 3]> for FieldValue {
    fn from(v: [f32; 3]) -> Self {
        FieldValue::Color(v)
    }
}
impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}
impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}
impl From<RecordLink> for FieldValue {
    fn from(v: RecordLink) -> Self {
        FieldValue::Link(v)
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Node(_) => BlockKind::Node,
            Block::TriShape(_) => BlockKind::TriShape,
            Block::TriStrips(_) => BlockKind::TriStrips,
            Block::TriShapeData(_) => BlockKind::TriShapeData,
            Block::MaterialProperty(_) => BlockKind::MaterialProperty,
            Block::AlphaProperty(_) => BlockKind::AlphaProperty,
            Block::SpecularProperty(_) => BlockKind::SpecularProperty,
            Block::StencilProperty(_) => BlockKind::StencilProperty,
            Block::VertexColorProperty(_) => BlockKind::VertexColorProperty,
            Block::ZBufferProperty(_) => BlockKind::ZBufferProperty,
            Block::WireframeProperty(_) => BlockKind::WireframeProperty,
            Block::TexturingProperty(_) => BlockKind::TexturingProperty,
            Block::SourceTexture(_) => BlockKind::SourceTexture,
            Block::PixelData(_) => BlockKind::PixelData,
            Block::SkinInstance(_) => BlockKind::SkinInstance,
            Block::SkinData(_) => BlockKind::SkinData,
            Block::KeyframeController(_) => BlockKind::KeyframeController,
        }
    }

    /// A default-initialized block of the given kind.
    pub fn new(kind: BlockKind) -> Block {
        match kind {
            BlockKind::Node => Block::Node(NiNode::default()),
            BlockKind::TriShape => Block::TriShape(NiTriShape::default()),
            BlockKind::TriStrips => Block::TriStrips(NiTriStrips::default()),
            BlockKind::TriShapeData => Block::TriShapeData(NiTriShapeData::default()),
            BlockKind::MaterialProperty => Block::MaterialProperty(NiMaterialProperty::default()),
            BlockKind::AlphaProperty => Block::AlphaProperty(NiAlphaProperty::default()),
            BlockKind::SpecularProperty => Block::SpecularProperty(NiSpecularProperty::default()),
            BlockKind::StencilProperty => Block::StencilProperty(NiStencilProperty::default()),
            BlockKind::VertexColorProperty => {
                Block::VertexColorProperty(NiVertexColorProperty::default())
            }
            BlockKind::ZBufferProperty => Block::ZBufferProperty(NiZBufferProperty::default()),
            BlockKind::WireframeProperty => {
                Block::WireframeProperty(NiWireframeProperty::default())
            }
            BlockKind::TexturingProperty => {
                Block::TexturingProperty(NiTexturingProperty::default())
            }
            BlockKind::SourceTexture => Block::SourceTexture(NiSourceTexture::default()),
            BlockKind::PixelData => Block::PixelData(NiPixelData::default()),
            BlockKind::SkinInstance => Block::SkinInstance(NiSkinInstance::default()),
            BlockKind::SkinData => Block::SkinData(NiSkinData::default()),
            BlockKind::KeyframeController => {
                Block::KeyframeController(NiKeyframeController::default())
            }
        }
    }

    /// The NiObjectNET base, for kinds that derive from it.
    pub fn object_net(&self) -> Option<&NiObjectNET> {
        match self {
            Block::Node(b) => Some(&b.av_base.net_base),
            Block::TriShape(b) => Some(&b.av_base.net_base),
            Block::TriStrips(b) => Some(&b.av_base.net_base),
            Block::MaterialProperty(b) => Some(&b.property_base.net_base),
            Block::AlphaProperty(b) => Some(&b.property_base.net_base),
            Block::SpecularProperty(b) => Some(&b.property_base.net_base),
            Block::StencilProperty(b) => Some(&b.property_base.net_base),
            Block::VertexColorProperty(b) => Some(&b.property_base.net_base),
            Block::ZBufferProperty(b) => Some(&b.property_base.net_base),
            Block::WireframeProperty(b) => Some(&b.property_base.net_base),
            Block::TexturingProperty(b) => Some(&b.property_base.net_base),
            Block::SourceTexture(b) => Some(&b.net_base),
            _ => None,
        }
    }

    fn object_net_mut(&mut self) -> Option<&mut NiObjectNET> {
        match self {
            Block::Node(b) => Some(&mut b.av_base.net_base),
            Block::TriShape(b) => Some(&mut b.av_base.net_base),
            Block::TriStrips(b) => Some(&mut b.av_base.net_base),
            Block::MaterialProperty(b) => Some(&mut b.property_base.net_base),
            Block::AlphaProperty(b) => Some(&mut b.property_base.net_base),
            Block::SpecularProperty(b) => Some(&mut b.property_base.net_base),
            Block::StencilProperty(b) => Some(&mut b.property_base.net_base),
            Block::VertexColorProperty(b) => Some(&mut b.property_base.net_base),
            Block::ZBufferProperty(b) => Some(&mut b.property_base.net_base),
            Block::WireframeProperty(b) => Some(&mut b.property_base.net_base),
            Block::TexturingProperty(b) => Some(&mut b.property_base.net_base),
            Block::SourceTexture(b) => Some(&mut b.net_base),
            _ => None,
        }
    }

    /// The NiAVObject base, for scene-graph kinds. Carries the property
    /// list and transform.
    pub fn av_object(&self) -> Option<&NiAVObject> {
        match self {
            Block::Node(b) => Some(&b.av_base),
            Block::TriShape(b) => Some(&b.av_base),
            Block::TriStrips(b) => Some(&b.av_base),
            _ => None,
        }
    }

    /// Object name, for NET-derived kinds. Names are not unique.
    pub fn name(&self) -> Option<&str> {
        self.object_net().map(|net| net.name.as_str())
    }

    pub fn set_name(&mut self, name: &str) {
        if let Some(net) = self.object_net_mut() {
            net.name = name.to_string();
        }
    }

    /// Named field access, the read half of dedup criteria matching.
    /// Fields the kind does not expose return None.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        if name == "name" {
            return self.name().map(FieldValue::from);
        }
        match self {
            Block::MaterialProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "ambient_color" => Some(p.ambient_color.into()),
                "diffuse_color" => Some(p.diffuse_color.into()),
                "specular_color" => Some(p.specular_color.into()),
                "emissive_color" => Some(p.emissive_color.into()),
                "glossiness" => Some(p.glossiness.into()),
                "alpha" => Some(p.alpha.into()),
                _ => None,
            },
            Block::AlphaProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "threshold" => Some(p.threshold.into()),
                _ => None,
            },
            Block::SpecularProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                _ => None,
            },
            Block::StencilProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "stencil_ref" => Some(p.stencil_ref.into()),
                "stencil_mask" => Some(p.stencil_mask.into()),
                _ => None,
            },
            Block::VertexColorProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "vertex_mode" => Some(u32::from(p.vertex_mode).into()),
                "lighting_mode" => Some(u32::from(p.lighting_mode).into()),
                _ => None,
            },
            Block::ZBufferProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "function" => Some(p.function.into()),
                _ => None,
            },
            Block::WireframeProperty(p) => match name {
                "flags" => Some(p.wire_flags.into()),
                _ => None,
            },
            Block::TexturingProperty(p) => match name {
                "flags" => Some(p.flags.into()),
                "apply_mode" => Some(u32::from(p.apply_mode).into()),
                slot => p.slot_source(slot).map(FieldValue::Link),
            },
            Block::SourceTexture(t) => match name {
                "use_external" => Some(t.use_external.into()),
                "file_name" => t.file_name.clone().map(FieldValue::from),
                "pixel_data" => Some(t.pixel_data_link.into()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Named field assignment, the write half of dedup block creation.
    /// Unrecognized names or mismatched value types are skipped, so
    /// criteria written against newer format revisions degrade instead
    /// of failing.
    pub fn set_field(&mut self, name: &str, value: &FieldValue) {
        if name == "name" {
            if let FieldValue::Text(text) = value {
                self.set_name(text);
            }
            return;
        }
        let applied = match (&mut *self, name, value) {
            (Block::MaterialProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::MaterialProperty(p), "ambient_color", FieldValue::Color(v)) => {
                p.ambient_color = *v;
                true
            }
            (Block::MaterialProperty(p), "diffuse_color", FieldValue::Color(v)) => {
                p.diffuse_color = *v;
                true
            }
            (Block::MaterialProperty(p), "specular_color", FieldValue::Color(v)) => {
                p.specular_color = *v;
                true
            }
            (Block::MaterialProperty(p), "emissive_color", FieldValue::Color(v)) => {
                p.emissive_color = *v;
                true
            }
            (Block::MaterialProperty(p), "glossiness", FieldValue::F32(v)) => {
                p.glossiness = *v;
                true
            }
            (Block::MaterialProperty(p), "alpha", FieldValue::F32(v)) => {
                p.alpha = *v;
                true
            }
            (Block::AlphaProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::AlphaProperty(p), "threshold", FieldValue::U8(v)) => {
                p.threshold = *v;
                true
            }
            (Block::SpecularProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::StencilProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::StencilProperty(p), "stencil_ref", FieldValue::U32(v)) => {
                p.stencil_ref = *v;
                true
            }
            (Block::StencilProperty(p), "stencil_mask", FieldValue::U32(v)) => {
                p.stencil_mask = *v;
                true
            }
            (Block::VertexColorProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::VertexColorProperty(p), "vertex_mode", FieldValue::U32(v)) => {
                p.vertex_mode = (*v).into();
                true
            }
            (Block::VertexColorProperty(p), "lighting_mode", FieldValue::U32(v)) => {
                p.lighting_mode = (*v).into();
                true
            }
            (Block::ZBufferProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::ZBufferProperty(p), "function", FieldValue::U32(v)) => {
                p.function = *v;
                true
            }
            (Block::WireframeProperty(p), "flags", FieldValue::U16(v)) => {
                p.wire_flags = *v;
                true
            }
            (Block::TexturingProperty(p), "flags", FieldValue::U16(v)) => {
                p.flags = *v;
                true
            }
            (Block::TexturingProperty(p), "apply_mode", FieldValue::U32(v)) => {
                p.apply_mode = (*v).into();
                true
            }
            (Block::TexturingProperty(p), slot, FieldValue::Link(v)) => {
                p.set_slot_source(slot, *v)
            }
            (Block::SourceTexture(t), "use_external", FieldValue::Bool(v)) => {
                t.use_external = *v;
                true
            }
            (Block::SourceTexture(t), "file_name", FieldValue::Text(v)) => {
                t.file_name = Some(v.clone());
                true
            }
            (Block::SourceTexture(t), "pixel_data", FieldValue::Link(v)) => {
                t.pixel_data_link = *v;
                true
            }
            _ => false,
        };
        if !applied {
            debug!(
                "ignoring field '{}' not recognized on {}",
                name,
                self.kind().as_str()
            );
        }
    }
}
