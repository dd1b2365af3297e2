use super::scene::NiObjectNET;
use bitflags::bitflags;
use std::fmt::Debug;
use std::ops::Deref;

#[derive(Debug, Clone, Default)]
pub struct NiProperty {
    pub net_base: NiObjectNET,
}

#[derive(Debug, Clone, Default)]
pub struct NiMaterialProperty {
    pub property_base: NiProperty,
    pub flags: u16, // Present in v4.0.0.2
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub emissive_color: [f32; 3],
    pub glossiness: f32,
    pub alpha: f32,
}

bitflags! {
    /// Structured view over the NiAlphaProperty flag word. Bit 0 enables
    /// blending, bit 9 enables testing; blend modes live in bits 1-8.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AlphaFlags: u16 {
        const BLEND_ENABLE = 1 << 0;
        const TEST_ENABLE  = 1 << 9;
        const NO_SORTER    = 1 << 13;
        const _ = !0; // blend-mode bit fields pass through untouched
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiAlphaProperty {
    pub property_base: NiProperty,
    pub flags: u16,
    pub threshold: u8,
}

impl NiAlphaProperty {
    pub fn alpha_flags(&self) -> AlphaFlags {
        AlphaFlags::from_bits_retain(self.flags)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiSpecularProperty {
    pub property_base: NiProperty,
    /// Bit 0 enables specular highlights.
    pub flags: u16,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StencilFlags: u16 {
        const ENABLE = 1 << 0;
        const _ = !0; // test function / draw mode bit fields
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiStencilProperty {
    pub property_base: NiProperty,
    pub flags: u16,
    pub stencil_ref: u32,
    pub stencil_mask: u32,
}

impl NiStencilProperty {
    pub fn stencil_flags(&self) -> StencilFlags {
        StencilFlags::from_bits_retain(self.flags)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiZBufferProperty {
    pub property_base: NiProperty,
    /// Bit 0 enables the depth test, bit 1 the depth write.
    pub flags: u16,
    /// Depth comparison function (3 = LESS_EQUAL, the usual export value).
    pub function: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexMode {
    #[default]
    SrcIgnore,
    SrcEmissive,
    SrcAmbDiff,
    Unknown(u32),
}
impl From<u32> for VertexMode {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::SrcIgnore,
            1 => Self::SrcEmissive,
            2 => Self::SrcAmbDiff,
            _ => Self::Unknown(value),
        }
    }
}

impl From<VertexMode> for u32 {
    fn from(mode: VertexMode) -> u32 {
        match mode {
            VertexMode::SrcIgnore => 0,
            VertexMode::SrcEmissive => 1,
            VertexMode::SrcAmbDiff => 2,
            VertexMode::Unknown(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightMode {
    #[default]
    Emissive,
    EmissiveAmbientDiffuse,
    Unknown(u32),
}
impl From<u32> for LightMode {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Emissive,
            1 => Self::EmissiveAmbientDiffuse,
            _ => Self::Unknown(value),
        }
    }
}

impl From<LightMode> for u32 {
    fn from(mode: LightMode) -> u32 {
        match mode {
            LightMode::Emissive => 0,
            LightMode::EmissiveAmbientDiffuse => 1,
            LightMode::Unknown(value) => value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NiVertexColorProperty {
    pub property_base: NiProperty,
    pub flags: u16,
    pub vertex_mode: VertexMode,
    pub lighting_mode: LightMode,
}

#[derive(Debug, Clone, Default)]
pub struct NiWireframeProperty {
    pub property_base: NiProperty,
    /// Bit 0 is the enable flag.
    pub wire_flags: u16,
}

impl NiWireframeProperty {
    pub fn is_wireframe_enabled(&self) -> bool {
        (self.wire_flags & 0x0001) != 0
    }
}

// --- Deref Implementations ---
impl Deref for NiProperty {
    type Target = NiObjectNET;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.net_base
    }
}

impl Deref for NiMaterialProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiAlphaProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiSpecularProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiStencilProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiZBufferProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiVertexColorProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}

impl Deref for NiWireframeProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}
