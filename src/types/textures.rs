use super::base::RecordLink;
use super::properties::NiProperty;
use super::scene::NiObjectNET;
use std::fmt::Debug;
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    #[default]
    Palettized8,
    HighColor16,
    TrueColor32,
    Compressed,
    Bumpmap,
    Palettized4,
    Default,
    Unknown(u32),
}
impl From<u32> for PixelLayout {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Palettized8,
            1 => Self::HighColor16,
            2 => Self::TrueColor32,
            3 => Self::Compressed,
            4 => Self::Bumpmap,
            5 => Self::Palettized4,
            6 => Self::Default,
            _ => Self::Unknown(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MipMapFormat {
    No,
    Yes,
    #[default]
    Default,
    Unknown(u32),
}
impl From<u32> for MipMapFormat {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::No,
            1 => Self::Yes,
            2 => Self::Default,
            _ => Self::Unknown(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaFormat {
    #[default]
    None, // ALPHA_NONE (No alpha)
    Binary,  // ALPHA_BINARY (1-bit alpha)
    Smooth,  // ALPHA_SMOOTH (Full alpha)
    Default, // ALPHA_DEFAULT (Use renderer default)
    Unknown(u32),
}
impl From<u32> for AlphaFormat {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Binary,
            2 => Self::Smooth,
            3 => Self::Default,
            _ => Self::Unknown(value),
        }
    }
}

/// Pixel format of an embedded NiPixelData payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgb8,
    Rgba8,
    Pal8,
    Unknown(u32),
}
impl From<u32> for PixelFormat {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Rgb8,
            1 => Self::Rgba8,
            2 => Self::Pal8,
            _ => Self::Unknown(value),
        }
    }
}

impl PixelFormat {
    /// Bytes per pixel, where the format is plain enough to know.
    pub fn bytes_per_pixel(self) -> Option<u32> {
        match self {
            Self::Rgb8 => Some(3),
            Self::Rgba8 => Some(4),
            Self::Pal8 => Some(1),
            Self::Unknown(_) => None,
        }
    }
}

/// Pixel data packed inside the NIF itself, for textures without an
/// external image file.
#[derive(Debug, Clone, Default)]
pub struct NiPixelData {
    pub pixel_format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub pixel_bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct NiSourceTexture {
    pub net_base: NiObjectNET,
    /// Flag: is the image data an external file reference?
    pub use_external: bool,
    /// External file name, present only if use_external is true.
    pub file_name: Option<String>,
    /// Link to a NiPixelData block, present only if use_external is false.
    pub pixel_data_link: RecordLink,
    pub pixel_layout: PixelLayout,
    pub use_mipmaps: MipMapFormat,
    pub alpha_format: AlphaFormat,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    #[default]
    Replace,
    Decal,
    Modulate,
    Hilight,
    Hilight2,
    Unknown(u32),
}
impl From<u32> for ApplyMode {
    fn from(value: u32) -> Self {
        match value {
            0 => ApplyMode::Replace,
            1 => ApplyMode::Decal,
            2 => ApplyMode::Modulate,
            3 => ApplyMode::Hilight,
            4 => ApplyMode::Hilight2,
            other => ApplyMode::Unknown(other),
        }
    }
}

impl From<ApplyMode> for u32 {
    fn from(mode: ApplyMode) -> u32 {
        match mode {
            ApplyMode::Replace => 0,
            ApplyMode::Decal => 1,
            ApplyMode::Modulate => 2,
            ApplyMode::Hilight => 3,
            ApplyMode::Hilight2 => 4,
            ApplyMode::Unknown(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampMode {
    #[default]
    ClampSClampT,
    ClampSWrapT,
    WrapSClampT,
    WrapSWrapT,
    Unknown(u32),
}
impl From<u32> for ClampMode {
    fn from(value: u32) -> Self {
        // Lower 2 bits carry the mode in v4.0.0.2
        match value & 0b11 {
            0 => ClampMode::ClampSClampT,
            1 => ClampMode::ClampSWrapT,
            2 => ClampMode::WrapSClampT,
            3 => ClampMode::WrapSWrapT,
            other => ClampMode::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
    NearestMipNearest,
    NearestMipLinear,
    LinearMipNearest,
    LinearMipLinear,
    Unknown(u32),
}
impl From<u32> for FilterMode {
    fn from(value: u32) -> Self {
        match value {
            0 => FilterMode::Nearest,
            1 => FilterMode::Linear,
            2 => FilterMode::NearestMipNearest,
            3 => FilterMode::NearestMipLinear,
            4 => FilterMode::LinearMipNearest,
            5 => FilterMode::LinearMipLinear,
            other => FilterMode::Unknown(other),
        }
    }
}

/// One texture slot of a NiTexturingProperty.
#[derive(Debug, Clone, Default)]
pub struct TextureSlot {
    pub source_texture: RecordLink,
    pub clamp_mode: ClampMode,
    pub filter_mode: FilterMode,
    pub uv_set: u32,
}

#[derive(Debug, Clone, Default)]
pub struct NiTexturingProperty {
    pub property_base: NiProperty,
    pub flags: u16,
    pub apply_mode: ApplyMode,
    pub base_texture: Option<TextureSlot>,
    pub dark_texture: Option<TextureSlot>,
    pub detail_texture: Option<TextureSlot>,
    pub gloss_texture: Option<TextureSlot>,
    pub glow_texture: Option<TextureSlot>,
    pub bump_map_texture: Option<TextureSlot>,
    pub decal_0_texture: Option<TextureSlot>,
}

impl NiTexturingProperty {
    /// Source link of the named slot; None for an unrecognized slot
    /// name. An unpopulated slot reads as a null link.
    pub fn slot_source(&self, name: &str) -> Option<RecordLink> {
        let slot = match name {
            "base_texture" => &self.base_texture,
            "dark_texture" => &self.dark_texture,
            "detail_texture" => &self.detail_texture,
            "gloss_texture" => &self.gloss_texture,
            "glow_texture" => &self.glow_texture,
            "bump_map_texture" => &self.bump_map_texture,
            "decal_0_texture" => &self.decal_0_texture,
            _ => return None,
        };
        Some(slot.as_ref().and_then(|s| s.source_texture))
    }

    /// Point the named slot at a source texture, creating the slot if
    /// it is not populated yet. False for an unrecognized slot name.
    pub fn set_slot_source(&mut self, name: &str, link: RecordLink) -> bool {
        let slot = match name {
            "base_texture" => &mut self.base_texture,
            "dark_texture" => &mut self.dark_texture,
            "detail_texture" => &mut self.detail_texture,
            "gloss_texture" => &mut self.gloss_texture,
            "glow_texture" => &mut self.glow_texture,
            "bump_map_texture" => &mut self.bump_map_texture,
            "decal_0_texture" => &mut self.decal_0_texture,
            _ => return false,
        };
        slot.get_or_insert_with(TextureSlot::default).source_texture = link;
        true
    }

    /// All populated slots, in fixed slot order.
    pub fn slots(&self) -> impl Iterator<Item = &TextureSlot> {
        [
            self.base_texture.as_ref(),
            self.dark_texture.as_ref(),
            self.detail_texture.as_ref(),
            self.gloss_texture.as_ref(),
            self.glow_texture.as_ref(),
            self.bump_map_texture.as_ref(),
            self.decal_0_texture.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

// --- Deref Implementations ---
impl Deref for NiSourceTexture {
    type Target = NiObjectNET;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.net_base
    }
}

impl Deref for NiTexturingProperty {
    type Target = NiProperty;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.property_base
    }
}
