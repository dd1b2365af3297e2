use super::base::{BoundingSphere, Vector2, Vector3, Vector4};
use std::fmt::Debug;
use std::ops::Deref;

// Base class for geometry data blocks
#[derive(Debug, Clone, Default)]
pub struct NiGeometryData {
    pub vertices: Option<Vec<Vector3>>,
    pub normals: Option<Vec<Vector3>>,
    pub bounding_sphere: BoundingSphere,
    pub vertex_colors: Option<Vec<Vector4>>, // RGBA
    pub uv_sets: Vec<Vec<Vector2>>,
}

// Inherits (conceptually) from NiGeometryData
#[derive(Debug, Clone, Default)]
pub struct NiTriBasedGeomData {
    pub geom_base: NiGeometryData,
}

// Specific triangle soup data
#[derive(Debug, Clone, Default)]
pub struct NiTriShapeData {
    pub tri_base: NiTriBasedGeomData,
    /// Triangle vertex indices, three per face.
    pub triangles: Vec<u16>,
}

// --- Deref Implementations ---
impl Deref for NiTriBasedGeomData {
    type Target = NiGeometryData;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.geom_base
    }
}
impl Deref for NiTriShapeData {
    type Target = NiTriBasedGeomData;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.tri_base
    }
}
