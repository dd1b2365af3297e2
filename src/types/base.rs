use std::fmt::Debug;
use std::ops::Index;

use crate::store::BlockHandle;

/// Represents links to other blocks in the store. `None` is a null link.
pub type RecordLink = Option<BlockHandle>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2(pub [f32; 2]);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3(pub [f32; 3]);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4(pub [f32; 4]);

impl Index<usize> for Vector3 {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3(pub [[f32; 3]; 3]);

impl Default for Matrix3x3 {
    fn default() -> Self {
        Matrix3x3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }
}

/// The rotation/translation/scale triple NIF stores on every AV object
/// and on each skin bone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiTransform {
    pub rotation: Matrix3x3,
    pub translation: Vector3,
    pub scale: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3,
    pub radius: f32,
}
