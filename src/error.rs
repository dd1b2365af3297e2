use thiserror::Error;

use crate::store::BlockHandle;

/// Fatal format-consistency errors. Anything recoverable (a texture that
/// cannot be located, a dedup scan that finds nothing) is expressed as a
/// value, not an error.
#[derive(Debug, Error)]
pub enum NifError {
    #[error("invalid NIF file: block {parent:?} links to {target}, which is not in the store")]
    DanglingLink { parent: BlockHandle, target: usize },

    #[error(
        "cannot handle this NIF file: bone '{bone}' belongs to more than one armature: '{current}' and '{previous}'"
    )]
    BoneConflict {
        bone: String,
        current: String,
        previous: String,
    },

    #[error("invalid NIF file: armature '{0}' is also a bone")]
    ArmatureIsBone(String),

    #[error("invalid NIF file: bone '{bone}' has no ancestor path to skeleton root '{root}'")]
    SkeletonRootUnreachable { bone: String, root: String },

    #[error("invalid NIF file: block {block:?} has a null {field} link, which is required")]
    MissingLink {
        block: BlockHandle,
        field: &'static str,
    },

    #[error("unsupported block type: {0}")]
    UnsupportedBlockType(String),
}

pub type Result<T> = std::result::Result<T, NifError>;
