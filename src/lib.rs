//! Host-independent core for NIF (NetImmerse/Gamebryo) scene graphs.
//!
//! Owns the typed block model of a NIF file, the per-session block
//! store with render-state property deduplication, reference-graph
//! traversal, armature/bone classification from skin instances, and
//! texture source resolution. The binary wire format and the host 3D
//! application's scene API stay outside this crate; it operates on the
//! already-parsed in-memory graph and produces the decisions (what to
//! create, what to reuse) that host glue applies.

pub mod error;
pub mod graph;
pub mod skeleton;
pub mod store;
pub mod texture;
pub mod types;

pub use error::{NifError, Result};
pub use graph::{EdgeKind, ParentMap, Visit, traverse};
pub use skeleton::{Classification, SkeletonMap};
pub use store::{BlockHandle, BlockStore, Criteria};
pub use texture::{LocatedTexture, TextureKey, TextureRef, TextureResolver};
pub use types::*;
