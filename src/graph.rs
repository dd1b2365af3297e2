use std::collections::HashMap;

use log::warn;

use crate::error::{NifError, Result};
use crate::store::{BlockHandle, BlockStore};
use crate::types::Block;

/// What a parent-to-child link means in the block graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Structural child: scene children and data blocks owned by one
    /// parent (geometry data, skin instance, skin data, pixel data).
    ChildNode,
    /// Render-state attachment: property lists and the texture sources
    /// hanging off texturing properties.
    Property,
    /// Controller chain: a node's controller link and each controller's
    /// next-controller link.
    Controller,
    /// A skin instance's bone reference. Reported but not descended;
    /// bones are back-references into the node hierarchy.
    SkinBone,
}

/// One edge visit produced by `traverse`. A block shared by several
/// parents is visited once per incoming edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub parent: BlockHandle,
    pub child: BlockHandle,
    pub kind: EdgeKind,
}

fn check_link(store: &BlockStore, parent: BlockHandle, target: BlockHandle) -> Result<()> {
    if store.get(target).is_none() {
        return Err(NifError::DanglingLink {
            parent,
            target: target.0,
        });
    }
    Ok(())
}

/// Forward edges leaving a block, in a fixed order so traversal is
/// reproducible: controller chain, then properties, then structural
/// links, then skin-bone references. Back-references (skeleton root,
/// controller target) are not edges.
fn edges(block: &Block) -> Vec<(BlockHandle, EdgeKind)> {
    let mut out = Vec::new();
    if let Some(net) = block.object_net() {
        if let Some(ctrl) = net.controller_link {
            out.push((ctrl, EdgeKind::Controller));
        }
    }
    if let Some(av) = block.av_object() {
        for prop in av.properties.iter().flatten() {
            out.push((*prop, EdgeKind::Property));
        }
    }
    match block {
        Block::Node(node) => {
            for child in node.children.iter().flatten() {
                out.push((*child, EdgeKind::ChildNode));
            }
        }
        Block::TriShape(shape) => {
            if let Some(data) = shape.data_link {
                out.push((data, EdgeKind::ChildNode));
            }
            if let Some(skin) = shape.skin_link {
                out.push((skin, EdgeKind::ChildNode));
            }
        }
        Block::TriStrips(strips) => {
            if let Some(data) = strips.data_link {
                out.push((data, EdgeKind::ChildNode));
            }
            if let Some(skin) = strips.skin_link {
                out.push((skin, EdgeKind::ChildNode));
            }
        }
        Block::SkinInstance(skin) => {
            if let Some(data) = skin.data {
                out.push((data, EdgeKind::ChildNode));
            }
            for bone in skin.bones.iter().flatten() {
                out.push((*bone, EdgeKind::SkinBone));
            }
        }
        Block::TexturingProperty(tex) => {
            for slot in tex.slots() {
                if let Some(source) = slot.source_texture {
                    out.push((source, EdgeKind::Property));
                }
            }
        }
        Block::SourceTexture(tex) => {
            if let Some(pixels) = tex.pixel_data_link {
                out.push((pixels, EdgeKind::ChildNode));
            }
        }
        Block::KeyframeController(ctrl) => {
            if let Some(next) = ctrl.next_controller {
                out.push((next, EdgeKind::Controller));
            }
        }
        _ => {}
    }
    out
}

fn descend<F: FnMut(&Visit)>(
    store: &BlockStore,
    current: BlockHandle,
    path: &mut Vec<BlockHandle>,
    visitor: &mut F,
) -> Result<()> {
    path.push(current);
    let block = store
        .get(current)
        .expect("descend is only called on checked handles");
    for (target, kind) in edges(block) {
        check_link(store, current, target)?;
        let visit = Visit {
            parent: current,
            child: target,
            kind,
        };
        visitor(&visit);
        if kind == EdgeKind::SkinBone {
            // Bone links point back into the node hierarchy; the bones
            // are reached through their own ChildNode edges.
            continue;
        }
        if path.contains(&target) {
            // True cycle: the block is its own ancestor. Report the
            // edge, break the recursion.
            warn!(
                "cycle in block graph: block {} is its own ancestor, not descending",
                target.0
            );
            continue;
        }
        descend(store, target, path, visitor)?;
    }
    path.pop();
    Ok(())
}

/// Depth-first pre-order walk from `root`, yielding every reachable
/// block once per incoming edge. Cycle detection is scoped to the
/// current root-to-leaf path so legitimate multi-parent sharing is
/// still reported per edge. Dangling links abort the walk.
pub fn traverse<F: FnMut(&Visit)>(
    store: &BlockStore,
    root: BlockHandle,
    visitor: &mut F,
) -> Result<()> {
    if store.get(root).is_none() {
        return Err(NifError::DanglingLink {
            parent: root,
            target: root.0,
        });
    }
    let mut path = Vec::new();
    descend(store, root, &mut path, visitor)
}

/// Structural parent of every block reachable from the root, derived
/// from ChildNode edges out of NiNode blocks. The first incoming edge
/// wins, matching a pre-order read of the file.
#[derive(Debug, Default)]
pub struct ParentMap {
    parents: HashMap<BlockHandle, BlockHandle>,
}

impl ParentMap {
    pub fn build(store: &BlockStore, root: BlockHandle) -> Result<ParentMap> {
        let mut parents = HashMap::new();
        traverse(store, root, &mut |visit: &Visit| {
            if visit.kind != EdgeKind::ChildNode {
                return;
            }
            let parent_is_node = matches!(store.get(visit.parent), Some(Block::Node(_)));
            if parent_is_node {
                parents.entry(visit.child).or_insert(visit.parent);
            }
        })?;
        Ok(ParentMap { parents })
    }

    pub fn parent_of(&self, child: BlockHandle) -> Option<BlockHandle> {
        self.parents.get(&child).copied()
    }
}
