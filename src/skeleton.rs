//! Armature/bone classification from skin-instance back-references.
//!
//! The "is skinning influence" flag on nodes is not reliable, so the
//! bone hierarchy is reconstructed by peeking into every skin instance:
//! a skeleton root is an armature unless something later proves it is
//! itself a bone, and every bone must form a chain of bones all the way
//! up to its armature's root node.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::error::{NifError, Result};
use crate::graph::{EdgeKind, ParentMap, Visit, traverse};
use crate::store::{BlockHandle, BlockStore};
use crate::types::Block;

/// What a named node ended up as after the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    ArmatureRoot,
    Bone { armature: String },
    Neither,
}

/// Classification state built by one forward scan over all geometry
/// blocks. Scratch data for a single import; discard after the scene is
/// built.
#[derive(Debug, Default)]
pub struct SkeletonMap {
    /// node name -> armature root block
    armatures: HashMap<String, BlockHandle>,
    /// bone name -> bone block
    bones: HashMap<String, BlockHandle>,
    /// bone name -> owning armature name
    bone_armatures: HashMap<String, String>,
}

impl SkeletonMap {
    /// Scan every skinned geometry block reachable from `root`, in
    /// depth-first pre-order so results are reproducible.
    pub fn build(store: &BlockStore, root: BlockHandle) -> Result<SkeletonMap> {
        let parents = ParentMap::build(store, root)?;
        let mut map = SkeletonMap::default();

        let mut shapes = Vec::new();
        let is_geometry =
            |block: &Block| matches!(block, Block::TriShape(_) | Block::TriStrips(_));
        if store.get(root).is_some_and(is_geometry) {
            shapes.push(root);
        }
        traverse(store, root, &mut |visit: &Visit| {
            if visit.kind == EdgeKind::ChildNode
                && store.get(visit.child).is_some_and(is_geometry)
            {
                shapes.push(visit.child);
            }
        })?;

        for shape in shapes {
            map.scan_shape(store, &parents, shape)?;
        }
        Ok(map)
    }

    fn scan_shape(
        &mut self,
        store: &BlockStore,
        parents: &ParentMap,
        shape: BlockHandle,
    ) -> Result<()> {
        let skin_link = match store.get(shape) {
            Some(Block::TriShape(s)) => s.skin_link,
            Some(Block::TriStrips(s)) => s.skin_link,
            _ => None,
        };
        let Some(skin) = skin_link else {
            return Ok(());
        };
        let instance = match store.get(skin) {
            Some(Block::SkinInstance(instance)) => instance,
            Some(other) => {
                warn!(
                    "skin link of block {} points at a {}, skipping",
                    shape.0,
                    other.kind().as_str()
                );
                return Ok(());
            }
            None => {
                return Err(NifError::DanglingLink {
                    parent: shape,
                    target: skin.0,
                });
            }
        };

        // The skeleton root is an armature only if it is not itself a
        // skinning influence of an outer armature.
        let skelroot = instance.skeleton_root.ok_or(NifError::MissingLink {
            block: skin,
            field: "skeleton root",
        })?;
        let skelroot_name = block_name(store, skin, skelroot)?.to_string();
        let armature = match self.bone_armatures.get(&skelroot_name) {
            Some(outer) => outer.clone(),
            None => {
                if !self.armatures.contains_key(&skelroot_name) {
                    debug!("'{}' is an armature", skelroot_name);
                    self.armatures.insert(skelroot_name.clone(), skelroot);
                }
                skelroot_name
            }
        };

        let bones: Vec<BlockHandle> = instance.bones.iter().flatten().copied().collect();
        for bone in bones {
            let bone_name = block_name(store, skin, bone)?.to_string();
            match self.bone_armatures.get(&bone_name) {
                None => {
                    debug!("'{}' is a bone of armature '{}'", bone_name, armature);
                    self.bones.insert(bone_name.clone(), bone);
                    self.bone_armatures
                        .insert(bone_name.clone(), armature.clone());
                }
                Some(owner) if *owner != armature => {
                    return Err(NifError::BoneConflict {
                        bone: bone_name,
                        current: armature,
                        previous: owner.clone(),
                    });
                }
                Some(_) => {}
            }

            // The bone may have been wrongly identified as an armature
            // by an earlier skin instance. Demote it and hand its bones
            // to the current armature.
            if self.armatures.contains_key(&bone_name) {
                warn!(
                    "'{}' cannot be imported as an armature, reclassifying as a bone of '{}'",
                    bone_name, armature
                );
                let wronged: Vec<String> = self
                    .bone_armatures
                    .iter()
                    .filter(|(_, owner)| **owner == bone_name)
                    .map(|(name, _)| name.clone())
                    .collect();
                for name in wronged {
                    debug!("'{}' is now a bone of armature '{}'", name, armature);
                    self.bone_armatures.insert(name, armature.clone());
                }
                self.armatures.remove(&bone_name);
            }

            self.complete_bone_tree(store, parents, bone, &armature)?;
        }
        Ok(())
    }

    /// Make sure the bones form a tree all the way up to the armature
    /// node: every ancestor between a bone and the armature root must
    /// itself be a bone of that armature.
    fn complete_bone_tree(
        &mut self,
        store: &BlockStore,
        parents: &ParentMap,
        bone: BlockHandle,
        armature: &str,
    ) -> Result<()> {
        let unreachable = || {
            let bone_name = store
                .get(bone)
                .and_then(Block::name)
                .unwrap_or_default()
                .to_string();
            NifError::SkeletonRootUnreachable {
                bone: bone_name,
                root: armature.to_string(),
            }
        };
        let mut current = bone;
        let mut seen = HashSet::from([bone]);
        loop {
            let Some(parent) = parents.parent_of(current) else {
                return Err(unreachable());
            };
            // A revisit means the parent chain loops without ever
            // passing through the armature node.
            if !seen.insert(parent) {
                return Err(unreachable());
            }
            let parent_name = store
                .get(parent)
                .and_then(Block::name)
                .unwrap_or_default()
                .to_string();
            if parent_name == armature {
                return Ok(());
            }
            if self.armatures.contains_key(&parent_name) {
                return Err(NifError::ArmatureIsBone(parent_name));
            }
            match self.bone_armatures.get(&parent_name) {
                None => {
                    debug!("'{}' is a bone of armature '{}'", parent_name, armature);
                    self.bones.insert(parent_name.clone(), parent);
                    self.bone_armatures
                        .insert(parent_name, armature.to_string());
                }
                // Already walked up from here for this armature.
                Some(owner) if owner == armature => return Ok(()),
                Some(owner) => {
                    return Err(NifError::BoneConflict {
                        bone: parent_name.clone(),
                        current: armature.to_string(),
                        previous: owner.clone(),
                    });
                }
            }
            current = parent;
        }
    }

    pub fn classify(&self, name: &str) -> Classification {
        if self.armatures.contains_key(name) {
            Classification::ArmatureRoot
        } else if let Some(armature) = self.bone_armatures.get(name) {
            Classification::Bone {
                armature: armature.clone(),
            }
        } else {
            Classification::Neither
        }
    }

    pub fn is_armature_root(&self, name: &str) -> bool {
        self.armatures.contains_key(name)
    }

    pub fn is_bone(&self, name: &str) -> bool {
        self.bone_armatures.contains_key(name)
    }

    pub fn bone_armature(&self, name: &str) -> Option<&str> {
        self.bone_armatures.get(name).map(String::as_str)
    }

    pub fn armature_block(&self, name: &str) -> Option<BlockHandle> {
        self.armatures.get(name).copied()
    }

    pub fn bone_block(&self, name: &str) -> Option<BlockHandle> {
        self.bones.get(name).copied()
    }

    /// Armature root names, sorted for stable output.
    pub fn armatures(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.armatures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the bones owned by an armature, sorted for stable
    /// output.
    pub fn bones_of(&self, armature: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .bone_armatures
            .iter()
            .filter(|(_, owner)| *owner == armature)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

fn block_name<'a>(
    store: &'a BlockStore,
    parent: BlockHandle,
    handle: BlockHandle,
) -> Result<&'a str> {
    let block = store.get(handle).ok_or(NifError::DanglingLink {
        parent,
        target: handle.0,
    })?;
    Ok(block.name().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;

    fn add_child(store: &mut BlockStore, parent: BlockHandle, child: BlockHandle) {
        if let Some(Block::Node(node)) = store.get_mut(parent) {
            node.children.push(Some(child));
        } else {
            panic!("parent is not a node");
        }
    }

    /// Attach a skinned shape under `parent`, with the given skeleton
    /// root and bone handles.
    fn add_skinned_shape(
        store: &mut BlockStore,
        parent: BlockHandle,
        name: &str,
        skelroot: BlockHandle,
        bones: &[BlockHandle],
    ) -> BlockHandle {
        let shape = store.create_named(BlockKind::TriShape, name);
        add_child(store, parent, shape);
        let skin = store.create(BlockKind::SkinInstance);
        if let Some(Block::SkinInstance(instance)) = store.get_mut(skin) {
            instance.skeleton_root = Some(skelroot);
            instance.bones = bones.iter().map(|b| Some(*b)).collect();
        }
        if let Some(Block::TriShape(s)) = store.get_mut(shape) {
            s.skin_link = Some(skin);
        }
        shape
    }

    #[test]
    fn marks_root_and_bone_chain() {
        // Root -> Spine -> Arm, two skin instances referencing both
        // levels of the chain.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let spine = store.create_named(BlockKind::Node, "Spine");
        let arm = store.create_named(BlockKind::Node, "Arm");
        add_child(&mut store, root, spine);
        add_child(&mut store, spine, arm);
        add_skinned_shape(&mut store, root, "Body", root, &[spine]);
        add_skinned_shape(&mut store, root, "Sleeve", root, &[arm]);

        let map = SkeletonMap::build(&store, root).unwrap();
        assert_eq!(map.classify("Root"), Classification::ArmatureRoot);
        assert_eq!(
            map.classify("Spine"),
            Classification::Bone {
                armature: "Root".into()
            }
        );
        assert_eq!(
            map.classify("Arm"),
            Classification::Bone {
                armature: "Root".into()
            }
        );
        assert_eq!(map.bones_of("Root"), vec!["Arm", "Spine"]);
    }

    #[test]
    fn ancestor_walk_fills_unlisted_intermediates() {
        // Only the leaf is listed as a bone; the walk must classify the
        // intermediate node too.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let spine = store.create_named(BlockKind::Node, "Spine");
        let hand = store.create_named(BlockKind::Node, "Hand");
        add_child(&mut store, root, spine);
        add_child(&mut store, spine, hand);
        add_skinned_shape(&mut store, root, "Glove", root, &[hand]);

        let map = SkeletonMap::build(&store, root).unwrap();
        assert_eq!(map.bone_armature("Spine"), Some("Root"));
        assert_eq!(map.bone_armature("Hand"), Some("Root"));
    }

    #[test]
    fn demotes_provisional_armature() {
        // "Pelvis" is first seen as a skeleton root of its own skin
        // instance, then a later instance lists it as a bone of "Root".
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let pelvis = store.create_named(BlockKind::Node, "Pelvis");
        let leg = store.create_named(BlockKind::Node, "Leg");
        add_child(&mut store, root, pelvis);
        add_child(&mut store, pelvis, leg);
        add_skinned_shape(&mut store, root, "Skirt", pelvis, &[leg]);
        add_skinned_shape(&mut store, root, "Body", root, &[pelvis]);

        let map = SkeletonMap::build(&store, root).unwrap();
        assert_eq!(map.classify("Pelvis"), Classification::Bone {
            armature: "Root".into()
        });
        // Leg was attributed to armature "Pelvis"; after demotion it
        // belongs to "Root".
        assert_eq!(map.bone_armature("Leg"), Some("Root"));
        assert_eq!(map.armatures(), vec!["Root"]);
    }

    #[test]
    fn nested_skeleton_root_resolves_to_outer_armature() {
        // A skeleton root that is already a bone of an outer armature
        // attributes its bones to the outer armature instead.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let pelvis = store.create_named(BlockKind::Node, "Pelvis");
        let leg = store.create_named(BlockKind::Node, "Leg");
        add_child(&mut store, root, pelvis);
        add_child(&mut store, pelvis, leg);
        add_skinned_shape(&mut store, root, "Body", root, &[pelvis]);
        add_skinned_shape(&mut store, root, "Skirt", pelvis, &[leg]);

        let map = SkeletonMap::build(&store, root).unwrap();
        assert_eq!(map.classify("Pelvis"), Classification::Bone {
            armature: "Root".into()
        });
        assert_eq!(map.bone_armature("Leg"), Some("Root"));
        assert!(!map.is_armature_root("Pelvis"));
    }

    #[test]
    fn classification_is_a_strict_partition() {
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let spine = store.create_named(BlockKind::Node, "Spine");
        let arm = store.create_named(BlockKind::Node, "Arm");
        add_child(&mut store, root, spine);
        add_child(&mut store, spine, arm);
        add_skinned_shape(&mut store, root, "Body", root, &[spine, arm]);

        let map = SkeletonMap::build(&store, root).unwrap();
        for name in ["Root", "Spine", "Arm", "Body"] {
            assert!(
                !(map.is_armature_root(name) && map.is_bone(name)),
                "'{}' is both armature and bone",
                name
            );
        }
    }

    #[test]
    fn bone_owned_by_two_armatures_is_fatal() {
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let left = store.create_named(BlockKind::Node, "Left");
        let right = store.create_named(BlockKind::Node, "Right");
        let shared = store.create_named(BlockKind::Node, "Shared");
        add_child(&mut store, root, left);
        add_child(&mut store, root, right);
        add_child(&mut store, left, shared);
        add_skinned_shape(&mut store, root, "A", left, &[shared]);
        add_skinned_shape(&mut store, root, "B", right, &[shared]);

        let err = SkeletonMap::build(&store, root).unwrap_err();
        assert!(matches!(err, NifError::BoneConflict { bone, .. } if bone == "Shared"));
    }

    #[test]
    fn disconnected_bone_is_fatal() {
        // The bone is not a descendant of the skeleton root, so the
        // ancestor walk runs out of parents.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let island = store.create_named(BlockKind::Node, "Island");
        let skel = store.create_named(BlockKind::Node, "Skel");
        add_child(&mut store, root, skel);
        add_child(&mut store, root, island);
        // Skeleton root "Skel" claims "Island", which hangs off "Root"
        // and never reaches a node named "Skel" walking upward.
        add_skinned_shape(&mut store, root, "Mesh", skel, &[island]);

        let err = SkeletonMap::build(&store, root).unwrap_err();
        assert!(matches!(
            err,
            NifError::SkeletonRootUnreachable { bone, .. } if bone == "Island"
        ));
    }

    #[test]
    fn cyclic_parent_chain_is_fatal() {
        // Authoring-tool damage: the limb points back at the scene root,
        // so walking upward from the limb loops forever without passing
        // through the skeleton root.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let skel = store.create_named(BlockKind::Node, "Skel");
        let limb = store.create_named(BlockKind::Node, "Limb");
        add_child(&mut store, root, skel);
        add_child(&mut store, root, limb);
        add_child(&mut store, limb, root);
        add_skinned_shape(&mut store, root, "Mesh", skel, &[limb]);

        let err = SkeletonMap::build(&store, root).unwrap_err();
        assert!(matches!(
            err,
            NifError::SkeletonRootUnreachable { bone, .. } if bone == "Limb"
        ));
    }

    #[test]
    fn ancestor_armature_is_fatal() {
        // An armature root sits between a bone and its skeleton root.
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let inner = store.create_named(BlockKind::Node, "Inner");
        let tip = store.create_named(BlockKind::Node, "Tip");
        add_child(&mut store, root, inner);
        add_child(&mut store, inner, tip);
        // First instance makes "Inner" an armature of its own.
        add_skinned_shape(&mut store, root, "A", inner, &[tip]);
        // Second instance claims "Tip" directly for "Root"; the walk
        // from "Tip" hits armature "Inner" before reaching "Root".
        add_skinned_shape(&mut store, root, "B", root, &[tip]);

        let err = SkeletonMap::build(&store, root).unwrap_err();
        assert!(matches!(err, NifError::BoneConflict { .. } | NifError::ArmatureIsBone(_)));
    }

    #[test]
    fn unskinned_geometry_classifies_nothing() {
        let mut store = BlockStore::new();
        let root = store.create_named(BlockKind::Node, "Root");
        let shape = store.create_named(BlockKind::TriShape, "Mesh");
        add_child(&mut store, root, shape);

        let map = SkeletonMap::build(&store, root).unwrap();
        assert!(map.armatures().is_empty());
        assert_eq!(map.classify("Mesh"), Classification::Neither);
    }
}
