use log::debug;

use crate::types::{Block, BlockKind, FieldValue};

/// Index of a block in its owning `BlockStore`. Only meaningful against
/// the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(pub usize);

/// Dedup criteria: an ordered list of (field name, required value)
/// pairs. Fields not named here are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    fields: Vec<(&'static str, FieldValue)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    fn matches(&self, block: &Block) -> bool {
        // A field the block does not expose is no constraint at all,
        // mirroring the skip in `set_field`; otherwise criteria written
        // against newer format revisions would never match and dedup
        // would mint a duplicate per call.
        self.fields
            .iter()
            .all(|(name, required)| match block.field(name) {
                Some(actual) => actual == *required,
                None => true,
            })
    }
}

/// Owns the universe of blocks for one import or export session.
/// Registration order is insertion order and is stable; handles index
/// an arena that only ever grows.
#[derive(Debug, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a default-initialized block of the given kind and
    /// register it.
    pub fn create(&mut self, kind: BlockKind) -> BlockHandle {
        let handle = BlockHandle(self.blocks.len());
        self.blocks.push(Block::new(kind));
        handle
    }

    /// `create`, plus setting the object name for NET-derived kinds.
    pub fn create_named(&mut self, kind: BlockKind, name: &str) -> BlockHandle {
        let handle = self.create(kind);
        self.blocks[handle.0].set_name(name);
        handle
    }

    /// Register an already-built block, e.g. one handed over by the
    /// format library after parsing.
    pub fn insert(&mut self, block: Block) -> BlockHandle {
        let handle = BlockHandle(self.blocks.len());
        self.blocks.push(block);
        handle
    }

    pub fn get(&self, handle: BlockHandle) -> Option<&Block> {
        self.blocks.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: BlockHandle) -> Option<&mut Block> {
        self.blocks.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Handles of every registered block, in registration order.
    pub fn handles(&self) -> impl Iterator<Item = BlockHandle> {
        (0..self.blocks.len()).map(BlockHandle)
    }

    /// All blocks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockHandle, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (BlockHandle(i), block))
    }

    /// Linear first-match scan over all registered blocks.
    pub fn find(&self, mut predicate: impl FnMut(&Block) -> bool) -> Option<BlockHandle> {
        self.iter()
            .find(|(_, block)| predicate(block))
            .map(|(handle, _)| handle)
    }

    /// Find an existing block of `kind` matching every criteria field,
    /// or create one with exactly those fields set.
    ///
    /// First match in registration order wins, so repeated calls with
    /// identical criteria against an unchanging store return the same
    /// handle, never a duplicate.
    pub fn get_or_create(&mut self, kind: BlockKind, criteria: &Criteria) -> BlockHandle {
        for (handle, block) in self.iter() {
            if block.kind() != kind {
                continue;
            }
            if criteria.matches(block) {
                debug!("found existing {} block matching all criteria", kind.as_str());
                return handle;
            }
        }
        debug!(
            "created new {} block because none matched the required criteria",
            kind.as_str()
        );
        let handle = self.create(kind);
        let block = &mut self.blocks[handle.0];
        for (name, value) in criteria.iter() {
            block.set_field(name, value);
        }
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NiAlphaProperty;

    fn alpha_criteria(flags: u16, threshold: u8) -> Criteria {
        Criteria::new()
            .field("flags", flags)
            .field("threshold", threshold)
    }

    #[test]
    fn create_registers_in_insertion_order() {
        let mut store = BlockStore::new();
        let a = store.create(BlockKind::Node);
        let b = store.create(BlockKind::TriShape);
        assert_eq!(a, BlockHandle(0));
        assert_eq!(b, BlockHandle(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).unwrap().kind(), BlockKind::Node);
        assert_eq!(store.handles().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn find_returns_first_match_in_store_order() {
        let mut store = BlockStore::new();
        store.create_named(BlockKind::Node, "Scene Root");
        let first = store.create_named(BlockKind::Node, "Bip01");
        store.create_named(BlockKind::Node, "Bip01");
        let found = store.find(|b| b.name() == Some("Bip01"));
        assert_eq!(found, Some(first));
        assert_eq!(store.find(|b| b.name() == Some("missing")), None);
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = BlockStore::new();
        let first = store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x12ED, 0));
        let second = store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x12ED, 0));
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);

        match store.get(first).unwrap() {
            Block::AlphaProperty(NiAlphaProperty {
                flags, threshold, ..
            }) => {
                assert_eq!(*flags, 0x12ED);
                assert_eq!(*threshold, 0);
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn differing_criteria_create_distinct_blocks() {
        let mut store = BlockStore::new();
        let a = store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x12ED, 0));
        let b = store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x32ED, 150));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unconstrained_fields_are_not_compared() {
        let mut store = BlockStore::new();
        let existing = store.create(BlockKind::AlphaProperty);
        if let Some(Block::AlphaProperty(p)) = store.get_mut(existing) {
            p.flags = 0x12ED;
            p.threshold = 42; // not part of the criteria below
        }
        let found = store.get_or_create(
            BlockKind::AlphaProperty,
            &Criteria::new().field("flags", 0x12ED_u16),
        );
        assert_eq!(found, existing);
    }

    #[test]
    fn kind_mismatch_never_matches() {
        let mut store = BlockStore::new();
        store.get_or_create(
            BlockKind::SpecularProperty,
            &Criteria::new().field("flags", 1_u16),
        );
        let wire = store.get_or_create(
            BlockKind::WireframeProperty,
            &Criteria::new().field("flags", 1_u16),
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(wire).unwrap().kind(), BlockKind::WireframeProperty);
    }

    #[test]
    fn duplicate_property_groups_collapse() {
        // N property blocks, M duplicates per group: dedup yields one
        // block per distinct criteria set.
        let mut store = BlockStore::new();
        let mut handles = Vec::new();
        for _ in 0..3 {
            handles.push(store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x12ED, 0)));
        }
        for _ in 0..2 {
            handles.push(store.get_or_create(BlockKind::AlphaProperty, &alpha_criteria(0x00ED, 0)));
        }
        assert_eq!(store.len(), 2);
        assert!(handles[0] == handles[1] && handles[1] == handles[2]);
        assert!(handles[3] == handles[4]);
        assert_ne!(handles[0], handles[3]);
    }

    #[test]
    fn texturing_property_dedup_matches_on_state() {
        let mut store = BlockStore::new();
        let tex = store.create(BlockKind::SourceTexture);
        let criteria = Criteria::new()
            .field("flags", 1_u16)
            .field("apply_mode", 2_u32)
            .field("base_texture", Some(tex));
        let first = store.get_or_create(BlockKind::TexturingProperty, &criteria);
        let second = store.get_or_create(BlockKind::TexturingProperty, &criteria);
        assert_eq!(first, second);

        match store.get(first).unwrap() {
            Block::TexturingProperty(p) => {
                assert_eq!(p.flags, 1);
                assert_eq!(p.slot_source("base_texture"), Some(Some(tex)));
            }
            other => panic!("unexpected block {:?}", other),
        }

        // A different apply mode is a different texturing state.
        let other = store.get_or_create(
            BlockKind::TexturingProperty,
            &Criteria::new()
                .field("flags", 1_u16)
                .field("apply_mode", 0_u32)
                .field("base_texture", Some(tex)),
        );
        assert_ne!(first, other);
    }

    #[test]
    fn unknown_criteria_field_is_skipped_on_create() {
        let mut store = BlockStore::new();
        let criteria = Criteria::new()
            .field("flags", 1_u16)
            .field("emissive_mult", 1.0_f32);
        let handle = store.get_or_create(BlockKind::SpecularProperty, &criteria);
        // The unrecognized field neither fails nor leaks anywhere.
        assert_eq!(store.get(handle).unwrap().field("emissive_mult"), None);
        // And it is no constraint when matching either: the second call
        // finds the first block instead of minting a duplicate.
        let again = store.get_or_create(BlockKind::SpecularProperty, &criteria);
        assert_eq!(again, handle);
        assert_eq!(store.len(), 1);
    }
}
