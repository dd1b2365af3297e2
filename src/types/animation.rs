use super::base::RecordLink;
use std::fmt::Debug;

/// Time controller attached to a node via NiObjectNET's controller link.
/// Only the chain links and timing envelope are modeled here; the key
/// payload stays with the format library.
#[derive(Debug, Clone, Default)]
pub struct NiKeyframeController {
    /// Link to the next NiTimeController in the chain.
    pub next_controller: RecordLink,
    pub flags: u16,
    pub frequency: f32,
    pub phase: f32,
    pub start_time: f32,
    pub stop_time: f32,
    /// Link to the controlled object (a back-reference, usually the
    /// owning NiAVObject).
    pub target: RecordLink,
}
