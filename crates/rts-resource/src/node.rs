//! Harvestable resource nodes.

use rts_core::{BodyId, NodeId, ResourceKind, Vec3};

/// A depletable resource node (a tree or a rock).
///
/// `amount` is unsigned and only ever reduced through
/// [`ResourceRegistry::harvest`](crate::ResourceRegistry::harvest), so it can
/// never go negative.  `reserved` is private for the same reason: only the
/// registry flips it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceNode {
    pub id:       NodeId,
    pub kind:     ResourceKind,
    pub position: Vec3,
    pub amount:   u32,
    /// World body standing for this node; removed when the node depletes.
    pub body:     BodyId,
    pub(crate) reserved: bool,
}

impl ResourceNode {
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// `true` if an agent may claim this node right now.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        !self.reserved && self.amount > 0 && self.position.is_finite()
    }
}

/// The result of one harvest: what the agent now carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harvest {
    pub kind:   ResourceKind,
    pub amount: u32,
    /// Set when this harvest emptied the node: the body to remove from the
    /// world.
    pub depleted: Option<BodyId>,
}
