//! Depots, the shared stockpile, and build costs.
//!
//! Every depot delivers into one shared [`Stockpile`]; each depot also keeps
//! its own delivery tally for reporting.

use std::collections::BTreeMap;

use tracing::info;

use rts_core::{BodyId, DepotId, ResourceKind, Vec3};

use crate::{ResourceError, ResourceResult};

// ── Stockpile ─────────────────────────────────────────────────────────────────

/// Wood and stone counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stockpile {
    pub wood:  u32,
    pub stone: u32,
}

impl Stockpile {
    /// Starting resources of a new game.
    pub const STARTING: Stockpile = Stockpile { wood: 100, stone: 100 };

    pub fn new(wood: u32, stone: u32) -> Self {
        Self { wood, stone }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood  => self.wood,
            ResourceKind::Stone => self.stone,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Wood  => self.wood = self.wood.saturating_add(amount),
            ResourceKind::Stone => self.stone = self.stone.saturating_add(amount),
        }
    }

    #[inline]
    pub fn can_afford(&self, cost: BuildCost) -> bool {
        self.wood >= cost.wood && self.stone >= cost.stone
    }

    /// Deduct `cost` if affordable.  Nothing is deducted on failure.
    pub fn try_spend(&mut self, cost: BuildCost) -> ResourceResult<()> {
        if !self.can_afford(cost) {
            return Err(ResourceError::Insufficient { need: cost, wood: self.wood, stone: self.stone });
        }
        self.wood -= cost.wood;
        self.stone -= cost.stone;
        Ok(())
    }
}

// ── BuildCost ─────────────────────────────────────────────────────────────────

/// Price of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildCost {
    pub wood:  u32,
    pub stone: u32,
}

impl BuildCost {
    pub const COMMAND_CENTER: BuildCost = BuildCost { wood: 100, stone: 100 };
    pub const BARRACK:        BuildCost = BuildCost { wood: 50, stone: 50 };
}

// ── Depot ─────────────────────────────────────────────────────────────────────

/// A drop-off structure.  Also the spawn anchor for its workers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    pub id:        DepotId,
    pub position:  Vec3,
    pub body:      BodyId,
    /// Everything ever delivered here.
    pub delivered: Stockpile,
}

/// All depots plus the stockpile they deliver into.
#[derive(Debug)]
pub struct DepotStore {
    depots:    BTreeMap<DepotId, Depot>,
    stockpile: Stockpile,
    next_id:   DepotId,
}

impl DepotStore {
    pub fn new(stockpile: Stockpile) -> Self {
        Self { depots: BTreeMap::new(), stockpile, next_id: DepotId(0) }
    }

    /// Register a depot at `position` backed by world body `body`.
    pub fn insert(&mut self, position: Vec3, body: BodyId) -> DepotId {
        let id = self.next_id;
        self.next_id = id.next();
        self.depots.insert(id, Depot { id, position, body, delivered: Stockpile::default() });
        id
    }

    pub fn get(&self, id: DepotId) -> Option<&Depot> {
        self.depots.get(&id)
    }

    pub fn position(&self, id: DepotId) -> Option<Vec3> {
        self.depots.get(&id).map(|d| d.position)
    }

    /// Deliver `amount` of `kind` at depot `id`.
    pub fn receive(&mut self, id: DepotId, kind: ResourceKind, amount: u32) -> ResourceResult<()> {
        let depot = self.depots.get_mut(&id).ok_or(ResourceError::UnknownDepot(id))?;
        depot.delivered.add(kind, amount);
        self.stockpile.add(kind, amount);
        info!(depot = %id, %kind, amount, total = self.stockpile.get(kind), "resources delivered");
        Ok(())
    }

    pub fn stockpile(&self) -> Stockpile {
        self.stockpile
    }

    pub fn stockpile_mut(&mut self) -> &mut Stockpile {
        &mut self.stockpile
    }

    pub fn iter(&self) -> impl Iterator<Item = &Depot> + '_ {
        self.depots.values()
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }
}

impl Default for DepotStore {
    fn default() -> Self {
        Self::new(Stockpile::STARTING)
    }
}
