//! Capability tags for resources and world bodies.
//!
//! Every body declares a [`BodyKind`] at creation, so classifying an obstacle
//! is a tag lookup rather than a membership scan over per-kind lists.

/// The kind of material a resource node yields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    Wood,
    Stone,
}

impl ResourceKind {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Wood  => "wood",
            ResourceKind::Stone => "stone",
        }
    }

    /// The body tag a node of this kind is registered with.
    #[inline]
    pub fn body_kind(self) -> BodyKind {
        match self {
            ResourceKind::Wood  => BodyKind::Tree,
            ResourceKind::Stone => BodyKind::Rock,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wood" | "tree" => Ok(ResourceKind::Wood),
            "stone" | "rock" => Ok(ResourceKind::Stone),
            other => Err(crate::CoreError::Parse(format!(
                "invalid resource kind {other:?}: expected \"wood\" or \"stone\""
            ))),
        }
    }
}

/// What a world body is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BodyKind {
    Tree,
    Rock,
    Building,
    Player,
    Terrain,
    #[default]
    Agent,
}

impl BodyKind {
    /// `true` for bodies the steering probe must steer around.
    ///
    /// The terrain height-field body spans the whole map and is never an
    /// obstacle.
    #[inline]
    pub fn is_obstacle(self) -> bool {
        !matches!(self, BodyKind::Terrain)
    }

    /// `true` for bodies soldiers treat as hostile.
    #[inline]
    pub fn is_hostile(self) -> bool {
        matches!(self, BodyKind::Player)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Tree     => "tree",
            BodyKind::Rock     => "rock",
            BodyKind::Building => "building",
            BodyKind::Player   => "player",
            BodyKind::Terrain  => "terrain",
            BodyKind::Agent    => "agent",
        }
    }
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
