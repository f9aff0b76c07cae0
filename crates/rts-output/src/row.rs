//! Plain data row types written by output backends.

/// One agent's state at a snapshot frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub frame:    u64,
    pub agent_id: u32,
    /// `"worker"` or `"soldier"`.
    pub role:     &'static str,
    pub state:    &'static str,
    pub x:        f32,
    pub y:        f32,
    pub z:        f32,
    /// Payload amount; 0 when empty-handed.
    pub carrying: u32,
}

/// Totals for one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    pub frame:      u64,
    pub sim_secs:   f64,
    pub decisions:  u64,
    pub agents:     u64,
    pub wood:       u32,
    pub stone:      u32,
    pub live_nodes: u64,
}
