//! Per-frame draw statistics.

use std::fmt;

/// Counters gathered while drawing one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes visited by the draw traversal
    pub nodes_visited: usize,
    /// Draw calls issued
    pub draw_calls: usize,
    /// Lights written in the pre-pass
    pub lights: usize,
    /// Lights dropped because the light block was full
    pub lights_dropped: usize,
    /// Non-fatal uniform write failures
    pub uniform_warnings: usize,
    /// Nodes drawn with a world transform that was not recomputed
    pub stale_nodes: usize,
}

impl FrameStats {
    /// Fold another frame's counters into this one.
    pub fn accumulate(&mut self, other: &FrameStats) {
        self.nodes_visited += other.nodes_visited;
        self.draw_calls += other.draw_calls;
        self.lights += other.lights;
        self.lights_dropped += other.lights_dropped;
        self.uniform_warnings += other.uniform_warnings;
        self.stale_nodes += other.stale_nodes;
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} draws, {} lights, {} warnings",
            self.nodes_visited, self.draw_calls, self.lights, self.uniform_warnings
        )
    }
}
