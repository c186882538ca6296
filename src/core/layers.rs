use serde::{Deserialize, Serialize};

/// Semantic layer categories, in the fixed order the compositor processes
/// them within one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Grid,
    Graph,
    Moving,
    Dot,
}

impl LayerKind {
    /// Compositor processing order within a phase.
    pub const ORDER: [Self; 4] = [Self::Grid, Self::Graph, Self::Moving, Self::Dot];

    const fn index(self) -> u8 {
        match self {
            Self::Grid => 0,
            Self::Graph => 1,
            Self::Moving => 2,
            Self::Dot => 3,
        }
    }
}

/// One of the two passes of a draw cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Slow-changing content painted into the cache surface chain.
    Cache,
    /// Per-frame content painted directly onto the realtime surface.
    Realtime,
}

impl Phase {
    const fn bit_offset(self) -> u8 {
        match self {
            Self::Cache => 0,
            Self::Realtime => 4,
        }
    }
}

/// Bitmask over the 8 dirty-layer flags: {grid, graph, moving, dot} x
/// {cache, realtime}. The content provider flips these to tell the
/// compositor which layers to repaint; the engine never interprets what a
/// layer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DirtyLayers {
    bits: u8,
}

impl DirtyLayers {
    const CACHE_BITS: u8 = 0b0000_1111;
    const REALTIME_BITS: u8 = 0b1111_0000;

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::CACHE_BITS | Self::REALTIME_BITS,
        }
    }

    #[must_use]
    pub const fn all_cached() -> Self {
        Self {
            bits: Self::CACHE_BITS,
        }
    }

    #[must_use]
    pub const fn from_layer(kind: LayerKind, phase: Phase) -> Self {
        Self {
            bits: 1 << (kind.index() + phase.bit_offset()),
        }
    }

    #[must_use]
    pub const fn with(self, kind: LayerKind, phase: Phase) -> Self {
        Self {
            bits: self.bits | Self::from_layer(kind, phase).bits,
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, kind: LayerKind, phase: Phase) -> bool {
        (self.bits & Self::from_layer(kind, phase).bits) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// True when any cached-layer flag is set, which forces the cache pass.
    #[must_use]
    pub const fn any_cached(self) -> bool {
        (self.bits & Self::CACHE_BITS) != 0
    }

    /// True when any realtime-layer flag is set; otherwise the realtime
    /// pass is skipped entirely.
    #[must_use]
    pub const fn any_realtime(self) -> bool {
        (self.bits & Self::REALTIME_BITS) != 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }
}
