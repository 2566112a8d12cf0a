use std::ops::{BitOr, BitOrAssign};

use glam::Vec2;

/// Host inputs sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Animation time in seconds. Accumulated or wall-clock depending on the
    /// strategy's clock mode.
    pub time: f32,
    /// Pointer offset from the viewport center, already normalized by the host.
    pub pointer: Vec2,
}

impl Frame {
    pub fn new(time: f32, pointer: Vec2) -> Self {
        Self { time, pointer }
    }

    pub fn at(time: f32) -> Self {
        Self {
            time,
            pointer: Vec2::ZERO,
        }
    }
}

/// Buffers touched by the last advance. The host re-uploads only these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirtyBuffers(u32);

impl DirtyBuffers {
    pub const NONE: Self = Self(0);
    pub const POSITIONS: Self = Self(1);
    pub const COLORS: Self = Self(1 << 1);
    pub const SIZES: Self = Self(1 << 2);
    /// The field's rigid transform (rotation) changed.
    pub const TRANSFORM: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DirtyBuffers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirtyBuffers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Outcome of one driver tick, handed back to the host frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the frame just produced.
    pub frame: u64,
    /// Animation time the strategy saw.
    pub time: f32,
    pub dirty: DirtyBuffers,
}
