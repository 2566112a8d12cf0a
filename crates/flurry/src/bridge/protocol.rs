//! Frame buffer layout shared with the host renderer.
//! The JS host reads it through `get_frame_ptr` / `get_frame_len`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Positions: count × 3 floats]
//! [Colors: count × 3 floats, absent when the field has no colors]
//! [Sizes: count × 1 float, absent when the field has no sizes]
//! ```
//!
//! Section offsets are written into the header once; an absent section has
//! offset -1. The host reads the dirty mask each frame and re-uploads only the
//! sections it names.

use crate::api::types::{DirtyBuffers, FrameReport};
use crate::field::{ParticleField, COLOR_STRIDE, POSITION_STRIDE};
use crate::motion::FieldTransform;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PARTICLE_COUNT: usize = 1;
pub const HEADER_DIRTY_MASK: usize = 2;
pub const HEADER_TIME: usize = 3;
pub const HEADER_ROTATION_X: usize = 4;
pub const HEADER_ROTATION_Y: usize = 5;
pub const HEADER_ROTATION_Z: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;
pub const HEADER_POSITIONS_OFFSET: usize = 8;
pub const HEADER_COLORS_OFFSET: usize = 9;
pub const HEADER_SIZES_OFFSET: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Frame counters wrap here so the header value stays exact in f32.
pub const FRAME_COUNTER_WRAP: u64 = 1 << 24;

/// Offset value for a section the field does not carry.
pub const ABSENT_SECTION: f32 = -1.0;

/// Runtime-computed buffer layout for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub count: usize,
    pub has_colors: bool,
    pub has_sizes: bool,

    /// Size of each section in floats.
    pub positions_floats: usize,
    pub colors_floats: usize,
    pub sizes_floats: usize,

    /// Offset (in floats) where each section begins.
    pub positions_offset: usize,
    pub colors_offset: usize,
    pub sizes_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl FrameLayout {
    pub fn new(count: usize, has_colors: bool, has_sizes: bool) -> Self {
        let positions_floats = count * POSITION_STRIDE;
        let colors_floats = if has_colors { count * COLOR_STRIDE } else { 0 };
        let sizes_floats = if has_sizes { count } else { 0 };

        let positions_offset = HEADER_FLOATS;
        let colors_offset = positions_offset + positions_floats;
        let sizes_offset = colors_offset + colors_floats;

        let buffer_total_floats = sizes_offset + sizes_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            count,
            has_colors,
            has_sizes,
            positions_floats,
            colors_floats,
            sizes_floats,
            positions_offset,
            colors_offset,
            sizes_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    pub fn for_field(field: &ParticleField) -> Self {
        let layout = field.layout();
        Self::new(field.count(), layout.colors, layout.sizes)
    }

    /// Zeroed buffer with the static header fields written and every section
    /// filled from `field`.
    pub fn allocate(&self, field: &ParticleField) -> Vec<f32> {
        let mut buf = vec![0.0; self.buffer_total_floats];
        buf[HEADER_PARTICLE_COUNT] = self.count as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf[HEADER_POSITIONS_OFFSET] = self.positions_offset as f32;
        buf[HEADER_COLORS_OFFSET] = if self.has_colors {
            self.colors_offset as f32
        } else {
            ABSENT_SECTION
        };
        buf[HEADER_SIZES_OFFSET] = if self.has_sizes {
            self.sizes_offset as f32
        } else {
            ABSENT_SECTION
        };
        self.pack(&mut buf, field, DirtyBuffers::ALL);
        buf
    }

    /// Write the per-frame header fields.
    pub fn write_header(&self, buf: &mut [f32], report: &FrameReport, transform: &FieldTransform) {
        buf[HEADER_FRAME_COUNTER] = (report.frame % FRAME_COUNTER_WRAP) as f32;
        buf[HEADER_DIRTY_MASK] = report.dirty.bits() as f32;
        buf[HEADER_TIME] = report.time;
        buf[HEADER_ROTATION_X] = transform.rotation.x;
        buf[HEADER_ROTATION_Y] = transform.rotation.y;
        buf[HEADER_ROTATION_Z] = transform.rotation.z;
    }

    /// Copy the sections named by `dirty` from `field` into `buf`.
    pub fn pack(&self, buf: &mut [f32], field: &ParticleField, dirty: DirtyBuffers) {
        if dirty.contains(DirtyBuffers::POSITIONS) {
            copy_section(buf, self.positions_offset, field.positions());
        }
        if dirty.contains(DirtyBuffers::COLORS) {
            if let Some(colors) = field.colors() {
                copy_section(buf, self.colors_offset, colors);
            }
        }
        if dirty.contains(DirtyBuffers::SIZES) {
            if let Some(sizes) = field.sizes() {
                copy_section(buf, self.sizes_offset, sizes);
            }
        }
    }
}

fn copy_section(buf: &mut [f32], offset: usize, src: &[f32]) {
    buf[offset..offset + src.len()].copy_from_slice(src);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{SphereShellGenerator, WaveCloudGenerator};
    use glam::Vec3;

    #[test]
    fn offsets_are_contiguous() {
        let layout = FrameLayout::new(100, true, true);

        assert_eq!(layout.positions_offset, HEADER_FLOATS);
        assert_eq!(layout.colors_offset, layout.positions_offset + 300);
        assert_eq!(layout.sizes_offset, layout.colors_offset + 300);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 700);
        assert_eq!(layout.buffer_total_bytes, (HEADER_FLOATS + 700) * 4);
    }

    #[test]
    fn absent_sections_take_no_space() {
        let field = ParticleField::create(10, SphereShellGenerator::new(1)).unwrap();
        let layout = FrameLayout::for_field(&field);
        assert!(!layout.has_colors);
        assert_eq!(layout.colors_floats, 0);
        assert_eq!(layout.sizes_offset, layout.colors_offset);

        let buf = layout.allocate(&field);
        assert_eq!(buf[HEADER_COLORS_OFFSET], ABSENT_SECTION);
        assert_eq!(buf[HEADER_SIZES_OFFSET], layout.sizes_offset as f32);
        assert_eq!(&buf[layout.sizes_offset..], field.sizes().unwrap());
    }

    #[test]
    fn allocate_copies_every_section() {
        let field = ParticleField::create(5, WaveCloudGenerator::new(8)).unwrap();
        let layout = FrameLayout::for_field(&field);
        let buf = layout.allocate(&field);

        assert_eq!(buf[HEADER_PARTICLE_COUNT], 5.0);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(&buf[layout.positions_offset..layout.colors_offset], field.positions());
        assert_eq!(&buf[layout.colors_offset..layout.sizes_offset], field.colors().unwrap());
    }

    #[test]
    fn pack_only_touches_dirty_sections() {
        let field = ParticleField::create(3, WaveCloudGenerator::new(8)).unwrap();
        let layout = FrameLayout::for_field(&field);
        let mut buf = vec![0.0; layout.buffer_total_floats];
        layout.pack(&mut buf, &field, DirtyBuffers::SIZES);
        assert!(buf[layout.positions_offset..layout.sizes_offset].iter().all(|v| *v == 0.0));
        assert_eq!(&buf[layout.sizes_offset..], field.sizes().unwrap());
    }

    #[test]
    fn header_carries_frame_state() {
        let layout = FrameLayout::new(0, false, false);
        let mut buf = vec![0.0; layout.buffer_total_floats];
        let report = FrameReport {
            frame: FRAME_COUNTER_WRAP + 3,
            time: 1.25,
            dirty: DirtyBuffers::POSITIONS | DirtyBuffers::TRANSFORM,
        };
        let transform = FieldTransform {
            rotation: Vec3::new(0.1, 0.2, 0.0),
        };
        layout.write_header(&mut buf, &report, &transform);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(buf[HEADER_DIRTY_MASK], 9.0);
        assert_eq!(buf[HEADER_TIME], 1.25);
        assert_eq!(buf[HEADER_ROTATION_Y], 0.2);
    }
}
