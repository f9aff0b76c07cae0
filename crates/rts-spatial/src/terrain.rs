//! Terrain height queries.
//!
//! # Pluggability
//!
//! The core only ever asks "how high is the ground at (x, z)?", via the
//! [`HeightField`] trait.  Mesh generation lives outside the core; the two
//! implementations here cover flat test worlds and sampling a pre-built
//! height grid.

use crate::{SpatialError, SpatialResult};

/// Deterministic ground-height lookup.
pub trait HeightField: Send + Sync {
    /// Ground height at world coordinates `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// A level plane at a fixed height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    pub height: f32,
}

impl FlatTerrain {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl HeightField for FlatTerrain {
    #[inline]
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

/// A square-cell height grid centred on the origin.
///
/// The grid covers `[-width/2, width/2] × [-depth/2, depth/2]` with
/// `segments` cells per side and `(segments + 1)²` vertex samples stored
/// row-major by z.  Lookups snap to the vertex at the lower-left corner of
/// the containing cell; points outside the grid read as height 0.
#[derive(Debug, Clone)]
pub struct GridTerrain {
    width:    f32,
    depth:    f32,
    segments: usize,
    heights:  Vec<f32>,
}

impl GridTerrain {
    /// Wrap an existing sample grid.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::GridSize`] if `heights.len() != (segments + 1)²`
    /// and [`SpatialError::Extent`] if either extent is not positive.
    pub fn new(width: f32, depth: f32, segments: usize, heights: Vec<f32>) -> SpatialResult<Self> {
        if !(width > 0.0 && depth > 0.0) {
            return Err(SpatialError::Extent { width, depth });
        }
        let expected = (segments + 1) * (segments + 1);
        if segments == 0 || heights.len() != expected {
            return Err(SpatialError::GridSize { segments, expected, got: heights.len() });
        }
        Ok(Self { width, depth, segments, heights })
    }

    /// Build a grid by sampling `f(x, z)` at every vertex.
    pub fn from_fn<F>(width: f32, depth: f32, segments: usize, mut f: F) -> SpatialResult<Self>
    where
        F: FnMut(f32, f32) -> f32,
    {
        let side = segments + 1;
        let mut heights = Vec::with_capacity(side * side);
        for gz in 0..side {
            for gx in 0..side {
                let x = -width / 2.0 + width * gx as f32 / segments.max(1) as f32;
                let z = -depth / 2.0 + depth * gz as f32 / segments.max(1) as f32;
                heights.push(f(x, z));
            }
        }
        Self::new(width, depth, segments, heights)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl HeightField for GridTerrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let segs = self.segments as f32;
        let gx = ((x + self.width / 2.0) / self.width * segs).floor();
        let gz = ((z + self.depth / 2.0) / self.depth * segs).floor();
        if !(gx >= 0.0 && gx < segs && gz >= 0.0 && gz < segs) {
            return 0.0;
        }
        let idx = gz as usize * (self.segments + 1) + gx as usize;
        self.heights.get(idx).copied().unwrap_or(0.0)
    }
}
