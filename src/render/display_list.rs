use crate::{
    foundation::{
        color::Rgba8,
        core::{Affine, BezPath, Canvas},
    },
    render::surface::{Brush, Surface},
};

/// One recorded paint command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Rgba8,
    },
    FillPath {
        path: BezPath,
        transform: Affine,
        brush: Brush,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        brush: Brush,
        width: f64,
    },
}

impl DrawOp {
    pub fn transform(&self) -> Option<Affine> {
        match self {
            Self::Clear { .. } => None,
            Self::FillPath { transform, .. } | Self::StrokePath { transform, .. } => {
                Some(*transform)
            }
        }
    }

    pub fn brush(&self) -> Option<&Brush> {
        match self {
            Self::Clear { .. } => None,
            Self::FillPath { brush, .. } | Self::StrokePath { brush, .. } => Some(brush),
        }
    }
}

/// A recording [`Surface`]: every call becomes a [`DrawOp`], in order.
///
/// Frames are recorded first and rasterized afterwards by a
/// [`RenderBackend`](crate::RenderBackend); tests inspect the ops directly.
#[derive(Clone, Debug)]
pub struct DisplayList {
    canvas: Canvas,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillPath { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
    }
}

impl Surface for DisplayList {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgba8) {
        self.ops.push(DrawOp::Clear { color });
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, brush: &Brush) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            transform,
            brush: brush.clone(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, brush: &Brush, width: f64) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            transform,
            brush: brush.clone(),
            width,
        });
    }
}
