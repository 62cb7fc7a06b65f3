//! Shape catalog
//!
//! The fixed set of polyominoes the tray draws from. Cell offsets are added
//! directly to the anchor a shape is dropped at, so they are not normalized:
//! `l-shape-rev` has no cell at (0, 0).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Position;

/// A catalog shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "line-h-2")]
    LineH2,
    #[serde(rename = "line-h-3")]
    LineH3,
    #[serde(rename = "line-v-2")]
    LineV2,
    #[serde(rename = "line-v-3")]
    LineV3,
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "l-shape")]
    LShape,
    #[serde(rename = "l-shape-rev")]
    LShapeRev,
    #[serde(rename = "t-shape")]
    TShape,
    #[serde(rename = "corner")]
    Corner,
}

const SINGLE: &[Position] = &[Position::new(0, 0)];
const LINE_H_2: &[Position] = &[Position::new(0, 0), Position::new(0, 1)];
const LINE_H_3: &[Position] = &[Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
const LINE_V_2: &[Position] = &[Position::new(0, 0), Position::new(1, 0)];
const LINE_V_3: &[Position] = &[Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
const SQUARE: &[Position] = &[
    Position::new(0, 0),
    Position::new(0, 1),
    Position::new(1, 0),
    Position::new(1, 1),
];
const L_SHAPE: &[Position] = &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
const L_SHAPE_REV: &[Position] = &[Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)];
const T_SHAPE: &[Position] = &[
    Position::new(0, 0),
    Position::new(0, 1),
    Position::new(0, 2),
    Position::new(1, 1),
];
// Same footprint as `l-shape`; the catalog keeps both as separate entries
const CORNER: &[Position] = &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];

impl ShapeKind {
    /// Every catalog shape, in catalog order
    pub const ALL: [ShapeKind; 10] = [
        ShapeKind::Single,
        ShapeKind::LineH2,
        ShapeKind::LineH3,
        ShapeKind::LineV2,
        ShapeKind::LineV3,
        ShapeKind::Square,
        ShapeKind::LShape,
        ShapeKind::LShapeRev,
        ShapeKind::TShape,
        ShapeKind::Corner,
    ];

    /// Stable catalog identifier
    pub fn id(&self) -> &'static str {
        match self {
            ShapeKind::Single => "single",
            ShapeKind::LineH2 => "line-h-2",
            ShapeKind::LineH3 => "line-h-3",
            ShapeKind::LineV2 => "line-v-2",
            ShapeKind::LineV3 => "line-v-3",
            ShapeKind::Square => "square",
            ShapeKind::LShape => "l-shape",
            ShapeKind::LShapeRev => "l-shape-rev",
            ShapeKind::TShape => "t-shape",
            ShapeKind::Corner => "corner",
        }
    }

    /// Look up a shape by catalog identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Relative cell offsets
    pub fn cells(&self) -> &'static [Position] {
        match self {
            ShapeKind::Single => SINGLE,
            ShapeKind::LineH2 => LINE_H_2,
            ShapeKind::LineH3 => LINE_H_3,
            ShapeKind::LineV2 => LINE_V_2,
            ShapeKind::LineV3 => LINE_V_3,
            ShapeKind::Square => SQUARE,
            ShapeKind::LShape => L_SHAPE,
            ShapeKind::LShapeRev => L_SHAPE_REV,
            ShapeKind::TShape => T_SHAPE,
            ShapeKind::Corner => CORNER,
        }
    }

    /// Number of cells (points awarded for placing it)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells().len()
    }

    /// Uniform draw from the catalog
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}
