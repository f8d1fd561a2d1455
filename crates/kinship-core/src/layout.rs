//! Generation-row layout for fixed-size member cards

use crate::member::MemberId;
use crate::tree::FamilyTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-left corner of a card, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Card geometry and spacing, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub card_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 200.0,
            card_height: 100.0,
            horizontal_gap: 40.0,
            vertical_gap: 80.0,
        }
    }
}

impl LayoutConfig {
    /// Distance between the left edges of neighbouring cards
    pub fn column_step(&self) -> f64 {
        self.card_width + self.horizontal_gap
    }

    /// Distance between the top edges of neighbouring rows
    pub fn row_step(&self) -> f64 {
        self.card_height + self.vertical_gap
    }

    /// Width of a row of `n` cards, gaps included
    pub fn row_width(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        n as f64 * self.column_step() - self.horizontal_gap
    }
}

/// Extents of a layout, card sizes included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Absolute card positions for every member reachable from the root
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    positions: HashMap<MemberId, Position>,
    #[serde(skip)]
    config: LayoutConfig,
}

impl Layout {
    pub fn get(&self, id: &MemberId) -> Option<&Position> {
        self.positions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &Position)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Smallest box containing every card, or `None` for an empty layout
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.positions.values();
        let first = positions.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x + self.config.card_width,
            max_y: first.y + self.config.card_height,
        };
        for pos in positions {
            bounds.min_x = bounds.min_x.min(pos.x);
            bounds.min_y = bounds.min_y.min(pos.y);
            bounds.max_x = bounds.max_x.max(pos.x + self.config.card_width);
            bounds.max_y = bounds.max_y.max(pos.y + self.config.card_height);
        }
        Some(bounds)
    }
}

/// Lay out each generation as a row centred on x = 0
///
/// Rows sit at `level * (card_height + vertical_gap)`; a gap in the level
/// sequence leaves an empty row. Members the walk never reaches get no
/// position.
pub fn layout(tree: &FamilyTree, config: &LayoutConfig) -> Layout {
    let mut positions = HashMap::with_capacity(tree.len());

    for (level, row) in tree.generations() {
        let start_x = -config.row_width(row.len()) / 2.0;
        let y = f64::from(level) * config.row_step();

        for (i, idx) in row.into_iter().enumerate() {
            let x = start_x + i as f64 * config.column_step();
            positions.insert(tree.node(idx).id().clone(), Position::new(x, y));
        }
    }

    tracing::debug!("Laid out {} of {} members", positions.len(), tree.len());

    Layout {
        positions,
        config: *config,
    }
}
