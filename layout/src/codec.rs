//! Structured wire format used to persist and share layouts.
//!
//! Every grid cell is encoded, junctions included, so decoding never has to
//! re-derive anything:
//!
//! ```text
//! { "height": 2, "width": 2,
//!   "layout": [[[3, 90], [2], [-1, 0]],
//!              [[0],     [2], [0]],
//!              [[-1, 0], [0], [-1, 0]]] }
//! ```
//!
//! Tiles are `[catalog_index, rotation_degrees]` with `-1` marking an empty
//! tile; edges and corners are `[wall_code]`.

use std::num::NonZeroU32;

use kitchen_planner_core::{
    ApplianceCatalog, ApplianceIndex, CellContent, CellKind, GridCoord, LayoutError,
    MalformedLayout, Rotation, Square, WallStyle,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Layout, MAX_TILES};

/// Catalog index written for a tile with nothing placed on it.
pub const EMPTY_TILE_INDEX: i64 = -1;

/// Canonical serializable representation of a [`Layout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedLayout {
    /// Number of tile rows.
    pub height: i64,
    /// Number of tile columns.
    pub width: i64,
    /// Full dual grid, row-major.
    pub layout: Vec<Vec<EncodedCell>>,
}

/// Encoded content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedCell {
    /// `[catalog_index, rotation_degrees]`.
    Tile([i64; 2]),
    /// `[wall_code]`.
    Wall([i64; 1]),
}

impl EncodedCell {
    fn from_content(content: CellContent) -> Self {
        match content {
            CellContent::Tile(None) => Self::Tile([EMPTY_TILE_INDEX, 0]),
            CellContent::Tile(Some(square)) => Self::Tile([
                i64::from(square.appliance().get()),
                i64::from(square.rotation().degrees()),
            ]),
            CellContent::Wall(style) => Self::Wall([i64::from(style.code())]),
        }
    }

    fn to_content(
        self,
        at: GridCoord,
        catalog: &impl ApplianceCatalog,
    ) -> Result<CellContent, MalformedLayout> {
        let kind = at.kind();
        match (self, kind) {
            (Self::Tile([EMPTY_TILE_INDEX, _]), CellKind::Tile) => Ok(CellContent::EMPTY_TILE),
            (Self::Tile([index, degrees]), CellKind::Tile) => {
                let appliance = u32::try_from(index)
                    .ok()
                    .map(ApplianceIndex::new)
                    .filter(|appliance| catalog.appliance(*appliance).is_some())
                    .ok_or(MalformedLayout::UnknownAppliance {
                        at,
                        index,
                        available: catalog.len(),
                    })?;
                let rotation = u32::try_from(degrees)
                    .ok()
                    .and_then(Rotation::from_degrees)
                    .ok_or(MalformedLayout::InvalidRotation { at, degrees })?;
                Ok(Square::new(appliance).with_rotation(rotation).into())
            }
            (Self::Wall([code]), CellKind::Edge | CellKind::Corner) => u8::try_from(code)
                .ok()
                .and_then(WallStyle::from_code)
                .map(CellContent::Wall)
                .ok_or(MalformedLayout::InvalidWallCode { at, code }),
            _ => Err(MalformedLayout::MisplacedEntry { at, kind }),
        }
    }
}

impl EncodedLayout {
    /// Renders the encoded layout as compact JSON text.
    #[must_use]
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).expect("encoded layout serialization never fails")
    }

    /// Parses JSON text into an encoded layout without validating its shape.
    pub fn from_text(text: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(text)
            .map_err(|error| MalformedLayout::Unparsable(error.to_string()).into())
    }

    /// Checks the declared dimensions against the matrix shape.
    fn dimensions(&self) -> Result<(NonZeroU32, NonZeroU32), MalformedLayout> {
        let invalid = || MalformedLayout::InvalidDimensions {
            height: self.height,
            width: self.width,
        };
        let height = positive_dimension(self.height).ok_or_else(invalid)?;
        let width = positive_dimension(self.width).ok_or_else(invalid)?;

        let expected_rows = span(height);
        if self.layout.len() != expected_rows {
            return Err(MalformedLayout::RowCount {
                expected: expected_rows,
                found: self.layout.len(),
            });
        }
        let expected_columns = span(width);
        for (row, cells) in self.layout.iter().enumerate() {
            if cells.len() != expected_columns {
                return Err(MalformedLayout::ColumnCount {
                    row,
                    expected: expected_columns,
                    found: cells.len(),
                });
            }
        }

        Ok((height, width))
    }
}

impl Layout {
    /// Encodes every cell of the layout into its wire representation.
    #[must_use]
    pub fn encode(&self) -> EncodedLayout {
        let columns = self.columns() as usize;
        let mut layout = Vec::with_capacity(self.rows() as usize);
        let mut row = Vec::with_capacity(columns);
        for at in self.coords() {
            let content = self.content(at).unwrap_or(CellContent::EMPTY_TILE);
            row.push(EncodedCell::from_content(content));
            if row.len() == columns {
                layout.push(std::mem::replace(&mut row, Vec::with_capacity(columns)));
            }
        }

        EncodedLayout {
            height: i64::from(self.height()),
            width: i64::from(self.width()),
            layout,
        }
    }

    /// Parses and validates shared layout text.
    ///
    /// Squares are registered in row-major scan order. Junction styles are
    /// taken verbatim from the input rather than re-derived.
    pub fn decode(text: &str, catalog: &impl ApplianceCatalog) -> Result<Self, LayoutError> {
        let decoded = EncodedLayout::from_text(text)
            .and_then(|encoded| Self::from_encoded(&encoded, catalog));
        if let Err(error) = &decoded {
            debug!(%error, "rejected encoded layout");
        }
        decoded
    }

    /// Rebuilds a layout from an already parsed [`EncodedLayout`].
    pub fn from_encoded(
        encoded: &EncodedLayout,
        catalog: &impl ApplianceCatalog,
    ) -> Result<Self, LayoutError> {
        let (height, width) = encoded.dimensions()?;
        let mut layout = Self::new(height, width);
        for (row, cells) in (0u32..).zip(&encoded.layout) {
            for (column, cell) in (0u32..).zip(cells) {
                let at = GridCoord::new(row, column);
                layout.set_element(at, cell.to_content(at, catalog)?)?;
            }
        }
        Ok(layout)
    }
}

/// Largest tile count whose dual grid span still fits in a `u32`.
fn positive_dimension(value: i64) -> Option<NonZeroU32> {
    if value > i64::from(MAX_TILES) {
        return None;
    }
    u32::try_from(value).ok().and_then(NonZeroU32::new)
}

fn span(tiles: NonZeroU32) -> usize {
    (tiles.get() as usize - 1) * 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_planner_core::{Appliance, StaticCatalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            Appliance::new("Counter", "counter.png"),
            Appliance::new("Hob", "hob.png"),
        ])
    }

    #[test]
    fn cells_serialize_as_bare_arrays() {
        let row = vec![
            EncodedCell::Tile([1, 270]),
            EncodedCell::Wall([2]),
            EncodedCell::Tile([EMPTY_TILE_INDEX, 0]),
        ];
        let json = serde_json::to_string(&row).expect("cells serialize");
        assert_eq!(json, "[[1,270],[2],[-1,0]]");

        let parsed: Vec<EncodedCell> = serde_json::from_str(&json).expect("cells parse");
        assert_eq!(parsed, row);
    }

    #[test]
    fn empty_tile_ignores_encoded_rotation() {
        let content = EncodedCell::Tile([EMPTY_TILE_INDEX, 180])
            .to_content(GridCoord::new(0, 0), &catalog())
            .expect("empty tile decodes");
        assert_eq!(content, CellContent::EMPTY_TILE);
    }

    #[test]
    fn negative_indices_other_than_sentinel_are_unknown() {
        let error = EncodedCell::Tile([-2, 0])
            .to_content(GridCoord::new(2, 2), &catalog())
            .expect_err("negative index rejected");
        assert_eq!(
            error,
            MalformedLayout::UnknownAppliance {
                at: GridCoord::new(2, 2),
                index: -2,
                available: 2,
            }
        );
    }

    #[test]
    fn oversized_dimensions_are_rejected_before_allocation() {
        let encoded = EncodedLayout {
            height: i64::from(u32::MAX),
            width: 1,
            layout: Vec::new(),
        };
        assert!(matches!(
            encoded.dimensions(),
            Err(MalformedLayout::InvalidDimensions { .. })
        ));
    }
}
