#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the kitchen planner.
//!
//! This crate defines the value types stored inside a kitchen layout and the
//! message surface used to mutate it. Adapters describe desired edits as
//! [`Command`] values, the layout crate executes them against its dual grid,
//! and editor systems batch and snapshot those edits. Placed appliances are
//! [`Square`] values referencing an [`ApplianceCatalog`] entry, while wall
//! segments and the junctions between them carry a [`WallStyle`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest tile row or column whose grid coordinate fits in a `u32`.
pub const MAX_TILE_INDEX: u32 = u32::MAX / 2;

/// Location of a single cell inside the dual grid.
///
/// Rows and columns address the interleaved grid, not tiles: tile `(r, c)`
/// lives at grid coordinate `(2r, 2c)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    row: u32,
    column: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Grid coordinate of the tile located at the provided tile row and column.
    ///
    /// # Panics
    ///
    /// Panics if either index exceeds [`MAX_TILE_INDEX`].
    #[must_use]
    pub const fn tile(tile_row: u32, tile_column: u32) -> Self {
        assert!(
            tile_row <= MAX_TILE_INDEX && tile_column <= MAX_TILE_INDEX,
            "tile index exceeds the grid coordinate range"
        );
        Self::new(tile_row * 2, tile_column * 2)
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Classifies the cell by the parity of its coordinates.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        CellKind::of(*self)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Role a cell plays inside the dual grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Even row and even column; holds an optional [`Square`].
    Tile,
    /// Exactly one odd coordinate; the wall segment between two tiles.
    Edge,
    /// Odd row and odd column; the junction where up to four edges meet.
    Corner,
}

impl CellKind {
    /// Classifies the provided coordinate.
    #[must_use]
    pub const fn of(coord: GridCoord) -> Self {
        match (coord.row % 2 == 0, coord.column % 2 == 0) {
            (true, true) => Self::Tile,
            (false, false) => Self::Corner,
            _ => Self::Edge,
        }
    }

    /// Reports whether cells of this kind hold a [`WallStyle`].
    #[must_use]
    pub const fn holds_wall(self) -> bool {
        !matches!(self, Self::Tile)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Tile => "tile",
            Self::Edge => "edge",
            Self::Corner => "corner",
        };
        f.write_str(label)
    }
}

/// Quarter-turn orientation of a placed appliance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Unrotated.
    #[default]
    Deg0,
    /// Rotated a quarter turn clockwise.
    Deg90,
    /// Rotated a half turn.
    Deg180,
    /// Rotated three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// Rotation expressed in whole degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Parses a rotation from whole degrees. Only exact quarter turns are accepted.
    #[must_use]
    pub const fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Rotation obtained after turning a quarter turn counter-clockwise.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg270,
            Self::Deg90 => Self::Deg0,
            Self::Deg180 => Self::Deg90,
            Self::Deg270 => Self::Deg180,
        }
    }

    /// Rotation obtained after turning a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

/// Position of an appliance within the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplianceIndex(u32);

impl ApplianceIndex {
    /// Creates a new catalog index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Appliance placed on a tile.
///
/// Two squares referencing the same catalog entry are independent values;
/// rotating one never affects the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    appliance: ApplianceIndex,
    rotation: Rotation,
}

impl Square {
    /// Creates an unrotated square for the provided appliance.
    #[must_use]
    pub const fn new(appliance: ApplianceIndex) -> Self {
        Self {
            appliance,
            rotation: Rotation::Deg0,
        }
    }

    /// Overrides the rotation of the square.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Catalog entry the square was placed from.
    #[must_use]
    pub const fn appliance(&self) -> ApplianceIndex {
        self.appliance
    }

    /// Current orientation of the square.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Turns the square a quarter turn counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.rotated_left();
    }

    /// Turns the square a quarter turn clockwise.
    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.rotated_right();
    }
}

/// Style of a wall segment or wall junction.
///
/// Variants are ordered by visual precedence: a junction takes the strongest
/// style of its neighbouring segments.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WallStyle {
    /// No wall.
    #[default]
    Empty,
    /// Half-height counter wall.
    Half,
    /// Full wall.
    Wall,
}

impl WallStyle {
    /// Stable numeric code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Half => 1,
            Self::Wall => 2,
        }
    }

    /// Maps a wire code back onto its wall style.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Half),
            2 => Some(Self::Wall),
            _ => None,
        }
    }

    /// Next style in the Empty, Half, Wall toggle cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Empty => Self::Half,
            Self::Half => Self::Wall,
            Self::Wall => Self::Empty,
        }
    }
}

/// Value written into a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    /// Tile content; `None` is the empty tile.
    Tile(Option<Square>),
    /// Edge or corner content.
    Wall(WallStyle),
}

impl CellContent {
    /// Tile content with nothing placed on it.
    pub const EMPTY_TILE: Self = Self::Tile(None);

    /// Kind of content carried, used for mismatch reporting.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tile(_) => "tile content",
            Self::Wall(_) => "wall content",
        }
    }

    /// Reports whether the content may be written into a cell of the provided kind.
    #[must_use]
    pub const fn fits(&self, kind: CellKind) -> bool {
        match self {
            Self::Tile(_) => !kind.holds_wall(),
            Self::Wall(_) => kind.holds_wall(),
        }
    }
}

impl From<Square> for CellContent {
    fn from(square: Square) -> Self {
        Self::Tile(Some(square))
    }
}

impl From<WallStyle> for CellContent {
    fn from(style: WallStyle) -> Self {
        Self::Wall(style)
    }
}

/// Commands that express all permissible layout mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Places a square on a tile, displacing anything already there.
    PlaceSquare {
        /// Tile cell receiving the square.
        at: GridCoord,
        /// Square to place.
        square: Square,
    },
    /// Empties a tile.
    ClearTile {
        /// Tile cell to empty.
        at: GridCoord,
    },
    /// Writes a wall style into an edge or corner cell.
    SetWall {
        /// Edge or corner cell receiving the style.
        at: GridCoord,
        /// Style to write.
        style: WallStyle,
    },
    /// Exchanges the contents of two tiles.
    SwapSquares {
        /// First tile cell.
        from: GridCoord,
        /// Second tile cell.
        to: GridCoord,
    },
    /// Turns the square on a tile a quarter turn counter-clockwise.
    RotateLeft {
        /// Tile cell holding the square.
        at: GridCoord,
    },
    /// Turns the square on a tile a quarter turn clockwise.
    RotateRight {
        /// Tile cell holding the square.
        at: GridCoord,
    },
    /// Advances an edge or corner to the next style in the toggle cycle.
    ToggleWall {
        /// Edge or corner cell to toggle.
        at: GridCoord,
    },
    /// Clears every wall segment and junction.
    RemoveWalls,
    /// Clears every tile.
    RemoveSquares,
}

impl Command {
    /// Reports whether applying the command may leave wall junctions stale.
    #[must_use]
    pub const fn touches_walls(&self) -> bool {
        matches!(
            self,
            Self::SetWall { .. } | Self::ToggleWall { .. } | Self::RemoveWalls
        )
    }
}

/// Entry of the appliance catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appliance {
    /// Human-readable appliance name.
    pub name: String,
    /// Reference to the asset used to display the appliance.
    pub asset: String,
}

impl Appliance {
    /// Creates a new catalog entry.
    #[must_use]
    pub fn new(name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
        }
    }
}

/// Ordered list of appliances addressable by [`ApplianceIndex`].
pub trait ApplianceCatalog {
    /// Appliances in catalog order.
    fn appliances(&self) -> &[Appliance];

    /// Looks up the appliance stored at the provided index.
    fn appliance(&self, index: ApplianceIndex) -> Option<&Appliance> {
        usize::try_from(index.get())
            .ok()
            .and_then(|index| self.appliances().get(index))
    }

    /// Number of appliances in the catalog.
    fn len(&self) -> usize {
        self.appliances().len()
    }

    /// Reports whether the catalog has no entries.
    fn is_empty(&self) -> bool {
        self.appliances().is_empty()
    }
}

/// Catalog backed by an in-memory list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    appliances: Vec<Appliance>,
}

impl StaticCatalog {
    /// Creates a catalog from the provided ordered entries.
    #[must_use]
    pub fn new(appliances: Vec<Appliance>) -> Self {
        Self { appliances }
    }
}

impl ApplianceCatalog for StaticCatalog {
    fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }
}

/// Errors raised by layout operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Tile content was written into a wall cell or wall content into a tile.
    #[error("cannot place {content} on {kind} cell {at}")]
    TypeKindMismatch {
        /// Targeted cell.
        at: GridCoord,
        /// Kind of the targeted cell.
        kind: CellKind,
        /// Kind of content that was offered.
        content: &'static str,
    },
    /// A swap referenced a cell that is not a tile.
    #[error("cannot swap {kind} cell {at}; only tiles can be swapped")]
    InvalidSwapTarget {
        /// Offending cell.
        at: GridCoord,
        /// Kind of the offending cell.
        kind: CellKind,
    },
    /// A rotation targeted a cell that is not a tile.
    #[error("cannot rotate {kind} cell {at}; only tiles can be rotated")]
    NotRotatable {
        /// Offending cell.
        at: GridCoord,
        /// Kind of the offending cell.
        kind: CellKind,
    },
    /// A coordinate fell outside the grid.
    #[error("cell {at} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Offending cell.
        at: GridCoord,
        /// Number of grid rows.
        rows: u32,
        /// Number of grid columns.
        columns: u32,
    },
    /// Encoded layout input failed validation.
    #[error("malformed layout: {0}")]
    MalformedLayout(#[from] MalformedLayout),
}

/// Reasons an encoded layout is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedLayout {
    /// The text could not be parsed into the encoded structure.
    #[error("could not parse layout text: {0}")]
    Unparsable(String),
    /// Declared dimensions were not positive.
    #[error("dimensions {height}x{width} must both be positive")]
    InvalidDimensions {
        /// Declared tile rows.
        height: i64,
        /// Declared tile columns.
        width: i64,
    },
    /// The matrix row count disagrees with the declared height.
    #[error("expected {expected} grid rows, found {found}")]
    RowCount {
        /// Rows implied by the declared height.
        expected: usize,
        /// Rows present in the matrix.
        found: usize,
    },
    /// A matrix row length disagrees with the declared width.
    #[error("expected {expected} cells in grid row {row}, found {found}")]
    ColumnCount {
        /// Offending grid row.
        row: usize,
        /// Cells implied by the declared width.
        expected: usize,
        /// Cells present in the row.
        found: usize,
    },
    /// A tile entry appeared on a wall cell or a wall entry on a tile.
    #[error("{kind} cell {at} holds a mismatched entry")]
    MisplacedEntry {
        /// Offending cell.
        at: GridCoord,
        /// Kind of the offending cell.
        kind: CellKind,
    },
    /// A tile referenced an appliance outside the catalog.
    #[error("appliance index {index} at {at} is outside the catalog of {available} entries")]
    UnknownAppliance {
        /// Offending cell.
        at: GridCoord,
        /// Encoded catalog index.
        index: i64,
        /// Catalog length.
        available: usize,
    },
    /// A tile carried a rotation that is not a quarter turn.
    #[error("rotation {degrees} at {at} is not a quarter turn")]
    InvalidRotation {
        /// Offending cell.
        at: GridCoord,
        /// Encoded rotation.
        degrees: i64,
    },
    /// A wall cell carried an unknown style code.
    #[error("wall code {code} at {at} is not recognised")]
    InvalidWallCode {
        /// Offending cell.
        at: GridCoord,
        /// Encoded style code.
        code: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        Appliance, ApplianceCatalog, ApplianceIndex, CellContent, CellKind, Command, GridCoord,
        Rotation, Square, StaticCatalog, WallStyle, MAX_TILE_INDEX,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn parity_classifies_cells() {
        assert_eq!(GridCoord::new(0, 0).kind(), CellKind::Tile);
        assert_eq!(GridCoord::new(4, 2).kind(), CellKind::Tile);
        assert_eq!(GridCoord::new(0, 1).kind(), CellKind::Edge);
        assert_eq!(GridCoord::new(3, 2).kind(), CellKind::Edge);
        assert_eq!(GridCoord::new(1, 1).kind(), CellKind::Corner);
        assert_eq!(GridCoord::tile(2, 3), GridCoord::new(4, 6));
    }

    #[test]
    fn four_right_turns_return_to_start() {
        let mut rotation = Rotation::Deg90;
        for _ in 0..4 {
            rotation = rotation.rotated_right();
        }
        assert_eq!(rotation, Rotation::Deg90);
        assert_eq!(Rotation::Deg0.rotated_left(), Rotation::Deg270);
        assert_eq!(
            Rotation::Deg180.rotated_left().rotated_right(),
            Rotation::Deg180
        );
    }

    #[test]
    fn rotation_degrees_accept_only_quarter_turns() {
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(360), None);
        assert_eq!(Rotation::Deg180.degrees(), 180);
    }

    #[test]
    fn wall_styles_order_by_precedence() {
        assert!(WallStyle::Wall > WallStyle::Half);
        assert!(WallStyle::Half > WallStyle::Empty);
        for style in [WallStyle::Empty, WallStyle::Half, WallStyle::Wall] {
            assert_eq!(WallStyle::from_code(style.code()), Some(style));
        }
        assert_eq!(WallStyle::from_code(3), None);
        assert_eq!(WallStyle::Wall.next(), WallStyle::Empty);
    }

    #[test]
    fn content_fits_matching_cells_only() {
        let square = CellContent::from(Square::new(ApplianceIndex::new(0)));
        assert!(square.fits(CellKind::Tile));
        assert!(!square.fits(CellKind::Edge));
        assert!(CellContent::EMPTY_TILE.fits(CellKind::Tile));
        assert!(CellContent::from(WallStyle::Half).fits(CellKind::Corner));
        assert!(!CellContent::from(WallStyle::Half).fits(CellKind::Tile));
    }

    #[test]
    fn catalog_lookup_respects_bounds() {
        let catalog = StaticCatalog::new(vec![
            Appliance::new("Counter", "counter.png"),
            Appliance::new("Hob", "hob.png"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.appliance(ApplianceIndex::new(1)).map(|a| a.name.as_str()),
            Some("Hob")
        );
        assert!(catalog.appliance(ApplianceIndex::new(2)).is_none());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let decoded: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&decoded, value);
    }

    #[test]
    fn command_batches_round_trip_through_bincode() {
        let batch = vec![
            Command::PlaceSquare {
                at: GridCoord::new(0, 0),
                square: Square::new(ApplianceIndex::new(3)).with_rotation(Rotation::Deg90),
            },
            Command::SetWall {
                at: GridCoord::new(0, 1),
                style: WallStyle::Half,
            },
            Command::ToggleWall {
                at: GridCoord::new(1, 1),
            },
            Command::RemoveSquares,
        ];
        assert_round_trip(&batch);
    }

    #[test]
    fn toggles_count_as_wall_edits() {
        assert!(Command::ToggleWall {
            at: GridCoord::new(0, 1)
        }
        .touches_walls());
        assert!(!Command::RotateLeft {
            at: GridCoord::new(0, 0)
        }
        .touches_walls());
    }

    #[test]
    fn largest_tile_index_maps_onto_the_grid() {
        let at = GridCoord::tile(MAX_TILE_INDEX, 0);
        assert_eq!(at.row(), u32::MAX - 1);
        assert_eq!(at.kind(), CellKind::Tile);
    }

    #[test]
    #[should_panic(expected = "tile index exceeds the grid coordinate range")]
    fn tile_indices_beyond_the_grid_range_panic() {
        let _ = GridCoord::tile(MAX_TILE_INDEX + 1, 0);
    }
}
