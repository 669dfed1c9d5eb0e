#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative kitchen layout state.
//!
//! A [`Layout`] interleaves floor tiles and wall segments in one dual grid of
//! `(2 * height - 1) x (2 * width - 1)` cells. Tiles sit at even/even
//! coordinates, wall segments between two tiles at coordinates with exactly
//! one odd component, and wall junctions at odd/odd coordinates. Junction
//! styles are derived from the surrounding segments by
//! [`Layout::fix_corner_walls`].

use std::num::NonZeroU32;

use kitchen_planner_core::{
    CellContent, CellKind, Command, GridCoord, LayoutError, Square, WallStyle, MAX_TILE_INDEX,
};
use tracing::trace;

mod codec;
mod squares;

pub use codec::{EncodedCell, EncodedLayout, EMPTY_TILE_INDEX};
pub use squares::SquareId;

use squares::SquareRegistry;

/// Largest number of tile rows or columns a layout can hold.
pub const MAX_TILES: u32 = MAX_TILE_INDEX + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Tile(Option<SquareId>),
    Wall(WallStyle),
}

/// Kitchen layout stored as a dual grid of tiles and walls.
#[derive(Debug)]
pub struct Layout {
    height: NonZeroU32,
    width: NonZeroU32,
    cells: Vec<Cell>,
    squares: SquareRegistry,
}

impl Layout {
    /// Creates a layout with every tile empty and every wall cleared.
    ///
    /// # Panics
    ///
    /// Panics if either dimension exceeds [`MAX_TILES`].
    #[must_use]
    pub fn new(height: NonZeroU32, width: NonZeroU32) -> Self {
        assert!(
            height.get() <= MAX_TILES && width.get() <= MAX_TILES,
            "layout dimensions exceed the grid coordinate range"
        );
        let rows = grid_span(height);
        let columns = grid_span(width);
        let mut cells = Vec::with_capacity(rows as usize * columns as usize);
        for row in 0..rows {
            for column in 0..columns {
                let cell = match CellKind::of(GridCoord::new(row, column)) {
                    CellKind::Tile => Cell::Tile(None),
                    CellKind::Edge | CellKind::Corner => Cell::Wall(WallStyle::Empty),
                };
                cells.push(cell);
            }
        }

        Self {
            height,
            width,
            cells,
            squares: SquareRegistry::default(),
        }
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// Number of rows in the dual grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        grid_span(self.height)
    }

    /// Number of columns in the dual grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        grid_span(self.width)
    }

    /// Every grid coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let columns = self.columns();
        (0..self.rows())
            .flat_map(move |row| (0..columns).map(move |column| GridCoord::new(row, column)))
    }

    /// Reads the content stored at the provided cell.
    pub fn content(&self, at: GridCoord) -> Result<CellContent, LayoutError> {
        let index = self.index(at)?;
        Ok(match self.cells[index] {
            Cell::Tile(id) => CellContent::Tile(id.and_then(|id| self.squares.get(id)).copied()),
            Cell::Wall(style) => CellContent::Wall(style),
        })
    }

    /// Square placed at the provided cell, if any.
    #[must_use]
    pub fn square(&self, at: GridCoord) -> Option<&Square> {
        match self.cells.get(self.index(at).ok()?)? {
            Cell::Tile(Some(id)) => self.squares.get(*id),
            _ => None,
        }
    }

    /// Wall style stored at the provided edge or corner cell.
    #[must_use]
    pub fn wall(&self, at: GridCoord) -> Option<WallStyle> {
        match self.cells.get(self.index(at).ok()?)? {
            Cell::Wall(style) => Some(*style),
            Cell::Tile(_) => None,
        }
    }

    /// Placed squares in the order they were placed.
    pub fn elements(&self) -> impl Iterator<Item = (SquareId, &Square)> + '_ {
        self.squares.iter()
    }

    /// Number of placed squares.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.squares.len()
    }

    /// Placed squares paired with their grid coordinate, in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = (GridCoord, &Square)> + '_ {
        self.coords().zip(self.cells.iter()).filter_map(|(at, cell)| match cell {
            Cell::Tile(Some(id)) => self.squares.get(*id).map(|square| (at, square)),
            _ => None,
        })
    }

    /// Writes content into a cell.
    ///
    /// Tile content is only accepted by tiles and wall content only by edges
    /// and corners. A square displaced by the write is dropped from
    /// [`Layout::elements`]. Junction styles are not refreshed; call
    /// [`Layout::fix_corner_walls`] once a batch of wall edits is complete.
    pub fn set_element(
        &mut self,
        at: GridCoord,
        content: impl Into<CellContent>,
    ) -> Result<(), LayoutError> {
        let content = content.into();
        let kind = at.kind();
        if !content.fits(kind) {
            return Err(LayoutError::TypeKindMismatch {
                at,
                kind,
                content: content.label(),
            });
        }
        let index = self.index(at)?;

        if let Cell::Tile(Some(displaced)) = self.cells[index] {
            let _ = self.squares.remove(displaced);
        }

        let cell = match content {
            CellContent::Tile(square) => Cell::Tile(square.map(|square| self.squares.insert(square))),
            CellContent::Wall(style) => Cell::Wall(style),
        };
        self.cells[index] = cell;
        trace!(%at, ?content, "cell written");
        Ok(())
    }

    /// Exchanges the contents of two tiles without altering either square.
    pub fn swap_elements(&mut self, first: GridCoord, second: GridCoord) -> Result<(), LayoutError> {
        for at in [first, second] {
            let kind = at.kind();
            if kind != CellKind::Tile {
                return Err(LayoutError::InvalidSwapTarget { at, kind });
            }
        }
        let first_index = self.index(first)?;
        let second_index = self.index(second)?;
        self.cells.swap(first_index, second_index);
        trace!(%first, %second, "tiles swapped");
        Ok(())
    }

    /// Turns the square on a tile a quarter turn counter-clockwise.
    ///
    /// Rotating an empty tile succeeds without effect.
    pub fn rotate_left(&mut self, at: GridCoord) -> Result<(), LayoutError> {
        if let Some(square) = self.rotatable_square(at)? {
            square.rotate_left();
        }
        Ok(())
    }

    /// Turns the square on a tile a quarter turn clockwise.
    ///
    /// Rotating an empty tile succeeds without effect.
    pub fn rotate_right(&mut self, at: GridCoord) -> Result<(), LayoutError> {
        if let Some(square) = self.rotatable_square(at)? {
            square.rotate_right();
        }
        Ok(())
    }

    /// Advances an edge or corner to the next style in the
    /// Empty, Half, Wall cycle and returns the new style.
    ///
    /// Junction styles are not refreshed, as with [`Layout::set_element`].
    pub fn toggle_wall(&mut self, at: GridCoord) -> Result<WallStyle, LayoutError> {
        let kind = at.kind();
        let mismatch = LayoutError::TypeKindMismatch {
            at,
            kind,
            content: CellContent::Wall(WallStyle::Empty).label(),
        };
        if !kind.holds_wall() {
            return Err(mismatch);
        }
        let index = self.index(at)?;
        let Cell::Wall(style) = self.cells[index] else {
            return Err(mismatch);
        };
        let next = style.next();
        self.cells[index] = Cell::Wall(next);
        trace!(%at, ?next, "wall toggled");
        Ok(next)
    }

    /// Copies the layout while keeping every square's identity.
    ///
    /// Unlike [`Clone`], the copy's [`Layout::elements`] keep placement order
    /// and later placements continue the source's identifier sequence.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self {
            height: self.height,
            width: self.width,
            cells: self.cells.clone(),
            squares: self.squares.clone(),
        }
    }

    /// Clears every wall segment and junction. Tiles are untouched.
    pub fn remove_walls(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Wall(style) = cell {
                *style = WallStyle::Empty;
            }
        }
        self.fix_corner_walls();
    }

    /// Empties every tile. Walls are untouched.
    pub fn remove_squares(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Tile(id) = cell {
                *id = None;
            }
        }
        self.squares.clear();
    }

    /// Derives every junction style from its four neighbouring segments.
    ///
    /// A junction becomes [`WallStyle::Wall`] if any neighbour is a full wall,
    /// otherwise [`WallStyle::Half`] if any neighbour is a half wall, and
    /// [`WallStyle::Empty`] otherwise.
    pub fn fix_corner_walls(&mut self) {
        let columns = self.columns() as usize;
        for row in (1..self.rows() as usize).step_by(2) {
            for column in (1..columns).step_by(2) {
                let neighbours = [
                    (row - 1) * columns + column,
                    (row + 1) * columns + column,
                    row * columns + column - 1,
                    row * columns + column + 1,
                ];
                let derived = neighbours
                    .into_iter()
                    .filter_map(|index| match self.cells[index] {
                        Cell::Wall(style) => Some(style),
                        Cell::Tile(_) => None,
                    })
                    .max()
                    .unwrap_or(WallStyle::Empty);
                self.cells[row * columns + column] = Cell::Wall(derived);
            }
        }
    }

    fn rotatable_square(&mut self, at: GridCoord) -> Result<Option<&mut Square>, LayoutError> {
        let kind = at.kind();
        if kind != CellKind::Tile {
            return Err(LayoutError::NotRotatable { at, kind });
        }
        let index = self.index(at)?;
        Ok(match self.cells[index] {
            Cell::Tile(Some(id)) => self.squares.get_mut(id),
            _ => None,
        })
    }

    fn index(&self, at: GridCoord) -> Result<usize, LayoutError> {
        let rows = self.rows();
        let columns = self.columns();
        if at.row() >= rows || at.column() >= columns {
            return Err(LayoutError::OutOfBounds { at, rows, columns });
        }
        Ok(at.row() as usize * columns as usize + at.column() as usize)
    }
}

/// Copies the grid into an independent layout.
///
/// Squares are re-registered in row-major scan order, so the copy's
/// [`Layout::elements`] follow grid position rather than placement history.
impl Clone for Layout {
    fn clone(&self) -> Self {
        let mut squares = SquareRegistry::default();
        let cells = self
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Tile(Some(id)) => {
                    Cell::Tile(self.squares.get(*id).map(|square| squares.insert(*square)))
                }
                other => *other,
            })
            .collect();

        Self {
            height: self.height,
            width: self.width,
            cells,
            squares,
        }
    }
}

/// Applies the provided command to the layout.
///
/// Junction styles are not refreshed for [`Command::SetWall`] or
/// [`Command::ToggleWall`]; callers batch wall edits and then invoke
/// [`Layout::fix_corner_walls`].
pub fn apply(layout: &mut Layout, command: &Command) -> Result<(), LayoutError> {
    match *command {
        Command::PlaceSquare { at, square } => layout.set_element(at, square),
        Command::ClearTile { at } => layout.set_element(at, CellContent::EMPTY_TILE),
        Command::SetWall { at, style } => layout.set_element(at, style),
        Command::SwapSquares { from, to } => layout.swap_elements(from, to),
        Command::RotateLeft { at } => layout.rotate_left(at),
        Command::RotateRight { at } => layout.rotate_right(at),
        Command::ToggleWall { at } => layout.toggle_wall(at).map(|_| ()),
        Command::RemoveWalls => {
            layout.remove_walls();
            Ok(())
        }
        Command::RemoveSquares => {
            layout.remove_squares();
            Ok(())
        }
    }
}

const fn grid_span(tiles: NonZeroU32) -> u32 {
    (tiles.get() - 1) * 2 + 1
}
