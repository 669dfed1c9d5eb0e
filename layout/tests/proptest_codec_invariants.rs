//! Property-based invariants for layout encoding.
//!
//! 1. Decoding the text of any encoded layout re-encodes to the same value.
//! 2. Re-encoding a decoded layout reproduces the original text.
//! 3. Decoded layouts list their squares in row-major grid order.
//! 4. After a corner fix-up every junction carries its strongest neighbour.

use std::num::NonZeroU32;

use kitchen_planner_core::{
    Appliance, ApplianceIndex, CellContent, CellKind, GridCoord, Rotation, Square,
    StaticCatalog, WallStyle,
};
use kitchen_planner_layout::Layout;
use proptest::prelude::*;

const CATALOG_SIZE: u32 = 8;

#[derive(Clone, Debug)]
enum Edit {
    Place {
        slot: usize,
        index: u32,
        rotation: Rotation,
    },
    Clear {
        slot: usize,
    },
    Wall {
        slot: usize,
        style: WallStyle,
    },
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new(
        (0..CATALOG_SIZE)
            .map(|index| Appliance::new(format!("Appliance {index}"), format!("{index}.png")))
            .collect(),
    )
}

fn rotation() -> impl Strategy<Value = Rotation> {
    prop_oneof![
        Just(Rotation::Deg0),
        Just(Rotation::Deg90),
        Just(Rotation::Deg180),
        Just(Rotation::Deg270),
    ]
}

fn wall_style() -> impl Strategy<Value = WallStyle> {
    prop_oneof![
        Just(WallStyle::Empty),
        Just(WallStyle::Half),
        Just(WallStyle::Wall),
    ]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (any::<usize>(), 0..CATALOG_SIZE, rotation()).prop_map(|(slot, index, rotation)| {
            Edit::Place {
                slot,
                index,
                rotation,
            }
        }),
        any::<usize>().prop_map(|slot| Edit::Clear { slot }),
        (any::<usize>(), wall_style()).prop_map(|(slot, style)| Edit::Wall { slot, style }),
    ]
}

fn build(height: u32, width: u32, edits: &[Edit], fix_corners: bool) -> Layout {
    let mut layout = Layout::new(
        NonZeroU32::new(height).expect("non-zero height"),
        NonZeroU32::new(width).expect("non-zero width"),
    );
    let tiles: Vec<GridCoord> = layout
        .coords()
        .filter(|at| at.kind() == CellKind::Tile)
        .collect();
    let walls: Vec<GridCoord> = layout
        .coords()
        .filter(|at| at.kind().holds_wall())
        .collect();

    for edit in edits {
        match *edit {
            Edit::Place {
                slot,
                index,
                rotation,
            } => {
                let square = Square::new(ApplianceIndex::new(index)).with_rotation(rotation);
                layout
                    .set_element(tiles[slot % tiles.len()], square)
                    .expect("tile accepts square");
            }
            Edit::Clear { slot } => {
                layout
                    .set_element(tiles[slot % tiles.len()], CellContent::EMPTY_TILE)
                    .expect("tile accepts empty content");
            }
            Edit::Wall { slot, style } => {
                if !walls.is_empty() {
                    layout
                        .set_element(walls[slot % walls.len()], style)
                        .expect("wall cell accepts style");
                }
            }
        }
    }
    if fix_corners {
        layout.fix_corner_walls();
    }
    layout
}

fn layouts() -> impl Strategy<Value = Layout> {
    (
        1u32..=6,
        1u32..=6,
        proptest::collection::vec(edit(), 0..40),
        any::<bool>(),
    )
        .prop_map(|(height, width, edits, fix_corners)| build(height, width, &edits, fix_corners))
}

fn appliance_order<'a>(squares: impl Iterator<Item = &'a Square>) -> Vec<u32> {
    squares.map(|square| square.appliance().get()).collect()
}

// ── 1-3. Encoding round trip ──────────────────────────────────────────────

proptest! {
    #[test]
    fn decoded_layouts_re_encode_identically(layout in layouts()) {
        let encoded = layout.encode();
        let text = encoded.to_text();

        let decoded = Layout::decode(&text, &catalog())
            .map_err(|error| TestCaseError::fail(format!("encoded text must decode: {error}")))?;

        prop_assert_eq!(decoded.encode(), encoded);
        prop_assert_eq!(decoded.encode().to_text(), text);
    }

    #[test]
    fn decoded_elements_follow_grid_order(layout in layouts()) {
        let decoded = Layout::decode(&layout.encode().to_text(), &catalog())
            .expect("encoded text decodes");

        prop_assert_eq!(decoded.element_count(), layout.element_count());
        prop_assert_eq!(
            appliance_order(decoded.elements().map(|(_, square)| square)),
            appliance_order(layout.placements().map(|(_, square)| square))
        );
    }
}

// ── 4. Corner derivation ────────────────────────────────────────────────

proptest! {
    #[test]
    fn fixed_corners_carry_their_strongest_neighbour(layout in layouts()) {
        let mut layout = layout;
        layout.fix_corner_walls();

        for at in layout.coords().filter(|at| at.kind() == CellKind::Corner) {
            let (row, column) = (at.row(), at.column());
            let strongest = [
                GridCoord::new(row - 1, column),
                GridCoord::new(row + 1, column),
                GridCoord::new(row, column - 1),
                GridCoord::new(row, column + 1),
            ]
            .into_iter()
            .filter_map(|neighbour| layout.wall(neighbour))
            .max()
            .unwrap_or(WallStyle::Empty);
            prop_assert_eq!(layout.wall(at), Some(strongest), "corner {}", at);
        }
    }
}
