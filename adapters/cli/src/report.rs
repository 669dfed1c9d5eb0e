//! Plain-text summary printed by `kitchen-planner show`.

use std::fmt::Write as _;

use kitchen_planner_core::{ApplianceCatalog, CellKind, WallStyle};
use kitchen_planner_layout::Layout;

/// Describes the layout's dimensions, placed appliances and wall segments.
pub(crate) fn describe(layout: &Layout, catalog: &impl ApplianceCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Kitchen {}x{} ({}x{} grid)",
        layout.height(),
        layout.width(),
        layout.rows(),
        layout.columns()
    );

    let _ = writeln!(out, "Appliances ({}):", layout.element_count());
    for (at, square) in layout.placements() {
        let name = catalog
            .appliance(square.appliance())
            .map_or("<unknown>", |appliance| appliance.name.as_str());
        let _ = writeln!(out, "  {at} {name}, {}°", square.rotation().degrees());
    }

    let (mut full, mut half) = (0usize, 0usize);
    for at in layout.coords().filter(|at| at.kind() == CellKind::Edge) {
        match layout.wall(at) {
            Some(WallStyle::Wall) => full += 1,
            Some(WallStyle::Half) => half += 1,
            _ => {}
        }
    }
    let _ = writeln!(out, "Walls: {full} full, {half} half");
    out
}
