//! Textual edit operations accepted by `kitchen-planner edit --op`.
//!
//! Coordinates are grid coordinates: tiles sit at even/even positions and
//! walls at positions with at least one odd component.

use anyhow::{bail, ensure, Context, Result};
use kitchen_planner_core::{
    ApplianceCatalog, ApplianceIndex, Command, GridCoord, Rotation, Square, WallStyle,
};

/// Parses every operation, checking placed appliances against the catalog.
pub(crate) fn parse_ops(ops: &[String], catalog: &impl ApplianceCatalog) -> Result<Vec<Command>> {
    ops.iter()
        .map(|op| parse_op(op, catalog).with_context(|| format!("invalid operation `{op}`")))
        .collect()
}

fn parse_op(op: &str, catalog: &impl ApplianceCatalog) -> Result<Command> {
    let tokens: Vec<&str> = op.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        bail!("operation is empty");
    };

    let command = match name {
        "place" => {
            ensure!(
                args.len() == 3 || args.len() == 4,
                "expected `place ROW COLUMN INDEX [DEGREES]`"
            );
            let index = ApplianceIndex::new(number(args[2], "appliance index")?);
            ensure!(
                catalog.appliance(index).is_some(),
                "appliance index {} is outside the catalog of {} entries",
                index.get(),
                catalog.len()
            );
            let rotation = match args.get(3) {
                Some(degrees) => Rotation::from_degrees(number(degrees, "rotation")?)
                    .context("rotation must be 0, 90, 180 or 270")?,
                None => Rotation::Deg0,
            };
            Command::PlaceSquare {
                at: coord(&args[..2])?,
                square: Square::new(index).with_rotation(rotation),
            }
        }
        "clear" => Command::ClearTile {
            at: exact_coord(args, "clear ROW COLUMN")?,
        },
        "wall" => {
            ensure!(args.len() == 3, "expected `wall ROW COLUMN empty|half|full`");
            Command::SetWall {
                at: coord(&args[..2])?,
                style: wall_style(args[2])?,
            }
        }
        "toggle" => Command::ToggleWall {
            at: exact_coord(args, "toggle ROW COLUMN")?,
        },
        "swap" => {
            ensure!(args.len() == 4, "expected `swap ROW COLUMN ROW COLUMN`");
            Command::SwapSquares {
                from: coord(&args[..2])?,
                to: coord(&args[2..])?,
            }
        }
        "rotate-left" => Command::RotateLeft {
            at: exact_coord(args, "rotate-left ROW COLUMN")?,
        },
        "rotate-right" => Command::RotateRight {
            at: exact_coord(args, "rotate-right ROW COLUMN")?,
        },
        "remove-walls" => {
            ensure!(args.is_empty(), "`remove-walls` takes no arguments");
            Command::RemoveWalls
        }
        "remove-squares" => {
            ensure!(args.is_empty(), "`remove-squares` takes no arguments");
            Command::RemoveSquares
        }
        other => bail!("unknown operation `{other}`"),
    };
    Ok(command)
}

fn exact_coord(args: &[&str], usage: &str) -> Result<GridCoord> {
    ensure!(args.len() == 2, "expected `{usage}`");
    coord(args)
}

fn coord(args: &[&str]) -> Result<GridCoord> {
    Ok(GridCoord::new(
        number(args[0], "row")?,
        number(args[1], "column")?,
    ))
}

fn number(token: &str, what: &str) -> Result<u32> {
    token
        .parse()
        .with_context(|| format!("{what} `{token}` is not a non-negative integer"))
}

fn wall_style(token: &str) -> Result<WallStyle> {
    match token {
        "empty" | "none" => Ok(WallStyle::Empty),
        "half" => Ok(WallStyle::Half),
        "full" | "wall" => Ok(WallStyle::Wall),
        other => bail!("unknown wall style `{other}`"),
    }
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

    fn parse(op: &str) -> Result<Command> {
        parse_op(op, &catalog())
    }

    #[test]
    fn place_accepts_optional_rotation() {
        assert_eq!(
            parse("place 0 2 1 90").expect("op parses"),
            Command::PlaceSquare {
                at: GridCoord::new(0, 2),
                square: Square::new(ApplianceIndex::new(1)).with_rotation(Rotation::Deg90),
            }
        );
        assert_eq!(
            parse("  place 4 4 0 ").expect("op parses"),
            Command::PlaceSquare {
                at: GridCoord::new(4, 4),
                square: Square::new(ApplianceIndex::new(0)),
            }
        );
    }

    #[test]
    fn place_rejects_unknown_appliances_and_angles() {
        assert!(parse("place 0 0 2").is_err());
        assert!(parse("place 0 0 1 45").is_err());
        assert!(parse("place 0 0").is_err());
    }

    #[test]
    fn wall_and_tile_operations_parse() {
        assert_eq!(
            parse("wall 1 0 half").expect("op parses"),
            Command::SetWall {
                at: GridCoord::new(1, 0),
                style: WallStyle::Half,
            }
        );
        assert_eq!(
            parse("swap 0 0 2 2").expect("op parses"),
            Command::SwapSquares {
                from: GridCoord::new(0, 0),
                to: GridCoord::new(2, 2),
            }
        );
        assert_eq!(
            parse("rotate-left 2 0").expect("op parses"),
            Command::RotateLeft {
                at: GridCoord::new(2, 0)
            }
        );
        assert_eq!(
            parse("toggle 1 1").expect("op parses"),
            Command::ToggleWall {
                at: GridCoord::new(1, 1)
            }
        );
        assert_eq!(parse("remove-walls").expect("op parses"), Command::RemoveWalls);
        assert_eq!(
            parse("remove-squares").expect("op parses"),
            Command::RemoveSquares
        );
    }

    #[test]
    fn malformed_operations_are_rejected() {
        for op in ["", "paint 0 0", "wall 0 1 brick", "clear -1 0", "remove-walls now", "toggle 1"] {
            assert!(parse(op).is_err(), "`{op}` must be rejected");
        }
    }

    #[test]
    fn parse_ops_reports_the_offending_operation() {
        let ops = vec!["clear 0 0".to_owned(), "wall 0 1 brick".to_owned()];
        let error = parse_ops(&ops, &catalog()).expect_err("second op is invalid");
        assert!(error.to_string().contains("wall 0 1 brick"));
    }
}
