use std::{
    collections::HashSet,
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use kitchen_planner_core::{Appliance, StaticCatalog};
use kitchen_planner_layout::Layout;
use kitchen_planner_system_editor::DEFAULT_HISTORY_LIMIT;
use serde::Deserialize;
use tracing::debug;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_MAX_HEIGHT: u32 = 12;
const DEFAULT_MAX_WIDTH: u32 = 16;

const BUILT_IN_APPLIANCES: [(&str, &str); 8] = [
    ("Counter", "appliances/counter.png"),
    ("Hob", "appliances/hob.png"),
    ("Sink", "appliances/sink.png"),
    ("Dining Table", "appliances/dining_table.png"),
    ("Bin", "appliances/bin.png"),
    ("Dishwasher", "appliances/dishwasher.png"),
    ("Fridge", "appliances/fridge.png"),
    ("Plate Stack", "appliances/plate_stack.png"),
];

/// Settings that shape the planner: dimension bounds, undo depth and the catalog.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlannerConfig {
    /// Largest number of tile rows a layout may have.
    pub(crate) max_height: NonZeroU32,
    /// Largest number of tile columns a layout may have.
    pub(crate) max_width: NonZeroU32,
    /// Number of batches retained for undo.
    pub(crate) history_limit: usize,
    /// Appliances available for placement.
    pub(crate) catalog: StaticCatalog,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_height: NonZeroU32::MIN.saturating_add(DEFAULT_MAX_HEIGHT - 1),
            max_width: NonZeroU32::MIN.saturating_add(DEFAULT_MAX_WIDTH - 1),
            history_limit: DEFAULT_HISTORY_LIMIT,
            catalog: StaticCatalog::new(
                BUILT_IN_APPLIANCES
                    .iter()
                    .map(|(name, asset)| Appliance::new(*name, *asset))
                    .collect(),
            ),
        }
    }
}

impl PlannerConfig {
    /// Returns the default config path relative to the working directory.
    #[must_use]
    pub(crate) fn default_path() -> PathBuf {
        PathBuf::from("planner.toml")
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used when
    /// present and built-in defaults otherwise.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = Self::default_path();
                if !fallback.exists() {
                    debug!("no planner config found; using built-in defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read planner config at {}", path.display()))?;
        parse_config(&contents)
            .with_context(|| format!("invalid planner config at {}", path.display()))
    }

    /// Rejects dimensions beyond the configured bounds.
    pub(crate) fn check_dimensions(&self, height: u32, width: u32) -> Result<()> {
        if height > self.max_height.get() || width > self.max_width.get() {
            bail!(
                "a {height}x{width} kitchen exceeds the {}x{} limit",
                self.max_height,
                self.max_width
            );
        }
        Ok(())
    }

    /// Rejects layouts beyond the configured bounds.
    pub(crate) fn check_layout(&self, layout: &Layout) -> Result<()> {
        self.check_dimensions(layout.height(), layout.width())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default = "default_max_height")]
    max_height: u32,
    #[serde(default = "default_max_width")]
    max_width: u32,
    #[serde(default = "default_history_limit")]
    history_limit: usize,
    #[serde(default)]
    appliances: Vec<Appliance>,
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn parse_config(contents: &str) -> Result<PlannerConfig> {
    let file: ConfigFile =
        toml::from_str(contents).context("failed to parse planner config toml contents")?;
    if file.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported planner config version {}; expected {}",
            file.version,
            SUPPORTED_CONFIG_VERSION
        );
    }

    let max_height = NonZeroU32::new(file.max_height).context("max_height must be positive")?;
    let max_width = NonZeroU32::new(file.max_width).context("max_width must be positive")?;

    let catalog = if file.appliances.is_empty() {
        PlannerConfig::default().catalog
    } else {
        let mut names = HashSet::with_capacity(file.appliances.len());
        for appliance in &file.appliances {
            if !names.insert(appliance.name.as_str()) {
                bail!("appliance `{}` is listed more than once", appliance.name);
            }
        }
        StaticCatalog::new(file.appliances)
    };

    Ok(PlannerConfig {
        max_height,
        max_width,
        history_limit: file.history_limit,
        catalog,
    })
}
