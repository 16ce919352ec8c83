//! Game balance configuration: market stock and prices, starting funds, the
//! plot grid, and the catalogue of plot effects.
//!
//! Loaded from `quest_config.json` with support for an environment variable
//! override (`QUEST_CONFIG_PATH`).

use std::{
    collections::BTreeMap,
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use bevy::prelude::Resource;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    plot_effect::CombineMode,
    resource_group::{ModifierGroup, ProductionGroup, ResourceType},
};

pub const BUILTIN_QUEST_CONFIG: &str = include_str!("data/quest_config.json");
pub const QUEST_CONFIG_ENV: &str = "QUEST_CONFIG_PATH";
/// Largest plot grid a config file may ask for.
pub const MAX_PLOT_CELLS: usize = 4096;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub market: MarketConfig,
    pub player: PlayerConfig,
    pub plots: PlotConfig,
    pub effects: Vec<EffectDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub stock: BTreeMap<ResourceType, u32>,
    pub sell_prices: BTreeMap<ResourceType, i32>,
    pub first_roboticon_id: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            stock: BTreeMap::from([
                (ResourceType::Food, 16),
                (ResourceType::Energy, 16),
                (ResourceType::Ore, 0),
                (ResourceType::Roboticon, 12),
            ]),
            sell_prices: BTreeMap::from([
                (ResourceType::Food, 10),
                (ResourceType::Energy, 15),
                (ResourceType::Ore, 20),
                (ResourceType::Roboticon, 10),
                (ResourceType::Customisation, 15),
            ]),
            first_roboticon_id: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub starting_money: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub base_modifiers: ProductionGroup,
}

impl PlotConfig {
    /// `width * height`, or `None` when the product does not fit in a `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 3,
            base_modifiers: ProductionGroup::new(1, 1, 1),
        }
    }
}

/// A named effect the session can impose on plots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EffectDefinition {
    pub name: String,
    pub description: String,
    pub modifiers: ModifierGroup,
    pub mode: CombineMode,
}

impl Default for EffectDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            modifiers: ModifierGroup::new(0.0, 0.0, 0.0),
            mode: CombineMode::Add,
        }
    }
}

impl QuestConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_QUEST_CONFIG).expect("builtin quest config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, QuestConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| QuestConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = QuestConfig::from_json_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the session cannot be built from.
    pub fn validate(&self) -> Result<(), QuestConfigError> {
        match self.plots.cell_count() {
            Some(cells) if cells <= MAX_PLOT_CELLS => Ok(()),
            _ => Err(QuestConfigError::GridTooLarge {
                width: self.plots.width,
                height: self.plots.height,
                max: MAX_PLOT_CELLS,
            }),
        }
    }

    pub fn effect(&self, name: &str) -> Option<&EffectDefinition> {
        self.effects
            .iter()
            .find(|effect| effect.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Error)]
pub enum QuestConfigError {
    #[error("failed to parse quest config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read quest config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("plot grid {width}x{height} exceeds {max} cells")]
    GridTooLarge { width: u32, height: u32, max: usize },
}

/// Where the active configuration came from. `None` means the builtin copy.
#[derive(Resource, Debug, Clone, Default)]
pub struct QuestConfigMetadata {
    path: Option<PathBuf>,
}

impl QuestConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Loads the file named by `QUEST_CONFIG_PATH`, falling back to the builtin config.
pub fn load_quest_config_from_env() -> (Arc<QuestConfig>, QuestConfigMetadata) {
    let override_path = env::var(QUEST_CONFIG_ENV).ok().map(PathBuf::from);
    load_quest_config(override_path.as_deref())
}

/// Loads `path` when given, falling back to the builtin config on any failure.
pub fn load_quest_config(path: Option<&Path>) -> (Arc<QuestConfig>, QuestConfigMetadata) {
    if let Some(path) = path {
        match QuestConfig::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    target: "roboticon_quest::config",
                    path = %path.display(),
                    "quest_config.loaded=file"
                );
                return (
                    Arc::new(config),
                    QuestConfigMetadata::new(Some(path.to_path_buf())),
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: "roboticon_quest::config",
                    path = %path.display(),
                    error = %err,
                    "quest_config.load_failed"
                );
            }
        }
    }

    let config = QuestConfig::builtin();
    tracing::info!(
        target: "roboticon_quest::config",
        "quest_config.loaded=builtin"
    );
    (config, QuestConfigMetadata::new(None))
}
