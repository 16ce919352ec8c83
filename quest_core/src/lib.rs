//! Core game logic for Roboticon Quest.
//!
//! Holds the plot effect engine ([`PlotEffect`]), the market and player model,
//! the headless roboticon shop controller ([`RoboticonShop`]) and a
//! [`GameSession`] that ties them together around a Bevy [`World`](bevy::prelude::World).

pub mod command_text;
pub mod commands;
pub mod config;
mod market;
mod player;
mod plot;
pub mod plot_effect;
mod resource_group;
mod roboticon;
mod session;
pub mod shop;

pub use command_text::{parse_command_line, CommandParseError};
pub use commands::{execute_command, CommandError, CommandOutcome, SessionCommand};
pub use config::{
    load_quest_config, load_quest_config_from_env, EffectDefinition, QuestConfig,
    QuestConfigError, QuestConfigMetadata,
};
pub use market::{Market, PurchaseStatus};
pub use player::Player;
pub use plot::{spawn_plot_grid, LandPlot, PlotGrid};
pub use plot_effect::{CombineMode, EffectOverlay, EffectTrigger, ImposeRecord, PlotEffect};
pub use resource_group::{
    truncate_to_int, ModifierGroup, ProductionGroup, ResourceGroup, ResourceType,
};
pub use roboticon::{Roboticon, RoboticonId, RoboticonSummary};
pub use session::{GamePhase, GameSession, RevertOutOfOrder, SessionSnapshot};
pub use shop::{CustomisationChoice, RoboticonArt, RoboticonShop, ShopBackend, ShopView};
