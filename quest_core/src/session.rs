use std::sync::Arc;

use bevy::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::{QuestConfig, QuestConfigMetadata},
    market::{Market, PurchaseStatus},
    player::Player,
    plot::{spawn_plot_grid, LandPlot, PlotGrid},
    plot_effect::{CombineMode, EffectOverlay, EffectTrigger, PlotEffect},
    resource_group::{ProductionGroup, ResourceType},
    roboticon::{RoboticonId, RoboticonSummary},
    shop::ShopBackend,
};

/// Turn phases, in the order play moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Acquisition,
    RoboticonPurchase,
    RoboticonPlacement,
    Production,
    Auction,
}

impl GamePhase {
    pub const fn next(self) -> Self {
        match self {
            GamePhase::Acquisition => GamePhase::RoboticonPurchase,
            GamePhase::RoboticonPurchase => GamePhase::RoboticonPlacement,
            GamePhase::RoboticonPlacement => GamePhase::Production,
            GamePhase::Production => GamePhase::Auction,
            GamePhase::Auction => GamePhase::Acquisition,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::Acquisition => "acquisition",
            GamePhase::RoboticonPurchase => "roboticon_purchase",
            GamePhase::RoboticonPlacement => "roboticon_placement",
            GamePhase::Production => "production",
            GamePhase::Auction => "auction",
        }
    }
}

/// A single-effect revert that would skip over a newer application of another effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot revert '{effect}' while a newer '{newer}' application is outstanding")]
pub struct RevertOutOfOrder {
    pub effect: String,
    pub newer: String,
}

/// One running game: the ECS world holding plots, market and player, plus the
/// effect catalogue.
pub struct GameSession {
    world: World,
    config: Arc<QuestConfig>,
    effects: Vec<PlotEffect>,
    /// Effect indices in the order their applications happened.
    journal: Vec<usize>,
    phase: GamePhase,
}

impl GameSession {
    pub fn new(config: Arc<QuestConfig>) -> Self {
        Self::with_metadata(config, QuestConfigMetadata::default())
    }

    pub fn with_metadata(config: Arc<QuestConfig>, metadata: QuestConfigMetadata) -> Self {
        let mut world = World::new();
        world.insert_resource(Market::from_config(&config.market));
        world.insert_resource(Player::new(config.player.starting_money));
        world.insert_resource(metadata);
        spawn_plot_grid(&mut world, &config.plots);

        let effects = config
            .effects
            .iter()
            .map(|definition| {
                let name = definition.name.clone();
                PlotEffect::new(
                    definition.name.clone(),
                    definition.description.clone(),
                    definition.modifiers,
                    move |_| {
                        tracing::info!(
                            target: "roboticon_quest::effect",
                            effect = %name,
                            "effect.trigger_unbound"
                        );
                    },
                )
            })
            .collect();

        tracing::info!(
            target: "roboticon_quest::session",
            plots = ?config.plots.cell_count(),
            effects = config.effects.len(),
            "session.started"
        );

        Self {
            world,
            config,
            effects,
            journal: Vec::new(),
            phase: GamePhase::default(),
        }
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn player(&self) -> &Player {
        self.world.resource::<Player>()
    }

    pub fn market(&self) -> &Market {
        self.world.resource::<Market>()
    }

    pub fn plot_grid(&self) -> &PlotGrid {
        self.world.resource::<PlotGrid>()
    }

    pub fn plot_at(&self, x: u32, y: u32) -> Option<Entity> {
        self.plot_grid().get(x, y)
    }

    pub fn plot_modifiers(&self, plot: Entity) -> Option<ProductionGroup> {
        self.world
            .get::<LandPlot>(plot)
            .map(|land| land.production_modifiers)
    }

    pub fn effects(&self) -> &[PlotEffect] {
        &self.effects
    }

    pub fn effect(&self, name: &str) -> Option<&PlotEffect> {
        self.effect_index(name).map(|index| &self.effects[index])
    }

    fn effect_index(&self, name: &str) -> Option<usize> {
        self.effects
            .iter()
            .position(|effect| effect.name().eq_ignore_ascii_case(name))
    }

    /// The catalogue's combine mode for `name`.
    pub fn default_mode(&self, name: &str) -> Option<CombineMode> {
        self.config.effect(name).map(|definition| definition.mode)
    }

    /// Imposes a catalogue effect on `plot`. `mode` falls back to the catalogue's mode.
    pub fn impose_effect(
        &mut self,
        name: &str,
        plot: Entity,
        mode: Option<CombineMode>,
    ) -> Option<ProductionGroup> {
        let index = self.effect_index(name)?;
        let mode = mode.or_else(|| self.default_mode(name)).unwrap_or_default();
        let applied = self.effects[index].impose(&mut self.world, plot, mode)?;
        self.journal.push(index);
        Some(applied)
    }

    /// Points an effect's activation at `plot`, using the catalogue's mode.
    pub fn bind_effect(&mut self, name: &str, plot: Entity) -> bool {
        let Some(index) = self.effect_index(name) else {
            return false;
        };
        let mode = self.default_mode(name).unwrap_or_default();
        self.effects[index].set_trigger(EffectTrigger::Bound { plot, mode });
        true
    }

    /// Runs an effect's activation and returns the overlay announcing it.
    pub fn trigger_effect(&mut self, name: &str) -> Option<EffectOverlay> {
        let index = self.effect_index(name)?;
        let effect = &mut self.effects[index];
        let before = effect.affected_count();
        effect.execute_trigger(&mut self.world);
        if effect.affected_count() > before {
            self.journal.push(index);
        }
        Some(effect.overlay())
    }

    /// Undoes the latest application of one effect. That application must be the
    /// newest one outstanding across the whole session.
    pub fn revert_effect(&mut self, name: &str) -> Result<Option<Entity>, RevertOutOfOrder> {
        let Some(index) = self.effect_index(name) else {
            return Ok(None);
        };
        if self.effects[index].history().is_empty() {
            return Ok(None);
        }
        if let Some(&latest) = self.journal.last() {
            if latest != index {
                return Err(RevertOutOfOrder {
                    effect: self.effects[index].name().to_string(),
                    newer: self.effects[latest].name().to_string(),
                });
            }
        }

        let plot = self.effects[index].revert(&mut self.world);
        if plot.is_some() && self.journal.last() == Some(&index) {
            self.journal.pop();
        }
        Ok(plot)
    }

    /// Undoes every outstanding application of every effect, newest first.
    pub fn revert_all_effects(&mut self) -> usize {
        let mut reverted = 0;
        while let Some(index) = self.journal.pop() {
            if self.effects[index].revert(&mut self.world).is_some() {
                reverted += 1;
            }
        }
        tracing::info!(
            target: "roboticon_quest::session",
            reverted,
            "effects.reverted_all"
        );
        reverted
    }

    pub fn install_roboticon(&mut self, roboticon: RoboticonId, plot: Entity) -> bool {
        if self.world.get::<LandPlot>(plot).is_none() {
            return false;
        }
        self.world
            .resource_mut::<Player>()
            .install_roboticon(roboticon, plot)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let player = self.player();
        let market = self.market();
        let plots = self
            .plot_grid()
            .entities()
            .into_iter()
            .filter_map(|entity| {
                self.world.get::<LandPlot>(entity).map(|land| PlotSnapshot {
                    x: land.position.x,
                    y: land.position.y,
                    modifiers: land.production_modifiers,
                })
            })
            .collect();

        SessionSnapshot {
            phase: self.phase,
            funds: player.money(),
            roboticon_stock: market.resource_stock(ResourceType::Roboticon),
            roboticons: player
                .roboticons()
                .iter()
                .map(|robot| RoboticonSnapshot {
                    id: robot.id,
                    customisation: robot.customisation,
                    installed: robot.is_installed(),
                })
                .collect(),
            plots,
            effects: self
                .effects
                .iter()
                .map(|effect| EffectSnapshot {
                    name: effect.name().to_string(),
                    outstanding: effect.affected_count(),
                })
                .collect(),
        }
    }
}

impl ShopBackend for GameSession {
    fn purchase_roboticons(&mut self, quantity: u32) -> PurchaseStatus {
        self.world
            .resource_scope(|world, mut market: Mut<Market>| {
                world
                    .resource_mut::<Player>()
                    .purchase_roboticons(quantity, &mut market)
            })
    }

    fn purchase_customisation(
        &mut self,
        resource: ResourceType,
        roboticon: RoboticonId,
    ) -> PurchaseStatus {
        self.world.resource_scope(|world, market: Mut<Market>| {
            world
                .resource_mut::<Player>()
                .purchase_customisation(resource, roboticon, &market)
        })
    }

    fn sell_price(&self, resource: ResourceType) -> i32 {
        self.market().sell_price(resource)
    }

    fn resource_stock(&self, resource: ResourceType) -> u32 {
        self.market().resource_stock(resource)
    }

    fn player_funds(&self) -> i32 {
        self.player().money()
    }

    fn customisable_roboticons(&self) -> Vec<RoboticonSummary> {
        self.player().customisable_roboticons()
    }

    fn next_phase(&mut self) {
        let next = self.phase.next();
        tracing::info!(
            target: "roboticon_quest::session",
            from = self.phase.as_str(),
            to = next.as_str(),
            "phase.advanced"
        );
        self.phase = next;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub funds: i32,
    pub roboticon_stock: u32,
    pub roboticons: Vec<RoboticonSnapshot>,
    pub plots: Vec<PlotSnapshot>,
    pub effects: Vec<EffectSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoboticonSnapshot {
    pub id: RoboticonId,
    pub customisation: Option<ResourceType>,
    pub installed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotSnapshot {
    pub x: u32,
    pub y: u32,
    pub modifiers: ProductionGroup,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectSnapshot {
    pub name: String,
    pub outstanding: usize,
}
