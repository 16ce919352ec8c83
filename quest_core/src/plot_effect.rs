//! Temporary production effects imposed on land plots.
//!
//! A [`PlotEffect`] carries a fixed set of food / energy / ore modifiers. Each
//! call to [`PlotEffect::impose`] combines those modifiers with a plot's current
//! production and records the plot's previous values, so the effect can later
//! be rolled back one application at a time ([`PlotEffect::revert`]) or all at
//! once ([`PlotEffect::revert_all`]). Rollback is strictly last-in, first-out.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    plot::LandPlot,
    resource_group::{truncate_to_int, ModifierGroup, ProductionGroup},
};

pub const OVERLAY_HEADER: &str = "PLOT EFFECT IMPOSED";
pub const OVERLAY_CLOSE_LABEL: &str = "CLOSE";

/// How an effect's modifiers merge with a plot's existing production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    #[default]
    Add,
    Multiply,
    Overwrite,
}

impl CombineMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CombineMode::Add => "add",
            CombineMode::Multiply => "multiply",
            CombineMode::Overwrite => "overwrite",
        }
    }

    /// Numeric codes used by saved scenarios: 0 add, 1 multiply, 2 overwrite.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CombineMode::Add),
            1 => Some(CombineMode::Multiply),
            2 => Some(CombineMode::Overwrite),
            _ => None,
        }
    }

    /// Combines one field. `original` is the plot's value, `modifier` the effect's.
    pub fn combine(self, original: i32, modifier: f32) -> i32 {
        match self {
            CombineMode::Add => original.saturating_add(truncate_to_int(modifier)),
            CombineMode::Multiply => truncate_to_int(original as f32 * modifier),
            CombineMode::Overwrite => truncate_to_int(modifier),
        }
    }

    pub fn apply(self, original: ProductionGroup, modifiers: ModifierGroup) -> ProductionGroup {
        original.zip_with(modifiers, |orig, modifier| self.combine(orig, modifier))
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombineMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "0" => Ok(CombineMode::Add),
            "multiply" | "mul" | "1" => Ok(CombineMode::Multiply),
            "overwrite" | "set" | "2" => Ok(CombineMode::Overwrite),
            _ => Err(()),
        }
    }
}

/// One application of an effect: which plot, what it held before, what it got.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImposeRecord {
    pub plot: Entity,
    pub original: ProductionGroup,
    pub applied: ProductionGroup,
}

type TriggerFn = Box<dyn FnMut(&mut World) + Send + Sync>;

/// What happens when an effect is activated through normal play.
pub enum EffectTrigger {
    /// Caller-provided action.
    Custom(TriggerFn),
    /// Impose the effect on a fixed plot with a fixed mode.
    Bound { plot: Entity, mode: CombineMode },
}

impl fmt::Debug for EffectTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectTrigger::Custom(_) => f.write_str("Custom(..)"),
            EffectTrigger::Bound { plot, mode } => f
                .debug_struct("Bound")
                .field("plot", plot)
                .field("mode", mode)
                .finish(),
        }
    }
}

/// Text a front-end shows when an effect fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectOverlay {
    pub header: &'static str,
    pub title: String,
    pub description: String,
    pub close_label: &'static str,
}

#[derive(Debug)]
pub struct PlotEffect {
    name: String,
    description: String,
    modifiers: ModifierGroup,
    trigger: EffectTrigger,
    history: Vec<ImposeRecord>,
}

impl PlotEffect {
    /// Builds an effect that runs `trigger` when activated.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        modifiers: ModifierGroup,
        trigger: F,
    ) -> Self
    where
        F: FnMut(&mut World) + Send + Sync + 'static,
    {
        Self::with_trigger(
            name,
            description,
            modifiers,
            EffectTrigger::Custom(Box::new(trigger)),
        )
    }

    /// Builds an effect whose activation imposes itself on `plot` using `mode`.
    pub fn bound_to(
        name: impl Into<String>,
        description: impl Into<String>,
        modifiers: ModifierGroup,
        plot: Entity,
        mode: CombineMode,
    ) -> Self {
        Self::with_trigger(
            name,
            description,
            modifiers,
            EffectTrigger::Bound { plot, mode },
        )
    }

    pub fn with_trigger(
        name: impl Into<String>,
        description: impl Into<String>,
        modifiers: ModifierGroup,
        trigger: EffectTrigger,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            modifiers,
            trigger,
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn modifiers(&self) -> ModifierGroup {
        self.modifiers
    }

    pub fn trigger(&self) -> &EffectTrigger {
        &self.trigger
    }

    /// Replaces the activation trigger. Outstanding applications are kept.
    pub fn set_trigger(&mut self, trigger: EffectTrigger) {
        self.trigger = trigger;
    }

    /// Applications not yet reverted, oldest first.
    pub fn history(&self) -> &[ImposeRecord] {
        &self.history
    }

    pub fn affected_count(&self) -> usize {
        self.history.len()
    }

    /// Imposes the effect's modifiers on `plot`.
    ///
    /// Returns the production written to the plot, or `None` when `plot` has no
    /// [`LandPlot`] component (nothing is recorded in that case).
    pub fn impose(
        &mut self,
        world: &mut World,
        plot: Entity,
        mode: CombineMode,
    ) -> Option<ProductionGroup> {
        let Some(mut land) = world.get_mut::<LandPlot>(plot) else {
            tracing::warn!(
                target: "roboticon_quest::effect",
                effect = %self.name,
                ?plot,
                "effect.impose_skipped=missing_plot"
            );
            return None;
        };

        let original = land.production_modifiers;
        let applied = mode.apply(original, self.modifiers);
        land.production_modifiers = applied;

        self.history.push(ImposeRecord {
            plot,
            original,
            applied,
        });

        tracing::debug!(
            target: "roboticon_quest::effect",
            effect = %self.name,
            ?plot,
            %mode,
            before = %original,
            after = %applied,
            "effect.imposed"
        );
        Some(applied)
    }

    /// Undoes the most recent application. Returns the plot that was restored.
    ///
    /// Does nothing when no application is outstanding.
    pub fn revert(&mut self, world: &mut World) -> Option<Entity> {
        let record = self.history.pop()?;

        match world.get_mut::<LandPlot>(record.plot) {
            Some(mut land) => {
                land.production_modifiers = record.original;
                tracing::debug!(
                    target: "roboticon_quest::effect",
                    effect = %self.name,
                    plot = ?record.plot,
                    restored = %record.original,
                    "effect.reverted"
                );
            }
            None => {
                tracing::warn!(
                    target: "roboticon_quest::effect",
                    effect = %self.name,
                    plot = ?record.plot,
                    "effect.revert_skipped=missing_plot"
                );
            }
        }

        Some(record.plot)
    }

    /// Undoes every outstanding application, most recent first.
    pub fn revert_all(&mut self, world: &mut World) -> usize {
        let mut reverted = 0;
        while self.revert(world).is_some() {
            reverted += 1;
        }
        reverted
    }

    /// Runs the activation trigger.
    pub fn execute_trigger(&mut self, world: &mut World) {
        tracing::info!(
            target: "roboticon_quest::effect",
            effect = %self.name,
            "effect.triggered"
        );
        match self.trigger {
            EffectTrigger::Custom(ref mut action) => action(world),
            EffectTrigger::Bound { plot, mode } => {
                self.impose(world, plot, mode);
            }
        }
    }

    pub fn overlay(&self) -> EffectOverlay {
        EffectOverlay {
            header: OVERLAY_HEADER,
            title: self.name.clone(),
            description: self.description.clone(),
            close_label: OVERLAY_CLOSE_LABEL,
        }
    }
}
