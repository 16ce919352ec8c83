use std::collections::HashMap;

use bevy::{math::UVec2, prelude::*};

use crate::{
    config::{PlotConfig, MAX_PLOT_CELLS},
    resource_group::ProductionGroup,
};

/// A single tile of land on the colony map.
#[derive(Component, Debug, Clone, Default)]
pub struct LandPlot {
    pub position: UVec2,
    pub production_modifiers: ProductionGroup,
}

impl LandPlot {
    pub fn new(position: UVec2, production_modifiers: ProductionGroup) -> Self {
        Self {
            position,
            production_modifiers,
        }
    }
}

/// Lookup from grid coordinates to the plot entity occupying them.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlotGrid {
    size: UVec2,
    plots: HashMap<UVec2, Entity>,
}

impl PlotGrid {
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Entity> {
        self.plots.get(&UVec2::new(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Plot entities in row-major order.
    pub fn entities(&self) -> Vec<Entity> {
        let mut positions: Vec<_> = self.plots.iter().collect();
        positions.sort_by_key(|(position, _)| (position.y, position.x));
        positions.into_iter().map(|(_, entity)| *entity).collect()
    }
}

/// Spawns one plot per grid cell and records them in a [`PlotGrid`] resource.
pub fn spawn_plot_grid(world: &mut World, config: &PlotConfig) {
    let size = UVec2::new(config.width, config.height);
    let capacity = config.cell_count().unwrap_or(usize::MAX).min(MAX_PLOT_CELLS);
    let mut plots = HashMap::with_capacity(capacity);

    for y in 0..config.height {
        for x in 0..config.width {
            let position = UVec2::new(x, y);
            let entity = world
                .spawn(LandPlot::new(position, config.base_modifiers))
                .id();
            plots.insert(position, entity);
        }
    }

    tracing::debug!(
        target: "roboticon_quest::plot",
        width = config.width,
        height = config.height,
        "plots.spawned"
    );
    world.insert_resource(PlotGrid { size, plots });
}
