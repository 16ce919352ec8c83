use std::collections::BTreeMap;

use bevy::prelude::Resource;
use serde::Serialize;

use crate::{config::MarketConfig, resource_group::ResourceType, roboticon::RoboticonId};

/// Outcome of any attempt to buy from the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Success,
    Failure,
}

impl PurchaseStatus {
    pub fn is_success(self) -> bool {
        self == PurchaseStatus::Success
    }
}

/// The colony market: stock on hand and the price it charges per unit.
#[derive(Resource, Debug, Clone)]
pub struct Market {
    stock: BTreeMap<ResourceType, u32>,
    sell_prices: BTreeMap<ResourceType, i32>,
    next_roboticon_id: u32,
}

impl Market {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            stock: config.stock.clone(),
            sell_prices: config.sell_prices.clone(),
            next_roboticon_id: config.first_roboticon_id,
        }
    }

    /// Unit price the market sells at. Unpriced resources cost nothing.
    pub fn sell_price(&self, resource: ResourceType) -> i32 {
        self.sell_prices.get(&resource).copied().unwrap_or(0)
    }

    pub fn set_sell_price(&mut self, resource: ResourceType, price: i32) {
        self.sell_prices.insert(resource, price);
    }

    pub fn resource_stock(&self, resource: ResourceType) -> u32 {
        self.stock.get(&resource).copied().unwrap_or(0)
    }

    pub fn set_resource_stock(&mut self, resource: ResourceType, amount: u32) {
        self.stock.insert(resource, amount);
    }

    /// Removes `amount` from stock. Returns false, leaving stock untouched, when short.
    pub(crate) fn take_stock(&mut self, resource: ResourceType, amount: u32) -> bool {
        let entry = self.stock.entry(resource).or_insert(0);
        if *entry < amount {
            return false;
        }
        *entry -= amount;
        true
    }

    pub(crate) fn issue_roboticon_id(&mut self) -> RoboticonId {
        let id = RoboticonId(self.next_roboticon_id);
        self.next_roboticon_id += 1;
        id
    }
}
