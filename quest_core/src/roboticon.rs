use std::fmt;

use bevy::prelude::Entity;
use serde::{Deserialize, Serialize};

use crate::resource_group::ResourceType;

/// Issue number stamped on a roboticon when the market sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoboticonId(pub u32);

impl fmt::Display for RoboticonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roboticon {
    pub id: RoboticonId,
    pub customisation: Option<ResourceType>,
    pub installed_on: Option<Entity>,
}

impl Roboticon {
    pub fn new(id: RoboticonId) -> Self {
        Self {
            id,
            customisation: None,
            installed_on: None,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed_on.is_some()
    }

    pub fn summary(&self) -> RoboticonSummary {
        RoboticonSummary {
            id: self.id,
            customisation: self.customisation,
        }
    }
}

/// What the shop needs to know about a roboticon still in the player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoboticonSummary {
    pub id: RoboticonId,
    pub customisation: Option<ResourceType>,
}
