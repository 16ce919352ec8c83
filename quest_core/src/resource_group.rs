use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tradeable and producible resources known to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Food,
    Energy,
    Ore,
    Roboticon,
    Customisation,
}

impl ResourceType {
    pub const PRODUCTION: [ResourceType; 3] =
        [ResourceType::Food, ResourceType::Energy, ResourceType::Ore];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Energy => "energy",
            ResourceType::Ore => "ore",
            ResourceType::Roboticon => "roboticon",
            ResourceType::Customisation => "customisation",
        }
    }

    /// Food, energy and ore are produced by plots; the rest only trade.
    pub const fn is_production(&self) -> bool {
        matches!(
            self,
            ResourceType::Food | ResourceType::Energy | ResourceType::Ore
        )
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "food" => Ok(ResourceType::Food),
            "energy" => Ok(ResourceType::Energy),
            "ore" => Ok(ResourceType::Ore),
            "roboticon" => Ok(ResourceType::Roboticon),
            "customisation" | "customization" => Ok(ResourceType::Customisation),
            _ => Err(()),
        }
    }
}

/// Food / energy / ore triplet shared by effect modifiers and plot production.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceGroup<T> {
    pub food: T,
    pub energy: T,
    pub ore: T,
}

/// Modifiers an effect applies. Fractional values are allowed for multiplication.
pub type ModifierGroup = ResourceGroup<f32>;

/// Production modifiers held by a plot. Always whole numbers.
pub type ProductionGroup = ResourceGroup<i32>;

impl<T: Copy + Default> ResourceGroup<T> {
    pub const fn new(food: T, energy: T, ore: T) -> Self {
        Self { food, energy, ore }
    }

    /// Reads a production field; trade-only resources read as the default value.
    pub fn get(&self, resource: ResourceType) -> T {
        match resource {
            ResourceType::Food => self.food,
            ResourceType::Energy => self.energy,
            ResourceType::Ore => self.ore,
            ResourceType::Roboticon | ResourceType::Customisation => T::default(),
        }
    }

    /// Writes a production field. Trade-only resources are ignored.
    pub fn set(&mut self, resource: ResourceType, value: T) {
        match resource {
            ResourceType::Food => self.food = value,
            ResourceType::Energy => self.energy = value,
            ResourceType::Ore => self.ore = value,
            ResourceType::Roboticon | ResourceType::Customisation => {}
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ResourceGroup<U> {
        ResourceGroup {
            food: f(self.food),
            energy: f(self.energy),
            ore: f(self.ore),
        }
    }

    pub fn zip_with<U, V>(
        self,
        other: ResourceGroup<U>,
        mut f: impl FnMut(T, U) -> V,
    ) -> ResourceGroup<V> {
        ResourceGroup {
            food: f(self.food, other.food),
            energy: f(self.energy, other.energy),
            ore: f(self.ore, other.ore),
        }
    }
}

/// Truncates toward zero, saturating at the `i32` bounds (NaN becomes 0).
pub fn truncate_to_int(value: f32) -> i32 {
    value as i32
}

impl ModifierGroup {
    pub fn truncated(self) -> ProductionGroup {
        self.map(truncate_to_int)
    }
}

impl ProductionGroup {
    pub fn as_modifiers(self) -> ModifierGroup {
        self.map(|value| value as f32)
    }
}

impl fmt::Display for ProductionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "food {} / energy {} / ore {}",
            self.food, self.energy, self.ore
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_rounds_toward_zero() {
        assert_eq!(truncate_to_int(2.9), 2);
        assert_eq!(truncate_to_int(-2.9), -2);
        assert_eq!(truncate_to_int(f32::NAN), 0);
        assert_eq!(truncate_to_int(1e12), i32::MAX);
    }

    #[test]
    fn trade_only_resources_are_not_stored() {
        let mut group = ProductionGroup::new(1, 2, 3);
        group.set(ResourceType::Roboticon, 40);
        assert_eq!(group, ProductionGroup::new(1, 2, 3));
        assert_eq!(group.get(ResourceType::Customisation), 0);
        assert_eq!(group.get(ResourceType::Ore), 3);
    }

    #[test]
    fn resource_names_parse_case_insensitively() {
        assert_eq!("ENERGY".parse::<ResourceType>(), Ok(ResourceType::Energy));
        assert_eq!(
            "customization".parse::<ResourceType>(),
            Ok(ResourceType::Customisation)
        );
        assert!("gold".parse::<ResourceType>().is_err());
    }
}
