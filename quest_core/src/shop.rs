//! Roboticon shop controller.
//!
//! [`RoboticonShop`] owns the state behind the shop screen (purchase quantity,
//! inventory selection, chosen customisation) and a [`ShopView`] describing what
//! the screen should currently show. Front-ends forward button presses to the
//! controller and redraw from [`RoboticonShop::view`]. All game-state changes go
//! through a [`ShopBackend`].

use serde::Serialize;

use crate::{
    market::PurchaseStatus,
    resource_group::ResourceType,
    roboticon::{RoboticonId, RoboticonSummary},
};

pub const PURCHASE_HEADING: &str = "PURCHASE ROBOTICONS";
pub const CUSTOMISE_HEADING: &str = "CUSTOMISE ROBOTICONS";
pub const EXIT_LABEL: &str = "EXIT ROBOTICON SHOP";
pub const CUSTOMISED_LABEL: &str = "CUSTOMISED";
pub const NO_SELECTION_LABEL: &str = "ISSUE NUMBER: ####";

/// Player and market operations the shop depends on.
pub trait ShopBackend {
    fn purchase_roboticons(&mut self, quantity: u32) -> PurchaseStatus;
    fn purchase_customisation(
        &mut self,
        resource: ResourceType,
        roboticon: RoboticonId,
    ) -> PurchaseStatus;
    fn sell_price(&self, resource: ResourceType) -> i32;
    fn resource_stock(&self, resource: ResourceType) -> u32;
    fn player_funds(&self) -> i32;
    /// Roboticons the player owns that are not installed on a plot.
    fn customisable_roboticons(&self) -> Vec<RoboticonSummary>;
    fn next_phase(&mut self);
}

/// Entries of the customisation drop-down, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomisationChoice {
    #[default]
    EnergyGeneration,
    OreMining,
    FoodFarming,
}

impl CustomisationChoice {
    pub const OPTIONS: [CustomisationChoice; 3] = [
        CustomisationChoice::EnergyGeneration,
        CustomisationChoice::OreMining,
        CustomisationChoice::FoodFarming,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::OPTIONS.get(index).copied()
    }

    pub const fn index(self) -> usize {
        match self {
            CustomisationChoice::EnergyGeneration => 0,
            CustomisationChoice::OreMining => 1,
            CustomisationChoice::FoodFarming => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CustomisationChoice::EnergyGeneration => "Energy Generation",
            CustomisationChoice::OreMining => "Ore Mining",
            CustomisationChoice::FoodFarming => "Food Farming",
        }
    }

    pub const fn resource(self) -> ResourceType {
        match self {
            CustomisationChoice::EnergyGeneration => ResourceType::Energy,
            CustomisationChoice::OreMining => ResourceType::Ore,
            CustomisationChoice::FoodFarming => ResourceType::Food,
        }
    }
}

/// Images for the selected-roboticon slot, supplied by the front-end.
#[derive(Debug, Clone)]
pub struct RoboticonArt<T> {
    pub uncustomised: T,
    pub energy: T,
    pub ore: T,
    pub food: T,
    /// Shown when the player has no roboticon to customise.
    pub empty: T,
}

impl<T: Clone> RoboticonArt<T> {
    fn for_customisation(&self, customisation: Option<ResourceType>) -> T {
        match customisation {
            None => self.uncustomised.clone(),
            Some(ResourceType::Energy) => self.energy.clone(),
            Some(ResourceType::Ore) => self.ore.clone(),
            Some(ResourceType::Food) => self.food.clone(),
            Some(ResourceType::Roboticon | ResourceType::Customisation) => {
                self.uncustomised.clone()
            }
        }
    }
}

/// Everything the shop screen displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView<T> {
    pub quantity_label: String,
    pub purchase_label: String,
    pub purchase_enabled: bool,
    pub selection_label: String,
    pub selected_image: T,
    pub customise_label: String,
    pub customise_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct RoboticonShop<T> {
    art: RoboticonArt<T>,
    quantity: u32,
    inventory: Vec<RoboticonSummary>,
    selected: Option<usize>,
    customisation: CustomisationChoice,
    view: ShopView<T>,
}

impl<T: Clone> RoboticonShop<T> {
    pub fn new<B: ShopBackend + ?Sized>(backend: &B, art: RoboticonArt<T>) -> Self {
        let view = ShopView {
            quantity_label: String::new(),
            purchase_label: String::new(),
            purchase_enabled: false,
            selection_label: NO_SELECTION_LABEL.to_string(),
            selected_image: art.empty.clone(),
            customise_label: String::new(),
            customise_enabled: false,
        };
        let mut shop = Self {
            art,
            quantity: 1,
            inventory: Vec::new(),
            selected: None,
            customisation: CustomisationChoice::default(),
            view,
        };
        shop.refresh(backend);
        shop.refresh_inventory(backend);
        shop
    }

    pub fn view(&self) -> &ShopView<T> {
        &self.view
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_roboticon(&self) -> Option<&RoboticonSummary> {
        self.selected.and_then(|index| self.inventory.get(index))
    }

    pub fn inventory(&self) -> &[RoboticonSummary] {
        &self.inventory
    }

    pub fn customisation(&self) -> CustomisationChoice {
        self.customisation
    }

    pub fn select_customisation(&mut self, choice: CustomisationChoice) {
        self.customisation = choice;
    }

    /// `+` button. Never exceeds the market's roboticon stock.
    pub fn increase_quantity<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        if self.quantity < backend.resource_stock(ResourceType::Roboticon) {
            self.quantity += 1;
            self.refresh(backend);
        }
    }

    /// `-` button. Never drops below one.
    pub fn decrease_quantity<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        if self.quantity > 1 {
            self.quantity -= 1;
            self.refresh(backend);
        }
    }

    pub fn purchase_roboticons<B: ShopBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> PurchaseStatus {
        let status = backend.purchase_roboticons(self.quantity);
        tracing::debug!(
            target: "roboticon_quest::shop",
            quantity = self.quantity,
            ?status,
            "shop.purchase_roboticons"
        );
        if status.is_success() {
            self.quantity = 1;
            self.refresh(&*backend);
            self.refresh_inventory(&*backend);
        }
        status
    }

    /// Buys the chosen customisation for the selected roboticon.
    pub fn purchase_customisation<B: ShopBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> PurchaseStatus {
        let Some(target) = self.selected_roboticon().map(|robot| robot.id) else {
            return PurchaseStatus::Failure;
        };

        let resource = self.customisation.resource();
        let status = backend.purchase_customisation(resource, target);
        tracing::debug!(
            target: "roboticon_quest::shop",
            roboticon = %target,
            %resource,
            ?status,
            "shop.purchase_customisation"
        );
        if status.is_success() {
            self.refresh(&*backend);
            self.refresh_inventory(&*backend);
            self.view.customise_label = CUSTOMISED_LABEL.to_string();
            self.view.customise_enabled = false;
        }
        status
    }

    /// `<` button.
    pub fn select_previous<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        if let Some(index) = self.selected {
            if index > 0 {
                self.selected = Some(index - 1);
                self.refresh_selection(backend);
            }
        }
    }

    /// `>` button.
    pub fn select_next<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        if let Some(index) = self.selected {
            if index + 1 < self.inventory.len() {
                self.selected = Some(index + 1);
                self.refresh_selection(backend);
            }
        }
    }

    pub fn exit<B: ShopBackend + ?Sized>(&mut self, backend: &mut B) {
        tracing::debug!(target: "roboticon_quest::shop", "shop.exit");
        backend.next_phase();
    }

    /// Recomputes the quantity and price labels and whether the player can afford them.
    pub fn refresh<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        let stock = backend.resource_stock(ResourceType::Roboticon);
        let total = i64::from(backend.sell_price(ResourceType::Roboticon)) * i64::from(self.quantity);

        self.view.quantity_label = format!("{}/{}", self.quantity, stock);
        self.view.purchase_label = format!("[PRICE: {}] PURCHASE", total);
        self.view.purchase_enabled = i64::from(backend.player_funds()) >= total;
    }

    /// Re-reads the player's customisable roboticons and keeps the selection valid.
    pub fn refresh_inventory<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        self.inventory = backend.customisable_roboticons();
        self.selected = match (self.inventory.len(), self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(index)) => Some(index.min(len - 1)),
        };
        self.refresh_selection(backend);
    }

    fn refresh_selection<B: ShopBackend + ?Sized>(&mut self, backend: &B) {
        let price_label = format!(
            "[PRICE: {}] PURCHASE",
            backend.sell_price(ResourceType::Customisation)
        );

        match self.selected.and_then(|index| self.inventory.get(index).map(|r| (index, *r))) {
            Some((index, robot)) => {
                self.view.selected_image = self.art.for_customisation(robot.customisation);
                self.view.selection_label = format!(
                    "[{}/{}] ISSUE NUMBER: {}",
                    index + 1,
                    self.inventory.len(),
                    robot.id
                );
                if robot.customisation.is_none() {
                    self.view.customise_label = price_label;
                    self.view.customise_enabled = true;
                } else {
                    self.view.customise_label = CUSTOMISED_LABEL.to_string();
                    self.view.customise_enabled = false;
                }
            }
            None => {
                self.view.selected_image = self.art.empty.clone();
                self.view.selection_label = NO_SELECTION_LABEL.to_string();
                self.view.customise_label = price_label;
                self.view.customise_enabled = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeBackend {
        stock: u32,
        price: i32,
        customisation_price: i32,
        funds: i32,
        roboticons: Vec<RoboticonSummary>,
        accept: bool,
        next_id: u32,
        phases_advanced: u32,
    }

    impl FakeBackend {
        fn new(stock: u32, price: i32, funds: i32) -> Self {
            Self {
                stock,
                price,
                customisation_price: 15,
                funds,
                roboticons: Vec::new(),
                accept: true,
                next_id: 1,
                phases_advanced: 0,
            }
        }

        fn with_roboticons(mut self, count: u32) -> Self {
            self.issue_roboticons(count);
            self
        }

        fn issue_roboticons(&mut self, count: u32) {
            for _ in 0..count {
                self.roboticons.push(RoboticonSummary {
                    id: RoboticonId(self.next_id),
                    customisation: None,
                });
                self.next_id += 1;
            }
        }
    }

    impl ShopBackend for FakeBackend {
        fn purchase_roboticons(&mut self, quantity: u32) -> PurchaseStatus {
            let cost = self.price * quantity as i32;
            if !self.accept || quantity > self.stock || cost > self.funds {
                return PurchaseStatus::Failure;
            }
            self.stock -= quantity;
            self.funds -= cost;
            self.issue_roboticons(quantity);
            PurchaseStatus::Success
        }

        fn purchase_customisation(
            &mut self,
            resource: ResourceType,
            roboticon: RoboticonId,
        ) -> PurchaseStatus {
            if !self.accept || self.funds < self.customisation_price {
                return PurchaseStatus::Failure;
            }
            match self.roboticons.iter_mut().find(|r| r.id == roboticon) {
                Some(robot) if robot.customisation.is_none() => {
                    robot.customisation = Some(resource);
                    self.funds -= self.customisation_price;
                    PurchaseStatus::Success
                }
                _ => PurchaseStatus::Failure,
            }
        }

        fn sell_price(&self, resource: ResourceType) -> i32 {
            match resource {
                ResourceType::Roboticon => self.price,
                ResourceType::Customisation => self.customisation_price,
                _ => 0,
            }
        }

        fn resource_stock(&self, resource: ResourceType) -> u32 {
            match resource {
                ResourceType::Roboticon => self.stock,
                _ => 0,
            }
        }

        fn player_funds(&self) -> i32 {
            self.funds
        }

        fn customisable_roboticons(&self) -> Vec<RoboticonSummary> {
            self.roboticons.clone()
        }

        fn next_phase(&mut self) {
            self.phases_advanced += 1;
        }
    }

    fn art() -> RoboticonArt<&'static str> {
        RoboticonArt {
            uncustomised: "robot",
            energy: "robot_energy",
            ore: "robot_ore",
            food: "robot_food",
            empty: "no_roboticons",
        }
    }

    #[test]
    fn quantity_is_clamped_to_stock_and_one() {
        let backend = FakeBackend::new(3, 10, 1_000);
        let mut shop = RoboticonShop::new(&backend, art());

        for _ in 0..4 {
            shop.increase_quantity(&backend);
        }
        assert_eq!(shop.quantity(), 3);
        insta::assert_snapshot!(shop.view().quantity_label.as_str(), @"3/3");

        for _ in 0..5 {
            shop.decrease_quantity(&backend);
        }
        assert_eq!(shop.quantity(), 1);
        insta::assert_snapshot!(shop.view().purchase_label.as_str(), @"[PRICE: 10] PURCHASE");
    }

    #[test]
    fn purchase_button_tracks_affordability() {
        let backend = FakeBackend::new(5, 10, 25);
        let mut shop = RoboticonShop::new(&backend, art());

        shop.increase_quantity(&backend);
        assert!(shop.view().purchase_enabled);
        shop.increase_quantity(&backend);
        assert!(!shop.view().purchase_enabled);
        insta::assert_snapshot!(shop.view().purchase_label.as_str(), @"[PRICE: 30] PURCHASE");
    }

    #[test]
    fn successful_purchase_resets_quantity_and_selects_first_roboticon() {
        let mut backend = FakeBackend::new(5, 10, 100);
        let mut shop = RoboticonShop::new(&backend, art());
        assert_eq!(shop.view().selected_image, "no_roboticons");
        assert_eq!(shop.view().selection_label, NO_SELECTION_LABEL);
        assert!(!shop.view().customise_enabled);

        shop.increase_quantity(&backend);
        shop.increase_quantity(&backend);
        assert_eq!(shop.purchase_roboticons(&mut backend), PurchaseStatus::Success);

        assert_eq!(shop.quantity(), 1);
        assert_eq!(shop.view().quantity_label, "1/2");
        assert_eq!(shop.selected_index(), Some(0));
        assert_eq!(shop.view().selected_image, "robot");
        insta::assert_snapshot!(shop.view().selection_label.as_str(), @"[1/3] ISSUE NUMBER: 0001");
        assert_eq!(shop.view().customise_label, "[PRICE: 15] PURCHASE");
        assert!(shop.view().customise_enabled);
    }

    #[test]
    fn failed_purchase_changes_nothing() {
        let mut backend = FakeBackend::new(5, 10, 100);
        let mut shop = RoboticonShop::new(&backend, art());
        shop.increase_quantity(&backend);
        backend.accept = false;
        let before = shop.view().clone();

        assert_eq!(shop.purchase_roboticons(&mut backend), PurchaseStatus::Failure);

        assert_eq!(shop.quantity(), 2);
        assert_eq!(shop.view(), &before);
        assert!(shop.inventory().is_empty());
    }

    #[test]
    fn navigation_is_clamped_to_inventory() {
        let backend = FakeBackend::new(5, 10, 100).with_roboticons(3);
        let mut shop = RoboticonShop::new(&backend, art());

        shop.select_previous(&backend);
        assert_eq!(shop.selected_index(), Some(0));
        for _ in 0..5 {
            shop.select_next(&backend);
        }
        assert_eq!(shop.selected_index(), Some(2));
        assert_eq!(shop.view().selection_label, "[3/3] ISSUE NUMBER: 0003");
        shop.select_previous(&backend);
        assert_eq!(shop.view().selection_label, "[2/3] ISSUE NUMBER: 0002");
    }

    #[test]
    fn navigation_without_inventory_is_a_no_op() {
        let backend = FakeBackend::new(5, 10, 100);
        let mut shop = RoboticonShop::new(&backend, art());
        shop.select_next(&backend);
        shop.select_previous(&backend);
        assert_eq!(shop.selected_index(), None);
    }

    #[test]
    fn customisation_marks_selection_customised() {
        let mut backend = FakeBackend::new(5, 10, 100).with_roboticons(2);
        let mut shop = RoboticonShop::new(&backend, art());
        shop.select_next(&backend);
        shop.select_customisation(CustomisationChoice::OreMining);

        assert_eq!(
            shop.purchase_customisation(&mut backend),
            PurchaseStatus::Success
        );

        assert_eq!(backend.roboticons[1].customisation, Some(ResourceType::Ore));
        assert_eq!(shop.selected_index(), Some(1));
        assert_eq!(shop.view().selected_image, "robot_ore");
        assert_eq!(shop.view().customise_label, CUSTOMISED_LABEL);
        assert!(!shop.view().customise_enabled);

        shop.select_previous(&backend);
        assert!(shop.view().customise_enabled);
    }

    #[test]
    fn customisation_without_selection_fails() {
        let mut backend = FakeBackend::new(5, 10, 100);
        let mut shop = RoboticonShop::new(&backend, art());
        assert_eq!(
            shop.purchase_customisation(&mut backend),
            PurchaseStatus::Failure
        );
    }

    #[test]
    fn failed_customisation_leaves_view_unchanged() {
        let mut backend = FakeBackend::new(5, 10, 5).with_roboticons(1);
        let mut shop = RoboticonShop::new(&backend, art());
        let before = shop.view().clone();

        assert_eq!(
            shop.purchase_customisation(&mut backend),
            PurchaseStatus::Failure
        );
        assert_eq!(shop.view(), &before);
    }

    #[test]
    fn shrinking_inventory_clamps_selection() {
        let mut backend = FakeBackend::new(5, 10, 100).with_roboticons(3);
        let mut shop = RoboticonShop::new(&backend, art());
        shop.select_next(&backend);
        shop.select_next(&backend);

        backend.roboticons.truncate(1);
        shop.refresh_inventory(&backend);
        assert_eq!(shop.selected_index(), Some(0));

        backend.roboticons.clear();
        shop.refresh_inventory(&backend);
        assert_eq!(shop.selected_index(), None);
        assert_eq!(shop.view().selected_image, "no_roboticons");
    }

    #[test]
    fn exit_advances_the_phase() {
        let mut backend = FakeBackend::new(1, 10, 100);
        let mut shop = RoboticonShop::new(&backend, art());
        shop.exit(&mut backend);
        assert_eq!(backend.phases_advanced, 1);
    }

    #[test]
    fn customisation_choices_follow_drop_down_order() {
        assert_eq!(
            CustomisationChoice::from_index(0).map(CustomisationChoice::resource),
            Some(ResourceType::Energy)
        );
        assert_eq!(
            CustomisationChoice::from_index(2).map(CustomisationChoice::label),
            Some("Food Farming")
        );
        assert_eq!(CustomisationChoice::from_index(3), None);
    }
}
