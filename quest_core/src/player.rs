use bevy::prelude::{Entity, Resource};

use crate::{
    market::{Market, PurchaseStatus},
    resource_group::ResourceType,
    roboticon::{Roboticon, RoboticonId, RoboticonSummary},
};

#[derive(Resource, Debug, Clone, Default)]
pub struct Player {
    money: i32,
    roboticons: Vec<Roboticon>,
}

impl Player {
    pub fn new(money: i32) -> Self {
        Self {
            money,
            roboticons: Vec::new(),
        }
    }

    pub fn money(&self) -> i32 {
        self.money
    }

    pub fn set_money(&mut self, money: i32) {
        self.money = money;
    }

    pub fn roboticons(&self) -> &[Roboticon] {
        &self.roboticons
    }

    pub fn roboticon(&self, id: RoboticonId) -> Option<&Roboticon> {
        self.roboticons.iter().find(|robot| robot.id == id)
    }

    /// Roboticons that are not installed on a plot and so may still be customised.
    pub fn customisable_roboticons(&self) -> Vec<RoboticonSummary> {
        self.roboticons
            .iter()
            .filter(|robot| !robot.is_installed())
            .map(Roboticon::summary)
            .collect()
    }

    pub fn purchase_roboticons(&mut self, quantity: u32, market: &mut Market) -> PurchaseStatus {
        let cost = i64::from(market.sell_price(ResourceType::Roboticon)) * i64::from(quantity);
        if quantity == 0
            || market.resource_stock(ResourceType::Roboticon) < quantity
            || i64::from(self.money) < cost
        {
            tracing::info!(
                target: "roboticon_quest::market",
                quantity,
                cost,
                money = self.money,
                "purchase.roboticons=failure"
            );
            return PurchaseStatus::Failure;
        }

        if !market.take_stock(ResourceType::Roboticon, quantity) {
            return PurchaseStatus::Failure;
        }
        // cost <= money, so it fits in i32
        self.money -= cost as i32;
        for _ in 0..quantity {
            let id = market.issue_roboticon_id();
            self.roboticons.push(Roboticon::new(id));
        }

        tracing::info!(
            target: "roboticon_quest::market",
            quantity,
            cost,
            money = self.money,
            "purchase.roboticons=success"
        );
        PurchaseStatus::Success
    }

    pub fn purchase_customisation(
        &mut self,
        resource: ResourceType,
        roboticon: RoboticonId,
        market: &Market,
    ) -> PurchaseStatus {
        let cost = market.sell_price(ResourceType::Customisation);
        let money = self.money;
        let Some(robot) = self
            .roboticons
            .iter_mut()
            .find(|robot| robot.id == roboticon)
        else {
            return PurchaseStatus::Failure;
        };

        if !resource.is_production() || robot.customisation.is_some() || money < cost {
            tracing::info!(
                target: "roboticon_quest::market",
                %roboticon,
                %resource,
                cost,
                money,
                "purchase.customisation=failure"
            );
            return PurchaseStatus::Failure;
        }

        robot.customisation = Some(resource);
        self.money -= cost;

        tracing::info!(
            target: "roboticon_quest::market",
            %roboticon,
            %resource,
            cost,
            money = self.money,
            "purchase.customisation=success"
        );
        PurchaseStatus::Success
    }

    /// Places a roboticon on a plot. Fails for unknown or already installed units.
    pub fn install_roboticon(&mut self, roboticon: RoboticonId, plot: Entity) -> bool {
        match self
            .roboticons
            .iter_mut()
            .find(|robot| robot.id == roboticon)
        {
            Some(robot) if !robot.is_installed() => {
                robot.installed_on = Some(plot);
                tracing::debug!(
                    target: "roboticon_quest::market",
                    %roboticon,
                    ?plot,
                    "roboticon.installed"
                );
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;
    use bevy::prelude::World;

    fn market(stock: u32, price: i32, customisation_price: i32) -> Market {
        let mut market = Market::from_config(&MarketConfig::default());
        market.set_resource_stock(ResourceType::Roboticon, stock);
        market.set_sell_price(ResourceType::Roboticon, price);
        market.set_sell_price(ResourceType::Customisation, customisation_price);
        market
    }

    #[test]
    fn roboticon_purchase_moves_money_and_stock() {
        let mut market = market(5, 10, 15);
        let mut player = Player::new(100);

        assert_eq!(
            player.purchase_roboticons(3, &mut market),
            PurchaseStatus::Success
        );
        assert_eq!(player.money(), 70);
        assert_eq!(market.resource_stock(ResourceType::Roboticon), 2);
        assert_eq!(player.roboticons().len(), 3);
        assert!(player.roboticons().iter().all(|r| r.customisation.is_none()));
    }

    #[test]
    fn roboticon_purchase_fails_without_funds_or_stock() {
        let mut market = market(2, 10, 15);
        let mut player = Player::new(15);

        assert_eq!(
            player.purchase_roboticons(2, &mut market),
            PurchaseStatus::Failure
        );
        player.set_money(1_000);
        assert_eq!(
            player.purchase_roboticons(3, &mut market),
            PurchaseStatus::Failure
        );
        assert_eq!(
            player.purchase_roboticons(0, &mut market),
            PurchaseStatus::Failure
        );
        assert_eq!(market.resource_stock(ResourceType::Roboticon), 2);
        assert!(player.roboticons().is_empty());
    }

    #[test]
    fn customisation_applies_once() {
        let mut market = market(1, 10, 15);
        let mut player = Player::new(100);
        player.purchase_roboticons(1, &mut market);
        let id = player.roboticons()[0].id;

        assert_eq!(
            player.purchase_customisation(ResourceType::Ore, id, &market),
            PurchaseStatus::Success
        );
        assert_eq!(player.money(), 75);
        assert_eq!(
            player.purchase_customisation(ResourceType::Food, id, &market),
            PurchaseStatus::Failure
        );
        assert_eq!(
            player.roboticon(id).and_then(|r| r.customisation),
            Some(ResourceType::Ore)
        );
    }

    #[test]
    fn customisation_rejects_trade_resources() {
        let mut market = market(1, 10, 15);
        let mut player = Player::new(100);
        player.purchase_roboticons(1, &mut market);
        let id = player.roboticons()[0].id;

        assert_eq!(
            player.purchase_customisation(ResourceType::Roboticon, id, &market),
            PurchaseStatus::Failure
        );
        assert_eq!(player.money(), 90);
    }

    #[test]
    fn installed_roboticons_leave_the_customisable_list() {
        let mut world = World::new();
        let plot = world.spawn_empty().id();
        let mut market = market(2, 10, 15);
        let mut player = Player::new(100);
        player.purchase_roboticons(2, &mut market);
        let id = player.roboticons()[0].id;

        assert!(player.install_roboticon(id, plot));
        assert!(!player.install_roboticon(id, plot));

        let remaining = player.customisable_roboticons();
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].id, id);
    }
}
