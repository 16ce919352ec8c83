mod common;

use quest_core::shop::CUSTOMISED_LABEL;
use quest_core::{CustomisationChoice, PurchaseStatus, ResourceType};

#[test]
fn quantity_is_clamped_to_market_stock() {
    let (session, mut shop) = common::fixture_session();

    for _ in 0..5 {
        shop.increase_quantity(&session);
    }
    assert_eq!(shop.quantity(), 3);
    assert_eq!(shop.view().quantity_label, "3/3");
    assert_eq!(shop.view().purchase_label, "[PRICE: 30] PURCHASE");
    assert!(shop.view().purchase_enabled);

    for _ in 0..5 {
        shop.decrease_quantity(&session);
    }
    assert_eq!(shop.quantity(), 1);
    assert_eq!(shop.view().quantity_label, "1/3");
}

#[test]
fn buying_out_the_market_then_failing_changes_nothing() {
    let (mut session, mut shop) = common::fixture_session();
    shop.increase_quantity(&session);
    shop.increase_quantity(&session);

    assert_eq!(shop.purchase_roboticons(&mut session), PurchaseStatus::Success);
    assert_eq!(session.player().money(), 20);
    assert_eq!(session.market().resource_stock(ResourceType::Roboticon), 0);
    assert_eq!(shop.inventory().len(), 3);
    assert_eq!(shop.view().quantity_label, "1/0");
    assert_eq!(shop.view().selection_label, "[1/3] ISSUE NUMBER: 0001");

    shop.increase_quantity(&session);
    assert_eq!(shop.quantity(), 1);

    let before = session.snapshot();
    assert_eq!(shop.purchase_roboticons(&mut session), PurchaseStatus::Failure);
    let after = session.snapshot();
    assert_eq!(before.funds, after.funds);
    assert_eq!(before.roboticon_stock, after.roboticon_stock);
    assert_eq!(before.roboticons.len(), after.roboticons.len());
}

#[test]
fn customisation_spends_funds_until_they_run_out() {
    let (mut session, mut shop) = common::fixture_session();
    shop.increase_quantity(&session);
    shop.increase_quantity(&session);
    assert!(shop.purchase_roboticons(&mut session).is_success());

    shop.select_customisation(CustomisationChoice::FoodFarming);
    assert_eq!(
        shop.purchase_customisation(&mut session),
        PurchaseStatus::Success
    );
    assert_eq!(session.player().money(), 5);
    assert_eq!(shop.view().selected_image, "food");
    assert_eq!(shop.view().customise_label, CUSTOMISED_LABEL);
    assert!(!shop.view().customise_enabled);

    shop.select_next(&session);
    assert_eq!(shop.selected_index(), Some(1));
    assert_eq!(shop.view().selected_image, "plain");
    assert_eq!(shop.view().customise_label, "[PRICE: 15] PURCHASE");

    assert_eq!(
        shop.purchase_customisation(&mut session),
        PurchaseStatus::Failure
    );
    assert_eq!(session.player().money(), 5);
    assert_eq!(shop.selected_roboticon().and_then(|r| r.customisation), None);
}

#[test]
fn navigation_stops_at_inventory_edges() {
    let (mut session, mut shop) = common::fixture_session();
    shop.increase_quantity(&session);
    assert!(shop.purchase_roboticons(&mut session).is_success());

    shop.select_previous(&session);
    assert_eq!(shop.selected_index(), Some(0));
    shop.select_next(&session);
    shop.select_next(&session);
    assert_eq!(shop.selected_index(), Some(1));
    assert_eq!(shop.view().selection_label, "[2/2] ISSUE NUMBER: 0002");
}
