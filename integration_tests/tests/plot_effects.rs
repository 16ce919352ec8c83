mod common;

use quest_core::{CombineMode, ProductionGroup};

#[test]
fn stacked_effects_unwind_newest_first() {
    let (mut session, _shop) = common::fixture_session();
    let plot = session.plot_at(0, 0).expect("fixture plot");
    let base = ProductionGroup::new(2, 3, 4);
    assert_eq!(session.plot_modifiers(plot), Some(base));

    let harvest = session
        .impose_effect("Bumper Harvest", plot, None)
        .expect("effect exists");
    assert_eq!(harvest, ProductionGroup::new(3, 3, 4));

    let irrigated = session
        .impose_effect("irrigation", plot, None)
        .expect("effect exists");
    assert_eq!(irrigated, ProductionGroup::new(4, 3, 4));

    assert_eq!(session.revert_effect("Irrigation"), Ok(Some(plot)));
    assert_eq!(
        session.plot_modifiers(plot),
        Some(ProductionGroup::new(3, 3, 4))
    );

    assert_eq!(session.revert_all_effects(), 1);
    assert_eq!(session.plot_modifiers(plot), Some(base));
}

#[test]
fn mode_override_and_other_plots_untouched() {
    let (mut session, _shop) = common::fixture_session();
    let target = session.plot_at(1, 1).expect("fixture plot");
    let neighbour = session.plot_at(0, 1).expect("fixture plot");

    let applied = session
        .impose_effect("Blackout", target, Some(CombineMode::Add))
        .expect("effect exists");
    assert_eq!(applied, ProductionGroup::new(4, 3, 8));
    assert_eq!(
        session.plot_modifiers(neighbour),
        Some(ProductionGroup::new(2, 3, 4))
    );
}

#[test]
fn bound_trigger_imposes_and_announces() {
    let (mut session, _shop) = common::fixture_session();
    let plot = session.plot_at(1, 0).expect("fixture plot");

    let unbound = session.trigger_effect("Blackout").expect("effect exists");
    assert_eq!(unbound.title, "Blackout");
    assert_eq!(session.plot_modifiers(plot), Some(ProductionGroup::new(2, 3, 4)));

    assert!(session.bind_effect("Blackout", plot));
    let overlay = session.trigger_effect("Blackout").expect("effect exists");
    assert_eq!(overlay.header, "PLOT EFFECT IMPOSED");
    assert_eq!(overlay.close_label, "CLOSE");
    assert_eq!(session.plot_modifiers(plot), Some(ProductionGroup::new(2, 0, 4)));

    assert_eq!(session.revert_all_effects(), 1);
    assert_eq!(session.plot_modifiers(plot), Some(ProductionGroup::new(2, 3, 4)));
}
