mod common;

use quest_core::{load_quest_config_from_env, GameSession, ResourceType};

#[test]
fn env_override_replaces_builtin_config() {
    common::ensure_test_config();
    let (config, metadata) = load_quest_config_from_env();

    let path = metadata.path().expect("override path recorded");
    assert!(path.ends_with("test_quest_config.json"));
    assert_eq!(config.player.starting_money, 50);
    assert_eq!(config.effects.len(), 3);

    let session = GameSession::with_metadata(config, metadata);
    assert_eq!(session.plot_grid().len(), 4);
    assert_eq!(session.market().resource_stock(ResourceType::Roboticon), 3);
    assert_eq!(session.player().money(), 50);
}
