use std::path::PathBuf;
use std::sync::Once;

use quest_core::{load_quest_config_from_env, GameSession, RoboticonArt, RoboticonShop};

static INIT: Once = Once::new();

pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("test_quest_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test quest config at {}",
            config_path.display()
        );

        std::env::set_var("QUEST_CONFIG_PATH", &config_path);
    });
}

#[allow(dead_code)]
pub fn test_art() -> RoboticonArt<&'static str> {
    RoboticonArt {
        uncustomised: "plain",
        energy: "energy",
        ore: "ore",
        food: "food",
        empty: "empty",
    }
}

/// A session built from the fixture config, with a shop attached.
#[allow(dead_code)]
pub fn fixture_session() -> (GameSession, RoboticonShop<&'static str>) {
    ensure_test_config();
    let (config, metadata) = load_quest_config_from_env();
    let session = GameSession::with_metadata(config, metadata);
    let shop = RoboticonShop::new(&session, test_art());
    (session, shop)
}
