use paper_bombing::storage::{load_config, parse_config, save_config};
use paper_bombing::{
    ConfigError, DisplaySettings, GameConfig, PartialConfig, UnitKind, UnitSpec,
    DEFAULT_GRID_SIZE,
};

#[test]
fn test_defaults_are_valid() {
    let config = GameConfig::default();
    assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
    config.validate().unwrap();
    assert_eq!(config.roster.total_units(), 11);
    assert_eq!(config.roster.total_cells(), 23);
    assert_eq!(
        *config.roster.spec(UnitKind::Bunker),
        UnitSpec::new(1, 3, 2, 2)
    );
}

#[test]
fn test_placement_order_largest_first() {
    let config = GameConfig::default();
    assert_eq!(
        config.roster.placement_order(),
        [
            UnitKind::Bunker,
            UnitKind::Artillery,
            UnitKind::Plane,
            UnitKind::Tank,
            UnitKind::Soldier
        ]
    );

    let mut roster = config.roster;
    roster.spec_mut(UnitKind::Soldier).width = 5;
    assert_eq!(roster.placement_order()[0], UnitKind::Soldier);
}

#[test]
fn test_grid_size_range() {
    assert!(matches!(
        GameConfig::with_grid_size(5).validate(),
        Err(ConfigError::GridSizeOutOfRange { size: 5, .. })
    ));
    assert!(matches!(
        GameConfig::with_grid_size(21).validate(),
        Err(ConfigError::GridSizeOutOfRange { size: 21, .. })
    ));
    GameConfig::with_grid_size(6).validate().unwrap();
    GameConfig::with_grid_size(20).validate().unwrap();
}

#[test]
fn test_invalid_rosters() {
    let mut config = GameConfig::default();
    config.roster.tank.health = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroHealth(UnitKind::Tank)));

    let mut config = GameConfig::default();
    config.roster.plane.height = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroFootprint(UnitKind::Plane))
    );

    let mut config = GameConfig::with_grid_size(6);
    config.roster.artillery.width = 7;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::UnitTooLarge {
            kind: UnitKind::Artillery,
            ..
        })
    ));

    let mut config = GameConfig::default();
    for kind in UnitKind::ALL {
        config.roster.spec_mut(kind).count = 0;
    }
    assert_eq!(config.validate(), Err(ConfigError::EmptyRoster));

    let mut config = GameConfig::with_grid_size(6);
    config.roster.soldier.count = 20;
    assert_eq!(
        config.validate(),
        Err(ConfigError::RosterTooDense {
            cells: 39,
            capacity: 36
        })
    );
}

#[test]
fn test_empty_json_gives_defaults() {
    assert_eq!(parse_config("{}").unwrap(), GameConfig::default());
}

#[test]
fn test_partial_json_fills_gaps() {
    let json = r#"{
        "gridSize": 10,
        "units": { "tank": { "count": 1, "hp": 4 } },
        "display": { "dotSize": 20 }
    }"#;
    let config = parse_config(json).unwrap();
    assert_eq!(config.grid_size, 10);
    assert_eq!(config.roster.tank, UnitSpec::new(1, 4, 2, 1));
    assert_eq!(
        config.roster.soldier,
        UnitSpec::default_for(UnitKind::Soldier)
    );
    assert_eq!(
        config.display,
        DisplaySettings {
            dot_size: 20,
            ..DisplaySettings::default()
        }
    );
}

#[test]
fn test_snake_case_keys_accepted() {
    let json = r#"{ "grid_size": 8, "roster": { "bunker": { "width": 3, "height": 3 } } }"#;
    let config = parse_config(json).unwrap();
    assert_eq!(config.grid_size, 8);
    assert_eq!(config.roster.bunker.width, 3);
    assert_eq!(config.roster.bunker.height, 3);
}

#[test]
fn test_invalid_json_config_rejected() {
    assert!(parse_config(r#"{ "gridSize": 40 }"#).is_err());
    assert!(parse_config("not json").is_err());
}

#[test]
fn test_partial_resolve_without_validation() {
    let partial = PartialConfig {
        grid_size: Some(2),
        ..PartialConfig::default()
    };
    assert_eq!(partial.resolve().grid_size, 2);
    assert!(GameConfig::try_from(partial).is_err());
}

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("paper-bombing-config-{}.json", std::process::id()));
    let mut config = GameConfig::with_grid_size(14);
    config.roster.plane.count = 2;
    config.display.sound_enabled = false;
    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_huge_dimensions_do_not_overflow() {
    // an unused kind may carry any positive shape
    let config =
        parse_config(r#"{"units":{"tank":{"count":0,"w":4294967296,"h":4294967296}}}"#).unwrap();
    assert_eq!(config.roster.tank.count, 0);
    assert_eq!(config.roster.total_cells(), 17);

    let mut roster = GameConfig::default().roster;
    roster.tank.width = usize::MAX;
    roster.tank.height = usize::MAX;
    assert_eq!(roster.tank.area(), usize::MAX);
    assert_eq!(roster.total_cells(), usize::MAX);

    let err = parse_config(r#"{"units":{"tank":{"w":4294967296,"h":4294967296}}}"#).unwrap_err();
    assert!(format!("{:#}", err).contains("does not fit"));

    let mut config = GameConfig::default();
    config.roster.soldier.count = u32::MAX;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::RosterTooDense { .. })
    ));
}
