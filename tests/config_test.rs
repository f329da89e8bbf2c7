use std::path::{Path, PathBuf};

use skyline::{
    camera::{ProjectionKind, ViewPreset},
    config::{Config, ConfigError},
    models::Building,
    pipelines::LightingModel,
};

#[test]
fn empty_file_gives_the_stock_scene() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.start.lighting, LightingModel::Phong);
    assert_eq!(config.start.building, Building::BurjAlArab);
    assert!(config.start.day);
}

#[test]
fn partial_tables_keep_the_other_defaults() {
    let config = Config::from_toml_str(
        r#"
        asset_dir = "/opt/skyline"

        [window]
        title = "Towers"

        [textures]
        floor = "sand.png"

        [start]
        lighting = "Gouraud"
        building = "EmpireState"
        view = 3
        projection = "Orthographic"
        day = false
        "#,
    )
    .unwrap();

    assert_eq!(config.asset_dir, PathBuf::from("/opt/skyline"));
    assert_eq!(config.window.title, "Towers");
    assert_eq!(config.window.height, 720);
    assert_eq!(config.textures.floor, "sand.png");
    assert_eq!(config.textures.willis, "dice2.png");

    let frame = config.start.frame_config();
    assert_eq!(frame.lighting, LightingModel::Gouraud);
    assert_eq!(frame.building, Building::EmpireState);
    assert_eq!(frame.view, ViewPreset::Oblique);
    assert_eq!(frame.projection, ProjectionKind::Orthographic);
    assert!(!config.start.day);
}

#[test]
fn invalid_values_are_rejected() {
    for text in [
        "[start]\nview = 9",
        "[start]\nlighting = \"Toon\"",
        "[window]\nwidth = \"wide\"",
        "asset_dir = ",
    ] {
        assert!(
            matches!(Config::from_toml_str(text), Err(ConfigError::Parse(_))),
            "{} was accepted",
            text
        );
    }
}

#[test]
fn missing_file_names_the_path() {
    let err = Config::load_from_file(Path::new("/nonexistent/skyline.toml")).unwrap_err();
    assert!(matches!(&err, ConfigError::Io { path, .. } if path.contains("nonexistent")));
}

#[test]
fn burj_assets_come_from_the_texture_table() {
    let config =
        Config::from_toml_str("burj_mesh = \"hull.obj\"\n[textures]\nburj_pylon = \"sail.png\"")
            .unwrap();
    let assets = config.burj_assets();
    assert_eq!(assets.mesh, "hull.obj");
    assert_eq!(assets.base_texture, "burj_base.png");
    assert_eq!(assets.pylon_texture, "sail.png");
    assert_eq!(config.textures.for_building(Building::BurjAlArab), "dice4.png");
}
