use std::fs;
use std::path::Path;

use slidekit_config::{CapabilityProfile, ConfigSource, SliderConfig};
use slidekit_core::{Mode, SliderHandle};
use tempfile::tempdir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn path_variable_wins_over_inline_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[slider]\nitems = 2\n").unwrap();
    let path_str = path.display().to_string();

    let (config, source) = SliderConfig::load_with(
        |name| match name {
            "SLIDEKIT_CONFIG_PATH" => Some(path_str.clone()),
            "SLIDEKIT_CONFIG_JSON" => Some(r#"{ "slider": { "items": 7 } }"#.into()),
            _ => None,
        },
        dir.path(),
    )
    .unwrap();

    assert_eq!(config.slider.items, 2);
    assert_eq!(source, ConfigSource::EnvPath(path));
}

#[test]
fn inline_json_is_used_without_a_path() {
    let dir = tempdir().unwrap();
    let (config, source) = SliderConfig::load_with(
        |name| {
            (name == "SLIDEKIT_CONFIG_JSON")
                .then(|| r#"{ "slider": { "mode": "gallery" }, "stage": { "slides": 4 } }"#.into())
        },
        dir.path(),
    )
    .unwrap();

    assert_eq!(source, ConfigSource::EnvInline);
    assert_eq!(config.slider.mode, Mode::Gallery);
    assert_eq!(config.stage.slides, 4);
}

#[test]
fn blank_variables_are_skipped() {
    let dir = tempdir().unwrap();
    let (config, source) = SliderConfig::load_with(|_| Some("   ".into()), dir.path()).unwrap();
    assert_eq!(source, ConfigSource::Default);
    assert_eq!(config, SliderConfig::default());
}

#[test]
fn default_files_are_searched_in_order() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/slider.json"),
        r#"{ "stage": { "profile": "legacy" } }"#,
    )
    .unwrap();

    let (config, source) = SliderConfig::load_with(no_env, dir.path()).unwrap();
    assert_eq!(source, ConfigSource::File(dir.path().join("config/slider.json")));
    assert_eq!(config.stage.profile, CapabilityProfile::Legacy);

    fs::write(dir.path().join("slider.toml"), "[stage]\nwidth = 320\n").unwrap();
    let (config, source) = SliderConfig::load_with(no_env, dir.path()).unwrap();
    assert_eq!(source, ConfigSource::File(dir.path().join("slider.toml")));
    assert_eq!(config.stage.width, 320.0);
}

#[test]
fn unknown_extension_tries_both_formats() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slider.conf");
    fs::write(&path, r#"{ "slider": { "speed": 120 } }"#).unwrap();

    let config = SliderConfig::load_from_file(&path).unwrap();
    assert_eq!(config.slider.speed, 120);
}

#[test]
fn broken_files_name_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slider.toml");
    fs::write(&path, "[slider\nitems = ").unwrap();

    let err = SliderConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("slider.toml"), "{err}");

    let missing = SliderConfig::load_from_file(Path::new("/definitely/not/here.toml"));
    assert!(format!("{:#}", missing.unwrap_err()).contains("failed to read"));
}

#[test]
fn loaded_config_mounts_a_slider() {
    let config = SliderConfig::parse_from_str(
        r#"
        [slider]
        items = 2
        loop = false

        [stage]
        slides = 6
        width = 600
        "#,
        "test",
    )
    .unwrap();
    config.check().unwrap();

    let slider = SliderHandle::mount(
        config.stage.host(),
        config.slider.clone(),
        std::sync::Arc::new(config.stage.profile.capabilities()),
        std::time::Instant::now(),
    );
    let info = slider.info().expect("mounted");
    assert_eq!(info.items, 2);
    assert_eq!(info.index_max, 4);
}
