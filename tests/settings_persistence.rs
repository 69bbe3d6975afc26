use image_pin::settings::{Settings, DEFAULT_OPACITY};
use tempfile::tempdir;

#[test]
fn missing_file_yields_default_opacity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let settings = Settings::load(path.to_str().unwrap());

    assert_eq!(settings.opacity, DEFAULT_OPACITY);
}

#[test]
fn corrupt_document_yields_default_opacity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{\"opacity\": not json").unwrap();

    let settings = Settings::load(path.to_str().unwrap());

    assert_eq!(settings.opacity, DEFAULT_OPACITY);
}

#[test]
fn empty_object_uses_field_default() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings.opacity, DEFAULT_OPACITY);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let path = path.to_str().unwrap();

    let settings = Settings { opacity: 0.42 };
    settings.save(path).unwrap();

    let reloaded = Settings::load(path);
    assert_eq!(reloaded.opacity, 0.42);
}

#[test]
fn every_slider_value_survives_persistence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let path = path.to_str().unwrap();

    for percent in 10..=95u32 {
        let opacity = percent as f32 / 100.0;
        Settings { opacity }.save(path).unwrap();
        let reloaded = Settings::load(path);
        assert_eq!(reloaded.opacity, opacity, "opacity {percent}% changed across save/load");
    }
}
