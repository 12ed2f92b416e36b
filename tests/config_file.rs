use std::path::Path;

use torus_snake::{ConfigurationError, GameConfig, GameSession};

#[test]
fn example_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("snake.example.yaml");
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config, GameConfig::default());
    config.validate().unwrap();
}

#[test]
fn session_refuses_zero_frame_rate() {
    let config = GameConfig::from_yaml("frame_rate: 0").unwrap();
    assert!(matches!(
        GameSession::with_seed(&config, 1),
        Err(ConfigurationError::ZeroFrameRate)
    ));
}

#[test]
fn layout_truncates_uneven_canvas() {
    let config = GameConfig::from_yaml("canvas_width: 47\ncanvas_height: 25\ncolumns: 15\nrows: 12").unwrap();
    let layout = config.layout().unwrap();
    assert_eq!(layout.canvas_size(), (45, 24));
    assert_eq!(layout.cell_size(), (3, 2));
}
