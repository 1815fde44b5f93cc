use castle_defence_core::Vector2;

/// Route of the easy map, from the left edge to the right edge.
pub const EASY_PATH: [Vector2; 8] = [
    Vector2::new(0.0, 360.0),
    Vector2::new(300.0, 360.0),
    Vector2::new(300.0, 560.0),
    Vector2::new(500.0, 560.0),
    Vector2::new(500.0, 160.0),
    Vector2::new(1000.0, 160.0),
    Vector2::new(1000.0, 360.0),
    Vector2::new(1280.0, 360.0),
];
