//! Default value functions for serde deserialization.

pub fn magnify_distance() -> f32 {
    0.2
}

pub fn resolution() -> f32 {
    0.01
}

pub fn distance_threshold() -> f32 {
    0.01
}

pub fn max_cells_per_axis() -> usize {
    4096
}

pub fn enabled() -> bool {
    true
}

pub fn output_dir() -> String {
    "./output".to_string()
}
