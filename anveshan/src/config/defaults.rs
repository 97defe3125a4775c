//! Default value functions for serde deserialization.

pub fn sensor_range() -> f32 {
    100.0
}

pub fn sensor_half_angle() -> f32 {
    std::f32::consts::FRAC_PI_4
}

pub fn cell_size() -> f32 {
    10.0
}

pub fn grid_margin() -> usize {
    2
}

pub fn pivot_offset() -> f32 {
    10.0
}

pub fn simplify_epsilon() -> f32 {
    1e-3
}

pub fn linear_speed() -> f32 {
    10.0
}

pub fn angular_speed() -> f32 {
    0.2
}

pub fn heading_tolerance() -> f32 {
    1e-3
}

pub fn dwell_stop_probability() -> f32 {
    0.05
}

pub fn window() -> usize {
    5
}

pub fn frontier_gain() -> f32 {
    1.0
}

pub fn visit_radius() -> usize {
    3
}

pub fn visit_increment() -> f32 {
    1.0
}

pub fn demotion_penalty() -> f32 {
    20.0
}

pub fn refinement_ratio() -> f32 {
    0.95
}

pub fn min_target_distance() -> f32 {
    1e-3
}

pub fn start_x() -> f32 {
    50.0
}

pub fn start_y() -> f32 {
    50.0
}
