/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round_bp(value: f64) -> f64 {
    round_to(value, 4)
}
