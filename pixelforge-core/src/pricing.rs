//! Pricing and option catalogues
//!
//! Prices are per generated item and fixed on the client.

use crate::domain::job::OutputSize;

/// Aspect ratios offered to users, with their display labels
pub const ASPECT_RATIOS: [(&str, &str); 5] = [
    ("1:1", "Square"),
    ("16:9", "Wide"),
    ("9:16", "Portrait"),
    ("4:3", "Landscape"),
    ("3:4", "Tall"),
];

/// Temperatures offered to users (creativity)
pub const TEMPERATURES: [f64; 5] = [0.0, 0.5, 1.0, 1.5, 2.0];

pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Price of a single item at the given size
pub fn price_per_item(size: OutputSize) -> f64 {
    match size {
        OutputSize::OneK => 0.02,
        OutputSize::TwoK => 0.07,
        OutputSize::FourK => 0.12,
    }
}

/// Total price of `count` items at the given size
pub fn calculate_cost(size: OutputSize, count: u32) -> f64 {
    price_per_item(size) * f64::from(count)
}

/// Whether the ratio is one of the offered choices
pub fn is_known_aspect_ratio(ratio: &str) -> bool {
    ASPECT_RATIOS.iter().any(|(r, _)| *r == ratio)
}
