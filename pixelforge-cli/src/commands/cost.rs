//! Price estimate

use colored::*;
use pixelforge_core::calculate_cost;
use pixelforge_core::domain::job::OutputSize;
use pixelforge_core::pricing::price_per_item;

pub fn print_cost(size: OutputSize, count: u32) {
    println!(
        "{} x {} at ${:.2} = {}",
        count,
        size,
        price_per_item(size),
        format_cost(calculate_cost(size, count)).bold()
    );
}

pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}
