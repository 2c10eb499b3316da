use rust_decimal::{Decimal, RoundingStrategy};

/// Canonical string form of a decimal: trailing zeros stripped.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Format a value with exactly `dp` decimal places.
///
/// The value is rounded half away from zero, then padded with trailing
/// zeros, so `1500` renders as `1500.00` for `dp = 2`.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}
