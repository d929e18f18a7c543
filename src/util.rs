/// Numeric conversion helpers.
///
/// Script numbers are always `f64`. This module converts them to array
/// positions, signed offsets and exit statuses, and converts lengths back.
pub mod num;
