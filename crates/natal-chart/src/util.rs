/// Round to 2 decimal places, as reported in chart output.
///
/// Exact ties go to the even neighbour, so 90.125 reports as 90.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
