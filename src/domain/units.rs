/// Square feet in one square metre.
pub const SQFT_PER_M2: f64 = 10.7639;

pub fn m2_to_sqft(m2: f64) -> f64 {
    m2 * SQFT_PER_M2
}
