/// Closed-form Shannon entropy over cached weight sums
pub mod entropy;
