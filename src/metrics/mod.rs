//! Code metrics computed from semantic-model token streams.

pub mod calculator;
pub mod halstead;

pub use halstead::HalsteadMetrics;
