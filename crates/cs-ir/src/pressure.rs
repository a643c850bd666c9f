//! Time-pressure levels derived from the fraction of time remaining.

/// Coarse urgency bucket, ordered from calm to critical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PressureLevel {
    /// More than half the time left
    #[default]
    Low,
    /// More than a quarter left
    Medium,
    /// More than a tenth left
    High,
    Critical,
}

impl PressureLevel {
    /// Classify a time-remaining fraction (0.0 = expired, 1.0 = full).
    pub fn from_fraction(remaining: f32) -> Self {
        if remaining > 0.5 {
            PressureLevel::Low
        } else if remaining > 0.25 {
            PressureLevel::Medium
        } else if remaining > 0.1 {
            PressureLevel::High
        } else {
            // NaN lands here too
            PressureLevel::Critical
        }
    }
}
