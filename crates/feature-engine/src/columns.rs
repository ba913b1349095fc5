//! Feature column naming

use serde::{Deserialize, Serialize};

/// Kinds of derived per-channel columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    RollingMean,
    RollingStd,
    RollingMin,
    RollingMax,
    Deriv1,
    Deriv2,
    DomFreq,
    DomMag,
}

impl FeatureKind {
    /// Every kind, in the order columns are appended
    pub const ALL: [FeatureKind; 8] = [
        FeatureKind::RollingMean,
        FeatureKind::RollingStd,
        FeatureKind::RollingMin,
        FeatureKind::RollingMax,
        FeatureKind::Deriv1,
        FeatureKind::Deriv2,
        FeatureKind::DomFreq,
        FeatureKind::DomMag,
    ];

    /// Column name suffix
    pub fn suffix(self) -> &'static str {
        match self {
            FeatureKind::RollingMean => "rolling_mean",
            FeatureKind::RollingStd => "rolling_std",
            FeatureKind::RollingMin => "rolling_min",
            FeatureKind::RollingMax => "rolling_max",
            FeatureKind::Deriv1 => "deriv1",
            FeatureKind::Deriv2 => "deriv2",
            FeatureKind::DomFreq => "dom_freq",
            FeatureKind::DomMag => "dom_mag",
        }
    }

    /// `{channel}_{suffix}`
    pub fn column_name(self, channel: &str) -> String {
        format!("{}_{}", channel, self.suffix())
    }
}
