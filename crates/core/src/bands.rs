//! MUAC classification bands.
//!
//! A mid-upper arm circumference measurement (in centimetres) falls into one
//! of three numeric bands bounded by externally supplied thresholds. A fourth
//! band, follow-up, is not tied to a value and marks post-intervention
//! tracking.
//!
//! Band boundaries are half-open: severe is strictly below the severe
//! threshold, so a value exactly at it is moderate.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Default severe threshold (cm); values below it are severe acute malnutrition.
pub const DEFAULT_SEVERE_CM: f64 = 11.5;

/// Default moderate threshold (cm); values below it (and at or above severe)
/// are moderate acute malnutrition.
pub const DEFAULT_MODERATE_CM: f64 = 12.5;

/// Default normal threshold (cm); values at or above it are adequate.
pub const DEFAULT_NORMAL_CM: f64 = 12.5;

/// The three centimetre cut-offs that define the numeric bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MuacThresholds {
    pub severe_cm: f64,
    pub moderate_cm: f64,
    pub normal_cm: f64,
}

impl Default for MuacThresholds {
    fn default() -> Self {
        Self {
            severe_cm: DEFAULT_SEVERE_CM,
            moderate_cm: DEFAULT_MODERATE_CM,
            normal_cm: DEFAULT_NORMAL_CM,
        }
    }
}

impl MuacThresholds {
    /// Build thresholds, requiring `0 < severe < moderate <= normal`.
    pub fn new(severe_cm: f64, moderate_cm: f64, normal_cm: f64) -> Result<Self, CoreError> {
        let thresholds = Self {
            severe_cm,
            moderate_cm,
            normal_cm,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let all_finite = [self.severe_cm, self.moderate_cm, self.normal_cm]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || self.severe_cm <= 0.0 {
            return Err(CoreError::Validation(
                "MUAC thresholds must be positive finite numbers".to_string(),
            ));
        }
        if self.severe_cm >= self.moderate_cm {
            return Err(CoreError::Validation(format!(
                "Severe threshold ({}) must be below moderate threshold ({})",
                self.severe_cm, self.moderate_cm
            )));
        }
        if self.moderate_cm > self.normal_cm {
            return Err(CoreError::Validation(format!(
                "Moderate threshold ({}) must not exceed normal threshold ({})",
                self.moderate_cm, self.normal_cm
            )));
        }
        Ok(())
    }

    /// Classify a measurement into a numeric band.
    ///
    /// Returns `None` for values in the gap `[moderate, normal)`, which only
    /// exists when the two thresholds differ.
    pub fn classify(&self, muac_cm: f64) -> Option<Band> {
        if muac_cm < self.severe_cm {
            Some(Band::Severe)
        } else if muac_cm < self.moderate_cm {
            Some(Band::Moderate)
        } else if muac_cm >= self.normal_cm {
            Some(Band::Adequate)
        } else {
            None
        }
    }

    /// Lower and upper bound of `band`; `None` is an open end.
    pub fn bounds(&self, band: Band) -> (Option<f64>, Option<f64>) {
        match band {
            Band::Severe => (None, Some(self.severe_cm)),
            Band::Moderate => (Some(self.severe_cm), Some(self.moderate_cm)),
            Band::Adequate => (Some(self.normal_cm), None),
            Band::FollowUp => (None, None),
        }
    }
}

// ---------------------------------------------------------------------------
// Colors and priorities
// ---------------------------------------------------------------------------

/// Display color carried by a classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl BandColor {
    pub fn hex(self) -> &'static str {
        match self {
            BandColor::Red => "#DC2626",
            BandColor::Yellow => "#F59E0B",
            BandColor::Green => "#16A34A",
            BandColor::Blue => "#2563EB",
        }
    }
}

/// Triage priority of a band; lower values are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPriority {
    Critical = 1,
    High = 2,
    Medium = 3,
    Low = 4,
}

impl BandPriority {
    pub fn level(self) -> i32 {
        self as i32
    }
}

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

pub const CODE_SEVERE: &str = "SAM";
pub const CODE_MODERATE: &str = "MAM";
pub const CODE_ADEQUATE: &str = "NORMAL";
pub const CODE_FOLLOW_UP: &str = "FOLLOW_UP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Severe,
    Moderate,
    Adequate,
    FollowUp,
}

impl Band {
    /// Every band, in tag insertion order.
    pub const ALL: [Band; 4] = [Band::Severe, Band::Moderate, Band::Adequate, Band::FollowUp];

    /// The bands backed by a threshold range.
    pub const NUMERIC: [Band; 3] = [Band::Severe, Band::Moderate, Band::Adequate];

    /// Classification code; the natural key of tags and recommendations.
    pub fn code(self) -> &'static str {
        match self {
            Band::Severe => CODE_SEVERE,
            Band::Moderate => CODE_MODERATE,
            Band::Adequate => CODE_ADEQUATE,
            Band::FollowUp => CODE_FOLLOW_UP,
        }
    }

    pub fn from_code(code: &str) -> Option<Band> {
        Band::ALL.into_iter().find(|band| band.code() == code)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Band::FollowUp)
    }

    pub fn color(self) -> BandColor {
        match self {
            Band::Severe => BandColor::Red,
            Band::Moderate => BandColor::Yellow,
            Band::Adequate => BandColor::Green,
            Band::FollowUp => BandColor::Blue,
        }
    }

    pub fn priority(self) -> BandPriority {
        match self {
            Band::Severe => BandPriority::Critical,
            Band::Moderate => BandPriority::High,
            Band::FollowUp => BandPriority::Medium,
            Band::Adequate => BandPriority::Low,
        }
    }
}
