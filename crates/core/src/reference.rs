//! Baseline reference catalog: classification tags, per-band
//! recommendations and the FAQ knowledge base.
//!
//! The catalog is static text. Threshold-dependent values (recommendation
//! bounds) are filled in from [`MuacThresholds`] at seed time.

use crate::bands::{Band, MuacThresholds};

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// A classification tag definition for one band.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpec {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub priority: i32,
}

impl TagSpec {
    pub fn for_band(band: Band) -> Self {
        let (name, description) = match band {
            Band::Severe => (
                "Severe Acute Malnutrition",
                "MUAC below the severe threshold; urgent referral required",
            ),
            Band::Moderate => (
                "Moderate Acute Malnutrition",
                "MUAC between the severe and moderate thresholds",
            ),
            Band::Adequate => (
                "Adequate Nutrition",
                "MUAC at or above the normal threshold",
            ),
            Band::FollowUp => (
                "Follow-up",
                "Post-intervention tracking, independent of the measured value",
            ),
        };
        Self {
            code: band.code(),
            name,
            description,
            color: band.color().hex(),
            priority: band.priority().level(),
        }
    }
}

/// One tag per band, in insertion order.
pub fn tag_catalog() -> Vec<TagSpec> {
    Band::ALL.into_iter().map(TagSpec::for_band).collect()
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Guidance attached to a band.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSpec {
    pub band_code: &'static str,
    pub title: &'static str,
    pub guidance: &'static str,
    pub min_muac_cm: Option<f64>,
    pub max_muac_cm: Option<f64>,
    pub follow_up_days: i32,
}

impl RecommendationSpec {
    pub fn for_band(band: Band, thresholds: &MuacThresholds) -> Self {
        let (title, guidance, follow_up_days) = match band {
            Band::Severe => (
                "Refer for therapeutic feeding",
                "Refer immediately to the nearest outpatient therapeutic programme or \
                 stabilisation centre. Check for oedema and medical complications.",
                7,
            ),
            Band::Moderate => (
                "Enrol in supplementary feeding",
                "Enrol in a supplementary feeding programme, counsel the caregiver on \
                 feeding practices and re-measure at the next visit.",
                14,
            ),
            Band::Adequate => (
                "Continue routine growth monitoring",
                "No nutritional intervention needed. Continue routine screening and \
                 promote age-appropriate feeding.",
                90,
            ),
            Band::FollowUp => (
                "Track recovery after intervention",
                "Re-measure at each scheduled visit until the patient stays in the \
                 adequate band for two consecutive visits.",
                14,
            ),
        };
        let (min_muac_cm, max_muac_cm) = thresholds.bounds(band);
        Self {
            band_code: band.code(),
            title,
            guidance,
            min_muac_cm,
            max_muac_cm,
            follow_up_days,
        }
    }
}

/// One recommendation per band, in insertion order.
pub fn recommendation_catalog(thresholds: &MuacThresholds) -> Vec<RecommendationSpec> {
    Band::ALL
        .into_iter()
        .map(|band| RecommendationSpec::for_band(band, thresholds))
        .collect()
}

// ---------------------------------------------------------------------------
// FAQs
// ---------------------------------------------------------------------------

pub const FAQ_CATEGORY_MEASUREMENT: &str = "measurement";
pub const FAQ_CATEGORY_CLASSIFICATION: &str = "classification";
pub const FAQ_CATEGORY_FOLLOW_UP: &str = "follow_up";
pub const FAQ_CATEGORY_ACCOUNT: &str = "account";

/// A knowledge-base entry. `(category, question)` is its natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqSpec {
    pub category: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
    pub sort_order: i32,
}

/// The fixed FAQ set, grouped by category.
pub const FAQ_CATALOG: &[FaqSpec] = &[
    FaqSpec {
        category: FAQ_CATEGORY_MEASUREMENT,
        question: "Which arm should be measured?",
        answer: "Use the left arm, hanging relaxed, measured at the midpoint between \
                 the shoulder tip and the elbow.",
        sort_order: 1,
    },
    FaqSpec {
        category: FAQ_CATEGORY_MEASUREMENT,
        question: "How tight should the tape be?",
        answer: "The tape should touch the skin all the way round without compressing \
                 it. Read the value to the nearest millimetre.",
        sort_order: 2,
    },
    FaqSpec {
        category: FAQ_CATEGORY_MEASUREMENT,
        question: "Who can be screened with MUAC?",
        answer: "Children aged 6 to 59 months. Other groups need the cut-offs set by \
                 your programme.",
        sort_order: 3,
    },
    FaqSpec {
        category: FAQ_CATEGORY_CLASSIFICATION,
        question: "What do the tag colors mean?",
        answer: "Red is severe, yellow is moderate, green is adequate and blue marks a \
                 patient under follow-up after treatment.",
        sort_order: 1,
    },
    FaqSpec {
        category: FAQ_CATEGORY_CLASSIFICATION,
        question: "What if a measurement sits exactly on a cut-off?",
        answer: "A value equal to the severe cut-off counts as moderate; a value equal \
                 to the normal cut-off counts as adequate.",
        sort_order: 2,
    },
    FaqSpec {
        category: FAQ_CATEGORY_FOLLOW_UP,
        question: "When should a patient be re-measured?",
        answer: "Follow the interval in the recommendation for the patient's band. \
                 Severe cases are re-checked within a week.",
        sort_order: 1,
    },
    FaqSpec {
        category: FAQ_CATEGORY_FOLLOW_UP,
        question: "When does follow-up end?",
        answer: "Once the patient is in the adequate band at two consecutive visits.",
        sort_order: 2,
    },
    FaqSpec {
        category: FAQ_CATEGORY_ACCOUNT,
        question: "How do I get an account?",
        answer: "Ask your supervisor or an administrator to create one for you.",
        sort_order: 1,
    },
];
