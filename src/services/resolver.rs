use crate::{
    catalog::Catalog,
    models::{AcneLevel, Analysis, Product, Profile, RecommendationResult},
};

/// Oiliness above which oil-control cleansers and tips apply
pub const OILINESS_THRESHOLD: i64 = 60;
/// Dryness above which hydration products and tips apply
pub const DRYNESS_THRESHOLD: i64 = 50;
/// Dark-spot score above which sun-protection tips apply
pub const DARK_SPOTS_THRESHOLD: i64 = 20;

pub const ACNE_TIPS: [&str; 2] = [
    "🧴 Use a gentle cleanser twice daily to prevent clogged pores",
    "💧 Don't over-wash - it can make acne worse!",
];

pub const OIL_CONTROL_TIPS: [&str; 2] = [
    "🌟 Look for oil-free and non-comedogenic products",
    "🧽 Use a clay mask 1-2 times per week",
];

pub const HYDRATION_TIPS: [&str; 2] = [
    "💦 Apply moisturizer while skin is still damp",
    "🌙 Use a heavier night cream for extra hydration",
];

pub const SUN_PROTECTION_TIPS: [&str; 2] = [
    "☀️ Always wear sunscreen to prevent more dark spots",
    "✨ Consider products with vitamin C or niacinamide",
];

/// Maps the current analysis to advice and product recommendations
///
/// Returns an empty result while no capture exists. Metrics are compared
/// as-is: out-of-range values are not rejected, they simply pass or fail
/// the threshold comparisons.
///
/// `profile` is threaded through for personalization but no rule consults
/// it yet; sensitivity and previously used products are the natural inputs
/// once such rules are defined.
pub fn resolve(
    analysis: Option<&Analysis>,
    _profile: &Profile,
    catalog: &Catalog,
) -> RecommendationResult {
    let Some(analysis) = analysis else {
        return RecommendationResult::empty();
    };

    RecommendationResult {
        advice: advice_for(analysis),
        recommendations: products_for(analysis, catalog),
    }
}

/// Selects products in cleanser, treatment, moisturizer order
fn products_for(analysis: &Analysis, catalog: &Catalog) -> Vec<Product> {
    let roles = catalog.roles();
    let mut picks: Vec<&Product> = Vec::with_capacity(5);

    if analysis.oiliness > OILINESS_THRESHOLD {
        picks.push(&roles.oil_control_cleanser_a);
        picks.push(&roles.oil_control_cleanser_b);
    } else {
        picks.push(&roles.gentle_cleanser);
    }

    match analysis.acne_level {
        AcneLevel::None => picks.push(&roles.anti_aging_serum),
        AcneLevel::Severe => {
            picks.push(&roles.acne_treatment);
            picks.push(&roles.active_serum);
        }
        AcneLevel::Mild | AcneLevel::Moderate => picks.push(&roles.acne_treatment),
    }

    if analysis.dryness > DRYNESS_THRESHOLD {
        picks.push(&roles.hydrating_moisturizer);
    } else {
        picks.push(&roles.daily_moisturizer);
    }

    picks.into_iter().cloned().collect()
}

/// Evaluates the advice gates in their fixed order
fn advice_for(analysis: &Analysis) -> Vec<String> {
    let gates: [(bool, &[&str]); 4] = [
        (analysis.acne_level.is_present(), &ACNE_TIPS),
        (analysis.oiliness > OILINESS_THRESHOLD, &OIL_CONTROL_TIPS),
        (analysis.dryness > DRYNESS_THRESHOLD, &HYDRATION_TIPS),
        (analysis.dark_spots > DARK_SPOTS_THRESHOLD, &SUN_PROTECTION_TIPS),
    ];

    gates
        .into_iter()
        .filter(|(fires, _)| *fires)
        .flat_map(|(_, tips)| tips.iter().map(|tip| tip.to_string()))
        .collect()
}
