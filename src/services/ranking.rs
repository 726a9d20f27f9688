use crate::services::recommendations::{CareGuidance, RecommendationBook};

/// A top probability below this value flags the prediction as uncertain.
/// Fixed policy constant, not user-configurable; exactly 0.5 is confident.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Number of candidate diagnoses shown to the user.
pub const TOP_CANDIDATES: usize = 3;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub disease: String,
    pub probability: f64,
    pub guidance: CareGuidance,
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub confident: bool,
    pub candidates: Vec<Candidate>,
}

/// Turns a class probability distribution into the ranked top candidates
/// plus a confidence flag.
///
/// The distribution must be in the classifier's class order: the sort is
/// stable, so equal probabilities keep that order. The caller is responsible
/// for never invoking the classifier on an all-zero feature vector; by the
/// time a distribution reaches this policy it is assumed legitimate.
pub fn rank(distribution: Vec<(String, f64)>, book: &RecommendationBook) -> Prediction {
    let mut pairs = distribution;
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs.truncate(TOP_CANDIDATES);

    let confident = pairs
        .first()
        .is_some_and(|(_, p)| *p >= CONFIDENCE_THRESHOLD);

    let candidates = pairs
        .into_iter()
        .map(|(disease, probability)| Candidate {
            guidance: book.guidance_for(&disease),
            disease,
            probability,
        })
        .collect();

    Prediction {
        confident,
        candidates,
    }
}
