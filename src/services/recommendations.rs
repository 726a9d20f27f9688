use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder shown for any guidance field without a known value.
pub const PLACEHOLDER: &str = "N/A";

/// Care guidance attached to a ranked candidate. Every field is always
/// populated; unknown values degrade to [`PLACEHOLDER`] per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareGuidance {
    pub doctor: String,
    pub tests: String,
    pub advice: String,
}

impl CareGuidance {
    fn placeholder() -> Self {
        Self {
            doctor: PLACEHOLDER.to_string(),
            tests: PLACEHOLDER.to_string(),
            advice: PLACEHOLDER.to_string(),
        }
    }
}

struct GuidanceEntry {
    doctor: Option<String>,
    tests: Option<String>,
    advice: Option<String>,
}

/// Static mapping from disease name to care guidance. Lookups are
/// case-normalized; a disease without an entry gets a full placeholder
/// record rather than an error.
pub struct RecommendationBook {
    entries: HashMap<String, GuidanceEntry>,
}

const BUILTIN: &[(&str, &str, &str, &str)] = &[
    (
        "VIRAL FEVER",
        "General Physician",
        "CBC (Complete Blood Count), Temperature check",
        "If fever persists for more than 3 days or chills/sweating are severe, see doctor immediately",
    ),
    (
        "DENGUE",
        "General Physician / Infectious Disease Specialist",
        "CBC (platelet count), Dengue NS1 antigen test",
        "High urgency! See doctor immediately if you have high fever, severe headache, joint pain, or rash",
    ),
    (
        "GASTRITIS",
        "Gastroenterologist",
        "Endoscopy (if chronic), Blood test for H. pylori",
        "See doctor if abdominal pain, acidity, nausea, or vomiting persist",
    ),
    (
        "DIABETES",
        "Endocrinologist",
        "Fasting Blood Sugar, HbA1c, Urine test",
        "Schedule a check-up soon if you have excessive thirst or frequent urination",
    ),
    (
        "MALARIA",
        "General Physician / Infectious Disease Specialist",
        "Peripheral blood smear, Rapid diagnostic test (RDT)",
        "High urgency! Seek medical care immediately if fever with chills and sweating occurs",
    ),
];

impl RecommendationBook {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(disease, doctor, tests, advice)| {
                (
                    disease.to_string(),
                    GuidanceEntry {
                        doctor: Some(doctor.to_string()),
                        tests: Some(tests.to_string()),
                        advice: Some(advice.to_string()),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Looks up guidance by uppercased disease name. Missing entries and
    /// missing fields degrade to placeholders independently.
    pub fn guidance_for(&self, disease: &str) -> CareGuidance {
        match self.entries.get(&disease.to_uppercase()) {
            Some(entry) => CareGuidance {
                doctor: entry.doctor.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                tests: entry.tests.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                advice: entry.advice.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            },
            None => CareGuidance::placeholder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_normalized() {
        let book = RecommendationBook::builtin();
        let guidance = book.guidance_for("viral fever");
        assert_eq!(guidance.doctor, "General Physician");
        assert_eq!(guidance.tests, "CBC (Complete Blood Count), Temperature check");
    }

    #[test]
    fn unknown_disease_yields_full_placeholder_record() {
        let book = RecommendationBook::builtin();
        let guidance = book.guidance_for("COMMON COLD");
        assert_eq!(guidance.doctor, PLACEHOLDER);
        assert_eq!(guidance.tests, PLACEHOLDER);
        assert_eq!(guidance.advice, PLACEHOLDER);
    }

    #[test]
    fn partial_entry_degrades_per_field() {
        let mut book = RecommendationBook::builtin();
        book.entries.insert(
            "TYPHOID".to_string(),
            GuidanceEntry {
                doctor: Some("General Physician".to_string()),
                tests: None,
                advice: None,
            },
        );
        let guidance = book.guidance_for("TYPHOID");
        assert_eq!(guidance.doctor, "General Physician");
        assert_eq!(guidance.tests, PLACEHOLDER);
        assert_eq!(guidance.advice, PLACEHOLDER);
    }
}
