use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("feature vector has {got} entries, model expects {expected}")]
    FeatureLength { expected: usize, got: usize },
}

/// Pre-trained multinomial logistic classifier, loaded from a serialized
/// artifact at startup.
///
/// The artifact is opaque to the rest of the system: this adapter only
/// exposes "given a binary feature vector, return a probability per disease
/// class". The model is never retrained here.
#[derive(Deserialize)]
pub struct Classifier {
    classes: Vec<String>,
    features: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl Classifier {
    /// Loads and validates the model artifact. Any missing, malformed, or
    /// shape-inconsistent artifact is a fatal startup error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("unable to read model artifact at {}", path.display()))?;
        let model: Classifier = serde_json::from_slice(&raw)
            .with_context(|| format!("malformed model artifact at {}", path.display()))?;
        model.validate()?;
        Ok(model)
    }

    /// Assembles a classifier from its parts, applying the same shape
    /// validation as [`Classifier::load`].
    pub fn from_parts(
        classes: Vec<String>,
        features: Vec<String>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> anyhow::Result<Self> {
        let model = Classifier {
            classes,
            features,
            weights,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.classes.is_empty() {
            bail!("model artifact declares no disease classes");
        }
        if self.features.is_empty() {
            bail!("model artifact declares no input features");
        }
        if self.weights.len() != self.classes.len() {
            bail!(
                "model artifact has {} weight rows for {} classes",
                self.weights.len(),
                self.classes.len()
            );
        }
        if let Some(row) = self.weights.iter().find(|row| row.len() != self.features.len()) {
            bail!(
                "model artifact has a weight row of length {} for {} features",
                row.len(),
                self.features.len()
            );
        }
        if self.intercepts.len() != self.classes.len() {
            bail!(
                "model artifact has {} intercepts for {} classes",
                self.intercepts.len(),
                self.classes.len()
            );
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Input feature names in the order the model expects them.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns (disease, probability) pairs in the model's class order.
    ///
    /// The probabilities form a valid simplex (softmax over linear scores);
    /// floating point means they need not sum to exactly 1.
    pub fn predict_proba(&self, features: &[u8]) -> Result<Vec<(String, f64)>, ClassifierError> {
        if features.len() != self.features.len() {
            return Err(ClassifierError::FeatureLength {
                expected: self.features.len(),
                got: features.len(),
            });
        }

        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter()
                    .zip(features)
                    .map(|(w, &x)| w * f64::from(x))
                    .sum::<f64>()
                    + intercept
            })
            .collect();

        // Softmax, shifted by the max score for numeric stability.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        Ok(self
            .classes
            .iter()
            .cloned()
            .zip(exps.into_iter().map(|e| e / total))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Classifier {
        Classifier::from_parts(
            vec!["VIRAL FEVER".into(), "DENGUE".into(), "MALARIA".into()],
            vec!["fever".into(), "cough".into(), "headache".into()],
            vec![
                vec![2.0, 2.0, 0.0],
                vec![1.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            vec![0.0, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn probabilities_form_a_simplex() {
        let dist = model().predict_proba(&[1, 1, 0]).unwrap();
        let sum: f64 = dist.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(dist.iter().all(|(_, p)| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn highest_score_wins() {
        let dist = model().predict_proba(&[1, 1, 0]).unwrap();
        let top = dist
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(d, _)| d.clone())
            .unwrap();
        assert_eq!(top, "VIRAL FEVER");
    }

    #[test]
    fn class_order_is_preserved() {
        let dist = model().predict_proba(&[0, 0, 1]).unwrap();
        let order: Vec<&str> = dist.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(order, ["VIRAL FEVER", "DENGUE", "MALARIA"]);
    }

    #[test]
    fn wrong_length_vector_is_rejected() {
        let err = model().predict_proba(&[1, 0]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::FeatureLength {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn shape_validation_catches_mismatched_weights() {
        let result = Classifier::from_parts(
            vec!["A".into(), "B".into()],
            vec!["x".into()],
            vec![vec![1.0]],
            vec![0.0, 0.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_artifact_fails_to_load() {
        use std::io::Write;
        let path = std::env::temp_dir().join("triage_model_malformed.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ not json }").unwrap();
        assert!(Classifier::load(&path).is_err());
    }
}
