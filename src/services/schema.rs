use anyhow::{bail, Context};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// The ordered set of known symptom names.
///
/// Order is significant: it fixes the positions of the classifier's input
/// vector, so it must match the column order of the dataset the model was
/// trained on. Immutable after load.
#[derive(Debug)]
pub struct SymptomSchema {
    symptoms: Vec<String>,
}

impl SymptomSchema {
    /// Reads the tabular symptom dataset and extracts every feature column
    /// name, excluding the label column, preserving left-to-right order.
    ///
    /// An unreadable source or a missing label column is a configuration
    /// error and aborts startup.
    pub fn load(path: &Path, label_column: &str) -> anyhow::Result<Self> {
        let df = CsvReader::from_path(path)
            .with_context(|| format!("unable to open symptom schema at {}", path.display()))?
            .has_header(true)
            .finish()
            .with_context(|| format!("unable to parse symptom schema at {}", path.display()))?;

        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        if !columns.iter().any(|c| c == label_column) {
            bail!(
                "label column '{}' not found in symptom schema at {}",
                label_column,
                path.display()
            );
        }

        let symptoms: Vec<String> = columns.into_iter().filter(|c| c != label_column).collect();
        if symptoms.is_empty() {
            bail!("symptom schema at {} has no feature columns", path.display());
        }

        Ok(Self { symptoms })
    }

    /// Builds a schema from an already-known symptom list.
    pub fn from_symptoms(symptoms: Vec<String>) -> Self {
        Self { symptoms }
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Encodes a selection of symptom names as a 0/1 vector in schema order.
    ///
    /// The selection order has no effect; names not present in the schema
    /// are ignored.
    pub fn feature_vector(&self, selected: &[String]) -> Vec<u8> {
        let picked: HashSet<&str> = selected.iter().map(String::as_str).collect();
        self.symptoms
            .iter()
            .map(|s| u8::from(picked.contains(s.as_str())))
            .collect()
    }

    /// Human-readable checkbox label for a symptom column name.
    pub fn display_label(name: &str) -> String {
        name.replace('_', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_preserves_column_order_and_drops_label() {
        let path = write_temp_csv(
            "triage_schema_order.csv",
            "Disease,fever,cough,headache\nVIRAL FEVER,1,1,0\nDENGUE,1,0,1\n",
        );
        let schema = SymptomSchema::load(&path, "Disease").unwrap();
        assert_eq!(schema.symptoms(), ["fever", "cough", "headache"]);
    }

    #[test]
    fn load_fails_without_label_column() {
        let path = write_temp_csv(
            "triage_schema_no_label.csv",
            "fever,cough\n1,0\n",
        );
        let err = SymptomSchema::load(&path, "Disease").unwrap_err();
        assert!(err.to_string().contains("label column"));
    }

    #[test]
    fn load_fails_on_missing_file() {
        let path = std::env::temp_dir().join("triage_schema_missing.csv");
        let _ = std::fs::remove_file(&path);
        assert!(SymptomSchema::load(&path, "Disease").is_err());
    }

    #[test]
    fn feature_vector_follows_schema_order() {
        let schema = SymptomSchema::from_symptoms(vec![
            "fever".into(),
            "cough".into(),
            "headache".into(),
        ]);
        // Selection order reversed relative to the schema.
        let vector = schema.feature_vector(&["cough".into(), "fever".into()]);
        assert_eq!(vector, vec![1, 1, 0]);
    }

    #[test]
    fn feature_vector_ignores_unknown_names() {
        let schema = SymptomSchema::from_symptoms(vec!["fever".into()]);
        let vector = schema.feature_vector(&["chills".into()]);
        assert_eq!(vector, vec![0]);
    }

    #[test]
    fn display_label_replaces_underscores() {
        assert_eq!(SymptomSchema::display_label("joint_pain"), "joint pain");
    }
}
