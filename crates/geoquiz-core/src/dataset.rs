//! Dataset validation.
//!
//! Question generation needs at least four distinct values in every column it
//! draws options from. These checks surface that limitation, and other data
//! problems, before a quiz is started.

use std::collections::HashSet;

use crate::generator::OPTION_COUNT;
use crate::model::{Dataset, Field};

/// A warning from dataset validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The record index (if applicable).
    pub record: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    /// True when this warning means some question template cannot be generated.
    pub fn blocks_generation(&self) -> bool {
        self.record.is_none()
    }
}

/// Validate a dataset for common issues.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if dataset.is_empty() {
        warnings.push(ValidationWarning {
            record: None,
            message: "dataset contains no records".into(),
        });
        return warnings;
    }

    // Columns too small to supply three distractors
    for field in Field::ALL {
        let distinct = dataset.distinct_values(field).len();
        if distinct < OPTION_COUNT {
            warnings.push(ValidationWarning {
                record: None,
                message: format!(
                    "field '{field}' has {distinct} distinct value(s); at least {OPTION_COUNT} are needed to build questions"
                ),
            });
        }
    }

    // Records with gaps
    for (index, country) in dataset.countries().iter().enumerate() {
        let missing: Vec<String> = Field::ALL
            .into_iter()
            .filter(|f| country.value(*f).is_none())
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            warnings.push(ValidationWarning {
                record: Some(index),
                message: format!("missing {}", missing.join(", ")),
            });
        }
    }

    // Duplicate country names
    let mut seen = HashSet::new();
    for (index, country) in dataset.countries().iter().enumerate() {
        if let Some(name) = country.value(Field::CountryName) {
            if !seen.insert(name.clone()) {
                warnings.push(ValidationWarning {
                    record: Some(index),
                    message: format!("duplicate country name: {name}"),
                });
            }
        }
    }

    warnings
}
