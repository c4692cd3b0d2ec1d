//! Country label encoder

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Integer code assigned to a known country label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode(u32);

impl CountryCode {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Closed vocabulary of country labels fixed at training time.
///
/// Codes are positions in the sorted vocabulary, so the artifact must list its
/// classes in strictly ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncoderArtifact", into = "EncoderArtifact")]
pub struct CountryEncoder {
    classes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

impl CountryEncoder {
    /// Fit the encoder over every label seen in the training data
    pub fn fit<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = labels.into_iter().map(Into::into).collect();

        if classes.is_empty() {
            return Err(DomainError::artifact(
                "cannot fit country encoder on an empty label set",
            ));
        }

        Ok(Self {
            classes: classes.into_iter().collect(),
        })
    }

    /// Rebuild an encoder from a persisted vocabulary
    pub fn from_classes(classes: Vec<String>) -> Result<Self, DomainError> {
        if classes.is_empty() {
            return Err(DomainError::artifact("country encoder has no classes"));
        }

        if let Some(pair) = classes.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(DomainError::artifact(format!(
                "country encoder classes must be sorted and unique, found '{}' before '{}'",
                pair[0], pair[1]
            )));
        }

        if u32::try_from(classes.len()).is_err() {
            return Err(DomainError::artifact("country encoder vocabulary too large"));
        }

        Ok(Self { classes })
    }

    /// Encode a label, failing on anything outside the trained vocabulary
    pub fn encode(&self, label: &str) -> Result<CountryCode, DomainError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|index| CountryCode(index as u32))
            .map_err(|_| DomainError::unknown_country(label))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TryFrom<EncoderArtifact> for CountryEncoder {
    type Error = DomainError;

    fn try_from(artifact: EncoderArtifact) -> Result<Self, Self::Error> {
        Self::from_classes(artifact.classes)
    }
}

impl From<CountryEncoder> for EncoderArtifact {
    fn from(encoder: CountryEncoder) -> Self {
        Self {
            classes: encoder.classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> CountryEncoder {
        CountryEncoder::fit(["United States", "Iran", "Canada", "Iran", "Nigeria"]).unwrap()
    }

    #[test]
    fn test_fit_sorts_and_deduplicates() {
        assert_eq!(
            encoder().classes(),
            &["Canada", "Iran", "Nigeria", "United States"]
        );
    }

    #[test]
    fn test_encode_known_label() {
        let encoder = encoder();
        assert_eq!(encoder.encode("Canada").unwrap(), CountryCode::new(0));
        assert_eq!(encoder.encode("United States").unwrap(), CountryCode::new(3));
        assert_eq!(encoder.encode("Iran").unwrap(), CountryCode::new(1));
    }

    #[test]
    fn test_encode_unknown_label_is_checked_error() {
        let err = encoder().encode("Atlantis").unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnknownCountry { ref country } if country == "Atlantis"
        ));
    }

    #[test]
    fn test_encode_is_case_sensitive() {
        assert!(encoder().encode("canada").is_err());
    }

    #[test]
    fn test_fit_rejects_empty_labels() {
        assert!(CountryEncoder::fit(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_from_classes_rejects_unsorted_vocabulary() {
        let err = CountryEncoder::from_classes(vec!["Iran".into(), "Canada".into()]).unwrap_err();
        assert!(err.to_string().contains("sorted"));

        assert!(CountryEncoder::from_classes(vec!["Iran".into(), "Iran".into()]).is_err());
    }

    #[test]
    fn test_artifact_format() {
        let json = serde_json::to_string(&encoder()).unwrap();
        assert_eq!(
            json,
            r#"{"classes":["Canada","Iran","Nigeria","United States"]}"#
        );

        let restored: CountryEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, encoder());

        let unsorted = serde_json::from_str::<CountryEncoder>(r#"{"classes":["b","a"]}"#);
        assert!(unsorted.is_err());
    }
}
