//! Supported cloud providers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Cloud a spec targets.
///
/// This is the closed set of values a `cloud` discriminator may take; every
/// variant has VM and disk sub-spec schemas in the provider registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cloud {
    #[serde(rename = "GCP")]
    Gcp,
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
}

impl Cloud {
    pub const ALL: [Cloud; 3] = [Cloud::Gcp, Cloud::Aws, Cloud::Azure];

    /// Canonical name used in configs and as the union variant key
    pub fn as_str(&self) -> &'static str {
        match self {
            Cloud::Gcp => "GCP",
            Cloud::Aws => "AWS",
            Cloud::Azure => "Azure",
        }
    }
}

impl FromStr for Cloud {
    type Err = Error;

    /// Only canonical names parse, the same set a `cloud` discriminator allows.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Cloud::ALL
            .into_iter()
            .find(|cloud| cloud.as_str() == s)
            .ok_or_else(|| Error::InvalidCloud {
                cloud: s.to_string(),
            })
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("GCP".parse::<Cloud>().unwrap(), Cloud::Gcp);
        assert_eq!("AWS".parse::<Cloud>().unwrap(), Cloud::Aws);
        assert_eq!("Azure".parse::<Cloud>().unwrap(), Cloud::Azure);
        assert_eq!(
            "Kubernetes".parse::<Cloud>(),
            Err(Error::InvalidCloud {
                cloud: "Kubernetes".to_string()
            })
        );
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        for name in ["gcp", "aws", "AZURE", "Gcp"] {
            assert_eq!(
                name.parse::<Cloud>(),
                Err(Error::InvalidCloud {
                    cloud: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for cloud in Cloud::ALL {
            assert_eq!(cloud.to_string().parse::<Cloud>().unwrap(), cloud);
        }
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Cloud::Gcp).unwrap(), "\"GCP\"");
        assert_eq!(serde_json::to_string(&Cloud::Azure).unwrap(), "\"Azure\"");
        let parsed: Cloud = serde_json::from_str("\"AWS\"").unwrap();
        assert_eq!(parsed, Cloud::Aws);
    }
}
