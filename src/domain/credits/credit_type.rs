//! Credit type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::CreditsError;

/// Units of metered usage a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    ImageGeneration,
    VideoGeneration,
}

impl CreditType {
    pub const ALL: [CreditType; 2] = [CreditType::ImageGeneration, CreditType::VideoGeneration];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditType::ImageGeneration => "image_generation",
            CreditType::VideoGeneration => "video_generation",
        }
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CreditType {
    type Err = CreditsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CreditsError::UnknownCreditType(s.to_string()))
    }
}
