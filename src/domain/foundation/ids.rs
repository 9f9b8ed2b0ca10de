//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Key under which an ad-network provider is registered (e.g. `"heyzap"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a provider id, rejecting blank keys.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("provider_id"));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Creates a provider id from a compile-time key.
    ///
    /// The key must already be trimmed, lowercase and non-empty.
    pub fn from_static(id: &'static str) -> Self {
        debug_assert!(
            !id.is_empty() && id.trim() == id && id.to_lowercase() == id,
            "static provider id must be a normalized key"
        );
        Self(id.to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Placement tag naming an ad unit (e.g. `"level_complete"`).
///
/// Tags are opaque to the controller and forwarded verbatim to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdTag(String);

impl AdTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AdTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for AdTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Handle returned when a listener is registered; used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random SubscriptionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_normalizes_case_and_whitespace() {
        let id = ProviderId::new("  HeyZap ").unwrap();
        assert_eq!(id.as_str(), "heyzap");
    }

    #[test]
    fn static_provider_id_matches_validated_id() {
        assert_eq!(
            ProviderId::from_static("simulated"),
            ProviderId::new("simulated").unwrap()
        );
    }

    #[test]
    fn provider_id_rejects_blank() {
        assert!(ProviderId::new("   ").is_err());
        assert!("".parse::<ProviderId>().is_err());
    }

    #[test]
    fn ad_tag_displays_verbatim() {
        let tag = AdTag::from("Level Complete");
        assert_eq!(tag.to_string(), "Level Complete");
    }

    #[test]
    fn subscription_ids_are_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn provider_id_serializes_transparently() {
        let id = ProviderId::new("simulated").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"simulated\"");
    }
}
