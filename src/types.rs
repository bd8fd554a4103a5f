//! Core types for the adboard system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an analysis record
pub type RecordId = String;

/// A single ad-classification result, as produced by the analysis
/// pipeline and listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique record identifier
    pub id: RecordId,
    /// Object key of the analyzed video in the bucket
    pub object_name: String,
    /// Classification label (e.g. "advertisement", "content")
    pub label: String,
    /// Classifier confidence in [0.0, 1.0]
    pub confidence: f32,
    /// Advertiser name, when one was identified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<String>,
    /// Free-form category tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Create a new record with a fresh id and the current timestamp
    pub fn new(
        object_name: impl Into<String>,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            object_name: object_name.into(),
            label: label.into(),
            confidence,
            advertiser: None,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the advertiser name
    pub fn with_advertiser(mut self, advertiser: impl Into<String>) -> Self {
        self.advertiser = Some(advertiser.into());
        self
    }

    /// Set category tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_gets_unique_ids() {
        let a = AnalysisRecord::new("spot.mp4", "advertisement", 0.93);
        let b = AnalysisRecord::new("spot.mp4", "advertisement", 0.93);
        assert_ne!(a.id, b.id);
        assert_eq!(a.object_name, "spot.mp4");
        assert!(a.advertiser.is_none());
        assert!(a.tags.is_empty());
    }

    #[test]
    fn builder_helpers_set_fields() {
        let record = AnalysisRecord::new("spot.mp4", "advertisement", 0.8)
            .with_advertiser("Acme")
            .with_tags(vec!["automotive".to_string(), "prime-time".to_string()]);
        assert_eq!(record.advertiser.as_deref(), Some("Acme"));
        assert_eq!(record.tags.len(), 2);
    }
}
