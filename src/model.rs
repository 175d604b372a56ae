//! Data models for Dermalens.
//!
//! Everything here is a per-request value: reports are built, serialized,
//! and dropped. Nothing is persisted and nothing is shared across requests,
//! so these types carry no identifiers, sessions, or timestamps.
//!
//! Wire field names (`overall_score`, `mask_base64`, `overlay_color`, ...)
//! match what the frontend overlay consumes; changing them is a breaking
//! API change.

use serde::{Deserialize, Serialize};

/// Severity tier derived from a numeric score.
///
/// Serializes as `"Low"`, `"Moderate"`, `"High"` — the labels the frontend
/// renders verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLevel {
    /// Score below the moderate cutoff. Nothing to worry about.
    Low,

    /// Score at or above the moderate cutoff but below the high cutoff.
    Moderate,

    /// Score at or above the high cutoff.
    High,
}

impl SeverityLevel {
    /// Map a score value to its severity tier.
    ///
    /// # Thresholds
    ///
    /// Intervals are half-open, closed at the lower end:
    ///
    /// - `Low`: value < moderate_cutoff
    /// - `Moderate`: moderate_cutoff <= value < high_cutoff
    /// - `High`: value >= high_cutoff
    ///
    /// Every value maps to exactly one tier; a value sitting exactly on a
    /// cutoff belongs to the higher tier.
    pub fn from_value(value: u32, moderate_cutoff: u32, high_cutoff: u32) -> Self {
        if value < moderate_cutoff {
            SeverityLevel::Low
        } else if value < high_cutoff {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::High
        }
    }
}

/// A severity score for a single condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisScore {
    /// Score value in [0, 100]. Higher means more severe.
    pub value: u32,

    /// Tier label derived from `value` via the configured cutoffs.
    pub level: SeverityLevel,
}

/// The analysis outcome for one condition in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Condition name, e.g. "Sebum" or "Wrinkle".
    pub condition: String,

    /// Severity score and tier.
    pub score: AnalysisScore,

    /// Base64-encoded PNG mask, same pixel dimensions as the uploaded
    /// image. Drawn regions mark the simulated detection; the caller
    /// overlays it on the original.
    pub mask_base64: Option<String>,

    /// Condition color as lowercase `#rrggbb` hex, for tinting the overlay.
    pub overlay_color: Option<String>,
}

/// A full analysis report: the response body for the versioned route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinReport {
    /// Integer-truncated mean of the per-condition score values.
    pub overall_score: u32,

    /// One result per catalog condition, in catalog order.
    pub results: Vec<AnalysisResult>,

    /// True when the report was synthesized rather than inferred.
    /// Lets the frontend badge simulated data.
    pub is_mock: bool,
}

/// Response for GET /info.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    /// Human-readable service name.
    pub service: String,

    /// Whether the mock generator is active.
    pub mock_mode: bool,

    /// API route prefix, e.g. "/api/v1".
    pub api_version: String,

    /// Human-readable description of the active mode.
    pub message: String,
}
