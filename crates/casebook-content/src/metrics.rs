//! Key-metric extraction for the detail view.
//!
//! Looks for a metrics section in the body and pulls `value`/`label` pairs
//! out of it with an ordered pattern list: percent changes, currency
//! amounts, multipliers, counts, time periods and `label: value` lines.
//! Each occurrence of a value is reported once, by the first pattern that
//! claims it.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::markdown::helpers::extract_section;

/// Most metrics returned for one body.
pub const MAX_METRICS: usize = 6;

/// Longest label kept before truncation.
pub const MAX_LABEL_CHARS: usize = 30;

/// Section names searched, in order.
pub const METRIC_SECTIONS: [&str; 4] = ["Key Metrics", "Metrics", "Results Summary", "Key Results"];

const FALLBACK_LABEL: &str = "Improvement";

const NUMBER: &str = r"\d+(?:\.\d+)?";
const LABEL: &str = r"(?P<label>[^.\n]+)";

static METRIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Percent changes
        format!(
            r"(?P<value>{NUMBER}%)\s+(?:increase|improvement|growth|boost|rise|gain|higher|more|up|improved)\s+(?:in\s+)?{LABEL}"
        ),
        format!(
            r"(?P<value>{NUMBER}%)\s+(?:decrease|reduction|drop|decline|lower|less|savings?|down|reduced)\s+(?:in\s+)?{LABEL}"
        ),
        format!(r"(?P<label>[^.\n:]+?):\s*(?P<value>{NUMBER}%)"),
        format!(r"(?P<value>{NUMBER}%)\s+(?:of|in)\s+{LABEL}"),
        // Currency
        format!(
            r"(?P<value>\${NUMBER}[KMB]?)\s+(?:saved|savings?|revenue|profit|cost\s+reduction|increase|growth|generated|earned)\s+(?:in\s+)?{LABEL}"
        ),
        format!(r"(?P<label>[^.\n:]+?):\s*(?P<value>\${NUMBER}[KMB]?)"),
        // Multipliers
        format!(
            r"(?P<value>{NUMBER}x)\s+(?:faster|speed|quicker|acceleration|improvement|better|more\s+efficient)\s+(?:in\s+)?{LABEL}"
        ),
        format!(
            r"(?:improved|increased|enhanced|scaled)\s+(?P<label>[^.\n]+?)\s+by\s+(?P<value>{NUMBER}[x%])"
        ),
        // Counts
        format!(
            r"(?P<value>{NUMBER}[KMB]?)\s+(?:more|new|additional|extra)\s+{LABEL}"
        ),
        // Time periods
        format!(
            r"(?:within|after|during)\s+(?P<value>\d+\s+(?:days?|weeks?|months?|years?))\s+{LABEL}"
        ),
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?i){pattern}")).expect("Invalid metric regex")
    })
    .collect()
});

static BULLET_METRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-*•]\s*([^:\n]+):\s*([^.\n]+)").expect("Invalid bullet metric regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s+(?:days?|weeks?|months?|years?)").expect("Invalid duration regex")
});

static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?[KMB]?$").expect("Invalid number regex"));

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid label cleanup regex"));

/// How a metric value should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Contains `%`
    Percentage,
    /// Plain count or multiplier
    Number,
    /// Contains `$`
    Currency,
    /// A duration such as `3 months`
    Time,
    /// Anything else
    Text,
}

impl MetricKind {
    /// Classify a value string.
    pub fn classify(value: &str) -> Self {
        if value.contains('%') {
            Self::Percentage
        } else if value.contains('$') {
            Self::Currency
        } else if value.contains(['x', 'X']) {
            Self::Number
        } else if DURATION_RE.is_match(value) {
            Self::Time
        } else if BARE_NUMBER_RE.is_match(value) {
            Self::Number
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Number => write!(f, "number"),
            Self::Currency => write!(f, "currency"),
            Self::Time => write!(f, "time"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// One headline figure from a case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    /// What was measured
    pub label: String,
    /// The figure, as written
    pub value: String,
    /// Presentation class of the value
    pub kind: MetricKind,
}

/// Extract up to [`MAX_METRICS`] headline figures from a body.
///
/// Returns an empty list when the body has no metrics section.
///
/// # Example
///
/// ```rust
/// use casebook_content::metrics::{MetricKind, extract_key_metrics};
///
/// let body = "## Key Metrics\n\n- 40% reduction in cloud spend\n- $2M saved in licensing\n";
/// let metrics = extract_key_metrics(body);
/// assert_eq!(metrics[0].value, "40%");
/// assert_eq!(metrics[0].label, "cloud spend");
/// assert_eq!(metrics[0].kind, MetricKind::Percentage);
/// assert_eq!(metrics[1].kind, MetricKind::Currency);
/// ```
pub fn extract_key_metrics(body: &str) -> Vec<KeyMetric> {
    let Some(section) = METRIC_SECTIONS
        .iter()
        .find_map(|name| extract_section(body, name))
    else {
        return Vec::new();
    };

    let mut metrics = Vec::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();

    for pattern in METRIC_PATTERNS.iter() {
        for caps in pattern.captures_iter(&section) {
            let (Some(value), Some(label)) = (caps.name("value"), caps.name("label")) else {
                continue;
            };
            let span = value.range();
            if claimed.iter().any(|r| r.start < span.end && span.start < r.end) {
                continue;
            }
            claimed.push(span);

            let value = value.as_str().trim().to_string();
            metrics.push(KeyMetric {
                label: clean_label(label.as_str()),
                kind: MetricKind::classify(&value),
                value,
            });
        }
    }

    if metrics.is_empty() {
        metrics = bullet_metrics(&section);
    }

    log::debug!("Extracted {} key metrics", metrics.len().min(MAX_METRICS));
    metrics.truncate(MAX_METRICS);
    metrics
}

/// `- label: value` lines, used when no pattern matched.
fn bullet_metrics(section: &str) -> Vec<KeyMetric> {
    section
        .lines()
        .filter_map(|line| BULLET_METRIC_RE.captures(line))
        .map(|caps| {
            let value = caps[2].trim().to_string();
            KeyMetric {
                label: caps[1].trim().to_string(),
                kind: MetricKind::classify(&value),
                value,
            }
        })
        .collect()
}

/// Strip punctuation and cap the length.
fn clean_label(raw: &str) -> String {
    let cleaned = NON_WORD_RE.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    if cleaned.chars().count() > MAX_LABEL_CHARS {
        let truncated: String = cleaned.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", truncated.trim_end())
    } else {
        cleaned.to_string()
    }
}
