use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

/// Identity of one selection request: who is asking and where the ad will be
/// rendered. Built once per request and shared read-only across every
/// predicate evaluation of that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    customer_id: String,
    marketplace_id: String,
}

impl RequestContext {
    pub fn new(customer_id: impl Into<String>, marketplace_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            marketplace_id: marketplace_id.into(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    /// A blank customer id means the visitor could not be identified.
    pub fn is_recognized(&self) -> bool {
        !self.customer_id.trim().is_empty()
    }
}

/// One candidate creative. Identity is the content id alone; the rendering
/// payload is opaque to selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementContent {
    pub content_id: String,
    pub render_content: String,
}

impl AdvertisementContent {
    pub fn new(content_id: impl Into<String>, render_content: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            render_content: render_content.into(),
        }
    }
}

impl PartialEq for AdvertisementContent {
    fn eq(&self, other: &Self) -> bool {
        self.content_id == other.content_id
    }
}

impl Eq for AdvertisementContent {}

/// Expected click-through rate of a targeting group. Construction rejects
/// NaN and negative values, which is what makes the total order below sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ClickThroughRate(f64);

#[derive(Debug, thiserror::Error)]
#[error("click-through rate must be a finite non-negative number, got {0}")]
pub struct InvalidClickThroughRate(pub f64);

impl ClickThroughRate {
    pub fn new(value: f64) -> Result<Self, InvalidClickThroughRate> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidClickThroughRate(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for ClickThroughRate {}

impl Ord for ClickThroughRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for ClickThroughRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<f64> for ClickThroughRate {
    type Error = InvalidClickThroughRate;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClickThroughRate> for f64 {
    fn from(value: ClickThroughRate) -> Self {
        value.0
    }
}

static AD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_advertisement_id() -> String {
    let id = AD_SEQUENCE.fetch_add(1, AtomicOrdering::Relaxed);
    format!("ad-{id:06}")
}

/// Outcome of a selection request: a concrete advertisement to render, or the
/// explicit empty advertisement when nothing qualifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedAdvertisement {
    Render {
        id: String,
        content: AdvertisementContent,
    },
    Empty,
}

impl GeneratedAdvertisement {
    pub fn render(content: AdvertisementContent) -> Self {
        Self::Render {
            id: next_advertisement_id(),
            content,
        }
    }

    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn content(&self) -> Option<&AdvertisementContent> {
        match self {
            Self::Render { content, .. } => Some(content),
            Self::Empty => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Render { id, .. } => Some(id),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
