//! Page records
//!
//! A `Page` is the persisted record for one map marker: a link, a marker
//! icon, integer coordinates, and the popup content shown when the marker is
//! activated.
//!
//! Wire and storage bodies use a fixed lower-camel naming convention
//! (`urlImgMarker`, `bangalore`, `dataPopup`, `urlImg`); the Rust field names
//! stay internal. Every field carries `#[serde(default)]`: missing fields in
//! an inbound body pass through as zero-values rather than being rejected.

use serde::{Deserialize, Serialize};

/// A stored page: the store-assigned id plus the page content.
///
/// The id is rendered in its canonical hex string form at the wire boundary
/// and is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(flatten)]
    pub content: PageContent,
}

/// Page content without an id: the create payload, and the shape of the
/// document body the store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub href: String,

    #[serde(rename = "urlImgMarker", default)]
    pub marker_icon_url: String,

    #[serde(rename = "bangalore", default)]
    pub coordinates: Coordinates,

    #[serde(rename = "dataPopup", default)]
    pub popup: Popup,
}

/// Integer geographic position of a marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub lat: i64,

    #[serde(default)]
    pub lng: i64,
}

/// Popup content shown when a marker is activated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub text: String,

    #[serde(rename = "urlImg", default)]
    pub image_url: String,

    /// Ordered; insertion order is meaningful for display and is preserved
    /// end-to-end.
    #[serde(default)]
    pub links: Vec<PopupLink>,
}

/// One entry in a popup's link list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopupLink {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub name: String,
}
