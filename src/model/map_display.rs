//! Map display configuration pass-through
//!
//! One endpoint accepts this shape and echoes it back without persisting
//! anything. The wire keys are capitalized (`MapId`, `Zoom`, `Lat`, ...) and
//! the center/icon groups are flattened into the top level, matching what the
//! site's frontend already exchanges. Binding into the typed struct and
//! re-serializing drops unknown keys and fills missing ones with zero-values.

use serde::{Deserialize, Serialize};

/// Display settings for the map frontend. Accepted and echoed, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDisplayConfig {
    #[serde(rename = "MapId", default)]
    pub map_id: String,

    #[serde(rename = "Zoom", default)]
    pub zoom: String,

    #[serde(rename = "LogoUrl", default)]
    pub logo_url: String,

    #[serde(rename = "DisableDefaultUI", default)]
    pub disable_default_ui: String,

    #[serde(rename = "AllMarkers", default)]
    pub all_markers: String,

    /// Default map center, latitude half.
    #[serde(rename = "Lat", default)]
    pub center_lat: String,

    /// Default map center, longitude half.
    #[serde(rename = "Lng", default)]
    pub center_lng: String,

    #[serde(rename = "UrlImgMarker", default)]
    pub marker_icon_url: String,

    #[serde(rename = "Size", default)]
    pub marker_size: Vec<String>,

    #[serde(rename = "Animation", default)]
    pub marker_animation: String,

    #[serde(rename = "Draggable", default)]
    pub marker_draggable: String,

    #[serde(rename = "Numbering", default)]
    pub marker_numbering: String,
}
