//! Partial page updates
//!
//! An update payload carries any subset of page fields. `PagePatch` mirrors
//! `PageContent` with every leaf optional, so an absent field is genuinely
//! absent rather than zero-valued, and `to_field_set` flattens the present
//! leaves into dotted storage paths for a merge write (only listed fields are
//! overwritten; everything else keeps its stored value).
//!
//! The patch types carry no id field, so the identifier can never enter a
//! field-set: the id is addressing information, not mutable content.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::page::PopupLink;

/// Flattened set of document fields for a merge update, in dotted-path form
/// (`dataPopup.title`, `bangalore.lat`, ...). Entry order follows field
/// declaration order and is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, Value)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field to overwrite at the given dotted path.
    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.entries.push((path.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(path, value)| (path.as_str(), value))
    }
}

/// Partial update for a page. Fields left `None` are not touched by the
/// update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(
        rename = "urlImgMarker",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub marker_icon_url: Option<String>,

    #[serde(rename = "bangalore", default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesPatch>,

    #[serde(rename = "dataPopup", default, skip_serializing_if = "Option::is_none")]
    pub popup: Option<PopupPatch>,
}

/// Partial update for a page's coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<i64>,
}

/// Partial update for a page's popup content. `links`, when present,
/// replaces the stored list wholesale so its ordering stays intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "urlImg", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<PopupLink>>,
}

impl PagePatch {
    /// Flatten the present fields into dotted storage paths.
    pub fn to_field_set(&self) -> FieldSet {
        let mut fields = FieldSet::new();

        if let Some(href) = &self.href {
            fields.set("href", json!(href));
        }
        if let Some(url) = &self.marker_icon_url {
            fields.set("urlImgMarker", json!(url));
        }
        if let Some(coordinates) = &self.coordinates {
            if let Some(lat) = coordinates.lat {
                fields.set("bangalore.lat", json!(lat));
            }
            if let Some(lng) = coordinates.lng {
                fields.set("bangalore.lng", json!(lng));
            }
        }
        if let Some(popup) = &self.popup {
            if let Some(title) = &popup.title {
                fields.set("dataPopup.title", json!(title));
            }
            if let Some(text) = &popup.text {
                fields.set("dataPopup.text", json!(text));
            }
            if let Some(image_url) = &popup.image_url {
                fields.set("dataPopup.urlImg", json!(image_url));
            }
            if let Some(links) = &popup.links {
                fields.set("dataPopup.links", json!(links));
            }
        }

        fields
    }
}
