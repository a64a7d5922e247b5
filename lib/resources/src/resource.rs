//! Crisis-relief resources found near a location.

use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A mapped amenity, as tagged in OpenStreetMap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// OpenStreetMap node id.
    pub osm_id: u64,
    /// Where the resource is.
    pub location: Coordinates,
    /// `name` tag.
    pub name: Option<String>,
    /// `amenity` tag.
    pub amenity: Option<String>,
    /// `phone` tag.
    pub phone: Option<String>,
    /// `addr:street` tag.
    pub street: Option<String>,
    /// `website` tag.
    pub website: Option<String>,
}

impl Resource {
    /// Builds a resource from a node's tags.
    #[must_use]
    pub fn from_tags(osm_id: u64, location: Coordinates, tags: &HashMap<String, String>) -> Self {
        let tag = |key: &str| {
            tags.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            osm_id,
            location,
            name: tag("name"),
            amenity: tag("amenity"),
            phone: tag("phone"),
            street: tag("addr:street"),
            website: tag("website"),
        }
    }

    /// Returns the card shown in the resource list and map popup.
    #[must_use]
    pub fn card(&self) -> ResourceCard {
        ResourceCard {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| "Unnamed Resource".to_string()),
            kind: self
                .amenity
                .clone()
                .unwrap_or_else(|| "Unknown Type".to_string()),
            phone: self
                .phone
                .clone()
                .unwrap_or_else(|| "Phone not available".to_string()),
            address: self
                .street
                .clone()
                .unwrap_or_else(|| "Address not available".to_string()),
            website: self.website.clone(),
            lat: self.location.lat,
            lon: self.location.lon,
        }
    }
}

/// Display form of a [`Resource`], with placeholders for missing tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCard {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn card_uses_tags() {
        let resource = Resource::from_tags(
            7,
            Coordinates::new(18.52, 73.85),
            &tags(&[
                ("name", "Sassoon General Hospital"),
                ("amenity", "hospital"),
                ("phone", "+91 20 2612 8000"),
                ("addr:street", "Jai Prakash Narayan Road"),
                ("website", "https://example.org"),
            ]),
        );
        let card = resource.card();

        assert_eq!(card.name, "Sassoon General Hospital");
        assert_eq!(card.kind, "hospital");
        assert_eq!(card.address, "Jai Prakash Narayan Road");
        assert_eq!(card.website.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn card_falls_back_for_missing_tags() {
        let resource = Resource::from_tags(8, Coordinates::new(0.0, 0.0), &tags(&[("name", " ")]));
        let card = resource.card();

        assert_eq!(card.name, "Unnamed Resource");
        assert_eq!(card.kind, "Unknown Type");
        assert_eq!(card.phone, "Phone not available");
        assert_eq!(card.address, "Address not available");
        assert_eq!(card.website, None);
    }

    #[test]
    fn card_json_omits_missing_website() {
        let card = Resource::from_tags(9, Coordinates::new(1.0, 2.0), &HashMap::new()).card();
        let json = serde_json::to_value(&card).expect("serialize");

        assert_eq!(json["type"], "Unknown Type");
        assert!(json.get("website").is_none());
    }
}
