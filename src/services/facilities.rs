use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Search radius for the point-of-interest query, in meters.
pub const SEARCH_RADIUS_METERS: u32 = 5000;

/// Number of nearest facilities returned to the caller.
pub const MAX_RESULTS: usize = 5;

const UNNAMED: &str = "Unnamed";

#[derive(Debug, Error)]
pub enum FacilityError {
    /// The external query failed (network/service error). Distinct from an
    /// empty result set, which is a successful lookup.
    #[error("facility lookup unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct Facility {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Euclidean distance in raw coordinate-degree space. Not a geodesic
    /// distance: longitude degrees shrink with latitude, so the ordering is
    /// an approximation that only holds up at short range.
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Queries a public Overpass-style endpoint for medical facilities around a
/// coordinate and ranks them by proximity.
pub struct FacilityFinder {
    client: reqwest::Client,
    endpoint: String,
}

impl FacilityFinder {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Returns up to [`MAX_RESULTS`] facilities nearest to (lat, lon).
    ///
    /// An empty list means the query succeeded but matched nothing; a
    /// transport or decode failure surfaces as [`FacilityError::Unavailable`].
    pub async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<Facility>, FacilityError> {
        let query = overpass_query(lat, lon);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let data: OverpassResponse = response.json().await?;
        Ok(rank_by_proximity(lat, lon, data.elements))
    }
}

/// Overpass QL for hospitals, clinics, and diagnostic facilities within the
/// search radius of the given point.
fn overpass_query(lat: f64, lon: f64) -> String {
    format!(
        r#"[out:json];
(
  node["amenity"="hospital"](around:{radius},{lat},{lon});
  node["amenity"="clinic"](around:{radius},{lat},{lon});
  node["healthcare"="diagnostic"](around:{radius},{lat},{lon});
);
out;"#,
        radius = SEARCH_RADIUS_METERS,
        lat = lat,
        lon = lon,
    )
}

fn rank_by_proximity(lat: f64, lon: f64, elements: Vec<OverpassElement>) -> Vec<Facility> {
    let mut places: Vec<Facility> = elements
        .into_iter()
        .map(|element| Facility {
            name: element
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| UNNAMED.to_string()),
            distance: degree_distance(lat, lon, element.lat, element.lon),
            lat: element.lat,
            lon: element.lon,
        })
        .collect();
    places.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    places.truncate(MAX_RESULTS);
    places
}

fn degree_distance(lat: f64, lon: f64, other_lat: f64, other_lon: f64) -> f64 {
    (lat - other_lat).hypot(lon - other_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(lat: f64, lon: f64, name: Option<&str>) -> OverpassElement {
        let mut tags = HashMap::new();
        if let Some(name) = name {
            tags.insert("name".to_string(), name.to_string());
        }
        OverpassElement { lat, lon, tags }
    }

    #[test]
    fn closer_coordinate_delta_ranks_first() {
        let ranked = rank_by_proximity(
            10.0,
            20.0,
            vec![
                element(10.01, 20.01, Some("Far Clinic")),
                element(10.001, 20.001, Some("Near Hospital")),
            ],
        );
        assert_eq!(ranked[0].name, "Near Hospital");
        assert_eq!(ranked[1].name, "Far Clinic");
        assert!(ranked[0].distance < ranked[1].distance);
    }

    #[test]
    fn result_count_is_min_of_five_and_matches() {
        let elements: Vec<OverpassElement> = (0..8)
            .map(|i| element(10.0 + f64::from(i) * 0.001, 20.0, Some("H")))
            .collect();
        assert_eq!(rank_by_proximity(10.0, 20.0, elements).len(), MAX_RESULTS);

        let elements = vec![element(10.0, 20.0, Some("Only One"))];
        assert_eq!(rank_by_proximity(10.0, 20.0, elements).len(), 1);

        assert!(rank_by_proximity(10.0, 20.0, Vec::new()).is_empty());
    }

    #[test]
    fn unnamed_facilities_get_a_placeholder_name() {
        let ranked = rank_by_proximity(10.0, 20.0, vec![element(10.0, 20.0, None)]);
        assert_eq!(ranked[0].name, UNNAMED);
    }

    #[test]
    fn query_carries_radius_and_all_three_tag_filters() {
        let query = overpass_query(12.97, 77.59);
        assert!(query.contains(r#"node["amenity"="hospital"](around:5000,12.97,77.59)"#));
        assert!(query.contains(r#"node["amenity"="clinic"](around:5000,12.97,77.59)"#));
        assert!(query.contains(r#"node["healthcare"="diagnostic"](around:5000,12.97,77.59)"#));
        assert!(query.starts_with("[out:json];"));
    }

    #[test]
    fn overpass_response_parses_with_and_without_tags() {
        let raw = r#"{
            "elements": [
                { "lat": 10.1, "lon": 20.1, "tags": { "name": "City Hospital", "amenity": "hospital" } },
                { "lat": 10.2, "lon": 20.2 }
            ]
        }"#;
        let parsed: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.elements.len(), 2);
        assert_eq!(parsed.elements[0].tags.get("name").unwrap(), "City Hospital");
        assert!(parsed.elements[1].tags.is_empty());

        let parsed: OverpassResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.elements.is_empty());
    }
}
