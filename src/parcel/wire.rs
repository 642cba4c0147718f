//! Persisted form of a parcel's polygons
//!
//! The store keeps `Array<Array<{lat, lng}>>`: rings in set order, vertices in
//! ring order, no envelope. Writing and reading back yields the same set bit
//! for bit (serde_json is built with `float_roundtrip`).

use super::PolygonSet;
use crate::domain::{GeoPoint, Polygon};
use crate::error::{GridError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Typed mirror of the wire array
pub type PersistedPolygons = Vec<Vec<GeoPoint>>;

/// The part of a land record this crate reads
#[derive(Debug, Deserialize)]
struct LandRecord {
    #[serde(default)]
    polygons: Option<Value>,
}

impl PolygonSet {
    pub fn to_persisted_form(&self) -> PersistedPolygons {
        self.iter().map(|p| p.vertices().to_vec()).collect()
    }

    /// Rebuild a set from its wire array, validating its shape
    ///
    /// Rings are taken as drawn: one- and two-vertex rings load, empty rings
    /// do not.
    pub fn from_persisted_form(data: &Value) -> Result<Self> {
        let rings = PersistedPolygons::deserialize(data).map_err(malformed)?;
        PolygonSet::try_from(rings)
    }

    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self.to_persisted_form()).map_err(malformed)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&self.to_persisted_form()).map_err(malformed)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let rings: PersistedPolygons = serde_json::from_str(s).map_err(malformed)?;
        PolygonSet::try_from(rings)
    }

    /// Extract the set from a full land record (`{"polygons": [...], ...}`)
    ///
    /// A record whose `polygons` field is absent, null or not an array holds no
    /// polygons yet and loads as an empty set.
    pub fn from_land_record(record: &Value) -> Result<Self> {
        let record = LandRecord::deserialize(record).map_err(malformed)?;
        match record.polygons {
            Some(polygons @ Value::Array(_)) => Self::from_persisted_form(&polygons),
            None | Some(Value::Null) => Ok(PolygonSet::new()),
            Some(other) => {
                log::warn!("land record polygons field is {}, treating as empty", other);
                Ok(PolygonSet::new())
            }
        }
    }
}

impl TryFrom<PersistedPolygons> for PolygonSet {
    type Error = GridError;

    fn try_from(data: PersistedPolygons) -> Result<Self> {
        let polygons = data
            .into_iter()
            .enumerate()
            .map(|(i, ring)| {
                Polygon::from_vertices(ring)
                    .map_err(|e| GridError::MalformedPersistedForm(format!("ring {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PolygonSet::from(polygons))
    }
}

impl From<&PolygonSet> for PersistedPolygons {
    fn from(set: &PolygonSet) -> Self {
        set.to_persisted_form()
    }
}

fn malformed(e: serde_json::Error) -> GridError {
    GridError::MalformedPersistedForm(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_set() -> PolygonSet {
        let mut set = PolygonSet::new();
        set.add(
            Polygon::new(vec![
                GeoPoint::new(37.774929999999996, -122.41941550000001),
                GeoPoint::new(37.7760, -122.4180),
                GeoPoint::new(0.1 + 0.2, 1e-300),
            ])
            .unwrap(),
        );
        set.add(
            Polygon::new(vec![
                GeoPoint::new(-3.745, -38.523),
                GeoPoint::new(-3.7451, -38.5231),
                GeoPoint::new(-3.7452, -38.5229),
                GeoPoint::new(f64::MIN_POSITIVE, f64::MAX),
            ])
            .unwrap(),
        );
        set
    }

    #[test]
    fn test_round_trip_value() {
        let set = sample_set();
        let back = PolygonSet::from_persisted_form(&set.to_json_value().unwrap()).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_round_trip_text_is_exact() {
        let set = sample_set();
        let back = PolygonSet::from_json_str(&set.to_json_string().unwrap()).unwrap();
        assert_eq!(back, set);
        for (a, b) in set.iter().zip(back.iter()) {
            for (va, vb) in a.vertices().iter().zip(b.vertices()) {
                assert_eq!(va.lat.to_bits(), vb.lat.to_bits());
                assert_eq!(va.lng.to_bits(), vb.lng.to_bits());
            }
        }
    }

    #[test]
    fn test_typed_form_matches_value() {
        let set = sample_set();
        let typed: PersistedPolygons = (&set).into();
        let as_value = serde_json::to_value(&typed).unwrap();
        assert_eq!(as_value, set.to_json_value().unwrap());
    }

    #[test]
    fn test_round_trip_typed() {
        let set = sample_set();
        let back = PolygonSet::try_from(set.to_persisted_form()).unwrap();
        assert_eq!(back, set);
        assert!(PolygonSet::try_from(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_wire_shape() {
        let mut set = PolygonSet::new();
        set.add(
            Polygon::new(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 1.5),
                GeoPoint::new(1.0, 1.0),
            ])
            .unwrap(),
        );
        assert_eq!(
            set.to_json_value().unwrap(),
            json!([[{"lat": 0.0, "lng": 0.0}, {"lat": 0.0, "lng": 1.5}, {"lat": 1.0, "lng": 1.0}]])
        );
    }

    #[test]
    fn test_empty_set() {
        let set = PolygonSet::from_persisted_form(&json!([])).unwrap();
        assert!(set.is_empty());
        assert_eq!(PolygonSet::new().to_json_string().unwrap(), "[]");
    }

    #[test]
    fn test_integer_coordinates_accepted() {
        let set = PolygonSet::from_persisted_form(&json!([[{"lat": 1, "lng": 2}]])).unwrap();
        assert_eq!(set.get(0).unwrap().vertices(), &[GeoPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn test_malformed_shapes() {
        let cases = [
            json!({"polygons": []}),
            json!([{"lat": 1.0, "lng": 2.0}]),
            json!([[]]),
            json!([[{"lat": 1.0}]]),
            json!([[{"lat": "1.0", "lng": 2.0}]]),
            json!([[{"lat": 1.0, "lng": null}]]),
        ];
        for case in cases {
            let err = PolygonSet::from_persisted_form(&case).unwrap_err();
            assert!(
                matches!(err, GridError::MalformedPersistedForm(_)),
                "{:?}",
                case
            );
        }
        assert!(PolygonSet::from_json_str("not json").is_err());
    }

    #[test]
    fn test_error_names_missing_field() {
        let err = PolygonSet::from_persisted_form(&json!([
            [{"lat": 0.0, "lng": 0.0}],
            [{"lat": 0.0, "lng": 0.0}, {"lat": 1.0}]
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("missing field `lng`"), "{}", err);
    }

    #[test]
    fn test_from_land_record() {
        let record = json!({
            "id": 4,
            "name": "North field",
            "polygons": [[{"lat": 0.0, "lng": 0.0}, {"lat": 0.0, "lng": 1.0}, {"lat": 1.0, "lng": 1.0}]]
        });
        assert_eq!(PolygonSet::from_land_record(&record).unwrap().len(), 1);

        assert!(PolygonSet::from_land_record(&json!({"id": 4})).unwrap().is_empty());
        assert!(
            PolygonSet::from_land_record(&json!({"polygons": null}))
                .unwrap()
                .is_empty()
        );
        assert!(
            PolygonSet::from_land_record(&json!({"polygons": "n/a"}))
                .unwrap()
                .is_empty()
        );
        assert!(PolygonSet::from_land_record(&json!({"polygons": [[{"lat": 1}]]})).is_err());
        assert!(PolygonSet::from_land_record(&json!({"polygons": [[]]})).is_err());
    }
}
