// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model for storage and API.
//!
//! A trip has a fixed core (`owner`, `name`, `waypoints`) and carries any
//! other client-supplied fields through untouched.

use crate::models::DocumentId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys a client may never set directly.
const RESERVED_KEYS: [&str; 2] = ["_id", "owner"];

/// Stored trip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Store-assigned id (also used as document ID)
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Username of the creator
    pub owner: String,
    /// Trip title
    #[serde(default)]
    pub name: String,
    /// Ordered route stops
    #[serde(default)]
    pub waypoints: Vec<String>,
    /// Pass-through fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client payload for create and update.
///
/// Every field is optional so the same shape serves as a merge patch.
/// An absent core field leaves the stored value alone; an explicit `null`
/// is rejected rather than read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub waypoints: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserialize a present field, refusing `null`.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TripPayload {
    /// Drop reserved keys so the client cannot spoof id or owner.
    pub fn sanitized(mut self) -> Self {
        for key in RESERVED_KEYS {
            self.extra.remove(key);
        }
        self
    }
}

impl Trip {
    /// Build a new trip from a payload; the owner always comes from the caller.
    pub fn new(id: DocumentId, owner: &str, payload: TripPayload) -> Self {
        let payload = payload.sanitized();
        Self {
            id,
            owner: owner.to_string(),
            name: payload.name.unwrap_or_default(),
            waypoints: payload.waypoints.unwrap_or_default(),
            extra: payload.extra,
        }
    }

    /// Overwrite every field present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: &TripPayload) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(waypoints) = &patch.waypoints {
            self.waypoints = waypoints.clone();
        }
        for (key, value) in &patch.extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id() -> DocumentId {
        DocumentId::parse("55f0cbb4236f44b7f0e3cb23").unwrap()
    }

    fn payload(value: Value) -> TripPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_forces_owner() {
        let trip = Trip::new(
            id(),
            "ryankim",
            payload(json!({"name": "Trip to SF", "owner": "mallory", "_id": "x"})),
        );

        assert_eq!(trip.owner, "ryankim");
        assert_eq!(trip.id, id());
        assert!(trip.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_round_trip_through_json() {
        let trip = Trip::new(
            id(),
            "ryankim",
            payload(json!({"name": "Trip to SF", "waypoints": ["LA", "SJ"], "budget": 300})),
        );

        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value["budget"], 300);
        assert_eq!(value["waypoints"], json!(["LA", "SJ"]));
        assert_eq!(value["_id"], "55f0cbb4236f44b7f0e3cb23");

        let back: Trip = serde_json::from_value(value).unwrap();
        assert_eq!(back, trip);
    }

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let mut trip = Trip::new(
            id(),
            "ryankim",
            payload(json!({"name": "Trip to SF", "waypoints": ["LA", "SJ"], "season": "fall"})),
        );

        trip.merge(&payload(json!({"name": "Trip to Seattle", "owner": "mallory"})));

        assert_eq!(trip.name, "Trip to Seattle");
        assert_eq!(trip.waypoints, vec!["LA", "SJ"]);
        assert_eq!(trip.extra["season"], "fall");
        assert_eq!(trip.owner, "ryankim");
    }

    #[test]
    fn test_null_core_fields_are_rejected() {
        for body in [json!({"name": null}), json!({"waypoints": null})] {
            assert!(serde_json::from_value::<TripPayload>(body).is_err());
        }

        let absent = payload(json!({"season": null}));
        assert!(absent.name.is_none());
        assert!(absent.waypoints.is_none());
        assert_eq!(absent.extra["season"], Value::Null);
    }
}
