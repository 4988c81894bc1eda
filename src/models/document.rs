//! Schema-free document models.
//!
//! Dresses, accessories, reviews and bookings carry no fixed schema: each
//! record is a JSON object plus a server-assigned identifier.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};
use uuid::Uuid;

/// JSON object body of a document.
pub type Fields = Map<String, Value>;

/// Key under which a document's identifier is exposed to clients.
pub const ID_FIELD: &str = "_id";

/// The document collections backed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Dresses,
    Accessories,
    Reviews,
    Bookings,
}

impl Collection {
    /// Table holding this collection.
    pub const fn table(self) -> &'static str {
        match self {
            Collection::Dresses => "dresses",
            Collection::Accessories => "accessories",
            Collection::Reviews => "reviews",
            Collection::Bookings => "bookings",
        }
    }

    /// Message returned after inserting into this collection.
    pub const fn created_message(self) -> &'static str {
        match self {
            Collection::Dresses | Collection::Accessories => "Product created",
            Collection::Reviews => "Review added",
            Collection::Bookings => "Booking saved",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// A stored document.
///
/// Serializes as its fields with `_id` added, so clients see exactly what
/// they submitted plus the identifier.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,

    #[sqlx(json)]
    pub body: Fields,

    pub created_at: DateTime<Utc>,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.body.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in self.body.iter().filter(|(key, _)| *key != ID_FIELD) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Remove fields clients must not control before storing a body.
pub fn sanitize(mut fields: Fields) -> Fields {
    fields.remove(ID_FIELD);
    fields
}

/// Overwrite top-level fields of `target` with those present in `patch`.
///
/// Mirrors the PostgreSQL `jsonb || jsonb` operator: nested objects are
/// replaced, not merged.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Response for endpoints that create a document.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: Uuid,
}

/// Response for endpoints that only report success.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response for `POST /reviews`. The stored review is echoed with its `_id`.
#[derive(Debug, Serialize)]
pub struct ReviewCreatedResponse {
    pub message: &'static str,
    pub id: Uuid,
    pub review: Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut target = fields(json!({"name": "Aurora", "price": 1200, "tags": ["lace"]}));
        merge_fields(&mut target, fields(json!({"price": 999, "color": "ivory"})));

        assert_eq!(
            Value::Object(target),
            json!({"name": "Aurora", "price": 999, "tags": ["lace"], "color": "ivory"})
        );
    }

    #[test]
    fn sanitize_drops_client_supplied_id() {
        let cleaned = sanitize(fields(json!({"_id": "abc", "name": "Veil"})));
        assert_eq!(Value::Object(cleaned), json!({"name": "Veil"}));
    }

    #[test]
    fn document_serializes_with_id() {
        let id = Uuid::new_v4();
        let document = Document {
            id,
            body: fields(json!({"name": "Aurora"})),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value, json!({"_id": id, "name": "Aurora"}));
    }
}
