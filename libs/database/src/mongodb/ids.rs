//! Identifier encoding for documents keyed by [`Uuid`].
//!
//! Ids are stored as hyphenated strings so documents written by the driver
//! and filters built from a `Uuid` always agree on the representation.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Address {
//!     #[serde(rename = "_id", with = "database::mongodb::ids::uuid_as_string")]
//!     id: Uuid,
//! }
//!
//! collection.find_one(ids::id_filter(&id)).await?;
//! ```

use mongodb::bson::{Bson, Document, doc};
use uuid::Uuid;

/// Serde adapter storing a `Uuid` as its hyphenated string form
pub mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// [`uuid_as_string`] for optional references. Pair with `#[serde(default)]`.
pub mod option_uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S>(id: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| Uuid::parse_str(&raw))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

/// Deserializer for `_id`s written by other tools. Strings pass through,
/// ObjectIds become their hex form, anything else its extended-JSON text.
pub mod opaque_id {
    use mongodb::bson::Bson;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Bson::deserialize(deserializer)? {
            Bson::String(raw) => raw,
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }
}

/// BSON value matching an id written through [`uuid_as_string`]
pub fn id_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// `{ _id: <id> }`
pub fn id_filter(id: &Uuid) -> Document {
    doc! { "_id": id_bson(id) }
}
