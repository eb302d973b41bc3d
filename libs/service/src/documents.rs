//! JSON document conversion at the store boundary.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use arogya_codec::ResourceCodec;

use crate::{Error, Result};

pub(crate) fn to_document<T: Serialize>(resource: &T) -> Result<JsonValue> {
    serde_json::to_value(resource)
        .map_err(|err| Error::Upstream(format!("failed to serialize document: {err}")))
}

pub(crate) fn parse<T: DeserializeOwned>(resource_type: &str, document: JsonValue) -> Result<T> {
    serde_json::from_value(document)
        .map_err(|err| Error::Upstream(format!("malformed {resource_type} document: {err}")))
}

/// Decode a batch of search results, skipping documents that fail to parse.
pub(crate) fn decode_all<C>(
    codec: &C,
    resource_type: &str,
    documents: Vec<JsonValue>,
) -> Vec<C::Flat>
where
    C: ResourceCodec,
    C::Resource: DeserializeOwned,
{
    documents
        .into_iter()
        .filter_map(
            |document| match serde_json::from_value::<C::Resource>(document) {
                Ok(resource) => Some(codec.decode(&resource)),
                Err(err) => {
                    tracing::warn!("skipping malformed {resource_type} document: {err}");
                    None
                }
            },
        )
        .collect()
}
