//! Reqwest-backed [`EntityClient`] for every resource family.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use super::envelope::{ItemEnvelope, ListEnvelope};
use super::transport::ApiTransport;
use crate::domain::ports::{ApiError, EntityClient, LandlordDirectory};
use crate::domain::{EntityId, ParentKind, Resource, User};

const LANDLORDS_PATH: &str = "users/landlords_all";

/// HTTP client for one resource type.
pub struct HttpEntityClient<R: Resource> {
    transport: ApiTransport,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for HttpEntityClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEntityClient")
            .field("kind", &R::KIND)
            .field("base", &self.transport.base().as_str())
            .finish()
    }
}

impl<R: Resource> HttpEntityClient<R> {
    /// Client issuing requests through `transport`.
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }
}

fn update_body<R: Resource>(id: EntityId, draft: &R::Draft) -> Result<Map<String, Value>, ApiError> {
    let mut body = match serde_json::to_value(draft) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(ApiError::validation(format!(
                "{} draft must serialise to an object, got {other}",
                R::KIND.noun()
            )));
        }
        Err(err) => return Err(ApiError::validation(err.to_string())),
    };
    body.insert(R::ID_FIELD.to_owned(), Value::from(id.get()));
    Ok(body)
}

/// Record echoed by a successful create, if the reply carries one.
///
/// Some endpoints answer `201 {"message": ...}` or an empty body; the record
/// is stored either way, so those replies are still a success.
fn created_record<R: Resource>(body: &[u8]) -> Option<R> {
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!(kind = %R::KIND, "create acknowledged with an empty body");
        return None;
    }
    match serde_json::from_slice::<ItemEnvelope<R>>(body) {
        Ok(envelope) => Some(envelope.into_record()),
        Err(err) => {
            debug!(kind = %R::KIND, error = %err, "create reply is not a record");
            None
        }
    }
}

#[async_trait]
impl<R: Resource> EntityClient<R> for HttpEntityClient<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        let envelope: ListEnvelope<R> = self.transport.get(&R::KIND.list_path()).await?;
        Ok(envelope.into_rows())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<R, ApiError> {
        let envelope: ItemEnvelope<R> = self.transport.get(&R::KIND.item_path(id)).await?;
        Ok(envelope.into_record())
    }

    async fn get_by_parent(
        &self,
        parent: ParentKind,
        parent_id: EntityId,
    ) -> Result<Vec<R>, ApiError> {
        if !R::supports_parent(parent) {
            return Err(ApiError::not_found(format!(
                "{} cannot be listed by {parent}",
                R::KIND
            )));
        }
        let path = R::KIND.parent_path(parent, parent_id);
        let envelope: ListEnvelope<R> = self.transport.get(&path).await?;
        Ok(envelope.into_rows())
    }

    async fn create(&self, draft: &R::Draft) -> Result<Option<R>, ApiError> {
        let body = self
            .transport
            .send_json_raw(Method::POST, R::KIND.segment(), draft)
            .await?;
        Ok(created_record::<R>(&body))
    }

    async fn update(&self, id: EntityId, draft: &R::Draft) -> Result<R, ApiError> {
        let body = update_body::<R>(id, draft)?;
        let reply: Value = self
            .transport
            .send_json(Method::PUT, &R::KIND.item_path(id), &body)
            .await?;
        match serde_json::from_value::<ItemEnvelope<R>>(reply) {
            Ok(envelope) => Ok(envelope.into_record()),
            Err(err) => {
                debug!(kind = %R::KIND, %id, error = %err, "update reply is not a record; refetching");
                self.get_by_id(id).await
            }
        }
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.transport.delete(&R::KIND.delete_path(id)).await
    }
}

#[async_trait]
impl LandlordDirectory for HttpEntityClient<User> {
    async fn list_landlords(&self) -> Result<Vec<User>, ApiError> {
        let envelope: ListEnvelope<User> = self.transport.get(LANDLORDS_PATH).await?;
        Ok(envelope.into_rows())
    }
}
