//! HTTP form of the notes store calls.
//!
//! Maps each [`StoreCall`] onto the REST resource under the configured API
//! base and interprets the status/body that comes back:
//!
//! | call   | request                          | success        |
//! |--------|----------------------------------|----------------|
//! | list   | `GET {base}/notes`               | 2xx, JSON list |
//! | create | `POST {base}/notes` + JSON body  | 2xx            |
//! | update | `PUT {base}/notes/{id}` + body   | 2xx            |
//! | delete | `DELETE {base}/notes/{id}`       | 2xx            |
//!
//! The created note returned by `POST` is not consumed; callers always list
//! again afterwards.

use crate::domain::error::{NotekeeperError, Result};
use crate::domain::{Note, NoteId, StoreError};
use crate::store::call::{StoreCall, StoreOutcome, StoreOutput};
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP method of a store request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully-built store request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    title: &'a str,
    content: &'a str,
}

/// `{collection}/{id}`, with the id encoded as a single path segment.
fn note_url(collection: &str, id: &NoteId) -> String {
    format!("{collection}/{}", urlencoding::encode(&id.to_string()))
}

impl StoreCall {
    /// Builds the HTTP request for this call.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Decode`] if the body cannot be encoded.
    pub fn to_request(&self, api_base: &str) -> Result<HttpRequest> {
        let collection = format!("{}/notes", api_base.trim_end_matches('/'));

        let (method, url, body) = match self {
            Self::List => (HttpMethod::Get, collection, None),
            Self::Create { title, content } => {
                (HttpMethod::Post, collection, Some(NoteBody { title, content }))
            }
            Self::Update { id, title, content } => (
                HttpMethod::Put,
                note_url(&collection, id),
                Some(NoteBody { title, content }),
            ),
            Self::Delete { id } => (HttpMethod::Delete, note_url(&collection, id), None),
        };

        let mut headers = BTreeMap::new();
        let body = match body {
            Some(body) => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                serde_json::to_vec(&body)
                    .map_err(|e| NotekeeperError::Decode(format!("failed to encode note: {e}")))?
            }
            None => Vec::new(),
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Interprets the store's answer to this call.
    ///
    /// Any non-2xx status is a failure. A `list` body of `null` is an empty
    /// collection; an undecodable `list` body is a failure.
    pub fn interpret(&self, status: u16, body: &[u8]) -> StoreOutcome {
        let operation = self.operation();

        if !(200..300).contains(&status) {
            return Err(StoreError::rejected(operation, status, body));
        }

        match self {
            Self::List => serde_json::from_slice::<Option<Vec<Note>>>(body)
                .map(|notes| StoreOutput::Listed(notes.unwrap_or_default()))
                .map_err(|e| StoreError::transport(operation, format!("invalid notes payload: {e}"))),
            Self::Create { .. } | Self::Update { .. } | Self::Delete { .. } => Ok(StoreOutput::Done),
        }
    }
}
