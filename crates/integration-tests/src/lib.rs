//! Shared helpers for API integration tests.
//!
//! Tests build a real router over temporary data and upload directories,
//! then drive it via `tower::ServiceExt::oneshot` - no live listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use artiva_server::{AppState, ServerConfig, app};

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "artiva-test-boundary";

/// A seeded catalog server over temporary directories.
///
/// Keeps the `TempDir` guards alive so the snapshot and upload files
/// survive for the duration of the test.
pub struct TestServer {
    router: Router,
    data_dir: TempDir,
    upload_dir: TempDir,
}

impl TestServer {
    /// Start a fresh server: empty temp directories, seed data installed.
    ///
    /// # Panics
    ///
    /// Panics if the temp directories or the application state cannot be
    /// created.
    #[must_use]
    pub fn start() -> Self {
        let data_dir = tempfile::tempdir().expect("create data dir");
        let upload_dir = tempfile::tempdir().expect("create upload dir");

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_dir: data_dir.path().to_path_buf(),
            upload_dir: upload_dir.path().to_path_buf(),
        };
        let state = AppState::open(config).expect("open application state");

        Self {
            router: app(state),
            data_dir,
            upload_dir,
        }
    }

    /// The managed upload directory on disk.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Send a request and return the raw response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to produce a response.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Send a request and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics on transport failure; a non-JSON or empty body decodes to
    /// `Value::Null`.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// GET a path.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    /// POST a JSON body.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(json_request("POST", uri, body)).await
    }

    /// PUT a JSON body.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn put_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(json_request("PUT", uri, body)).await
    }

    /// DELETE a path.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    /// Read a persisted collection snapshot straight from disk.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot file is missing or unparseable.
    #[must_use]
    pub fn snapshot(&self, name: &str) -> serde_json::Value {
        let path = self.data_dir.path().join(format!("{name}.json"));
        let bytes = std::fs::read(path).expect("read snapshot file");
        serde_json::from_slice(&bytes).expect("parse snapshot file")
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::start()
    }
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// One part of a multipart form.
pub struct MultipartPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> MultipartPart<'a> {
    /// A plain text field.
    #[must_use]
    pub const fn text(name: &'a str, data: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: data.as_bytes(),
        }
    }

    /// A file field.
    #[must_use]
    pub const fn file(
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    ) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

/// Encode parts as a `multipart/form-data` body using [`BOUNDARY`].
#[must_use]
pub fn multipart_body(parts: &[MultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Build a multipart request for the product endpoints.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn multipart_request(method: &str, uri: &str, parts: &[MultipartPart<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("request")
}
