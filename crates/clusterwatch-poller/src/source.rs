//! Where verification reports come from.
//!
//! [`HttpReportSource`] performs a plain HTTP/1.1 GET with hyper and
//! decodes the JSON body. Anything else implementing [`ReportSource`]
//! can stand in for it, which is how the poller is driven in tests.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::header::{ACCEPT, HOST, USER_AGENT};
use http_body_util::{BodyExt, Empty};
use tracing::debug;

use clusterwatch_types::HealthReport;

use crate::error::{FetchError, FetchResult};

/// Boxed future returned by [`ReportSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = FetchResult<HealthReport>> + Send + 'a>>;

/// A producer of verification reports.
pub trait ReportSource: Send + Sync {
    /// Fetch the report served at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// Fetches reports over plain HTTP/1.1.
///
/// No TLS and no timeout of its own; the poller applies
/// [`PollerConfig::request_timeout`](crate::PollerConfig) around any source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpReportSource;

impl ReportSource for HttpReportSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(get_report(url))
    }
}

/// GET `url` and decode the body as a [`HealthReport`].
///
/// Any non-2xx status is a failure; the body is not inspected then.
pub async fn get_report(url: &str) -> FetchResult<HealthReport> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let uri: http::Uri = url.parse().map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
    if uri.scheme_str() != Some("http") {
        return Err(invalid("only http:// urls are supported"));
    }
    let authority = uri.authority().ok_or_else(|| invalid("missing host"))?.clone();
    let address = format!("{}:{}", authority.host(), authority.port_u16().unwrap_or(80));
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let stream = tokio::net::TcpStream::connect(&address)
        .await
        .map_err(|e| FetchError::Connect(e.to_string()))?;

    let io = hyper_util::rt::TokioIo::new(stream);
    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| FetchError::Handshake(e.to_string()))?;

    // Drive the connection in the background.
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            debug!(error = %e, "verification connection closed with error");
        }
    });

    let req = http::Request::builder()
        .method("GET")
        .uri(target)
        .header(HOST, authority.as_str())
        .header(USER_AGENT, "clusterwatch-poller/0.1")
        .header(ACCEPT, "application/json")
        .body(Empty::<Bytes>::new())
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let resp = sender
        .send_request(req)
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?
        .to_bytes();

    debug!(%url, bytes = body.len(), "verification report received");
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_https() {
        let err = get_report("https://dashboard.example/cluster/c1/verifications")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn rejects_relative_url() {
        let err = get_report("/cluster/c1/verifications")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn closed_port_is_connect_error() {
        let err = HttpReportSource
            .fetch("http://127.0.0.1:1/verifications")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Connect(_)));
    }
}
