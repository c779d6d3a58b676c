//! HTTP request sending
//!
//! Sends one [`OutboundRequest`] with reqwest and copies the response body to
//! stdout, either streamed as-is or re-indented when it is JSON and pretty
//! output was asked for. Everything else (request line, headers, status)
//! goes to stderr.

use std::io::Write;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::errors::HttpcliError;
use crate::mime;
use crate::output::{format_json, DiagnosticWriter, JsonFormatterOptions};
use crate::request::OutboundRequest;
use crate::signals;

pub const USER_AGENT_STRING: &str = concat!("httpcli/", env!("CARGO_PKG_VERSION"));

/// Per-invocation options of an HTTP verb
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Session headers left out of this request (`-x`)
    pub exclude: Vec<String>,
    /// No diagnostics on stderr (`-q`)
    pub quiet: bool,
    /// Re-indent JSON responses (`-p`)
    pub pretty: bool,
    /// Whether stderr diagnostics may use colors
    pub colors: bool,
}

/// Build the reqwest client
///
/// The `User-Agent` set here is a default: a `User-Agent` header stored in the
/// session replaces it.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, HttpcliError> {
    let mut builder = Client::builder().user_agent(USER_AGENT_STRING);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Send `request` and write its response
///
/// Returns the HTTP status code; mapping it to an exit status is up to the
/// caller.
pub async fn execute<O, E>(
    client: &Client,
    request: &OutboundRequest,
    opts: &ExecuteOptions,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<u16, HttpcliError>
where
    O: Write,
    E: Write,
{
    let headers = request.outgoing_headers(&opts.exclude);
    let mut diag = DiagnosticWriter::new(stderr, opts.colors);

    if !opts.quiet {
        diag.write_request(&request.method, &request.url, &headers, request.body.as_deref())?;
        diag.write_separator()?;
    }

    let mut builder = client
        .request(request.method.clone(), request.url.clone())
        .headers(headers.to_header_map()?);
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    tracing::debug!(method = %request.method, url = %request.url, "sending request");
    let mut response = builder.send().await?;
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "received response");

    if !opts.quiet {
        diag.write_response(status, response.headers())?;
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if opts.pretty && mime::is_json(content_type.as_deref()) {
        let body = response.bytes().await?;
        match format_json(&body, &JsonFormatterOptions::default()) {
            Ok(formatted) => {
                stdout.write_all(formatted.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
            Err(e) => {
                diag.write_warning(&format!("could not pretty-print JSON response: {}", e))?;
                stdout.write_all(&body)?;
            }
        }
    } else {
        while let Some(chunk) = response.chunk().await? {
            stdout.write_all(&chunk)?;
            if signals::was_interrupted() {
                tracing::debug!("interrupted while streaming response body");
                break;
            }
        }
    }
    stdout.flush()?;

    if !opts.quiet {
        diag.finish()?;
    }

    Ok(status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::Context;
    use reqwest::Method;
    use std::io::{self, Cursor};
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(server: &MockServer) -> Context {
        let mut ctx = Context::new();
        ctx.set_base_url(&format!("{}/v1", server.uri())).unwrap();
        ctx.headers_mut().set("X-Api-Key", "abc123");
        ctx
    }

    async fn run(request: &OutboundRequest, opts: &ExecuteOptions) -> (u16, String, String) {
        let client = build_client(None).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(&client, request, opts, &mut out, &mut err).await.unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_sends_session_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/widgets"))
            .and(query_param("page", "2"))
            .and(header("X-Api-Key", "abc123"))
            .and(header("User-Agent", USER_AGENT_STRING))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1,2]"))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let req = OutboundRequest::build(Method::GET, "/widgets?page=2", None, &ctx, io::empty())
            .unwrap();
        let (status, out, err) = run(&req, &ExecuteOptions::default()).await;

        assert_eq!(status, 200);
        assert_eq!(out, "[1,2]");
        assert!(err.starts_with(&format!("GET {}/v1/widgets?page=2\n", server.uri())));
        assert!(err.contains("X-Api-Key: abc123\n"));
        assert!(err.contains("200 OK\n"));
        assert!(err.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn test_post_body_defaults_to_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/widgets"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"name":"a"}"#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let stdin = Cursor::new(br#"{"name":"a"}"#.to_vec());
        let req = OutboundRequest::build(Method::POST, "/widgets", None, &ctx, stdin).unwrap();
        let (status, out, _) = run(&req, &ExecuteOptions::default()).await;

        assert_eq!(status, 201);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_pretty_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"b":1,"a":true}"#, "application/json; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let ctx = context(&server);
        let req = OutboundRequest::build(Method::GET, "x", None, &ctx, io::empty()).unwrap();
        let opts = ExecuteOptions { pretty: true, quiet: true, ..Default::default() };
        let (_, out, err) = run(&req, &opts).await;

        assert_eq!(out, "{\n  \"a\": true,\n  \"b\": 1\n}\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_pretty_falls_back_to_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{truncated", "application/json"),
            )
            .mount(&server)
            .await;

        let ctx = context(&server);
        let req = OutboundRequest::build(Method::GET, "x", None, &ctx, io::empty()).unwrap();
        let opts = ExecuteOptions { pretty: true, quiet: true, ..Default::default() };
        let (status, out, err) = run(&req, &opts).await;

        assert_eq!(status, 200);
        assert_eq!(out, "{truncated");
        assert!(err.starts_with("WARNING: "));
    }

    #[tokio::test]
    async fn test_pretty_ignores_non_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/plain")
                    .set_body_string("{\"b\":1}"),
            )
            .mount(&server)
            .await;

        let ctx = context(&server);
        let req = OutboundRequest::build(Method::GET, "x", None, &ctx, io::empty()).unwrap();
        let opts = ExecuteOptions { pretty: true, quiet: true, ..Default::default() };
        let (_, out, _) = run(&req, &opts).await;

        assert_eq!(out, "{\"b\":1}");
    }

    #[tokio::test]
    async fn test_excluded_header_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(header("X-Api-Key", "abc123"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let req = OutboundRequest::build(Method::DELETE, "w/1", None, &ctx, io::empty()).unwrap();
        let opts = ExecuteOptions { exclude: vec!["x-api-key".to_string()], ..Default::default() };
        let (status, _, err) = run(&req, &opts).await;

        assert_eq!(status, 404);
        assert!(!err.contains("X-Api-Key"));
    }

    #[tokio::test]
    async fn test_session_user_agent_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("User-Agent", "custom/1.0"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut ctx = context(&server);
        ctx.headers_mut().set("User-Agent", "custom/1.0");
        let req = OutboundRequest::build(Method::GET, "x", None, &ctx, io::empty()).unwrap();
        let (status, _, _) = run(&req, &ExecuteOptions::default()).await;

        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // nothing listens on a port just released by the OS
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let mut ctx = Context::new();
        ctx.set_base_url(&format!("http://127.0.0.1:{}", port)).unwrap();
        let req = OutboundRequest::build(Method::GET, "x", None, &ctx, io::empty()).unwrap();

        let client = build_client(Some(Duration::from_secs(5))).unwrap();
        let opts = ExecuteOptions::default();
        let err = execute(&client, &req, &opts, &mut Vec::new(), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpcliError::Transport(_)));
    }
}
