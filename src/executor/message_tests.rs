//! Tests for HTTP request/response types.

use super::{Body, DumpError, HttpClient, HttpError, HttpRequest, HttpResponse};

fn url(s: &str) -> url::Url {
    url::Url::parse(s).unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let target = url("https://example.com/api");
        let req = HttpRequest::new(http::Method::PUT, target.clone());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, target);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_and_post_set_method() {
        assert_eq!(
            HttpRequest::get(url("https://example.com/")).method,
            http::Method::GET
        );
        assert_eq!(
            HttpRequest::post(url("https://example.com/")).method,
            http::Method::POST
        );
    }

    #[test]
    fn with_body_sets_buffered_body() {
        let req = HttpRequest::post(url("https://example.com/")).with_body(b"test body".to_vec());

        assert_eq!(req.body_bytes(), Some(&b"test body"[..]));
    }

    #[test]
    fn with_stream_sets_stream_body() {
        let req = HttpRequest::post(url("https://example.com/")).with_stream(&b"streamed"[..]);

        assert!(matches!(req.body, Some(Body::Stream(_))));
        assert!(req.body_bytes().is_none());
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let req = HttpRequest::get(url("https://example.com/"))
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn debug_format_does_not_expose_stream() {
        let req = HttpRequest::post(url("https://example.com/")).with_stream(&b"secret"[..]);
        let debug = format!("{req:?}");

        assert!(debug.contains("HttpRequest"));
        assert!(debug.contains("Stream"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn debug_format_shows_body_length() {
        let req = HttpRequest::post(url("https://example.com/")).with_body(vec![0; 12]);
        let debug = format!("{req:?}");

        assert!(debug.contains("Bytes(12 bytes)"));
    }
}

mod dump {
    use super::*;

    #[test]
    fn renders_request_line_host_and_headers() {
        let req = HttpRequest::get(url("https://example.com/api/items?page=2")).with_header(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        );

        let dump = req.dump().unwrap();

        assert_eq!(
            dump,
            "GET /api/items?page=2 HTTP/1.1\r\n\
             Host: example.com\r\n\
             accept: application/json\r\n\
             \r\n"
        );
    }

    #[test]
    fn includes_explicit_port_in_host() {
        let req = HttpRequest::get(url("http://localhost:8080/"));

        let dump = req.dump().unwrap();

        assert!(dump.contains("Host: localhost:8080\r\n"));
    }

    #[test]
    fn appends_buffered_body() {
        let req = HttpRequest::post(url("https://example.com/submit")).with_body(b"a=1&b=2".to_vec());

        let dump = req.dump().unwrap();

        assert!(dump.starts_with("POST /submit HTTP/1.1\r\n"));
        assert!(dump.ends_with("\r\n\r\na=1&b=2"));
    }

    #[test]
    fn stream_body_is_not_read() {
        let req = HttpRequest::post(url("https://example.com/")).with_stream(&b"payload"[..]);

        let dump = req.dump().unwrap();

        assert!(dump.ends_with("<streaming body>"));
        assert!(!dump.contains("payload"));
    }

    #[test]
    fn non_printable_header_value_fails() {
        let value = http::HeaderValue::from_bytes(b"caf\xe9").unwrap();
        let req = HttpRequest::get(url("https://example.com/"))
            .with_header(http::HeaderName::from_static("x-name"), value);

        let result = req.dump();

        assert!(matches!(
            result,
            Err(DumpError::InvalidHeaderValue { ref name }) if name == "x-name"
        ));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_creates_response_with_all_fields() {
        let body = b"response body".to_vec();
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), body.clone());

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, body);
    }

    #[test]
    fn is_success_distinguishes_2xx() {
        for status in [http::StatusCode::OK, http::StatusCode::NO_CONTENT] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(resp.is_success(), "Expected {status} to be success");
        }

        for status in [
            http::StatusCode::NOT_FOUND,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "Expected {status} to not be success");
        }
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![0xFF]);

        assert!(resp.body_text().is_none());
    }

    #[test]
    fn body_text_returns_valid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"Hello, World!".to_vec(),
        );

        assert_eq!(resp.body_text(), Some("Hello, World!"));
    }
}

mod errors {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("network unavailable")));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("network unavailable")
        );
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn body_error_preserves_source() {
        let error = HttpError::Body(std::io::Error::other("disk gone"));

        assert!(error.to_string().contains("request body"));
        assert!(error.source().is_some());
    }

    #[test]
    fn retries_exhausted_is_generic() {
        let error = super::super::ExecuteError::RetriesExhausted { attempts: 3 };

        assert_eq!(error.to_string(), "HTTP request failed after 3 attempts");
        assert!(error.source().is_none());
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
        assert_send_sync::<super::super::ExecuteError>();
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        call_count: AtomicUsize,
    }

    impl HttpClient for CountingClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(
                http::StatusCode::CREATED,
                http::HeaderMap::new(),
                b"created".to_vec(),
            ))
        }
    }

    #[tokio::test]
    async fn arc_client_delegates_to_inner() {
        let inner = Arc::new(CountingClient {
            call_count: AtomicUsize::new(0),
        });
        let shared = Arc::clone(&inner);

        let result = shared
            .request(HttpRequest::get(url("https://example.com/")))
            .await
            .unwrap();

        assert_eq!(result.status, http::StatusCode::CREATED);
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_client<T: HttpClient>() {}
        assert_client::<CountingClient>();
        assert_client::<Arc<CountingClient>>();
    }
}
