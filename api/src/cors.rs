use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Browser extensions identify themselves with this origin scheme.
pub const EXTENSION_ORIGIN_PREFIX: &str = "chrome-extension://";

const PREFLIGHT_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Asymmetric CORS policy.
///
/// Pre-flight requests are answered here with a bare 204 and never reach a
/// route. Extension origins are echoed back with credentials allowed; every
/// other origin gets the `*` wildcard on pre-flight and nothing at all on
/// regular responses.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let extension_origin = extension_origin(request.headers());

    if *request.method() == Method::OPTIONS {
        return preflight_response(extension_origin);
    }

    let mut response = next.run(request).await;

    if let Some(origin) = extension_origin {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        );
    }

    response
}

/// The `Origin` header, if present and an extension origin.
fn extension_origin(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(header::ORIGIN)
        .filter(|origin| {
            origin
                .to_str()
                .map(|o| o.starts_with(EXTENSION_ORIGIN_PREFIX))
                .unwrap_or(false)
        })
        .cloned()
}

fn preflight_response(extension_origin: Option<HeaderValue>) -> Response {
    let allow_origin = extension_origin.unwrap_or_else(|| HeaderValue::from_static("*"));

    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(PREFLIGHT_METHODS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("*"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            ),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, body::to_bytes, middleware, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const CORS_HEADERS: [header::HeaderName; 4] = [
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        header::ACCESS_CONTROL_ALLOW_METHODS,
        header::ACCESS_CONTROL_ALLOW_HEADERS,
    ];

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let handler = move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "ok"
            }
        };
        Router::new()
            .route("/thing", get(handler.clone()).post(handler).options(|| async { "routed" }))
            .layer(middleware::from_fn(cors_middleware))
    }

    fn request(method: Method, uri: &str, origin: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::from("{\"message\": \"ignored\"}")).unwrap()
    }

    #[tokio::test]
    async fn preflight_from_extension_echoes_origin() {
        let hits = Arc::new(AtomicUsize::new(0));
        let origin = "chrome-extension://abcdefghijklmnop";

        let response = app(hits.clone())
            .oneshot(request(Method::OPTIONS, "/thing", Some(origin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, PUT, DELETE, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn preflight_from_other_origins_gets_wildcard() {
        for origin in [Some("https://example.com"), Some("moz-extension://abc"), None] {
            let response = app(Arc::new(AtomicUsize::new(0)))
                .oneshot(request(Method::OPTIONS, "/thing", origin))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        }
    }

    #[tokio::test]
    async fn preflight_short_circuits_explicit_options_route() {
        let response = app(Arc::new(AtomicUsize::new(0)))
            .oneshot(request(Method::OPTIONS, "/thing", None))
            .await
            .unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn extension_origin_gets_credentialed_headers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let origin = "chrome-extension://abcdefghijklmnop";

        let response = app(hits.clone())
            .oneshot(request(Method::GET, "/thing", Some(origin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn other_origins_pass_through_untouched() {
        for origin in [Some("https://example.com"), Some("CHROME-EXTENSION://abc"), None] {
            let response = app(Arc::new(AtomicUsize::new(0)))
                .oneshot(request(Method::POST, "/thing", origin))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            for name in CORS_HEADERS {
                assert!(!response.headers().contains_key(&name), "unexpected {}", name);
            }
        }
    }

    #[test]
    fn non_ascii_origin_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_bytes(b"chrome-extension://\xff").unwrap(),
        );
        assert!(extension_origin(&headers).is_none());
    }
}
