//! Custom assertion macros
//!
//! Assertions on HTTP responses with messages that name the request.

/// Assert a `302 Found` pointing at `$location`
#[macro_export]
macro_rules! assert_redirect {
    ($response:expr, $location:expr) => {{
        let response = &$response;
        assert_eq!(
            response.status(),
            axum::http::StatusCode::FOUND,
            "expected a redirect to {}",
            $location
        );
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some($location)
        );
    }};
}

/// Assert the response status
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!($response.status(), $status, "unexpected status");
    };
}
