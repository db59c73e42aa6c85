//! Axum implementation of the router seam

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use wireform_core::Router;

/// Router collaborator producing `axum::response::Response`
///
/// The triple is applied verbatim: the body becomes the response body,
/// the status code is used as-is (out-of-range codes collapse to 500),
/// and every header entry is set in the given order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxumRouter;

impl Router for AxumRouter {
    type Response = Response;

    fn build_response(
        &self,
        body: String,
        status: u16,
        headers: &[(String, String)],
    ) -> Response {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, body).into_response();

        for (name, value) in headers {
            // Header names/values come from configured payload metadata;
            // entries the HTTP layer cannot represent are skipped.
            let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) else {
                continue;
            };
            response.headers_mut().insert(name, value);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn body_string(response: Response) -> String {
        let bytes = tokio_test::block_on(response.into_body().collect())
            .unwrap()
            .to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_builds_response_with_status_and_body() {
        let response = AxumRouter.build_response(r#"{"id":7}"#.to_string(), 201, &[]);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response), r#"{"id":7}"#);
    }

    #[test]
    fn test_headers_are_applied_in_order() {
        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Location".to_string(), "/things/7".to_string()),
        ];
        let response = AxumRouter.build_response("{}".to_string(), 200, &headers);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(response.headers().get("location").unwrap(), "/things/7");
    }

    #[test]
    fn test_out_of_range_status_collapses_to_500() {
        let response = AxumRouter.build_response(String::new(), 42, &[]);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unrepresentable_header_is_skipped() {
        let headers = vec![("Location".to_string(), "bad\nvalue".to_string())];
        let response = AxumRouter.build_response(String::new(), 200, &headers);
        assert!(response.headers().get("location").is_none());
    }
}
