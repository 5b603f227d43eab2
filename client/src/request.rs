use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use strum_macros::Display;

const API_PATH: &str = "api";
const BEARER_PREFIX: &str = "bearer";

/// Which configured token a call authenticates with.
#[derive(Debug, Clone, Copy, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum AuthScope {
    Read,
    Write,
    None,
}

/// Joins `segments` under `<base>/api`, skipping empty segments and
/// stripping stray slashes so the result never contains `//` in its path.
pub(crate) fn api_url(base_url: &str, segments: &[&str]) -> String {
    let mut url = format!("{}/{}", base_url.trim_end_matches('/'), API_PATH);
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// Attaches `Authorization: bearer <token>` when a token is present.
pub(crate) fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token.filter(|t| !t.is_empty()) {
        Some(token) => match HeaderValue::from_str(&format!("{} {}", BEARER_PREFIX, token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                builder.header(AUTHORIZATION, value)
            }
            // let the builder surface the invalid header when the request is built
            Err(_) => builder.header(AUTHORIZATION, format!("{} {}", BEARER_PREFIX, token)),
        },
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url() {
        assert_eq!(
            api_url("http://localhost:8080", &["tiny"]),
            "http://localhost:8080/api/tiny"
        );
    }

    #[test]
    fn resource_and_expand_url() {
        assert_eq!(
            api_url("http://localhost:8080", &["tiny", "abc", "expand"]),
            "http://localhost:8080/api/tiny/abc/expand"
        );
    }

    #[test]
    fn no_double_slashes() {
        assert_eq!(
            api_url("http://localhost:8080/", &["/tiny/", "abc/"]),
            "http://localhost:8080/api/tiny/abc"
        );
        assert_eq!(
            api_url("http://localhost:8080//", &["tiny", "", "expand"]),
            "http://localhost:8080/api/tiny/expand"
        );
    }

    #[test]
    fn base_url_with_prefix_path() {
        assert_eq!(
            api_url("https://example.com/shortener", &["tiny"]),
            "https://example.com/shortener/api/tiny"
        );
    }

    #[test]
    fn scope_display() {
        assert_eq!(AuthScope::Read.to_string(), "read");
        assert_eq!(AuthScope::Write.to_string(), "write");
        assert_eq!(AuthScope::None.to_string(), "none");
    }

    #[test]
    fn authorize_sets_bearer_header() {
        let http = reqwest::Client::new();
        let req = authorize(http.get("http://localhost/api/tiny"), Some("secret"))
            .build()
            .unwrap();
        let value = req.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(value, "bearer secret");
        assert!(value.is_sensitive());
    }

    #[test]
    fn authorize_skips_missing_or_empty_token() {
        let http = reqwest::Client::new();
        let req = authorize(http.get("http://localhost/api/tiny"), None)
            .build()
            .unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());

        let req = authorize(http.get("http://localhost/api/tiny"), Some(""))
            .build()
            .unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn authorize_rejects_invalid_token_at_build() {
        let http = reqwest::Client::new();
        let result = authorize(http.get("http://localhost/api/tiny"), Some("bad\ntoken")).build();
        assert!(result.is_err());
    }
}
