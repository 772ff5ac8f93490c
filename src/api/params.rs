// Query-string extraction and validation for the update endpoint

use crate::api::error::UpdateError;
use crate::api::models::UpdateRequest;

/// Raw, still-untrusted query parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateParams {
    pub id: Option<String>,
    pub youtube_url: Option<String>,
}

impl UpdateParams {
    /// Percent-decodes `query`; when a key repeats, the last value wins.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "id" => params.id = Some(value.into_owned()),
                "youtube_url" => params.youtube_url = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// Presence checks first, URL syntax second. No storage access happens
    /// before this returns `Ok`.
    pub fn validate(&self) -> Result<UpdateRequest, UpdateError> {
        let id = self.id.as_deref().and_then(parse_id);
        let youtube_url = self.youtube_url.as_deref().map(str::trim).unwrap_or("");

        let id = match id {
            Some(id) if !youtube_url.is_empty() => id,
            _ => return Err(UpdateError::MissingParameters),
        };

        check_url_syntax(youtube_url).map_err(UpdateError::InvalidUrl)?;

        Ok(UpdateRequest {
            id,
            youtube_url: youtube_url.to_string(),
        })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Schemes that are valid without a `//host` authority.
const HOSTLESS_SCHEMES: [&str; 3] = ["mailto", "news", "file"];

/// Strict syntax check on the raw string.
///
/// `Url::parse` repairs input (drops tabs and newlines, encodes spaces,
/// accepts `http:host`), but the raw string is what gets stored, so those
/// repairs count as failures here.
fn check_url_syntax(raw: &str) -> Result<(), String> {
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("contains whitespace or control characters".to_string());
    }

    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    let scheme = parsed.scheme();
    if HOSTLESS_SCHEMES.contains(&scheme) {
        return Ok(());
    }

    // Url::parse lowercases the scheme but keeps its length.
    let has_authority = raw
        .get(scheme.len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    if !has_authority || !has_host {
        return Err(format!("{scheme} URL must have a host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(query: &str) -> Result<UpdateRequest, UpdateError> {
        UpdateParams::from_query(query).validate()
    }

    #[test]
    fn test_from_query_decodes_and_last_wins() {
        let p = UpdateParams::from_query(
            "id=1&youtube_url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DXXXX&id=2",
        );
        assert_eq!(p.id.as_deref(), Some("2"));
        assert_eq!(
            p.youtube_url.as_deref(),
            Some("https://www.youtube.com/watch?v=XXXX")
        );
    }

    #[test]
    fn test_valid_request_keeps_trimmed_input() {
        let req = validate("id=14434&youtube_url=%20https://youtu.be/XXXX%09").unwrap();
        assert_eq!(req.id, 14434);
        assert_eq!(req.youtube_url, "https://youtu.be/XXXX");
    }

    #[test]
    fn test_url_is_not_normalized() {
        let req = validate("id=5&youtube_url=HTTPS://WWW.YouTube.com").unwrap();
        assert_eq!(req.youtube_url, "HTTPS://WWW.YouTube.com");
    }

    #[test]
    fn test_missing_or_non_positive_id() {
        for q in [
            "youtube_url=https://youtu.be/x",
            "id=&youtube_url=https://youtu.be/x",
            "id=0&youtube_url=https://youtu.be/x",
            "id=-4&youtube_url=https://youtu.be/x",
            "id=abc&youtube_url=https://youtu.be/x",
            "id=12abc&youtube_url=https://youtu.be/x",
            "id=99999999999999999999&youtube_url=https://youtu.be/x",
        ] {
            assert!(
                matches!(validate(q), Err(UpdateError::MissingParameters)),
                "query {q:?}"
            );
        }
    }

    #[test]
    fn test_missing_or_blank_url() {
        for q in ["id=3", "id=3&youtube_url=", "id=3&youtube_url=%20%20"] {
            assert!(
                matches!(validate(q), Err(UpdateError::MissingParameters)),
                "query {q:?}"
            );
        }
    }

    #[test]
    fn test_presence_checked_before_syntax() {
        assert!(matches!(
            validate("id=0&youtube_url=not%20a%20url"),
            Err(UpdateError::MissingParameters)
        ));
    }

    #[test]
    fn test_invalid_url_syntax() {
        for q in [
            "id=3&youtube_url=not%20a%20url",
            "id=3&youtube_url=%27%20OR%20%271%27%3D%271",
            "id=3&youtube_url=www.youtube.com/watch",
            // Embedded whitespace and control characters.
            "id=3&youtube_url=https://you%0Atube.com/watch",
            "id=3&youtube_url=https://you%09tube.com/watch",
            "id=3&youtube_url=https://a.example/x%20y",
            "id=3&youtube_url=https://a.example/x%00y",
            "id=3&youtube_url=https://a.example/x%7Fy",
            // Scheme without an authority or host.
            "id=3&youtube_url=foo:bar",
            "id=3&youtube_url=http:example.com",
            "id=3&youtube_url=https:/example.com",
            "id=3&youtube_url=x:%27%20OR%20%271%27%3D%271",
            "id=3&youtube_url=x:%27OR%271%27%3D%271",
            "id=3&youtube_url=foo://",
        ] {
            assert!(
                matches!(validate(q), Err(UpdateError::InvalidUrl(_))),
                "query {q:?}"
            );
        }
    }

    #[test]
    fn test_hostless_schemes_and_authority_urls_pass() {
        for (q, expected) in [
            ("id=3&youtube_url=mailto:media@example.org", "mailto:media@example.org"),
            ("id=3&youtube_url=news:comp.lang.rust", "news:comp.lang.rust"),
            ("id=3&youtube_url=file:///srv/media/a.mp4", "file:///srv/media/a.mp4"),
            ("id=3&youtube_url=ftp://files.example/a.mp4", "ftp://files.example/a.mp4"),
            ("id=3&youtube_url=HTTPS://youtu.be/x", "HTTPS://youtu.be/x"),
        ] {
            assert_eq!(validate(q).unwrap().youtube_url, expected, "query {q:?}");
        }
    }

    #[test]
    fn test_sql_metacharacters_inside_valid_url_pass_verbatim() {
        let req =
            validate("id=3&youtube_url=https://example.com/%3Fq%3D%27%3BDROP%2F**%2FTABLE%2F**%2Fx%3B--")
                .unwrap();
        assert_eq!(req.youtube_url, "https://example.com/?q=';DROP/**/TABLE/**/x;--");
    }
}
