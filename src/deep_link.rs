//! Verification code extraction from deep links.
//!
//! After the player sends the registration SMS, the verification service
//! reopens the app through a deep link such as
//! `mygame://sms-verify?code=tb_verify_...`. The code travels in the `code`
//! query parameter.

use crate::types::VerificationCode;
use url::{Url, form_urlencoded};

/// Query parameter carrying the verification code.
pub const CODE_PARAM: &str = "code";

/// Extract the verification code from a deep link URL.
///
/// Returns `None` when the URL is absent, has no query, has no `code`
/// parameter, or the parameter is blank. The first `code` pair wins and
/// percent-encoding is decoded. Non-blank values are returned verbatim.
///
/// # Example
///
/// ```rust
/// use sms_verify_sdk::deep_link::extract_code;
///
/// let code = extract_code(Some("mygame://auth?code=ABC&x=1")).unwrap();
/// assert_eq!(code.as_str(), "ABC");
///
/// assert!(extract_code(Some("mygame://auth?other=1")).is_none());
/// assert!(extract_code(None).is_none());
/// ```
pub fn extract_code(url: Option<&str>) -> Option<VerificationCode> {
    let url = url?.trim();
    if url.is_empty() {
        return None;
    }

    let query = query_of(url)?;

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == CODE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
        .map(VerificationCode::from)
}

/// Query component of `url`. Strings that are not absolute URLs fall back to
/// everything between the first `?` and an optional `#`.
fn query_of(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed.query().map(str::to_string),
        Err(_) => {
            let (_, rest) = url.split_once('?')?;
            let query = rest.split('#').next().unwrap_or_default();
            Some(query.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code_present() {
        let code = extract_code(Some("scheme://auth?code=ABC")).unwrap();
        assert_eq!(code.as_str(), "ABC");
    }

    #[test]
    fn test_extract_code_among_other_params() {
        let code = extract_code(Some("scheme://auth?state=x&code=tb_verify_123&y=2")).unwrap();
        assert_eq!(code.as_str(), "tb_verify_123");
    }

    #[test]
    fn test_extract_code_missing() {
        assert!(extract_code(Some("scheme://auth?other=1")).is_none());
        assert!(extract_code(Some("scheme://auth")).is_none());
    }

    #[test]
    fn test_extract_code_blank_collapses_to_none() {
        assert!(extract_code(Some("scheme://auth?code=")).is_none());
        assert!(extract_code(Some("scheme://auth?code=%20%20")).is_none());
    }

    #[test]
    fn test_extract_code_absent_or_empty_url() {
        assert!(extract_code(None).is_none());
        assert!(extract_code(Some("")).is_none());
        assert!(extract_code(Some("   ")).is_none());
    }

    #[test]
    fn test_extract_code_decodes_percent_encoding() {
        let code = extract_code(Some("scheme://auth?code=A%2BB%3D")).unwrap();
        assert_eq!(code.as_str(), "A+B=");
    }

    #[test]
    fn test_extract_code_keeps_surrounding_whitespace() {
        let code = extract_code(Some("scheme://auth?code=%20ABC%20")).unwrap();
        assert_eq!(code.as_str(), " ABC ");
    }

    #[test]
    fn test_extract_code_first_pair_wins() {
        let code = extract_code(Some("scheme://auth?code=first&code=second")).unwrap();
        assert_eq!(code.as_str(), "first");
    }

    #[test]
    fn test_extract_code_from_relative_link() {
        let code = extract_code(Some("auth/callback?code=XYZ#frag")).unwrap();
        assert_eq!(code.as_str(), "XYZ");
    }

    #[test]
    fn test_extract_code_ignores_fragment() {
        let code = extract_code(Some("scheme://auth?code=ABC#code=DEF")).unwrap();
        assert_eq!(code.as_str(), "ABC");
    }
}
