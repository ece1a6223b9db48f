//! Helpers shared by the reqwest adapters.

use reqwest::StatusCode;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Whitespace-compacted, truncated view of a response body for error messages.
pub(super) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `status 404` or `status 404: <preview>`.
pub(super) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

/// Statuses that mean the upstream gave up waiting.
pub(super) const fn is_timeout_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn preview_compacts_whitespace() {
        assert_eq!(body_preview(b"  bad \n\t request  "), "bad request");
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), PREVIEW_CHAR_LIMIT + 3);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    #[case(b"".as_slice(), "status 502")]
    #[case(b"upstream down".as_slice(), "status 502: upstream down")]
    fn status_message_includes_preview_when_present(#[case] body: &[u8], #[case] expected: &str) {
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, body), expected);
    }
}
