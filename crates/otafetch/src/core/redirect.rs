/// Returns `true` if the HTTP status code is a redirect the engine chases.
///
/// # Recognized Redirect Codes
///
/// - 301: Moved Permanently
/// - 302: Found
/// - 303: See Other
/// - 307: Temporary Redirect
///
/// 308 is deliberately not in the set; it falls through to the final
/// status check and surfaces as an HTTP error.
///
/// # Examples
///
/// ```
/// use otafetch::is_redirect;
///
/// assert!(is_redirect(302));
/// assert!(!is_redirect(200));
/// assert!(!is_redirect(404));
/// ```
pub fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chased_redirect_codes() {
        assert!(is_redirect(301)); // Moved Permanently
        assert!(is_redirect(302)); // Found
        assert!(is_redirect(303)); // See Other
        assert!(is_redirect(307)); // Temporary Redirect
    }

    #[test]
    fn success_codes_are_not_redirects() {
        assert!(!is_redirect(200));
        assert!(!is_redirect(201));
        assert!(!is_redirect(204));
        assert!(!is_redirect(206));
    }

    #[test]
    fn other_3xx_codes_are_not_chased() {
        assert!(!is_redirect(300)); // Multiple Choices
        assert!(!is_redirect(304)); // Not Modified
        assert!(!is_redirect(305)); // Use Proxy (deprecated)
        assert!(!is_redirect(308)); // Permanent Redirect
    }

    #[test]
    fn error_codes_are_not_redirects() {
        assert!(!is_redirect(400));
        assert!(!is_redirect(404));
        assert!(!is_redirect(429));
        assert!(!is_redirect(500));
        assert!(!is_redirect(503));
    }

    #[test]
    fn out_of_range_codes_are_not_redirects() {
        assert!(!is_redirect(0));
        assert!(!is_redirect(99));
        assert!(!is_redirect(600));
    }
}
