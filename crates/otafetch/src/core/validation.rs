use crate::data::MIN_ARTIFACT_LEN;

/// Whether a completed download is plausibly a real artifact.
///
/// An HTTP 200 with a tiny body is almost always an error page or an
/// interstitial, not the artifact; such output must not be reported as
/// success.
pub fn artifact_large_enough(len: u64) -> bool {
    len >= MIN_ARTIFACT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_tiny_files() {
        assert!(!artifact_large_enough(0));
        assert!(!artifact_large_enough(1));
        assert!(!artifact_large_enough(MIN_ARTIFACT_LEN - 1));
    }

    #[test]
    fn accepts_threshold_and_above() {
        assert!(artifact_large_enough(MIN_ARTIFACT_LEN));
        assert!(artifact_large_enough(MIN_ARTIFACT_LEN + 1));
        assert!(artifact_large_enough(u64::MAX));
    }
}
