use serde::Serialize;

/// One throttled progress notification.
///
/// Emitted, never persisted. Within one transfer, `downloaded` is
/// monotonically non-decreasing and `percent` (when present) strictly
/// increases in steps of at least five points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Whole percent completed, floored. Absent when the server did not
    /// report a Content-Length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,

    /// Bytes written to the destination so far.
    pub downloaded: u64,

    /// Total expected bytes, if known.
    pub total: Option<u64>,
}
