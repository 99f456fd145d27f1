/// Minimum percent advance between two emitted progress events.
const REPORT_STEP: u32 = 5;

/// Integer percent completed, floored, capped at 100.
///
/// # Examples
///
/// ```
/// use otafetch::percent;
///
/// assert_eq!(percent(700, 2000), 35);
/// assert_eq!(percent(1999, 2000), 99);
/// assert_eq!(percent(2000, 2000), 100);
/// ```
pub fn percent(downloaded: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    // Widen before multiplying; downloaded * 100 can overflow u64.
    let pct = (downloaded as u128 * 100) / total as u128;
    pct.min(100) as u32
}

/// Throttles percent reporting to buckets of at least [`REPORT_STEP`]
/// points.
///
/// The gate guarantees the reported percent strictly increases and never
/// advances by less than a full step, bounding event volume to roughly
/// twenty emissions per transfer regardless of chunk granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressGate {
    last_reported: u32,
}

impl ProgressGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current counters.
    ///
    /// Yields the new percent only when it has advanced at least a full
    /// step past the last reported value. With an unknown total, nothing
    /// is ever yielded.
    pub fn update(&mut self, downloaded: u64, total: Option<u64>) -> Option<u32> {
        let total = total.filter(|t| *t > 0)?;
        let pct = percent(downloaded, total);
        if pct >= self.last_reported + REPORT_STEP {
            self.last_reported = pct;
            Some(pct)
        } else {
            None
        }
    }

    /// The last percent handed out, 0 if none yet.
    pub fn last_reported(&self) -> u32 {
        self.last_reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_floors() {
        assert_eq!(percent(0, 2000), 0);
        assert_eq!(percent(99, 2000), 4);
        assert_eq!(percent(100, 2000), 5);
        assert_eq!(percent(1, 3), 33);
    }

    #[test]
    fn percent_handles_huge_byte_counts() {
        let total = u64::MAX;
        assert_eq!(percent(total, total), 100);
        assert_eq!(percent(total / 2, total), 49);
    }

    #[test]
    fn percent_caps_at_one_hundred() {
        // Servers sometimes under-report Content-Length.
        assert_eq!(percent(3000, 2000), 100);
    }

    #[test]
    fn gate_waits_for_first_full_step() {
        let mut gate = ProgressGate::new();
        assert_eq!(gate.update(40, Some(1000)), None); // 4%
        assert_eq!(gate.update(50, Some(1000)), Some(5));
        assert_eq!(gate.last_reported(), 5);
    }

    #[test]
    fn gate_never_repeats_or_regresses() {
        let mut gate = ProgressGate::new();
        assert_eq!(gate.update(50, Some(1000)), Some(5));
        assert_eq!(gate.update(50, Some(1000)), None);
        assert_eq!(gate.update(60, Some(1000)), None); // 6%, delta < 5
        assert_eq!(gate.update(100, Some(1000)), Some(10));
    }

    #[test]
    fn gate_emits_at_most_twenty_buckets() {
        let mut gate = ProgressGate::new();
        let total = 100_000u64;
        let mut emitted = Vec::new();
        for downloaded in (0..=total).step_by(16) {
            if let Some(pct) = gate.update(downloaded, Some(total)) {
                emitted.push(pct);
            }
        }
        assert!(emitted.len() <= 20, "emitted {} events", emitted.len());
        for pair in emitted.windows(2) {
            assert!(pair[1] >= pair[0] + REPORT_STEP);
        }
        assert_eq!(*emitted.last().unwrap(), 100);
    }

    #[test]
    fn gate_can_skip_buckets_on_large_chunks() {
        let mut gate = ProgressGate::new();
        assert_eq!(gate.update(970, Some(1000)), Some(97));
        assert_eq!(gate.update(1000, Some(1000)), None); // 100 - 97 < 5
    }

    #[test]
    fn unknown_or_zero_total_yields_nothing() {
        let mut gate = ProgressGate::new();
        assert_eq!(gate.update(5000, None), None);
        assert_eq!(gate.update(5000, Some(0)), None);
        assert_eq!(gate.last_reported(), 0);
    }
}
