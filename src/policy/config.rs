use super::types::{CacheTtls, CapturePolicy, PosixIdMapping, ReplayPolicy};

/// Policy governs what ownership is captured and how it is replayed.
///
/// Grouped fields provide clearer ownership and ergonomics. Handlers read the
/// policy once, at construction.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub cache: CacheTtls,
    pub capture: CapturePolicy,
    pub replay: ReplayPolicy,
}

impl Policy {
    /// Construct a Policy for receivers that do **not** share a directory
    /// service with the senders.
    ///
    /// POSIX replay resolves the captured owner and group names locally and
    /// only falls back to the captured numeric ids when a name is unknown.
    ///
    /// # Example
    /// ```rust
    /// use ownsync::policy::{Policy, PosixIdMapping};
    ///
    /// let policy = Policy::by_name_preset();
    /// assert_eq!(policy.replay.posix_ids, PosixIdMapping::ByName);
    /// ```
    #[must_use]
    pub fn by_name_preset() -> Self {
        let mut p = Self::default();
        p.apply_by_name_preset();
        p
    }

    /// Mutate this Policy to apply the **by-name** preset; see `by_name_preset()`.
    pub fn apply_by_name_preset(&mut self) -> &mut Self {
        self.replay.posix_ids = PosixIdMapping::ByName;
        self
    }

    /// Disable both capture and replay; the handlers become no-ops.
    #[must_use]
    pub fn disabled() -> Self {
        let mut p = Self::default();
        p.capture.enabled = false;
        p.replay.enabled = false;
        p
    }
}
