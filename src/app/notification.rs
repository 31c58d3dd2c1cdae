//! Transient banner messages.
//!
//! Each [`Notifier::notify`] replaces the banner and asks the host for a
//! dismiss timer. Timers cannot be cancelled, so the notifier counts the ones
//! still outstanding and only clears the banner when the last one fires. A
//! newer banner therefore always gets its full display time.

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Current banner plus the dismiss timers still pending for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    current: Option<Notification>,
    pending_dismissals: usize,
}

impl Notifier {
    /// Shows `message`, replacing any current banner.
    ///
    /// The caller must schedule one dismiss timer per call.
    ///
    /// # Parameters
    ///
    /// * `kind` - Success or error, which picks color and icon
    /// * `message` - Text shown to the user
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::info!(message = %message, "notification"),
            NotificationKind::Error => tracing::error!(message = %message, "notification"),
        }
        self.current = Some(Notification { kind, message });
        self.pending_dismissals += 1;
    }

    /// Records a fired dismiss timer. Returns whether the banner was cleared.
    pub fn timer_elapsed(&mut self) -> bool {
        self.pending_dismissals = self.pending_dismissals.saturating_sub(1);
        if self.pending_dismissals == 0 && self.current.is_some() {
            self.current = None;
            return true;
        }
        false
    }

    /// Hides the banner immediately. Outstanding timers become no-ops.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// The banner currently shown, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_timer_clears() {
        let mut notifier = Notifier::default();
        notifier.notify(NotificationKind::Success, "ok");
        assert!(notifier.timer_elapsed());
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_newer_banner_survives_older_timer() {
        let mut notifier = Notifier::default();
        notifier.notify(NotificationKind::Success, "first");
        notifier.notify(NotificationKind::Error, "second");

        assert!(!notifier.timer_elapsed());
        assert_eq!(notifier.current().map(|n| n.message.as_str()), Some("second"));

        assert!(notifier.timer_elapsed());
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_dismiss_then_stale_timer() {
        let mut notifier = Notifier::default();
        notifier.notify(NotificationKind::Error, "boom");
        assert!(notifier.dismiss());
        assert!(!notifier.timer_elapsed());
        assert!(!notifier.timer_elapsed());
    }
}
