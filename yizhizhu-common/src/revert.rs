//! Deferred Revert of Unsupported Options
//!
//! Some radio options are shown for explanation only. Picking one shows a
//! notice, and after [`REVERT_DELAY`] the selection snaps back to the
//! supported default.
//!
//! The UI owns the actual timer. This module decides whether a firing timer
//! is still allowed to act: every new selection or an explicit cancel makes
//! older tickets stale, so a late timer can never overwrite a newer choice.

use crate::form::{DevelopmentForm, Originality, PublishStatus, RightsScope};
use crate::notice::Notice;
use std::time::Duration;

/// Delay between picking an unsupported option and the automatic revert
pub const REVERT_DELAY: Duration = Duration::from_millis(1000);

/// Option sets with exactly one supported value
pub trait SupportedChoice: Copy + PartialEq {
    /// The only value the filing flow accepts
    fn supported() -> Self;

    fn is_supported(self) -> bool {
        self == Self::supported()
    }

    /// Notice shown when an unsupported value is picked
    fn unsupported_notice(self) -> Notice;
}

impl SupportedChoice for Originality {
    fn supported() -> Self {
        Originality::Original
    }

    fn unsupported_notice(self) -> Notice {
        Notice::warning(
            "Modified software not supported yet",
            "Registration of modified works needs the original registration number. \
             Switching back to \"Original\".",
        )
    }
}

impl SupportedChoice for DevelopmentForm {
    fn supported() -> Self {
        DevelopmentForm::Solo
    }

    fn unsupported_notice(self) -> Notice {
        Notice::warning(
            format!("{} not supported yet", self.label()),
            "Only independently developed software is supported. \
             Switching back to \"Independent development\".",
        )
    }
}

impl SupportedChoice for PublishStatus {
    fn supported() -> Self {
        PublishStatus::Unpublished
    }

    fn unsupported_notice(self) -> Notice {
        Notice::warning(
            "Published software not supported yet",
            "Published works need the first publication date and place. \
             Switching back to \"Unpublished\".",
        )
    }
}

impl SupportedChoice for RightsScope {
    fn supported() -> Self {
        RightsScope::AllRights
    }

    fn unsupported_notice(self) -> Notice {
        Notice::warning(
            "Partial rights not supported",
            "Only registrations covering all rights are supported.",
        )
    }
}

/// Handle for one scheduled revert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket {
    generation: u64,
}

/// Tracks the pending revert for one radio group
#[derive(Debug)]
pub struct DeferredRevert<T: SupportedChoice> {
    current: T,
    generation: u64,
    pending: Option<u64>,
}

impl<T: SupportedChoice> Default for DeferredRevert<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SupportedChoice> DeferredRevert<T> {
    pub fn new() -> Self {
        Self {
            current: T::supported(),
            generation: 0,
            pending: None,
        }
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a selection. Any earlier pending revert is cancelled.
    ///
    /// Returns the notice to show and the ticket to hand to a timer when the
    /// value is unsupported.
    pub fn select(&mut self, value: T) -> Option<(RevertTicket, Notice)> {
        self.generation += 1;
        self.current = value;

        if value.is_supported() {
            self.pending = None;
            return None;
        }

        self.pending = Some(self.generation);
        Some((
            RevertTicket {
                generation: self.generation,
            },
            value.unsupported_notice(),
        ))
    }

    /// Timer callback. Returns the value to restore, or `None` if the ticket
    /// has been superseded or cancelled.
    pub fn fire(&mut self, ticket: RevertTicket) -> Option<T> {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "stale revert ticket ignored");
            return None;
        }

        self.pending = None;
        self.current = T::supported();
        Some(self.current)
    }

    /// Drop the pending revert, e.g. when the widget goes away
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_selection_schedules_nothing() {
        let mut revert = DeferredRevert::<Originality>::new();
        assert!(revert.select(Originality::Original).is_none());
        assert!(!revert.is_pending());
    }

    #[test]
    fn test_unsupported_selection_reverts_on_fire() {
        let mut revert = DeferredRevert::<PublishStatus>::new();
        let (ticket, notice) = revert.select(PublishStatus::Published).unwrap();
        assert!(notice.title.contains("Published"));
        assert_eq!(revert.current(), PublishStatus::Published);

        assert_eq!(revert.fire(ticket), Some(PublishStatus::Unpublished));
        assert_eq!(revert.current(), PublishStatus::Unpublished);
        assert!(!revert.is_pending());

        // A second firing of the same ticket does nothing
        assert_eq!(revert.fire(ticket), None);
    }

    #[test]
    fn test_reselection_makes_old_ticket_stale() {
        let mut revert = DeferredRevert::<DevelopmentForm>::new();
        let (old, _) = revert.select(DevelopmentForm::Cooperative).unwrap();
        let (new, _) = revert.select(DevelopmentForm::Commissioned).unwrap();

        assert_eq!(revert.fire(old), None);
        assert_eq!(revert.current(), DevelopmentForm::Commissioned);
        assert_eq!(revert.fire(new), Some(DevelopmentForm::Solo));
    }

    #[test]
    fn test_user_fix_before_timer_is_not_clobbered() {
        let mut revert = DeferredRevert::<Originality>::new();
        let (ticket, _) = revert.select(Originality::Modified).unwrap();
        assert!(revert.select(Originality::Original).is_none());

        assert_eq!(revert.fire(ticket), None);
        assert_eq!(revert.current(), Originality::Original);
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut revert = DeferredRevert::<RightsScope>::new();
        let (ticket, _) = revert.select(RightsScope::PartialRights).unwrap();
        revert.cancel();
        assert_eq!(revert.fire(ticket), None);
    }
}
