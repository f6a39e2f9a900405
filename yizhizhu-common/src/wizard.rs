//! Wizard Controller
//!
//! Sequences the user through an ordered list of steps and keeps the
//! breadcrumb trail ("unlocked" steps) in sync with the current position.
//!
//! The controller never touches widgets. Every operation returns a
//! [`NavOutcome`] and the view re-renders its trail and page stack from
//! [`WizardController::unlocked`] and [`WizardController::current_index`].

use crate::form::FormField;
use crate::notice::Notice;
use crate::validate::Verdict;
use thiserror::Error;

/// Predicate run by [`WizardController::request_advance`]
pub type Validator<F> = fn(&mut F) -> Verdict;

/// One page of the wizard
pub struct Step<F> {
    key: &'static str,
    label: String,
    validator: Option<Validator<F>>,
    terminal: bool,
}

impl<F> Step<F> {
    /// A step that always lets the user continue
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            validator: None,
            terminal: false,
        }
    }

    pub fn with_validator(mut self, validator: Validator<F>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Mark as the last step. Terminal steps have no forward control.
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl<F> std::fmt::Debug for Step<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("validated", &self.validator.is_some())
            .field("terminal", &self.terminal)
            .finish()
    }
}

/// Invalid step lists rejected at construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,

    #[error("step key `{0}` is used more than once")]
    DuplicateKey(&'static str),

    #[error("only the last step may be terminal, but `{0}` is not last")]
    EarlyTerminal(&'static str),

    #[error("the last step `{0}` must be terminal")]
    MissingTerminal(&'static str),
}

/// What a navigation call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The current step changed
    Moved { from: usize, to: usize },

    /// The current step stayed the same. A jump to the current step may
    /// still have shortened the trail.
    Unchanged,

    /// Validation kept the wizard on the current step
    Held {
        notice: Notice,
        focus: Option<FormField>,
    },
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

/// Page/breadcrumb state machine over a fixed list of steps
#[derive(Debug)]
pub struct WizardController<F> {
    steps: Vec<Step<F>>,
    index: usize,
    /// Keys reachable from the trail, always a prefix of `steps` in order
    unlocked: Vec<&'static str>,
}

impl<F> WizardController<F> {
    pub fn new(steps: Vec<Step<F>>) -> Result<Self, WizardError> {
        let last = steps.len().checked_sub(1).ok_or(WizardError::NoSteps)?;

        for (i, step) in steps.iter().enumerate() {
            if steps[..i].iter().any(|s| s.key == step.key) {
                return Err(WizardError::DuplicateKey(step.key));
            }
            if step.terminal && i != last {
                return Err(WizardError::EarlyTerminal(step.key));
            }
        }
        if !steps[last].terminal {
            return Err(WizardError::MissingTerminal(steps[last].key));
        }

        let unlocked = vec![steps[0].key];
        Ok(Self {
            steps,
            index: 0,
            unlocked,
        })
    }

    pub fn steps(&self) -> &[Step<F>] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> &Step<F> {
        &self.steps[self.index]
    }

    pub fn current_key(&self) -> &'static str {
        self.steps[self.index].key
    }

    /// Steps the user can jump back to, in order
    pub fn unlocked(&self) -> &[&'static str] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.unlocked.iter().any(|k| *k == key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.key == key)
    }

    pub fn label_of(&self, key: &str) -> Option<&str> {
        self.steps.iter().find(|s| s.key == key).map(|s| s.label.as_str())
    }

    /// Whether the current page shows a "Next" control
    pub fn has_forward_control(&self) -> bool {
        !self.current_step().terminal
    }

    /// Whether the current page shows a "Back" control
    pub fn has_back_control(&self) -> bool {
        self.index > 0 && !self.current_step().terminal
    }

    /// Move one step forward without validation
    pub fn advance(&mut self) -> NavOutcome {
        if self.current_step().terminal {
            tracing::debug!(step = self.current_key(), "advance ignored at terminal step");
            return NavOutcome::Unchanged;
        }

        let from = self.index;
        self.index += 1;
        let key = self.steps[self.index].key;
        if !self.is_unlocked(key) {
            self.unlocked.push(key);
        }

        tracing::debug!(from, to = self.index, step = key, "wizard advanced");
        NavOutcome::Moved { from, to: self.index }
    }

    /// Move one step back. The unlocked trail is left as it is.
    pub fn retreat(&mut self) -> NavOutcome {
        if self.index == 0 {
            return NavOutcome::Unchanged;
        }

        let from = self.index;
        self.index -= 1;
        tracing::debug!(from, to = self.index, "wizard retreated");
        NavOutcome::Moved { from, to: self.index }
    }

    /// Jump to an unlocked step and drop every trail entry after it
    pub fn jump_to(&mut self, key: &str) -> NavOutcome {
        let Some(pos) = self.unlocked.iter().position(|k| *k == key) else {
            tracing::debug!(step = key, "jump to locked step ignored");
            return NavOutcome::Unchanged;
        };
        let Some(target) = self.index_of(key) else {
            return NavOutcome::Unchanged;
        };

        self.unlocked.truncate(pos + 1);
        let from = self.index;
        self.index = target;

        if from == target {
            NavOutcome::Unchanged
        } else {
            tracing::debug!(from, to = target, "wizard jumped");
            NavOutcome::Moved { from, to: target }
        }
    }

    /// "Next" button: validate the current step, then advance
    pub fn request_advance(&mut self, form: &mut F) -> NavOutcome {
        if self.current_step().terminal {
            return NavOutcome::Unchanged;
        }

        let verdict = match self.current_step().validator {
            Some(validator) => validator(form),
            None => Verdict::Proceed,
        };

        match verdict {
            Verdict::Proceed => self.advance(),
            Verdict::Hold { notice, focus } => {
                tracing::info!(step = self.current_key(), "{}", notice.to_line());
                NavOutcome::Held { notice, focus }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Draft {
        ok: bool,
        checks: u32,
    }

    fn check_ok(draft: &mut Draft) -> Verdict {
        draft.checks += 1;
        if draft.ok {
            Verdict::Proceed
        } else {
            Verdict::Hold {
                notice: Notice::error("Not ready", ""),
                focus: None,
            }
        }
    }

    fn wizard() -> WizardController<Draft> {
        WizardController::new(vec![
            Step::new("a", "A"),
            Step::new("b", "B").with_validator(check_ok),
            Step::new("c", "C"),
            Step::new("d", "D").terminal(),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let w = wizard();
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.unlocked(), &["a"]);
        assert!(w.has_forward_control());
        assert!(!w.has_back_control());
    }

    #[test]
    fn test_rejects_bad_step_lists() {
        assert_eq!(
            WizardController::<Draft>::new(vec![]).unwrap_err(),
            WizardError::NoSteps
        );
        assert_eq!(
            WizardController::<Draft>::new(vec![
                Step::new("a", "A"),
                Step::new("a", "Again").terminal()
            ])
            .unwrap_err(),
            WizardError::DuplicateKey("a")
        );
        assert_eq!(
            WizardController::<Draft>::new(vec![Step::new("a", "A").terminal(), Step::new("b", "B")])
                .unwrap_err(),
            WizardError::EarlyTerminal("a")
        );
        assert_eq!(
            WizardController::<Draft>::new(vec![Step::new("a", "A")]).unwrap_err(),
            WizardError::MissingTerminal("a")
        );
    }

    #[test]
    fn test_advance_unlocks_prefix_without_gaps() {
        let mut w = wizard();
        for expected in 1..4 {
            assert!(w.advance().moved());
            assert_eq!(w.current_index(), expected);
            let prefix: Vec<_> = w.steps()[..=expected].iter().map(|s| s.key()).collect();
            assert_eq!(w.unlocked(), prefix.as_slice());
        }
    }

    #[test]
    fn test_advance_at_terminal_is_noop() {
        let mut w = wizard();
        w.advance();
        w.advance();
        w.advance();
        assert!(!w.has_forward_control());
        assert_eq!(w.advance(), NavOutcome::Unchanged);
        assert_eq!(w.current_index(), 3);

        let mut draft = Draft::default();
        assert_eq!(w.request_advance(&mut draft), NavOutcome::Unchanged);
    }

    #[test]
    fn test_retreat_keeps_unlocked() {
        let mut w = wizard();
        assert_eq!(w.retreat(), NavOutcome::Unchanged);
        w.advance();
        w.advance();
        assert_eq!(w.retreat(), NavOutcome::Moved { from: 2, to: 1 });
        assert_eq!(w.unlocked(), &["a", "b", "c"]);

        // Advancing over an already unlocked step does not duplicate it
        w.advance();
        assert_eq!(w.unlocked(), &["a", "b", "c"]);
    }

    #[test]
    fn test_jump_to_locked_step_is_noop() {
        let mut w = wizard();
        w.advance();
        assert_eq!(w.jump_to("c"), NavOutcome::Unchanged);
        assert_eq!(w.jump_to("missing"), NavOutcome::Unchanged);
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.unlocked(), &["a", "b"]);
    }

    #[test]
    fn test_jump_to_truncates_and_advance_readds() {
        let mut w = wizard();
        w.advance();
        w.advance();
        w.advance();

        assert_eq!(w.jump_to("b"), NavOutcome::Moved { from: 3, to: 1 });
        assert_eq!(w.unlocked(), &["a", "b"]);

        w.advance();
        assert_eq!(w.current_key(), "c");
        assert_eq!(w.unlocked(), &["a", "b", "c"]);
    }

    #[test]
    fn test_jump_to_current_step_truncates_only() {
        let mut w = wizard();
        w.advance();
        w.advance();
        w.retreat();
        assert_eq!(w.jump_to("b"), NavOutcome::Unchanged);
        assert_eq!(w.unlocked(), &["a", "b"]);
    }

    #[test]
    fn test_request_advance_runs_validator() {
        let mut w = wizard();
        let mut draft = Draft::default();

        // Step without predicate
        assert!(w.request_advance(&mut draft).moved());
        assert_eq!(draft.checks, 0);

        assert!(matches!(w.request_advance(&mut draft), NavOutcome::Held { .. }));
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.unlocked(), &["a", "b"]);

        draft.ok = true;
        assert!(w.request_advance(&mut draft).moved());
        assert_eq!(draft.checks, 2);
        assert_eq!(w.current_key(), "c");
    }
}
