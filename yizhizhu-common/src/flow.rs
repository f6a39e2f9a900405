//! Registration Flow
//!
//! The fixed list of wizard steps for a software-copyright filing.

use crate::form::RegistrationForm;
use crate::validate::{self, Verdict};
use crate::wizard::{Step, WizardController, WizardError};

pub const IDENTITY: &str = "identity";
pub const APP_INFO: &str = "app_info";
pub const DEV_INFO: &str = "dev_info";
pub const FEATURES: &str = "features";
pub const CONFIRM: &str = "confirm";
pub const COMPLETE: &str = "complete";

/// Step keys in wizard order
pub const STEP_KEYS: [&str; 6] = [IDENTITY, APP_INFO, DEV_INFO, FEATURES, CONFIRM, COMPLETE];

fn development_info_today(form: &mut RegistrationForm) -> Verdict {
    validate::development_info(form, chrono::Local::now().date_naive())
}

/// Steps of the registration wizard
pub fn registration_steps() -> Vec<Step<RegistrationForm>> {
    vec![
        // Advanced by clicking an identity card, no "Next" button
        Step::new(IDENTITY, "Identity"),
        Step::new(APP_INFO, "Application info").with_validator(validate::application_info),
        Step::new(DEV_INFO, "Development info").with_validator(development_info_today),
        Step::new(FEATURES, "Features & materials"),
        Step::new(CONFIRM, "Confirm"),
        Step::new(COMPLETE, "Complete").terminal(),
    ]
}

pub fn registration_wizard() -> Result<WizardController<RegistrationForm>, WizardError> {
    WizardController::new(registration_steps())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Identity;
    use crate::notice::Severity;
    use crate::validate::DEFAULT_VERSION;
    use crate::wizard::NavOutcome;

    #[test]
    fn test_step_order_matches_keys() {
        let wizard = registration_wizard().unwrap();
        let keys: Vec<_> = wizard.steps().iter().map(|s| s.key()).collect();
        assert_eq!(keys, STEP_KEYS);
    }

    #[test]
    fn test_identity_card_then_version_autofill() {
        let mut wizard = registration_wizard().unwrap();
        let mut form = RegistrationForm::new();

        // Clicking the applicant card
        form.identity = Some(Identity::Applicant);
        assert!(wizard.advance().moved());
        assert_eq!(wizard.current_key(), APP_INFO);
        assert_eq!(wizard.unlocked(), &[IDENTITY, APP_INFO]);

        form.app_info.full_name = "Demo".to_string();
        match wizard.request_advance(&mut form) {
            NavOutcome::Held { notice, .. } => assert_eq!(notice.severity, Severity::Info),
            other => panic!("expected hold, got {:?}", other),
        }
        assert_eq!(wizard.current_index(), 1);
        assert_eq!(form.app_info.version, DEFAULT_VERSION);

        assert!(wizard.request_advance(&mut form).moved());
        assert_eq!(wizard.current_index(), 2);
    }

    #[test]
    fn test_empty_name_blocks_app_info() {
        let mut wizard = registration_wizard().unwrap();
        let mut form = RegistrationForm::new();
        wizard.advance();

        assert!(matches!(
            wizard.request_advance(&mut form),
            NavOutcome::Held { .. }
        ));
        assert_eq!(wizard.current_key(), APP_INFO);
    }

    #[test]
    fn test_features_and_confirm_advance_unconditionally() {
        let mut wizard = registration_wizard().unwrap();
        let mut form = RegistrationForm::new();
        wizard.advance();
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.current_key(), FEATURES);

        assert!(wizard.request_advance(&mut form).moved());
        assert!(wizard.request_advance(&mut form).moved());
        assert_eq!(wizard.current_key(), COMPLETE);
        assert!(!wizard.has_forward_control());
    }
}
