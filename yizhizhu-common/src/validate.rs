//! Per-step validation predicates
//!
//! A predicate inspects the form when the user presses "Next" and either lets
//! the wizard proceed or holds it on the current step with a notice. Some
//! predicates also correct the form in place before holding.

use crate::form::{
    DevelopmentForm, FormField, Originality, PublishStatus, RegistrationForm, RightsScope,
};
use crate::notice::Notice;
use chrono::NaiveDate;

/// Version written into an empty version field
pub const DEFAULT_VERSION: &str = "V1.0";

/// Result of running a step predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Data is acceptable, move on
    Proceed,

    /// Stay on this step
    Hold {
        notice: Notice,
        /// Field that should receive keyboard focus
        focus: Option<FormField>,
    },
}

impl Verdict {
    fn hold(notice: Notice, focus: FormField) -> Self {
        Verdict::Hold {
            notice,
            focus: Some(focus),
        }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, Verdict::Proceed)
    }
}

/// "Application Info" predicate
///
/// An over-long abbreviation is only a warning: it holds the wizard once,
/// and pressing "Next" again with the same names proceeds.
pub fn application_info(form: &mut RegistrationForm) -> Verdict {
    let info = &mut form.app_info;
    let full_name = info.full_name.trim().to_string();
    let abbreviation = info.abbreviation.trim().to_string();

    if full_name.is_empty() {
        return Verdict::hold(
            Notice::error("Software name required", "Enter the full name of the software."),
            FormField::FullName,
        );
    }

    if abbreviation.chars().count() > full_name.chars().count() {
        let pair = (full_name.clone(), abbreviation.clone());
        if info.acknowledged_abbreviation.as_ref() != Some(&pair) {
            info.acknowledged_abbreviation = Some(pair);
            return Verdict::hold(
                Notice::warning(
                    "Abbreviation longer than full name",
                    "The abbreviation may be truncated on the certificate. \
                     Press Next again to keep it.",
                ),
                FormField::Abbreviation,
            );
        }
    }

    if info.version.trim().is_empty() {
        info.version = DEFAULT_VERSION.to_string();
        return Verdict::hold(
            Notice::info(
                "Version filled in",
                format!("No version given, using {}. Press Next to continue.", DEFAULT_VERSION),
            ),
            FormField::Version,
        );
    }

    if info.rights_scope != RightsScope::AllRights {
        return Verdict::hold(
            Notice::error(
                "Rights scope not supported",
                "Only registrations covering all rights are supported.",
            ),
            FormField::RightsScope,
        );
    }

    Verdict::Proceed
}

/// "Development Info" predicate, checked against `today`
pub fn development_info(form: &mut RegistrationForm, today: NaiveDate) -> Verdict {
    let info = &form.dev_info;

    if info.category.is_none() {
        return Verdict::hold(
            Notice::error("Category required", "Choose the software category."),
            FormField::Category,
        );
    }

    if info.originality != Originality::Original {
        return Verdict::hold(
            Notice::error(
                "Originality not supported",
                "Only original software can be registered here.",
            ),
            FormField::Originality,
        );
    }

    if info.development_form != DevelopmentForm::Solo {
        return Verdict::hold(
            Notice::error(
                "Development form not supported",
                "Only independently developed software is supported.",
            ),
            FormField::DevelopmentForm,
        );
    }

    match info.completion_date {
        None => {
            return Verdict::hold(
                Notice::error("Completion date required", "Select the date development finished."),
                FormField::CompletionDate,
            );
        }
        Some(date) if date > today => {
            return Verdict::hold(
                Notice::error(
                    "Completion date in the future",
                    format!("{} is after today.", date.format("%Y-%m-%d")),
                ),
                FormField::CompletionDate,
            );
        }
        Some(_) => {}
    }

    if info.publish_status != PublishStatus::Unpublished {
        return Verdict::hold(
            Notice::error(
                "Publish status not supported",
                "Only unpublished software is supported.",
            ),
            FormField::PublishStatus,
        );
    }

    Verdict::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SoftwareCategory;
    use crate::notice::Severity;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn valid_dev_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.dev_info.category = Some(SoftwareCategory::Application);
        form.dev_info.completion_date = NaiveDate::from_ymd_opt(2025, 5, 20);
        form
    }

    fn severity_of(verdict: &Verdict) -> Option<Severity> {
        match verdict {
            Verdict::Hold { notice, .. } => Some(notice.severity),
            Verdict::Proceed => None,
        }
    }

    #[test]
    fn test_empty_full_name_is_error() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "   ".to_string();
        let verdict = application_info(&mut form);
        assert_eq!(severity_of(&verdict), Some(Severity::Error));
        assert!(matches!(
            verdict,
            Verdict::Hold { focus: Some(FormField::FullName), .. }
        ));
    }

    #[test]
    fn test_empty_version_is_filled_and_held() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "Demo".to_string();

        let verdict = application_info(&mut form);
        assert_eq!(severity_of(&verdict), Some(Severity::Info));
        assert_eq!(form.app_info.version, DEFAULT_VERSION);

        assert_eq!(application_info(&mut form), Verdict::Proceed);
    }

    #[test]
    fn test_long_abbreviation_warns_once() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "Demo".to_string();
        form.app_info.abbreviation = "DemoSuite".to_string();
        form.app_info.version = "V2.0".to_string();

        let first = application_info(&mut form);
        assert_eq!(severity_of(&first), Some(Severity::Warning));
        assert_eq!(application_info(&mut form), Verdict::Proceed);
    }

    #[test]
    fn test_changed_abbreviation_warns_again() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "Demo".to_string();
        form.app_info.abbreviation = "DemoSuite".to_string();
        form.app_info.version = "V2.0".to_string();

        let _ = application_info(&mut form);
        form.app_info.abbreviation = "DemoSuitePro".to_string();
        assert_eq!(severity_of(&application_info(&mut form)), Some(Severity::Warning));
    }

    #[test]
    fn test_abbreviation_length_counts_characters() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "易智著软件".to_string();
        form.app_info.abbreviation = "易智著".to_string();
        form.app_info.version = "V1.0".to_string();
        assert_eq!(application_info(&mut form), Verdict::Proceed);
    }

    #[test]
    fn test_partial_rights_rejected() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "Demo".to_string();
        form.app_info.version = "V1.0".to_string();
        form.app_info.rights_scope = RightsScope::PartialRights;
        assert!(matches!(
            application_info(&mut form),
            Verdict::Hold { focus: Some(FormField::RightsScope), .. }
        ));
    }

    #[test]
    fn test_dev_info_requires_category() {
        let mut form = valid_dev_form();
        form.dev_info.category = None;
        assert!(matches!(
            development_info(&mut form, today()),
            Verdict::Hold { focus: Some(FormField::Category), .. }
        ));
    }

    #[test]
    fn test_dev_info_rejects_unsupported_options() {
        let mut form = valid_dev_form();
        form.dev_info.originality = Originality::Modified;
        assert!(!development_info(&mut form, today()).is_proceed());

        let mut form = valid_dev_form();
        form.dev_info.development_form = DevelopmentForm::Cooperative;
        assert!(!development_info(&mut form, today()).is_proceed());

        let mut form = valid_dev_form();
        form.dev_info.publish_status = PublishStatus::Published;
        assert!(!development_info(&mut form, today()).is_proceed());
    }

    #[test]
    fn test_dev_info_completion_date() {
        let mut form = valid_dev_form();
        form.dev_info.completion_date = None;
        assert!(matches!(
            development_info(&mut form, today()),
            Verdict::Hold { focus: Some(FormField::CompletionDate), .. }
        ));

        form.dev_info.completion_date = NaiveDate::from_ymd_opt(2025, 6, 2);
        assert!(!development_info(&mut form, today()).is_proceed());

        form.dev_info.completion_date = Some(today());
        assert!(development_info(&mut form, today()).is_proceed());
    }
}
