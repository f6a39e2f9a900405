//! Registration Form State
//!
//! Holds everything the user enters while walking through the wizard.
//! The form lives as long as the wizard view and is never persisted.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Who is filing the registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// The copyright owner files in person
    Applicant,
    /// An agent files on behalf of the owner
    Agent,
}

impl Identity {
    pub const ALL: [Identity; 2] = [Identity::Applicant, Identity::Agent];

    pub fn label(self) -> &'static str {
        match self {
            Identity::Applicant => "Applicant",
            Identity::Agent => "Agent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Identity::Applicant => "I own the copyright and file the application myself",
            Identity::Agent => "I file on behalf of the copyright owner",
        }
    }
}

/// Scope of the rights being registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RightsScope {
    #[default]
    AllRights,
    PartialRights,
}

impl RightsScope {
    pub fn label(self) -> &'static str {
        match self {
            RightsScope::AllRights => "All rights",
            RightsScope::PartialRights => "Partial rights",
        }
    }
}

/// Software categories accepted by the registration office
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftwareCategory {
    Application,
    Embedded,
    Middleware,
    OperatingSystem,
}

impl SoftwareCategory {
    pub const ALL: [SoftwareCategory; 4] = [
        SoftwareCategory::Application,
        SoftwareCategory::Embedded,
        SoftwareCategory::Middleware,
        SoftwareCategory::OperatingSystem,
    ];

    /// Text of the "nothing chosen yet" entry in category pickers
    pub const PLACEHOLDER: &'static str = "Select a category";

    pub fn label(self) -> &'static str {
        match self {
            SoftwareCategory::Application => "Application software",
            SoftwareCategory::Embedded => "Embedded software",
            SoftwareCategory::Middleware => "Middleware",
            SoftwareCategory::OperatingSystem => "Operating system",
        }
    }

    /// Map a picker position to a category. Position 0 is the placeholder.
    pub fn from_picker_index(index: u32) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
    }
}

/// Whether the software is an original work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Originality {
    #[default]
    Original,
    Modified,
}

impl Originality {
    pub const ALL: [Originality; 2] = [Originality::Original, Originality::Modified];

    pub fn label(self) -> &'static str {
        match self {
            Originality::Original => "Original",
            Originality::Modified => "Modified",
        }
    }
}

/// How the software was developed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevelopmentForm {
    #[default]
    Solo,
    Cooperative,
    Commissioned,
    Assigned,
}

impl DevelopmentForm {
    pub const ALL: [DevelopmentForm; 4] = [
        DevelopmentForm::Solo,
        DevelopmentForm::Cooperative,
        DevelopmentForm::Commissioned,
        DevelopmentForm::Assigned,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DevelopmentForm::Solo => "Independent development",
            DevelopmentForm::Cooperative => "Cooperative development",
            DevelopmentForm::Commissioned => "Commissioned development",
            DevelopmentForm::Assigned => "Assigned by task",
        }
    }
}

/// Publication status at filing time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishStatus {
    #[default]
    Unpublished,
    Published,
}

impl PublishStatus {
    pub const ALL: [PublishStatus; 2] = [PublishStatus::Unpublished, PublishStatus::Published];

    pub fn label(self) -> &'static str {
        match self {
            PublishStatus::Unpublished => "Unpublished",
            PublishStatus::Published => "Published",
        }
    }
}

/// Form fields that validation can send the focus back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Abbreviation,
    Version,
    RightsScope,
    Category,
    Originality,
    DevelopmentForm,
    CompletionDate,
    PublishStatus,
}

/// "Application Info" step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfo {
    /// Full software name as it will appear on the certificate
    pub full_name: String,

    /// Short name (optional)
    pub abbreviation: String,

    /// Version string, e.g. "V1.0"
    pub version: String,

    pub rights_scope: RightsScope,

    /// (full name, abbreviation) pair the user already confirmed despite
    /// the length warning
    pub(crate) acknowledged_abbreviation: Option<(String, String)>,
}

/// "Development Info" step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevInfo {
    /// `None` while the placeholder entry is selected
    pub category: Option<SoftwareCategory>,
    pub originality: Originality,
    pub development_form: DevelopmentForm,
    pub completion_date: Option<NaiveDate>,
    pub publish_status: PublishStatus,
}

/// "Features" step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    /// Free-text description of the main functions
    pub description: String,

    /// Supporting material files already imported into the materials directory
    pub materials: Vec<PathBuf>,
}

/// Everything collected by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub identity: Option<Identity>,
    pub app_info: AppInfo,
    pub dev_info: DevInfo,
    pub features: Features,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record imported material files. Paths already listed are ignored.
    pub fn add_materials<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        for path in paths {
            if !self.features.materials.contains(&path) {
                self.features.materials.push(path);
            }
        }
    }

    /// Label/value rows shown on the confirmation page
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let or_dash = |s: &str| {
            if s.trim().is_empty() {
                "-".to_string()
            } else {
                s.trim().to_string()
            }
        };

        vec![
            (
                "Identity",
                self.identity.map(|i| i.label().to_string()).unwrap_or_else(|| "-".to_string()),
            ),
            ("Full name", or_dash(&self.app_info.full_name)),
            ("Abbreviation", or_dash(&self.app_info.abbreviation)),
            ("Version", or_dash(&self.app_info.version)),
            ("Rights scope", self.app_info.rights_scope.label().to_string()),
            (
                "Category",
                self.dev_info
                    .category
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Originality", self.dev_info.originality.label().to_string()),
            ("Development form", self.dev_info.development_form.label().to_string()),
            (
                "Completion date",
                self.dev_info
                    .completion_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Publish status", self.dev_info.publish_status.label().to_string()),
            ("Features", or_dash(&self.features.description)),
            ("Materials", format!("{} file(s)", self.features.materials.len())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_picker_index() {
        assert_eq!(SoftwareCategory::from_picker_index(0), None);
        assert_eq!(
            SoftwareCategory::from_picker_index(1),
            Some(SoftwareCategory::Application)
        );
        assert_eq!(
            SoftwareCategory::from_picker_index(4),
            Some(SoftwareCategory::OperatingSystem)
        );
        assert_eq!(SoftwareCategory::from_picker_index(5), None);
    }

    #[test]
    fn test_add_materials_skips_duplicates() {
        let mut form = RegistrationForm::new();
        form.add_materials(vec![PathBuf::from("/m/a.pdf"), PathBuf::from("/m/b.pdf")]);
        form.add_materials(vec![PathBuf::from("/m/a.pdf")]);
        assert_eq!(form.features.materials.len(), 2);
    }

    #[test]
    fn test_summary_uses_dash_for_blank_fields() {
        let mut form = RegistrationForm::new();
        form.app_info.full_name = "  Demo  ".to_string();
        form.dev_info.completion_date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let summary = form.summary();
        let get = |label: &str| {
            summary
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };

        assert_eq!(get("Identity"), "-");
        assert_eq!(get("Full name"), "Demo");
        assert_eq!(get("Abbreviation"), "-");
        assert_eq!(get("Completion date"), "2024-03-01");
        assert_eq!(get("Materials"), "0 file(s)");
    }
}
