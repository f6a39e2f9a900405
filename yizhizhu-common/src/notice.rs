//! User-facing notices
//!
//! Every recoverable problem (validation, file system) ends up as a
//! severity-tagged notice that the UI shows as a transient toast.

/// How loudly a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Short tag shown in front of the toast title
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Done",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub content: String,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn info(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, content)
    }

    pub fn success(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, content)
    }

    pub fn warning(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, content)
    }

    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, content)
    }

    /// Single-line rendering used by toasts and log lines
    pub fn to_line(&self) -> String {
        if self.content.is_empty() {
            format!("{}: {}", self.severity.tag(), self.title)
        } else {
            format!("{}: {} - {}", self.severity.tag(), self.title, self.content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_line_includes_severity_tag() {
        let notice = Notice::warning("Abbreviation too long", "It may be truncated");
        assert_eq!(
            notice.to_line(),
            "Warning: Abbreviation too long - It may be truncated"
        );
    }

    #[test]
    fn test_to_line_without_content() {
        let notice = Notice::success("Settings saved", "");
        assert_eq!(notice.to_line(), "Done: Settings saved");
    }
}
