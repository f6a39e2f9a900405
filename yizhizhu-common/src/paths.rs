//! Centralized Path Definitions
//!
//! Settings, workspace and materials locations used by the application.
//! Keeping them here avoids hardcoded strings scattered across the UI.

/// Application files relative to the working directory
pub mod app {
    use std::path::PathBuf;

    /// Settings file, relative to the working directory
    pub const CONFIG_RELATIVE_PATH: &str = "config/config.json";

    /// Get the settings file path as PathBuf
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_RELATIVE_PATH)
    }
}

/// Directories the file browser starts from
pub mod workspace {
    use std::path::PathBuf;

    /// Default root for the code browser (the user's home directory)
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default destination for uploaded supporting materials
    pub fn default_materials_dir() -> PathBuf {
        dirs::document_dir()
            .unwrap_or_else(default_root)
            .join("yizhizhu-materials")
    }
}

/// Links opened in the system browser
pub mod links {
    /// Online registration portal of the copyright protection centre
    pub const COPYRIGHT_CENTER_URL: &str = "https://register.ccopyright.com.cn/login.html";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_relative() {
        let path = app::config_path();
        assert!(path.is_relative());
        assert!(path.ends_with("config.json"));
    }

    #[test]
    fn test_materials_dir_name() {
        assert!(workspace::default_materials_dir().ends_with("yizhizhu-materials"));
    }
}
