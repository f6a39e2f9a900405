//! UI Module - GTK4 + Libadwaita Interface
//!
//! Sidebar window hosting the registration wizard, code browser, manual
//! and settings pages.

pub mod app;
pub mod code;
pub mod manual;
pub mod pages;
pub mod settings;
pub mod window;
pub mod wizard;

use gtk::gio;
use gtk::prelude::*;
use std::rc::Rc;
use yizhizhu_common::notice::{Notice, Severity};
use yizhizhu_common::paths;

/// Callback that shows a notice to the user (as a toast)
pub type Notifier = Rc<dyn Fn(&Notice)>;

/// Build the toast for a notice
pub fn toast_for(notice: &Notice) -> adw::Toast {
    let toast = adw::Toast::new(&glib::markup_escape_text(&notice.to_line()));
    toast.set_timeout(match notice.severity {
        Severity::Info | Severity::Success => 3,
        Severity::Warning | Severity::Error => 5,
    });
    toast
}

/// Notifier that logs and forwards to a toast overlay
pub fn overlay_notifier(overlay: &adw::ToastOverlay) -> Notifier {
    let overlay = overlay.clone();
    Rc::new(move |notice: &Notice| {
        match notice.severity {
            Severity::Warning | Severity::Error => tracing::warn!("{}", notice.to_line()),
            Severity::Info | Severity::Success => tracing::info!("{}", notice.to_line()),
        }
        overlay.add_toast(toast_for(notice));
    })
}

/// Open the copyright centre's registration portal in the default browser
pub fn open_copyright_center(parent: Option<&gtk::Window>, notifier: Notifier) {
    tracing::info!("Opening {}", paths::links::COPYRIGHT_CENTER_URL);
    gtk::UriLauncher::new(paths::links::COPYRIGHT_CENTER_URL).launch(
        parent,
        gio::Cancellable::NONE,
        move |result| {
            if let Err(e) = result {
                notifier(&Notice::error("Could not open browser", e.to_string()));
            }
        },
    );
}
