//! Yizhizhu Application - GTK4 Application Setup
//!
//! Initializes the GTK4/Libadwaita application, applies the saved theme and
//! opens the main window.

use crate::ui::window::MainWindow;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::gio;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use yizhizhu_common::config::{SettingsService, ThemeMode};

/// Application ID for Yizhizhu
const APP_ID: &str = "io.github.yizhizhu.Yizhizhu";

/// Apply a theme preference to the whole application
pub fn apply_theme(theme: ThemeMode) {
    let scheme = match theme {
        ThemeMode::Light => adw::ColorScheme::ForceLight,
        ThemeMode::Dark => adw::ColorScheme::ForceDark,
        ThemeMode::Auto => adw::ColorScheme::Default,
    };
    adw::StyleManager::default().set_color_scheme(scheme);
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct YizhizhuApplication {
        pub settings: RefCell<Option<Rc<RefCell<SettingsService>>>>,
        pub workspace: RefCell<Option<PathBuf>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for YizhizhuApplication {
        const NAME: &'static str = "YizhizhuApplication";
        type Type = super::YizhizhuApplication;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for YizhizhuApplication {}

    impl ApplicationImpl for YizhizhuApplication {
        fn activate(&self) {
            let app = self.obj();

            if let Some(window) = app.active_window() {
                window.present();
                return;
            }

            let Some(settings) = self.settings.borrow().clone() else {
                tracing::error!("Application activated without settings");
                return;
            };

            apply_theme(settings.borrow().settings().appearance.theme_mode);

            let window = MainWindow::new(&app, settings, self.workspace.borrow().clone());
            window.present();
        }

        fn startup(&self) {
            self.parent_startup();

            let css_provider = gtk::CssProvider::new();
            css_provider.load_from_data(include_str!("styles.css"));

            match gtk::gdk::Display::default() {
                Some(display) => {
                    gtk::style_context_add_provider_for_display(
                        &display,
                        &css_provider,
                        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
                    );
                }
                None => {
                    tracing::warn!("No display available. CSS styling will not be applied.");
                }
            }

            let app = self.obj();
            app.setup_actions();
        }
    }

    impl GtkApplicationImpl for YizhizhuApplication {}
    impl AdwApplicationImpl for YizhizhuApplication {}
}

glib::wrapper! {
    pub struct YizhizhuApplication(ObjectSubclass<imp::YizhizhuApplication>)
        @extends adw::Application, gtk::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl YizhizhuApplication {
    pub fn new(settings: Rc<RefCell<SettingsService>>, workspace: Option<PathBuf>) -> Self {
        let app: Self = glib::Object::builder()
            .property("application-id", APP_ID)
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build();

        let imp = app.imp();
        *imp.settings.borrow_mut() = Some(settings);
        *imp.workspace.borrow_mut() = workspace;

        app
    }

    fn setup_actions(&self) {
        let quit_action = gio::SimpleAction::new("quit", None);
        quit_action.connect_activate(glib::clone!(
            @weak self as app =>
            move |_, _| {
                app.quit();
            }
        ));
        self.add_action(&quit_action);

        self.set_accels_for_action("app.quit", &["<Ctrl>q"]);
    }

    /// Run the main loop. Arguments were already handled by clap.
    pub fn run(&self) -> glib::ExitCode {
        ApplicationExtManual::run_with_args::<&str>(self, &[])
    }
}
