//! Complete Page - Final step of the wizard
//!
//! No navigation controls here. The only action left is to continue on the
//! official registration site.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct CompletePage {}

    #[glib::object_subclass]
    impl ObjectSubclass for CompletePage {
        const NAME: &'static str = "YizhizhuCompletePage";
        type Type = super::CompletePage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for CompletePage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![glib::subclass::Signal::builder("open-center-clicked").build()]
            })
        }
    }

    impl WidgetImpl for CompletePage {}
    impl BoxImpl for CompletePage {}
}

glib::wrapper! {
    pub struct CompletePage(ObjectSubclass<imp::CompletePage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl CompletePage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("vexpand", true)
            .build()
    }

    fn setup_ui(&self) {
        let open_button = gtk::Button::builder()
            .label("Open registration center")
            .halign(gtk::Align::Center)
            .css_classes(["suggested-action", "pill"])
            .build();
        open_button.connect_clicked(glib::clone!(@weak self as page => move |_| {
            page.emit_by_name::<()>("open-center-clicked", &[]);
        }));

        let status = adw::StatusPage::builder()
            .icon_name("emblem-ok-symbolic")
            .title("Information submitted")
            .description(
                "Your application details are ready. Continue the filing on the \
                 copyright protection center website.",
            )
            .child(&open_button)
            .vexpand(true)
            .build();
        status.add_css_class("success");

        self.append(&status);
    }
}

impl Default for CompletePage {
    fn default() -> Self {
        Self::new()
    }
}
