//! Confirm Page - Read-only summary before submission

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use yizhizhu_common::form::RegistrationForm;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ConfirmPage {
        pub summary: RefCell<Option<gtk::ListBox>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ConfirmPage {
        const NAME: &'static str = "YizhizhuConfirmPage";
        type Type = super::ConfirmPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for ConfirmPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }
    }

    impl WidgetImpl for ConfirmPage {}
    impl BoxImpl for ConfirmPage {}
}

glib::wrapper! {
    pub struct ConfirmPage(ObjectSubclass<imp::ConfirmPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl ConfirmPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 12)
            .property("margin-start", 36)
            .property("margin-end", 36)
            .property("margin-top", 24)
            .build()
    }

    fn setup_ui(&self) {
        self.append(
            &gtk::Label::builder()
                .label("Confirm your information")
                .css_classes(["title-2"])
                .halign(gtk::Align::Start)
                .build(),
        );
        self.append(
            &gtk::Label::builder()
                .label("Check every entry. Use the trail above to go back and edit.")
                .halign(gtk::Align::Start)
                .css_classes(["dim-label"])
                .build(),
        );

        let summary = gtk::ListBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .css_classes(["boxed-list"])
            .build();

        let scroller = gtk::ScrolledWindow::builder()
            .child(&summary)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .vexpand(true)
            .build();
        self.append(&scroller);

        *self.imp().summary.borrow_mut() = Some(summary);
    }

    /// Rebuild the summary rows from the current form
    pub fn refresh(&self, form: &RegistrationForm) {
        let Some(list) = self.imp().summary.borrow().clone() else {
            return;
        };
        while let Some(child) = list.first_child() {
            list.remove(&child);
        }

        for (label, value) in form.summary() {
            let row = adw::ActionRow::builder()
                .title(label)
                .subtitle(glib::markup_escape_text(&value).as_str())
                .build();
            row.add_css_class("property");
            list.append(&row);
        }
    }
}

impl Default for ConfirmPage {
    fn default() -> Self {
        Self::new()
    }
}
