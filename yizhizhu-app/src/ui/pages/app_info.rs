//! Application Info Page
//!
//! Full name, abbreviation, version and rights scope. Edits are written to
//! the shared form as the user types; the wizard validates on "Next".

use crate::ui::pages::choice::ChoiceGroup;
use crate::ui::Notifier;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::rc::Rc;
use yizhizhu_common::form::{FormField, RegistrationForm, RightsScope};
use yizhizhu_common::validate::DEFAULT_VERSION;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct AppInfoPage {
        pub form: RefCell<Option<Rc<RefCell<RegistrationForm>>>>,
        pub full_name: RefCell<Option<gtk::Entry>>,
        pub abbreviation: RefCell<Option<gtk::Entry>>,
        pub version: RefCell<Option<gtk::Entry>>,
        pub rights_scope: RefCell<Option<ChoiceGroup<RightsScope>>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for AppInfoPage {
        const NAME: &'static str = "YizhizhuAppInfoPage";
        type Type = super::AppInfoPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for AppInfoPage {
        fn dispose(&self) {
            if let Some(group) = self.rights_scope.borrow().as_ref() {
                group.cancel();
            }
        }
    }

    impl WidgetImpl for AppInfoPage {}
    impl BoxImpl for AppInfoPage {}
}

glib::wrapper! {
    pub struct AppInfoPage(ObjectSubclass<imp::AppInfoPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

/// Labelled row used by the form pages
pub(crate) fn form_row(label: &str, field: &impl IsA<gtk::Widget>) -> gtk::Box {
    let row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(16)
        .build();
    row.append(
        &gtk::Label::builder()
            .label(label)
            .xalign(0.0)
            .width_chars(18)
            .css_classes(["form-label"])
            .build(),
    );
    field.set_hexpand(true);
    row.append(field);
    row
}

/// Entry that copies its text into the form on every change
fn bound_entry(
    form: &Rc<RefCell<RegistrationForm>>,
    placeholder: &str,
    write: fn(&mut RegistrationForm, String),
) -> gtk::Entry {
    let entry = gtk::Entry::builder().placeholder_text(placeholder).build();
    entry.connect_changed(glib::clone!(@strong form => move |entry| {
        write(&mut form.borrow_mut(), entry.text().to_string());
    }));
    entry
}

impl AppInfoPage {
    pub fn new(form: Rc<RefCell<RegistrationForm>>, notifier: Notifier) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 16)
            .property("margin-start", 36)
            .property("margin-end", 36)
            .property("margin-top", 24)
            .build();

        *obj.imp().form.borrow_mut() = Some(form);
        obj.setup_ui(notifier);
        obj
    }

    fn setup_ui(&self, notifier: Notifier) {
        let imp = self.imp();
        let Some(form) = imp.form.borrow().clone() else {
            return;
        };

        let title = gtk::Label::builder()
            .label("Application info")
            .css_classes(["title-2"])
            .halign(gtk::Align::Start)
            .build();
        self.append(&title);

        let full_name = bound_entry(&form, "Full software name", |f, v| f.app_info.full_name = v);
        let abbreviation =
            bound_entry(&form, "Abbreviation (optional)", |f, v| f.app_info.abbreviation = v);
        let version = bound_entry(
            &form,
            &format!("Version, e.g. {}", DEFAULT_VERSION),
            |f, v| f.app_info.version = v,
        );

        let rights_scope = ChoiceGroup::new(
            &[RightsScope::AllRights, RightsScope::PartialRights],
            RightsScope::label,
            notifier,
            glib::clone!(@strong form => move |scope| {
                form.borrow_mut().app_info.rights_scope = scope;
            }),
        );
        // Partial rights cannot be registered through this tool
        rights_scope.set_option_sensitive(RightsScope::PartialRights, false);

        self.append(&form_row("Full name", &full_name));
        self.append(&form_row("Abbreviation", &abbreviation));
        self.append(&form_row("Version", &version));
        self.append(&form_row("Rights scope", rights_scope.widget()));

        *imp.full_name.borrow_mut() = Some(full_name);
        *imp.abbreviation.borrow_mut() = Some(abbreviation);
        *imp.version.borrow_mut() = Some(version);
        *imp.rights_scope.borrow_mut() = Some(rights_scope);
    }

    /// Copy form values back into the widgets (after auto-corrections)
    pub fn sync_from_form(&self) {
        let imp = self.imp();
        let Some(form) = imp.form.borrow().clone() else {
            return;
        };
        let info = form.borrow().app_info.clone();

        let set = |slot: &RefCell<Option<gtk::Entry>>, value: &str| {
            if let Some(entry) = slot.borrow().as_ref() {
                if entry.text() != value {
                    entry.set_text(value);
                }
            }
        };
        set(&imp.full_name, &info.full_name);
        set(&imp.abbreviation, &info.abbreviation);
        set(&imp.version, &info.version);

        if let Some(group) = imp.rights_scope.borrow().as_ref() {
            group.set_selected(info.rights_scope);
        }
    }

    /// Move keyboard focus to the field validation complained about
    pub fn focus_field(&self, field: FormField) {
        let imp = self.imp();
        let slot = match field {
            FormField::FullName => &imp.full_name,
            FormField::Abbreviation => &imp.abbreviation,
            FormField::Version => &imp.version,
            FormField::RightsScope => {
                if let Some(group) = imp.rights_scope.borrow().as_ref() {
                    group.grab_focus();
                }
                return;
            }
            _ => return,
        };
        if let Some(entry) = slot.borrow().as_ref() {
            entry.grab_focus();
        }
    }
}
