//! Settings Page
//!
//! Theme changes apply and persist immediately. API fields are only
//! written when "Save" is pressed and the base URL is valid.

use crate::ui::app::apply_theme;
use crate::ui::Notifier;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::rc::Rc;
use yizhizhu_common::config::{SettingsService, ThemeMode};
use yizhizhu_common::notice::Notice;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct SettingsPage {
        pub service: RefCell<Option<Rc<RefCell<SettingsService>>>>,
        pub notifier: RefCell<Option<Notifier>>,
        pub base_url: RefCell<Option<adw::EntryRow>>,
        pub model_name: RefCell<Option<adw::EntryRow>>,
        pub api_key: RefCell<Option<adw::PasswordEntryRow>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SettingsPage {
        const NAME: &'static str = "YizhizhuSettingsPage";
        type Type = super::SettingsPage;
        type ParentType = adw::PreferencesPage;
    }

    impl ObjectImpl for SettingsPage {}
    impl WidgetImpl for SettingsPage {}
    impl PreferencesPageImpl for SettingsPage {}
}

glib::wrapper! {
    pub struct SettingsPage(ObjectSubclass<imp::SettingsPage>)
        @extends adw::PreferencesPage, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl SettingsPage {
    pub fn new(service: Rc<RefCell<SettingsService>>, notifier: Notifier) -> Self {
        let obj: Self = glib::Object::builder()
            .property("title", "Settings")
            .property("icon-name", "preferences-system-symbolic")
            .build();

        let imp = obj.imp();
        *imp.service.borrow_mut() = Some(service);
        *imp.notifier.borrow_mut() = Some(notifier);

        obj.setup_ui();
        obj
    }

    fn setup_ui(&self) {
        let imp = self.imp();
        let Some(service) = imp.service.borrow().clone() else {
            return;
        };
        let current = service.borrow().settings().clone();

        // Appearance
        let appearance = adw::PreferencesGroup::builder()
            .title("Appearance")
            .build();

        let labels: Vec<&str> = ThemeMode::ALL.iter().map(|t| t.label()).collect();
        let theme_row = adw::ComboRow::builder()
            .title("Theme")
            .model(&gtk::StringList::new(&labels))
            .selected(current.appearance.theme_mode.index())
            .build();
        theme_row.connect_selected_notify(glib::clone!(@weak self as page => move |row| {
            page.change_theme(ThemeMode::from_index(row.selected()));
        }));
        appearance.add(&theme_row);

        // API
        let api = adw::PreferencesGroup::builder()
            .title("Model API")
            .description("Used for AI-assisted text generation")
            .build();

        let base_url = adw::EntryRow::builder()
            .title("Base URL")
            .build();
        base_url.set_text(&current.api.base_url);
        let model_name = adw::EntryRow::builder()
            .title("Model name")
            .build();
        model_name.set_text(&current.api.model_name);
        let api_key = adw::PasswordEntryRow::builder()
            .title("API key")
            .build();
        api_key.set_text(&current.api.api_key);

        api.add(&base_url);
        api.add(&model_name);
        api.add(&api_key);

        let save_button = gtk::Button::builder()
            .label("Save")
            .halign(gtk::Align::End)
            .margin_top(12)
            .css_classes(["suggested-action"])
            .build();
        save_button.connect_clicked(glib::clone!(@weak self as page => move |_| {
            page.save_api_settings();
        }));

        let path_label = gtk::Label::builder()
            .label(format!("Stored in {}", service.borrow().path().display()))
            .xalign(0.0)
            .css_classes(["dim-label", "caption"])
            .build();

        let footer = adw::PreferencesGroup::new();
        footer.add(&save_button);
        footer.add(&path_label);

        self.add(&appearance);
        self.add(&api);
        self.add(&footer);

        *imp.base_url.borrow_mut() = Some(base_url);
        *imp.model_name.borrow_mut() = Some(model_name);
        *imp.api_key.borrow_mut() = Some(api_key);
    }

    fn notify(&self, notice: &Notice) {
        if let Some(notifier) = self.imp().notifier.borrow().as_ref() {
            notifier(notice);
        }
    }

    fn change_theme(&self, theme: ThemeMode) {
        apply_theme(theme);

        let Some(service) = self.imp().service.borrow().clone() else {
            return;
        };
        let result = {
            let mut service = service.borrow_mut();
            service.set_theme(theme);
            service.save()
        };
        match result {
            Ok(()) => tracing::info!("Theme set to {}", theme.label()),
            Err(e) => self.notify(&Notice::error("Could not save theme", e.to_string())),
        }
    }

    fn save_api_settings(&self) {
        let imp = self.imp();
        let Some(service) = imp.service.borrow().clone() else {
            return;
        };

        let text_of = |row: &RefCell<Option<adw::EntryRow>>| {
            row.borrow().as_ref().map(|r| r.text().to_string()).unwrap_or_default()
        };
        let base_url = text_of(&imp.base_url);
        let model_name = text_of(&imp.model_name);
        let api_key = imp
            .api_key
            .borrow()
            .as_ref()
            .map(|r| r.text().to_string())
            .unwrap_or_default();

        // Validate a candidate first so a bad URL never reaches the service
        let mut candidate = service.borrow().settings().clone();
        candidate.api.base_url = base_url.trim().to_string();
        if let Err(e) = candidate.validate() {
            self.notify(&Notice::error("Settings not saved", e.to_string()));
            return;
        }

        let result = {
            let mut service = service.borrow_mut();
            service.set_base_url(&base_url);
            service.set_model_name(&model_name);
            service.set_api_key(&api_key);
            service.save()
        };

        match result {
            Ok(()) => self.notify(&Notice::success("Settings saved", "")),
            Err(e) => self.notify(&Notice::error("Settings not saved", e.to_string())),
        }
    }
}
