//! Wizard View - Registration flow with a breadcrumb trail
//!
//! The controller owns the navigation state; this widget only renders it.
//! After every navigation call the trail, the visible page and the footer
//! buttons are rebuilt from the controller via `sync()`.

use crate::ui::pages::{
    identity_from_name, AppInfoPage, CompletePage, ConfirmPage, DevInfoPage, FeaturesPage,
    IdentityPage,
};
use crate::ui::{open_copyright_center, Notifier};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::rc::Rc;
use yizhizhu_common::flow;
use yizhizhu_common::form::RegistrationForm;
use yizhizhu_common::wizard::{NavOutcome, WizardController};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct WizardView {
        pub form: Rc<RefCell<RegistrationForm>>,
        pub controller: RefCell<Option<WizardController<RegistrationForm>>>,
        pub notifier: RefCell<Option<Notifier>>,

        pub trail: RefCell<Option<gtk::Box>>,
        pub stack: RefCell<Option<gtk::Stack>>,
        pub back_button: RefCell<Option<gtk::Button>>,
        pub next_button: RefCell<Option<gtk::Button>>,

        // Pages the view talks to after construction
        pub app_info_page: RefCell<Option<AppInfoPage>>,
        pub dev_info_page: RefCell<Option<DevInfoPage>>,
        pub confirm_page: RefCell<Option<ConfirmPage>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for WizardView {
        const NAME: &'static str = "YizhizhuWizardView";
        type Type = super::WizardView;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for WizardView {}
    impl WidgetImpl for WizardView {}
    impl BoxImpl for WizardView {}
}

glib::wrapper! {
    pub struct WizardView(ObjectSubclass<imp::WizardView>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl WizardView {
    pub fn new(notifier: Notifier) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("vexpand", true)
            .build();

        let imp = obj.imp();
        *imp.notifier.borrow_mut() = Some(notifier);

        match flow::registration_wizard() {
            Ok(controller) => *imp.controller.borrow_mut() = Some(controller),
            Err(e) => tracing::error!("Invalid registration flow: {}", e),
        }

        obj.setup_ui();
        obj.sync();
        obj
    }

    fn notifier(&self) -> Option<Notifier> {
        self.imp().notifier.borrow().clone()
    }

    fn setup_ui(&self) {
        let imp = self.imp();
        let Some(notifier) = self.notifier() else {
            return;
        };
        let form = imp.form.clone();

        let trail = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(4)
            .margin_start(24)
            .margin_end(24)
            .margin_top(12)
            .css_classes(["wizard-trail"])
            .build();

        let stack = gtk::Stack::builder()
            .transition_type(gtk::StackTransitionType::SlideLeftRight)
            .vexpand(true)
            .build();

        // Pages
        let identity_page = IdentityPage::new();
        identity_page.connect_local(
            "identity-selected",
            false,
            glib::clone!(@weak self as view => @default-return None, move |values: &[glib::Value]| {
                let name = values[1].get::<String>().unwrap_or_default();
                view.on_identity_selected(&name);
                None
            }),
        );

        let app_info_page = AppInfoPage::new(form.clone(), notifier.clone());
        let dev_info_page = DevInfoPage::new(form.clone(), notifier.clone());
        let features_page = FeaturesPage::new(form, notifier);
        let confirm_page = ConfirmPage::new();

        let complete_page = CompletePage::new();
        complete_page.connect_local(
            "open-center-clicked",
            false,
            glib::clone!(@weak self as view => @default-return None, move |_| {
                if let Some(notifier) = view.notifier() {
                    let window = view.root().and_downcast::<gtk::Window>();
                    open_copyright_center(window.as_ref(), notifier);
                }
                None
            }),
        );

        stack.add_named(&identity_page, Some(flow::IDENTITY));
        stack.add_named(&scrolled(&app_info_page), Some(flow::APP_INFO));
        stack.add_named(&scrolled(&dev_info_page), Some(flow::DEV_INFO));
        stack.add_named(&features_page, Some(flow::FEATURES));
        stack.add_named(&confirm_page, Some(flow::CONFIRM));
        stack.add_named(&complete_page, Some(flow::COMPLETE));

        // Footer
        let footer = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(12)
            .margin_start(24)
            .margin_end(24)
            .margin_top(12)
            .margin_bottom(16)
            .build();

        let back_button = gtk::Button::builder()
            .label("Back")
            .build();
        back_button.connect_clicked(glib::clone!(@weak self as view => move |_| {
            view.go_back();
        }));

        let spacer = gtk::Box::builder().hexpand(true).build();

        let next_button = gtk::Button::builder()
            .label("Next")
            .css_classes(["suggested-action"])
            .build();
        next_button.connect_clicked(glib::clone!(@weak self as view => move |_| {
            view.go_next();
        }));

        footer.append(&back_button);
        footer.append(&spacer);
        footer.append(&next_button);

        self.append(&trail);
        self.append(&gtk::Separator::new(gtk::Orientation::Horizontal));
        self.append(&stack);
        self.append(&footer);

        *imp.trail.borrow_mut() = Some(trail);
        *imp.stack.borrow_mut() = Some(stack);
        *imp.back_button.borrow_mut() = Some(back_button);
        *imp.next_button.borrow_mut() = Some(next_button);
        *imp.app_info_page.borrow_mut() = Some(app_info_page);
        *imp.dev_info_page.borrow_mut() = Some(dev_info_page);
        *imp.confirm_page.borrow_mut() = Some(confirm_page);
    }

    fn on_identity_selected(&self, name: &str) {
        let Some(identity) = identity_from_name(name) else {
            tracing::warn!("Unknown identity: {}", name);
            return;
        };

        let imp = self.imp();
        imp.form.borrow_mut().identity = Some(identity);
        tracing::info!("Identity selected: {}", identity.label());

        if let Some(controller) = imp.controller.borrow_mut().as_mut() {
            controller.advance();
        }
        self.sync();
    }

    fn go_back(&self) {
        if let Some(controller) = self.imp().controller.borrow_mut().as_mut() {
            controller.retreat();
        }
        self.sync();
    }

    fn go_next(&self) {
        let imp = self.imp();
        let outcome = {
            let mut controller = imp.controller.borrow_mut();
            let Some(controller) = controller.as_mut() else {
                return;
            };
            let mut form = imp.form.borrow_mut();
            controller.request_advance(&mut form)
        };

        // Validators may have corrected fields (e.g. the default version)
        if let Some(page) = imp.app_info_page.borrow().as_ref() {
            page.sync_from_form();
        }

        match outcome {
            NavOutcome::Held { notice, focus } => {
                if let Some(notifier) = self.notifier() {
                    notifier(&notice);
                }
                if let Some(field) = focus {
                    self.focus_field(field);
                }
            }
            NavOutcome::Moved { from, to } => {
                tracing::debug!("Wizard moved {} -> {}", from, to);
                self.sync();
            }
            NavOutcome::Unchanged => {}
        }
    }

    fn jump_to(&self, key: &str) {
        if let Some(controller) = self.imp().controller.borrow_mut().as_mut() {
            controller.jump_to(key);
        }
        self.sync();
    }

    fn focus_field(&self, field: yizhizhu_common::form::FormField) {
        let imp = self.imp();
        let current = imp
            .controller
            .borrow()
            .as_ref()
            .map(|c| c.current_key());
        match current {
            Some(flow::APP_INFO) => {
                if let Some(page) = imp.app_info_page.borrow().as_ref() {
                    page.focus_field(field);
                }
            }
            Some(flow::DEV_INFO) => {
                if let Some(page) = imp.dev_info_page.borrow().as_ref() {
                    page.focus_field(field);
                }
            }
            _ => {}
        }
    }

    /// Render the controller state
    fn sync(&self) {
        let imp = self.imp();

        let (current, trail_items, has_back, has_forward) = {
            let controller = imp.controller.borrow();
            let Some(controller) = controller.as_ref() else {
                return;
            };
            let items: Vec<(&'static str, String)> = controller
                .unlocked()
                .iter()
                .map(|key| (*key, controller.label_of(key).unwrap_or(*key).to_string()))
                .collect();
            (
                controller.current_key(),
                items,
                controller.has_back_control(),
                controller.has_forward_control(),
            )
        };

        if current == flow::CONFIRM {
            if let Some(page) = imp.confirm_page.borrow().as_ref() {
                page.refresh(&imp.form.borrow());
            }
        }

        if let Some(stack) = imp.stack.borrow().as_ref() {
            stack.set_visible_child_name(current);
        }

        self.rebuild_trail(&trail_items, current);

        if let Some(back) = imp.back_button.borrow().as_ref() {
            back.set_visible(has_back);
        }
        if let Some(next) = imp.next_button.borrow().as_ref() {
            // Identity cards advance on their own
            next.set_visible(has_forward && current != flow::IDENTITY);
            next.set_label(if current == flow::CONFIRM { "Submit" } else { "Next" });
        }
    }

    fn rebuild_trail(&self, items: &[(&'static str, String)], current: &str) {
        let Some(trail) = self.imp().trail.borrow().clone() else {
            return;
        };
        while let Some(child) = trail.first_child() {
            trail.remove(&child);
        }

        for (i, (key, label)) in items.iter().enumerate() {
            if i > 0 {
                trail.append(
                    &gtk::Label::builder()
                        .label("›")
                        .css_classes(["dim-label"])
                        .build(),
                );
            }

            let button = gtk::Button::builder()
                .label(label.as_str())
                .css_classes(["flat", "trail-item"])
                .build();
            if *key == current {
                button.add_css_class("trail-active");
            }

            let key = *key;
            button.connect_clicked(glib::clone!(@weak self as view => move |_| {
                view.jump_to(key);
            }));
            trail.append(&button);
        }
    }
}

fn scrolled(child: &impl IsA<gtk::Widget>) -> gtk::ScrolledWindow {
    gtk::ScrolledWindow::builder()
        .child(child)
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .build()
}
