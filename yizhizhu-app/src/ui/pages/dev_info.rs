//! Development Info Page
//!
//! Category, originality, development form, completion date and publish
//! status. Only original, solo-developed, unpublished software can be filed
//! here; the other options explain themselves and then snap back.

use crate::ui::pages::app_info::form_row;
use crate::ui::pages::choice::ChoiceGroup;
use crate::ui::Notifier;
use adw::prelude::*;
use adw::subclass::prelude::*;
use chrono::NaiveDate;
use gtk::glib;
use std::cell::RefCell;
use std::rc::Rc;
use yizhizhu_common::form::{
    DevelopmentForm, FormField, Originality, PublishStatus, RegistrationForm, SoftwareCategory,
};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct DevInfoPage {
        pub form: RefCell<Option<Rc<RefCell<RegistrationForm>>>>,
        pub category: RefCell<Option<gtk::DropDown>>,
        pub originality: RefCell<Option<ChoiceGroup<Originality>>>,
        pub development_form: RefCell<Option<ChoiceGroup<DevelopmentForm>>>,
        pub publish_status: RefCell<Option<ChoiceGroup<PublishStatus>>>,
        pub calendar: RefCell<Option<gtk::Calendar>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for DevInfoPage {
        const NAME: &'static str = "YizhizhuDevInfoPage";
        type Type = super::DevInfoPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for DevInfoPage {
        fn dispose(&self) {
            if let Some(group) = self.originality.borrow().as_ref() {
                group.cancel();
            }
            if let Some(group) = self.development_form.borrow().as_ref() {
                group.cancel();
            }
            if let Some(group) = self.publish_status.borrow().as_ref() {
                group.cancel();
            }
        }
    }

    impl WidgetImpl for DevInfoPage {}
    impl BoxImpl for DevInfoPage {}
}

glib::wrapper! {
    pub struct DevInfoPage(ObjectSubclass<imp::DevInfoPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

fn calendar_date(calendar: &gtk::Calendar) -> Option<NaiveDate> {
    let date = calendar.date();
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::try_from(date.month()).ok()?,
        u32::try_from(date.day_of_month()).ok()?,
    )
}

impl DevInfoPage {
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

        self.append(
            &gtk::Label::builder()
                .label("Development info")
                .css_classes(["title-2"])
                .halign(gtk::Align::Start)
                .build(),
        );

        // Index 0 is the placeholder, so nothing is preselected
        let mut labels = vec![SoftwareCategory::PLACEHOLDER];
        labels.extend(SoftwareCategory::ALL.iter().map(|c| c.label()));
        let category = gtk::DropDown::from_strings(&labels);
        category.set_selected(0);
        category.connect_selected_notify(glib::clone!(@strong form => move |dropdown| {
            form.borrow_mut().dev_info.category =
                SoftwareCategory::from_picker_index(dropdown.selected());
        }));

        let originality = ChoiceGroup::new(
            &Originality::ALL,
            Originality::label,
            notifier.clone(),
            glib::clone!(@strong form => move |value| {
                form.borrow_mut().dev_info.originality = value;
            }),
        );

        let development_form = ChoiceGroup::new(
            &DevelopmentForm::ALL,
            DevelopmentForm::label,
            notifier.clone(),
            glib::clone!(@strong form => move |value| {
                form.borrow_mut().dev_info.development_form = value;
            }),
        );

        let calendar = gtk::Calendar::builder().halign(gtk::Align::Start).build();
        let date_label = gtk::Label::builder()
            .label("No date selected")
            .xalign(0.0)
            .css_classes(["dim-label"])
            .build();
        calendar.connect_day_selected(glib::clone!(
            @strong form, @weak date_label =>
            move |calendar| {
                let date = calendar_date(calendar);
                if let Some(date) = date {
                    date_label.set_label(&date.format("%Y-%m-%d").to_string());
                }
                form.borrow_mut().dev_info.completion_date = date;
            }
        ));
        let date_box = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(6)
            .build();
        date_box.append(&calendar);
        date_box.append(&date_label);

        let publish_status = ChoiceGroup::new(
            &PublishStatus::ALL,
            PublishStatus::label,
            notifier,
            glib::clone!(@strong form => move |value| {
                form.borrow_mut().dev_info.publish_status = value;
            }),
        );

        self.append(&form_row("Category", &category));
        self.append(&form_row("Originality", originality.widget()));
        self.append(&form_row("Development form", development_form.widget()));
        self.append(&form_row("Completion date", &date_box));
        self.append(&form_row("Publish status", publish_status.widget()));

        *imp.category.borrow_mut() = Some(category);
        *imp.originality.borrow_mut() = Some(originality);
        *imp.development_form.borrow_mut() = Some(development_form);
        *imp.calendar.borrow_mut() = Some(calendar);
        *imp.publish_status.borrow_mut() = Some(publish_status);
    }

    pub fn focus_field(&self, field: FormField) {
        let imp = self.imp();
        match field {
            FormField::Category => {
                if let Some(dropdown) = imp.category.borrow().as_ref() {
                    dropdown.grab_focus();
                }
            }
            FormField::CompletionDate => {
                if let Some(calendar) = imp.calendar.borrow().as_ref() {
                    calendar.grab_focus();
                }
            }
            FormField::Originality => {
                if let Some(group) = imp.originality.borrow().as_ref() {
                    group.grab_focus();
                }
            }
            FormField::DevelopmentForm => {
                if let Some(group) = imp.development_form.borrow().as_ref() {
                    group.grab_focus();
                }
            }
            FormField::PublishStatus => {
                if let Some(group) = imp.publish_status.borrow().as_ref() {
                    group.grab_focus();
                }
            }
            _ => {}
        }
    }
}
