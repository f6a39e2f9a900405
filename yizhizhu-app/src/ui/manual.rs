//! Manual Page - Static usage guide

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;

const SECTIONS: &[(&str, &str)] = &[
    (
        "Basic information",
        "Start on the Home page and choose whether you file as the applicant or as an \
         agent. Then fill in the application info: the full software name is required, \
         the abbreviation should be shorter than the full name, and an empty version is \
         set to V1.0 for you. Only software whose rights you fully own can be filed here.",
    ),
    (
        "Development info",
        "Pick the software category, the completion date and how the software was \
         developed. This assistant covers original, independently developed, unpublished \
         software. Choosing another option shows why it is not supported and switches back \
         after a moment.",
    ),
    (
        "Features and materials",
        "Describe the main functions in your own words and upload supporting documents. \
         Uploaded files are copied into the materials folder shown next to the upload button.",
    ),
    (
        "Code import",
        "Open your source folder on the Source code page. Drop files onto the tree to add \
         them to the selected folder, or to the root when nothing is selected. Files with \
         the same name are replaced. Turn on \"Move on drop\" to move instead of copy.",
    ),
    (
        "Confirm and submit",
        "Review the summary, use the trail at the top to jump back to any visited step, and \
         submit. Continue the filing on the copyright protection center website using the \
         globe button in the header bar.",
    ),
];

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ManualPage {}

    #[glib::object_subclass]
    impl ObjectSubclass for ManualPage {
        const NAME: &'static str = "YizhizhuManualPage";
        type Type = super::ManualPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for ManualPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }
    }

    impl WidgetImpl for ManualPage {}
    impl BoxImpl for ManualPage {}
}

glib::wrapper! {
    pub struct ManualPage(ObjectSubclass<imp::ManualPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl ManualPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("vexpand", true)
            .build()
    }

    fn setup_ui(&self) {
        let content = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(18)
            .margin_start(36)
            .margin_end(36)
            .margin_top(24)
            .margin_bottom(24)
            .build();

        content.append(
            &gtk::Label::builder()
                .label("User manual")
                .css_classes(["title-1"])
                .halign(gtk::Align::Start)
                .build(),
        );

        for (title, body) in SECTIONS {
            content.append(
                &gtk::Label::builder()
                    .label(*title)
                    .css_classes(["title-3"])
                    .halign(gtk::Align::Start)
                    .build(),
            );
            content.append(
                &gtk::Label::builder()
                    .label(*body)
                    .wrap(true)
                    .xalign(0.0)
                    .selectable(true)
                    .build(),
            );
        }

        let clamp = adw::Clamp::builder()
            .maximum_size(760)
            .child(&content)
            .build();

        self.append(
            &gtk::ScrolledWindow::builder()
                .child(&clamp)
                .hscrollbar_policy(gtk::PolicyType::Never)
                .vexpand(true)
                .build(),
        );
    }
}

impl Default for ManualPage {
    fn default() -> Self {
        Self::new()
    }
}
