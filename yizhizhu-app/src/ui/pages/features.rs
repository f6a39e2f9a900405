//! Features Page
//!
//! Free-text description of the software plus supporting materials. Chosen
//! files are copied into the materials directory.

use crate::ui::Notifier;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::{gio, glib};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use yizhizhu_common::form::RegistrationForm;
use yizhizhu_common::import::{import_paths, ImportMode};
use yizhizhu_common::notice::Notice;
use yizhizhu_common::paths;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct FeaturesPage {
        pub form: RefCell<Option<Rc<RefCell<RegistrationForm>>>>,
        pub notifier: RefCell<Option<Notifier>>,
        pub materials_dir: RefCell<PathBuf>,
        pub dir_label: RefCell<Option<gtk::Label>>,
        pub materials_list: RefCell<Option<gtk::ListBox>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for FeaturesPage {
        const NAME: &'static str = "YizhizhuFeaturesPage";
        type Type = super::FeaturesPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for FeaturesPage {}
    impl WidgetImpl for FeaturesPage {}
    impl BoxImpl for FeaturesPage {}
}

glib::wrapper! {
    pub struct FeaturesPage(ObjectSubclass<imp::FeaturesPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl FeaturesPage {
    pub fn new(form: Rc<RefCell<RegistrationForm>>, notifier: Notifier) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 12)
            .property("margin-start", 36)
            .property("margin-end", 36)
            .property("margin-top", 24)
            .build();

        let imp = obj.imp();
        *imp.form.borrow_mut() = Some(form);
        *imp.notifier.borrow_mut() = Some(notifier);
        *imp.materials_dir.borrow_mut() = paths::workspace::default_materials_dir();

        obj.setup_ui();
        obj
    }

    fn setup_ui(&self) {
        let imp = self.imp();
        let Some(form) = imp.form.borrow().clone() else {
            return;
        };

        self.append(
            &gtk::Label::builder()
                .label("Software features")
                .css_classes(["title-2"])
                .halign(gtk::Align::Start)
                .build(),
        );

        self.append(
            &gtk::Label::builder()
                .label("Describe the main functions and technical characteristics")
                .halign(gtk::Align::Start)
                .css_classes(["dim-label"])
                .build(),
        );

        let description = gtk::TextView::builder()
            .wrap_mode(gtk::WrapMode::WordChar)
            .top_margin(8)
            .bottom_margin(8)
            .left_margin(8)
            .right_margin(8)
            .build();
        description.buffer().connect_changed(glib::clone!(@strong form => move |buffer| {
            let (start, end) = buffer.bounds();
            form.borrow_mut().features.description = buffer.text(&start, &end, false).to_string();
        }));

        let scroller = gtk::ScrolledWindow::builder()
            .child(&description)
            .min_content_height(160)
            .vexpand(true)
            .css_classes(["card"])
            .build();
        self.append(&scroller);

        // Materials
        let toolbar = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .build();

        let upload_button = gtk::Button::builder()
            .label("Upload materials...")
            .css_classes(["suggested-action"])
            .build();
        upload_button.connect_clicked(glib::clone!(@weak self as page => move |_| {
            page.choose_materials();
        }));

        let dir_button = gtk::Button::builder()
            .icon_name("folder-open-symbolic")
            .tooltip_text("Change materials folder")
            .build();
        dir_button.connect_clicked(glib::clone!(@weak self as page => move |_| {
            page.choose_materials_dir();
        }));

        let dir_label = gtk::Label::builder()
            .label(imp.materials_dir.borrow().display().to_string())
            .ellipsize(gtk::pango::EllipsizeMode::Middle)
            .hexpand(true)
            .xalign(0.0)
            .css_classes(["dim-label"])
            .build();

        toolbar.append(&upload_button);
        toolbar.append(&dir_button);
        toolbar.append(&dir_label);
        self.append(&toolbar);

        let materials_list = gtk::ListBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .css_classes(["boxed-list"])
            .build();
        self.append(&materials_list);

        *imp.dir_label.borrow_mut() = Some(dir_label);
        *imp.materials_list.borrow_mut() = Some(materials_list);
    }

    fn notify(&self, notice: &Notice) {
        if let Some(notifier) = self.imp().notifier.borrow().as_ref() {
            notifier(notice);
        }
    }

    fn parent_window(&self) -> Option<gtk::Window> {
        self.root().and_downcast::<gtk::Window>()
    }

    fn choose_materials(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Select supporting materials")
            .modal(true)
            .build();

        dialog.open_multiple(
            self.parent_window().as_ref(),
            gio::Cancellable::NONE,
            glib::clone!(@weak self as page => move |result| {
                let model = match result {
                    Ok(model) => model,
                    // Dismissed
                    Err(_) => return,
                };
                let files: Vec<PathBuf> = (0..model.n_items())
                    .filter_map(|i| model.item(i).and_downcast::<gio::File>())
                    .filter_map(|file| file.path())
                    .collect();
                page.import_materials(files);
            }),
        );
    }

    fn choose_materials_dir(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Select materials folder")
            .modal(true)
            .build();

        dialog.select_folder(
            self.parent_window().as_ref(),
            gio::Cancellable::NONE,
            glib::clone!(@weak self as page => move |result| {
                let Ok(folder) = result else {
                    return;
                };
                let Some(path) = folder.path() else {
                    return;
                };
                tracing::info!("Materials folder set to {}", path.display());
                if let Some(label) = page.imp().dir_label.borrow().as_ref() {
                    label.set_label(&path.display().to_string());
                }
                *page.imp().materials_dir.borrow_mut() = path;
            }),
        );
    }

    fn import_materials(&self, files: Vec<PathBuf>) {
        if files.is_empty() {
            return;
        }

        let imp = self.imp();
        let target = imp.materials_dir.borrow().clone();
        if let Err(e) = std::fs::create_dir_all(&target) {
            self.notify(&Notice::error(
                "Upload failed",
                format!("Cannot create {}: {}", target.display(), e),
            ));
            return;
        }

        let report = match import_paths(&files, &target, ImportMode::Copy) {
            Ok(report) => report,
            Err(e) => {
                self.notify(&Notice::error("Upload failed", e.to_string()));
                return;
            }
        };

        let imported = report.imported.len();
        if let Some(form) = imp.form.borrow().as_ref() {
            form.borrow_mut().add_materials(report.imported.iter().cloned());
        }
        self.refresh_materials();

        if report.is_complete() {
            self.notify(&Notice::success(
                "Materials uploaded",
                format!("{} file(s) saved to {}", imported, target.display()),
            ));
        } else {
            let failed: Vec<String> = report
                .failed
                .iter()
                .map(|(path, reason)| format!("{}: {}", path.display(), reason))
                .collect();
            self.notify(&Notice::warning(
                "Some materials were not uploaded",
                failed.join("; "),
            ));
        }
    }

    fn refresh_materials(&self) {
        let imp = self.imp();
        let Some(list) = imp.materials_list.borrow().clone() else {
            return;
        };
        while let Some(child) = list.first_child() {
            list.remove(&child);
        }

        let Some(form) = imp.form.borrow().clone() else {
            return;
        };
        for path in &form.borrow().features.materials {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let row = adw::ActionRow::builder()
                .title(glib::markup_escape_text(&name).as_str())
                .subtitle(glib::markup_escape_text(&path.display().to_string()).as_str())
                .build();
            row.add_prefix(&gtk::Image::from_icon_name("text-x-generic-symbolic"));
            list.append(&row);
        }
    }
}
