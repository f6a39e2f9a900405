//! Code Page - Source browser with drag & drop import and file preview
//!
//! The left side lists the chosen folder as a tree. Files dropped onto the
//! tree are copied (or moved) into the selected directory, the selected
//! file's directory, or the root when nothing is selected. The right side
//! previews the selected file.

use crate::ui::Notifier;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::{gdk, gio, glib};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use yizhizhu_common::import::{self, ImportMode, TreeEntry};
use yizhizhu_common::notice::Notice;
use yizhizhu_common::preview::{self, Preview};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct CodePage {
        pub notifier: RefCell<Option<Notifier>>,
        pub root: RefCell<Option<PathBuf>>,
        pub entries: RefCell<Vec<TreeEntry>>,
        pub selected: RefCell<Option<PathBuf>>,

        pub body: RefCell<Option<gtk::Stack>>,
        pub root_label: RefCell<Option<gtk::Label>>,
        pub tree: RefCell<Option<gtk::ListBox>>,
        pub move_switch: RefCell<Option<gtk::Switch>>,

        pub preview_stack: RefCell<Option<gtk::Stack>>,
        pub text_view: RefCell<Option<gtk::TextView>>,
        pub truncated_label: RefCell<Option<gtk::Label>>,
        pub picture: RefCell<Option<gtk::Picture>>,
        pub video: RefCell<Option<gtk::Video>>,
        pub metadata: RefCell<Option<gtk::ListBox>>,
        pub not_found: RefCell<Option<adw::StatusPage>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for CodePage {
        const NAME: &'static str = "YizhizhuCodePage";
        type Type = super::CodePage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for CodePage {}
    impl WidgetImpl for CodePage {}
    impl BoxImpl for CodePage {}
}

glib::wrapper! {
    pub struct CodePage(ObjectSubclass<imp::CodePage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

// Preview stack children
const VIEW_TEXT: &str = "text";
const VIEW_IMAGE: &str = "image";
const VIEW_MEDIA: &str = "media";
const VIEW_METADATA: &str = "metadata";
const VIEW_NOT_FOUND: &str = "not-found";
const VIEW_IDLE: &str = "idle";

impl CodePage {
    pub fn new(notifier: Notifier, workspace: Option<PathBuf>) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("vexpand", true)
            .build();

        *obj.imp().notifier.borrow_mut() = Some(notifier);
        obj.setup_ui();

        if let Some(root) = workspace {
            obj.set_root(root);
        }
        obj
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        // Toolbar
        let toolbar = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .margin_start(12)
            .margin_end(12)
            .margin_top(8)
            .margin_bottom(8)
            .build();

        let open_button = gtk::Button::builder()
            .label("Open folder...")
            .build();
        open_button.connect_clicked(glib::clone!(@weak self as page => move |_| {
            page.choose_root();
        }));

        let root_label = gtk::Label::builder()
            .hexpand(true)
            .xalign(0.0)
            .ellipsize(gtk::pango::EllipsizeMode::Middle)
            .css_classes(["dim-label"])
            .build();

        let move_switch = gtk::Switch::builder()
            .valign(gtk::Align::Center)
            .tooltip_text("Move dropped files instead of copying them")
            .build();

        toolbar.append(&open_button);
        toolbar.append(&root_label);
        toolbar.append(&gtk::Label::new(Some("Move on drop")));
        toolbar.append(&move_switch);

        // Tree
        let tree = gtk::ListBox::builder()
            .selection_mode(gtk::SelectionMode::Single)
            .css_classes(["navigation-sidebar"])
            .build();
        tree.connect_row_selected(glib::clone!(@weak self as page => move |_, row| {
            let index = row.map(|r| r.index());
            page.on_row_selected(index);
        }));

        let drop_target = gtk::DropTarget::new(gdk::FileList::static_type(), gdk::DragAction::COPY);
        drop_target.connect_drop(glib::clone!(
            @weak self as page => @default-return false,
            move |_, value, _, _| {
                let Ok(file_list) = value.get::<gdk::FileList>() else {
                    return false;
                };
                let sources: Vec<PathBuf> = file_list
                    .files()
                    .iter()
                    .filter_map(|f| f.path())
                    .collect();
                page.import_dropped(sources);
                true
            }
        ));
        tree.add_controller(drop_target);

        let tree_scroller = gtk::ScrolledWindow::builder()
            .child(&tree)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .width_request(280)
            .vexpand(true)
            .build();

        // Preview
        let preview_stack = gtk::Stack::builder()
            .hexpand(true)
            .vexpand(true)
            .transition_type(gtk::StackTransitionType::Crossfade)
            .build();

        preview_stack.add_named(
            &adw::StatusPage::builder()
                .icon_name("document-open-symbolic")
                .title("No file selected")
                .description("Select a file in the tree to preview it")
                .build(),
            Some(VIEW_IDLE),
        );

        let text_view = gtk::TextView::builder()
            .editable(false)
            .monospace(true)
            .cursor_visible(false)
            .left_margin(8)
            .top_margin(8)
            .build();
        let truncated_label = gtk::Label::builder()
            .label(format!(
                "Preview truncated at {}",
                preview::format_size(preview::MAX_TEXT_PREVIEW_BYTES as u64)
            ))
            .css_classes(["dim-label"])
            .visible(false)
            .margin_top(4)
            .margin_bottom(4)
            .build();
        let text_box = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .build();
        text_box.append(
            &gtk::ScrolledWindow::builder()
                .child(&text_view)
                .vexpand(true)
                .build(),
        );
        text_box.append(&truncated_label);
        preview_stack.add_named(&text_box, Some(VIEW_TEXT));

        let picture = gtk::Picture::builder()
            .content_fit(gtk::ContentFit::Contain)
            .build();
        preview_stack.add_named(&picture, Some(VIEW_IMAGE));

        let video = gtk::Video::builder().autoplay(false).build();
        preview_stack.add_named(&video, Some(VIEW_MEDIA));

        let metadata = gtk::ListBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .css_classes(["boxed-list"])
            .valign(gtk::Align::Start)
            .margin_start(24)
            .margin_end(24)
            .margin_top(24)
            .build();
        preview_stack.add_named(&metadata, Some(VIEW_METADATA));

        let not_found = adw::StatusPage::builder()
            .icon_name("dialog-question-symbolic")
            .title("File not found")
            .build();
        preview_stack.add_named(&not_found, Some(VIEW_NOT_FOUND));

        preview_stack.set_visible_child_name(VIEW_IDLE);

        let browser = gtk::Paned::builder()
            .orientation(gtk::Orientation::Horizontal)
            .start_child(&tree_scroller)
            .end_child(&preview_stack)
            .shrink_start_child(false)
            .position(300)
            .build();

        // Shown until a folder is chosen
        let empty = adw::StatusPage::builder()
            .icon_name("folder-symbolic")
            .title("No folder opened")
            .description("Open your project's source folder to browse and import files")
            .build();

        let body = gtk::Stack::builder().vexpand(true).build();
        body.add_named(&empty, Some("empty"));
        body.add_named(&browser, Some("browser"));
        body.set_visible_child_name("empty");

        self.append(&toolbar);
        self.append(&gtk::Separator::new(gtk::Orientation::Horizontal));
        self.append(&body);

        *imp.body.borrow_mut() = Some(body);
        *imp.root_label.borrow_mut() = Some(root_label);
        *imp.tree.borrow_mut() = Some(tree);
        *imp.move_switch.borrow_mut() = Some(move_switch);
        *imp.preview_stack.borrow_mut() = Some(preview_stack);
        *imp.text_view.borrow_mut() = Some(text_view);
        *imp.truncated_label.borrow_mut() = Some(truncated_label);
        *imp.picture.borrow_mut() = Some(picture);
        *imp.video.borrow_mut() = Some(video);
        *imp.metadata.borrow_mut() = Some(metadata);
        *imp.not_found.borrow_mut() = Some(not_found);
    }

    fn notify(&self, notice: &Notice) {
        if let Some(notifier) = self.imp().notifier.borrow().as_ref() {
            notifier(notice);
        }
    }

    fn choose_root(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Open source folder")
            .modal(true)
            .build();

        let window = self.root().and_downcast::<gtk::Window>();
        dialog.select_folder(
            window.as_ref(),
            gio::Cancellable::NONE,
            glib::clone!(@weak self as page => move |result| {
                if let Ok(Some(path)) = result.map(|folder| folder.path()) {
                    page.set_root(path);
                }
            }),
        );
    }

    /// Show `root` in the tree
    pub fn set_root(&self, root: PathBuf) {
        let imp = self.imp();
        tracing::info!("Browsing {}", root.display());

        if let Some(label) = imp.root_label.borrow().as_ref() {
            label.set_label(&root.display().to_string());
        }
        *imp.root.borrow_mut() = Some(root);
        *imp.selected.borrow_mut() = None;

        self.reload_tree();
        self.show_view(VIEW_IDLE);

        if let Some(body) = imp.body.borrow().as_ref() {
            body.set_visible_child_name("browser");
        }
    }

    fn reload_tree(&self) {
        let imp = self.imp();
        let Some(root) = imp.root.borrow().clone() else {
            return;
        };

        let entries = match import::list_tree(&root) {
            Ok(entries) => entries,
            Err(e) => {
                self.notify(&Notice::error("Cannot read folder", e.to_string()));
                Vec::new()
            }
        };

        let Some(tree) = imp.tree.borrow().clone() else {
            return;
        };
        // Clear before swapping entries so row-selected sees no stale index
        *imp.entries.borrow_mut() = Vec::new();
        while let Some(child) = tree.first_child() {
            tree.remove(&child);
        }

        for entry in &entries {
            tree.append(&tree_row(entry));
        }
        *imp.entries.borrow_mut() = entries;
    }

    fn on_row_selected(&self, index: Option<i32>) {
        let imp = self.imp();
        let entry = index
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| imp.entries.borrow().get(i).cloned());

        let Some(entry) = entry else {
            *imp.selected.borrow_mut() = None;
            return;
        };

        *imp.selected.borrow_mut() = Some(entry.path.clone());
        if !entry.is_dir {
            self.show_preview(&entry.path);
        }
    }

    fn import_dropped(&self, sources: Vec<PathBuf>) {
        let imp = self.imp();
        if sources.is_empty() {
            return;
        }
        let Some(root) = imp.root.borrow().clone() else {
            self.notify(&Notice::warning("No folder opened", "Open a source folder first"));
            return;
        };

        let target = import::resolve_target(imp.selected.borrow().as_deref(), &root);
        let mode = match imp.move_switch.borrow().as_ref() {
            Some(switch) if switch.is_active() => ImportMode::Move,
            _ => ImportMode::Copy,
        };

        match import::import_paths(&sources, &target, mode) {
            Ok(report) => {
                self.reload_tree();
                let verb = match mode {
                    ImportMode::Copy => "Copied",
                    ImportMode::Move => "Moved",
                };
                if report.is_complete() {
                    self.notify(&Notice::success(
                        "Import finished",
                        format!("{} {} item(s) to {}", verb, report.imported.len(), target.display()),
                    ));
                } else {
                    let failed: Vec<String> = report
                        .failed
                        .iter()
                        .map(|(path, reason)| format!("{}: {}", path.display(), reason))
                        .collect();
                    self.notify(&Notice::warning(
                        format!("{} {} item(s), {} failed", verb, report.imported.len(), report.failed.len()),
                        failed.join("; "),
                    ));
                }
            }
            Err(e) => self.notify(&Notice::error("Import failed", e.to_string())),
        }
    }

    fn show_view(&self, name: &str) {
        if let Some(stack) = self.imp().preview_stack.borrow().as_ref() {
            stack.set_visible_child_name(name);
        }
    }

    fn show_preview(&self, path: &Path) {
        let imp = self.imp();

        // Stop anything still playing
        if let Some(video) = imp.video.borrow().as_ref() {
            video.set_file(gio::File::NONE);
        }

        match preview::load(path) {
            Preview::Text { content, truncated } => {
                if let Some(view) = imp.text_view.borrow().as_ref() {
                    view.buffer().set_text(&content);
                }
                if let Some(label) = imp.truncated_label.borrow().as_ref() {
                    label.set_visible(truncated);
                }
                self.show_view(VIEW_TEXT);
            }
            Preview::Image(path) => {
                if let Some(picture) = imp.picture.borrow().as_ref() {
                    picture.set_filename(Some(&path));
                }
                self.show_view(VIEW_IMAGE);
            }
            Preview::Audio(path) | Preview::Video(path) => {
                if let Some(video) = imp.video.borrow().as_ref() {
                    video.set_filename(Some(&path));
                }
                self.show_view(VIEW_MEDIA);
            }
            Preview::Metadata(meta) => {
                if let Some(list) = imp.metadata.borrow().as_ref() {
                    while let Some(child) = list.first_child() {
                        list.remove(&child);
                    }
                    for (label, value) in meta.describe() {
                        let row = adw::ActionRow::builder()
                            .title(label)
                            .subtitle(glib::markup_escape_text(&value).as_str())
                            .build();
                        list.append(&row);
                    }
                }
                self.show_view(VIEW_METADATA);
            }
            Preview::NotFound(path) => {
                if let Some(status) = imp.not_found.borrow().as_ref() {
                    status.set_description(Some(&path.display().to_string()));
                }
                self.show_view(VIEW_NOT_FOUND);
            }
        }
    }
}

fn tree_row(entry: &TreeEntry) -> gtk::Box {
    let indent = entry.depth.min(32) as i32 * 16;
    let row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(6)
        .margin_start(6 + indent)
        .build();

    let icon = if entry.is_dir {
        "folder-symbolic"
    } else {
        match preview::classify(&entry.path) {
            preview::PreviewKind::Text => "text-x-generic-symbolic",
            preview::PreviewKind::Image => "image-x-generic-symbolic",
            preview::PreviewKind::Audio => "audio-x-generic-symbolic",
            preview::PreviewKind::Video => "video-x-generic-symbolic",
            preview::PreviewKind::Other => "application-x-executable-symbolic",
        }
    };
    row.append(&gtk::Image::from_icon_name(icon));
    row.append(
        &gtk::Label::builder()
            .label(entry.name.as_str())
            .xalign(0.0)
            .ellipsize(gtk::pango::EllipsizeMode::End)
            .build(),
    );
    row
}
