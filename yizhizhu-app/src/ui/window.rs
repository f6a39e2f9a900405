//! Main Window - Sidebar navigation shell
//!
//! Hosts the wizard ("Home"), the manual, the code browser and the settings
//! page in a stack driven by a sidebar. Toasts for every page are shown in
//! one overlay.

use crate::ui::app::YizhizhuApplication;
use crate::ui::code::CodePage;
use crate::ui::manual::ManualPage;
use crate::ui::settings::SettingsPage;
use crate::ui::wizard::WizardView;
use crate::ui::{open_copyright_center, overlay_notifier, Notifier};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::{gio, glib};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use yizhizhu_common::config::SettingsService;

mod imp {
    use super::*;

    #[derive(Default, gtk::CompositeTemplate)]
    #[template(string = r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <interface>
            <template class="YizhizhuMainWindow" parent="AdwApplicationWindow">
                <property name="default-width">1080</property>
                <property name="default-height">720</property>
                <property name="title">Yizhizhu - Software Copyright Filing Assistant</property>
                <property name="content">
                    <object class="AdwToastOverlay" id="toast_overlay">
                        <property name="child">
                            <object class="GtkBox">
                                <property name="orientation">vertical</property>
                                <child>
                                    <object class="AdwHeaderBar">
                                        <child type="end">
                                            <object class="GtkButton" id="center_button">
                                                <property name="icon-name">web-browser-symbolic</property>
                                                <property name="tooltip-text">Copyright registration center</property>
                                            </object>
                                        </child>
                                    </object>
                                </child>
                                <child>
                                    <object class="GtkBox">
                                        <property name="orientation">horizontal</property>
                                        <property name="vexpand">true</property>
                                        <child>
                                            <object class="GtkStackSidebar" id="sidebar">
                                                <property name="width-request">150</property>
                                                <property name="stack">stack</property>
                                            </object>
                                        </child>
                                        <child>
                                            <object class="GtkSeparator">
                                                <property name="orientation">vertical</property>
                                            </object>
                                        </child>
                                        <child>
                                            <object class="GtkStack" id="stack">
                                                <property name="hexpand">true</property>
                                                <property name="vexpand">true</property>
                                                <property name="transition-type">crossfade</property>
                                            </object>
                                        </child>
                                    </object>
                                </child>
                            </object>
                        </property>
                    </object>
                </property>
            </template>
        </interface>
    "#)]
    pub struct MainWindow {
        #[template_child]
        pub toast_overlay: TemplateChild<adw::ToastOverlay>,

        #[template_child]
        pub stack: TemplateChild<gtk::Stack>,

        #[template_child]
        pub center_button: TemplateChild<gtk::Button>,

        pub wizard: RefCell<Option<WizardView>>,
        pub code_page: RefCell<Option<CodePage>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for MainWindow {
        const NAME: &'static str = "YizhizhuMainWindow";
        type Type = super::MainWindow;
        type ParentType = adw::ApplicationWindow;

        fn class_init(klass: &mut Self::Class) {
            klass.bind_template();
        }

        fn instance_init(obj: &glib::subclass::InitializingObject<Self>) {
            obj.init_template();
        }
    }

    impl ObjectImpl for MainWindow {
        fn constructed(&self) {
            self.parent_constructed();

            let window = self.obj();
            self.center_button.connect_clicked(glib::clone!(
                @weak window =>
                move |_| {
                    window.open_copyright_center();
                }
            ));
        }
    }

    impl WidgetImpl for MainWindow {}
    impl WindowImpl for MainWindow {}
    impl ApplicationWindowImpl for MainWindow {}
    impl AdwApplicationWindowImpl for MainWindow {}
}

glib::wrapper! {
    pub struct MainWindow(ObjectSubclass<imp::MainWindow>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap, gtk::Accessible, gtk::Buildable,
                    gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl MainWindow {
    pub fn new(
        app: &YizhizhuApplication,
        settings: Rc<RefCell<SettingsService>>,
        workspace: Option<PathBuf>,
    ) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .build();

        window.setup_pages(settings, workspace);
        window
    }

    fn setup_pages(&self, settings: Rc<RefCell<SettingsService>>, workspace: Option<PathBuf>) {
        let imp = self.imp();
        let notifier = self.notifier();

        let wizard = WizardView::new(notifier.clone());
        imp.stack.add_titled(&wizard, Some("home"), "Home");

        let manual = ManualPage::new();
        imp.stack.add_titled(&manual, Some("manual"), "Manual");

        let code_page = CodePage::new(notifier.clone(), workspace);
        imp.stack.add_titled(&code_page, Some("code"), "Source code");

        let settings_page = SettingsPage::new(settings, notifier);
        imp.stack.add_titled(&settings_page, Some("settings"), "Settings");

        imp.stack.set_visible_child_name("home");

        *imp.wizard.borrow_mut() = Some(wizard);
        *imp.code_page.borrow_mut() = Some(code_page);
    }

    /// Notifier bound to this window's toast overlay
    pub fn notifier(&self) -> Notifier {
        overlay_notifier(&self.imp().toast_overlay)
    }

    fn open_copyright_center(&self) {
        open_copyright_center(Some(self.upcast_ref()), self.notifier());
    }
}
