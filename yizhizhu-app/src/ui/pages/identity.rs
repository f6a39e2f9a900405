//! Identity Page - First step of the wizard
//!
//! Two clickable cards (applicant / agent). Clicking a card emits
//! `identity-selected` and the wizard moves on immediately.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use yizhizhu_common::form::Identity;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct IdentityPage {}

    #[glib::object_subclass]
    impl ObjectSubclass for IdentityPage {
        const NAME: &'static str = "YizhizhuIdentityPage";
        type Type = super::IdentityPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for IdentityPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![glib::subclass::Signal::builder("identity-selected")
                    .param_types([String::static_type()])
                    .build()]
            })
        }
    }

    impl WidgetImpl for IdentityPage {}
    impl BoxImpl for IdentityPage {}
}

glib::wrapper! {
    pub struct IdentityPage(ObjectSubclass<imp::IdentityPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

/// Stable name carried by the `identity-selected` signal
pub fn identity_name(identity: Identity) -> &'static str {
    match identity {
        Identity::Applicant => "applicant",
        Identity::Agent => "agent",
    }
}

pub fn identity_from_name(name: &str) -> Option<Identity> {
    Identity::ALL.into_iter().find(|i| identity_name(*i) == name)
}

impl IdentityPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 16)
            .property("valign", gtk::Align::Center)
            .property("vexpand", true)
            .build()
    }

    fn setup_ui(&self) {
        let title = gtk::Label::builder()
            .label("Who is filing this application?")
            .css_classes(["title-2"])
            .build();

        let cards = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(24)
            .halign(gtk::Align::Center)
            .margin_top(16)
            .build();

        for identity in Identity::ALL {
            cards.append(&self.build_card(identity));
        }

        self.append(&title);
        self.append(&cards);
    }

    fn build_card(&self, identity: Identity) -> gtk::Button {
        let content = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(8)
            .margin_top(24)
            .margin_bottom(24)
            .margin_start(24)
            .margin_end(24)
            .build();

        let icon_name = match identity {
            Identity::Applicant => "avatar-default-symbolic",
            Identity::Agent => "system-users-symbolic",
        };
        content.append(&gtk::Image::builder().icon_name(icon_name).pixel_size(48).build());
        content.append(
            &gtk::Label::builder()
                .label(identity.label())
                .css_classes(["title-3"])
                .build(),
        );
        content.append(
            &gtk::Label::builder()
                .label(identity.description())
                .wrap(true)
                .max_width_chars(24)
                .justify(gtk::Justification::Center)
                .css_classes(["dim-label"])
                .build(),
        );

        let card = gtk::Button::builder()
            .child(&content)
            .width_request(240)
            .css_classes(["card", "identity-card"])
            .build();

        card.connect_clicked(glib::clone!(
            @weak self as page =>
            move |_| {
                page.emit_by_name::<()>("identity-selected", &[&identity_name(identity).to_string()]);
            }
        ));

        card
    }
}

impl Default for IdentityPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_name_round_trip() {
        for identity in Identity::ALL {
            assert_eq!(identity_from_name(identity_name(identity)), Some(identity));
        }
        assert_eq!(identity_from_name("someone"), None);
    }
}
