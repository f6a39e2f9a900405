//! Radio groups with explanatory-only options
//!
//! Unsupported options stay clickable so users can see why they are not
//! available. Picking one shows a notice and snaps back to the supported
//! value after `REVERT_DELAY`. The pending timer is removed whenever the
//! selection changes again or the group is torn down.

use crate::ui::Notifier;
use gtk::glib;
use gtk::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use yizhizhu_common::revert::{DeferredRevert, SupportedChoice, REVERT_DELAY};

struct Inner<T: SupportedChoice> {
    buttons: Vec<(T, gtk::CheckButton)>,
    revert: RefCell<DeferredRevert<T>>,
    timer: RefCell<Option<glib::SourceId>>,
}

impl<T: SupportedChoice> Inner<T> {
    fn stop_timer(&self) {
        if let Some(source) = self.timer.borrow_mut().take() {
            source.remove();
        }
    }

    fn button_for(&self, value: T) -> Option<&gtk::CheckButton> {
        self.buttons.iter().find(|(v, _)| *v == value).map(|(_, b)| b)
    }
}

/// A horizontal group of radio buttons bound to one option set
pub struct ChoiceGroup<T: SupportedChoice + 'static> {
    container: gtk::Box,
    inner: Rc<Inner<T>>,
}

impl<T: SupportedChoice + std::fmt::Debug + 'static> ChoiceGroup<T> {
    /// `on_change` receives every effective selection, including reverts.
    pub fn new(
        options: &[T],
        label: fn(T) -> &'static str,
        notifier: Notifier,
        on_change: impl Fn(T) + 'static,
    ) -> Self {
        let container = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(12)
            .build();

        let mut buttons: Vec<(T, gtk::CheckButton)> = Vec::with_capacity(options.len());
        for &option in options {
            let button = gtk::CheckButton::builder()
                .label(label(option))
                .active(option.is_supported())
                .build();
            if let Some((_, first)) = buttons.first() {
                button.set_group(Some(first));
            }
            container.append(&button);
            buttons.push((option, button));
        }

        let inner = Rc::new(Inner {
            buttons,
            revert: RefCell::new(DeferredRevert::new()),
            timer: RefCell::new(None),
        });
        let on_change: Rc<dyn Fn(T)> = Rc::new(on_change);

        for (value, button) in &inner.buttons {
            let value = *value;
            let weak = Rc::downgrade(&inner);
            let notifier = notifier.clone();
            let on_change = on_change.clone();

            button.connect_toggled(move |button| {
                if !button.is_active() {
                    return;
                }
                let Some(inner) = weak.upgrade() else {
                    return;
                };

                on_change(value);
                inner.stop_timer();

                let scheduled = inner.revert.borrow_mut().select(value);
                if let Some((ticket, notice)) = scheduled {
                    notifier(&notice);

                    let weak = Rc::downgrade(&inner);
                    let source = glib::timeout_add_local_once(REVERT_DELAY, move || {
                        let Some(inner) = weak.upgrade() else {
                            return;
                        };
                        // The source is finished once this runs
                        inner.timer.borrow_mut().take();

                        let restored = inner.revert.borrow_mut().fire(ticket);
                        if let Some(restored) = restored {
                            tracing::debug!("Reverting selection to {:?}", restored);
                            if let Some(button) = inner.button_for(restored) {
                                button.set_active(true);
                            }
                        }
                    });
                    *inner.timer.borrow_mut() = Some(source);
                }
            });
        }

        Self { container, inner }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }

    /// Make an option unclickable (for options disabled outright)
    pub fn set_option_sensitive(&self, value: T, sensitive: bool) {
        if let Some(button) = self.inner.button_for(value) {
            button.set_sensitive(sensitive);
        }
    }

    /// Show `value` as selected
    pub fn set_selected(&self, value: T) {
        if let Some(button) = self.inner.button_for(value) {
            if !button.is_active() {
                button.set_active(true);
            }
        }
    }

    pub fn grab_focus(&self) {
        if let Some(button) = self
            .inner
            .buttons
            .iter()
            .find(|(_, b)| b.is_active())
            .map(|(_, b)| b)
        {
            button.grab_focus();
        }
    }

    /// Drop any pending revert
    pub fn cancel(&self) {
        self.inner.stop_timer();
        self.inner.revert.borrow_mut().cancel();
    }
}
