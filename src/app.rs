// Storefront - app.rs
// Copyright (C) 2025  Storefront contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use adw::prelude::*;
use adw::subclass::prelude::*;
use gio::subclass::prelude::ApplicationImpl;
use glib::clone;
use gtk::glib::WeakRef;
use gtk::{gio, glib};

use crate::config;
use crate::i18n::{i18n, i18n_f};
use crate::observable::Subscription;
use crate::transaction::{
    ApplicationMap, Entry, EntryGroup, EntryKind, EntrySource, Icon, OpPayload, StateInfo,
    Transaction, TransactionKind, TransactionTask, WindowContext,
};
use crate::ui::{SfAsyncTexture, SfScreenshot, SfTransactionView};

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct SfApplication {
        window: OnceCell<WeakRef<adw::ApplicationWindow>>,
        stack: OnceCell<adw::ViewStack>,
        screenshot: OnceCell<SfScreenshot>,
        transaction_view: OnceCell<SfTransactionView>,
        transaction_subscription: RefCell<Option<Subscription>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SfApplication {
        const NAME: &'static str = "SfApplication";
        type ParentType = adw::Application;
        type Type = super::SfApplication;
    }

    impl ObjectImpl for SfApplication {}

    impl GtkApplicationImpl for SfApplication {}

    impl AdwApplicationImpl for SfApplication {}

    impl ApplicationImpl for SfApplication {
        fn startup(&self) {
            self.parent_startup();
            debug!("Application -> startup");

            let obj = self.obj();

            let actions = [
                gio::ActionEntryBuilder::new("quit")
                    .activate(|app: &super::SfApplication, _, _| {
                        for window in app.windows() {
                            window.close();
                        }
                    })
                    .build(),
                gio::ActionEntryBuilder::new("open")
                    .activate(|app: &super::SfApplication, _, _| {
                        app.imp().show_open_dialog();
                    })
                    .build(),
                gio::ActionEntryBuilder::new("restart-transaction")
                    .activate(|app: &super::SfApplication, _, _| {
                        if let Some(view) = app.imp().transaction_view.get() {
                            run_demo_transaction(view);
                        }
                    })
                    .build(),
            ];
            obj.add_action_entries(actions);

            obj.set_accels_for_action("app.quit", &["<primary>q"]);
            obj.set_accels_for_action("app.open", &["<primary>o"]);
            obj.set_accels_for_action("app.restart-transaction", &["<primary>r"]);
        }

        fn activate(&self) {
            self.parent_activate();
            debug!("Application -> activate");

            // If the window already exists, present it instead creating a new one again.
            if let Some(window) = self.app_window() {
                window.present();
                info!("Application window presented.");
                return;
            }

            let window = self.create_window();
            let _ = self.window.set(window.downgrade());
            info!("Created application window.");

            if let Some(view) = self.transaction_view.get() {
                run_demo_transaction(view);
            }
        }

        fn open(&self, files: &[gio::File], hint: &str) {
            self.parent_open(files, hint);
            debug!("Application -> open");

            self.obj().activate();

            let Some(file) = files.first() else {
                return;
            };
            if files.len() > 1 {
                warn!("Only the first of {} files gets displayed", files.len());
            }

            let texture = SfAsyncTexture::new(file);
            texture.load();

            if let Some(screenshot) = self.screenshot.get() {
                screenshot.set_paintable(Some(texture.upcast_ref()));
            }
            if let Some(stack) = self.stack.get() {
                stack.set_visible_child_name("screenshot");
            }
        }
    }

    impl SfApplication {
        fn app_window(&self) -> Option<adw::ApplicationWindow> {
            self.window.get().and_then(WeakRef::upgrade)
        }

        fn create_window(&self) -> adw::ApplicationWindow {
            let window = adw::ApplicationWindow::new(&*self.obj());
            window.set_title(Some(config::NAME));
            window.set_default_size(720, 640);

            // Add devel style class for development builds
            if config::PROFILE == "development" {
                window.add_css_class("devel");
            }

            let stack = adw::ViewStack::new();

            let screenshot = SfScreenshot::new();
            screenshot.set_margin_top(24);
            screenshot.set_margin_bottom(24);
            screenshot.set_margin_start(24);
            screenshot.set_margin_end(24);
            screenshot.set_valign(gtk::Align::Center);

            let theme = gtk::IconTheme::for_display(&WidgetExt::display(&window));
            let placeholder = theme.lookup_icon(
                "image-x-generic",
                &[],
                256,
                1,
                gtk::TextDirection::None,
                gtk::IconLookupFlags::empty(),
            );
            screenshot.set_paintable(Some(placeholder.upcast_ref()));

            stack.add_titled_with_icon(
                &screenshot,
                Some("screenshot"),
                &i18n("Screenshot"),
                "image-x-generic-symbolic",
            );

            let toasts = adw::ToastOverlay::new();

            let transaction_view = SfTransactionView::new();
            transaction_view.set_margin_top(24);
            transaction_view.set_margin_bottom(24);
            transaction_view.set_margin_start(12);
            transaction_view.set_margin_end(12);
            transaction_view.set_window_context(Some(Rc::new(DemoWindow::new(&toasts))));

            let subscription = transaction_view.connect_transaction_notify(|view| {
                match view.transaction() {
                    Some(transaction) => debug!("Displaying transaction {:?}", transaction.name()),
                    None => debug!("No transaction displayed"),
                }
            });
            *self.transaction_subscription.borrow_mut() = Some(subscription);

            let clamp = adw::Clamp::new();
            clamp.set_child(Some(&transaction_view));
            let scrolled_window = gtk::ScrolledWindow::new();
            scrolled_window.set_child(Some(&clamp));

            stack.add_titled_with_icon(
                &scrolled_window,
                Some("transaction"),
                &i18n("Transaction"),
                "folder-download-symbolic",
            );

            let switcher = adw::ViewSwitcher::new();
            switcher.set_stack(Some(&stack));
            switcher.set_policy(adw::ViewSwitcherPolicy::Wide);

            let open_button = gtk::Button::from_icon_name("document-open-symbolic");
            open_button.set_action_name(Some("app.open"));
            open_button.set_tooltip_text(Some(&i18n("Open Screenshot")));

            let header = adw::HeaderBar::new();
            header.set_title_widget(Some(&switcher));
            header.pack_start(&open_button);

            let toolbar_view = adw::ToolbarView::new();
            toolbar_view.add_top_bar(&header);
            toolbar_view.set_content(Some(&stack));

            toasts.set_child(Some(&toolbar_view));
            window.set_content(Some(&toasts));

            let _ = self.stack.set(stack);
            let _ = self.screenshot.set(screenshot);
            let _ = self.transaction_view.set(transaction_view);

            window.present();
            window
        }

        fn show_open_dialog(&self) {
            let filter = gtk::FileFilter::new();
            filter.set_name(Some(&i18n("Images")));
            filter.add_pixbuf_formats();

            let filters = gio::ListStore::new::<gtk::FileFilter>();
            filters.append(&filter);

            let dialog = gtk::FileDialog::new();
            dialog.set_title(&i18n("Open Screenshot"));
            dialog.set_modal(true);
            dialog.set_filters(Some(&filters));

            dialog.open(
                self.app_window().as_ref(),
                gio::Cancellable::NONE,
                clone!(
                    #[weak(rename_to = this)]
                    self,
                    move |result| match result {
                        Ok(file) => this.obj().open(&[file], ""),
                        Err(err) => debug!("No file opened: {}", err),
                    }
                ),
            );
        }
    }
}

glib::wrapper! {
    pub struct SfApplication(ObjectSubclass<imp::SfApplication>)
        @extends gio::Application, gtk::Application, adw::Application,
        @implements gio::ActionMap, gio::ActionGroup;
}

impl SfApplication {
    pub fn run() -> glib::ExitCode {
        debug!(
            "{} ({}) - Version {} ({})",
            config::NAME,
            config::APP_ID,
            config::VERSION,
            config::PROFILE
        );

        let app: Self = glib::Object::builder()
            .property("application-id", Some(config::APP_ID))
            .property("flags", gio::ApplicationFlags::HANDLES_OPEN)
            .build();

        // Start running gtk::Application
        app.run()
    }
}

/// Window context of the demo: groups come from a fixed application map,
/// showing one raises a toast.
struct DemoWindow {
    info: Rc<StateInfo>,
    toasts: adw::ToastOverlay,
}

impl DemoWindow {
    fn new(toasts: &adw::ToastOverlay) -> Self {
        let mut map = ApplicationMap::new();
        map.insert(EntryGroup::new(
            "org.gnome.Maps",
            "Maps",
            Some(Icon::Named("org.gnome.Maps".into())),
        ));
        map.insert(EntryGroup::new("org.gnome.Platform", "GNOME Platform", None));

        Self {
            info: Rc::new(StateInfo::new(Rc::new(map))),
            toasts: toasts.clone(),
        }
    }
}

impl WindowContext for DemoWindow {
    fn state_info(&self) -> Option<Rc<StateInfo>> {
        Some(self.info.clone())
    }

    fn show_group(&self, group: &Rc<EntryGroup>) {
        let toast = adw::Toast::new(&i18n_f("Showing “{}”", &[group.title()]));
        self.toasts.add_toast(toast);
    }
}

struct DemoStep {
    entry_id: &'static str,
    op: OpPayload,
    error: Option<&'static str>,
}

/// Displays a made up transaction in `view` and advances it on a timer.
fn run_demo_transaction(view: &SfTransactionView) {
    let transaction = Rc::new(Transaction::new("demo"));

    transaction.add_entry(
        Entry::new("org.gnome.Platform", EntryKind::RUNTIME).with_title("GNOME Platform"),
        TransactionKind::Update,
    );
    transaction.add_entry(
        Entry::new("org.gnome.Maps", EntryKind::APPLICATION).with_title("Maps"),
        TransactionKind::Install,
    );
    transaction.add_entry(
        Entry::new("org.gnome.Maps.Locale", EntryKind::ADDON)
            .with_title("Maps Translations")
            .with_extension_of("app/org.gnome.Maps/x86_64/stable"),
        TransactionKind::Install,
    );
    transaction.add_entry(
        Entry::new("org.example.Legacy", EntryKind::APPLICATION)
            .with_title("Legacy <Tool>")
            .with_source(EntrySource::Other),
        TransactionKind::Remove,
    );

    view.set_transaction(Some(transaction.clone()));

    let steps = vec![
        DemoStep {
            entry_id: "org.gnome.Platform",
            op: OpPayload::new("runtime/org.gnome.Platform/x86_64/47", 180_000_000, 520_000_000),
            error: None,
        },
        DemoStep {
            entry_id: "org.gnome.Maps",
            op: OpPayload::new(
                "runtime/org.freedesktop.Platform.GL.default/x86_64/24.08",
                90_000_000,
                310_000_000,
            ),
            error: None,
        },
        DemoStep {
            entry_id: "org.gnome.Maps",
            op: OpPayload::new("app/org.gnome.Maps/x86_64/stable", 12_000_000, 40_000_000),
            error: None,
        },
        DemoStep {
            entry_id: "org.gnome.Maps.Locale",
            op: OpPayload::new("runtime/org.gnome.Maps.Locale/x86_64/stable", 2_000_000, 6_000_000),
            error: None,
        },
        DemoStep {
            entry_id: "org.example.Legacy",
            op: OpPayload::new("app/org.example.Legacy/x86_64/stable", 0, 25_000_000),
            error: Some("Application is currently running"),
        },
    ];

    let mut steps = steps.into_iter();
    let mut current: Option<(Rc<TransactionTask>, Option<&'static str>)> = None;

    glib::timeout_add_local(Duration::from_millis(150), move || {
        if current.is_none() {
            match steps.next() {
                Some(step) => {
                    let task = transaction.start_task(step.entry_id, Some(step.op));
                    current = Some((task, step.error));
                }
                None => {
                    transaction.finish();
                    info!("Demo transaction finished");
                    return glib::ControlFlow::Break;
                }
            }
        }

        if let Some((task, error)) = current.take() {
            let progress = (task.progress() + 0.1).min(1.0);
            let bytes = task
                .op()
                .map_or(0, |op| (op.download_size as f64 * progress) as u64);
            transaction.update_task(&task, progress, bytes);

            if progress >= 1.0 || (error.is_some() && progress >= 0.5) {
                transaction.finish_task(&task, error);
            } else {
                current = Some((task, error));
            }
        }

        glib::ControlFlow::Continue
    });
}
