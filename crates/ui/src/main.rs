use gpui::*;
use gpui_component::Root;

use askamy::app::{HOST_WINDOW_HEIGHT, HOST_WINDOW_WIDTH, HostShell, Quit, ToggleWidget};
use askamy::settings::SettingsStore;

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Asset loading via gpui-component-assets
/// 2. gpui-component and Tokio bridge initialization
/// 3. Settings and theme loading (defaults when the file is missing)
/// 4. Global action handlers and key bindings
/// 5. The host window, wrapped in Root for gpui-component composition
fn main() {
    tracing_subscriber::fmt::init();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        gpui_tokio_bridge::init(cx);
        gpui_component::init(cx);

        let settings_store = SettingsStore::load();
        let settings = settings_store.settings();
        settings.apply_theme(None, cx);
        tracing::info!(
            path = ?settings_store.config_path(),
            configured = settings.is_valid(),
            "loaded widget settings"
        );

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("ctrl-q", Quit, None),
            KeyBinding::new("cmd-k", ToggleWidget, None),
            KeyBinding::new("ctrl-k", ToggleWidget, None),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(HOST_WINDOW_WIDTH), px(HOST_WINDOW_HEIGHT)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some("Ask Amy".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                };

                let window = cx.open_window(options, |window, cx| {
                    let shell = cx.new(|cx| HostShell::new(settings, window, cx));

                    let toggle_target = shell.downgrade();
                    cx.on_action(move |_: &ToggleWidget, cx| {
                        let _ = toggle_target.update(cx, |shell, cx| shell.toggle_widget(cx));
                    });

                    cx.new(|cx| Root::new(shell, window, cx))
                });
                if let Err(error) = window {
                    tracing::error!("failed to open main window: {}", error);
                    cx.quit();
                    return;
                }

                cx.activate(true);
            })
        })
        .detach();
    });
}
