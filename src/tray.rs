use tray_icon::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    TrayIcon, TrayIconBuilder,
};

pub const SHOW_ID: &str = "show";
pub const QUIT_ID: &str = "quit";

/// builds the tray icon with its Show/Quit menu.
///
/// returns `None` when the session has no tray surface, the clock keeps
/// running without one.
pub fn setup() -> Option<TrayIcon> {
    let menu = Menu::new();
    let show = MenuItem::with_id(SHOW_ID, "Show", true, None);
    let quit = MenuItem::with_id(QUIT_ID, "Quit", true, None);
    let _ = menu.append(&show);
    let _ = menu.append(&PredefinedMenuItem::separator());
    let _ = menu.append(&quit);

    match TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip("Chime")
        .with_icon(icon()?)
        .build()
    {
        Ok(tray) => Some(tray),
        Err(err) => {
            log::warn!("couldn't build tray icon: {err}");
            None
        }
    }
}

/// a plain 16x16 clock-orange square, enough for a tray glyph
fn icon() -> Option<tray_icon::Icon> {
    let mut rgba = vec![0u8; 16 * 16 * 4];
    for pixel in rgba.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[0xff, 0x98, 0x00, 0xff]);
    }
    match tray_icon::Icon::from_rgba(rgba, 16, 16) {
        Ok(icon) => Some(icon),
        Err(err) => {
            log::warn!("couldn't build tray icon image: {err}");
            None
        }
    }
}

/// transient desktop popup, used for alarm-fired and minimized-to-tray
pub fn notify(summary: &str, body: &str) {
    if let Err(err) = notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .show()
    {
        log::warn!("couldn't show notification: {err}");
    }
}
