//! Bridges service notices onto the webview's toast channel.

use tauri::{AppHandle, Emitter};
use wam_core::{Notice, Notifier};

/// Event name the frontend toast listener subscribes to.
pub const NOTICE_EVENT: &str = "console-notice";

/// Notifier that emits every notice as a Tauri event.
pub struct EventNotifier {
  app: AppHandle,
}

impl EventNotifier {
  pub fn new(app: AppHandle) -> Self {
    Self { app }
  }
}

impl Notifier for EventNotifier {
  fn notify(&self, notice: Notice) {
    let _ = self.app.emit(NOTICE_EVENT, notice);
  }
}
