//! Widgets shared across views.

mod input;
mod loading;
mod modal;
mod notification;
mod text_editor;

pub(crate) use modal::centered_rect;

pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use modal::{ErrorDialog, NoticeDialog};
pub use notification::NotificationManager;
pub use text_editor::TextEditor;
