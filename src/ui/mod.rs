//! Terminal user interface.
//!
//! Split into reusable widgets under [`components`] and full screens
//! under [`views`].

pub mod components;
pub mod views;

pub use components::{ErrorDialog, NoticeDialog, NotificationManager};
pub use views::{ReportFormAction, ReportFormView, ResultAction, ResultView};
