//! Full-screen views.

mod report_form;
mod result;

pub use report_form::{ReportFormAction, ReportFormView};
pub use result::{ResultAction, ResultView};
