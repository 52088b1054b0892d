/// Report rendering adapters
mod html_report_renderer;
mod template;

pub use html_report_renderer::HtmlReportRenderer;
pub use template::{ReportTemplate, TemplateError};
