pub mod llm_service;
pub mod report_presenter;

pub use llm_service::LlmService;
pub use report_presenter::{ReportPresenter, VerdictTally};
