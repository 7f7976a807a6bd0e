use pulse_core::AnalysisPipeline;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub pipeline: AnalysisPipeline,
}
