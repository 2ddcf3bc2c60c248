pub mod config;
pub mod service;
pub mod session;
pub mod ui_state;

pub use config::{load_settings, ClientSettings, DEFAULT_API_BASE_URL};
pub use service::{predict_endpoint, HttpPredictionService, PredictError, PredictionService};
pub use session::{FormController, PredictionSession};
pub use ui_state::{ResultVariant, ResultView, UiState};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
