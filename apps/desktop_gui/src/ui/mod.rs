//! UI layer for desktop GUI: the assessment form and its result card.

pub mod app;
pub mod theme;

pub use app::AssessmentApp;
