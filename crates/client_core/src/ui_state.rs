//! Display state of the assessment form and how a result is presented.

/// The single active display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(String),
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn result_label(&self) -> Option<&str> {
        match self {
            UiState::Result(label) => Some(label),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Predicting..."
        } else {
            "Predict Diabetes"
        }
    }
}

pub const DIABETIC_LABEL: &str = "Diabetic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultVariant {
    Diabetic,
    Clear,
}

/// A result label paired with its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultView<'a> {
    pub label: &'a str,
    pub variant: ResultVariant,
}

impl<'a> ResultView<'a> {
    /// Only the exact `"Diabetic"` label selects the diabetic variant.
    pub fn for_label(label: &'a str) -> Self {
        let variant = if label == DIABETIC_LABEL {
            ResultVariant::Diabetic
        } else {
            ResultVariant::Clear
        };
        Self { label, variant }
    }

    pub fn heading(&self) -> &'static str {
        "Prediction Result"
    }

    pub fn advice(&self) -> &'static str {
        match self.variant {
            ResultVariant::Diabetic => {
                "You may be diabetic. Please consult a healthcare provider."
            }
            ResultVariant::Clear => "You show no signs of diabetes. Maintain a healthy lifestyle.",
        }
    }
}
