use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A number coerced from a form input.
///
/// Integral values go on the wire as JSON integers, fractional values as JSON
/// floats and non-finite values (an unparseable input) as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNumber(pub f64);

impl JsonNumber {
    /// Coerces raw input text: surrounding whitespace is ignored, blank text
    /// is zero and anything unparseable becomes NaN.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self(0.0);
        }
        Self(trimmed.parse::<f64>().unwrap_or(f64::NAN))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if !value.is_finite() {
            serializer.serialize_none()
        } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for JsonNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self(value.unwrap_or(f64::NAN)))
    }
}

/// `1` when the flag input holds exactly `"1"`, otherwise `0`.
pub fn coerce_flag(raw: &str) -> u8 {
    u8::from(raw == "1")
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub gender: String,
    pub age: JsonNumber,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub smoking_history: String,
    pub bmi: JsonNumber,
    #[serde(rename = "HbA1c_level")]
    pub hba1c_level: JsonNumber,
    pub blood_glucose_level: JsonNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub result: String,
}
