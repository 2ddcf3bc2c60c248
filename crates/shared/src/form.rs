use crate::{
    domain::{FieldConstraint, FormField},
    error::{FieldViolation, ViolationKind},
    protocol::{coerce_flag, JsonNumber, PredictionRequest},
};

/// Raw values of the assessment form, exactly as the controls hold them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub gender: String,
    pub age: String,
    pub hypertension: String,
    pub heart_disease: String,
    pub smoking_history: String,
    pub bmi: String,
    pub hba1c_level: String,
    pub blood_glucose_level: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Gender => &self.gender,
            FormField::Age => &self.age,
            FormField::Hypertension => &self.hypertension,
            FormField::HeartDisease => &self.heart_disease,
            FormField::SmokingHistory => &self.smoking_history,
            FormField::Bmi => &self.bmi,
            FormField::Hba1cLevel => &self.hba1c_level,
            FormField::BloodGlucoseLevel => &self.blood_glucose_level,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Gender => &mut self.gender,
            FormField::Age => &mut self.age,
            FormField::Hypertension => &mut self.hypertension,
            FormField::HeartDisease => &mut self.heart_disease,
            FormField::SmokingHistory => &mut self.smoking_history,
            FormField::Bmi => &mut self.bmi,
            FormField::Hba1cLevel => &mut self.hba1c_level,
            FormField::BloodGlucoseLevel => &mut self.blood_glucose_level,
        }
    }

    /// Replaces one field's value. Nothing is checked here.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn set_gender(&mut self, value: impl Into<String>) {
        self.gender = value.into();
    }

    pub fn set_age(&mut self, value: impl Into<String>) {
        self.age = value.into();
    }

    pub fn set_hypertension(&mut self, value: impl Into<String>) {
        self.hypertension = value.into();
    }

    pub fn set_heart_disease(&mut self, value: impl Into<String>) {
        self.heart_disease = value.into();
    }

    pub fn set_smoking_history(&mut self, value: impl Into<String>) {
        self.smoking_history = value.into();
    }

    pub fn set_bmi(&mut self, value: impl Into<String>) {
        self.bmi = value.into();
    }

    pub fn set_hba1c_level(&mut self, value: impl Into<String>) {
        self.hba1c_level = value.into();
    }

    pub fn set_blood_glucose_level(&mut self, value: impl Into<String>) {
        self.blood_glucose_level = value.into();
    }

    /// Snapshot of the form as the typed request body.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            gender: self.gender.clone(),
            age: JsonNumber::coerce(&self.age),
            hypertension: coerce_flag(&self.hypertension),
            heart_disease: coerce_flag(&self.heart_disease),
            smoking_history: self.smoking_history.clone(),
            bmi: JsonNumber::coerce(&self.bmi),
            hba1c_level: JsonNumber::coerce(&self.hba1c_level),
            blood_glucose_level: JsonNumber::coerce(&self.blood_glucose_level),
        }
    }

    /// Checks one field against its input constraint.
    pub fn check(&self, field: FormField) -> Option<ViolationKind> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Some(ViolationKind::Missing);
        }

        match field.constraint() {
            FieldConstraint::OneOf(options) => {
                if options.iter().any(|option| option.value == raw) {
                    None
                } else {
                    Some(ViolationKind::NotAnOption)
                }
            }
            FieldConstraint::Number(range) => {
                let Ok(value) = raw.parse::<f64>() else {
                    return Some(ViolationKind::NotANumber);
                };
                if !value.is_finite() {
                    Some(ViolationKind::NotANumber)
                } else if !range.contains(value) {
                    Some(ViolationKind::OutOfRange {
                        min: range.min,
                        max: range.max,
                    })
                } else if range.whole_only && value.fract() != 0.0 {
                    Some(ViolationKind::NotAWholeNumber)
                } else {
                    None
                }
            }
        }
    }

    /// Every violated field, in form order.
    pub fn violations(&self) -> Vec<FieldViolation> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| {
                self.check(field)
                    .map(|kind| FieldViolation::new(field, kind))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
