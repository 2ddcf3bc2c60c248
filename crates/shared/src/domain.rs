use serde::{Deserialize, Serialize};

/// The eight attributes collected by the assessment form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "hypertension")]
    Hypertension,
    #[serde(rename = "heart_disease")]
    HeartDisease,
    #[serde(rename = "smoking_history")]
    SmokingHistory,
    #[serde(rename = "bmi")]
    Bmi,
    #[serde(rename = "HbA1c_level")]
    Hba1cLevel,
    #[serde(rename = "blood_glucose_level")]
    BloodGlucoseLevel,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Gender,
        FormField::Age,
        FormField::Hypertension,
        FormField::HeartDisease,
        FormField::SmokingHistory,
        FormField::Bmi,
        FormField::Hba1cLevel,
        FormField::BloodGlucoseLevel,
    ];

    /// Key used on the wire and by the form controls.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Gender => "gender",
            FormField::Age => "age",
            FormField::Hypertension => "hypertension",
            FormField::HeartDisease => "heart_disease",
            FormField::SmokingHistory => "smoking_history",
            FormField::Bmi => "bmi",
            FormField::Hba1cLevel => "HbA1c_level",
            FormField::BloodGlucoseLevel => "blood_glucose_level",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Gender => "Gender",
            FormField::Age => "Age",
            FormField::Hypertension => "Hypertension",
            FormField::HeartDisease => "Heart Disease",
            FormField::SmokingHistory => "Smoking History",
            FormField::Bmi => "BMI",
            FormField::Hba1cLevel => "Glycated Hemoglobin (%)",
            FormField::BloodGlucoseLevel => "Blood Glucose Level (mg/dL)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Gender => "Select Gender",
            FormField::Age => "Enter Age",
            FormField::Hypertension | FormField::HeartDisease | FormField::SmokingHistory => {
                "Select"
            }
            FormField::Bmi => "Enter BMI",
            FormField::Hba1cLevel => "Enter HbA1c Level",
            FormField::BloodGlucoseLevel => "Enter Blood Glucose Level",
        }
    }

    /// Input constraint enforced by the presentation layer.
    pub fn constraint(self) -> FieldConstraint {
        match self {
            FormField::Gender => FieldConstraint::OneOf(GENDER_OPTIONS),
            FormField::SmokingHistory => FieldConstraint::OneOf(SMOKING_HISTORY_OPTIONS),
            FormField::Hypertension | FormField::HeartDisease => {
                FieldConstraint::OneOf(YES_NO_OPTIONS)
            }
            FormField::Age => FieldConstraint::Number(NumberRange::whole(0.0, 100.0)),
            FormField::Bmi => FieldConstraint::Number(NumberRange::decimal(10.0, 60.0)),
            FormField::Hba1cLevel => FieldConstraint::Number(NumberRange::decimal(3.0, 15.0)),
            FormField::BloodGlucoseLevel => {
                FieldConstraint::Number(NumberRange::whole(50.0, 400.0))
            }
        }
    }
}

/// A selectable value and the text shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const YES_NO_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "0",
        label: "No",
    },
    SelectOption {
        value: "1",
        label: "Yes",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
    pub whole_only: bool,
}

impl NumberRange {
    const fn whole(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            whole_only: true,
        }
    }

    const fn decimal(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            whole_only: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldConstraint {
    OneOf(&'static [SelectOption]),
    Number(NumberRange),
}

pub const GENDER_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "Male",
        label: "Male",
    },
    SelectOption {
        value: "Female",
        label: "Female",
    },
    SelectOption {
        value: "Other",
        label: "Other",
    },
];

pub const SMOKING_HISTORY_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "never",
        label: "Never",
    },
    SelectOption {
        value: "No Info",
        label: "No Info",
    },
    SelectOption {
        value: "current",
        label: "Current",
    },
    SelectOption {
        value: "former",
        label: "Former",
    },
];
