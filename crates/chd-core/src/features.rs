//! Patient input types and feature vector assembly.
//!
//! The classifier was trained on a fixed twelve-column schema. The column
//! order in [`FEATURE_NAMES`] is the training order; assembly must emit
//! values in exactly that order. Categorical fields encode as
//! No/Female → 0 and Yes/Male → 1. No scaling or imputation happens here —
//! any preprocessing is baked into the model artifact.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub const FEATURE_COUNT: usize = 12;

/// Training-time column order. Must match the `feature_names` list carried
/// by the model artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "male",
    "age",
    "education",
    "cigsPerDay",
    "BPMeds",
    "prevalentStroke",
    "prevalentHyp",
    "diabetes",
    "totChol",
    "BMI",
    "heartRate",
    "glucose",
];

/// Patient sex. Encodes as Female → 0, Male → 1 (the `male` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn encoded(self) -> f64 {
        match self {
            Sex::Female => 0.0,
            Sex::Male => 1.0,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            _ => Err(format!("Unknown sex: {s}. Use 'Female' or 'Male'.")),
        }
    }
}

/// Binary yes/no answer. Encodes as No → 0, Yes → 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    pub fn encoded(self) -> f64 {
        match self {
            YesNo::No => 0.0,
            YesNo::Yes => 1.0,
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::No => write!(f, "No"),
            YesNo::Yes => write!(f, "Yes"),
        }
    }
}

impl FromStr for YesNo {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" => Ok(YesNo::No),
            "yes" => Ok(YesNo::Yes),
            _ => Err(format!("Unknown answer: {s}. Use 'No' or 'Yes'.")),
        }
    }
}

// Cohort files exported from the training side store categoricals either as
// the survey strings ("Yes"/"Male") or as the already-encoded 0/1 integers;
// accept both on input, emit the strings on output.

impl Serialize for Sex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SexVisitor;

        impl Visitor<'_> for SexVisitor {
            type Value = Sex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"Female\", \"Male\", 0 or 1")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Sex, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Sex, E> {
                match v {
                    0 => Ok(Sex::Female),
                    1 => Ok(Sex::Male),
                    _ => Err(E::custom(format!("sex code out of range: {v}"))),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Sex, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("sex code out of range: {v}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(SexVisitor)
    }
}

impl Serialize for YesNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct YesNoVisitor;

        impl Visitor<'_> for YesNoVisitor {
            type Value = YesNo;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"No\", \"Yes\", 0 or 1")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<YesNo, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<YesNo, E> {
                match v {
                    0 => Ok(YesNo::No),
                    1 => Ok(YesNo::Yes),
                    _ => Err(E::custom(format!("yes/no code out of range: {v}"))),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<YesNo, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("yes/no code out of range: {v}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(YesNoVisitor)
    }
}

/// Education level code, 1–4. Stays an integer category in the feature
/// vector rather than a continuous measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Education(u8);

impl Education {
    pub const ALL: [Education; 4] = [Education(1), Education(2), Education(3), Education(4)];

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn encoded(self) -> f64 {
        f64::from(self.0)
    }

    pub fn describe(self) -> &'static str {
        match self.0 {
            1 => "Some High School",
            2 => "High School/GED",
            3 => "Some College/Vocational",
            _ => "College/Post-Grad",
        }
    }
}

impl TryFrom<u8> for Education {
    type Error = String;
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if (1..=4).contains(&code) {
            Ok(Education(code))
        } else {
            Err(format!("education code out of range: {code} (expected 1-4)"))
        }
    }
}

impl From<Education> for u8 {
    fn from(e: Education) -> u8 {
        e.0
    }
}

impl FromStr for Education {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u8 = s
            .parse()
            .map_err(|_| format!("invalid education code: {s}"))?;
        Education::try_from(code)
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw patient input with the field names the training dataset uses.
/// The typed fields make an absent or malformed value unrepresentable, so
/// assembly itself cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "male")]
    pub sex: Sex,
    pub age: f64,
    pub education: Education,
    #[serde(rename = "cigsPerDay")]
    pub cigs_per_day: f64,
    #[serde(rename = "BPMeds")]
    pub bp_meds: YesNo,
    #[serde(rename = "prevalentStroke")]
    pub prevalent_stroke: YesNo,
    #[serde(rename = "prevalentHyp")]
    pub prevalent_hyp: YesNo,
    pub diabetes: YesNo,
    #[serde(rename = "totChol")]
    pub total_cholesterol: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "heartRate")]
    pub heart_rate: f64,
    pub glucose: f64,
}

impl PatientRecord {
    /// Assemble the fixed-order feature vector for this record.
    pub fn to_features(&self) -> FeatureVector {
        FeatureVector([
            self.sex.encoded(),
            self.age,
            self.education.encoded(),
            self.cigs_per_day,
            self.bp_meds.encoded(),
            self.prevalent_stroke.encoded(),
            self.prevalent_hyp.encoded(),
            self.diabetes.encoded(),
            self.total_cholesterol,
            self.bmi,
            self.heart_rate,
            self.glucose,
        ])
    }
}

impl Default for PatientRecord {
    /// Form defaults: a 45-year-old female non-smoker with unremarkable
    /// physiological measures.
    fn default() -> Self {
        Self {
            sex: Sex::Female,
            age: 45.0,
            education: Education(2),
            cigs_per_day: 0.0,
            bp_meds: YesNo::No,
            prevalent_stroke: YesNo::No,
            prevalent_hyp: YesNo::No,
            diabetes: YesNo::No,
            total_cholesterol: 200.0,
            bmi: 25.0,
            heart_rate: 70.0,
            glucose: 85.0,
        }
    }
}

/// Twelve numeric values in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_iter(self.0)
    }

    /// Pair each value with its column name, in schema order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_record() -> PatientRecord {
        PatientRecord {
            sex: Sex::Male,
            age: 63.0,
            education: Education::try_from(2).unwrap(),
            cigs_per_day: 0.0,
            bp_meds: YesNo::No,
            prevalent_stroke: YesNo::No,
            prevalent_hyp: YesNo::Yes,
            diabetes: YesNo::No,
            total_cholesterol: 205.0,
            bmi: 28.5,
            heart_rate: 72.0,
            glucose: 90.0,
        }
    }

    #[test]
    fn assembly_follows_schema_order() {
        let features = example_record().to_features();
        assert_eq!(
            features.values(),
            &[1.0, 63.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 205.0, 28.5, 72.0, 90.0]
        );
    }

    #[test]
    fn named_values_line_up_with_feature_names() {
        let features = example_record().to_features();
        let named: Vec<_> = features.named().collect();
        assert_eq!(named.len(), FEATURE_COUNT);
        assert_eq!(named[0], ("male", 1.0));
        assert_eq!(named[6], ("prevalentHyp", 1.0));
        assert_eq!(named[11], ("glucose", 90.0));
    }

    #[test]
    fn categorical_encodings_are_total() {
        for sex in [Sex::Female, Sex::Male] {
            assert!(sex.encoded() == 0.0 || sex.encoded() == 1.0);
        }
        for answer in [YesNo::No, YesNo::Yes] {
            assert!(answer.encoded() == 0.0 || answer.encoded() == 1.0);
        }
        assert_eq!(Sex::Female.encoded(), 0.0);
        assert_eq!(Sex::Male.encoded(), 1.0);
        assert_eq!(YesNo::No.encoded(), 0.0);
        assert_eq!(YesNo::Yes.encoded(), 1.0);
    }

    #[test]
    fn categorical_from_str_is_case_insensitive() {
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("MALE".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("yes".parse::<YesNo>().unwrap(), YesNo::Yes);
        assert_eq!("No".parse::<YesNo>().unwrap(), YesNo::No);
        assert!("maybe".parse::<YesNo>().is_err());
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn education_rejects_out_of_range_codes() {
        assert!(Education::try_from(0).is_err());
        assert!(Education::try_from(5).is_err());
        assert_eq!(Education::try_from(4).unwrap().code(), 4);
        assert_eq!(Education::ALL.len(), 4);
    }

    #[test]
    fn record_round_trips_with_dataset_field_names() {
        let record = example_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["male"], "Male");
        assert_eq!(json["prevalentHyp"], "Yes");
        assert_eq!(json["totChol"], 205.0);
        assert_eq!(json["BMI"], 28.5);

        let back: PatientRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_accepts_encoded_categoricals() {
        let json = serde_json::json!({
            "male": 1,
            "age": 63.0,
            "education": 2,
            "cigsPerDay": 0.0,
            "BPMeds": 0,
            "prevalentStroke": 0,
            "prevalentHyp": 1,
            "diabetes": 0,
            "totChol": 205.0,
            "BMI": 28.5,
            "heartRate": 72.0,
            "glucose": 90.0
        });
        let record: PatientRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record, example_record());
    }

    #[test]
    fn record_rejects_bad_education() {
        let json = serde_json::json!({
            "male": "Female",
            "age": 50.0,
            "education": 9,
            "cigsPerDay": 0.0,
            "BPMeds": "No",
            "prevalentStroke": "No",
            "prevalentHyp": "No",
            "diabetes": "No",
            "totChol": 200.0,
            "BMI": 25.0,
            "heartRate": 70.0,
            "glucose": 85.0
        });
        assert!(serde_json::from_value::<PatientRecord>(json).is_err());
    }
}
