use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// a single raw feature value before categorical encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// numeric reading of this value. text is accepted when it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Float(f) => Some(*f),
            FeatureValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// the string form used as a category key. floats keep a trailing `.0`
    /// when integral, matching how category tables were written at training time.
    pub fn category_label(&self) -> String {
        match self {
            FeatureValue::Integer(i) => i.to_string(),
            FeatureValue::Float(f) => float_label(*f),
            FeatureValue::Text(s) => s.clone(),
        }
    }
}

fn float_label(value: f64) -> String {
    if value.is_nan() {
        String::from("nan")
    } else if value.is_infinite() {
        if value > 0.0 {
            String::from("inf")
        } else {
            String::from("-inf")
        }
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.category_label())
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        FeatureValue::Integer(value as i64)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_float() {
        assert_eq!(FeatureValue::Float(3.0).category_label(), "3.0");
        assert_eq!(FeatureValue::Float(293.15).category_label(), "293.15");
        assert_eq!(FeatureValue::Float(f64::NAN).category_label(), "nan");
    }

    #[test]
    fn test_category_label_integer_and_text() {
        assert_eq!(FeatureValue::Integer(4).category_label(), "4");
        assert_eq!(FeatureValue::from("Rain").category_label(), "Rain");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FeatureValue::Integer(2).as_number(), Some(2.0));
        assert_eq!(FeatureValue::from("5").as_number(), Some(5.0));
        assert_eq!(FeatureValue::from("Monday").as_number(), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<FeatureValue> = serde_json::from_str(r#"[3, 2.5, "Sunday"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FeatureValue::Integer(3),
                FeatureValue::Float(2.5),
                FeatureValue::Text(String::from("Sunday"))
            ]
        );
    }
}
