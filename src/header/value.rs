// src/header/value.rs
use smallvec::SmallVec;

/// A parsed header field value.
///
/// Values are coerced element-wise in the order integer, float, string.
/// Tab-separated values whose elements are all numeric become a sequence; a
/// single element collapses to a scalar. Multi-element values with any
/// non-numeric element keep the raw string, which preserves them byte-exactly
/// through a round trip (the `VARIABLES` name list is the common case).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    FloatSeq(SmallVec<[f64; 8]>),
    Str(String),
}

impl FieldValue {
    /// Coerce one raw value string (the text after `=`, tabs included).
    pub fn coerce(raw: &str) -> FieldValue {
        let mut parts = raw.split('\t');
        let first = parts.next().unwrap_or("");
        let Some(second) = parts.next() else {
            return Self::coerce_scalar(first);
        };

        let mut seq = SmallVec::new();
        for part in [first, second].into_iter().chain(parts) {
            match Self::coerce_scalar(part) {
                FieldValue::Int(i) => seq.push(i as f64),
                FieldValue::Float(f) => seq.push(f),
                _ => return FieldValue::Str(raw.to_string()),
            }
        }
        FieldValue::FloatSeq(seq)
    }

    fn coerce_scalar(part: &str) -> FieldValue {
        if let Ok(i) = part.parse::<i64>() {
            return FieldValue::Int(i);
        }
        if let Ok(f) = part.parse::<f64>() {
            return FieldValue::Float(f);
        }
        FieldValue::Str(part.to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[f64]> {
        match self {
            FieldValue::FloatSeq(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_coercion_order() {
        assert_eq!(FieldValue::coerce("100"), FieldValue::Int(100));
        assert_eq!(FieldValue::coerce("100.000000"), FieldValue::Float(100.0));
        assert_eq!(
            FieldValue::coerce("1.12.0"),
            FieldValue::Str("1.12.0".to_string())
        );
        assert_eq!(FieldValue::coerce(""), FieldValue::Str(String::new()));
    }

    #[test]
    fn test_numeric_sequence() {
        let v = FieldValue::coerce("1.5\t2\t-3.25");
        assert_eq!(v.as_seq().unwrap(), &[1.5, 2.0, -3.25]);
    }

    #[test]
    fn test_mixed_sequence_keeps_raw_string() {
        let raw = "Altitude (m)\tLongitude (deg)";
        assert_eq!(FieldValue::coerce(raw), FieldValue::Str(raw.to_string()));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Int(5).as_i64(), Some(5));
        assert_eq!(FieldValue::Float(5.0).as_i64(), Some(5));
        assert_eq!(FieldValue::Float(5.5).as_i64(), None);
        assert_eq!(FieldValue::Int(5).as_f64(), Some(5.0));
        assert_eq!(FieldValue::Str("x".into()).as_f64(), None);
    }
}
