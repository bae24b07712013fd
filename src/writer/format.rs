// src/writer/format.rs
use crate::header::FieldValue;

/// Per-profile variables emitted after the `VARIABLES` field, in wire order.
pub const PROFILE_VARIABLES: [&str; 7] = [
    "Altitude (m)",
    "Longitude (deg)",
    "Latitude (deg)",
    "Pressure (hPa)",
    "Temperature (degC)",
    "AngleAzimuth",
    "AngleZenith",
];

/// Decimal places the instrument writes for a given header field.
///
/// Geodetic coordinates carry six places, environment readings and angles
/// one, counts and configuration words none, everything else nine.
pub fn field_decimals(name: &str) -> usize {
    match name {
        "Altitude (m)" | "Longitude (deg)" | "Latitude (deg)" => 6,
        "Pressure (hPa)" | "Temperature (degC)" | "Humidity (%)" | "AngleAzimuth"
        | "AngleZenith" => 1,
        "AnglesNB AA" | "AnglesNB ZA" | "NumberOfShot" | "Wave length (nm)" | "PRF (Hz)"
        | "Port" | "LineSeparator" | "DecimalSeparator" | "NbOfProfilesPerFile" | "DataCodage"
        | "WritingPosition (byte)" | "NumberOfSignal" | "HeaderSize" | "ID ALS" => 0,
        _ => 9,
    }
}

/// Fixed-point rendering of one numeric value.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Render a field value the way the instrument writes it: strings verbatim,
/// numbers fixed-point, sequences tab-joined.
pub fn format_value(value: &FieldValue, decimals: usize) -> String {
    match value {
        FieldValue::Str(s) => s.clone(),
        FieldValue::Int(i) => format_number(*i as f64, decimals),
        FieldValue::Float(f) => format_number(*f, decimals),
        FieldValue::FloatSeq(seq) => seq
            .iter()
            .map(|&v| format_number(v, decimals))
            .collect::<Vec<_>>()
            .join("\t"),
    }
}
