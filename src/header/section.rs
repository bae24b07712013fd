// src/header/section.rs
use crate::error::{RawError, Result};
use crate::header::FieldValue;

/// One named header section: an insertion-ordered field map.
///
/// Field counts are small (a few tens at most), so lookups stay linear over
/// the ordered pair list rather than keeping a side index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    fields: Vec<(String, FieldValue)>,
}

impl Section {
    pub fn new() -> Self {
        Section { fields: Vec::new() }
    }

    /// Insert a field, replacing in place when the name already exists so a
    /// re-assignment does not disturb the on-disk order.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The decoded text preamble of a raw file: named sections in file order.
///
/// Uppercase-only section names (`VARIABLES`) and the synthetic
/// `ConfigSoftware` section hold global configuration; lowercase and mixed
/// names (`infoRaw`, `InfoBlindRef`) hold per-block metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    sections: Vec<(String, Section)>,
}

impl Header {
    /// Name of the global configuration section.
    pub const CONFIG: &'static str = "ConfigSoftware";

    pub fn new() -> Self {
        Header {
            sections: Vec::new(),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Get a section, creating an empty one at the end when absent.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        if let Some(idx) = self.sections.iter().position(|(n, _)| n == name) {
            return &mut self.sections[idx].1;
        }
        self.sections.push((name.to_string(), Section::new()));
        &mut self.sections.last_mut().unwrap().1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn field(&self, section: &str, name: &str) -> Result<&FieldValue> {
        self.section(section)
            .and_then(|s| s.get(name))
            .ok_or_else(|| RawError::MissingField(format!("{section}.{name}")))
    }

    /// Integer field lookup, accepting integral floats.
    pub fn int_field(&self, section: &str, name: &str) -> Result<i64> {
        self.field(section, name)?
            .as_i64()
            .ok_or_else(|| RawError::MissingField(format!("{section}.{name} is not an integer")))
    }

    pub fn float_field(&self, section: &str, name: &str) -> Result<f64> {
        self.field(section, name)?
            .as_f64()
            .ok_or_else(|| RawError::MissingField(format!("{section}.{name} is not numeric")))
    }

    pub fn str_field(&self, section: &str, name: &str) -> Result<&str> {
        self.field(section, name)?
            .as_str()
            .ok_or_else(|| RawError::MissingField(format!("{section}.{name} is not a string")))
    }

    /// Firmware version folded into one orderable number:
    /// `10000*major + 100*minor + patch`.
    pub fn firmware_number(&self) -> Result<u32> {
        let version = self.str_field(Self::CONFIG, "Version")?;
        let mut parts = version.split('.').map(|p| p.parse::<u32>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch))) => {
                Ok(10000 * major + 100 * minor + patch)
            }
            _ => Err(RawError::MalformedHeader(format!(
                "unparseable Version value {version:?}"
            ))),
        }
    }
}
