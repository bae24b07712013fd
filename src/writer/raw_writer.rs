// src/writer/raw_writer.rs
use crate::archive::{BoundArchive, FileRecord};
use crate::error::{RawError, Result};
use crate::header::{FieldValue, Header};
use crate::utils::latin1::encode_header_line;
use crate::utils::timecode::{encode_time, fmt_utc, slice_filename};
use crate::writer::{field_decimals, format_number, format_value, PROFILE_VARIABLES};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Sections re-emitted verbatim after the global configuration.
const INFO_SECTIONS: [&str; 2] = ["InfoBlindRef", "infoRaw"];

/// Serialize one blind scope of the archive back to the instrument's wire
/// format.
///
/// `start..stop` must be a range produced by
/// [`BoundArchive::record_ranges`]. Two fields are substituted at write
/// time: `NbOfProfilesPerFile` becomes the slice's actual profile count and
/// `DateRun` the UTC date of its first profile. Everything else round-trips
/// byte-exactly from the governing file's header under the fixed per-field
/// format table.
pub fn write_slice<W: Write + Seek>(
    archive: &BoundArchive,
    start: usize,
    stop: usize,
    out: &mut W,
) -> Result<()> {
    let record = archive.record_for(start);
    let header = &record.header;
    let config = header
        .section(Header::CONFIG)
        .ok_or_else(|| RawError::MissingField(Header::CONFIG.to_string()))?;

    write_line(out, &format!("[{}]", Header::CONFIG))?;
    for (name, value) in config.iter() {
        let decimals = field_decimals(name);
        let text = match name {
            "NbOfProfilesPerFile" => format_number((stop - start) as f64, decimals),
            "DateRun" => fmt_utc(archive.time(start), "%Y-%m-%d")?,
            _ => format_value(value, decimals),
        };
        write_line(out, &format!("{name}={text}"))?;
        if name == "VARIABLES" {
            write_variables(record, start, stop, out)?;
        }
    }

    for section_name in INFO_SECTIONS {
        write_line(out, &format!("[{section_name}]"))?;
        if let Some(section) = header.section(section_name) {
            for (name, value) in section.iter() {
                let text = format_value(value, field_decimals(name));
                write_line(out, &format!("{name}={text}"))?;
            }
        }
    }

    match config.get("WritingPosition (byte)").and_then(|v| v.as_i64()) {
        Some(pos) if pos > 0 => {
            out.seek(SeekFrom::Start(pos as u64))?;
        }
        _ => {}
    }

    record.blind.write_to(out)?;
    for p in start..stop {
        let profile = archive.profile(p);
        out.write_all(&encode_time(profile.time)?)?;
        profile.block.write_to(out)?;
    }
    Ok(())
}

/// Emit one line per auxiliary variable with its values across the slice.
fn write_variables<W: Write>(
    record: &FileRecord,
    start: usize,
    stop: usize,
    out: &mut W,
) -> Result<()> {
    let lo = start - record.start;
    let hi = stop - record.start;
    for name in PROFILE_VARIABLES {
        let value = record
            .header
            .section("VARIABLES")
            .and_then(|s| s.get(name))
            .ok_or_else(|| RawError::MissingField(format!("VARIABLES.{name}")))?;
        let decimals = field_decimals(name);
        let text = match value {
            FieldValue::FloatSeq(seq) => {
                let vals = seq.get(lo..hi).ok_or_else(|| {
                    RawError::MissingField(format!(
                        "VARIABLES.{name} covers {} profiles, slice needs {hi}",
                        seq.len()
                    ))
                })?;
                vals.iter()
                    .map(|&v| format_number(v, decimals))
                    .collect::<Vec<_>>()
                    .join("\t")
            }
            FieldValue::Float(f) => format_number(*f, decimals),
            FieldValue::Int(i) => format_number(*i as f64, decimals),
            FieldValue::Str(_) => {
                return Err(RawError::MissingField(format!(
                    "VARIABLES.{name} is not numeric"
                )))
            }
        };
        write_line(out, &format!("{name}={text}"))?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(&encode_header_line(line))?;
    out.write_all(b"\r\n")?;
    Ok(())
}

/// Reconstruct one raw file per blind scope under `folder`, named
/// `_<start date-time>_<end time>.raw` from the slice's first and last
/// timestamps.
///
/// A formatting failure aborts only the file being written (its partial
/// output is removed); files already emitted stay on disk.
pub fn rebuild_raw(archive: &BoundArchive, folder: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let folder = folder.as_ref();
    let mut written = Vec::new();
    for (start, stop) in archive.record_ranges() {
        if start == stop {
            continue;
        }
        let name = slice_filename(archive.time(start), archive.time(stop - 1))?;
        let path = folder.join(name);
        let result = File::create(&path).map_err(RawError::from).and_then(|f| {
            let mut out = BufWriter::new(f);
            write_slice(archive, start, stop, &mut out)?;
            out.flush()?;
            Ok(())
        });
        if let Err(err) = result {
            fs::remove_file(&path).ok();
            return Err(err);
        }
        info!("rebuilt {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_data::{Profile, RawBlock};
    use crate::reader::RawFile;
    use smallvec::smallvec;
    use std::io::Cursor;

    fn archive_one_file() -> BoundArchive {
        let mut header = Header::new();
        let cfg = header.section_mut(Header::CONFIG);
        cfg.insert("Version", FieldValue::Str("1.12.0".into()));
        cfg.insert("DateRun", FieldValue::Str("2020-01-01".into()));
        cfg.insert("NbOfProfilesPerFile", FieldValue::Int(2));
        cfg.insert(
            "VARIABLES",
            FieldValue::Str(PROFILE_VARIABLES.join("\t")),
        );
        let vars = header.section_mut("VARIABLES");
        for name in PROFILE_VARIABLES {
            vars.insert(name, FieldValue::FloatSeq(smallvec![1.0, 2.0]));
        }
        header
            .section_mut("InfoBlindRef")
            .insert("gain0", FieldValue::Float(1.0));

        let blind = RawBlock::new(2, 3, vec![0; 6]);
        let profiles = vec![
            Profile::new(1577836801, RawBlock::new(4, 3, (0..12).collect())),
            Profile::new(1577836802, RawBlock::new(4, 3, (12..24).collect())),
        ];
        let mut archive = BoundArchive::new();
        archive
            .append(RawFile {
                header,
                blind,
                profiles,
            })
            .unwrap();
        archive
    }

    #[test]
    fn test_slice_text_layout() {
        let archive = archive_one_file();
        let mut out = Cursor::new(Vec::new());
        write_slice(&archive, 0, 2, &mut out).unwrap();
        let bytes = out.into_inner();

        let text_end = bytes.len() - (8 + 6 * 4) - 2 * (8 + 8 + 12 * 4);
        let text = String::from_utf8_lossy(&bytes[..text_end]).into_owned();
        assert!(text.starts_with("[ConfigSoftware]\r\n"));
        assert!(text.contains("Version=1.12.0\r\n"));
        assert!(text.contains("DateRun=2020-01-01\r\n"));
        assert!(text.contains("NbOfProfilesPerFile=2\r\n"));
        // degree byte re-encoded in variable names
        let mut deg_line = b"Longitude (".to_vec();
        deg_line.push(0xB0);
        deg_line.extend_from_slice(b")=1.000000\t2.000000\r\n");
        assert!(bytes
            .windows(deg_line.len())
            .any(|w| w == &deg_line[..]));
        assert!(text.contains("Pressure (hPa)=1.0\t2.0\r\n"));
        assert!(text.contains("[InfoBlindRef]\r\ngain0=1.000000000\r\n"));
        assert!(text.contains("[infoRaw]\r\n"));
    }

    #[test]
    fn test_nb_of_profiles_substitution() {
        let archive = archive_one_file();
        let mut out = Cursor::new(Vec::new());
        // a one-profile sub-slice is re-declared as such
        write_slice(&archive, 0, 1, &mut out).unwrap();
        let text = String::from_utf8_lossy(out.get_ref()).into_owned();
        assert!(text.contains("NbOfProfilesPerFile=1\r\n"));
        assert!(text.contains("Altitude (m)=1.000000\r\n"));
    }

    #[test]
    fn test_missing_variable_is_error() {
        let mut archive = archive_one_file();
        // rebuild an archive whose VARIABLES section lacks AngleZenith
        let mut header = archive.records()[0].header.clone();
        let mut stripped = Header::new();
        for (sname, section) in header.iter() {
            for (fname, value) in section.iter() {
                if fname != "AngleZenith" {
                    stripped.section_mut(sname).insert(fname, value.clone());
                }
            }
        }
        header = stripped;
        let blind = archive.records()[0].blind.clone();
        let profiles = vec![archive.profile(0).clone(), archive.profile(1).clone()];
        archive = BoundArchive::new();
        archive
            .append(RawFile {
                header,
                blind,
                profiles,
            })
            .unwrap();

        let mut out = Cursor::new(Vec::new());
        assert!(matches!(
            write_slice(&archive, 0, 2, &mut out),
            Err(RawError::MissingField(_))
        ));
    }
}
