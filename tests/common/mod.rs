// tests/common/mod.rs
//! Synthetic instrument files for round-trip testing. The text layout and
//! numeric formatting mirror what the instrument itself writes, so parsing
//! and re-serializing must reproduce these bytes exactly.

use byteorder::{BigEndian, WriteBytesExt};

/// Header padding boundary declared via `WritingPosition (byte)`.
pub const WRITE_POS: usize = 1024;

/// Encode a header line the way the instrument does: Latin-1 with the
/// substring `deg` collapsed to the degree byte 0xB0.
pub fn latin1(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut rest = s;
    while let Some(idx) = rest.find("deg") {
        out.extend(rest[..idx].chars().map(|c| c as u8));
        out.push(0xB0);
        rest = &rest[idx + 3..];
    }
    out.extend(rest.chars().map(|c| c as u8));
    out
}

pub fn push_block(out: &mut Vec<u8>, rows: u32, cols: u32, seed: i32) {
    out.write_u32::<BigEndian>(rows).unwrap();
    out.write_u32::<BigEndian>(cols).unwrap();
    for i in 0..(rows * cols) as i32 {
        out.write_i32::<BigEndian>(seed.wrapping_add(i * 13)).unwrap();
    }
}

/// Build a complete synthetic raw file: one blind block of dims `(2, 5)` and
/// one `(4, 5)` data block per entry of `times` (`HH-MM-SS` strings).
pub fn synthetic_file(date: &str, times: &[&str], seed: i32) -> Vec<u8> {
    let n = times.len();
    let join = |decimals: usize, base: f64, step: f64| -> String {
        (0..n)
            .map(|i| format!("{:.*}", decimals, base + step * i as f64))
            .collect::<Vec<_>>()
            .join("\t")
    };

    let mut text = String::new();
    text += "[ConfigSoftware]\r\n";
    text += "Version=1.12.0\r\n";
    text += &format!("DateRun={date}\r\n");
    text += &format!("NbOfProfilesPerFile={n}\r\n");
    text += "PRF (Hz)=10\r\n";
    text += "NumberOfShot=100\r\n";
    text += "NumberOfSignal=2\r\n";
    text += "Wave length (nm)=355\r\n";
    text += &format!("WritingPosition (byte)={WRITE_POS}\r\n");
    text += "VARIABLES=Altitude (m)\tLongitude (deg)\tLatitude (deg)\tPressure (hPa)\t\
             Temperature (degC)\tAngleAzimuth\tAngleZenith\r\n";
    text += &format!("Altitude (m)={}\r\n", join(6, 1000.0, 10.0));
    text += &format!("Longitude (deg)={}\r\n", join(6, -1.25, 0.0001));
    text += &format!("Latitude (deg)={}\r\n", join(6, 51.5, 0.0001));
    text += &format!("Pressure (hPa)={}\r\n", join(1, 900.0, -0.1));
    text += &format!("Temperature (degC)={}\r\n", join(1, 15.0, 0.1));
    text += &format!("AngleAzimuth={}\r\n", join(1, 0.0, 0.0));
    text += &format!("AngleZenith={}\r\n", join(1, 180.0, 0.0));
    text += "[InfoBlindRef]\r\n";
    text += "NumberOfSignal=1000\r\n";
    text += "gain0=1.000000000\r\n";
    text += "gain1=2.000000000\r\n";
    text += "[infoRaw]\r\n";
    text += "NumberOfSignal=1000\r\n";
    text += "gain0=1.500000000\r\n";
    text += "gain1=2.500000000\r\n";

    let mut out = latin1(&text);
    assert!(out.len() < WRITE_POS, "header overflows writing position");
    out.resize(WRITE_POS, 0);

    push_block(&mut out, 2, 5, seed);
    for (i, t) in times.iter().enumerate() {
        assert_eq!(t.len(), 8);
        out.extend_from_slice(t.as_bytes());
        push_block(&mut out, 4, 5, seed.wrapping_add(100 * (i as i32 + 1)));
    }
    out
}
