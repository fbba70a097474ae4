//! Aerofoil profile files and their two storage conventions
//!
//! A profile file is plain text: the first line is the display name, every
//! following line holds whitespace-separated coordinate pairs. Two
//! incompatible conventions exist in the wild and are told apart by the
//! first coordinate value:
//!
//! - **Lednicer**: the first pair is a two-side point-count header (upper
//!   then lower); the upper and lower blocks follow in that order, each
//!   running leading edge to trailing edge. The lower block is reversed and
//!   concatenated onto the upper so the profile becomes one closed loop.
//! - **Selig**: the list is already a single continuous loop starting at the
//!   trailing edge and is used as-is.
//!
//! Any other leading value is ambiguous and rejected, naming the file.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Storage convention of an aerofoil profile file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoilFormat {
    /// Single continuous loop starting at the trailing edge
    Selig,
    /// Separate upper/lower blocks with a point-count header
    Lednicer,
}

/// A 2D aerofoil profile normalized to a single closed-loop point list
#[derive(Debug, Clone, PartialEq)]
pub struct AerofoilProfile {
    /// Display name from the file's first line, trimmed
    pub name: String,
    /// File the profile was read from
    pub path: PathBuf,
    /// Detected storage convention
    pub format: FoilFormat,
    /// Upper-surface point count
    pub upper_count: usize,
    /// Lower-surface point count
    pub lower_count: usize,
    /// Normalized coordinate loop
    pub points: Vec<(f64, f64)>,
}

/// Classify a profile file by its first coordinate value
///
/// A positive integer greater than 1 is a Lednicer point-count header; a
/// value that rounds to 1.00 at two decimal places is the leading abscissa
/// of a Selig loop. Anything else is ambiguous.
fn classify_header(first: f64) -> Option<FoilFormat> {
    if first > 1.0 && (first - first.round()).abs() < 1e-9 {
        Some(FoilFormat::Lednicer)
    } else if (first * 100.0).round() == 100.0 {
        Some(FoilFormat::Selig)
    } else {
        None
    }
}

impl AerofoilProfile {
    /// Read and parse one profile file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_text(path, &contents)
    }

    /// Parse profile file contents
    ///
    /// `path` is used for error reporting and kept on the profile.
    pub fn from_text(path: &Path, contents: &str) -> Result<Self> {
        let file = path.display().to_string();
        let malformed = |reason: String| Error::MalformedProfile {
            file: file.clone(),
            reason,
        };

        let mut lines = contents.lines();
        let name = lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| malformed("file is empty".to_string()))?
            .to_string();

        let mut values = Vec::new();
        for line in lines {
            for token in line.split_whitespace() {
                let value = token
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("'{}' is not a coordinate value", token)))?;
                values.push(value);
            }
        }
        if values.is_empty() {
            return Err(malformed("no coordinate pairs after the name line".to_string()));
        }
        if values.len() % 2 != 0 {
            return Err(malformed("odd number of coordinate values".to_string()));
        }
        let pairs: Vec<(f64, f64)> = values.chunks(2).map(|c| (c[0], c[1])).collect();

        let (first, second) = pairs[0];
        match classify_header(first) {
            Some(FoilFormat::Lednicer) => {
                if second < 1.0 || (second - second.round()).abs() > 1e-9 {
                    return Err(malformed(format!(
                        "'{}' is not a lower-surface point count",
                        second
                    )));
                }
                let upper_count = first as usize;
                let lower_count = second as usize;
                let data = &pairs[1..];
                if data.len() < upper_count + lower_count {
                    return Err(malformed(format!(
                        "header promises {} points but only {} are present",
                        upper_count + lower_count,
                        data.len()
                    )));
                }
                // Upper block stays, lower block is reversed, the two join
                // into one closed loop
                let mut points = Vec::with_capacity(upper_count + lower_count);
                points.extend_from_slice(&data[..upper_count]);
                points.extend(data[upper_count..upper_count + lower_count].iter().rev());
                Ok(AerofoilProfile {
                    name,
                    path: path.to_path_buf(),
                    format: FoilFormat::Lednicer,
                    upper_count,
                    lower_count,
                    points,
                })
            }
            Some(FoilFormat::Selig) => {
                // Already one continuous loop; no side split exists, so both
                // counts carry the full loop length
                let count = pairs.len();
                Ok(AerofoilProfile {
                    name,
                    path: path.to_path_buf(),
                    format: FoilFormat::Selig,
                    upper_count: count,
                    lower_count: count,
                    points: pairs,
                })
            }
            None => Err(malformed(format!(
                "leading value '{}' matches neither the Selig nor the Lednicer convention",
                first
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header() {
        assert_eq!(classify_header(1.0), Some(FoilFormat::Selig));
        assert_eq!(classify_header(1.00132), Some(FoilFormat::Selig));
        assert_eq!(classify_header(0.995), Some(FoilFormat::Selig));
        assert_eq!(classify_header(61.0), Some(FoilFormat::Lednicer));
        assert_eq!(classify_header(2.0), Some(FoilFormat::Lednicer));
        assert_eq!(classify_header(0.5), None);
        assert_eq!(classify_header(-1.0), None);
        assert_eq!(classify_header(61.3), None);
    }

    #[test]
    fn test_parse_selig_loop() {
        let text = "TEST FOIL\n1.0 0.0\n0.5 0.1\n0.0 0.0\n0.5 -0.1\n1.0 0.0\n";
        let profile = AerofoilProfile::from_text(Path::new("test.dat"), text).unwrap();
        assert_eq!(profile.format, FoilFormat::Selig);
        assert_eq!(profile.name, "TEST FOIL");
        assert_eq!(profile.points.len(), 5);
        assert_eq!(profile.upper_count, 5);
        assert_eq!(profile.lower_count, 5);
        assert_eq!(profile.points[0], (1.0, 0.0));
    }

    #[test]
    fn test_parse_lednicer_reverses_lower_block() {
        let text = "TEST FOIL\n3. 2.\n0.0 0.0\n0.5 0.1\n1.0 0.0\n0.0 0.0\n1.0 -0.05\n";
        let profile = AerofoilProfile::from_text(Path::new("test.dat"), text).unwrap();
        assert_eq!(profile.format, FoilFormat::Lednicer);
        assert_eq!(profile.upper_count, 3);
        assert_eq!(profile.lower_count, 2);
        assert_eq!(
            profile.points,
            vec![
                (0.0, 0.0),
                (0.5, 0.1),
                (1.0, 0.0),
                (1.0, -0.05),
                (0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_ambiguous_header_is_rejected() {
        let text = "BROKEN\n0.5 0.0\n0.25 0.1\n";
        let err = AerofoilProfile::from_text(Path::new("broken.dat"), text).unwrap_err();
        assert!(matches!(err, Error::MalformedProfile { file, .. } if file.contains("broken.dat")));
    }
}
