//! Minimal WFDB record reader
//!
//! Reads the `<name>.hea` / `<name>.dat` pair for a record and extracts the
//! directly measured leads the service serves back (aVR, aVL, aVF, V1-V6).
//! Only single-file records in signal format 16 (little-endian 16-bit,
//! channel interleaved) are decoded.

use crate::error::{EcgError, EcgResult};
use crate::leads::{Lead, LeadSet, Signal};
use std::path::Path;

/// Default ADC gain when the header specifies none (WFDB convention)
const DEFAULT_GAIN: f64 = 200.0;

/// Default sampling frequency when the header specifies none (WFDB convention)
const DEFAULT_SAMPLING_RATE: f64 = 250.0;

/// Leads extracted from record files
pub const RECORD_LEADS: [Lead; 9] = [
    Lead::AVR,
    Lead::AVL,
    Lead::AVF,
    Lead::V1,
    Lead::V2,
    Lead::V3,
    Lead::V4,
    Lead::V5,
    Lead::V6,
];

/// Per-channel signal specification from a header file
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSpec {
    /// Data file holding this channel
    pub file_name: String,
    /// WFDB signal format code ("16", "212", ...)
    pub format: String,
    /// ADC units per physical unit
    pub gain: f64,
    /// ADC value corresponding to 0 physical units
    pub baseline: f64,
    /// Free-text channel description (conventionally the lead name)
    pub description: String,
}

/// Parsed contents of a WFDB `.hea` file
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    /// Record name from the header's first line
    pub record_name: String,
    /// Number of signal channels
    pub signal_count: usize,
    /// Sampling frequency in Hz
    pub sampling_rate: f64,
    /// Samples per channel, 0 when the header leaves it unspecified
    pub sample_count: usize,
    /// One spec per channel, in file order
    pub signals: Vec<SignalSpec>,
}

impl RecordHeader {
    /// Parse header text into a `RecordHeader`
    pub fn parse(text: &str) -> EcgResult<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let record_line = lines.next().ok_or_else(|| EcgError::RecordParse {
            reason: "header is empty".to_string(),
        })?;
        let tokens: Vec<&str> = record_line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(EcgError::RecordParse {
                reason: format!("malformed record line: '{}'", record_line),
            });
        }

        // Record name may carry a segment count suffix ("name/n")
        let record_name = tokens[0]
            .split('/')
            .next()
            .unwrap_or(tokens[0])
            .to_string();
        let signal_count: usize = tokens[1].parse().map_err(|_| EcgError::RecordParse {
            reason: format!("invalid signal count: '{}'", tokens[1]),
        })?;
        let sampling_rate = match tokens.get(2) {
            // The frequency field may carry counter info ("500/...")
            Some(raw) => raw
                .split('/')
                .next()
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| EcgError::RecordParse {
                    reason: format!("invalid sampling frequency: '{}'", raw),
                })?,
            None => DEFAULT_SAMPLING_RATE,
        };
        let sample_count: usize = match tokens.get(3) {
            Some(raw) => raw.parse().map_err(|_| EcgError::RecordParse {
                reason: format!("invalid sample count: '{}'", raw),
            })?,
            None => 0,
        };

        let mut signals = Vec::with_capacity(signal_count);
        for _ in 0..signal_count {
            let line = lines.next().ok_or_else(|| EcgError::RecordParse {
                reason: format!(
                    "header declares {} signals but has fewer signal lines",
                    signal_count
                ),
            })?;
            signals.push(Self::parse_signal_line(line)?);
        }

        Ok(RecordHeader {
            record_name,
            signal_count,
            sampling_rate,
            sample_count,
            signals,
        })
    }

    /// Parse one signal-spec line
    ///
    /// Layout: `file format gain(baseline)/units adc_res adc_zero init_val
    /// checksum block_size description...`; everything after the format is
    /// optional in the WFDB grammar.
    fn parse_signal_line(line: &str) -> EcgResult<SignalSpec> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(EcgError::RecordParse {
                reason: format!("malformed signal line: '{}'", line),
            });
        }

        let file_name = tokens[0].to_string();
        // Format may carry samples-per-frame / skew / offset suffixes
        let format: String = tokens[1]
            .split(|c| c == 'x' || c == ':' || c == '+')
            .next()
            .unwrap_or(tokens[1])
            .to_string();

        // Gain field: "gain", "gain(baseline)", optionally "/units" appended
        let mut gain = DEFAULT_GAIN;
        let mut baseline: Option<f64> = None;
        if let Some(raw) = tokens.get(2) {
            let raw = raw.split('/').next().unwrap_or(raw);
            let (gain_part, base_part) = match raw.split_once('(') {
                Some((g, rest)) => (g, Some(rest.trim_end_matches(')'))),
                None => (raw, None),
            };
            let parsed: f64 = gain_part.parse().map_err(|_| EcgError::RecordParse {
                reason: format!("invalid gain: '{}'", raw),
            })?;
            if parsed != 0.0 {
                gain = parsed;
            }
            if let Some(b) = base_part {
                baseline = Some(b.parse().map_err(|_| EcgError::RecordParse {
                    reason: format!("invalid baseline: '{}'", raw),
                })?);
            }
        }

        // Without an explicit baseline, the ADC zero (field 5) stands in
        let adc_zero: f64 = tokens
            .get(4)
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.0);
        let baseline = baseline.unwrap_or(adc_zero);

        let description = if tokens.len() > 8 {
            tokens[8..].join(" ")
        } else {
            String::new()
        };

        Ok(SignalSpec {
            file_name,
            format,
            gain,
            baseline,
            description,
        })
    }
}

/// Read a record pair from `dir` and return its desired leads
///
/// Only leads in [`RECORD_LEADS`] are returned, matching what the service
/// serves; channels with other descriptions are skipped.
pub fn read_record(dir: &Path, name: &str) -> EcgResult<LeadSet> {
    if !is_safe_record_name(name) {
        return Err(EcgError::RecordNotFound {
            record: name.to_string(),
        });
    }

    let header_path = dir.join(format!("{}.hea", name));
    let header_text = std::fs::read_to_string(&header_path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            EcgError::RecordNotFound {
                record: name.to_string(),
            }
        } else {
            err.into()
        }
    })?;
    let header = RecordHeader::parse(&header_text)?;

    if header.signals.is_empty() {
        return Err(EcgError::RecordParse {
            reason: "record has no signal channels".to_string(),
        });
    }
    let data_file = &header.signals[0].file_name;
    if !is_safe_record_name(data_file) {
        return Err(EcgError::RecordParse {
            reason: format!("unsafe data file name: '{}'", data_file),
        });
    }
    for spec in &header.signals {
        if spec.file_name != *data_file {
            return Err(EcgError::RecordParse {
                reason: "multi-file records are not supported".to_string(),
            });
        }
        if spec.format != "16" {
            return Err(EcgError::UnsupportedFormat {
                format: spec.format.clone(),
            });
        }
    }

    let bytes = std::fs::read(dir.join(data_file))?;
    let channels = decode_format16(&bytes, &header);

    let mut leads = LeadSet::new();
    for (spec, samples) in header.signals.iter().zip(channels) {
        if let Ok(lead) = spec.description.trim().parse::<Lead>() {
            if RECORD_LEADS.contains(&lead) {
                leads.insert(lead, samples);
            }
        }
    }

    if leads.is_empty() {
        return Err(EcgError::RecordParse {
            reason: format!("no desired leads found in record '{}'", name),
        });
    }
    Ok(leads)
}

/// Decode format-16 data: interleaved little-endian i16, one value per
/// channel per frame, converted to physical units per channel
fn decode_format16(bytes: &[u8], header: &RecordHeader) -> Vec<Signal> {
    let nsig = header.signals.len();
    let mut frames = bytes.len() / (2 * nsig);
    if header.sample_count > 0 {
        frames = frames.min(header.sample_count);
    }

    let mut channels: Vec<Signal> = header
        .signals
        .iter()
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in 0..frames {
        for (ch, spec) in header.signals.iter().enumerate() {
            let offset = 2 * (frame * nsig + ch);
            let adc = i16::from_le_bytes([bytes[offset], bytes[offset + 1]]) as f64;
            channels[ch].push((adc - spec.baseline) / spec.gain);
        }
    }
    channels
}

/// Reject names that could escape the record directory
fn is_safe_record_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
rec01 3 500 4
rec01.dat 16 200(0)/mV 16 0 12 0 0 aVR
rec01.dat 16 100(10)/mV 16 0 -3 0 0 V1
rec01.dat 16 200/mV 16 512 7 0 0 MLII
";

    #[test]
    fn test_header_parse() {
        let header = RecordHeader::parse(HEADER).unwrap();
        assert_eq!(header.record_name, "rec01");
        assert_eq!(header.signal_count, 3);
        assert_eq!(header.sampling_rate, 500.0);
        assert_eq!(header.sample_count, 4);
        assert_eq!(header.signals.len(), 3);

        assert_eq!(header.signals[0].gain, 200.0);
        assert_eq!(header.signals[0].baseline, 0.0);
        assert_eq!(header.signals[0].description, "aVR");

        // Explicit baseline in parentheses
        assert_eq!(header.signals[1].gain, 100.0);
        assert_eq!(header.signals[1].baseline, 10.0);

        // No parenthesized baseline: ADC zero stands in
        assert_eq!(header.signals[2].baseline, 512.0);
    }

    #[test]
    fn test_header_parse_defaults() {
        let header = RecordHeader::parse("tiny 1\ntiny.dat 16\n").unwrap();
        assert_eq!(header.sampling_rate, 250.0);
        assert_eq!(header.sample_count, 0);
        assert_eq!(header.signals[0].gain, 200.0);
        assert_eq!(header.signals[0].description, "");
    }

    #[test]
    fn test_header_parse_rejects_short_lines() {
        assert!(RecordHeader::parse("").is_err());
        assert!(RecordHeader::parse("rec01").is_err());
        assert!(RecordHeader::parse("rec01 2 500 4\nrec01.dat 16 200/mV 16 0 0 0 0 aVR\n").is_err());
    }

    #[test]
    fn test_record_name_safety() {
        assert!(is_safe_record_name("rec01"));
        assert!(!is_safe_record_name(""));
        assert!(!is_safe_record_name("../etc/passwd"));
        assert!(!is_safe_record_name("a/b"));
        assert!(!is_safe_record_name("a\\b"));
    }

    #[test]
    fn test_read_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let header = "\
rec01 2 500 3
rec01.dat 16 200(0)/mV 16 0 0 0 0 aVR
rec01.dat 16 100(2)/mV 16 0 0 0 0 V1
";
        std::fs::write(dir.path().join("rec01.hea"), header).unwrap();

        // Frames: (aVR, V1) = (200, 102), (400, 202), (-200, 2)
        let samples: [i16; 6] = [200, 102, 400, 202, -200, 2];
        let mut bytes = Vec::new();
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        std::fs::write(dir.path().join("rec01.dat"), &bytes).unwrap();

        let leads = read_record(dir.path(), "rec01").unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads.get(Lead::AVR), Some(&vec![1.0, 2.0, -1.0]));
        assert_eq!(leads.get(Lead::V1), Some(&vec![1.0, 2.0, 0.0]));
    }

    #[test]
    fn test_read_record_skips_unwanted_channels() {
        let dir = tempfile::tempdir().unwrap();
        let header = "\
rec02 2 500 1
rec02.dat 16 200(0)/mV 16 0 0 0 0 MLII
rec02.dat 16 200(0)/mV 16 0 0 0 0 V2
";
        std::fs::write(dir.path().join("rec02.hea"), header).unwrap();
        std::fs::write(dir.path().join("rec02.dat"), [0u8, 0, 0, 0]).unwrap();

        let leads = read_record(dir.path(), "rec02").unwrap();
        assert_eq!(leads.len(), 1);
        assert!(leads.contains(Lead::V2));
    }

    #[test]
    fn test_read_record_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_record(dir.path(), "nope").unwrap_err();
        assert!(matches!(err, EcgError::RecordNotFound { .. }));
    }

    #[test]
    fn test_read_record_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_record(dir.path(), "../rec01").unwrap_err();
        assert!(matches!(err, EcgError::RecordNotFound { .. }));
    }

    #[test]
    fn test_read_record_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let header = "\
rec03 1 500 1
rec03.dat 212 200(0)/mV 12 0 0 0 0 V1
";
        std::fs::write(dir.path().join("rec03.hea"), header).unwrap();
        let err = read_record(dir.path(), "rec03").unwrap_err();
        assert!(matches!(err, EcgError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_read_record_no_desired_leads() {
        let dir = tempfile::tempdir().unwrap();
        let header = "\
rec04 1 500 1
rec04.dat 16 200(0)/mV 16 0 0 0 0 MLII
";
        std::fs::write(dir.path().join("rec04.hea"), header).unwrap();
        std::fs::write(dir.path().join("rec04.dat"), [0u8, 0]).unwrap();
        let err = read_record(dir.path(), "rec04").unwrap_err();
        assert!(matches!(err, EcgError::RecordParse { .. }));
    }
}
