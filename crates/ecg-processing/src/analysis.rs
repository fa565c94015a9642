//! Mock rhythm analysis over a lead set
//!
//! A deliberately naive heart-rate heuristic kept for compatibility with
//! the measurement frontend: "peaks" are every sample above 70% of the
//! Lead II maximum, not local maxima, and the rhythm label is fixed. The
//! output is illustrative, not diagnostic.

use ecg_core::{EcgError, EcgResult, Lead, LeadSet, SAMPLING_RATE_HZ};
use serde::{Deserialize, Serialize};

/// Rhythm label reported on successful analysis
const MOCK_RHYTHM: &str = "Normal Sinus Rhythm (Mock)";
/// Interpretation text reported on successful analysis
const MOCK_INTERPRETATION: &str = "ECG is within normal limits. (Mock result)";

/// Result of one analysis pass over a lead set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Estimated heart rate in beats per minute (0 when not computable)
    pub heart_rate: u32,
    /// Rhythm label
    pub rhythm_type: String,
    /// Free-text interpretation
    pub interpretation: String,
}

impl AnalysisResult {
    fn unknown() -> Self {
        AnalysisResult {
            heart_rate: 0,
            rhythm_type: "Unknown".to_string(),
            interpretation: "Lead II data not available for analysis.".to_string(),
        }
    }

    fn failed(err: &EcgError) -> Self {
        AnalysisResult {
            heart_rate: 0,
            rhythm_type: "Analysis Failed".to_string(),
            interpretation: err.to_string(),
        }
    }
}

/// Analyze a lead set, never failing outward
///
/// Requires lead II; without it (or with an empty lead II) the result is
/// the "Unknown" placeholder. Internal computation errors degrade to an
/// "Analysis Failed" result carrying the error text.
pub fn analyze_rhythm(leads: &LeadSet) -> AnalysisResult {
    let lead_ii = match leads.get(Lead::II) {
        Some(signal) if !signal.is_empty() => signal,
        _ => return AnalysisResult::unknown(),
    };

    match estimate_heart_rate(lead_ii) {
        Ok(heart_rate) => AnalysisResult {
            heart_rate,
            rhythm_type: MOCK_RHYTHM.to_string(),
            interpretation: MOCK_INTERPRETATION.to_string(),
        },
        Err(err) => AnalysisResult::failed(&err),
    }
}

/// Threshold-crossing heart-rate estimate over lead II
///
/// `threshold = 0.7 * max(II)`; every index above threshold counts as a
/// "peak". With two or more such indices the rate is
/// `round((rate / mean(index gaps)) * 60)`, otherwise 0.
fn estimate_heart_rate(lead_ii: &[f64]) -> EcgResult<u32> {
    if let Some(t) = lead_ii.iter().position(|v| !v.is_finite()) {
        return Err(EcgError::InvalidSignalData {
            reason: format!("non-finite sample in lead II at index {}", t),
        });
    }

    let max = lead_ii.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let threshold = 0.7 * max;
    let peaks: Vec<usize> = lead_ii
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > threshold)
        .map(|(t, _)| t)
        .collect();

    if peaks.len() <= 1 {
        return Ok(0);
    }

    let gaps = peaks.windows(2).map(|w| (w[1] - w[0]) as f64);
    let avg_interval = gaps.sum::<f64>() / (peaks.len() - 1) as f64;
    // Exact-.5 rates round to even
    Ok(((SAMPLING_RATE_HZ / avg_interval) * 60.0).round_ties_even() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads_with_ii(signal: Vec<f64>) -> LeadSet {
        let mut leads = LeadSet::new();
        leads.insert(Lead::II, signal);
        leads
    }

    #[test]
    fn test_regression_vector() {
        // threshold = 7; peaks at {2, 5}; mean gap 3 → round(500/3 * 60)
        let leads = leads_with_ii(vec![0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 0.0, 0.0]);
        let result = analyze_rhythm(&leads);
        assert_eq!(result.heart_rate, 10000);
        assert_eq!(result.rhythm_type, "Normal Sinus Rhythm (Mock)");
        assert_eq!(result.interpretation, "ECG is within normal limits. (Mock result)");
    }

    #[test]
    fn test_missing_lead_ii() {
        let mut leads = LeadSet::new();
        leads.insert(Lead::I, vec![1.0, 2.0]);
        let result = analyze_rhythm(&leads);
        assert_eq!(result.heart_rate, 0);
        assert_eq!(result.rhythm_type, "Unknown");
    }

    #[test]
    fn test_empty_lead_ii() {
        let result = analyze_rhythm(&leads_with_ii(vec![]));
        assert_eq!(result.heart_rate, 0);
        assert_eq!(result.rhythm_type, "Unknown");
    }

    #[test]
    fn test_single_peak_gives_zero_rate() {
        let result = analyze_rhythm(&leads_with_ii(vec![0.0, 0.0, 10.0, 0.0]));
        assert_eq!(result.heart_rate, 0);
        // Rate of zero is still a "successful" analysis
        assert_eq!(result.rhythm_type, "Normal Sinus Rhythm (Mock)");
    }

    #[test]
    fn test_crossing_set_is_not_a_peak_detector() {
        // A two-sample-wide plateau contributes adjacent indices {2,3,6,7}:
        // gaps (1,3,1), mean 5/3, rate = round(500/(5/3) * 60) = 18000
        let leads = leads_with_ii(vec![0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 10.0]);
        let result = analyze_rhythm(&leads);
        assert_eq!(result.heart_rate, 18000);
    }

    #[test]
    fn test_uniform_signal() {
        // All samples equal the max; nothing is strictly above threshold
        // only when max <= 0, otherwise every index crosses
        let result = analyze_rhythm(&leads_with_ii(vec![1.0; 8]));
        // threshold 0.7, every index above it: gaps of 1 → 30000 bpm
        assert_eq!(result.heart_rate, 30000);
    }

    #[test]
    fn test_half_bpm_rounds_to_even() {
        // Two peaks 2400 samples apart: 500/2400 * 60 = 12.5 bpm exactly,
        // which rounds to 12, not 13
        let mut signal = vec![0.0; 2401];
        signal[0] = 10.0;
        signal[2400] = 10.0;
        let result = analyze_rhythm(&leads_with_ii(signal));
        assert_eq!(result.heart_rate, 12);
    }

    #[test]
    fn test_non_finite_degrades_to_failed() {
        let result = analyze_rhythm(&leads_with_ii(vec![1.0, f64::NAN, 2.0]));
        assert_eq!(result.heart_rate, 0);
        assert_eq!(result.rhythm_type, "Analysis Failed");
        assert!(result.interpretation.contains("non-finite"));
    }

    #[test]
    fn test_result_serialization() {
        let result = analyze_rhythm(&leads_with_ii(vec![0.0, 10.0, 0.0, 10.0]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["heart_rate"], 15000);
        assert_eq!(json["rhythm_type"], "Normal Sinus Rhythm (Mock)");
    }
}
