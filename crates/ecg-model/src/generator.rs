//! Precordial-lead generation from Lead I and Lead II
//!
//! The generator contract mirrors the externally trained model it stands
//! in for: inputs are truncated to their common length, the output holds
//! exactly V1-V6 at that length, and callers degrade to fewer leads when
//! no model is loaded.

use ecg_core::{EcgError, EcgResult, Lead, LeadSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Collaborator seam for precordial-lead synthesis
pub trait PrecordialGenerator {
    /// Synthesize V1-V6 from raw Lead I and Lead II samples
    ///
    /// Inputs of unequal length are truncated to the shorter one; every
    /// returned lead has exactly that many samples.
    fn generate(&self, lead_i: &[f64], lead_ii: &[f64]) -> EcgResult<LeadSet>;
}

/// Per-lead synthesis coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadWeights {
    /// Coefficient applied to Lead I
    pub w_i: f64,
    /// Coefficient applied to Lead II
    pub w_ii: f64,
    /// Constant offset
    pub bias: f64,
}

/// On-disk weight file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Weight-file schema version
    pub version: u32,
    /// One coefficient set per precordial lead
    pub leads: BTreeMap<Lead, LeadWeights>,
}

/// Pretrained per-sample linear synthesis model
///
/// Each precordial lead is `w_i * I[t] + w_ii * II[t] + bias`. Read-only
/// after loading; the server holds one handle for its whole lifetime.
#[derive(Debug, Clone)]
pub struct LinearLeadModel {
    weights: ModelWeights,
}

impl LinearLeadModel {
    /// Load and validate a weight file
    ///
    /// A missing file is `ModelUnavailable` (the server runs without
    /// precordial synthesis); a present but unusable file is `ModelInvalid`.
    pub fn load(path: &Path) -> EcgResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                EcgError::ModelUnavailable {
                    reason: format!("weight file not found: {}", path.display()),
                }
            } else {
                EcgError::Io {
                    reason: err.to_string(),
                }
            }
        })?;
        let weights: ModelWeights =
            serde_json::from_str(&text).map_err(|err| EcgError::ModelInvalid {
                reason: format!("weight file does not parse: {}", err),
            })?;
        let model = Self::from_weights(weights)?;
        tracing::info!(
            path = %path.display(),
            version = model.weights.version,
            "generative model loaded"
        );
        Ok(model)
    }

    /// Validate in-memory weights into a usable model
    pub fn from_weights(weights: ModelWeights) -> EcgResult<Self> {
        for lead in Lead::PRECORDIAL_LEADS {
            match weights.leads.get(&lead) {
                None => {
                    return Err(EcgError::ModelInvalid {
                        reason: format!("missing coefficients for {}", lead),
                    })
                }
                Some(w) if !(w.w_i.is_finite() && w.w_ii.is_finite() && w.bias.is_finite()) => {
                    return Err(EcgError::ModelInvalid {
                        reason: format!("non-finite coefficients for {}", lead),
                    })
                }
                Some(_) => {}
            }
        }
        for lead in weights.leads.keys() {
            if !lead.is_precordial() {
                return Err(EcgError::ModelInvalid {
                    reason: format!("unexpected limb-lead entry: {}", lead),
                });
            }
        }
        Ok(LinearLeadModel { weights })
    }

    /// Weight-file schema version
    pub fn version(&self) -> u32 {
        self.weights.version
    }
}

impl PrecordialGenerator for LinearLeadModel {
    fn generate(&self, lead_i: &[f64], lead_ii: &[f64]) -> EcgResult<LeadSet> {
        let n = lead_i.len().min(lead_ii.len());
        let lead_i = &lead_i[..n];
        let lead_ii = &lead_ii[..n];

        let mut out = LeadSet::new();
        for lead in Lead::PRECORDIAL_LEADS {
            // Presence was checked at load time
            let w = self.weights.leads[&lead];
            let signal = lead_i
                .iter()
                .zip(lead_ii.iter())
                .map(|(&i, &ii)| w.w_i * i + w.w_ii * ii + w.bias)
                .collect();
            out.insert(lead, signal);
        }
        Ok(out)
    }
}
