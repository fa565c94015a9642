//! Limb-lead derivation from Lead I and Lead II
//!
//! The four remaining limb leads follow from the two measured ones by
//! fixed linear combinations (Einthoven / Goldberger):
//!
//! ```text
//! III = II - I
//! aVR = -(I + II) / 2
//! aVL = I - II / 2
//! aVF = II - I / 2
//! ```

use ecg_core::{EcgError, EcgResult, Lead, LeadSet};

/// Derive the six limb leads from raw Lead I and Lead II samples
///
/// Inputs of unequal length are silently truncated to the shorter one;
/// every output lead has exactly `min(len)` samples. The only failure is a
/// non-finite sample (NaN or infinity) in either input, which would poison
/// every derived lead.
pub fn derive_limb_leads(lead_i: &[f64], lead_ii: &[f64]) -> EcgResult<LeadSet> {
    let n = lead_i.len().min(lead_ii.len());
    let lead_i = &lead_i[..n];
    let lead_ii = &lead_ii[..n];

    for (name, samples) in [("lead I", lead_i), ("lead II", lead_ii)] {
        if let Some(t) = samples.iter().position(|v| !v.is_finite()) {
            return Err(EcgError::InvalidSignalData {
                reason: format!("non-finite sample in {} at index {}", name, t),
            });
        }
    }

    let mut iii = Vec::with_capacity(n);
    let mut avr = Vec::with_capacity(n);
    let mut avl = Vec::with_capacity(n);
    let mut avf = Vec::with_capacity(n);
    for (&i, &ii) in lead_i.iter().zip(lead_ii.iter()) {
        iii.push(ii - i);
        avr.push(-(i + ii) / 2.0);
        avl.push(i - ii / 2.0);
        avf.push(ii - i / 2.0);
    }

    let mut leads = LeadSet::new();
    leads.insert(Lead::I, lead_i.to_vec());
    leads.insert(Lead::II, lead_ii.to_vec());
    leads.insert(Lead::III, iii);
    leads.insert(Lead::AVR, avr);
    leads.insert(Lead::AVL, avl);
    leads.insert(Lead::AVF, avf);
    Ok(leads)
}
