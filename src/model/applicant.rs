//! Applicant identity and derived verification attributes

use serde::{Deserialize, Serialize};

/// The applicant record, created once per session.
///
/// Identity capture is out of scope: sessions start pre-authenticated with
/// placeholder identity values. `kyc_verified` and `credit_score` are each
/// written at most once, by the stage engine, and never reset within a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub credit_score: Option<u16>,
    pub kyc_verified: bool,
}

impl ApplicantProfile {
    /// The placeholder identity every simulated session starts with.
    pub fn placeholder() -> Self {
        Self {
            name: "Rajesh Kumar".to_string(),
            national_id: "ABCDE1234F".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "rajesh.kumar@example.com".to_string(),
            credit_score: None,
            kyc_verified: false,
        }
    }
}
