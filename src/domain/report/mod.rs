//! Final report sent to the external evaluator.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;
use crate::domain::intelligence::Intelligence;
use crate::domain::session::Session;

/// Evidence lists as carried on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

impl From<&Intelligence> for ExtractedIntelligence {
    fn from(intel: &Intelligence) -> Self {
        Self {
            bank_accounts: intel.bank_accounts().iter().cloned().collect(),
            upi_ids: intel.upi_ids().iter().cloned().collect(),
            phishing_links: intel.phishing_links().iter().cloned().collect(),
            phone_numbers: intel.phone_numbers().iter().cloned().collect(),
            suspicious_keywords: intel.suspicious_keywords().iter().cloned().collect(),
        }
    }
}

/// Consolidated result for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub session_id: SessionId,
    pub scam_detected: bool,
    pub total_messages_exchanged: usize,
    pub extracted_intelligence: ExtractedIntelligence,
    pub agent_notes: String,
}

impl FinalReport {
    /// Builds the report from the session as it stands.
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.session_id().clone(),
            scam_detected: session.phase().is_scam_confirmed(),
            total_messages_exchanged: session.total_messages(),
            extracted_intelligence: ExtractedIntelligence::from(session.intelligence()),
            agent_notes: session.agent_notes().summary(),
        }
    }
}
