use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GreenWaveError;

/// Sentinel reported by universal-scope tickets
pub const ALL_EXHIBITIONS: &str = "ALL";

/// Ticket variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketKind {
    /// Access to an explicit set of exhibitions
    ExhibitionPass,
    /// Access to every exhibition, with priority seating and recordings
    AllAccessPass,
}

impl TicketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketKind::ExhibitionPass => "ExhibitionPass",
            TicketKind::AllAccessPass => "AllAccessPass",
        }
    }

    pub fn includes_priority_seating(&self) -> bool {
        matches!(self, TicketKind::AllAccessPass)
    }

    pub fn includes_recordings(&self) -> bool {
        matches!(self, TicketKind::AllAccessPass)
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = GreenWaveError;

    /// Accepts the short purchase-form names as well as the full variant names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhibition" | "exhibitionpass" => Ok(TicketKind::ExhibitionPass),
            "allaccess" | "allaccesspass" => Ok(TicketKind::AllAccessPass),
            _ => Err(GreenWaveError::invalid_request(format!(
                "Unknown ticket type: {}",
                s
            ))),
        }
    }
}

/// Exhibitions a ticket grants workshop access to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessScope {
    /// Explicit exhibition IDs in grant order
    Exhibitions(Vec<String>),
    /// Universal access
    All,
}

impl AccessScope {
    pub fn includes(&self, exhibition_id: &str) -> bool {
        match self {
            AccessScope::All => true,
            AccessScope::Exhibitions(ids) => ids.iter().any(|id| id == exhibition_id),
        }
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, AccessScope::All)
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessScope::All => f.write_str(ALL_EXHIBITIONS),
            AccessScope::Exhibitions(ids) => f.write_str(&ids.join(", ")),
        }
    }
}

/// Ticket - one concrete type for both pass variants
///
/// `kind` and `scope` are kept consistent by the constructors: an
/// `ExhibitionPass` always has an explicit scope, an `AllAccessPass` always
/// has `AccessScope::All`. Price never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    /// Owning account ID
    pub owner_id: String,
    pub kind: TicketKind,
    pub price: f64,
    pub scope: AccessScope,
    pub purchased_at: DateTime<Utc>,
}

impl Ticket {
    /// Create an exhibition pass scoped to a single exhibition
    pub fn exhibition_pass(id: String, owner_id: String, exhibition_id: String, price: f64) -> Self {
        Self {
            id,
            owner_id,
            kind: TicketKind::ExhibitionPass,
            price,
            scope: AccessScope::Exhibitions(vec![exhibition_id]),
            purchased_at: Utc::now(),
        }
    }

    /// Create an all-access pass
    pub fn all_access_pass(id: String, owner_id: String, price: f64) -> Self {
        Self {
            id,
            owner_id,
            kind: TicketKind::AllAccessPass,
            price,
            scope: AccessScope::All,
            purchased_at: Utc::now(),
        }
    }

    /// Whether this ticket lets its holder reserve workshops of `exhibition_id`
    pub fn grants_access_to(&self, exhibition_id: &str) -> bool {
        self.scope.includes(exhibition_id)
    }

    /// Add an exhibition to the scope and charge `extra_price` for it
    ///
    /// Only takes effect when the exhibition is not already covered, so
    /// repeating the call never double-charges. Universal tickets already
    /// cover everything and always report `false`.
    ///
    /// # Returns
    /// * `true` - The exhibition was added and the price raised
    /// * `false` - No-op: already included, price unchanged
    pub fn grant_exhibition_access(&mut self, exhibition_id: &str, extra_price: f64) -> bool {
        match &mut self.scope {
            AccessScope::All => false,
            AccessScope::Exhibitions(ids) => {
                if ids.iter().any(|id| id == exhibition_id) {
                    return false;
                }
                ids.push(exhibition_id.to_string());
                self.price += extra_price;
                true
            }
        }
    }

    /// Exhibition IDs in the scope, or the `ALL` sentinel
    pub fn scope_ids(&self) -> Vec<&str> {
        match &self.scope {
            AccessScope::All => vec![ALL_EXHIBITIONS],
            AccessScope::Exhibitions(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    pub fn has_priority_seating(&self) -> bool {
        self.kind.includes_priority_seating()
    }

    pub fn has_recordings(&self) -> bool {
        self.kind.includes_recordings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pass() -> Ticket {
        Ticket::exhibition_pass("T1".to_string(), "U1".to_string(), "EX1".to_string(), 50.0)
    }

    #[test]
    fn test_exhibition_pass_scope() {
        let t = pass();
        assert_eq!(t.kind, TicketKind::ExhibitionPass);
        assert_eq!(t.scope_ids(), vec!["EX1"]);
        assert!(t.grants_access_to("EX1"));
        assert!(!t.grants_access_to("EX2"));
        assert!(!t.has_priority_seating());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut t = pass();

        assert!(t.grant_exhibition_access("EX2", 20.0));
        assert_eq!(t.price, 70.0);
        assert_eq!(t.scope_ids(), vec!["EX1", "EX2"]);

        // Second grant for the same exhibition is a no-op
        assert!(!t.grant_exhibition_access("EX2", 20.0));
        assert_eq!(t.price, 70.0);
        assert_eq!(t.scope_ids(), vec!["EX1", "EX2"]);

        // Initial exhibition is already included too
        assert!(!t.grant_exhibition_access("EX1", 20.0));
        assert_eq!(t.price, 70.0);
    }

    #[test]
    fn test_all_access_ignores_grants() {
        let mut t = Ticket::all_access_pass("T2".to_string(), "U1".to_string(), 150.0);
        assert!(t.scope.is_universal());
        assert_eq!(t.scope_ids(), vec![ALL_EXHIBITIONS]);
        assert!(t.grants_access_to("EX3"));
        assert!(t.grants_access_to("anything"));

        assert!(!t.grant_exhibition_access("EX1", 40.0));
        assert_eq!(t.price, 150.0);
        assert!(t.has_priority_seating());
        assert!(t.has_recordings());
    }

    #[test]
    fn test_ticket_kind_parsing() {
        assert_eq!(
            "Exhibition".parse::<TicketKind>().unwrap(),
            TicketKind::ExhibitionPass
        );
        assert_eq!(
            "AllAccess".parse::<TicketKind>().unwrap(),
            TicketKind::AllAccessPass
        );
        assert_eq!(
            "allaccesspass".parse::<TicketKind>().unwrap(),
            TicketKind::AllAccessPass
        );
        assert!(matches!(
            "VIP".parse::<TicketKind>(),
            Err(GreenWaveError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_scope_serialization_shape() {
        let json = serde_json::to_value(AccessScope::All).unwrap();
        assert_eq!(json, serde_json::json!("all"));

        let json = serde_json::to_value(AccessScope::Exhibitions(vec!["EX1".to_string()])).unwrap();
        assert_eq!(json, serde_json::json!({ "exhibitions": ["EX1"] }));
    }

    proptest! {
        #[test]
        fn prop_price_equals_base_plus_distinct_grants(
            grants in proptest::collection::vec(1u8..6, 0..20),
            extra in 0.0f64..100.0,
        ) {
            let mut t = pass();
            for g in &grants {
                t.grant_exhibition_access(&format!("EX{}", g), extra);
            }
            let mut distinct: Vec<String> = grants.iter().map(|g| format!("EX{}", g)).collect();
            distinct.push("EX1".to_string());
            distinct.sort();
            distinct.dedup();
            let expected = 50.0 + extra * (distinct.len() as f64 - 1.0);
            prop_assert!((t.price - expected).abs() < 1e-6);
            prop_assert_eq!(t.scope_ids().len(), distinct.len());
        }
    }
}
