use chrono::{DateTime, Duration, Utc};
use greenwave_core::errors::Result;
use greenwave_core::model::{Exhibition, Workshop};
use std::collections::BTreeMap;

/// (id, title) of every exhibition, in catalog order
pub const DEMO_EXHIBITIONS: [(&str, &str); 3] = [
    ("EX1", "ClimateTech"),
    ("EX2", "Policy"),
    ("EX3", "Community"),
];

pub const WORKSHOPS_PER_EXHIBITION: u32 = 3;

/// Exhibition reference data with empty workshop lists
///
/// The store links workshops to exhibitions after loading.
pub fn exhibition_catalog() -> BTreeMap<String, Exhibition> {
    DEMO_EXHIBITIONS
        .iter()
        .map(|(id, title)| (id.to_string(), Exhibition::new(id.to_string(), title.to_string())))
        .collect()
}

/// Three workshops per exhibition
///
/// Workshop `j` of exhibition `i` gets id `WS{i}{j}`, capacity `10 + 5j` and a
/// start time `j` days and `i` hours after `anchor`.
///
/// # Errors
/// Only if a capacity computes to zero, which the constants rule out.
pub fn demo_workshops(anchor: DateTime<Utc>) -> Result<Vec<Workshop>> {
    let mut workshops = Vec::new();
    for (i, (ex_id, ex_title)) in (1i64..).zip(DEMO_EXHIBITIONS.iter()) {
        for j in 1..=WORKSHOPS_PER_EXHIBITION {
            let start_time = anchor + Duration::days(i64::from(j)) + Duration::hours(i);
            workshops.push(Workshop::new(
                format!("WS{}{}", i, j),
                format!("{} Workshop {}", ex_title, j),
                ex_id.to_string(),
                10 + 5 * j,
                start_time,
            )?);
        }
    }
    Ok(workshops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_three_exhibitions() {
        let catalog = exhibition_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog["EX2"].title, "Policy");
        assert!(catalog.values().all(|ex| ex.workshop_ids.is_empty()));
    }

    #[test]
    fn test_demo_workshops_shape() {
        let anchor = Utc::now();
        let workshops = demo_workshops(anchor).unwrap();
        assert_eq!(workshops.len(), 9);

        for ex_id in ["EX1", "EX2", "EX3"] {
            let caps: HashSet<u32> = workshops
                .iter()
                .filter(|w| w.exhibition_id == ex_id)
                .map(|w| w.capacity)
                .collect();
            assert_eq!(caps, HashSet::from([15, 20, 25]));
        }

        assert!(workshops.iter().all(|w| w.start_time > anchor));
        assert!(workshops.iter().all(|w| w.reservation_ids.is_empty()));
    }

    #[test]
    fn test_demo_workshops_deterministic_for_anchor() {
        let anchor = Utc::now();
        assert_eq!(demo_workshops(anchor).unwrap(), demo_workshops(anchor).unwrap());
    }
}
