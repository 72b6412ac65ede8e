use serde::{Deserialize, Serialize};

/// Exhibition - a themed track grouping several workshops
///
/// Reference data: rebuilt from the seed catalog on every start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibition {
    pub id: String,
    pub title: String,
    /// Hosted workshop IDs in catalog order
    pub workshop_ids: Vec<String>,
}

impl Exhibition {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            workshop_ids: Vec::new(),
        }
    }

    pub fn add_workshop_id(&mut self, workshop_id: String) {
        if !self.workshop_ids.contains(&workshop_id) {
            self.workshop_ids.push(workshop_id);
        }
    }
}
