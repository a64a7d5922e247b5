//! Helpline numbers per crisis category.

use crisis_hub_core::CrisisCategory;

/// The helpline text disclosed for each crisis category.
///
/// Keyed by category rather than display name, so the same entry is used
/// whichever language the conversation is in.
#[derive(Debug, Clone)]
pub struct HelplineDirectory {
    entries: [String; 4],
}

impl HelplineDirectory {
    fn slot(category: CrisisCategory) -> usize {
        match category {
            CrisisCategory::NaturalDisasters => 0,
            CrisisCategory::MentalHealth => 1,
            CrisisCategory::DomesticViolence => 2,
            CrisisCategory::Homelessness => 3,
        }
    }

    /// Replaces the helpline text for one category.
    #[must_use]
    pub fn with_helpline(mut self, category: CrisisCategory, helpline: impl Into<String>) -> Self {
        self.entries[Self::slot(category)] = helpline.into();
        self
    }

    /// Returns the helpline text for a category.
    #[must_use]
    pub fn helpline(&self, category: CrisisCategory) -> &str {
        &self.entries[Self::slot(category)]
    }
}

impl Default for HelplineDirectory {
    fn default() -> Self {
        Self {
            entries: [
                "National Disaster Response Force: 9711077372 | NDMA Helpline: 1078".to_string(),
                "Kiran Helpline: 1800-599-0019 | Vandrevala Foundation: 9999-666-555".to_string(),
                "Women Helpline: 181 | National Commission for Women: 7827170170".to_string(),
                "NULM Shelter Info: 011-23062852 | Local Police: 100".to_string(),
            ],
        }
    }
}
