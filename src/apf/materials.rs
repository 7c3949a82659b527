use serde::{Deserialize, Serialize};

/// Minimum trimmed length a single materials field must exceed before the
/// interview step unlocks.
pub const MIN_MATERIAL_CHARS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact: String,
}

/// Raw career materials pasted in by the user. Never filtered or interpreted
/// here; the generator sees them nearly verbatim (truncated to a per-tier
/// character budget).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMaterials {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub linked_in_export: String,
    #[serde(default)]
    pub project_links: String,
    #[serde(default)]
    pub personal_data: PersonalData,
}

impl UserMaterials {
    /// Sufficiency gate for advancing to the interview: at least one content
    /// field must exceed [`MIN_MATERIAL_CHARS`] once trimmed.
    pub fn has_enough_data(&self) -> bool {
        [&self.raw_text, &self.linked_in_export, &self.project_links]
            .iter()
            .any(|field| field.trim().chars().count() > MIN_MATERIAL_CHARS)
    }

    /// Completeness score in 0..=100 for progress display. Raw text counts
    /// up to 50 points, the bio export and links up to 25 each.
    pub fn completeness(&self) -> u8 {
        fn portion(len: usize, full_at: usize, points: f64) -> f64 {
            if len == 0 {
                return 0.0;
            }
            (len as f64 / full_at as f64 * points).min(points)
        }

        let score = portion(self.raw_text.trim().chars().count(), 500, 50.0)
            + portion(self.linked_in_export.trim().chars().count(), 200, 25.0)
            + portion(self.project_links.trim().chars().count(), 100, 25.0);
        score.min(100.0).round() as u8
    }

    /// Content fields joined for prompt construction, skipping blanks.
    pub fn combined(&self) -> String {
        [&self.raw_text, &self.linked_in_export, &self.project_links]
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_char_floor_is_not_enough() {
        // Word count is irrelevant; the gate is per-field character count.
        let materials = UserMaterials {
            raw_text: "a b c".into(),
            ..Default::default()
        };
        assert!(!materials.has_enough_data());
    }

    #[test]
    fn gate_opens_on_any_single_field() {
        let materials = UserMaterials {
            project_links: "https://github.com/someone/project".into(),
            ..Default::default()
        };
        assert!(materials.has_enough_data());
    }

    #[test]
    fn exactly_floor_length_is_rejected() {
        let materials = UserMaterials {
            raw_text: "12345".into(),
            ..Default::default()
        };
        assert!(!materials.has_enough_data());
    }

    #[test]
    fn whitespace_does_not_count() {
        let materials = UserMaterials {
            raw_text: "   abc   ".into(),
            linked_in_export: "\n\n\n\n\n\n\n".into(),
            ..Default::default()
        };
        assert!(!materials.has_enough_data());
    }

    #[test]
    fn completeness_caps_at_100() {
        let materials = UserMaterials {
            raw_text: "x".repeat(5000),
            linked_in_export: "y".repeat(5000),
            project_links: "z".repeat(5000),
            ..Default::default()
        };
        assert_eq!(materials.completeness(), 100);
    }

    #[test]
    fn combined_skips_empty_fields() {
        let materials = UserMaterials {
            raw_text: "resume text".into(),
            project_links: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(materials.combined(), "resume text\n\n---\n\nhttps://example.com");
    }
}
