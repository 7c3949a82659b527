use rand::Rng;

use crate::apf::{AntiPortfolio, UserMaterials};
use crate::error::GenerationError;

use super::urls::{normalize_url, normalize_url_block};

/// Post-parse validation and default-fill.
///
/// Back-fills identity fields from the user's own input when the generator
/// omitted them, normalizes every URL field, distributes user-supplied
/// project links onto link-less projects, derives a style seed when absent,
/// and rejects content that carries no style descriptor at all. Never
/// fabricates business content.
pub fn validate(
    mut data: AntiPortfolio,
    materials: &UserMaterials,
) -> Result<AntiPortfolio, GenerationError> {
    let user_links = normalize_url_block(&materials.project_links);

    if data.meta.name.is_empty() && !materials.personal_data.name.is_empty() {
        data.meta.name = materials.personal_data.name.clone();
    }
    if data.meta.location.is_empty() && !materials.personal_data.location.is_empty() {
        data.meta.location = materials.personal_data.location.clone();
    }
    if data.meta.contact.is_none() && !materials.personal_data.contact.is_empty() {
        data.meta.contact = Some(materials.personal_data.contact.clone());
    }

    data.meta.primary_links = data
        .meta
        .primary_links
        .iter()
        .filter_map(|link| normalize_url(link))
        .collect();
    if data.meta.primary_links.is_empty() && !user_links.is_empty() {
        data.meta.primary_links = user_links.clone();
    }

    // Sentence breaks in the edge narrative become line breaks so the
    // renderer's fragment split has clean boundaries.
    if data.signature.edge.contains('.') {
        data.signature.edge = data.signature.edge.replace(". ", ".\n");
    }

    for (index, project) in data.projects.iter_mut().enumerate() {
        project.links = project
            .links
            .iter()
            .filter_map(|link| normalize_url(link))
            .collect();
        if project.links.is_empty() {
            if let Some(user_link) = user_links.get(index) {
                project.links.push(user_link.clone());
            }
        }
    }

    for proof in &mut data.proof_layer {
        for evidence in &mut proof.evidence {
            if let Some(normalized) = normalize_url(&evidence.url) {
                evidence.url = normalized;
            }
        }
    }

    let Some(style) = data.style_dna.as_mut() else {
        return Err(GenerationError::MissingStyle);
    };

    if style.style_seed.is_none() {
        style.style_seed = Some(rand::rng().random_range(1..=999));
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apf::{PersonalData, Project, StyleDna};

    fn base_payload() -> AntiPortfolio {
        AntiPortfolio {
            style_dna: Some(StyleDna::default()),
            ..Default::default()
        }
    }

    fn materials_with_identity() -> UserMaterials {
        UserMaterials {
            project_links: "github.com/ada/engine\ngitlab.com/ada/notes".into(),
            personal_data: PersonalData {
                name: "Ada".into(),
                location: "Turin".into(),
                contact: "ada@example.com".into(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn backfills_identity_from_materials() {
        let validated = validate(base_payload(), &materials_with_identity()).unwrap();
        assert_eq!(validated.meta.name, "Ada");
        assert_eq!(validated.meta.location, "Turin");
        assert_eq!(validated.meta.contact.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn generator_identity_wins_over_materials() {
        let mut payload = base_payload();
        payload.meta.name = "Ada Lovelace".into();
        let validated = validate(payload, &materials_with_identity()).unwrap();
        assert_eq!(validated.meta.name, "Ada Lovelace");
    }

    #[test]
    fn user_links_fill_empty_primary_links() {
        let validated = validate(base_payload(), &materials_with_identity()).unwrap();
        assert_eq!(
            validated.meta.primary_links,
            vec![
                "https://github.com/ada/engine".to_string(),
                "https://gitlab.com/ada/notes".to_string()
            ]
        );
    }

    #[test]
    fn linkless_projects_take_user_links_by_index() {
        let mut payload = base_payload();
        payload.projects = vec![
            Project {
                name: "Engine".into(),
                links: vec!["https://example.com/kept".into()],
                ..Default::default()
            },
            Project {
                name: "Notes".into(),
                ..Default::default()
            },
        ];
        let validated = validate(payload, &materials_with_identity()).unwrap();
        assert_eq!(validated.projects[0].links, vec!["https://example.com/kept"]);
        assert_eq!(
            validated.projects[1].links,
            vec!["https://gitlab.com/ada/notes"]
        );
    }

    #[test]
    fn edge_sentences_become_line_breaks() {
        let mut payload = base_payload();
        payload.signature.edge = "I break things first. Then I rebuild them better.".into();
        let validated = validate(payload, &UserMaterials::default()).unwrap();
        assert_eq!(
            validated.signature.edge,
            "I break things first.\nThen I rebuild them better."
        );
    }

    #[test]
    fn derives_style_seed_in_range() {
        let validated = validate(base_payload(), &UserMaterials::default()).unwrap();
        let seed = validated.style_dna.unwrap().style_seed.unwrap();
        assert!((1..=999).contains(&seed));
    }

    #[test]
    fn existing_style_seed_is_kept() {
        let mut payload = base_payload();
        payload.style_dna.as_mut().unwrap().style_seed = Some(42);
        let validated = validate(payload, &UserMaterials::default()).unwrap();
        assert_eq!(validated.style_dna.unwrap().style_seed, Some(42));
    }

    #[test]
    fn missing_style_dna_is_rejected() {
        let payload = AntiPortfolio::default();
        let err = validate(payload, &UserMaterials::default()).unwrap_err();
        assert!(matches!(err, GenerationError::MissingStyle));
    }
}
