//! Membership rules: team eligibility and item/team category compatibility.
//!
//! The original UI enforced these checks ad hoc at every call site, each with
//! its own copy of the accent-stripping comparison. This module is the single
//! place category strings are normalized or compared; every team mutation
//! routes through `can_join`.

use crate::modules::catalog::domain::{CatalogItem, Category};
use crate::modules::teams::domain::entities::Team;
use crate::shared::errors::{AppError, AppResult};

/// Categories a team can be created for
pub const TEAM_ELIGIBLE: [Category; 3] = [Category::Pokemon, Category::Marvel, Category::StarWars];

pub struct MembershipRules;

impl MembershipRules {
    /// Fold a raw category string to a canonical comparison form: lowercase,
    /// accents stripped, whitespace collapsed to single spaces.
    pub fn normalize_category(raw: &str) -> String {
        let folded: String = raw
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
                'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
                'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
                'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
                'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
                'ñ' | 'Ñ' => 'n',
                _ => c,
            })
            .collect::<String>()
            .to_lowercase();

        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Parse a raw category string (display name or slug, any casing or
    /// accenting) into the enum. The only place raw strings become categories.
    pub fn parse_category(raw: &str) -> Option<Category> {
        let normalized = Self::normalize_category(raw);
        Category::ALL.into_iter().find(|category| {
            Self::normalize_category(category.display_name()) == normalized
                || category.slug() == normalized.replace(' ', "-")
        })
    }

    pub fn is_team_eligible(category: Category) -> bool {
        TEAM_ELIGIBLE.contains(&category)
    }

    /// Gate for `add_member`/`toggle_member`: the team's category must be
    /// eligible and must equal the item's category.
    pub fn can_join(item: &CatalogItem, team: &Team) -> AppResult<()> {
        if !Self::is_team_eligible(team.category) {
            return Err(AppError::NotEligible(
                team.category.display_name().to_string(),
            ));
        }
        if item.category != team.category {
            return Err(AppError::CategoryMismatch {
                item_category: item.category.display_name().to_string(),
                team_category: team.category.display_name().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(MembershipRules::normalize_category("Pokémon"), "pokemon");
        assert_eq!(MembershipRules::normalize_category("PELÍCULAS"), "peliculas");
        assert_eq!(
            MembershipRules::normalize_category("  Star   Wars "),
            "star wars"
        );
    }

    #[test]
    fn test_parse_category_accepts_display_names_and_slugs() {
        assert_eq!(
            MembershipRules::parse_category("Pokémon"),
            Some(Category::Pokemon)
        );
        assert_eq!(
            MembershipRules::parse_category("pokemon"),
            Some(Category::Pokemon)
        );
        assert_eq!(
            MembershipRules::parse_category("star wars"),
            Some(Category::StarWars)
        );
        assert_eq!(
            MembershipRules::parse_category("peliculas"),
            Some(Category::Movies)
        );
        assert_eq!(MembershipRules::parse_category("klingon"), None);
    }

    #[test]
    fn test_team_eligibility_is_the_fixed_subset() {
        assert!(MembershipRules::is_team_eligible(Category::Pokemon));
        assert!(MembershipRules::is_team_eligible(Category::Marvel));
        assert!(MembershipRules::is_team_eligible(Category::StarWars));
        assert!(!MembershipRules::is_team_eligible(Category::Anime));
        assert!(!MembershipRules::is_team_eligible(Category::Dogs));
    }

    #[test]
    fn test_can_join_rejects_category_mismatch() {
        let team = Team::new("Gen1".to_string(), Category::Pokemon);
        let item = CatalogItem::new("1", Category::Marvel, "Iron Man", "https://img/1.png");

        let err = MembershipRules::can_join(&item, &team).unwrap_err();
        assert!(matches!(err, AppError::CategoryMismatch { .. }));

        let ok_item = CatalogItem::new("25", Category::Pokemon, "pikachu", "https://img/25.png");
        assert!(MembershipRules::can_join(&ok_item, &team).is_ok());
    }
}
