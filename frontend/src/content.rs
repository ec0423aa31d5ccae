use std::collections::HashSet;

use serde::Deserialize;

use crate::error::UiError;

const CATALOG_JSON: &str = include_str!("../content/catalog.json");

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub desc: String,
    pub features: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CoachingModule {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount_label: Option<String>,
    pub description: String,
    pub duration: String,
    pub syllabus: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PricingTier {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount_label: Option<String>,
    #[serde(default)]
    pub recommended: bool,
    pub features: Vec<String>,
    pub description: String,
    pub service_level: String,
    pub equipment_policy: String,
    #[serde(default)]
    pub exclusive_perks: Vec<String>,
}

impl PricingTier {
    /// Discounted tiers show the discount badge instead of "recommended".
    pub fn shows_recommended(&self) -> bool {
        self.recommended && self.discount_label.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Roster {
    Male,
    Female,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    pub missions: Vec<Mission>,
    pub coaching: Vec<CoachingModule>,
    pub male_pricing: Vec<PricingTier>,
    pub female_pricing: Vec<PricingTier>,
}

impl Catalog {
    pub fn load() -> Result<Self, UiError> {
        Self::parse(CATALOG_JSON)
    }

    pub fn parse(json: &str) -> Result<Self, UiError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    pub fn tiers(&self, roster: Roster) -> &[PricingTier] {
        match roster {
            Roster::Male => &self.male_pricing,
            Roster::Female => &self.female_pricing,
        }
    }

    fn check_unique_ids(&self) -> Result<(), UiError> {
        let ids = self
            .missions
            .iter()
            .map(|m| &m.id)
            .chain(self.coaching.iter().map(|c| &c.id))
            .chain(self.male_pricing.iter().map(|t| &t.id))
            .chain(self.female_pricing.iter().map(|t| &t.id));
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(UiError::Catalog(format!("duplicate id `{}`", id)));
            }
        }
        Ok(())
    }
}
