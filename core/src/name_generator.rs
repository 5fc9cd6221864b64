//! Deterministic institution name generation for synthetic directories.
//!
//! Same RNG seed = same names. Names are not unique; client ids are.

use crate::rng::SeededRng;

pub struct NameGenerator;

impl NameGenerator {
    /// "Prefix Qualifier" with an optional regional suffix,
    /// e.g. "Caisse Mutuelle de Bretagne".
    pub fn generate_institution_name(rng: &mut SeededRng) -> String {
        let prefix = rng.pick(Self::prefixes());
        let qualifier = rng.pick(Self::qualifiers());
        if rng.chance(0.5) {
            let region = rng.pick(Self::regions());
            format!("{prefix} {qualifier} {region}")
        } else {
            format!("{prefix} {qualifier}")
        }
    }

    pub fn generate_institution_type(rng: &mut SeededRng) -> &'static str {
        *rng.pick(Self::institution_types())
    }

    fn prefixes() -> &'static [&'static str] {
        &["Banque", "Crédit", "Caisse", "Société", "Union", "Compagnie", "Groupe"]
    }

    fn qualifiers() -> &'static [&'static str] {
        &[
            "Populaire", "Régionale", "Mutuelle", "Centrale", "Maritime",
            "Agricole", "Industrielle", "Commerciale", "Coopérative", "Fédérale",
        ]
    }

    fn regions() -> &'static [&'static str] {
        &[
            "du Nord", "de l'Ouest", "du Rhône", "d'Alsace", "de Bretagne",
            "de Provence", "du Centre", "de Normandie", "du Sud-Ouest", "d'Auvergne",
        ]
    }

    fn institution_types() -> &'static [&'static str] {
        &["Banque", "Assurance", "Société de gestion", "Entreprise"]
    }
}
