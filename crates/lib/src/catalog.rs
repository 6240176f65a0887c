//! # Location Catalog
//!
//! A static mapping from Lagos area names to one-line descriptions of the
//! local market. The context line is embedded into the insight prompt so
//! the model starts from known ground truth about the area instead of
//! guessing. Lookups are case-sensitive exact matches; unknown areas fall
//! back to a generic Lagos description rather than failing.

/// The fallback context used when an area is not in the catalog.
pub const DEFAULT_AREA_CONTEXT: &str = "Mixed commercial and residential area in Lagos";

/// Supported Lagos areas and their market context lines.
const LAGOS_AREAS: &[(&str, &str)] = &[
    (
        "Ikeja",
        "Commercial hub, offices, Computer Village tech market, middle to upper-middle class",
    ),
    (
        "Lekki",
        "Upscale residential, young professionals, expats, high purchasing power",
    ),
    (
        "Surulere",
        "Established residential, mixed income, strong community, price-conscious",
    ),
    (
        "Oshodi",
        "Transport hub, very high foot traffic, price-sensitive, bulk buyers",
    ),
    (
        "Victoria Island",
        "Business district, high-end clientele, corporate workers, premium pricing",
    ),
    (
        "Yaba",
        "Tech hub, students, startups, young demographics, value for money",
    ),
    (
        "Ikorodu",
        "Suburban, family-oriented, growing middle class, value-conscious",
    ),
    (
        "Ajah",
        "Rapidly developing, young families, commuters, competitive pricing",
    ),
    (
        "Maryland",
        "Commercial, residential mix, consistent foot traffic, middle class",
    ),
    (
        "Festac",
        "Large residential, community-focused, diverse demographics",
    ),
];

/// Returns the market context line for `location`.
///
/// Unknown locations are not an error: they resolve to
/// [`DEFAULT_AREA_CONTEXT`] so a prompt can always be built.
pub fn area_context(location: &str) -> &'static str {
    LAGOS_AREAS
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, context)| *context)
        .unwrap_or(DEFAULT_AREA_CONTEXT)
}

/// The list of areas the catalog knows about, in catalog order.
pub fn supported_areas() -> Vec<&'static str> {
    LAGOS_AREAS.iter().map(|(name, _)| *name).collect()
}

/// All catalog entries as `(area, context)` pairs, for the locations
/// endpoint.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    LAGOS_AREAS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_area_resolves_to_its_context() {
        assert!(area_context("Ikeja").contains("Computer Village"));
        assert!(area_context("Yaba").contains("Tech hub"));
    }

    #[test]
    fn unknown_area_falls_back_to_generic_context() {
        assert_eq!(area_context("Atlantis"), DEFAULT_AREA_CONTEXT);
        // Lookups are exact-match, so casing matters.
        assert_eq!(area_context("ikeja"), DEFAULT_AREA_CONTEXT);
    }

    #[test]
    fn supported_areas_matches_catalog_size() {
        assert_eq!(supported_areas().len(), entries().len());
    }
}
