//! Text and category filter stage
//!
//! Pure predicates over catalog records. Empty inputs widen the result to
//! "match all"; nothing here can fail.

use crate::catalog::Record;
use crate::query::CategoryFilter;

/// Keep the records matching both the free-text query and the category
///
/// Source order is preserved.
pub fn filter_records<'a, R: Record>(
    records: &'a [R],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a R> {
    let needle = query.trim().to_lowercase();

    records
        .iter()
        .filter(|r| matches_query(*r, &needle) && matches_category(*r, category))
        .collect()
}

/// Case-insensitive substring match against any searchable field
///
/// `needle` must already be trimmed and lowercased; an empty needle matches
/// every record.
pub fn matches_query<R: Record>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Category membership check
pub fn matches_category<R: Record>(record: &R, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(label) => record.has_category(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, DealerCategory, Record};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = catalog();
        let dealers = catalog.dealers();

        for query in ["", "   "] {
            let hits = filter_records(dealers, query, &CategoryFilter::All);
            assert_eq!(hits.len(), dealers.len());
            assert!(hits.iter().zip(dealers).all(|(a, b)| std::ptr::eq(*a, b)));
        }
    }

    #[test]
    fn test_query_accra() {
        let catalog = catalog();
        let hits = filter_records(catalog.dealers(), "accra", &CategoryFilter::All);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Accra");
        assert_eq!(hits[0].country, "Ghana");
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = catalog();
        let lower = filter_records(catalog.dealers(), "nigeria", &CategoryFilter::All);
        let upper = filter_records(catalog.dealers(), "NIGERIA", &CategoryFilter::All);

        assert_eq!(lower.len(), 2);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_query_matches_address() {
        let catalog = catalog();
        let hits = filter_records(catalog.dealers(), "cairo road", &CategoryFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Lusaka");
    }

    #[test]
    fn test_category_training() {
        let catalog = catalog();
        let hits = filter_records(
            catalog.dealers(),
            "",
            &CategoryFilter::Only("training".to_string()),
        );

        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|d| d.categories.contains(&DealerCategory::Training)));

        let expected = catalog
            .dealers()
            .iter()
            .filter(|d| d.categories.contains(&DealerCategory::Training))
            .count();
        assert_eq!(hits.len(), expected);
    }

    #[test]
    fn test_query_and_category_combine() {
        let catalog = catalog();
        let hits = filter_records(
            catalog.dealers(),
            "nigeria",
            &CategoryFilter::Only("training".to_string()),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Abuja");
    }

    #[test]
    fn test_no_results_is_empty_not_error() {
        let catalog = catalog();
        let hits = filter_records(catalog.dealers(), "reykjavik", &CategoryFilter::All);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_products_search_description() {
        let catalog = catalog();
        let hits = filter_records(catalog.products(), "battery", &CategoryFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Volt E1");

        let cargo = filter_records(
            catalog.products(),
            "",
            &CategoryFilter::Only("cargo".to_string()),
        );
        assert!(cargo.iter().all(|p| p.has_category("cargo")));
    }
}
