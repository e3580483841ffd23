//! Attribute filter validation

use crate::catalogue::{Column, TableDescriptor};
use crate::error::{GeoappError, Result};

/// One equality predicate against a declared column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static Column,
    pub value: String,
}

/// Filters accepted for one table, AND-ed together
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Validate candidate filters against a table's declared columns.
///
/// Every unknown key is collected before failing, in first-seen order, so a
/// caller can fix all of them in one round-trip. Values are kept verbatim.
pub fn validate_filters<K, V>(
    descriptor: &TableDescriptor,
    candidates: impl IntoIterator<Item = (K, V)>,
) -> Result<FilterSet>
where
    K: AsRef<str>,
    V: Into<String>,
{
    let mut filters = Vec::new();
    let mut invalid: Vec<String> = Vec::new();

    for (key, value) in candidates {
        let key = key.as_ref();
        match descriptor.column(key) {
            Some(column) => filters.push(Filter { column, value: value.into() }),
            None => {
                if !invalid.iter().any(|name| name == key) {
                    invalid.push(key.to_string());
                }
            }
        }
    }

    if !invalid.is_empty() {
        return Err(GeoappError::InvalidFilters { names: invalid });
    }

    Ok(FilterSet { filters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::FeatureCatalogue;
    use proptest::prelude::*;

    fn stations() -> TableDescriptor {
        FeatureCatalogue::nyc().resolve("nyc_subway_stations").unwrap().clone()
    }

    #[test]
    fn test_accepts_declared_columns() {
        let filters =
            validate_filters(&stations(), vec![("gid", "1"), ("borough", "Brooklyn")]).unwrap();
        assert_eq!(filters.len(), 2);
        let names: Vec<_> = filters.iter().map(|f| f.column.name).collect();
        assert_eq!(names, vec!["gid", "borough"]);
        assert_eq!(filters.iter().next().unwrap().value, "1");
    }

    #[test]
    fn test_empty_candidates() {
        let filters = validate_filters(&stations(), Vec::<(String, String)>::new()).unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_reports_every_invalid_key() {
        let result = validate_filters(
            &stations(),
            vec![("colour", "red"), ("gid", "1"), ("size", "L"), ("colour", "blue")],
        );
        match result {
            Err(GeoappError::InvalidFilters { names }) => {
                assert_eq!(names, vec!["colour".to_string(), "size".to_string()]);
            }
            other => panic!("Expected InvalidFilters, got {:?}", other),
        }
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!(validate_filters(&stations(), vec![("GID", "1")]).is_err());
    }

    #[test]
    fn test_geometry_column_is_a_declared_key() {
        let neighborhoods =
            FeatureCatalogue::nyc().resolve("nyc_neighborhoods").unwrap().clone();
        assert!(validate_filters(&neighborhoods, vec![("geom_invalid", "x")]).is_ok());
    }

    proptest! {
        #[test]
        fn prop_invalid_keys_all_reported(
            unknown in proptest::collection::btree_set("[A-Z]{3,8}", 1..6)
        ) {
            let candidates: Vec<(String, String)> = unknown
                .iter()
                .map(|k| (k.clone(), "v".to_string()))
                .chain(std::iter::once(("gid".to_string(), "1".to_string())))
                .collect();

            match validate_filters(&stations(), candidates) {
                Err(GeoappError::InvalidFilters { names }) => {
                    let expected: Vec<String> = unknown.into_iter().collect();
                    prop_assert_eq!(names, expected);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
