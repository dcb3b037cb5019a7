//! Display-sequence derivation: search filtering and stable column sorting.

use std::cmp::Ordering;

use crate::record::{ColumnKey, Record};

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey<'a> {
    Integer(i64),
    String(&'a str),
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Returns the sort key of `record` for `column`, or `None` for list columns.
pub fn sort_key(record: &Record, column: ColumnKey) -> Option<SortKey<'_>> {
    match column {
        ColumnKey::Id => Some(SortKey::Integer(record.id)),
        ColumnKey::Rating => Some(SortKey::Integer(record.rating)),
        ColumnKey::Name => Some(SortKey::String(&record.name)),
        ColumnKey::Explanation => Some(SortKey::String(&record.explanation)),
        ColumnKey::Powers | ColumnKey::Tips => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

/// Normalizes a raw search term: trimmed and lowercased. Empty means no filter.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Derives the display sequence as indices into `canonical`.
///
/// Filters by `term` (already normalized) and stable-sorts by `directive`.
/// Records equal on the sort key keep their canonical relative order in both
/// directions.
pub fn derive_display(
    canonical: &[Record],
    term: &str,
    directive: Option<SortDirective>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = canonical
        .iter()
        .enumerate()
        .filter(|(_, record)| term.is_empty() || record.matches(term))
        .map(|(i, _)| i)
        .collect();

    if let Some(directive) = directive {
        indices.sort_by(|&a, &b| {
            let key_a = sort_key(&canonical[a], directive.key);
            let key_b = sort_key(&canonical[b], directive.key);
            let cmp = key_a.partial_cmp(&key_b).unwrap_or(Ordering::Equal);
            match directive.direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, rating: i64) -> Record {
        Record {
            id,
            name: name.to_string(),
            rating,
            ..Record::default()
        }
    }

    fn fixture() -> Vec<Record> {
        vec![
            record(1, "Pika", 90),
            record(2, "Char", 70),
            record(3, "Bulba", 90),
            Record {
                powers: vec!["Pikachu Punch".to_string()],
                ..record(4, "Mime", 60)
            },
        ]
    }

    fn ids(canonical: &[Record], indices: &[usize]) -> Vec<i64> {
        indices.iter().map(|&i| canonical[i].id).collect()
    }

    #[test]
    fn test_empty_term_keeps_canonical_order() {
        let rs = fixture();
        assert_eq!(ids(&rs, &derive_display(&rs, "", None)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_is_subsequence_and_matches() {
        let rs = fixture();
        let term = normalize_term("  PIK ");
        let shown = derive_display(&rs, &term, None);
        assert_eq!(ids(&rs, &shown), vec![1, 4]);
        assert!(shown.windows(2).all(|w| w[0] < w[1]));
        assert!(shown.iter().all(|&i| rs[i].matches(&term)));
    }

    #[test]
    fn test_numeric_sort_is_stable_in_both_directions() {
        let rs = fixture();
        let asc = SortDirective {
            key: ColumnKey::Rating,
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&rs, &derive_display(&rs, "", Some(asc))), vec![4, 2, 1, 3]);

        let desc = SortDirective {
            direction: SortDirection::Descending,
            ..asc
        };
        assert_eq!(ids(&rs, &derive_display(&rs, "", Some(desc))), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_text_sort_is_lexicographic() {
        let rs = fixture();
        let by_name = SortDirective {
            key: ColumnKey::Name,
            direction: SortDirection::Ascending,
        };
        assert_eq!(
            ids(&rs, &derive_display(&rs, "", Some(by_name))),
            vec![3, 2, 4, 1]
        );
    }

    #[test]
    fn test_list_columns_have_no_sort_key() {
        let r = record(1, "Pika", 90);
        assert!(sort_key(&r, ColumnKey::Powers).is_none());
        assert!(sort_key(&r, ColumnKey::Tips).is_none());
        assert_eq!(sort_key(&r, ColumnKey::Rating), Some(SortKey::Integer(90)));
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(
            SortDirection::Ascending.toggled().toggled(),
            SortDirection::Ascending
        );
    }
}
