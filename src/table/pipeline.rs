//! View pipeline: sort, then filter, then paginate.
//!
//! The pipeline works on indices into the caller's record slice so records
//! are never cloned or mutated. [`render`] is the pure one-shot form;
//! [`DerivedView`] keeps the sorted + filtered order between renders and only
//! rebuilds it when the records, the sort or the filter change.

use std::cmp::Ordering;
use std::ops::Range;

use tracing::debug;

use super::column::Column;
use super::record::{FieldValue, Record};
use super::state::{PageState, SortDirection, SortState};

/// One page of the pipeline output
#[derive(Debug)]
pub struct PageView<'a, R> {
    pub items: Vec<&'a R>,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl<R> PageView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Comparison key extracted once per record before sorting.
///
/// Ordering is total: empty values first, then numeric values by magnitude,
/// then everything else by string comparison.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Empty,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn from_value(value: Option<&FieldValue<'_>>) -> Self {
        let Some(value) = value else {
            return SortKey::Empty;
        };
        if let Some(n) = value.as_number() {
            return SortKey::Number(n);
        }
        let text = value.to_text();
        if text.is_empty() {
            SortKey::Empty
        } else {
            SortKey::Text(text.into_owned())
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two field values the way the sort step does.
///
/// Missing and null values read as the empty string. Two numeric values
/// (numbers, or text that parses as a number) compare numerically.
pub fn compare_values(a: Option<&FieldValue<'_>>, b: Option<&FieldValue<'_>>) -> Ordering {
    SortKey::from_value(a).compare(&SortKey::from_value(b))
}

/// Step 1: stable sort of record indices
pub fn sort_indices<R: Record>(records: &[R], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    let Some(spec) = sort else {
        return order;
    };

    let keys: Vec<SortKey> = records
        .iter()
        .map(|r| SortKey::from_value(r.field(&spec.key).as_ref()))
        .collect();

    // `sort_by` is stable; reversing the comparison keeps ties in input order
    order.sort_by(|&a, &b| {
        let ord = keys[a].compare(&keys[b]);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}

/// Whether any column's value contains `needle` (already lower-cased)
fn matches<R: Record>(record: &R, columns: &[Column], needle: &str) -> bool {
    columns
        .iter()
        .any(|c| record.field_text(&c.key).to_lowercase().contains(needle))
}

/// Step 2: keep records where any column contains the filter text
pub fn filter_indices<R: Record>(
    records: &[R],
    columns: &[Column],
    order: Vec<usize>,
    filter: &str,
) -> Vec<usize> {
    if filter.is_empty() {
        return order;
    }
    let needle = filter.to_lowercase();
    order
        .into_iter()
        .filter(|&i| matches(&records[i], columns, &needle))
        .collect()
}

/// Step 3: index range of the requested page, empty when out of range
pub fn page_range(filtered_count: usize, page: &PageState) -> Range<usize> {
    let size = page.page_size.get();
    let start = page.current_page.saturating_sub(1).saturating_mul(size);
    if start >= filtered_count {
        return filtered_count..filtered_count;
    }
    start..(start + size).min(filtered_count)
}

/// Run the whole pipeline once
pub fn render<'a, R: Record>(
    records: &'a [R],
    columns: &[Column],
    sort: &SortState,
    filter: &str,
    page: &PageState,
) -> PageView<'a, R> {
    let order = filter_indices(records, columns, sort_indices(records, sort), filter);
    slice_page(records, &order, page)
}

fn slice_page<'a, R>(records: &'a [R], order: &[usize], page: &PageState) -> PageView<'a, R> {
    let range = page_range(order.len(), page);
    PageView {
        items: order[range].iter().map(|&i| &records[i]).collect(),
        total_pages: page.total_pages(order.len()),
        filtered_count: order.len(),
    }
}

/// Memoized sort + filter output.
///
/// `generation` identifies the record set: owners bump it whenever they
/// replace their records.
#[derive(Debug, Default)]
pub struct DerivedView {
    key: Option<(u64, SortState, String)>,
    order: Vec<usize>,
}

impl DerivedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the order if the inputs changed. Returns true when recomputed.
    pub fn refresh<R: Record>(
        &mut self,
        generation: u64,
        records: &[R],
        columns: &[Column],
        sort: &SortState,
        filter: &str,
    ) -> bool {
        let unchanged = matches!(
            &self.key,
            Some((g, s, f)) if *g == generation && s == sort && f == filter
        );
        if unchanged {
            return false;
        }

        self.order = filter_indices(records, columns, sort_indices(records, sort), filter);
        self.key = Some((generation, sort.clone(), filter.to_string()));
        debug!(
            generation,
            records = records.len(),
            filtered = self.order.len(),
            "Re-derived table view"
        );
        true
    }

    /// Sorted and filtered record indices
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn filtered_count(&self) -> usize {
        self.order.len()
    }

    pub fn page<'a, R>(&self, records: &'a [R], page: &PageState) -> PageView<'a, R> {
        slice_page(records, &self.order, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record::JsonRecord;
    use crate::table::state::{PageSize, SortSpec};
    use proptest::prelude::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> JsonRecord {
        serde_json::from_value(value).unwrap()
    }

    fn years() -> Vec<JsonRecord> {
        vec![
            rec(json!({"id": "1", "year": 2020})),
            rec(json!({"id": "2", "year": 2019})),
            rec(json!({"id": "3", "year": 2019})),
        ]
    }

    fn year_columns() -> Vec<Column> {
        vec![Column::new("year", "Année").sortable()]
    }

    fn ids<R: Record>(view: &PageView<'_, R>) -> Vec<String> {
        view.items.iter().map(|r| r.id().to_string()).collect()
    }

    fn numbered(count: usize) -> Vec<JsonRecord> {
        (1..=count)
            .map(|i| rec(json!({"id": i.to_string(), "name": format!("item {}", i)})))
            .collect()
    }

    #[test]
    fn test_sort_ascending_keeps_tie_order() {
        let records = years();
        let sort = Some(SortSpec::ascending("year"));
        let view = render(&records, &year_columns(), &sort, "", &PageState::default());
        assert_eq!(ids(&view), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_descending_keeps_tie_order() {
        let records = years();
        let sort = Some(SortSpec::descending("year"));
        let view = render(&records, &year_columns(), &sort, "", &PageState::default());
        assert_eq!(ids(&view), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_on_number_text() {
        let records = years();
        let view = render(&records, &year_columns(), &None, "2020", &PageState::default());
        assert_eq!(ids(&view), vec!["1"]);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.filtered_count, 1);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_column_scoped() {
        let records = vec![
            rec(json!({"id": "a", "name": "Université Laval", "secret": "zzz"})),
            rec(json!({"id": "b", "name": "MIT", "secret": "laval"})),
        ];
        let columns = vec![Column::new("name", "Nom")];
        let view = render(&records, &columns, &None, "LAVAL", &PageState::default());
        assert_eq!(ids(&view), vec!["a"]);
    }

    #[test]
    fn test_partial_last_page() {
        let records = numbered(12);
        let columns = vec![Column::new("name", "Nom")];
        let first = render(&records, &columns, &None, "", &PageState::new(1, PageSize::Five));
        assert_eq!(first.total_pages, 3);
        assert_eq!(ids(&first), vec!["1", "2", "3", "4", "5"]);

        let last = render(&records, &columns, &None, "", &PageState::new(3, PageSize::Five));
        assert_eq!(ids(&last), vec!["11", "12"]);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let records = numbered(3);
        let columns = vec![Column::new("name", "Nom")];
        let view = render(&records, &columns, &None, "", &PageState::new(9, PageSize::Five));
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let records: Vec<JsonRecord> = Vec::new();
        let view = render(&records, &[], &None, "x", &PageState::default());
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 0);

        // No columns: an empty filter still keeps everything
        let records = numbered(2);
        let view = render(&records, &[], &None, "", &PageState::default());
        assert_eq!(view.filtered_count, 2);
        let view = render(&records, &[], &None, "item", &PageState::default());
        assert_eq!(view.filtered_count, 0);
    }

    #[test]
    fn test_missing_values_sort_first() {
        let records = vec![
            rec(json!({"id": "a", "city": "Paris"})),
            rec(json!({"id": "b"})),
            rec(json!({"id": "c", "city": null})),
            rec(json!({"id": "d", "city": "Lyon"})),
        ];
        let sort = Some(SortSpec::ascending("city"));
        let view = render(&records, &[], &sort, "", &PageState::default());
        assert_eq!(ids(&view), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_mixed_number_and_text_years() {
        let records = vec![
            rec(json!({"id": "a", "year": "2021"})),
            rec(json!({"id": "b", "year": 9})),
            rec(json!({"id": "c", "year": 2020})),
        ];
        let sort = Some(SortSpec::ascending("year"));
        let view = render(&records, &[], &sort, "", &PageState::default());
        assert_eq!(ids(&view), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_compare_values() {
        let two = FieldValue::Number(2.0);
        let ten = FieldValue::text("10");
        let word = FieldValue::text("abc");
        assert_eq!(compare_values(Some(&two), Some(&ten)), Ordering::Less);
        assert_eq!(compare_values(Some(&ten), Some(&word)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&two)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&FieldValue::Null)), Ordering::Equal);
    }

    #[test]
    fn test_derived_view_memoizes() {
        let records = years();
        let columns = year_columns();
        let sort = Some(SortSpec::ascending("year"));
        let mut derived = DerivedView::new();

        assert!(derived.refresh(1, &records, &columns, &sort, ""));
        assert!(!derived.refresh(1, &records, &columns, &sort, ""));
        assert!(derived.refresh(1, &records, &columns, &sort, "2019"));
        assert!(derived.refresh(2, &records, &columns, &sort, "2019"));
        assert!(derived.refresh(2, &records, &columns, &None, "2019"));
        assert_eq!(derived.order(), &[1, 2]);

        let view = derived.page(&records, &PageState::default());
        assert_eq!(ids(&view), vec!["2", "3"]);
    }

    // ===== Properties =====

    fn arb_records() -> impl Strategy<Value = Vec<JsonRecord>> {
        prop::collection::vec((0u8..5, "[a-c]{0,3}"), 0..40).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (score, tag))| rec(json!({"id": i.to_string(), "score": score, "tag": tag})))
                .collect()
        })
    }

    fn arb_sort() -> impl Strategy<Value = SortState> {
        prop_oneof![
            Just(None),
            Just(Some(SortSpec::ascending("score"))),
            Just(Some(SortSpec::descending("score"))),
            Just(Some(SortSpec::ascending("tag"))),
            Just(Some(SortSpec::descending("tag"))),
        ]
    }

    fn arb_page_size() -> impl Strategy<Value = PageSize> {
        prop::sample::select(PageSize::ALL.to_vec())
    }

    fn prop_columns() -> Vec<Column> {
        vec![
            Column::new("score", "Score").sortable(),
            Column::new("tag", "Tag").sortable(),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Tied records keep their input order in either direction
        #[test]
        fn sort_is_stable(records in arb_records(), sort in arb_sort()) {
            let order = sort_indices(&records, &sort);
            if let Some(spec) = &sort {
                for pair in order.windows(2) {
                    let a = records[pair[0]].field(&spec.key);
                    let b = records[pair[1]].field(&spec.key);
                    if compare_values(a.as_ref(), b.as_ref()) == Ordering::Equal {
                        prop_assert!(pair[0] < pair[1]);
                    }
                }
            }
            prop_assert_eq!(sort_indices(&records, &sort), order);
        }

        /// A longer filter never matches more records, and matches are a subset
        #[test]
        fn filter_is_monotonic(records in arb_records(), sort in arb_sort(), base in "[a-c0-4]{0,2}", extra in "[a-c0-4]{1,2}") {
            let columns = prop_columns();
            let sorted = sort_indices(&records, &sort);
            let loose = filter_indices(&records, &columns, sorted.clone(), &base);
            let strict = filter_indices(&records, &columns, sorted.clone(), &format!("{}{}", base, extra));
            prop_assert!(strict.len() <= loose.len());
            prop_assert!(loose.iter().all(|i| sorted.contains(i)));
            prop_assert!(strict.iter().all(|i| loose.contains(i)));
        }

        /// Concatenating every page rebuilds the filtered sequence exactly
        #[test]
        fn pages_cover_filtered_set(records in arb_records(), sort in arb_sort(), filter in "[a-c]{0,1}", size in arb_page_size()) {
            let columns = prop_columns();
            let expected: Vec<String> = filter_indices(&records, &columns, sort_indices(&records, &sort), &filter)
                .into_iter()
                .map(|i| records[i].id().to_string())
                .collect();

            let total = PageState::new(1, size).total_pages(expected.len());
            let mut collected = Vec::new();
            for p in 1..=total {
                let view = render(&records, &columns, &sort, &filter, &PageState::new(p, size));
                prop_assert_eq!(view.total_pages, total);
                prop_assert!(!view.items.is_empty());
                collected.extend(view.items.iter().map(|r| r.id().to_string()));
            }
            prop_assert_eq!(collected, expected);
        }

        /// Same inputs, same output
        #[test]
        fn render_is_idempotent(records in arb_records(), sort in arb_sort(), filter in "[a-c]{0,2}", page in 1usize..6, size in arb_page_size()) {
            let columns = prop_columns();
            let state = PageState::new(page, size);
            let first = ids(&render(&records, &columns, &sort, &filter, &state));
            let second = ids(&render(&records, &columns, &sort, &filter, &state));
            prop_assert_eq!(first, second);
        }
    }
}
