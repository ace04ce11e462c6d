//! Derived view: filter → sort → paginate
//!
//! Pure functions over borrowed records. The controller calls
//! [`derive_view`] after every state transition; nothing here mutates the
//! record set.

use std::cmp::Ordering;

use serde_json::Value;

use crate::types::{PageView, Record, ResourceSchema, SortConfig, SortDirection, ViewState};

/// Keep records where at least one of `fields` contains `term`,
/// case-insensitively. An empty term keeps everything.
pub fn filter_records<'a>(records: &'a [Record], fields: &[&str], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                record
                    .text(field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Rank of a JSON value type in the cross-type ordering.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_) | Value::Object(_)) => 4,
    }
}

/// Total order over field values.
///
/// Strings compare lexicographically and case-sensitively, numbers
/// numerically. Mixed types order as absent/null < bool < number < string <
/// composite, so the comparison stays total.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Stable sort by one field. Equal keys keep their input order in both
/// directions.
pub fn sort_records(records: &mut [&Record], sort: &SortConfig) {
    records.sort_by(|a, b| {
        let ord = compare_values(a.get(&sort.key), b.get(&sort.key));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// `max(1, ceil(count / page_size))`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice one page out of `records`, clamping `page` into range.
pub fn paginate<'a>(records: &[&'a Record], page: usize, page_size: usize) -> PageView<'a> {
    let page_size = page_size.max(1);
    let total_count = records.len();
    let total_pages = total_pages(total_count, page_size);
    let current_page = page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_count);
    let items = records.get(start..end).map(<[_]>::to_vec).unwrap_or_default();

    PageView {
        items,
        current_page,
        total_pages,
        total_count,
        page_size,
    }
}

/// Derive the visible page from the full record set and the view state.
pub fn derive_view<'a>(
    records: &'a [Record],
    schema: &ResourceSchema,
    state: &ViewState,
    page_size: usize,
) -> PageView<'a> {
    let searchable: Vec<&str> = schema.searchable_fields().map(|f| f.name.as_str()).collect();
    let mut visible = filter_records(records, &searchable, &state.search_term);
    if let Some(sort) = &state.sort {
        sort_records(&mut visible, sort);
    }
    paginate(&visible, state.current_page, page_size)
}
