use std::cmp::Ordering;

use proptest::prelude::*;
use tabula::export::Grid;
use tabula::paginator::Paginator;
use tabula::prelude::*;
use tabula::sort::stable_sort_by;

#[derive(Debug, Clone)]
struct Row {
    id: usize,
    score: i64,
    label: String,
}

fn rows(scores: &[i64]) -> Vec<Row> {
    scores
        .iter()
        .enumerate()
        .map(|(id, &score)| Row {
            id,
            score,
            label: format!("r{}", score.rem_euclid(5)),
        })
        .collect()
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("Score")
            .accessor(|r: &Row| r.score.into())
            .sortable(true),
        Column::new("Label")
            .accessor(|r: &Row| r.label.as_str().into())
            .sortable(true),
    ]
}

fn ids(table: &Table<Row>) -> Vec<usize> {
    table.sorted_rows().iter().map(|r| r.record.id).collect()
}

fn mixed_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,6}".prop_map(Value::Text),
    ]
}

proptest! {
    #[test]
    fn test_paginator_invariants(
        per_page in 1usize..100,
        page in 0usize..2000, // deliberately past the last page
        item_count in 0usize..10000
    ) {
        let mut p = Paginator::new().per_page(per_page);
        p.set_total_pages_from_items(item_count);
        p.set_page(page);

        prop_assert!(p.page() >= 1);
        prop_assert!(p.page() <= p.total_pages());

        let (start, end) = p.get_slice_bounds(item_count);
        prop_assert!(start <= end);
        prop_assert!(end <= item_count);
        prop_assert!(end - start <= per_page);
    }

    #[test]
    fn test_first_page_row_count(
        total in 0usize..300,
        page_size in 1usize..60
    ) {
        let scores: Vec<i64> = (0..total as i64).collect();
        let mut table = Table::new(columns(), rows(&scores), TableOptions::new());
        table.set_page_size(page_size);
        prop_assert_eq!(table.rows().len(), total.min(page_size));
    }

    #[test]
    fn test_page_stays_in_range_after_data_change(
        before in 0usize..200,
        after in 0usize..200,
        page in 1usize..30
    ) {
        let mut table = Table::new(columns(), rows(&vec![0; before]), TableOptions::new());
        table.set_page(page);
        table.set_data(rows(&vec![0; after]));

        prop_assert!(table.page() >= 1);
        prop_assert!(table.page() <= table.total_pages());
        prop_assert_eq!(table.total_pages(), after.div_ceil(10).max(1));
    }

    #[test]
    fn test_sort_is_ordered_and_stable(scores in prop::collection::vec(-50i64..50, 0..200)) {
        let mut table = Table::new(columns(), rows(&scores), TableOptions::new());
        table.sort_by("Score");
        let asc = ids(&table);

        for pair in asc.windows(2) {
            let (a, b) = (scores[pair[0]], scores[pair[1]]);
            prop_assert!(a < b || (a == b && pair[0] < pair[1]));
        }

        table.sort_by("Score");
        let desc = ids(&table);
        for pair in desc.windows(2) {
            let (a, b) = (scores[pair[0]], scores[pair[1]]);
            prop_assert!(a > b || (a == b && pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_sort_twice_returns_to_same_order(scores in prop::collection::vec(-50i64..50, 0..100)) {
        let mut table = Table::new(columns(), rows(&scores), TableOptions::new());
        table.sort_by("Label");
        let first = ids(&table);
        table.sort_by("Label");
        table.sort_by("Label");
        prop_assert_eq!(ids(&table), first);
    }

    #[test]
    fn test_mixed_values_sort_to_a_permutation(values in prop::collection::vec(mixed_value(), 0..100)) {
        let mut order: Vec<usize> = (0..values.len()).collect();
        stable_sort_by(&mut order, |&a, &b| values[a].compare(&values[b]));

        let mut seen = order.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..values.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_stable_sort_matches_std(items in prop::collection::vec((0u8..10, any::<u16>()), 0..200)) {
        let mut ours = items.clone();
        stable_sort_by(&mut ours, |a, b| a.0.cmp(&b.0));
        let mut std_sorted = items;
        std_sorted.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(ours, std_sorted);
    }

    #[test]
    fn test_selection_subset_of_data(
        total in 1u64..60,
        toggles in prop::collection::vec(0u64..80, 0..40),
        keep in 0u64..60
    ) {
        let data: Vec<u64> = (0..total).collect();
        let columns = vec![Column::new("N").accessor(|n: &u64| (*n).into())];
        let mut table = Table::new(columns, data, TableOptions::new().selection(true))
            .key_fn(|n: &u64| (*n).into());

        for key in toggles {
            table.toggle_row_selection(key);
        }
        for key in table.selected_keys() {
            let n: u64 = key.as_str().parse().unwrap();
            prop_assert!(n < total);
        }

        table.set_data((0..keep.min(total)).collect());
        for key in table.selected_keys() {
            let n: u64 = key.as_str().parse().unwrap();
            prop_assert!(n < keep);
        }
    }

    #[test]
    fn test_csv_fields_are_quoted(cells in prop::collection::vec("\\PC{0,12}", 1..6)) {
        let grid = Grid::new(vec!["H".to_string(); cells.len()], vec![cells.clone()]);
        let csv = grid.to_csv();
        let body = csv.lines().nth(1).unwrap_or_default().to_string();

        let expected: Vec<String> = cells
            .iter()
            .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
            .collect();
        if cells.iter().all(|c| !c.contains('\n') && !c.contains('\r')) {
            prop_assert_eq!(body, expected.join(","));
        }
    }

    #[test]
    fn test_number_compare_is_antisymmetric(a in any::<f64>(), b in any::<f64>()) {
        let (va, vb) = (Value::Number(a), Value::Number(b));
        prop_assert_eq!(va.compare(&vb), vb.compare(&va).reverse());
        prop_assert_eq!(va.compare(&va), Ordering::Equal);
        if a.is_nan() || b.is_nan() || a == b {
            prop_assert_eq!(va.compare(&vb), Ordering::Equal);
        }
    }
}
