//! End-to-end tests for the table engine.
//!
//! Test categories:
//! - Sorting: initial sort, header clicks, stability
//! - Pagination: page sizes, clamping, page preserved across re-sorts
//! - Selection: per-page select-all, pruning, change notifications
//! - Export: CSV quoting, spreadsheet layout, disabled columns, sinks

#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use tabula::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Partner {
    id: u32,
    name: String,
    age: u32,
    active: bool,
}

fn partner(id: u32, name: &str, age: u32) -> Partner {
    Partner {
        id,
        name: name.to_string(),
        age,
        active: id % 2 == 0,
    }
}

fn name_age_columns() -> Vec<Column<Partner>> {
    vec![
        Column::new("Name")
            .accessor(|p: &Partner| p.name.as_str().into())
            .sortable(true),
        Column::new("Age")
            .accessor(|p: &Partner| p.age.into())
            .sortable(true),
    ]
}

fn many(n: u32) -> Vec<Partner> {
    (1..=n).map(|i| partner(i, &format!("Partner {i:03}"), 20 + i % 7)).collect()
}

fn by_id(table: Table<Partner>) -> Table<Partner> {
    table.key_fn(|p: &Partner| u64::from(p.id).into())
}

fn visible_names(table: &Table<Partner>) -> Vec<String> {
    table.rows().iter().map(|r| r.record.name.clone()).collect()
}

fn visible_ids(table: &Table<Partner>) -> Vec<u32> {
    table.rows().iter().map(|r| r.record.id).collect()
}

// ============================================================================
// Sorting
// ============================================================================

mod sorting_tests {
    use super::*;

    #[test]
    fn test_name_then_age_scenario() {
        let data = vec![partner(1, "Bob", 30), partner(2, "Ana", 25)];
        let mut table = Table::new(
            name_age_columns(),
            data,
            TableOptions::new().initial_sort(SortState::asc("Name")),
        );
        assert_eq!(visible_names(&table), ["Ana", "Bob"]);

        table.sort_by("Age");
        let ages: Vec<u32> = table.rows().iter().map(|r| r.record.age).collect();
        assert_eq!(visible_names(&table), ["Ana", "Bob"]);
        assert_eq!(ages, [25, 30]);
        assert_eq!(table.sort_state(), Some(&SortState::asc("Age")));
    }

    #[test]
    fn test_header_clicks_cycle_asc_desc_asc() {
        let data = vec![partner(1, "Bob", 30), partner(2, "Ana", 25), partner(3, "Cai", 28)];
        let mut table = Table::new(name_age_columns(), data, TableOptions::new());

        table.sort_by("Age");
        assert_eq!(visible_ids(&table), [2, 3, 1]);
        table.sort_by("Age");
        assert_eq!(visible_ids(&table), [1, 3, 2]);
        table.sort_by("Age");
        assert_eq!(visible_ids(&table), [2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_data_order_in_both_directions() {
        let data = vec![
            partner(1, "x", 30),
            partner(2, "y", 25),
            partner(3, "z", 30),
            partner(4, "w", 25),
        ];
        let mut table = Table::new(name_age_columns(), data, TableOptions::new());
        table.sort_by("Age");
        assert_eq!(visible_ids(&table), [2, 4, 1, 3]);
        table.sort_by("Age");
        assert_eq!(visible_ids(&table), [1, 3, 2, 4]);
    }

    #[test]
    fn test_case_insensitive_text_sort() {
        let data = vec![partner(1, "bravo", 1), partner(2, "Alpha", 1), partner(3, "charlie", 1)];
        let mut table = Table::new(name_age_columns(), data, TableOptions::new());
        table.sort_by("Name");
        assert_eq!(visible_names(&table), ["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_sort_value_extractor_overrides_accessor() {
        let columns = vec![
            Column::new("Name")
                .accessor(|p: &Partner| p.name.as_str().into())
                .sort_value(|p: &Partner| p.name.len().into())
                .sortable(true),
        ];
        let data = vec![partner(1, "Maximilian", 1), partner(2, "Al", 1), partner(3, "Joana", 1)];
        let mut table = Table::new(columns, data, TableOptions::new());
        table.sort_by("Name");
        assert_eq!(visible_names(&table), ["Al", "Joana", "Maximilian"]);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let dates = [
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 12, 31, 0, 0, 0).unwrap(),
        ];
        let columns = vec![
            Column::new("Since")
                .accessor(move |p: &Partner| dates[p.id as usize].into())
                .sortable(true),
        ];
        let data = vec![partner(0, "a", 1), partner(1, "b", 1), partner(2, "c", 1)];
        let mut table = Table::new(columns, data, TableOptions::new());
        table.sort_by("Since");
        assert_eq!(visible_ids(&table), [1, 2, 0]);
    }

    #[test]
    fn test_equal_numbers_keep_data_order() {
        let columns = vec![
            Column::new("V")
                .accessor(|r: &(u32, f64)| r.1.into())
                .sortable(true),
        ];
        let data = vec![(1, 0.0), (2, -0.0), (3, f64::NAN), (4, 0.0)];
        let mut table = Table::new(columns, data, TableOptions::new());

        table.sort_by("V");
        let ids: Vec<u32> = table.rows().iter().map(|r| r.record.0).collect();
        assert_eq!(ids, [1, 2, 3, 4]);

        table.sort_by("V");
        let ids: Vec<u32> = table.rows().iter().map(|r| r.record.0).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn test_unsortable_column_click_is_noop() {
        let mut columns = name_age_columns();
        columns.push(Column::new("Active").accessor(|p: &Partner| p.active.into()));
        let data = vec![partner(1, "Bob", 30), partner(2, "Ana", 25)];
        let mut table = Table::new(columns, data, TableOptions::new());
        table.sort_by("Active");
        assert!(table.sort_state().is_none());
        assert_eq!(visible_ids(&table), [1, 2]);
    }
}

// ============================================================================
// Pagination
// ============================================================================

mod pagination_tests {
    use super::*;

    #[test]
    fn test_first_page_shows_min_of_page_size_and_total() {
        for total in [0, 3, 10, 11, 57] {
            let table = Table::new(name_age_columns(), many(total), TableOptions::new());
            assert_eq!(table.rows().len(), (total as usize).min(10), "total={total}");
        }
    }

    #[test]
    fn test_disabled_pagination_shows_all_rows() {
        let table = Table::new(name_age_columns(), many(57), TableOptions::new().pagination(false));
        assert_eq!(table.rows().len(), 57);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut table = Table::new(name_age_columns(), many(120), TableOptions::new());
        table.set_page(7);
        assert_eq!(table.page(), 7);
        table.set_page_size(50);
        assert_eq!(table.page(), 1);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(visible_ids(&table).first(), Some(&1));
    }

    #[test]
    fn test_page_clamped_after_data_shrinks() {
        let mut table = Table::new(name_age_columns(), many(95), TableOptions::new());
        table.set_page(10);
        assert_eq!(visible_ids(&table), (91..=95).collect::<Vec<_>>());

        table.set_data(many(31));
        assert_eq!(table.page(), 4);
        assert_eq!(visible_ids(&table), [31]);
    }

    #[test]
    fn test_resort_keeps_page_number() {
        // Re-sorting leaves the page index alone, so page 2 now shows a
        // different slice of the data.
        let mut table = Table::new(name_age_columns(), many(25), TableOptions::new());
        table.set_page(2);
        let before = visible_ids(&table);

        table.sort_by("Name");
        table.sort_by("Name");
        assert_eq!(table.page(), 2);
        assert_eq!(visible_ids(&table), (6..=15).rev().collect::<Vec<_>>());
        assert_ne!(visible_ids(&table), before);
    }
}

// ============================================================================
// Selection
// ============================================================================

mod selection_tests {
    use super::*;

    #[test]
    fn test_select_all_is_scoped_to_current_page() {
        let mut table = by_id(Table::new(
            name_age_columns(),
            many(20),
            TableOptions::new().selection(true),
        ));

        table.toggle_select_all_visible();
        table.set_page(2);
        assert!(table.rows().iter().all(|r| !table.is_selected(r.key)));
        assert!(!table.all_visible_selected());

        table.set_page(1);
        assert!(table.rows().iter().all(|r| table.is_selected(r.key)));
        assert!(table.all_visible_selected());
    }

    #[test]
    fn test_removed_record_leaves_selection() {
        let mut table = by_id(Table::new(
            name_age_columns(),
            many(5),
            TableOptions::new().selection(true),
        ));
        table.toggle_row_selection(RowKey::from("3"));
        table.toggle_row_selection(RowKey::from("5"));

        let data: Vec<Partner> = many(5).into_iter().filter(|p| p.id != 3).collect();
        table.set_data(data);

        assert_eq!(table.selected_keys(), vec![RowKey::from("5")]);
        assert!(!table.is_selected(&RowKey::from("3")));
    }

    #[test]
    fn test_selection_survives_sorting() {
        let mut table = by_id(Table::new(
            name_age_columns(),
            many(3),
            TableOptions::new().selection(true),
        ));
        table.toggle_row_selection(RowKey::from("1"));
        table.sort_by("Name");
        table.sort_by("Name");
        assert!(table.is_selected(&RowKey::from("1")));
    }

    #[test]
    fn test_callback_sees_full_selected_list() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut table = by_id(Table::new(
            name_age_columns(),
            many(12),
            TableOptions::new().selection(true),
        ))
        .on_selection_change(move |rows: &[&Partner]| {
            sink.lock().unwrap().push(rows.len());
        });

        table.toggle_select_all_visible(); // 10
        table.next_page();
        table.toggle_select_all_visible(); // 12
        table.set_page(1);
        table.toggle_row_selection(RowKey::from("1")); // 11
        table.clear_selection(); // 0

        assert_eq!(*seen.lock().unwrap(), vec![10, 12, 11, 0]);
    }
}

// ============================================================================
// Export
// ============================================================================

mod export_tests {
    use super::*;

    #[test]
    fn test_csv_doubles_quotes() {
        let data = vec![partner(1, r#"He said "hi""#, 40)];
        let table = Table::new(name_age_columns(), data, TableOptions::new());
        let csv = table.export_csv();
        assert_eq!(csv.contents, "\"Name\",\"Age\"\n\"He said \"\"hi\"\"\",\"40\"\n");
        assert_eq!(csv.mime_type, "text/csv;charset=utf-8;");
        assert_eq!(csv.file_name, "dados.csv");
    }

    #[test]
    fn test_export_covers_every_page_in_sorted_order() {
        let mut table = Table::new(name_age_columns(), many(23), TableOptions::new());
        table.sort_by("Name");
        table.sort_by("Name");
        let grid = table.export_grid();
        assert_eq!(grid.rows.len(), 23);
        assert_eq!(grid.rows[0][0], "Partner 023");
        assert_eq!(grid.rows[22][0], "Partner 001");
    }

    #[test]
    fn test_value_formatting() {
        let columns = vec![
            Column::new("Active").accessor(|p: &Partner| p.active.into()),
            Column::new("Missing"),
            Column::new("When").export_value(|_: &Partner| {
                Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap().into()
            }),
        ];
        let table = Table::new(columns, vec![partner(2, "A", 1)], TableOptions::new());
        insta::assert_snapshot!(table.export_csv().contents, @r#"
        "Active","Missing","When"
        "true","","2024-01-02T03:04:05.000Z"
        "#);
    }

    #[test]
    fn test_export_disabled_column_absent_in_both_formats() {
        let mut columns = name_age_columns();
        columns.insert(
            1,
            Column::new("Document")
                .accessor(|p: &Partner| format!("DOC-{}", p.id).into())
                .export_disabled(true),
        );
        let table = Table::new(columns, many(3), TableOptions::new());

        for file in [table.export_csv(), table.export_spreadsheet()] {
            assert!(!file.contents.contains("Document"), "{}", file.file_name);
            assert!(!file.contents.contains("DOC-"), "{}", file.file_name);
        }
        // Still rendered on screen.
        assert!(table.view().contains("DOC-1"));
    }

    #[test]
    fn test_spreadsheet_export() {
        let data = vec![partner(1, "Ana & Bia", 25)];
        let table = Table::new(
            name_age_columns(),
            data,
            TableOptions::new().export("parceiros"),
        );
        let xls = table.export_spreadsheet();
        assert_eq!(xls.file_name, "parceiros.xls");
        assert_eq!(xls.mime_type, "application/vnd.ms-excel");
        assert!(xls.contents.contains("<thead><tr><th>Name</th><th>Age</th></tr></thead>"));
        assert!(xls.contents.contains("<tr><td>Ana &amp; Bia</td><td>25</td></tr>"));
    }

    #[test]
    fn test_directory_sink_receives_export() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(tmp.path());
        let table = Table::new(
            name_age_columns(),
            vec![partner(1, "Ana", 25)],
            TableOptions::new().export("lojas"),
        );
        let path = table
            .export_to(ExportFormat::Csv, &mut sink)
            .unwrap()
            .expect("export enabled");
        assert_eq!(path, tmp.path().join("lojas.csv"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "\"Name\",\"Age\"\n\"Ana\",\"25\"\n"
        );
    }
}
