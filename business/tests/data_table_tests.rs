//! Scenario tests for the generic data table.

use chrono::NaiveDate;
use erpdesk_business::table::{
    Body, CellValue, Column, Columns, DataTable, RowActions, SortDirection, TableEvent,
    TableOptions, TableRecord,
};

#[derive(Debug, Clone, PartialEq)]
struct Voucher {
    number: i64,
    party: String,
    amount: f64,
    date: NaiveDate,
    posted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VoucherField {
    Number,
    Party,
    Amount,
    Date,
    Posted,
}

impl TableRecord for Voucher {
    type Field = VoucherField;

    fn value(&self, field: Self::Field) -> CellValue {
        match field {
            VoucherField::Number => self.number.into(),
            VoucherField::Party => self.party.as_str().into(),
            VoucherField::Amount => self.amount.into(),
            VoucherField::Date => self.date.into(),
            VoucherField::Posted => self.posted.into(),
        }
    }
}

const PARTIES: [&str; 4] = ["Acme Traders", "Bharat Steel", "City Clinic", "Delta Pharma"];

fn vouchers(count: i64) -> Vec<Voucher> {
    (1..=count)
        .map(|n| Voucher {
            number: n,
            party: PARTIES[(n as usize) % PARTIES.len()].to_owned(),
            amount: (n * 125) as f64 / 2.0,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap() + chrono::Days::new(n as u64),
            posted: n % 3 == 0,
        })
        .collect()
}

fn columns() -> Columns<Voucher> {
    Columns::new(vec![
        Column::new(VoucherField::Number, "Voucher No"),
        Column::new(VoucherField::Party, "Party"),
        Column::new(VoucherField::Amount, "Amount").with_render(|v, _| format!("{v:.2}")),
        Column::new(VoucherField::Date, "Date"),
        Column::new(VoucherField::Posted, "Posted")
            .with_render(|v, _| if v == &CellValue::Bool(true) { "Yes" } else { "No" }.to_owned()),
    ])
    .expect("columns are unique")
}

fn client_table(rows: Vec<Voucher>) -> DataTable<Voucher> {
    let mut table = DataTable::new(columns(), TableOptions::new("Journal Vouchers"));
    table.set_rows(rows);
    table
}

fn server_table() -> DataTable<Voucher> {
    let options = TableOptions::new("Journal Vouchers").with_actions(RowActions {
        external_search: true,
        refresh: true,
        ..RowActions::default()
    });
    DataTable::server(columns(), options)
}

fn numbers(rows: &[(usize, &Voucher)]) -> Vec<i64> {
    rows.iter().map(|(_, v)| v.number).collect()
}

mod pagination {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        for (count, pages) in [(0, 0), (1, 1), (10, 1), (11, 2), (23, 3), (100, 10)] {
            let table = client_table(vouchers(count));
            assert_eq!(table.total_pages(), pages, "{count} rows");
        }
    }

    #[test]
    fn test_first_page_shows_leading_rows() {
        let table = client_table(vouchers(7));
        assert_eq!(numbers(&table.page_rows()), (1..=7).collect::<Vec<_>>());
        assert_eq!(table.pagination_label(), "Showing 1 to 7 of 7 entries");
    }

    #[test]
    fn test_client_last_page_of_23_rows() {
        let mut table = client_table(vouchers(23));
        assert_eq!(table.go_to_page(3), None);

        assert_eq!(numbers(&table.page_rows()), vec![21, 22, 23]);
        assert_eq!(table.pagination_label(), "Showing 21 to 23 of 23 entries");
        let view = table.view();
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_server_page_label() {
        let mut table = server_table();
        let page: Vec<Voucher> = vouchers(20).into_iter().skip(10).collect();
        assert_eq!(table.set_server_page(page, 57, 2), None);

        assert_eq!(table.pagination_label(), "Showing 11 to 20 of 57 entries");
        assert_eq!(table.total_pages(), 6);
        assert_eq!(table.page_rows().len(), 10);
    }

    #[test]
    fn test_shrinking_rows_clamps_page() {
        let mut table = client_table(vouchers(23));
        table.go_to_page(3);
        table.set_rows(vouchers(5));
        assert_eq!(table.current_page(), 1);
    }
}

mod search {
    use super::*;

    #[test]
    fn test_client_search_filters_whole_set_and_export_follows() {
        let mut table = client_table(vouchers(23));
        table.go_to_page(2);

        assert_eq!(table.search("steel"), None);
        assert_eq!(table.current_page(), 1);
        // n % 4 == 1
        assert_eq!(table.filtered_count(), 6);
        assert_eq!(
            table.pagination_label(),
            "Showing 1 to 6 of 6 entries (filtered from 23 total)"
        );
        assert_eq!(table.export_rows().len(), 6);
    }

    #[test]
    fn test_client_search_matches_underlying_values() {
        let mut table = client_table(vouchers(23));
        // dates match on their ISO form
        table.search("2024-04-05");
        assert_eq!(numbers(&table.page_rows()), vec![4]);
    }

    #[test]
    fn test_server_search_escalates_once_per_term() {
        let mut table = server_table();
        table.set_server_page(vouchers(10), 57, 1);

        // found on the current page: no server round trip
        assert_eq!(table.search("acme"), None);

        assert_eq!(
            table.search("zenith"),
            Some(TableEvent::Search("zenith".to_owned()))
        );
        // the caller re-renders with the same term and an empty page
        assert_eq!(table.set_server_page(Vec::new(), 0, 1), None);
        assert_eq!(table.set_server_page(Vec::new(), 0, 1), None);
        assert_eq!(table.search("zenith"), None);

        // a new term escalates again
        assert_eq!(
            table.search("zenith co"),
            Some(TableEvent::Search("zenith co".to_owned()))
        );
    }

    #[test]
    fn test_server_results_are_not_refiltered() {
        let mut table = server_table();
        table.set_server_page(vouchers(10), 57, 1);
        assert!(table.search("gst-2024").is_some());

        // the backend matched on a field the table does not show
        assert_eq!(table.set_server_page(vouchers(3), 3, 1), None);
        assert_eq!(table.page_rows().len(), 3);
    }

    #[test]
    fn test_clearing_a_dispatched_search_restores_the_page() {
        let mut table = server_table();
        table.set_server_page(vouchers(10), 57, 1);
        table.search("zenith");

        assert_eq!(table.search(""), Some(TableEvent::Search(String::new())));
        // nothing outstanding any more
        assert_eq!(table.search("acme"), None);
        assert_eq!(table.search(""), None);
    }

    #[test]
    fn test_server_search_without_external_handler_stays_local() {
        let mut table = DataTable::server(columns(), TableOptions::new("Vouchers"));
        table.set_server_page(vouchers(10), 57, 1);
        assert_eq!(table.search("zenith"), None);
        assert_eq!(table.view().body, Body::Empty { colspan: 5 });
    }
}

mod sorting {
    use super::*;

    #[test]
    fn test_toggle_asc_desc_asc() {
        let mut table = client_table(vouchers(12));

        table.sort_by(VoucherField::Amount);
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Asc));
        assert_eq!(table.page_rows()[0].1.number, 1);

        table.sort_by(VoucherField::Amount);
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert_eq!(table.page_rows()[0].1.number, 12);

        table.sort_by(VoucherField::Amount);
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Asc));
    }

    #[test]
    fn test_sort_spans_pages_and_is_stable() {
        let mut table = client_table(vouchers(23));
        table.sort_by(VoucherField::Party);

        let sorted: Vec<(String, i64)> = table
            .filtered_rows()
            .map(|v| (v.party.clone(), v.number))
            .collect();
        let mut expected = sorted.clone();
        expected.sort();
        // equal parties keep ascending voucher numbers
        assert_eq!(sorted, expected);
        assert_eq!(table.page_rows()[0].1.party, "Acme Traders");
    }

    #[test]
    fn test_new_key_starts_ascending() {
        let mut table = client_table(vouchers(5));
        table.sort_by(VoucherField::Date);
        table.sort_by(VoucherField::Date);
        table.sort_by(VoucherField::Posted);
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Asc));
        // false < true
        assert!(!table.page_rows()[0].1.posted);
    }
}

mod rendering {
    use super::*;

    #[test]
    fn test_renderers_apply_to_cells() {
        let table = client_table(vouchers(3));
        let Body::Rows(rows) = table.view().body else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[2].cells,
            vec!["3", "Delta Pharma", "187.50", "2024-04-04", "Yes"]
        );
    }

    #[test]
    fn test_empty_and_loading() {
        let mut table = client_table(Vec::new());
        let view = table.view();
        assert_eq!(view.body, Body::Empty { colspan: 5 });
        assert_eq!(view.pagination_label, "Showing 0 to 0 of 0 entries");

        table.set_loading(true);
        assert_eq!(table.view().body, Body::Loading);
    }

    #[test]
    fn test_refresh_event() {
        assert_eq!(server_table().refresh(), Some(TableEvent::Refresh));
        assert_eq!(client_table(Vec::new()).refresh(), None);
    }
}

mod export {
    use super::*;

    #[test]
    fn test_export_covers_all_filtered_rows_in_sort_order() {
        let mut table = client_table(vouchers(23));
        table.sort_by(VoucherField::Number);
        table.sort_by(VoucherField::Number);

        let rows = table.export_rows();
        assert_eq!(rows.len(), 23);
        assert_eq!(rows[0][0], CellValue::Int(23));
        // raw values, not rendered text
        assert_eq!(rows[0][2], CellValue::Float(1437.5));
    }

    #[test]
    fn test_export_is_idempotent() {
        let table = client_table(vouchers(23));

        assert_eq!(table.export_rows(), table.export_rows());
        let first = table.export_workbook().expect("first export");
        let second = table.export_workbook().expect("second export");
        assert!(first.starts_with(b"PK"), "xlsx is a zip archive");
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let table = client_table(vouchers(4));

        let path = table.export_to_dir(dir.path()).expect("export written");
        assert_eq!(path, dir.path().join("Journal_Vouchers.xlsx"));
        assert!(std::fs::metadata(&path).expect("file exists").len() > 0);
    }
}
