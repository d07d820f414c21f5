//! End-to-end rendering through the public API.

use markup_table::prelude::*;
use markup_table::{
    compile, make_columns, normalize, Columns, Record, FRAGMENT_COUNT, UNDEFINED_TABLE,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const TABLE_OPEN: &str = r#"<table border="0" cellpadding="4" cellspacing="0">"#;

// ============================================================================
// Output shape
// ============================================================================

#[test]
fn heading_and_row_use_default_fragments_verbatim() {
    let mut table = TableRenderer::new();
    table.set_heading(["A", "B"]);
    table.add_row(["x", "y"]);

    let expected = format!(
        "{TABLE_OPEN}\n<thead>\n<tr>\n<th>A</th><th>B</th></tr>\n</thead>\n\
         <tbody>\n<tr>\n<td>x</td><td>y</td></tr>\n</tbody>\n</table>"
    );
    let html = table.generate();
    assert_eq!(html, expected);
    assert_eq!(html.matches("<th>").count(), 2);
    assert_eq!(html.matches("<td>").count(), 2);
}

#[test]
fn caption_sits_between_table_open_and_heading() {
    let mut table = TableRenderer::new();
    table.set_caption("Monthly totals");
    table.set_heading(["Month"]);

    assert_eq!(
        table.generate(),
        format!(
            "{TABLE_OPEN}\n\n<caption>Monthly totals</caption>\n\
             <thead>\n<tr>\n<th>Month</th></tr>\n</thead>\n</table>"
        )
    );
}

#[test]
fn empty_table_renders_sentinel() {
    let mut table = TableRenderer::new();
    table.set_caption("ignored");
    table.set_template(TemplateOverride::new().set(FragmentKey::TableOpen, "<table>"));
    assert_eq!(table.generate(), UNDEFINED_TABLE);
    assert_eq!(UNDEFINED_TABLE, "Undefined table data");
}

#[test]
fn cell_content_is_not_escaped() {
    let mut table = TableRenderer::new();
    table.add_row(["<em>raw</em> & ready"]);
    assert!(table.generate().contains("<td><em>raw</em> & ready</td>"));
}

#[test]
fn empty_cells_use_marker_never_null() {
    let mut table = TableRenderer::new();
    table.add_row(cells!["", None::<i32>, CellValue::Null, 0]);
    let html = table.generate();
    assert!(html.contains("<td></td><td></td><td></td><td>0</td>"));
    assert!(!html.to_lowercase().contains("null"));

    table.set_empty("&nbsp;");
    assert!(table
        .generate()
        .contains("<td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td><td>0</td>"));
}

#[test]
fn attributes_follow_insertion_order() {
    let mut table = TableRenderer::new();
    table.set_heading(cells![Cell::new("Price").attr("scope", "col").attr("class", "num")]);
    table.add_row(cells![Cell::new("9.50").attr("class", "num").attr("data-raw", "950")]);

    let html = table.generate();
    assert!(html.contains("<th scope='col' class='num'>Price</th>"));
    assert!(html.contains("<td class='num' data-raw='950'>9.50</td>"));
}

#[test]
fn attributes_land_on_first_tag_of_custom_fragment() {
    let mut table = TableRenderer::new();
    table.set_template(
        TemplateOverride::new().set(FragmentKey::CellStart, "<td class=\"c\"><div><td>"),
    );
    table.add_row(cells![Cell::new("x").attr("id", "first")]);
    assert!(table
        .generate()
        .contains("<td id='first' class=\"c\"><div><td>x</td>"));
}

// ============================================================================
// Ingestion
// ============================================================================

#[test]
fn csv_source_end_to_end() {
    let source = RecordSet::from_csv("sku,stock\nA-1,4\nB-2,\nC-3,9\n".as_bytes()).unwrap();
    let mut table = TableRenderer::new();
    table.set_empty("0");
    let html = table.generate_source(&source).unwrap();

    assert!(html.contains("<th>sku</th><th>stock</th>"));
    assert!(html.contains("<td>B-2</td><td>0</td>"));
    assert_eq!(table.rows().len(), 3);
}

#[test]
fn json_source_end_to_end() {
    let source =
        RecordSet::from_json(r#"[{"name": "Ada", "age": 36}, {"name": "Alan", "age": 41}]"#)
            .unwrap();
    let mut table = TableRenderer::new();
    let html = table.generate_source(&source).unwrap();
    assert!(html.contains("<th>name</th><th>age</th>"));
    assert!(html.contains("<td>Alan</td><td>41</td>"));
}

#[test]
fn json_records_with_shuffled_or_missing_keys_stay_aligned() {
    let source = RecordSet::from_json(
        r#"[{"id": 1, "name": "a"}, {"note": "n", "id": 2}, {"name": "b", "id": 3}]"#,
    )
    .unwrap();
    let mut table = TableRenderer::new();
    table.set_empty("-");
    let html = table.generate_source(&source).unwrap();

    assert!(html.contains("<th>id</th><th>name</th><th>note</th>"));
    assert!(html.contains("<td>1</td><td>a</td><td>-</td>"));
    assert!(html.contains("<td>2</td><td>-</td><td>n</td>"));
    assert!(html.contains("<td>3</td><td>b</td><td>-</td>"));
}

#[test]
fn ragged_csv_is_an_error() {
    assert!(matches!(
        RecordSet::from_csv("a,b\nx,y,z\n".as_bytes()),
        Err(TableError::Csv(_))
    ));
}

struct NoFields;

impl TabularSource for NoFields {
    fn field_names(&self) -> Option<Vec<String>> {
        None
    }

    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        let record: Record = [("k".to_string(), CellValue::from("v"))].into_iter().collect();
        Box::new(std::iter::once(record))
    }
}

#[test]
fn incapable_source_keeps_existing_data() {
    let mut table = TableRenderer::new();
    table.add_row(["kept"]);

    assert!(matches!(
        table.generate_source(&NoFields),
        Err(TableError::MissingFieldNames)
    ));
    assert_eq!(table.rows().len(), 1);
    assert!(table.generate().contains("<td>kept</td>"));
}

#[test]
fn flat_list_through_make_columns() {
    let mut table = TableRenderer::new();
    let values: Vec<CellValue> = (1..=5).map(CellValue::from).collect();
    let columns = table.make_columns(values, 2).unwrap();
    let html = table.generate_rows(columns.into_rows());

    assert!(!html.contains("<thead>"));
    assert!(html.contains("<td>5</td><td>&nbsp;</td>"));
    assert_eq!(html.matches("</tr>").count(), 3);
}

#[test]
fn make_columns_examples() {
    let values: Vec<CellValue> = (1..=5).map(CellValue::from).collect();
    assert_eq!(
        make_columns(values, 2).unwrap(),
        Columns::Grid(vec![
            vec![CellValue::Int(1), CellValue::Int(2)],
            vec![CellValue::Int(3), CellValue::Int(4)],
            vec![CellValue::Int(5), CellValue::from("&nbsp;")],
        ])
    );
    let data = vec!["a".to_string(), "b".to_string()];
    assert_eq!(make_columns(data.clone(), 0).unwrap(), Columns::Flat(data));
}

#[test]
fn clear_then_render_is_sentinel_but_settings_persist() {
    let mut table = TableRenderer::new();
    table.set_template(
        TemplateOverride::new().set(FragmentKey::TableOpen, "<table class=\"t\">"),
    );
    table.set_caption("Caption");
    table.set_empty("-");
    table.generate_rows(vec![vec!["H"], vec!["r"]]);

    table.clear();
    assert_eq!(table.generate(), UNDEFINED_TABLE);

    table.add_row([""]);
    let html = table.generate();
    assert!(html.starts_with("<table class=\"t\">\n\n<caption>Caption</caption>"));
    assert!(html.contains("<td>-</td>"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn compile_single_override_changes_one_key(index in 0usize..FRAGMENT_COUNT, text in "[A-Z]{1,8}") {
        let key = FragmentKey::ALL[index];
        let set = compile(Some(&TemplateOverride::new().set(key, text.clone())));
        let defaults = compile(None);

        prop_assert_eq!(set.iter().count(), FRAGMENT_COUNT);
        for other in FragmentKey::ALL {
            if other == key {
                prop_assert_eq!(set.get(other), text.as_str());
            } else {
                prop_assert_eq!(set.get(other), defaults.get(other));
            }
        }
    }

    #[test]
    fn every_body_row_is_rendered(rows in prop::collection::vec(prop::collection::vec("[a-z]{1,5}", 1..5), 1..12)) {
        let mut table = TableRenderer::new();
        for row in &rows {
            table.add_row(row.iter());
        }
        let html = table.generate();
        let cells: usize = rows.iter().map(Vec::len).sum();

        prop_assert_eq!(html.matches("<td>").count(), cells);
        prop_assert_eq!(html.matches("</tr>").count(), rows.len());
        prop_assert!(html.starts_with(TABLE_OPEN));
        prop_assert!(html.ends_with("</table>"));
    }

    #[test]
    fn heading_cells_normalize_to_plain_data(values in prop::collection::vec(any::<i32>(), 1..10)) {
        let heading = normalize(values.clone());
        for (cell, value) in heading.iter().zip(&values) {
            prop_assert_eq!(cell.data(), &CellValue::Int(i64::from(*value)));
            prop_assert!(cell.attributes().is_empty());
        }
    }
}
