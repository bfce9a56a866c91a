use crate::storage::repository::SelectResult;
use crate::storage::table::Table;

/// Frames schema reports and table listings.
pub const BORDER_LINE: &str =
    "-----------------------------------------------------------------";

const REPORT_HEADER: [&str; 4] = ["column_name", "type", "null", "key"];
const REPORT_PADDING: usize = 3;

/// Formats the EXPLAIN / DESCRIBE report of one table.
///
/// One line per column with name, type, nullability and key role. The
/// null cell is `N` for a NOT NULL column and `Y` otherwise.
pub fn format_explain(table: &Table) -> String {
    let mut contents: Vec<[String; 4]> = vec![REPORT_HEADER.map(str::to_string)];
    for column in &table.schema.column_definitions {
        let null = if column.not_null { "N" } else { "Y" };
        let key = match table.schema.column_key(&column.column_name) {
            (true, true) => "PRI/FOR",
            (true, false) => "PRI",
            (false, true) => "FOR",
            (false, false) => "",
        };
        contents.push([
            column.column_name.clone(),
            column.type_label(),
            null.to_string(),
            key.to_string(),
        ]);
    }

    let mut widths = REPORT_HEADER.map(str::len);
    for row in &contents {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut lines = vec![
        BORDER_LINE.to_string(),
        format!("table_name [{}]", table.name()),
    ];
    for row in &contents {
        let line: String = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<width$}", width = w + REPORT_PADDING))
            .collect();
        lines.push(line);
    }
    lines.push(BORDER_LINE.to_string());
    lines.join("\n")
}

/// Formats SHOW TABLES: one name per line between two border lines.
pub fn format_show_tables<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut lines = vec![BORDER_LINE.to_string()];
    lines.extend(names.into_iter().map(str::to_string));
    lines.push(BORDER_LINE.to_string());
    lines.join("\n")
}

/// Formats a SELECT result as a bordered ASCII grid with upper-cased
/// headers.
pub fn format_select(result: &SelectResult) -> String {
    let border: String = result
        .widths
        .iter()
        .map(|w| format!("{}+", "-".repeat(w + 2)))
        .fold("+".to_string(), |acc, seg| acc + &seg);

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&result.widths)
            .map(|(cell, &w)| format!(" {cell:<w$} |"))
            .fold("|".to_string(), |acc, seg| acc + &seg)
    };

    let header: Vec<String> = result.columns.iter().map(|c| c.to_uppercase()).collect();

    let mut lines = vec![border.clone(), render_row(&header), border.clone()];
    lines.extend(result.rows.iter().map(|r| render_row(r)));
    lines.push(border);
    lines.join("\n")
}
