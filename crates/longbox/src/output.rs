//! Output formatting: table, JSON, plain.
//!
//! Renders data in the format selected by `--output`. Table uses
//! `tabled`, JSON uses serde, plain emits one identifier per line.

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;

/// Render a list of serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` impl to build a pretty table
/// - `json`: serializes the original data via serde
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    if rows.is_empty() {
        return "(no entries)".to_owned();
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("serialization error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Row {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct DisplayRow {
        name: &'static str,
    }

    #[test]
    fn plain_output_is_one_id_per_line() {
        let data = vec![Row { name: "a" }, Row { name: "b" }];
        let out = render_list(
            &OutputFormat::Plain,
            &data,
            |r| DisplayRow { name: r.name },
            |r| r.name.to_owned(),
        );
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn empty_table_renders_placeholder() {
        let data: Vec<Row> = Vec::new();
        let out = render_list(
            &OutputFormat::Table,
            &data,
            |r| DisplayRow { name: r.name },
            |r| r.name.to_owned(),
        );
        assert_eq!(out, "(no entries)");
    }
}
