use colored::Colorize;
use intake::api::{CmdMessage, DisplayRow, MessageLevel};
use intake::config::IntakeConfig;
use intake::filter::ColumnSpec;
use intake::model::Column;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a single cell is allowed to render; longer values are truncated
/// with an ellipsis so one verbose disease name cannot blow up the table.
const CELL_WIDTH_CAP: usize = 20;
const COL_GAP: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Prints rows as a fixed-column table: a right-aligned row number, then the
/// eight registry columns. Column widths follow the content, capped at
/// [`CELL_WIDTH_CAP`].
pub(super) fn print_rows(rows: &[DisplayRow]) {
    if rows.is_empty() {
        return;
    }

    let widths = column_widths(rows);
    let no_width = rows
        .iter()
        .map(|r| r.row_no.to_string().width())
        .max()
        .unwrap_or(1);

    let mut header = " ".repeat(no_width + 2);
    for (i, column) in Column::ALL.into_iter().enumerate() {
        header.push_str(&pad_to_width(column.label(), widths[i]));
        header.push_str(COL_GAP);
    }
    println!("{}", header.trim_end().dimmed());

    for row in rows {
        let mut line = format!("{:>width$}. ", row.row_no, width = no_width);
        for (i, column) in Column::ALL.into_iter().enumerate() {
            let cell = row.record.get(column);
            let cell = if cell.width() > widths[i] {
                truncate_to_width(cell, widths[i])
            } else {
                cell.to_string()
            };
            line.push_str(&pad_to_width(&cell, widths[i]));
            line.push_str(COL_GAP);
        }
        println!("{}", line.trim_end());
    }
}

/// One line per column: its label and the filter control it currently
/// offers, e.g. `Entry Date   date range 2024-01-01 .. 2024-02-10`.
pub(super) fn print_specs(specs: &[(Column, ColumnSpec)]) {
    let label_width = specs
        .iter()
        .map(|(column, _)| column.label().width())
        .max()
        .unwrap_or(0);

    for (column, spec) in specs {
        println!(
            "{}{}{}",
            pad_to_width(column.label(), label_width),
            COL_GAP,
            spec.describe().dimmed()
        );
    }
}

pub(super) fn print_config(config: &IntakeConfig) {
    for (key, value) in config.list_all() {
        println!("{} = {}", key, value);
    }
}

fn column_widths(rows: &[DisplayRow]) -> [usize; 8] {
    let mut widths = [0usize; 8];
    for (i, column) in Column::ALL.into_iter().enumerate() {
        let mut width = column.label().width();
        for row in rows {
            width = width.max(row.record.get(column).width());
        }
        widths[i] = width.min(CELL_WIDTH_CAP);
    }
    widths
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
