//! Terminal rendering of views, stats and status with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use scan_export::flag_labels;
use scan_model::{
    ColumnKind, EffectiveField, PinSet, Row, SourceStatus, ViewResult, col, normalize_symbol,
    schema,
};
use scan_query::SummaryStats;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn change_cell(change: f64) -> Cell {
    let color = if change >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(format!("{change:+.2}%")).fg(color)
}

fn symbol_cell(row: &Row, pins: &PinSet) -> Cell {
    let symbol = row.symbol();
    if pins.contains(&normalize_symbol(symbol)) {
        Cell::new(format!("★ {symbol}"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(symbol)
    }
}

/// Prints the paginated view plus a shown/filtered/total footer.
pub fn print_view(view: &ViewResult, pins: &PinSet) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Symbol"),
        header_cell("Px"),
        header_cell("Chg%"),
        header_cell("Name"),
        header_cell("Score"),
        header_cell("Archetype"),
        header_cell("Gap%"),
        header_cell("RVol"),
        header_cell("Vol"),
        header_cell("Flags"),
    ]);
    apply_table_style(&mut table);
    for index in [0, 2, 3, 5, 7, 8, 9] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &view.rows {
        table.add_row(vec![
            Cell::new(row.number(col::MASTER_RANK) as i64),
            symbol_cell(row, pins),
            Cell::new(format!("{:.2}", row.effective(EffectiveField::Price))),
            change_cell(row.effective(EffectiveField::Change)),
            Cell::new(row.text(col::NAME)),
            Cell::new(format!("{:.1}", row.number(col::COMPOSITE_SCORE))),
            Cell::new(row.text(col::ML_ARCHETYPE)),
            Cell::new(format!("{:.2}", row.number(col::GAP_PCT))),
            Cell::new(format!("{:.1}", row.number(col::REL_VOLUME))),
            Cell::new(format!("{:.0}", row.effective(EffectiveField::Volume))),
            Cell::new(flag_labels(row)),
        ]);
    }
    println!("{table}");
    println!(
        "showing {} of {} matches ({} rows in feed)",
        view.shown, view.filtered, view.total
    );
}

/// Prints the stats line for the shown rows.
pub fn print_stats(stats: &SummaryStats) {
    println!(
        "avg chg {:+.2}%  total vol {:.0}  avg score {:.1}  gaps {}  explosive {}  \
         hod {}  pinned {}  risk {}",
        stats.avg_change,
        stats.total_volume,
        stats.avg_score,
        stats.gap_count,
        stats.explosive_count,
        stats.hod_count,
        stats.pinned_count,
        stats.risk_count,
    );
}

/// Prints the source status, one line per field.
pub fn print_status(status: &SourceStatus) {
    if status.ok {
        println!("feed: {}", status.file.as_deref().unwrap_or("-"));
        println!("modified: {}", status.modified.as_deref().unwrap_or("-"));
        if let Some(size_kb) = status.size_kb {
            println!("size: {size_kb} KB");
        }
    } else {
        println!(
            "feed unavailable: {}",
            status.error.as_deref().unwrap_or("unknown")
        );
    }
}

/// Prints the declared column registry.
pub fn print_columns() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Type")]);
    apply_table_style(&mut table);
    for column in schema().columns() {
        let kind = match column.kind {
            ColumnKind::Numeric { integer: true } => "integer",
            ColumnKind::Numeric { integer: false } => "numeric",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
        };
        table.add_row(vec![column.name, kind]);
    }
    println!("{table}");
}

/// Prints the pinned symbols, one per line.
pub fn print_pins(pins: &PinSet) {
    if pins.is_empty() {
        println!("no pinned symbols");
        return;
    }
    for symbol in pins {
        println!("{symbol}");
    }
}
