//! Boxed grid table for scan results.

use screener_core::DisplayRecord;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::theme::SemanticStyle;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Vol")]
    volume: String,
    #[tabled(rename = "Trend")]
    trend: String,
    #[tabled(rename = "OBV")]
    obv: String,
    #[tabled(rename = "MACD")]
    macd: String,
    #[tabled(rename = "RSI")]
    rsi: String,
    #[tabled(rename = "Stoch")]
    stoch: String,
    /// Pre-painted; column widths are measured without escape codes.
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Signal")]
    signal: String,
}

impl ResultRow {
    fn new(record: &DisplayRecord, color: bool) -> Self {
        let style = SemanticStyle::for_action(record.action);
        Self {
            stock: record.stock.clone(),
            price: record.price.clone(),
            volume: record.volume.clone(),
            trend: record.trend.clone(),
            obv: record.obv.clone(),
            macd: record.macd.clone(),
            rsi: record.rsi.clone(),
            stoch: record.stoch.clone(),
            action: style.paint(record.action.label(), color),
            signal: record.signal.clone(),
        }
    }
}

/// Render the ranked rows as a boxed grid, or `No data.` when empty.
pub fn render_table(rows: &[DisplayRecord], color: bool) -> String {
    if rows.is_empty() {
        return "No data.\n".to_string();
    }

    let rows: Vec<ResultRow> = rows.iter().map(|r| ResultRow::new(r, color)).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::signals::Action;

    fn record(stock: &str, action: Action) -> DisplayRecord {
        DisplayRecord {
            stock: stock.to_string(),
            price: "9,275".into(),
            volume: "12.3M".into(),
            trend: "UP > MA200".into(),
            obv: "UP".into(),
            macd: "GOLDEN CROSS".into(),
            rsi: "28 (OS)".into(),
            stoch: "-".into(),
            action,
            signal: "MACD BULL".into(),
        }
    }

    #[test]
    fn empty_is_no_data() {
        assert_eq!(render_table(&[], true), "No data.\n");
    }

    #[test]
    fn grid_lines_have_equal_width() {
        let table = render_table(
            &[record("BBCA", Action::StrongBuy), record("TLKM", Action::Wait)],
            false,
        );
        let lines: Vec<&str> = table.lines().collect();
        // top, header, (separator, row) x2, bottom
        assert_eq!(lines.len(), 7);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(lines[1].starts_with("│ Stock │ Price │"));
        assert!(lines[3].contains("│ STRONG BUY │"));
        assert!(lines[5].contains("│ WAIT       │"));
    }

    #[test]
    fn only_action_cell_is_colored() {
        let table = render_table(&[record("BBCA", Action::Buy)], true);
        let row = table.lines().nth(3).unwrap();
        assert!(row.contains('\u{1b}'));
        assert!(row.starts_with("│ BBCA  │"));
    }

    #[test]
    fn escape_codes_do_not_widen_columns() {
        let rows = [record("BBCA", Action::StrongBuy), record("TLKM", Action::Sell)];
        let plain = render_table(&rows, false);
        let colored = render_table(&rows, true);
        assert_ne!(plain, colored);
        assert_eq!(plain.lines().next(), colored.lines().next());
        assert_eq!(plain.lines().last(), colored.lines().last());
    }
}
