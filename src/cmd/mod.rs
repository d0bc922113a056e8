pub mod allowances;
pub mod depreciation;
pub mod reliefs;
pub mod schema;
pub mod summary;
pub mod vat;

use ietax::core::{
    format_eur, read_bookkeeping_input, read_transactions_csv, read_transactions_json,
    BookkeepingInput, Transaction,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Read transactions from a JSON or CSV file, or JSON on stdin with "-".
pub fn read_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let transactions = if is_csv {
        read_transactions_csv(BufReader::new(File::open(path)?))?
    } else {
        read_transactions_json(open_input(path)?)?
    };
    log::info!("Read {} transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}

/// Read transactions and questionnaire answers from JSON (or stdin with "-").
pub fn read_bookkeeping(path: &Path) -> anyhow::Result<BookkeepingInput> {
    let input = read_bookkeeping_input(open_input(path)?)?;
    log::info!(
        "Read {} transactions for tax year {} from {}",
        input.transactions.len(),
        input.questionnaire.tax_year,
        path.display()
    );
    Ok(input)
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path.as_os_str() != "-" {
        return Ok(Box::new(BufReader::new(File::open(path)?)));
    }

    let mut buffer = Vec::new();
    io::stdin().lock().read_to_end(&mut buffer)?;
    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }
    Ok(Box::new(io::Cursor::new(buffer)))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Rounded table with the amount columns (all but the first) right aligned.
pub fn print_table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

/// Label and amount pair for summary tables.
#[derive(Debug, Clone, Tabled)]
pub struct LineItem {
    #[tabled(rename = "Item")]
    pub label: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl LineItem {
    pub fn eur(label: impl Into<String>, amount: Decimal) -> Self {
        LineItem {
            label: label.into(),
            amount: format_eur(amount),
        }
    }

    pub fn text(label: impl Into<String>, value: impl ToString) -> Self {
        LineItem {
            label: label.into(),
            amount: value.to_string(),
        }
    }
}
