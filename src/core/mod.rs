pub mod money;
pub mod questionnaire;
pub mod transaction;
pub mod warnings;

pub use money::{format_eur, format_pct, round2};
pub use questionnaire::{Questionnaire, VehicleAsset};
pub use transaction::{
    parse_iso_date, read_bookkeeping_input, read_transactions_csv, read_transactions_json,
    BookkeepingInput, CsvTransactionRow, InputError, Transaction, TransactionInput,
    TransactionKind,
};
pub use warnings::Warning;

/// Column description generated by `#[derive(CsvColumns)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}
