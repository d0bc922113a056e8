use super::questionnaire::Questionnaire;
use super::CsvColumn;
use crate::tax::vat::CrossBorderVatRequest;
use chrono::{DateTime, NaiveDate};
use ietax_derive::CsvColumns;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid date '{value}' for transaction '{description}'")]
    InvalidDate { description: String, value: String },
    #[error("invalid amount '{value}' for transaction '{description}'")]
    InvalidAmount { description: String, value: String },
    #[error("unknown transaction type '{0}', expected 'income' or 'expense'")]
    UnknownType(String),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
}

/// Direction of money through the business bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "credit" => Ok(TransactionKind::Income),
            "expense" | "debit" => Ok(TransactionKind::Expense),
            other => Err(InputError::UnknownType(other.to_string())),
        }
    }
}

/// A categorised bank transaction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// Optional identifier from the source system
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    /// Amount in euro. The sign is not significant, `type` decides direction.
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Date of the transaction (YYYY-MM-DD or RFC3339)
    #[serde(alias = "date", deserialize_with = "deserialize_date")]
    #[schemars(with = "String")]
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Bookkeeping category, e.g. "sales", "motor", "office"
    #[serde(default)]
    pub category: Option<String>,
    /// VAT included in the amount, when known
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub vat_amount: Option<Decimal>,
    /// Set when the transaction is a supply to or from outside the State
    #[serde(default)]
    pub cross_border: Option<CrossBorderVatRequest>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
    ) -> Self {
        Transaction {
            id: None,
            description: description.into(),
            amount,
            transaction_date: date,
            kind,
            category: None,
            vat_amount: None,
            cross_border: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_vat(mut self, vat_amount: Decimal) -> Self {
        self.vat_amount = Some(vat_amount);
        self
    }

    pub fn with_cross_border(mut self, request: CrossBorderVatRequest) -> Self {
        self.cross_border = Some(request);
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount excluding any VAT it carries.
    pub fn net_amount(&self) -> Decimal {
        self.amount.abs() - self.vat_amount.unwrap_or_default().abs()
    }

    /// Category used for grouping, `uncategorised` when none was assigned.
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("uncategorised")
    }
}

/// Parse an ISO date, accepting a full RFC3339 timestamp as well.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_iso_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

/// Input root for transaction JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransactionInput {
    pub transactions: Vec<Transaction>,
}

/// Combined input for return assembly: bank transactions plus the
/// onboarding questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookkeepingInput {
    pub transactions: Vec<Transaction>,
    pub questionnaire: Questionnaire,
}

pub fn read_transactions_json<R: Read>(reader: R) -> Result<Vec<Transaction>, InputError> {
    let input: TransactionInput = serde_json::from_reader(reader)?;
    log::debug!("Read {} transactions from JSON", input.transactions.len());
    Ok(input.transactions)
}

pub fn read_bookkeeping_input<R: Read>(reader: R) -> Result<BookkeepingInput, InputError> {
    let input: BookkeepingInput = serde_json::from_reader(reader)?;
    log::debug!(
        "Read {} transactions and questionnaire for {}",
        input.transactions.len(),
        input.questionnaire.tax_year
    );
    Ok(input)
}

/// One row of a bank-export style CSV file.
#[derive(Debug, Clone, Deserialize, CsvColumns)]
pub struct CsvTransactionRow {
    /// Transaction date (YYYY-MM-DD)
    pub date: String,
    /// Bank narrative
    pub description: String,
    /// Amount in euro; negative amounts are expenses when type is blank
    pub amount: String,
    /// income or expense
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Bookkeeping category
    #[serde(default)]
    pub category: Option<String>,
    /// VAT included in the amount
    #[serde(default)]
    pub vat_amount: Option<String>,
}

impl TryFrom<CsvTransactionRow> for Transaction {
    type Error = InputError;

    fn try_from(row: CsvTransactionRow) -> Result<Self, Self::Error> {
        let transaction_date =
            parse_iso_date(&row.date).ok_or_else(|| InputError::InvalidDate {
                description: row.description.clone(),
                value: row.date.clone(),
            })?;
        let parse_amount = |value: &str| {
            Decimal::from_str(value.trim()).map_err(|_| InputError::InvalidAmount {
                description: row.description.clone(),
                value: value.to_string(),
            })
        };
        let amount = parse_amount(&row.amount)?;
        let vat_amount = match row.vat_amount.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Some(parse_amount(v)?),
            _ => None,
        };
        let kind = match row.kind.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k.parse()?,
            _ if amount.is_sign_negative() => TransactionKind::Expense,
            _ => TransactionKind::Income,
        };

        Ok(Transaction {
            id: None,
            description: row.description,
            amount,
            transaction_date,
            kind,
            category: row.category.filter(|c| !c.trim().is_empty()),
            vat_amount,
            cross_border: None,
        })
    }
}

pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, InputError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut transactions = Vec::new();
    for result in rdr.deserialize::<CsvTransactionRow>() {
        transactions.push(Transaction::try_from(result?)?);
    }
    log::debug!("Read {} transactions from CSV", transactions.len());
    Ok(transactions)
}
