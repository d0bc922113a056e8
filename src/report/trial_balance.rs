use crate::core::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const BANK_ACCOUNT: &str = "Bank";

/// Posting account for a transaction. The bank account name is reserved for
/// the balancing row.
fn ledger_account(tx: &Transaction) -> String {
    let category = tx.category_or_default();
    if category.trim().eq_ignore_ascii_case(BANK_ACCOUNT) {
        format!("{} (category)", BANK_ACCOUNT)
    } else {
        category.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Double-entry view of the bank feed: each transaction posts to its
/// category on one side and to the bank account on the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
}

impl TrialBalance {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut accounts: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        let mut bank_debit = Decimal::ZERO;
        let mut bank_credit = Decimal::ZERO;

        for tx in transactions {
            let amount = tx.amount.abs();
            let entry = accounts.entry(ledger_account(tx)).or_default();
            if tx.is_expense() {
                entry.0 += amount;
                bank_credit += amount;
            } else {
                entry.1 += amount;
                bank_debit += amount;
            }
        }

        let mut rows: Vec<_> = accounts
            .into_iter()
            .map(|(account, (debit, credit))| TrialBalanceRow {
                account,
                debit,
                credit,
            })
            .collect();
        rows.push(TrialBalanceRow {
            account: BANK_ACCOUNT.to_string(),
            debit: bank_debit,
            credit: bank_credit,
        });

        log::debug!("Trial balance over {} transactions", transactions.len());
        TrialBalance { rows }
    }

    pub fn total_debits(&self) -> Decimal {
        self.rows.iter().map(|r| r.debit).sum()
    }

    pub fn total_credits(&self) -> Decimal {
        self.rows.iter().map(|r| r.credit).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// The balancing bank row, always the last row.
    pub fn bank(&self) -> Option<&TrialBalanceRow> {
        self.rows.last()
    }

    pub fn account(&self, name: &str) -> Option<&TrialBalanceRow> {
        self.rows.iter().find(|r| r.account == name)
    }
}
