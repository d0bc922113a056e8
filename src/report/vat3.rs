use super::in_tax_year;
use crate::core::{round2, Transaction, Warning};
use crate::tax::vat::{CrossBorderVatResult, VatTreatment, STANDARD_VAT_RATE};
use rust_decimal::Decimal;
use serde::Serialize;

/// Box totals for a VAT3 return over the supplied transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vat3Return {
    pub t1: Decimal,
    pub t2: Decimal,
    pub t3: Decimal,
    pub t4: Decimal,
    pub e1: Decimal,
    pub e2: Decimal,
    pub es1: Decimal,
    pub es2: Decimal,
    pub pa1: Decimal,
    pub warnings: Vec<Warning>,
}

impl Vat3Return {
    /// Return over every transaction supplied. VAT3 periods are usually
    /// two months, so the caller chooses the period; unlike the CT1 and
    /// Form 11 summaries nothing is filtered here.
    pub fn assemble(transactions: &[Transaction]) -> Self {
        Self::assemble_lines(transactions)
    }

    /// Annual return: only transactions dated in `tax_year` are included.
    pub fn assemble_for_year(transactions: &[Transaction], tax_year: i32) -> Self {
        Self::assemble_lines(in_tax_year(transactions, tax_year))
    }

    fn assemble_lines<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut vat3 = Vat3Return::default();

        for tx in transactions {
            match &tx.cross_border {
                Some(request) => {
                    let result = request.resolve();
                    if result.is_fallback() {
                        log::warn!("No cross-border rule for '{}'", tx.description);
                        vat3.warnings.push(Warning::UnresolvedCrossBorder {
                            description: tx.description.clone(),
                        });
                    }
                    vat3.add_cross_border(tx, &result);
                }
                None => vat3.add_domestic(tx),
            }
        }

        vat3.t3 = (vat3.t1 - vat3.t2).max(Decimal::ZERO);
        vat3.t4 = (vat3.t2 - vat3.t1).max(Decimal::ZERO);
        vat3
    }

    fn add_domestic(&mut self, tx: &Transaction) {
        let vat = tx.vat_amount.unwrap_or_default().abs();
        if tx.is_income() {
            self.t1 += vat;
        } else {
            self.t2 += vat;
        }
    }

    fn add_cross_border(&mut self, tx: &Transaction, result: &CrossBorderVatResult) {
        // Irish VAT charged on the invoice is reported like a domestic line
        if result.treatment == VatTreatment::StandardRated {
            self.add_domestic(tx);
            return;
        }

        let net = tx.net_amount();
        let self_accounted = round2(net * STANDARD_VAT_RATE);
        for code in &result.vat3_boxes {
            match *code {
                "T1" => self.t1 += self_accounted,
                "T2" => self.t2 += self_accounted,
                "E1" => self.e1 += net,
                "E2" => self.e2 += net,
                "ES1" => self.es1 += net,
                "ES2" => self.es2 += net,
                "PA1" => self.pa1 += net,
                other => log::debug!("VAT3 box {} not accumulated", other),
            }
        }
    }

    /// Positive when VAT is payable, negative when a repayment is due.
    pub fn net_position(&self) -> Decimal {
        self.t3 - self.t4
    }

    pub fn boxes(&self) -> [(&'static str, Decimal); 9] {
        [
            ("T1", self.t1),
            ("T2", self.t2),
            ("T3", self.t3),
            ("T4", self.t4),
            ("E1", self.e1),
            ("E2", self.e2),
            ("ES1", self.es1),
            ("ES2", self.es2),
            ("PA1", self.pa1),
        ]
    }
}
