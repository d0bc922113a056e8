use super::{capital_allowances, in_tax_year, travel_allowances, VehicleClaim};
use crate::core::{round2, Questionnaire, Transaction, Warning};
use crate::tax::TaxYear;
use rust_decimal::Decimal;
use serde::Serialize;

/// Corporation tax computation for a company's trading income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ct1Summary {
    pub tax_year: i32,
    pub turnover: Decimal,
    pub expenses: Decimal,
    pub mileage_allowance: Decimal,
    pub subsistence_allowance: Decimal,
    /// Turnover less expenses and travel allowances; negative for a loss
    pub trading_profit: Decimal,
    pub capital_allowances: Decimal,
    pub taxable_profit: Decimal,
    pub trading_loss: Decimal,
    pub corporation_tax_rate: Decimal,
    pub corporation_tax: Decimal,
    pub vehicles: Vec<VehicleClaim>,
    pub warnings: Vec<Warning>,
}

impl Ct1Summary {
    pub fn assemble(transactions: &[Transaction], questionnaire: &Questionnaire) -> Self {
        let year = TaxYear(questionnaire.tax_year);
        let transactions = in_tax_year(transactions, year.0);

        let turnover: Decimal = transactions
            .iter()
            .filter(|tx| tx.is_income())
            .map(|tx| tx.net_amount())
            .sum();
        let expenses: Decimal = transactions
            .iter()
            .filter(|tx| tx.is_expense())
            .map(|tx| tx.net_amount())
            .sum();
        let (mileage_allowance, subsistence_allowance) = travel_allowances(questionnaire);
        let trading_profit = turnover - expenses - mileage_allowance - subsistence_allowance;

        let allowances = capital_allowances(questionnaire);
        let after_allowances = trading_profit - allowances.total;
        let taxable_profit = after_allowances.max(Decimal::ZERO);
        let trading_loss = (-after_allowances).max(Decimal::ZERO);
        let corporation_tax = round2(taxable_profit * year.corporation_tax_rate());

        log::info!(
            "CT1 {}: turnover {}, taxable profit {}, corporation tax {}",
            year,
            turnover,
            taxable_profit,
            corporation_tax
        );

        Ct1Summary {
            tax_year: year.0,
            turnover,
            expenses,
            mileage_allowance,
            subsistence_allowance,
            trading_profit,
            capital_allowances: allowances.total,
            taxable_profit,
            trading_loss,
            corporation_tax_rate: year.corporation_tax_rate(),
            corporation_tax,
            vehicles: allowances.vehicles,
            warnings: allowances.warnings,
        }
    }
}
