use super::{capital_allowances, in_tax_year, travel_allowances, VehicleClaim};
use crate::core::{round2, Questionnaire, Transaction, Warning};
use crate::tax::reliefs::classify;
use crate::tax::{apply_bands, scan_for_reliefs, ReliefScanResult, TaxYear};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCredits {
    pub personal: Decimal,
    pub earned_income: Decimal,
    pub medical: Decimal,
    pub tuition: Decimal,
    pub rent: Decimal,
}

impl TaxCredits {
    pub fn total(&self) -> Decimal {
        self.personal + self.earned_income + self.medical + self.tuition + self.rent
    }
}

/// Income tax return for a sole trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form11Summary {
    pub tax_year: i32,
    pub trading_income: Decimal,
    /// Business expenses, excluding personal payments picked up by the relief scan
    pub trading_expenses: Decimal,
    pub mileage_allowance: Decimal,
    pub subsistence_allowance: Decimal,
    pub capital_allowances: Decimal,
    /// Trading profit after capital allowances, floored at zero
    pub assessable_profit: Decimal,
    pub trading_loss: Decimal,
    pub pension_contributions: Decimal,
    pub pension_relief: Decimal,
    pub taxable_income: Decimal,
    pub gross_income_tax: Decimal,
    pub credits: TaxCredits,
    pub net_income_tax: Decimal,
    pub usc: Decimal,
    pub prsi: Decimal,
    pub total_liability: Decimal,
    pub reliefs: ReliefScanResult,
    pub vehicles: Vec<VehicleClaim>,
    pub warnings: Vec<Warning>,
}

impl Form11Summary {
    pub fn assemble(transactions: &[Transaction], questionnaire: &Questionnaire) -> Self {
        let year = TaxYear(questionnaire.tax_year);
        let transactions: Vec<Transaction> = in_tax_year(transactions, year.0)
            .into_iter()
            .cloned()
            .collect();

        let reliefs = scan_for_reliefs(&transactions);

        let trading_income: Decimal = transactions
            .iter()
            .filter(|tx| tx.is_income())
            .map(|tx| tx.net_amount())
            .sum();
        let trading_expenses: Decimal = transactions
            .iter()
            .filter(|tx| tx.is_expense() && classify(&tx.description).is_none())
            .map(|tx| tx.net_amount())
            .sum();
        let (mileage_allowance, subsistence_allowance) = travel_allowances(questionnaire);

        let allowances = capital_allowances(questionnaire);
        let profit = trading_income
            - trading_expenses
            - mileage_allowance
            - subsistence_allowance
            - allowances.total;
        let assessable_profit = profit.max(Decimal::ZERO);
        let trading_loss = (-profit).max(Decimal::ZERO);

        let pension_contributions = reliefs.pension.total;
        let pension_relief = pension_contributions.min(round2(
            year.pension_relief_limit(questionnaire.age)
                * assessable_profit.min(year.pension_earnings_cap()),
        ));
        let taxable_income = assessable_profit - pension_relief;

        let gross_income_tax = round2(apply_bands(taxable_income, &year.income_tax_bands()));
        let credits = tax_credits(&year, assessable_profit, &reliefs);
        let net_income_tax = (gross_income_tax - credits.total()).max(Decimal::ZERO);

        let usc = universal_social_charge(&year, assessable_profit);
        let prsi = class_s_prsi(&year, assessable_profit);
        let total_liability = net_income_tax + usc + prsi;

        log::info!(
            "Form 11 {}: assessable profit {}, income tax {}, USC {}, PRSI {}",
            year,
            assessable_profit,
            net_income_tax,
            usc,
            prsi
        );

        Form11Summary {
            tax_year: year.0,
            trading_income,
            trading_expenses,
            mileage_allowance,
            subsistence_allowance,
            capital_allowances: allowances.total,
            assessable_profit,
            trading_loss,
            pension_contributions,
            pension_relief,
            taxable_income,
            gross_income_tax,
            credits,
            net_income_tax,
            usc,
            prsi,
            total_liability,
            reliefs,
            vehicles: allowances.vehicles,
            warnings: allowances.warnings,
        }
    }
}

fn tax_credits(year: &TaxYear, earned_income: Decimal, reliefs: &ReliefScanResult) -> TaxCredits {
    let tuition_fees = reliefs.tuition.total.min(year.tuition_fee_cap());
    TaxCredits {
        personal: year.personal_credit(),
        earned_income: year
            .earned_income_credit()
            .min(round2(earned_income * year.standard_rate())),
        medical: round2(reliefs.medical.total * year.medical_relief_rate()),
        tuition: round2(
            (tuition_fees - year.tuition_disregard()).max(Decimal::ZERO) * year.tuition_relief_rate(),
        ),
        rent: round2(reliefs.rent.total * year.standard_rate()).min(year.rent_credit_cap()),
    }
}

fn universal_social_charge(year: &TaxYear, income: Decimal) -> Decimal {
    if income <= year.usc_exemption_limit() {
        return Decimal::ZERO;
    }
    let surcharge =
        (income - year.usc_surcharge_threshold()).max(Decimal::ZERO) * year.usc_surcharge_rate();
    round2(apply_bands(income, year.usc_bands()) + surcharge)
}

fn class_s_prsi(year: &TaxYear, income: Decimal) -> Decimal {
    if income < year.prsi_income_threshold() {
        return Decimal::ZERO;
    }
    round2(income * year.prsi_rate()).max(year.prsi_minimum_contribution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(description: &str, amount: Decimal, kind: TransactionKind) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            description,
            amount,
            kind,
        )
    }

    fn sole_trader() -> Vec<Transaction> {
        vec![
            tx("Consulting income", dec!(60000), TransactionKind::Income),
            tx("Office supplies", dec!(-10000), TransactionKind::Expense),
            tx("Irish Life Assurance PRSA", dec!(-3000), TransactionKind::Expense),
            tx("Boots Pharmacy", dec!(-500), TransactionKind::Expense),
        ]
    }

    #[test]
    fn full_computation() {
        let questionnaire = Questionnaire {
            age: Some(35),
            ..Questionnaire::for_year(2024)
        };
        let form11 = Form11Summary::assemble(&sole_trader(), &questionnaire);

        // Pension and medical payments are personal, not business expenses
        assert_eq!(form11.trading_expenses, dec!(10000));
        assert_eq!(form11.assessable_profit, dec!(50000));
        assert_eq!(form11.pension_contributions, dec!(3000));
        assert_eq!(form11.pension_relief, dec!(3000));
        assert_eq!(form11.taxable_income, dec!(47000));
        // 42000 @ 20% + 5000 @ 40%
        assert_eq!(form11.gross_income_tax, dec!(10400));
        assert_eq!(form11.credits.personal, dec!(1875));
        assert_eq!(form11.credits.earned_income, dec!(1875));
        assert_eq!(form11.credits.medical, dec!(100));
        assert_eq!(form11.net_income_tax, dec!(6550));
        // 12012 @ 0.5% + 13748 @ 2% + 24240 @ 4%
        assert_eq!(form11.usc, dec!(1304.62));
        assert_eq!(form11.prsi, dec!(2000));
        assert_eq!(form11.total_liability, dec!(9854.62));
    }

    #[test]
    fn pension_relief_limited_by_age() {
        let transactions = vec![
            tx("Invoice", dec!(40000), TransactionKind::Income),
            tx("Pension top-up", dec!(-10000), TransactionKind::Expense),
        ];
        let form11 = Form11Summary::assemble(&transactions, &Questionnaire::for_year(2024));
        // Unknown age: 15% of 40000
        assert_eq!(form11.pension_relief, dec!(6000));
        assert_eq!(form11.taxable_income, dec!(34000));
    }

    #[test]
    fn pension_earnings_capped() {
        let transactions = vec![
            tx("Invoice", dec!(200000), TransactionKind::Income),
            tx("Pension contribution", dec!(-80000), TransactionKind::Expense),
        ];
        let questionnaire = Questionnaire {
            age: Some(61),
            ..Questionnaire::for_year(2024)
        };
        let form11 = Form11Summary::assemble(&transactions, &questionnaire);
        // 40% of earnings capped at 115000
        assert_eq!(form11.pension_contributions, dec!(80000));
        assert_eq!(form11.pension_relief, dec!(46000));
    }

    #[test]
    fn business_consultant_stays_a_trading_expense() {
        let transactions = vec![
            tx("Consulting income", dec!(60000), TransactionKind::Income),
            tx("Marketing consultant invoice", dec!(-10000), TransactionKind::Expense),
            tx("Safety work boots", dec!(-200), TransactionKind::Expense),
        ];
        let form11 = Form11Summary::assemble(&transactions, &Questionnaire::for_year(2024));
        assert_eq!(form11.trading_expenses, dec!(10200));
        assert_eq!(form11.assessable_profit, dec!(49800));
        assert_eq!(form11.credits.medical, Decimal::ZERO);
        assert_eq!(form11.reliefs.medical.total, Decimal::ZERO);
    }

    #[test]
    fn usc_surcharge_above_100k() {
        let year = TaxYear(2024);
        // Extra 3% on the 20000 above the threshold
        let without_surcharge = apply_bands(dec!(120000), year.usc_bands());
        assert_eq!(
            universal_social_charge(&year, dec!(120000)),
            round2(without_surcharge + dec!(600))
        );
    }

    #[test]
    fn usc_exemption_is_inclusive() {
        let year = TaxYear(2024);
        assert_eq!(universal_social_charge(&year, dec!(13000)), Decimal::ZERO);
        assert!(universal_social_charge(&year, dec!(13000.01)) > Decimal::ZERO);
    }

    #[test]
    fn prsi_minimum_and_threshold() {
        let year = TaxYear(2024);
        assert_eq!(class_s_prsi(&year, dec!(4999.99)), Decimal::ZERO);
        assert_eq!(class_s_prsi(&year, dec!(5000)), dec!(500));
        assert_eq!(class_s_prsi(&year, dec!(20000)), dec!(800));
        assert_eq!(class_s_prsi(&TaxYear(2025), dec!(20000)), dec!(820));
    }

    #[test]
    fn relief_credits() {
        let year = TaxYear(2024);
        let transactions = vec![
            tx("Monthly rent Apt 2", dec!(-6000), TransactionKind::Expense),
            tx("Griffith College tuition", dec!(-9000), TransactionKind::Expense),
            tx("Hospital bill", dec!(-250), TransactionKind::Expense),
        ];
        let reliefs = scan_for_reliefs(&transactions);
        let credits = tax_credits(&year, dec!(5000), &reliefs);
        assert_eq!(credits.rent, dec!(750));
        // (7000 - 3000) * 20%
        assert_eq!(credits.tuition, dec!(800));
        assert_eq!(credits.medical, dec!(50));
        // Limited to 20% of earned income
        assert_eq!(credits.earned_income, dec!(1000));
    }

    #[test]
    fn small_tuition_gets_nothing() {
        let reliefs = scan_for_reliefs(&[tx("Course fee", dec!(-2500), TransactionKind::Expense)]);
        assert_eq!(tax_credits(&TaxYear(2024), dec!(50000), &reliefs).tuition, Decimal::ZERO);
    }

    #[test]
    fn credits_cannot_make_tax_negative() {
        let transactions = vec![tx("Invoice", dec!(12000), TransactionKind::Income)];
        let form11 = Form11Summary::assemble(&transactions, &Questionnaire::for_year(2024));
        assert_eq!(form11.gross_income_tax, dec!(2400));
        assert_eq!(form11.net_income_tax, Decimal::ZERO);
        assert_eq!(form11.usc, Decimal::ZERO);
        assert_eq!(form11.prsi, dec!(500));
    }

    #[test]
    fn loss_year() {
        let transactions = vec![
            tx("Invoice", dec!(1000), TransactionKind::Income),
            tx("Stock", dec!(-4000), TransactionKind::Expense),
        ];
        let form11 = Form11Summary::assemble(&transactions, &Questionnaire::for_year(2024));
        assert_eq!(form11.assessable_profit, Decimal::ZERO);
        assert_eq!(form11.trading_loss, dec!(3000));
        assert_eq!(form11.total_liability, Decimal::ZERO);
    }
}
