//! Scan expense descriptions for payments that may qualify for personal tax
//! reliefs and credits.

use crate::core::Transaction;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Relief buckets, in the order they are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReliefCategory {
    HealthInsurance,
    Medical,
    Pension,
    Charitable,
    Rent,
    Tuition,
}

impl ReliefCategory {
    /// Priority order: more specific categories first.
    pub const ALL: [ReliefCategory; 6] = [
        ReliefCategory::HealthInsurance,
        ReliefCategory::Medical,
        ReliefCategory::Pension,
        ReliefCategory::Charitable,
        ReliefCategory::Rent,
        ReliefCategory::Tuition,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            ReliefCategory::HealthInsurance => "Health insurance",
            ReliefCategory::Medical => "Medical expenses",
            ReliefCategory::Pension => "Pension contributions",
            ReliefCategory::Charitable => "Charitable donations",
            ReliefCategory::Rent => "Rent",
            ReliefCategory::Tuition => "Tuition fees",
        }
    }

    /// Governing section of the Taxes Consolidation Act 1997.
    pub fn statute(&self) -> &'static str {
        match self {
            ReliefCategory::HealthInsurance => "s470 TCA 1997",
            ReliefCategory::Medical => "s469 TCA 1997",
            ReliefCategory::Pension => "s774 TCA 1997",
            ReliefCategory::Charitable => "s848A TCA 1997",
            ReliefCategory::Rent => "s473B TCA 1997",
            ReliefCategory::Tuition => "s473A TCA 1997",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            ReliefCategory::HealthInsurance => &[
                "vhi",
                "laya",
                "irish life health",
                "level health",
                "health insurance",
                "hsf health",
                "glo health",
            ],
            ReliefCategory::Medical => &[
                "pharmacy",
                "chemist",
                "doctor",
                "medical",
                "hospital",
                "clinic",
                "medical consultant",
                "consultant physician",
                "consultant surgeon",
                "physio",
                "dentist",
                "dental",
                "orthodontist",
                "orthodontic",
                "orthodontics",
                "optician",
                "gp surgery",
                "health centre",
                "prescription",
                "boots pharmacy",
                "boots chemist",
                "lloyds pharmacy",
                "mater private",
                "blackrock clinic",
            ],
            ReliefCategory::Pension => &[
                "pension",
                "prsa",
                "avc",
                "retirement annuity",
                "irish life assurance",
                "zurich life",
                "new ireland assurance",
                "aviva life",
            ],
            ReliefCategory::Charitable => &[
                "donation",
                "charity",
                "charitable",
                "trocaire",
                "concern worldwide",
                "barnardos",
                "st vincent de paul",
                "svp",
                "unicef",
                "oxfam",
                "red cross",
                "irish cancer society",
                "focus ireland",
            ],
            ReliefCategory::Rent => &[
                "rent payment",
                "monthly rent",
                "landlord",
                "letting agent",
                "residential tenancies",
                "rtb registration",
            ],
            ReliefCategory::Tuition => &[
                "tuition",
                "college fee",
                "course fee",
                "student contribution",
                "registration fee",
                "university",
                "institute of technology",
                "technological university",
                "trinity college",
                "griffith college",
                "dublin business school",
            ],
        }
    }
}

/// Medical spending that does not qualify for relief.
const MEDICAL_EXCLUSIONS: &[&str] = &[
    "cosmetic",
    "teeth whitening",
    "whitening",
    "botox",
    "filler",
    "scale and polish",
    "routine dental",
    "dental check-up",
    "dental checkup",
    "eye test",
    "glasses",
    "contact lenses",
    "spa treatment",
    "day spa",
    "beauty",
];

/// Anything the scanner can classify.
pub trait ReliefCandidate {
    fn description(&self) -> &str;
    fn amount(&self) -> Decimal;
    fn date(&self) -> NaiveDate;
    fn is_expense(&self) -> bool;
}

impl ReliefCandidate for Transaction {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.transaction_date
    }

    fn is_expense(&self) -> bool {
        Transaction::is_expense(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReliefMatch {
    pub date: NaiveDate,
    pub description: String,
    /// Absolute value of the payment
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReliefBucket {
    pub total: Decimal,
    pub transactions: Vec<ReliefMatch>,
}

impl ReliefBucket {
    fn push(&mut self, relief: ReliefMatch) {
        self.total += relief.amount;
        self.transactions.push(relief);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliefScanResult {
    pub medical: ReliefBucket,
    pub health_insurance: ReliefBucket,
    pub pension: ReliefBucket,
    pub charitable: ReliefBucket,
    pub rent: ReliefBucket,
    pub tuition: ReliefBucket,
}

impl ReliefScanResult {
    pub fn bucket(&self, category: ReliefCategory) -> &ReliefBucket {
        match category {
            ReliefCategory::HealthInsurance => &self.health_insurance,
            ReliefCategory::Medical => &self.medical,
            ReliefCategory::Pension => &self.pension,
            ReliefCategory::Charitable => &self.charitable,
            ReliefCategory::Rent => &self.rent,
            ReliefCategory::Tuition => &self.tuition,
        }
    }

    fn bucket_mut(&mut self, category: ReliefCategory) -> &mut ReliefBucket {
        match category {
            ReliefCategory::HealthInsurance => &mut self.health_insurance,
            ReliefCategory::Medical => &mut self.medical,
            ReliefCategory::Pension => &mut self.pension,
            ReliefCategory::Charitable => &mut self.charitable,
            ReliefCategory::Rent => &mut self.rent,
            ReliefCategory::Tuition => &mut self.tuition,
        }
    }
}

fn normalise(description: &str) -> String {
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One whole-word matcher per category, in priority order.
static CATEGORY_MATCHERS: Lazy<Vec<(ReliefCategory, Regex)>> = Lazy::new(|| {
    ReliefCategory::ALL
        .into_iter()
        .map(|category| {
            let alternatives: Vec<_> = category.patterns().iter().copied().map(regex::escape).collect();
            let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
            let regex = Regex::new(&pattern).expect("hardcoded relief patterns should be valid");
            (category, regex)
        })
        .collect()
});

/// First relief category the description qualifies for.
///
/// Patterns match whole words only, so "current to" is not rent and
/// "smartbox" is not an RTB payment.
pub fn classify(description: &str) -> Option<ReliefCategory> {
    let text = normalise(description);
    CATEGORY_MATCHERS
        .iter()
        .find(|(category, matcher)| {
            let included = matcher.is_match(&text);
            match category {
                // Excluded medical spend drops through to the later categories
                ReliefCategory::Medical => {
                    included && !MEDICAL_EXCLUSIONS.iter().any(|p| text.contains(p))
                }
                _ => included,
            }
        })
        .map(|(category, _)| *category)
}

pub fn scan_for_reliefs<T: ReliefCandidate>(transactions: &[T]) -> ReliefScanResult {
    let mut result = ReliefScanResult::default();

    for tx in transactions {
        if !tx.is_expense() || tx.amount().is_zero() {
            continue;
        }
        let Some(category) = classify(tx.description()) else {
            continue;
        };
        log::debug!("Relief {:?}: {}", category, tx.description());
        result.bucket_mut(category).push(ReliefMatch {
            date: tx.date(),
            description: tx.description().to_string(),
            amount: tx.amount().abs(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransactionKind;
    use rust_decimal_macros::dec;

    fn expense(description: &str, amount: Decimal) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description,
            amount,
            TransactionKind::Expense,
        )
    }

    #[test]
    fn empty_input_gives_empty_buckets() {
        let result = scan_for_reliefs::<Transaction>(&[]);
        assert_eq!(result, ReliefScanResult::default());
        for category in ReliefCategory::ALL {
            assert_eq!(result.bucket(category).total, Decimal::ZERO);
        }
    }

    #[test]
    fn classifies_each_category() {
        let transactions = vec![
            expense("VHI Healthcare DD", dec!(-120.50)),
            expense("Boots Pharmacy Grafton St", dec!(-23.40)),
            expense("Irish Life Assurance PRSA", dec!(-300)),
            expense("Donation - Focus Ireland", dec!(-50)),
            expense("Monthly rent Apt 4", dec!(-1400)),
            expense("UCD Student Contribution", dec!(-3000)),
        ];

        let result = scan_for_reliefs(&transactions);
        assert_eq!(result.health_insurance.total, dec!(120.50));
        assert_eq!(result.medical.total, dec!(23.40));
        assert_eq!(result.pension.total, dec!(300));
        assert_eq!(result.charitable.total, dec!(50));
        assert_eq!(result.rent.total, dec!(1400));
        assert_eq!(result.tuition.total, dec!(3000));
    }

    #[test]
    fn health_insurance_beats_medical() {
        let result = scan_for_reliefs(&[expense("Laya Healthcare medical cover", dec!(90))]);
        assert_eq!(result.health_insurance.total, dec!(90));
        assert_eq!(result.medical.total, Decimal::ZERO);
    }

    #[test]
    fn excluded_medical_gets_no_credit() {
        let result = scan_for_reliefs(&[expense("Teeth whitening treatment", dec!(300))]);
        assert_eq!(result.medical.total, Decimal::ZERO);
        assert!(result.medical.transactions.is_empty());
    }

    #[test]
    fn excluded_medical_falls_through_to_later_categories() {
        // Matches dental, excluded as cosmetic, then picked up as a donation
        let result = scan_for_reliefs(&[expense("Cosmetic dental charity donation", dec!(40))]);
        assert_eq!(result.medical.total, Decimal::ZERO);
        assert_eq!(result.charitable.total, dec!(40));
    }

    #[test]
    fn income_and_zero_amounts_skipped() {
        let mut refund = expense("Pharmacy refund", dec!(15));
        refund.kind = TransactionKind::Income;
        let result = scan_for_reliefs(&[refund, expense("Pharmacy", dec!(0))]);
        assert_eq!(result, ReliefScanResult::default());
    }

    #[test]
    fn description_is_normalised() {
        assert_eq!(
            classify("  ST   VINCENT   de  PAUL  "),
            Some(ReliefCategory::Charitable)
        );
        assert_eq!(classify("Tesco groceries"), None);
    }

    #[test]
    fn amounts_are_absolute_and_accumulate() {
        let result = scan_for_reliefs(&[
            expense("Physio session", dec!(-60)),
            expense("Physio session", dec!(60)),
        ]);
        assert_eq!(result.medical.total, dec!(120));
        assert_eq!(result.medical.transactions.len(), 2);
        assert!(result.medical.transactions.iter().all(|m| m.amount == dec!(60)));
    }

    #[test]
    fn transaction_lands_in_at_most_one_bucket() {
        let transactions = vec![
            expense("VHI hospital pension donation rent tuition", dec!(10)),
            expense("Pension rent", dec!(20)),
            expense("Dentist", dec!(30)),
            expense("Coffee", dec!(4)),
        ];
        let result = scan_for_reliefs(&transactions);
        let matched: usize = ReliefCategory::ALL
            .iter()
            .map(|c| result.bucket(*c).transactions.len())
            .sum();
        assert_eq!(matched, 3);
        assert_eq!(result.health_insurance.total, dec!(10));
        assert_eq!(result.pension.total, dec!(20));
        assert_eq!(result.medical.total, dec!(30));
    }

    #[test]
    fn business_narratives_are_not_reliefs() {
        for description in [
            "Marketing consultant invoice",
            "IT consultant fee",
            "Safety work boots",
            "Transfer current to savings",
            "Smartbox voucher",
            "Heartbeat monitoring subscription",
            "Parent to child transfer",
        ] {
            assert_eq!(classify(description), None, "{description}");
        }
    }

    #[test]
    fn specific_medical_and_rent_narratives_still_match() {
        assert_eq!(classify("Medical consultant Dr Byrne"), Some(ReliefCategory::Medical));
        assert_eq!(classify("Boots Chemist Cork"), Some(ReliefCategory::Medical));
        assert_eq!(classify("Orthodontic treatment"), Some(ReliefCategory::Medical));
        assert_eq!(classify("RTB registration fee"), Some(ReliefCategory::Rent));
        assert_eq!(classify("Payment to landlord"), Some(ReliefCategory::Rent));
    }

    #[test]
    fn scan_is_repeatable() {
        let transactions = vec![expense("Dentist", dec!(30)), expense("PRSA", dec!(100))];
        assert_eq!(scan_for_reliefs(&transactions), scan_for_reliefs(&transactions));
    }
}
