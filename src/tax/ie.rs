use super::bands::Band;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Irish tax year. Unlike the UK, it runs with the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

const USC_2023: &[Band] = &[
    Band::upto(dec!(12012), dec!(0.005)),
    Band::upto(dec!(22920), dec!(0.02)),
    Band::upto(dec!(70044), dec!(0.045)),
    Band::rest(dec!(0.08)),
];

const USC_2024: &[Band] = &[
    Band::upto(dec!(12012), dec!(0.005)),
    Band::upto(dec!(25760), dec!(0.02)),
    Band::upto(dec!(70044), dec!(0.04)),
    Band::rest(dec!(0.08)),
];

const USC_2025: &[Band] = &[
    Band::upto(dec!(12012), dec!(0.005)),
    Band::upto(dec!(27382), dec!(0.02)),
    Band::upto(dec!(70044), dec!(0.03)),
    Band::rest(dec!(0.08)),
];

impl TaxYear {
    pub fn display(&self) -> String {
        self.0.to_string()
    }

    /// Standard rate cut-off point for a single person
    pub fn standard_rate_band(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(44000),
            2024 => dec!(42000),
            // 2023 and earlier
            _ => dec!(40000),
        }
    }

    pub fn standard_rate(&self) -> Decimal {
        dec!(0.20)
    }

    pub fn higher_rate(&self) -> Decimal {
        dec!(0.40)
    }

    /// Income tax bands for a single person
    pub fn income_tax_bands(&self) -> [Band; 2] {
        [
            Band::upto(self.standard_rate_band(), self.standard_rate()),
            Band::rest(self.higher_rate()),
        ]
    }

    pub fn personal_credit(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(2000),
            2024 => dec!(1875),
            _ => dec!(1775),
        }
    }

    /// Earned income credit for the self-employed
    pub fn earned_income_credit(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(2000),
            2024 => dec!(1875),
            _ => dec!(1775),
        }
    }

    pub fn usc_bands(&self) -> &'static [Band] {
        match self.0 {
            2025.. => USC_2025,
            2024 => USC_2024,
            _ => USC_2023,
        }
    }

    /// Income at or below this is exempt from USC altogether
    pub fn usc_exemption_limit(&self) -> Decimal {
        dec!(13000)
    }

    /// Self-employed income above this attracts the USC surcharge
    pub fn usc_surcharge_threshold(&self) -> Decimal {
        dec!(100000)
    }

    pub fn usc_surcharge_rate(&self) -> Decimal {
        dec!(0.03)
    }

    /// Class S PRSI rate
    pub fn prsi_rate(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(0.041),
            _ => dec!(0.04),
        }
    }

    pub fn prsi_minimum_contribution(&self) -> Decimal {
        dec!(500)
    }

    /// Class S PRSI applies once income reaches this level
    pub fn prsi_income_threshold(&self) -> Decimal {
        dec!(5000)
    }

    pub fn corporation_tax_rate(&self) -> Decimal {
        dec!(0.125)
    }

    /// Rent tax credit cap for a single person
    pub fn rent_credit_cap(&self) -> Decimal {
        match self.0 {
            2025.. => dec!(1000),
            2024 => dec!(750),
            2022 | 2023 => dec!(500),
            _ => Decimal::ZERO,
        }
    }

    pub fn medical_relief_rate(&self) -> Decimal {
        dec!(0.20)
    }

    pub fn tuition_relief_rate(&self) -> Decimal {
        dec!(0.20)
    }

    /// First part of qualifying fees that gets no relief (full-time student)
    pub fn tuition_disregard(&self) -> Decimal {
        dec!(3000)
    }

    /// Maximum qualifying fees per course
    pub fn tuition_fee_cap(&self) -> Decimal {
        dec!(7000)
    }

    pub fn pension_earnings_cap(&self) -> Decimal {
        dec!(115000)
    }

    /// Age-related limit on relievable pension contributions, as a share of
    /// net relevant earnings. Unknown age takes the lowest limit.
    pub fn pension_relief_limit(&self, age: Option<u32>) -> Decimal {
        match age {
            Some(60..) => dec!(0.40),
            Some(55..=59) => dec!(0.35),
            Some(50..=54) => dec!(0.30),
            Some(40..=49) => dec!(0.25),
            Some(30..=39) => dec!(0.20),
            _ => dec!(0.15),
        }
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
