use rust_decimal::Decimal;
use serde::Serialize;

/// One band of a cumulative rate schedule. `up_to` is the inclusive ceiling
/// of the band; `None` marks the open top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub up_to: Option<Decimal>,
    pub rate: Decimal,
}

impl Band {
    pub const fn upto(ceiling: Decimal, rate: Decimal) -> Self {
        Band {
            up_to: Some(ceiling),
            rate,
        }
    }

    pub const fn rest(rate: Decimal) -> Self {
        Band { up_to: None, rate }
    }
}

/// The portion of an amount charged in one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandSlice {
    pub band: usize,
    pub units: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Split `total` across `bands` marginally, like progressive tax brackets:
/// each band consumes at most its own width. Bands must be ordered by
/// ascending ceiling. Amounts are left unrounded.
pub fn band_slices(total: Decimal, bands: &[Band]) -> Vec<BandSlice> {
    let mut slices = Vec::new();
    let mut remaining = total;
    let mut floor = Decimal::ZERO;

    for (index, band) in bands.iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let units = match band.up_to {
            Some(ceiling) => remaining.min((ceiling - floor).max(Decimal::ZERO)),
            None => remaining,
        };
        if units > Decimal::ZERO {
            slices.push(BandSlice {
                band: index + 1,
                units,
                rate: band.rate,
                amount: units * band.rate,
            });
        }
        remaining -= units;
        if let Some(ceiling) = band.up_to {
            floor = ceiling;
        }
    }

    slices
}

pub fn apply_bands(total: Decimal, bands: &[Band]) -> Decimal {
    band_slices(total, bands).iter().map(|s| s.amount).sum()
}
