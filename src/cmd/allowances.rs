//! Allowances command - tax-free mileage and subsistence at civil service rates

use crate::cmd::{print_json, print_table, LineItem};
use clap::{Args, Subcommand, ValueEnum};
use ietax::core::format_eur;
use ietax::tax::allowances::{
    annual_commute_km, calculate_annual_commute_mileage, calculate_mileage_allowance,
    calculate_subsistence_allowance, VehicleType, DEFAULT_WORKING_DAYS, MILEAGE_RATES,
};
use ietax::tax::{band_slices, Band};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct AllowancesCommand {
    #[command(subcommand)]
    kind: AllowanceKind,

    /// Output as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum AllowanceKind {
    /// Mileage allowance for business kilometres in a private vehicle
    Mileage {
        /// Business kilometres for the year
        km: Decimal,
        #[arg(short, long, value_enum, default_value_t = VehicleArg::Car)]
        vehicle: VehicleArg,
    },
    /// Mileage value of a daily round trip over a working year
    Commute {
        /// One-way distance in kilometres
        one_way_km: Decimal,
        #[arg(short, long, default_value_t = DEFAULT_WORKING_DAYS)]
        days: u32,
    },
    /// Overnight and day subsistence
    Subsistence {
        #[arg(short, long, default_value_t = 0)]
        nights: i64,
        /// Day trips of ten hours or more
        #[arg(short, long, default_value_t = 0)]
        days: i64,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum VehicleArg {
    #[default]
    Car,
    Motorcycle,
    Bicycle,
}

impl From<VehicleArg> for VehicleType {
    fn from(arg: VehicleArg) -> Self {
        match arg {
            VehicleArg::Car => VehicleType::MotorCar,
            VehicleArg::Motorcycle => VehicleType::Motorcycle,
            VehicleArg::Bicycle => VehicleType::Bicycle,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Km")]
    km: Decimal,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Serialize)]
struct MileageOutput {
    vehicle_type: VehicleType,
    km: Decimal,
    allowance: Decimal,
}

#[derive(Debug, Serialize)]
struct CommuteOutput {
    one_way_km: Decimal,
    working_days: u32,
    annual_km: Decimal,
    allowance: Decimal,
}

impl AllowancesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.kind {
            AllowanceKind::Mileage { km, vehicle } => self.mileage(*km, (*vehicle).into()),
            AllowanceKind::Commute { one_way_km, days } => self.commute(*one_way_km, *days),
            AllowanceKind::Subsistence { nights, days } => self.subsistence(*nights, *days),
        }
    }

    fn mileage(&self, km: Decimal, vehicle_type: VehicleType) -> anyhow::Result<()> {
        let allowance = calculate_mileage_allowance(km, vehicle_type);
        if self.json {
            return print_json(&MileageOutput {
                vehicle_type,
                km,
                allowance,
            });
        }

        println!("Mileage allowance: {}", vehicle_type.display());
        let bands = rates_for(vehicle_type);
        let rows: Vec<_> = band_slices(km.max(Decimal::ZERO), bands)
            .into_iter()
            .map(|slice| BandRow {
                band: match bands[slice.band - 1].up_to {
                    Some(ceiling) => format!("up to {} km", ceiling),
                    None => "remainder".to_string(),
                },
                km: slice.units,
                rate: format!("€{}", slice.rate),
                amount: format_eur(slice.amount),
            })
            .collect();
        if !rows.is_empty() {
            print_table(rows);
        }
        println!("Total: {}", format_eur(allowance));
        Ok(())
    }

    fn commute(&self, one_way_km: Decimal, days: u32) -> anyhow::Result<()> {
        let allowance = calculate_annual_commute_mileage(one_way_km, days);
        let output = CommuteOutput {
            one_way_km,
            working_days: days,
            annual_km: annual_commute_km(one_way_km, days),
            allowance,
        };
        if self.json {
            return print_json(&output);
        }

        print_table([
            LineItem::text("One-way distance (km)", output.one_way_km),
            LineItem::text("Working days", output.working_days),
            LineItem::text("Annual distance (km)", output.annual_km),
            LineItem::eur("Mileage value", output.allowance),
        ]);
        Ok(())
    }

    fn subsistence(&self, nights: i64, days: i64) -> anyhow::Result<()> {
        let allowance = calculate_subsistence_allowance(nights, days);
        if self.json {
            return print_json(&allowance);
        }

        print_table([
            LineItem::eur(format!("Overnight ({} nights)", nights.max(0)), allowance.accommodation),
            LineItem::eur(format!("Day, 10 hours+ ({} days)", days.max(0)), allowance.meals),
            LineItem::eur("Total", allowance.total),
        ]);
        Ok(())
    }
}

const BICYCLE_BANDS: &[Band] = &[Band::rest(MILEAGE_RATES.bicycle)];

fn rates_for(vehicle_type: VehicleType) -> &'static [Band] {
    match vehicle_type {
        VehicleType::MotorCar => MILEAGE_RATES.motor_car,
        VehicleType::Motorcycle => MILEAGE_RATES.motorcycle,
        VehicleType::Bicycle => BICYCLE_BANDS,
    }
}
