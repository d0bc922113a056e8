mod cmd;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ietax", version, about = "Irish tax calculator for sole traders and small companies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Civil service mileage and subsistence allowances
    Allowances(cmd::allowances::AllowancesCommand),
    /// Wear and tear capital allowances on a business vehicle
    Depreciation(cmd::depreciation::DepreciationCommand),
    /// Scan expenses for payments that qualify for tax reliefs
    Reliefs(cmd::reliefs::ReliefsCommand),
    /// Cross-border VAT treatment, VAT numbers and thresholds
    Vat(cmd::vat::VatCommand),
    /// Trial balance, VAT3, CT1 and Form 11 from bookkeeping data
    Summary(cmd::summary::SummaryCommand),
    /// Print the expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Allowances(allowances) => allowances.exec(),
        Command::Depreciation(depreciation) => depreciation.exec(),
        Command::Reliefs(reliefs) => reliefs.exec(),
        Command::Vat(vat) => vat.exec(),
        Command::Summary(summary) => summary.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
