//! Schema command - print expected input formats

use clap::Args;
use ietax::core::{BookkeepingInput, CsvTransactionRow, TransactionInput};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for bookkeeping input (transactions plus questionnaire)
    JsonSchema,
    /// JSON Schema for a plain transaction list
    TransactionsSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(BookkeepingInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::TransactionsSchema => {
                let schema = schema_for!(TransactionInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<_> = CsvTransactionRow::csv_columns()
                    .iter()
                    .map(|c| c.name)
                    .collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
        Ok(())
    }

    fn print_csv_fields(&self) {
        println!("CSV Input Format");
        println!("================");
        println!();
        for column in CsvTransactionRow::csv_columns() {
            let req = if column.required { "required" } else { "optional" };
            println!("{:12} ({:8})  {}", column.name, req, column.description);
        }
        println!();
        println!("Amounts are in euro. A blank type is inferred from the sign: negative amounts are expenses.");
    }
}
