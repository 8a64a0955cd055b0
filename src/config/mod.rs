pub mod cli;

use crate::core::ConfigProvider;
use crate::domain::model::Delimiter;
use crate::utils::error::Result;
use crate::utils::validation::{validate_existing_directory, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "slot-raffle")]
#[command(about = "Raffle slots among residents, disabled and elderly residents first")]
pub struct CliConfig {
    /// Path of the directory containing the input files
    #[arg(long, default_value = "input")]
    pub directory: String,

    /// Delimiter used in input and output files
    #[arg(long, value_enum, ignore_case = true, default_value_t = Delimiter::Tab)]
    pub delimiter: Delimiter,

    /// Seed the random generator for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Validate and draw without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_existing_directory("directory", &self.directory)
    }
}

impl ConfigProvider for CliConfig {
    fn directory(&self) -> &str {
        &self.directory
    }

    fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
