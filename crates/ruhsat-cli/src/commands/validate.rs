//! Validate command - check a T.C. identity number.

use clap::Args;
use console::style;

use ruhsat_core::registration::rules::validate_identity_number;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Identity number to check
    #[arg(required = true)]
    identity_number: String,
}

pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let number = args.identity_number.trim();

    if !validate_identity_number(number) {
        anyhow::bail!("{} is not a valid identity number", number);
    }

    println!("{} {} is a valid identity number", style("✓").green(), number);
    Ok(())
}
