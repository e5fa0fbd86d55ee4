//! Canonical command implementation.

use super::Target;

pub fn run(target: Target) -> Result<(), Box<dyn std::error::Error>> {
    let hasher = target.hasher(None)?;
    let message = target.load_message()?;

    let bytes = hasher
        .canonical_bytes(&message)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", hex::encode(bytes));
    Ok(())
}
