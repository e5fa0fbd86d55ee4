//! Hash command implementation.

use protohash::DigestAlg;

use super::Target;
use crate::output::{digest_json, format_json};

pub fn run(target: Target, alg: Option<DigestAlg>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let hasher = target.hasher(alg)?;
    let message = target.load_message()?;

    let digest = hasher
        .sum(&message)
        .map_err(|e| format!("Hashing failed: {}", e))?;

    let hex = digest
        .to_hex()
        .map_err(|e| format!("Invalid digest encoding: {}", e))?;

    if json {
        println!("{}", format_json(&digest_json(&digest, &hex)));
    } else {
        println!("{}", hex);
    }
    Ok(())
}
