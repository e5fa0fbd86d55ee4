//! Subcommand implementations.

pub mod canonical;
pub mod hash;
pub mod inspect;

use clap::Args;
use protohash::{DigestAlg, HashOptions, Hasher};
use protohash_schema::DynamicMessage;

use crate::{config, input};

/// Flags shared by commands that hash one message.
#[derive(Args)]
pub struct Target {
    /// Schema file (JSON)
    #[arg(long)]
    pub schema: String,
    /// Fully-qualified message type, e.g. acme.v1.Doc
    #[arg(long)]
    pub message: String,
    /// Message JSON file (or stdin if not provided)
    #[arg(long)]
    pub input: Option<String>,
    /// Fully-qualified field or oneof name to leave out (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,
    /// Fail when messages nest deeper than N levels (default: unlimited)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
    /// TOML file with hashing options
    #[arg(long)]
    pub config: Option<String>,
}

impl Target {
    /// Loads the schema and decodes the message.
    pub fn load_message(&self) -> Result<DynamicMessage, Box<dyn std::error::Error>> {
        let pool = input::load_pool(&self.schema)?;
        input::load_message(&pool, &self.message, self.input.as_deref())
    }

    /// Config file options with flags applied on top.
    pub fn options(&self, alg: Option<DigestAlg>) -> Result<HashOptions, Box<dyn std::error::Error>> {
        let options = config::load(self.config.as_deref())?;
        Ok(config::apply_overrides(options, alg, &self.ignore, self.max_depth))
    }

    /// A hasher configured from [`Target::options`].
    pub fn hasher(&self, alg: Option<DigestAlg>) -> Result<Hasher, Box<dyn std::error::Error>> {
        let options = self.options(alg)?;
        Ok(Hasher::from_options(&options)?)
    }
}
