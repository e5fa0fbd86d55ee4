//! Reading schemas and messages from files or stdin.

use std::io::{self, Read};

use protohash_schema::{DescriptorPool, DynamicMessage, FileSchema};
use serde::Deserialize;

/// A schema file holds one file schema or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    One(FileSchema),
    Many(Vec<FileSchema>),
}

/// Reads a file, or all of stdin when no path is given.
pub fn read_source(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parses and validates a schema file into a descriptor pool.
pub fn load_pool(path: &str) -> Result<DescriptorPool, Box<dyn std::error::Error>> {
    let text = read_source(Some(path))?;
    let document: SchemaDocument = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid schema {}: {}", path, e))?;
    let files = match document {
        SchemaDocument::One(file) => vec![file],
        SchemaDocument::Many(files) => files,
    };
    let pool = DescriptorPool::build(files).map_err(|e| format!("Invalid schema: {}", e))?;
    tracing::debug!(path, messages = pool.len(), "schema loaded");
    Ok(pool)
}

/// Decodes a JSON message of type `message` from `input` (or stdin).
pub fn load_message(
    pool: &DescriptorPool,
    message: &str,
    input: Option<&str>,
) -> Result<DynamicMessage, Box<dyn std::error::Error>> {
    let descriptor = pool
        .message(message)
        .ok_or_else(|| format!("Unknown message type: {}", message))?;
    let text = read_source(input)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("Invalid JSON: {}", e))?;
    let decoded = DynamicMessage::from_json(descriptor, &json)
        .map_err(|e| format!("Invalid message: {}", e))?;
    Ok(decoded)
}
