//! Inspect command implementation.

use serde_json::json;

use crate::input::load_pool;
use crate::output::{field_type, fields_by_number, format_field_row, format_json};

pub fn run(schema: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = load_pool(&schema)?;
    let mut messages: Vec<_> = pool.messages().collect();
    messages.sort_by(|a, b| a.full_name().cmp(b.full_name()));

    if json {
        let output = json!({
            "messages": messages.iter().map(|m| json!({
                "name": m.full_name(),
                "fields": fields_by_number(m).iter().map(|f| json!({
                    "number": f.number(),
                    "name": f.name(),
                    "type": field_type(f),
                    "oneof": m.containing_oneof(f).map(|o| o.name()),
                })).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
            "message_count": messages.len(),
        });
        println!("{}", format_json(&output));
        return Ok(());
    }

    for message in &messages {
        println!("{}", message.full_name());
        for field in fields_by_number(message) {
            println!("{}", format_field_row(message, field));
        }
    }
    Ok(())
}
