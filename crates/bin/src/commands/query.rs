//! Query commands run against the assembled map.

use dotree::{NestedMap, Value};

use crate::cli::KeyArgs;
use crate::output::{OutputFormat, print_table};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn print_value(value: &Value, format: OutputFormat) -> CommandResult {
    match format {
        OutputFormat::Human => println!("{value}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(&value.to_json())?),
    }
    Ok(())
}

fn print_items(map: &NestedMap, format: OutputFormat) -> CommandResult {
    match format {
        OutputFormat::Human => {
            if map.is_empty() {
                println!("No keys found.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = map
                .items()
                .map(|(key, value)| vec![key, value.to_string()])
                .collect();
            print_table(&["KEY", "VALUE"], &rows);
        }
        OutputFormat::Json => {
            let entries: serde_json::Map<String, serde_json::Value> = map
                .items()
                .map(|(key, value)| (key, value.to_json()))
                .collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }
    Ok(())
}

/// Run the `get` command
pub fn get(map: &NestedMap, args: &KeyArgs, format: OutputFormat) -> CommandResult {
    print_value(map.get_item(args.key.as_str())?, format)
}

/// Run the `contains` command
pub fn contains(map: &NestedMap, args: &KeyArgs, format: OutputFormat) -> CommandResult {
    let found = map.contains(args.key.as_str());
    match format {
        OutputFormat::Human => println!("{found}"),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "key": args.key,
                "contains": found,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Run the `keys` command
pub fn keys(map: &NestedMap, format: OutputFormat) -> CommandResult {
    match format {
        OutputFormat::Human => {
            for key in map.keys() {
                println!("{key}");
            }
        }
        OutputFormat::Json => {
            let keys: Vec<String> = map.keys().collect();
            println!("{}", serde_json::to_string(&keys)?);
        }
    }
    Ok(())
}

/// Run the `items` command
pub fn items(map: &NestedMap, format: OutputFormat) -> CommandResult {
    print_items(map, format)
}

/// Run the `pop` command
pub fn pop(map: &mut NestedMap, args: &KeyArgs, format: OutputFormat) -> CommandResult {
    let value = map.pop(args.key.as_str())?;
    print_value(&value, format)
}

/// Run the `delete` command
pub fn delete(map: &mut NestedMap, args: &KeyArgs, format: OutputFormat) -> CommandResult {
    map.delete(args.key.as_str())?;
    print_items(map, format)
}
