//! Loading of decoded event tables.
//!
//! The external decoder writes one JSON object holding up to four tables
//! (kills, damage, round ends, position samples) as arrays of row objects.
//! Different decoder builds name tables and columns differently, so every
//! lookup goes through the alias lists in `utils::config`.
//!
//! Malformed rows are skipped with a warning. A table only fails the load
//! when it is not an array, or when every row of the kill or damage table
//! is malformed. An optional table (round ends, positions) with no usable
//! rows is dropped with a warning and the run degrades as if it were absent.

use super::schema::{DamageEvent, KillEvent, MatchEvents, PositionSample, RoundEndEvent, Tick};
use crate::utils::config::{
    DAMAGE_FIELD_NAMES, DAMAGE_TABLE_NAMES, HEADSHOT_FIELD_NAMES, KILL_TABLE_NAMES,
    PLAYER_FIELD_NAMES, POSITION_TABLE_NAMES, ROUND_TABLE_NAMES, VICTIM_FIELD_NAMES,
    WINNER_FIELD_NAMES,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

type Row = Map<String, Value>;

/// Read and parse a decoded events file
///
/// # Errors
/// * `ParseError::IoError` - file cannot be read
/// * `ParseError::JsonError` - file is not valid JSON
/// * `ParseError::InvalidFormat` - see [`parse_events`]
pub fn load_events(path: impl AsRef<Path>) -> Result<MatchEvents, ParseError> {
    let path = path.as_ref();
    debug!("Reading decoded events from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&contents)?;
    parse_events(&raw)
}

/// Parse decoded event tables from a JSON value
///
/// Missing kill or damage tables are *not* an error here; they come back
/// as `None` and the engine decides whether it can proceed.
///
/// # Errors
/// * `ParseError::InvalidFormat` - top level is not an object, a table is
///   not an array, or every row of a table is malformed
pub fn parse_events(raw: &Value) -> Result<MatchEvents, ParseError> {
    let obj = raw.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Decoded events must be a JSON object".to_string())
    })?;

    let kills = find_table(obj, KILL_TABLE_NAMES)?
        .map(|rows| parse_rows(rows, "kill", true, parse_kill_row))
        .transpose()?;

    let damages = find_table(obj, DAMAGE_TABLE_NAMES)?
        .map(|rows| parse_rows(rows, "damage", true, parse_damage_row))
        .transpose()?;

    let rounds = match find_table(obj, ROUND_TABLE_NAMES)? {
        Some(rows) => parse_rows(rows, "round_end", false, parse_round_row)?,
        None => {
            debug!("No round table in decoded events; round context unavailable");
            Vec::new()
        }
    };

    let positions = match find_table(obj, POSITION_TABLE_NAMES)? {
        Some(rows) => parse_rows(rows, "position", false, parse_position_row)?,
        None => {
            debug!("No position table in decoded events");
            Vec::new()
        }
    };

    debug!(
        "Parsed events: {} kills, {} damage, {} round ends, {} position samples",
        kills.as_ref().map_or(0, Vec::len),
        damages.as_ref().map_or(0, Vec::len),
        rounds.len(),
        positions.len()
    );

    Ok(MatchEvents {
        kills,
        damages,
        rounds,
        positions,
    })
}

/// Find the first table present under any of `names`
fn find_table<'a>(obj: &'a Row, names: &[&str]) -> Result<Option<&'a [Value]>, ParseError> {
    for name in names {
        match obj.get(*name) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(rows)) => return Ok(Some(rows)),
            Some(other) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Table '{}' must be an array, found {}",
                    name,
                    json_type(other)
                )))
            }
        }
    }
    Ok(None)
}

/// Parse every row of a table, skipping malformed ones
///
/// When no row survives, a `required` table is an error and any other
/// table comes back empty.
fn parse_rows<T>(
    rows: &[Value],
    table: &str,
    required: bool,
    parse_row: fn(&Row) -> Result<T, String>,
) -> Result<Vec<T>, ParseError> {
    let mut parsed = Vec::with_capacity(rows.len());

    for (index, value) in rows.iter().enumerate() {
        let result = value
            .as_object()
            .ok_or_else(|| "row is not an object".to_string())
            .and_then(parse_row);

        match result {
            Ok(row) => parsed.push(row),
            Err(e) => warn!("Skipping {} row {}: {}", table, index, e),
        }
    }

    if parsed.is_empty() && !rows.is_empty() {
        if required {
            return Err(ParseError::InvalidFormat(format!(
                "All {} rows failed to parse",
                table
            )));
        }
        warn!(
            "All {} {} rows failed to parse; ignoring the table",
            rows.len(),
            table
        );
    }

    Ok(parsed)
}

fn parse_kill_row(row: &Row) -> Result<KillEvent, String> {
    Ok(KillEvent {
        tick: tick_field(row)?,
        attacker_name: optional_str(row, &["attacker_name", "attacker"]),
        victim_name: required_str(row, VICTIM_FIELD_NAMES)?,
        assister_name: optional_str(row, &["assister_name", "assister"]),
        weapon: optional_str(row, &["weapon"]),
        is_headshot: bool_field(row, HEADSHOT_FIELD_NAMES),
    })
}

fn parse_damage_row(row: &Row) -> Result<DamageEvent, String> {
    let value = field(row, DAMAGE_FIELD_NAMES).ok_or("missing damage amount")?;
    let amount = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
        .ok_or_else(|| format!("invalid damage amount {}", value))?;

    Ok(DamageEvent {
        tick: tick_field(row)?,
        attacker_name: required_str(row, &["attacker_name", "attacker"])?,
        damage_amount: u32::try_from(amount).map_err(|_| "damage amount out of range")?,
    })
}

fn parse_round_row(row: &Row) -> Result<RoundEndEvent, String> {
    Ok(RoundEndEvent {
        tick: tick_field(row)?,
        round_winner: optional_str(row, WINNER_FIELD_NAMES),
    })
}

fn parse_position_row(row: &Row) -> Result<PositionSample, String> {
    Ok(PositionSample {
        tick: tick_field(row)?,
        player_name: required_str(row, PLAYER_FIELD_NAMES)?,
        x: coordinate(row, &["x", "X"])?,
        y: coordinate(row, &["y", "Y"])?,
        z: coordinate(row, &["z", "Z"])?,
    })
}

/// First non-null value under any of `names`
fn field<'a>(row: &'a Row, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| row.get(*name).filter(|v| !v.is_null()))
}

fn required_str(row: &Row, names: &[&str]) -> Result<String, String> {
    optional_str(row, names).ok_or_else(|| format!("missing field '{}'", names[0]))
}

fn optional_str(row: &Row, names: &[&str]) -> Option<String> {
    field(row, names)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tick_field(row: &Row) -> Result<Tick, String> {
    let value = field(row, &["tick"]).ok_or("missing tick")?;
    parse_tick(value)
}

/// Ticks arrive as integers, floats (dataframe exports) or strings
pub fn parse_tick(value: &Value) -> Result<Tick, String> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f.fract() == 0.0 {
            return Ok(f as Tick);
        }
    }
    if let Some(s) = value.as_str() {
        return s
            .trim()
            .parse::<Tick>()
            .map_err(|e| format!("invalid tick '{}': {}", s, e));
    }
    Err(format!("invalid tick {}", value))
}

fn bool_field(row: &Row, names: &[&str]) -> bool {
    match field(row, names) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn coordinate(row: &Row, names: &[&str]) -> Result<f64, String> {
    field(row, names)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("missing coordinate '{}'", names[0]))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decoder_column_names() {
        let raw = json!({
            "player_death": [
                {"tick": 100, "attacker_name": "A", "user_name": "B",
                 "assister_name": null, "weapon": "ak47", "headshot": true}
            ],
            "player_hurt": [
                {"tick": 99, "attacker_name": "A", "dmg_health": 100}
            ],
            "round_end": [{"tick": 2000, "winner": "T"}],
            "ticks": [{"tick": 96, "name": "A", "X": 1.0, "Y": 2.0, "Z": 3.0}]
        });

        let events = parse_events(&raw).unwrap();
        let kills = events.kills.unwrap();

        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].victim_name, "B");
        assert!(kills[0].is_headshot);
        assert_eq!(kills[0].assister_name, None);
        assert_eq!(kills[0].weapon.as_deref(), Some("ak47"));
        assert_eq!(events.damages.unwrap()[0].damage_amount, 100);
        assert_eq!(events.rounds[0].round_winner.as_deref(), Some("T"));
        assert_eq!(events.positions[0].player_name, "A");
        assert_eq!(events.positions[0].z, 3.0);
    }

    #[test]
    fn test_missing_core_tables_are_none() {
        let events = parse_events(&json!({"rounds": []})).unwrap();
        assert!(events.kills.is_none());
        assert!(events.damages.is_none());
        assert!(events.rounds.is_empty());
    }

    #[test]
    fn test_table_must_be_array() {
        let result = parse_events(&json!({"kills": {"tick": 1}}));
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(parse_events(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let raw = json!({
            "kills": [
                {"tick": 100, "attacker_name": "A", "victim_name": "B"},
                {"tick": 120, "attacker_name": "A"},
                "garbage"
            ]
        });

        let kills = parse_events(&raw).unwrap().kills.unwrap();
        assert_eq!(kills.len(), 1);
        assert!(!kills[0].is_headshot);
    }

    #[test]
    fn test_kill_without_attacker_kept() {
        let raw = json!({
            "kills": [
                {"tick": 100, "attacker_name": "A", "victim_name": "B"},
                {"tick": 500, "attacker_name": null, "victim_name": "B", "weapon": "world"},
                {"tick": 600, "victim_name": "C"}
            ]
        });

        let kills = parse_events(&raw).unwrap().kills.unwrap();
        assert_eq!(kills.len(), 3);
        assert_eq!(kills[0].attacker_name.as_deref(), Some("A"));
        assert_eq!(kills[1].attacker_name, None);
        assert_eq!(kills[1].victim_name, "B");
        assert_eq!(kills[2].attacker_name, None);
    }

    #[test]
    fn test_all_rows_malformed_is_error() {
        let raw = json!({"damages": [{"tick": 1}, {"tick": 2}]});
        assert!(parse_events(&raw).is_err());
    }

    #[test]
    fn test_optional_tables_all_malformed_are_empty() {
        let raw = json!({
            "kills": [{"tick": 100, "attacker_name": "A", "victim_name": "B"}],
            "damages": [{"tick": 99, "attacker_name": "A", "damage_amount": 100}],
            "rounds": [{"winner": "T"}],
            "positions": [{"tick": 96, "player_name": "A", "pos_x": 1.0}]
        });

        let events = parse_events(&raw).unwrap();
        assert_eq!(events.kills.unwrap().len(), 1);
        assert!(events.rounds.is_empty());
        assert!(events.positions.is_empty());
    }

    #[test]
    fn test_parse_tick_variants() {
        assert_eq!(parse_tick(&json!(128)).unwrap(), 128);
        assert_eq!(parse_tick(&json!(128.0)).unwrap(), 128);
        assert_eq!(parse_tick(&json!("128")).unwrap(), 128);
        assert!(parse_tick(&json!(128.5)).is_err());
        assert!(parse_tick(&json!(true)).is_err());
    }
}
