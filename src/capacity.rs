// Capacity strings ("10Gi", "42949670k", "512") and the tail-stable capacity sort.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Record field read by `sort_capacity` when none is given.
pub const DEFAULT_CAPACITY_FIELD: &str = "storageCapacity";

/// Size in bytes parsed from a capacity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Capacity(u128);

impl Capacity {
    pub const fn from_bytes(bytes: u128) -> Self {
        Capacity(bytes)
    }

    pub const fn bytes(self) -> u128 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exact match on "asc" / "desc"; anything else is not a direction.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Multiplier for a unit suffix. Case-sensitive; empty suffix is bytes.
fn unit_factor(unit: &str) -> Option<u128> {
    let factor = match unit {
        "" => 1,
        "k" => 1000,
        "M" => 1000u128.pow(2),
        "G" => 1000u128.pow(3),
        "T" => 1000u128.pow(4),
        "P" => 1000u128.pow(5),
        "E" => 1000u128.pow(6),
        "Ki" => 1 << 10,
        "Mi" => 1 << 20,
        "Gi" => 1 << 30,
        "Ti" => 1 << 40,
        "Pi" => 1 << 50,
        "Ei" => 1 << 60,
        _ => return None,
    };
    Some(factor)
}

/// Parses `<number><unit>` into bytes. Returns None for anything it cannot read
/// (empty, signed, whitespace, unknown unit, overflow); fractional bytes are truncated.
pub fn parse_capacity(s: &str) -> Option<Capacity> {
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let factor = unit_factor(unit)?;

    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() || number.ends_with('.') || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut bytes = whole.parse::<u128>().ok()?.checked_mul(factor)?;
    if !frac.is_empty() {
        let scale = 10u128.checked_pow(u32::try_from(frac.len()).ok()?)?;
        let frac_bytes = frac.parse::<u128>().ok()?.checked_mul(factor)? / scale;
        bytes = bytes.checked_add(frac_bytes)?;
    }
    Some(Capacity(bytes))
}

/// Orders two capacity strings by size. Unparseable (or missing) values sort after
/// every parseable one and compare Equal to each other, so stable sorts keep their order.
pub fn compare_capacity(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_parsed(a.and_then(parse_capacity), b.and_then(parse_capacity))
}

fn compare_parsed(a: Option<Capacity>, b: Option<Capacity>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `items` by the capacity `capacity_of` extracts. Items without a
/// capacity are moved to the tail in their input order, for both directions.
pub fn sort_by_capacity<T, F>(items: &[T], capacity_of: F, direction: SortDirection) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<Capacity>,
{
    let (mut head, tail): (Vec<_>, Vec<_>) = items
        .iter()
        .map(|item| (capacity_of(item), item))
        .partition(|(capacity, _)| capacity.is_some());

    head.sort_by(|(a, _), (b, _)| {
        let ord = compare_parsed(*a, *b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    head.into_iter()
        .chain(tail)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Capacity held by `record[field]`. Strings are parsed; non-negative numbers are bytes,
/// with fractional bytes truncated (`1.5e9` is 1500000000). Null records, non-objects,
/// missing fields and negative numbers have none.
pub fn record_capacity(record: &Value, field: &str) -> Option<Capacity> {
    match record.as_object()?.get(field)? {
        Value::String(s) => parse_capacity(s),
        Value::Number(n) => match n.as_u64() {
            Some(b) => Some(Capacity(u128::from(b))),
            None => n
                .as_f64()
                .filter(|b| b.is_finite() && *b >= 0.0 && *b < u128::MAX as f64)
                .map(|b| Capacity(b.trunc() as u128)),
        },
        _ => None,
    }
}

/// Sorts JSON records by a capacity field, returning a new vector.
///
/// `field` defaults to [`DEFAULT_CAPACITY_FIELD`] and `direction` to `"asc"`.
/// A direction other than `"asc"` / `"desc"` returns the records in their input order.
pub fn sort_capacity(records: &[Value], field: Option<&str>, direction: Option<&str>) -> Vec<Value> {
    let field = field.unwrap_or(DEFAULT_CAPACITY_FIELD);
    match SortDirection::parse(direction.unwrap_or("asc")) {
        Some(direction) => {
            sort_by_capacity(records, |record| record_capacity(record, field), direction)
        }
        None => records.to_vec(),
    }
}
