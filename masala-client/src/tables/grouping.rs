//! Grouping tables by block for the floor view

use super::AggregatedTable;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Partition tables by block label.
///
/// Block keys iterate alphabetically. Within a block, tables are ordered by
/// display number with numeric-aware comparison ("2" before "10").
pub fn group_by_block<'a, I>(tables: I) -> BTreeMap<String, Vec<AggregatedTable>>
where
    I: IntoIterator<Item = &'a AggregatedTable>,
{
    let mut groups: BTreeMap<String, Vec<AggregatedTable>> = BTreeMap::new();
    for table in tables {
        groups
            .entry(table.block.clone())
            .or_default()
            .push(table.clone());
    }
    for tables in groups.values_mut() {
        tables.sort_by(|a, b| natural_cmp(&a.table_number, &b.table_number));
    }
    groups
}

/// Compare two labels treating runs of ASCII digits as numbers.
///
/// Text runs compare case-insensitively. Labels equal under those rules
/// fall back to plain byte order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => cmp_text(x, y),
            // numbers sort before text ("7" < "A1")
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn cmp_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

fn cmp_text(x: &str, y: &str) -> Ordering {
    x.chars()
        .flat_map(char::to_lowercase)
        .cmp(y.chars().flat_map(char::to_lowercase))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}
