// Copyright (c) 2025 - Cowboy AI, Inc.
//! Occurrence group identifiers
//!
//! A group has no remote primary key, so its identifier is the query
//! itself: `"<maintenance id>:<from>:<to>"`. Equal queries always encode to
//! the same identifier and `decode(encode(q)) == q`, which lets a group be
//! re-attached or imported from its identifier alone.

use std::fmt;
use std::str::FromStr;

use super::{OccurrenceError, OccurrenceResult};
use crate::domain::OccurrenceQuery;

/// Field separator; `-` would clash with negative timestamps
pub const SEPARATOR: char = ':';

/// Encode a query as a group identifier
pub fn encode(query: &OccurrenceQuery) -> String {
    query.to_string()
}

/// Decode a group identifier back into its query
pub fn decode(identifier: &str) -> OccurrenceResult<OccurrenceQuery> {
    let fields: Vec<&str> = identifier.split(SEPARATOR).collect();
    let &[maintenance_id, from, to] = fields.as_slice() else {
        return Err(malformed(
            identifier,
            format!(
                "expected 3 fields separated by '{}', found {}",
                SEPARATOR,
                fields.len()
            ),
        ));
    };

    let parse = |name: &str, raw: &str| {
        raw.parse::<i64>().map_err(|e| {
            malformed(identifier, format!("{} {:?} is not an integer: {}", name, raw, e))
        })
    };

    let query = OccurrenceQuery::new(
        parse("maintenance id", maintenance_id)?,
        parse("from", from)?,
        parse("to", to)?,
    );

    // One handle per group: `+42`, `042` and `-0` parse but re-encode differently.
    let canonical = encode(&query);
    if canonical != identifier {
        return Err(malformed(
            identifier,
            format!("not in canonical form, expected {:?}", canonical),
        ));
    }
    Ok(query)
}

fn malformed(identifier: &str, reason: String) -> OccurrenceError {
    OccurrenceError::MalformedIdentifier {
        identifier: identifier.to_string(),
        reason,
    }
}

impl fmt::Display for OccurrenceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.maintenance_id,
            self.from,
            self.to,
            sep = SEPARATOR
        )
    }
}

impl FromStr for OccurrenceQuery {
    type Err = OccurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
