use crate::literal::{self, LiteralError};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, error, warn};

#[derive(Debug, thiserror::Error)]
pub enum EmbeddedError {
    #[error("no `let {variable} = [...];` assignment found in page")]
    NotFound { variable: String },

    #[error("`{variable}` holds no records")]
    Empty { variable: String },

    #[error("failed to parse `{variable}`, {source}")]
    Malformed {
        variable: String,
        #[source]
        source: LiteralError,
    },
}

/// Regex matching `let <variable> = [ ... ];`, capturing the array literal.
///
/// The match is lazy, so the array ends at the first `];` after the assignment.
fn assignment(variable: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)let\s+{}\s*=\s*(\[.*?\])\s*;",
        regex::escape(variable)
    ))
    .expect("escaped variable name always forms a valid regex")
}

/// Pull the array literal assigned to `variable` out of `page` and parse it.
///
/// Only the captured literal is parsed; the rest of the script is never looked at.
/// An empty array counts as no data, same as a missing assignment.
pub fn extract(page: &str, variable: &str) -> Result<Vec<Value>, EmbeddedError> {
    let captures = assignment(variable)
        .captures(page)
        .ok_or_else(|| EmbeddedError::NotFound {
            variable: variable.to_string(),
        })?;
    let literal = &captures[1];
    debug!("found `{variable}`, {} bytes", literal.len());

    let records = match literal::parse(literal) {
        Ok(Value::Array(records)) => records,
        Ok(other) => {
            return Err(EmbeddedError::Malformed {
                variable: variable.to_string(),
                source: LiteralError {
                    message: format!("expected an array, found {other}"),
                    position: 0,
                },
            })
        }
        Err(source) => {
            return Err(EmbeddedError::Malformed {
                variable: variable.to_string(),
                source,
            })
        }
    };
    if records.is_empty() {
        return Err(EmbeddedError::Empty {
            variable: variable.to_string(),
        });
    }
    Ok(records)
}

/// [`extract`], collapsing every failure to "no data" after logging it.
pub fn extract_records(page: &str, variable: &str) -> Option<Vec<Value>> {
    match extract(page, variable) {
        Ok(records) => Some(records),
        Err(err @ (EmbeddedError::NotFound { .. } | EmbeddedError::Empty { .. })) => {
            warn!("{err}");
            None
        }
        Err(err @ EmbeddedError::Malformed { .. }) => {
            error!("Parse error: {err}");
            None
        }
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
