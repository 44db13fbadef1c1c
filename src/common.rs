use std::fmt;

use crate::error::CommandError;

/// A command parsed from one request datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Set a key-value pair.
    Put {
        /// The key to set.
        key: String,
        /// The value, which may itself contain whitespace.
        value: String,
    },
    /// Get the value for a key.
    Get {
        /// The key to look up.
        key: String,
    },
    /// Remove a key.
    Delete {
        /// The key to remove.
        key: String,
    },
}

impl Request {
    /// Parses a request line.
    ///
    /// The line is split on single spaces into at most three fields, so a
    /// PUT value keeps everything after the key verbatim. Other whitespace
    /// (tabs, newlines) is not a separator. The verb is matched
    /// case-insensitively; keys and values are taken literally.
    pub fn parse(line: &str) -> Result<Request, CommandError> {
        let fields: Vec<&str> = line.splitn(3, ' ').collect();
        let verb = fields[0];

        if verb.eq_ignore_ascii_case("PUT") {
            match fields[..] {
                [_, key, value] => Ok(Request::Put {
                    key: key.to_owned(),
                    value: value.to_owned(),
                }),
                _ => Err(CommandError::InvalidPut),
            }
        } else if verb.eq_ignore_ascii_case("GET") {
            match fields[..] {
                [_, key] => Ok(Request::Get {
                    key: key.to_owned(),
                }),
                _ => Err(CommandError::InvalidGet),
            }
        } else if verb.eq_ignore_ascii_case("DELETE") {
            match fields[..] {
                [_, key] => Ok(Request::Delete {
                    key: key.to_owned(),
                }),
                _ => Err(CommandError::InvalidDelete),
            }
        } else {
            Err(CommandError::UnknownCommand)
        }
    }
}

/// Response sent back to the origin of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A PUT or DELETE was applied.
    Ok,
    /// The value found by a GET.
    Value(String),
    /// The command failed.
    Error(CommandError),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str("OK"),
            Response::Value(value) => f.write_str(value),
            Response::Error(e) => write!(f, "ERROR: {e}"),
        }
    }
}

impl From<CommandError> for Response {
    fn from(e: CommandError) -> Self {
        Response::Error(e)
    }
}
