//! Operation scripts for the driver

use anyhow::{anyhow, bail, Context, Result};
use std::fmt;
use std::str::FromStr;

/// One cache operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `put:KEY=VALUE`
    Put { key: String, value: i64 },
    /// `get:KEY`
    Get { key: String },
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected put:KEY=VALUE or get:KEY, got '{}'", s))?;

        match verb.to_ascii_lowercase().as_str() {
            "put" => {
                let (key, value) = rest
                    .split_once('=')
                    .ok_or_else(|| anyhow!("put needs KEY=VALUE, got '{}'", rest))?;
                if key.is_empty() {
                    bail!("put with empty key");
                }
                let value = value
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid value for key '{}'", key))?;
                Ok(Op::Put {
                    key: key.to_string(),
                    value,
                })
            }
            "get" => {
                if rest.is_empty() {
                    bail!("get with empty key");
                }
                Ok(Op::Get {
                    key: rest.to_string(),
                })
            }
            other => bail!("unknown operation '{}'", other),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Put { key, value } => write!(f, "put {} {}", key, value),
            Op::Get { key } => write!(f, "get {}", key),
        }
    }
}

/// Parse every argument, reporting the position of the first bad one
pub fn parse_ops<S: AsRef<str>>(args: &[S]) -> Result<Vec<Op>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            arg.as_ref()
                .parse::<Op>()
                .with_context(|| format!("operation #{}", i + 1))
        })
        .collect()
}

/// Default demonstration: four puts, a promotion sequence that saturates
/// `c` and `d`, then one put that forces a batch eviction.
pub fn canonical_trace() -> Vec<Op> {
    let mut ops: Vec<Op> = [("a", 1), ("b", 2), ("c", 3), ("d", 4)]
        .into_iter()
        .map(|(key, value)| Op::Put {
            key: key.to_string(),
            value,
        })
        .collect();

    ops.extend(
        ["c", "d", "c", "c", "c", "d", "d", "b", "b", "a", "a", "d", "c"]
            .into_iter()
            .map(|key| Op::Get {
                key: key.to_string(),
            }),
    );

    ops.push(Op::Put {
        key: "e".to_string(),
        value: 5,
    });
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put() {
        let op: Op = "put:a=42".parse().unwrap();
        assert_eq!(
            op,
            Op::Put {
                key: "a".to_string(),
                value: 42
            }
        );

        let op: Op = "PUT:neg=-7".parse().unwrap();
        assert_eq!(
            op,
            Op::Put {
                key: "neg".to_string(),
                value: -7
            }
        );
    }

    #[test]
    fn test_parse_get() {
        let op: Op = "get:some key".parse().unwrap();
        assert_eq!(
            op,
            Op::Get {
                key: "some key".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("a=1".parse::<Op>().is_err());
        assert!("put:a".parse::<Op>().is_err());
        assert!("put:=1".parse::<Op>().is_err());
        assert!("put:a=x".parse::<Op>().is_err());
        assert!("get:".parse::<Op>().is_err());
        assert!("del:a".parse::<Op>().is_err());
    }

    #[test]
    fn test_parse_ops_reports_position() {
        let err = parse_ops(&["get:a", "oops"]).unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_canonical_trace_shape() {
        let ops = canonical_trace();

        assert_eq!(ops.len(), 18);
        assert_eq!(ops[4].to_string(), "get c");
        assert_eq!(ops.last().map(|op| op.to_string()).as_deref(), Some("put e 5"));
    }
}
