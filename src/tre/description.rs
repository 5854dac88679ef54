//! Read-only declarative TRE schema.
//!
//! A `Description` is supplied as static data by a caller-owned registry;
//! this crate never constructs one from disk, only consumes one it has
//! been handed.

use crate::error::{NitfError, Result};

/// Wire representation of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Binary,
    AsciiInteger,
    AsciiString,
    AsciiFloat,
    RawBytes,
}

/// A field's length, as written in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthExpr {
    Literal(usize),
    /// Reads/writes all bytes remaining in the current budget.
    ConsumeRemainder,
    Expr(String),
}

/// A loop's iteration count, as written in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountExpr {
    Literal(usize),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionEntry {
    Field {
        tag: String,
        length: LengthExpr,
        kind: FieldKind,
        default: Option<Vec<u8>>,
    },
    LoopBegin {
        count: CountExpr,
    },
    LoopEnd,
    If {
        predicate: String,
    },
    Else,
    EndIf,
    ComputeLen {
        expr: String,
    },
    End,
}

impl DescriptionEntry {
    pub fn field(tag: &str, length: LengthExpr, kind: FieldKind) -> Self {
        DescriptionEntry::Field {
            tag: tag.to_string(),
            length,
            kind,
            default: None,
        }
    }

    pub fn field_with_default(tag: &str, length: LengthExpr, kind: FieldKind, default: Vec<u8>) -> Self {
        DescriptionEntry::Field {
            tag: tag.to_string(),
            length,
            kind,
            default: Some(default),
        }
    }

    pub fn loop_begin(count: CountExpr) -> Self {
        DescriptionEntry::LoopBegin { count }
    }

    pub fn if_(predicate: &str) -> Self {
        DescriptionEntry::If {
            predicate: predicate.to_string(),
        }
    }

    pub fn compute_len(expr: &str) -> Self {
        DescriptionEntry::ComputeLen {
            expr: expr.to_string(),
        }
    }
}

/// A schema for one TRE tag: an ordered list of fields, loops, and
/// conditionals, terminated by `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub tag: String,
    pub entries: Vec<DescriptionEntry>,
}

impl Description {
    pub fn new(tag: impl Into<String>, entries: Vec<DescriptionEntry>) -> Result<Self> {
        let desc = Self {
            tag: tag.into(),
            entries,
        };
        desc.validate()?;
        Ok(desc)
    }

    /// Checks that every `LoopBegin`/`If` has a matching `LoopEnd`/`EndIf`
    /// at the same nesting depth, and that the table ends with `End`.
    pub fn validate(&self) -> Result<()> {
        #[derive(Clone, Copy)]
        enum Block {
            Loop,
            If,
        }
        let mut stack: Vec<Block> = Vec::new();
        let mut seen_end = false;
        for entry in &self.entries {
            if seen_end {
                return Err(NitfError::schema_error(
                    "entries present after End sentinel",
                ));
            }
            match entry {
                DescriptionEntry::LoopBegin { .. } => stack.push(Block::Loop),
                DescriptionEntry::LoopEnd => match stack.pop() {
                    Some(Block::Loop) => {}
                    _ => return Err(NitfError::schema_error("unmatched LoopEnd")),
                },
                DescriptionEntry::If { .. } => stack.push(Block::If),
                DescriptionEntry::Else => match stack.last() {
                    Some(Block::If) => {}
                    _ => return Err(NitfError::schema_error("unmatched Else")),
                },
                DescriptionEntry::EndIf => match stack.pop() {
                    Some(Block::If) => {}
                    _ => return Err(NitfError::schema_error("unmatched EndIf")),
                },
                DescriptionEntry::End => seen_end = true,
                DescriptionEntry::Field { .. } => {}
                DescriptionEntry::ComputeLen { .. } => {}
            }
        }
        if !stack.is_empty() {
            return Err(NitfError::schema_error(
                "description has unclosed Loop/If blocks",
            ));
        }
        if !seen_end {
            return Err(NitfError::schema_error("description missing End sentinel"));
        }
        self.validate_compute_len_precedes_field()?;
        self.validate_consume_remainder()
    }

    /// `ComputeLen`'s effective length only ever applies to the field
    /// immediately following it; anything else after a `ComputeLen` is a
    /// schema error.
    fn validate_compute_len_precedes_field(&self) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            if matches!(entry, DescriptionEntry::ComputeLen { .. }) {
                match self.entries.get(i + 1) {
                    Some(DescriptionEntry::Field { .. }) => {}
                    _ => {
                        return Err(NitfError::schema_error(
                            "ComputeLen must be immediately followed by a Field entry",
                        ))
                    }
                }
            }
        }
        Ok(())
    }

    /// `ConsumeRemainder` only makes sense as the last field a reader will
    /// ever visit; any field after it would have nothing left to read.
    /// This holds even inside a loop: a `ConsumeRemainder` field is only
    /// legal when it is the last `Field` entry in the whole table.
    fn validate_consume_remainder(&self) -> Result<()> {
        let mut seen = false;
        for entry in &self.entries {
            if let DescriptionEntry::Field { length, .. } = entry {
                if seen {
                    return Err(NitfError::schema_error(
                        "ConsumeRemainder must be the last field in the description",
                    ));
                }
                if matches!(length, LengthExpr::ConsumeRemainder) {
                    seen = true;
                }
            }
        }
        Ok(())
    }
}
