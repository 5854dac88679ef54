//! Stateful walk over a `Description`. The cursor tracks loop and
//! conditional nesting with three explicit `IntStack`s rather than by
//! recursing over the table.

use crate::error::{NitfError, Result};
use crate::tre::description::{CountExpr, Description, DescriptionEntry, FieldKind, LengthExpr};
use crate::tre::field_store::FieldStore;
use crate::tre::int_stack::IntStack;
use crate::tre::postfix::{compose_tag, evaluate};

/// Positioned over one `Field` entry (or past `End`). `tag`/`length`/`kind`
/// describe the field the caller should now read or write; `consume_remainder`
/// tells the codec to use whatever budget is left instead of a fixed length.
#[derive(Debug, Clone)]
pub struct TreCursor<'d> {
    description: &'d Description,
    index: usize,
    done: bool,
    loop_count: IntStack,
    loop_idx: IntStack,
    loop_return: IntStack,
    pending_length_override: Option<i64>,
    tag: String,
    length: usize,
    kind: FieldKind,
    default: Option<Vec<u8>>,
    consume_remainder: bool,
}

impl<'d> TreCursor<'d> {
    /// Initializes the cursor and positions it on the first field (or marks
    /// it done if the description is empty of fields).
    pub fn begin(description: &'d Description, store: &FieldStore) -> Result<Self> {
        let mut cursor = Self {
            description,
            index: 0,
            done: false,
            loop_count: IntStack::new(),
            loop_idx: IntStack::new(),
            loop_return: IntStack::new(),
            pending_length_override: None,
            tag: String::new(),
            length: 0,
            kind: FieldKind::RawBytes,
            default: None,
            consume_remainder: false,
        };
        cursor.land_on_field(store)?;
        Ok(cursor)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn default(&self) -> Option<&[u8]> {
        self.default.as_deref()
    }

    pub fn consume_remainder(&self) -> bool {
        self.consume_remainder
    }

    /// Advances past the field the cursor currently exposes to the next one.
    /// Must not be called once `is_done()` is true.
    pub fn iterate(&mut self, store: &FieldStore) -> Result<()> {
        if self.done {
            return Err(NitfError::schema_error("iterate called on a done cursor"));
        }
        self.index += 1;
        self.land_on_field(store)
    }

    /// Releases the loop-tracking stacks. Cheap here since they're plain
    /// `Vec`s, but kept as an explicit operation to mirror
    /// `nitf_TRECursor_cleanup` and to make end-of-life a visible point in
    /// caller code.
    pub fn cleanup(&mut self) {
        self.loop_count.clear();
        self.loop_idx.clear();
        self.loop_return.clear();
    }

    /// Advances `index` through any run of control entries (`LoopBegin`,
    /// `LoopEnd`, `If`, `Else`, `EndIf`, `ComputeLen`), evaluating each
    /// against `store`, until landing on a `Field` or `End`.
    fn land_on_field(&mut self, store: &FieldStore) -> Result<()> {
        loop {
            let entry = match self.description.entries.get(self.index) {
                Some(entry) => entry,
                None => {
                    return Err(NitfError::schema_error(
                        "cursor index ran past the description without an End sentinel",
                    ))
                }
            };
            match entry {
                DescriptionEntry::Field { tag, length, kind, default } => {
                    let override_len = self.pending_length_override.take();
                    self.consume_remainder = override_len.is_none()
                        && matches!(length, LengthExpr::ConsumeRemainder);
                    let effective = match override_len {
                        Some(n) => n.max(0) as usize,
                        None => match length {
                            LengthExpr::Literal(n) => *n,
                            LengthExpr::ConsumeRemainder => 0,
                            LengthExpr::Expr(expr) => {
                                evaluate(store, &self.loop_idx, expr)?.max(0) as usize
                            }
                        },
                    };
                    self.tag = compose_tag(tag, &self.loop_idx);
                    self.length = effective;
                    self.kind = *kind;
                    self.default = default.clone();
                    return Ok(());
                }
                DescriptionEntry::LoopBegin { count } => {
                    let n = match count {
                        CountExpr::Literal(n) => *n as i64,
                        CountExpr::Expr(expr) => evaluate(store, &self.loop_idx, expr)?,
                    };
                    if n <= 0 {
                        self.skip_loop_body()?;
                        self.index += 1;
                        continue;
                    }
                    self.loop_count.push(n)?;
                    self.loop_idx.push(0)?;
                    self.loop_return.push((self.index + 1) as i64)?;
                    self.index += 1;
                }
                DescriptionEntry::LoopEnd => {
                    let idx = self.loop_idx.pop()?;
                    let count = self.loop_count.pop()?;
                    let return_to = self.loop_return.pop()?;
                    let next = idx + 1;
                    if next < count {
                        self.loop_idx.push(next)?;
                        self.loop_count.push(count)?;
                        self.loop_return.push(return_to)?;
                        self.index = return_to as usize;
                    } else {
                        self.index += 1;
                    }
                }
                DescriptionEntry::If { predicate } => {
                    let truthy = evaluate(store, &self.loop_idx, predicate)? != 0;
                    if truthy {
                        self.index += 1;
                    } else {
                        self.skip_if_body()?;
                    }
                }
                DescriptionEntry::Else => {
                    self.skip_else_body()?;
                }
                DescriptionEntry::EndIf => {
                    self.index += 1;
                }
                DescriptionEntry::ComputeLen { expr } => {
                    let value = evaluate(store, &self.loop_idx, expr)?;
                    self.pending_length_override = Some(value);
                    self.index += 1;
                }
                DescriptionEntry::End => {
                    self.done = true;
                    self.tag.clear();
                    self.length = 0;
                    self.consume_remainder = false;
                    return Ok(());
                }
            }
        }
    }

    /// `self.index` is at a `LoopBegin` whose count evaluated to 0; moves
    /// `self.index` to the matching `LoopEnd`.
    fn skip_loop_body(&mut self) -> Result<()> {
        self.index += 1;
        let mut depth = 0i32;
        loop {
            match self.entry_at(self.index)? {
                DescriptionEntry::LoopBegin { .. } => depth += 1,
                DescriptionEntry::LoopEnd => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.index += 1;
        }
    }

    /// `self.index` is at an `If` whose predicate was false; moves
    /// `self.index` to the matching `Else`'s body (so it executes) or, if
    /// there is none, to the matching `EndIf`.
    fn skip_if_body(&mut self) -> Result<()> {
        self.index += 1;
        let mut depth = 0i32;
        loop {
            match self.entry_at(self.index)? {
                DescriptionEntry::If { .. } => depth += 1,
                DescriptionEntry::EndIf => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                DescriptionEntry::Else => {
                    if depth == 0 {
                        self.index += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.index += 1;
        }
    }

    /// `self.index` is at an `Else` reached by fall-through (the `If`
    /// branch was taken); moves `self.index` to the matching `EndIf`.
    fn skip_else_body(&mut self) -> Result<()> {
        self.index += 1;
        let mut depth = 0i32;
        loop {
            match self.entry_at(self.index)? {
                DescriptionEntry::If { .. } => depth += 1,
                DescriptionEntry::EndIf => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.index += 1;
        }
    }

    fn entry_at(&self, index: usize) -> Result<&DescriptionEntry> {
        self.description
            .entries
            .get(index)
            .ok_or_else(|| NitfError::schema_error("description ended inside an open block"))
    }
}
