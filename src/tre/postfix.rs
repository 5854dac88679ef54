//! Stack-based postfix (RPN) evaluator over integers and TRE field lookups.
//! Shared by `ComputeLen`, `LoopBegin`'s count expression, and `If`'s
//! predicate: one evaluator, three call sites.

use crate::error::{NitfError, Result};
use crate::tre::field_store::FieldStore;
use crate::tre::int_stack::IntStack;

/// Composes a fully-qualified tag from a base tag and the current loop
/// index stack, e.g. `V` at depth 2 with indices `[0, 1]` becomes
/// `V[0][1]`. The cursor uses the same function when writing to the
/// field store, so lookups and writes always agree on the scheme.
pub fn compose_tag(base: &str, loop_idx: &IntStack) -> String {
    let mut tag = String::from(base);
    for &idx in loop_idx.as_slice() {
        tag.push('[');
        tag.push_str(&idx.to_string());
        tag.push(']');
    }
    tag
}

fn resolve_tag(store: &FieldStore, loop_idx: &IntStack, raw_tag: &str) -> Result<i64> {
    // A tag already containing brackets is a dynamically generated,
    // fully-qualified reference (e.g. "ITEM[3].COUNT") and is looked up
    // verbatim; otherwise the current loop indices are substituted in.
    let key = if raw_tag.contains('[') {
        raw_tag.to_string()
    } else {
        compose_tag(raw_tag, loop_idx)
    };
    let field = store
        .get(&key)
        .ok_or_else(|| NitfError::schema_error(format!("unresolved tag '{key}' in expression")))?;
    field.as_i64()
}

fn is_operator(token: &str) -> bool {
    matches!(
        token,
        "+" | "-" | "*" | "/" | "%" | "=" | "!=" | "<" | "<=" | ">" | ">="
    )
}

fn apply(op: &str, lhs: i64, rhs: i64) -> Result<i64> {
    Ok(match op {
        "+" => lhs.wrapping_add(rhs),
        "-" => lhs.wrapping_sub(rhs),
        "*" => lhs.wrapping_mul(rhs),
        "/" => {
            if rhs == 0 {
                return Err(NitfError::schema_error("division by zero in postfix expression"));
            }
            lhs.wrapping_div(rhs)
        }
        "%" => {
            if rhs == 0 {
                return Err(NitfError::schema_error("modulo by zero in postfix expression"));
            }
            lhs.wrapping_rem(rhs)
        }
        "=" => (lhs == rhs) as i64,
        "!=" => (lhs != rhs) as i64,
        "<" => (lhs < rhs) as i64,
        "<=" => (lhs <= rhs) as i64,
        ">" => (lhs > rhs) as i64,
        ">=" => (lhs >= rhs) as i64,
        _ => unreachable!("apply called with non-operator token"),
    })
}

/// Evaluates a whitespace-separated postfix expression against the field
/// store and the current loop index stack.
pub fn evaluate(store: &FieldStore, loop_idx: &IntStack, expression: &str) -> Result<i64> {
    let mut stack: Vec<i64> = Vec::new();
    for token in expression.split_whitespace() {
        if is_operator(token) {
            let rhs = stack
                .pop()
                .ok_or_else(|| NitfError::schema_error("operator with missing operand"))?;
            let lhs = stack
                .pop()
                .ok_or_else(|| NitfError::schema_error("operator with missing operand"))?;
            stack.push(apply(token, lhs, rhs)?);
            continue;
        }
        if let Ok(literal) = token.parse::<i64>() {
            stack.push(literal);
            continue;
        }
        stack.push(resolve_tag(store, loop_idx, token)?);
    }
    match stack.len() {
        0 => Err(NitfError::schema_error("postfix expression produced no value")),
        _ => Ok(*stack.last().unwrap()),
    }
}
