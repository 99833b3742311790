//! Evaluation of bracket index expressions.
//!
//! An expression is a chain of operands joined by `+` or `-`, such as
//! `2`, `a.b`, `a.b+c` or `a.b+c-1`. Each operand is an integer literal or a
//! path resolved against the map holding the value being indexed, so paths
//! name its siblings. Paths must resolve to integers.

use super::{MapError, NestedMap, resolve};
use crate::path::Path;

const UNSUPPORTED_OPERATORS: &[char] = &['*', '/', '%', '(', ')', '<', '>', '=', '!', '&', '|', '^', ','];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

/// Splits an expression into signed operand strings at bracket depth zero.
fn split_terms(expr: &str) -> Vec<(Sign, &str)> {
    let mut terms = Vec::new();
    let mut sign = Sign::Plus;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '+' | '-' if depth == 0 => {
                terms.push((sign, &expr[start..i]));
                sign = if c == '+' { Sign::Plus } else { Sign::Minus };
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push((sign, &expr[start..]));
    terms
}

fn invalid(expr: &str, reason: impl Into<String>) -> MapError {
    MapError::IndexExpression {
        expr: expr.to_string(),
        reason: reason.into(),
    }
}

fn operand(expr: &str, operand: &str, context: &NestedMap) -> Result<i64, MapError> {
    if let Ok(literal) = operand.parse::<i64>() {
        return Ok(literal);
    }

    let path = Path::parse(operand).map_err(|e| invalid(expr, e.to_string()))?;
    let value = resolve::read(context, &path)
        .map_err(|e| invalid(expr, format!("cannot resolve '{operand}': {e}")))?;
    value.as_int().ok_or_else(|| {
        invalid(
            expr,
            format!("'{operand}' is a {} value, not an integer", value.type_name()),
        )
    })
}

/// Evaluates an index expression against `context`.
pub(crate) fn evaluate(expr: &str, context: &NestedMap) -> Result<i64, MapError> {
    if let Some(op) = expr.chars().find(|c| UNSUPPORTED_OPERATORS.contains(c)) {
        return Err(invalid(expr, format!("unsupported operator '{op}'")));
    }

    let mut total: i64 = 0;
    for (position, (sign, text)) in split_terms(expr).into_iter().enumerate() {
        let text = text.trim();
        if text.is_empty() {
            // A leading sign applies to the next operand: `-1`, `-a.b+2`
            if position == 0 {
                continue;
            }
            return Err(invalid(expr, "missing operand"));
        }

        let value = operand(expr, text, context)?;
        total = match sign {
            Sign::Plus => total.checked_add(value),
            Sign::Minus => total.checked_sub(value),
        }
        .ok_or_else(|| invalid(expr, "integer overflow"))?;
    }

    Ok(total)
}
