// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator filter — removes whole drawing instructions matching a criterion.
//
// Filtering is a pure, order-preserving pass: the result is always a
// subsequence of the input. Removal is deliberately coarse — a matching
// show-text instruction is dropped entirely, never partially redacted, so
// callers must choose needles specific enough to avoid over-deletion.

use lopdf::Object;
use lopdf::content::Operation;

use super::content::{OP_INVOKE_XOBJECT, OP_SHOW_TEXT, decode_text_operand};

/// What to remove from an instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalCriterion {
    /// Drop a `Tj` instruction when its decoded text contains any needle.
    Text { needles: Vec<String> },
    /// Drop a `Do` instruction when its XObject name is an exact match
    /// (not a substring) against the exclusion set.
    XObject { names: Vec<String> },
}

impl RemovalCriterion {
    /// Text-removal criterion over a set of substring needles.
    pub fn text<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Text {
            needles: needles.into_iter().map(Into::into).collect(),
        }
    }

    /// XObject-removal criterion; names may carry a leading `/` or not.
    pub fn xobject<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::XObject {
            names: names
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    name.strip_prefix('/').map(str::to_owned).unwrap_or(name)
                })
                .collect(),
        }
    }

    /// An empty criterion matches nothing; edits with it are no-ops.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text { needles } => needles.is_empty(),
            Self::XObject { names } => names.is_empty(),
        }
    }

    /// Whether one instruction should be removed.
    pub fn matches(&self, operation: &Operation) -> bool {
        match self {
            Self::Text { needles } => {
                if operation.operator != OP_SHOW_TEXT {
                    return false;
                }
                let Some(text) = operation.operands.first().and_then(decode_text_operand) else {
                    return false;
                };
                needles.iter().any(|needle| text.contains(needle))
            }
            Self::XObject { names } => {
                if operation.operator != OP_INVOKE_XOBJECT {
                    return false;
                }
                let Some(Object::Name(name)) = operation.operands.first() else {
                    return false;
                };
                names
                    .iter()
                    .any(|candidate| candidate.as_bytes() == name.as_slice())
            }
        }
    }
}

/// Remove matching instructions, preserving the order of the survivors.
///
/// O(n) in instruction count; the input slice is untouched.
pub fn filter_operations(
    operations: &[Operation],
    criterion: &RemovalCriterion,
) -> Vec<Operation> {
    operations
        .iter()
        .filter(|operation| !criterion.matches(operation))
        .cloned()
        .collect()
}
