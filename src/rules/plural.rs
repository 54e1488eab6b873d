//! Ternary pluralization: `n === 1 ? "1 item" : "N items"`.

use super::candidate::{Arg, BinaryOp, Branch, Match, Operand, Test};
use crate::core::key::KeyKind;
use crate::icu::PluralExpr;
use crate::utils::contains_alphabetic;

/// Name of the argument carrying the compared value.
pub const COUNT_ARG: &str = "count";

pub fn match_plural(test: &Test, consequent: &Branch, alternate: &Branch) -> Option<Match> {
    let Test::Binary { op, left } = test else {
        return None;
    };
    if !matches!(op, BinaryOp::Eq | BinaryOp::StrictEq) {
        return None;
    }
    let count_expr = match left {
        Operand::Ident(src) | Operand::Member(src) | Operand::Number(src) => src,
        Operand::Other(_) => return None,
    };
    let (Branch::Str(one), Branch::Str(other)) = (consequent, alternate) else {
        return None;
    };
    let (one, other) = (one.trim(), other.trim());
    if !contains_alphabetic(one) && !contains_alphabetic(other) {
        return None;
    }

    Some(Match {
        kind: KeyKind::Plural,
        template: PluralExpr::one_other(COUNT_ARG, one, other).to_string(),
        args: vec![Arg {
            name: COUNT_ARG.to_string(),
            expr: count_expr.clone(),
        }],
    })
}
