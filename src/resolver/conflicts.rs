//! Pairwise conflict detection and soft-cap checks.

use super::types::{Conflict, ConflictKind, SoftCapOverflow};
use crate::grammar::{Grammar, axis_soft_cap};
use crate::selection::Selection;
use std::collections::HashSet;

/// Every conflicting pair in `selected`, each unordered pair at most once.
///
/// Incompatibility rules are checked first, then cautionary composition
/// entries; when both report the same pair the incompatibility is kept.
pub fn find_conflicts(grammar: &Grammar, selected: &Selection) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut seen = HashSet::new();

    let mut report = |conflict: Conflict| {
        if seen.insert(conflict.key()) {
            conflicts.push(conflict);
        }
    };

    for (axis_a, tokens_a) in selected.iter() {
        for token_a in tokens_a {
            for rule in grammar.incompatibilities(axis_a, token_a) {
                let Some((axis_b, token_b)) = resolve_partner(selected, axis_a, rule) else {
                    continue;
                };
                if !selected.contains(axis_b, token_b) {
                    continue;
                }
                report(Conflict {
                    token_a: token_a.clone(),
                    axis_a: axis_a.to_string(),
                    token_b: token_b.to_string(),
                    axis_b: axis_b.to_string(),
                    kind: ConflictKind::Incompatibility,
                });
            }
        }
    }

    for (axis_a, tokens_a) in selected.iter() {
        for token_a in tokens_a {
            let Some(entry) = grammar.composition(axis_a, token_a) else {
                continue;
            };
            for (axis_b, composition) in entry {
                for (token_b, warning) in &composition.cautionary {
                    if !selected.contains(axis_b, token_b) {
                        continue;
                    }
                    report(Conflict {
                        token_a: token_a.clone(),
                        axis_a: axis_a.to_string(),
                        token_b: token_b.clone(),
                        axis_b: axis_b.clone(),
                        kind: ConflictKind::Cautionary {
                            warning: warning.clone(),
                        },
                    });
                }
            }
        }
    }

    conflicts
}

/// Split a rule into `(axis, token)`. A bare token is looked up on the
/// other selected axes; the first axis holding it wins.
fn resolve_partner<'a>(
    selected: &'a Selection,
    own_axis: &str,
    rule: &'a str,
) -> Option<(&'a str, &'a str)> {
    if let Some((axis, token)) = rule.split_once(':') {
        return Some((axis, token));
    }
    selected
        .iter()
        .find(|(axis, tokens)| *axis != own_axis && tokens.iter().any(|t| t == rule))
        .map(|(axis, _)| (axis, rule))
}

/// Axes holding more tokens than `hierarchy.axis_soft_caps` allows, in
/// selection order.
pub fn soft_cap_overflows(grammar: &Grammar, selected: &Selection) -> Vec<SoftCapOverflow> {
    selected
        .iter()
        .filter_map(|(axis, tokens)| {
            let cap = axis_soft_cap(grammar, axis)?;
            (tokens.len() > cap as usize).then(|| SoftCapOverflow {
                axis: axis.to_string(),
                cap,
                selected: tokens.len(),
            })
        })
        .collect()
}

