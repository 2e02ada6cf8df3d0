//! Chip traffic lights.
//!
//! `cross_axis_composition` is authored in one direction only (for example
//! under `channel.shellscript.task`), but a pairing has to light up both
//! chips. Every entry point goes through [`scan`], which visits each
//! relationship between one chip and the active selection and stops as soon
//! as the visitor breaks.

use super::types::{ChipReason, ChipState};
use crate::axis::Axis;
use crate::grammar::Grammar;
use crate::selection::Selection;
use std::convert::Infallible;
use std::ops::ControlFlow;

/// One relationship between the chip and an active token.
#[derive(Debug, Clone, Copy)]
struct Hit<'g> {
    /// The active token on the other side of the pairing.
    token: &'g str,
    /// Warning text for a cautionary pairing, `None` for a natural one.
    warning: Option<&'g str>,
}

/// Which relationships a scan considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    /// Only entries declared by active tokens on the driving axes.
    Driving,
    /// The chip's own entry against every active token, then every active
    /// token's entry against the chip.
    Bidirectional,
}

fn scan<'g, B, F>(
    grammar: &'g Grammar,
    active: &'g Selection,
    chip_axis: &str,
    chip_token: &str,
    reach: Reach,
    visit: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(Hit<'g>) -> ControlFlow<B>,
{
    match reach {
        Reach::Driving => {
            for axis in Axis::DRIVING.map(Axis::as_str) {
                if axis == chip_axis {
                    continue;
                }
                scan_declared_by(grammar, active, axis, chip_axis, chip_token, visit)?;
            }
        }
        Reach::Bidirectional => {
            if let Some(entry) = grammar.composition(chip_axis, chip_token) {
                for (partner_axis, composition) in entry {
                    for token in active.get(partner_axis) {
                        if let Some(warning) = composition.cautionary.get(token) {
                            visit(Hit {
                                token,
                                warning: Some(warning.as_str()),
                            })?;
                        } else if composition.natural.contains(token) {
                            visit(Hit {
                                token,
                                warning: None,
                            })?;
                        }
                    }
                }
            }
            for axis in active.axes() {
                if axis == chip_axis {
                    continue;
                }
                scan_declared_by(grammar, active, axis, chip_axis, chip_token, visit)?;
            }
        }
    }
    ControlFlow::Continue(())
}

/// Visit every active token on `axis` whose own entry mentions the chip.
fn scan_declared_by<'g, B, F>(
    grammar: &'g Grammar,
    active: &'g Selection,
    axis: &str,
    chip_axis: &str,
    chip_token: &str,
    visit: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(Hit<'g>) -> ControlFlow<B>,
{
    for token in active.get(axis) {
        let Some(composition) = grammar
            .composition(axis, token)
            .and_then(|entry| entry.get(chip_axis))
        else {
            continue;
        };
        if let Some(warning) = composition.cautionary.get(chip_token) {
            visit(Hit {
                token,
                warning: Some(warning.as_str()),
            })?;
        } else if composition.natural.iter().any(|t| t == chip_token) {
            visit(Hit {
                token,
                warning: None,
            })?;
        }
    }
    ControlFlow::Continue(())
}

/// Cautionary on the first cautionary hit, otherwise natural if any hit.
fn light(
    grammar: &Grammar,
    active: &Selection,
    chip_axis: &str,
    chip_token: &str,
    reach: Reach,
) -> Option<ChipState> {
    let mut natural = false;
    let flow = scan(grammar, active, chip_axis, chip_token, reach, &mut |hit| {
        if hit.warning.is_some() {
            return ControlFlow::Break(());
        }
        natural = true;
        ControlFlow::Continue(())
    });

    if flow.is_break() {
        Some(ChipState::Cautionary)
    } else if natural {
        Some(ChipState::Natural)
    } else {
        None
    }
}

/// Traffic light of a chip against the active `channel` and `form` tokens
/// only.
///
/// Looks at the composition entries of active driving tokens that mention
/// the chip's axis; a chip on a driving axis is not lit by its own axis.
pub fn get_chip_state(
    grammar: &Grammar,
    active: &Selection,
    chip_axis: &str,
    chip_token: &str,
) -> Option<ChipState> {
    light(grammar, active, chip_axis, chip_token, Reach::Driving)
}

/// Traffic light of a chip against every active token, checking the
/// composition table in both directions.
pub fn get_reverse_chip_state(
    grammar: &Grammar,
    active: &Selection,
    chip_axis: &str,
    chip_token: &str,
) -> Option<ChipState> {
    light(grammar, active, chip_axis, chip_token, Reach::Bidirectional)
}

/// Same search as [`get_reverse_chip_state`], also listing the active
/// tokens responsible. Every hit is collected; nothing short-circuits.
pub fn get_chip_state_with_reason(
    grammar: &Grammar,
    active: &Selection,
    chip_axis: &str,
    chip_token: &str,
) -> ChipReason {
    let mut reason = ChipReason::default();
    let ControlFlow::Continue(()) = scan::<Infallible, _>(
        grammar,
        active,
        chip_axis,
        chip_token,
        Reach::Bidirectional,
        &mut |hit| {
            match hit.warning {
                Some(warning) => {
                    if !reason.caution_with.iter().any(|(t, _)| t == hit.token) {
                        reason
                            .caution_with
                            .push((hit.token.to_string(), warning.to_string()));
                    }
                }
                None => {
                    if !reason.natural_with.iter().any(|t| t == hit.token) {
                        reason.natural_with.push(hit.token.to_string());
                    }
                }
            }
            ControlFlow::Continue(())
        },
    );

    reason.state = if !reason.caution_with.is_empty() {
        Some(ChipState::Cautionary)
    } else if !reason.natural_with.is_empty() {
        Some(ChipState::Natural)
    } else {
        None
    };
    reason
}
