//! Shared fixtures for unit tests.

use crate::grammar::Grammar;
use crate::selection::Selection;
use serde_json::{Value, json};

/// Build a grammar from a JSON value.
pub(crate) fn grammar_from(value: Value) -> Grammar {
    serde_json::from_value(value).unwrap()
}

/// Build a selection from `(axis, tokens)` pairs.
pub(crate) fn selection(pairs: &[(&str, &[&str])]) -> Selection {
    let mut selection = Selection::empty();
    for (axis, tokens) in pairs {
        for token in *tokens {
            selection.insert(axis, token);
        }
    }
    selection
}

/// A small grammar exercising every section.
pub(crate) fn sample_grammar() -> Grammar {
    grammar_from(json!({
        "schema_version": "1.0",
        "axes": {
            "definitions": {
                "completeness": {
                    "full": "Comprehensive coverage of the topic.",
                    "gist": "Short overview only."
                },
                "scope": {
                    "mean": "Core meaning and central intent.",
                    "struct": "Structure and arrangement of parts."
                },
                "method": {
                    "riff": "Loose improvisation.",
                    "flow": "Follow the flow over time.",
                    "diagnose": "Find likely root causes.",
                    "branch": "Explore alternative branches.",
                    "models": "Reason with explicit mental models."
                },
                "form": {
                    "wardley": "Strategic mapping on an evolution axis.",
                    "prose": "Flowing narrative text.",
                    "faq": "Question and answer pairs."
                },
                "channel": {
                    "plain": "Plain prose, no markdown.",
                    "slack": "Slack-formatted.",
                    "shellscript": "A runnable shell script."
                },
                "directional": {
                    "fog": "Move from specifics to the abstract."
                }
            },
            "labels": {
                "form": { "wardley": "Wardley Map" }
            },
            "guidance": {
                "form": { "wardley": "Use with strategic planning tasks." }
            },
            "use_when": {
                "form": { "wardley": "Use when the user wants a Wardley map output." }
            },
            "kanji": {
                "completeness": { "full": "全" },
                "form": { "faq": "問" }
            },
            "categories": {
                "method": {
                    "flow": "Temporal/Dynamic",
                    "diagnose": "Diagnostic",
                    "branch": "Exploration",
                    "models": "Reasoning"
                }
            },
            "routing_concept": {
                "form": { "wardley": "strategic positioning" }
            },
            "cross_axis_composition": {
                "channel": {
                    "shellscript": {
                        "task": {
                            "natural": ["make", "show"],
                            "cautionary": {
                                "sim": "tends to produce thin output; simulation is inherently narrative"
                            }
                        }
                    }
                },
                "form": {
                    "faq": {
                        "channel": {
                            "cautionary": {
                                "shellscript": "a script cannot hold question and answer prose"
                            }
                        }
                    }
                }
            }
        },
        "tasks": {
            "descriptions": {
                "show": "Reveal the structure, content, or meaning of the subject.",
                "make": "Produce or generate the artifact described in the subject.",
                "sim": "Simulate a scenario.",
                "probe": "Investigate the subject for hidden properties."
            },
            "labels": { "show": "Show", "make": "Make" },
            "use_when": {
                "show": "Explaining or describing something for an audience."
            },
            "kanji": { "show": "示" }
        },
        "hierarchy": {
            "axis_priority": ["completeness", "scope", "method", "form", "channel", "directional"],
            "axis_soft_caps": { "completeness": 1, "scope": 2, "method": 3 },
            "axis_incompatibilities": {
                "channel": { "plain": ["form:wardley"] },
                "form": { "wardley": ["plain"] }
            }
        },
        "persona": {
            "presets": {
                "designer": {
                    "key": "designer",
                    "label": "Designer",
                    "voice": "as designer",
                    "audience": "to product team",
                    "tone": "collaboratively",
                    "spoken": "as-designer"
                },
                "coach": {
                    "key": "coach",
                    "label": "Coach",
                    "voice": "as coach",
                    "tone": "gently"
                }
            },
            "axes": {
                "voice": ["as programmer", "as designer"],
                "audience": ["to product manager", "to managers"],
                "tone": ["directly", "gently"]
            },
            "docs": {
                "voice": { "as programmer": "Speak as a working software engineer." },
                "audience": { "to managers": "Audience focused on outcomes and risk." }
            },
            "use_when": {
                "audience": { "to managers": "Use when addressing outcome-focused leadership." }
            },
            "kanji": {
                "tone": { "directly": "直" }
            },
            "intent": {
                "axis_tokens": { "intent": ["persuade", "inform"] },
                "docs": { "persuade": "Move the audience toward a decision." }
            }
        },
        "patterns": [
            {
                "title": "Example Pattern",
                "command": "bar build show mean full plain",
                "example": "bar build show mean full plain --subject \"test\"",
                "desc": "A test pattern.",
                "tokens": { "completeness": ["full"], "scope": ["mean"] }
            }
        ],
        "starter_packs": [
            {
                "name": "debug",
                "framing": "Diagnosing a bug or system failure",
                "command": "bar build probe diagnose full"
            }
        ]
    }))
}
