//! Task cards and board text.
//!
//! Each record becomes a card on its own; a record that cannot be shown is
//! left out and logged, the rest of the board still renders.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;
use taskboard_core::model::{non_empty, RecordError, StatusClass, TaskRecord};
use tracing::{debug, warn};

use crate::state::BoardState;

pub const BOARD_TITLE: &str = "Hall of Creation Dashboard";
pub const BOARD_SUBTITLE: &str = "Prometheus Task Oversight";
pub const LOADING_TEXT: &str = "Loading tasks...";
pub const NO_TASKS_TEXT: &str = "No tasks available.";

const UNKNOWN_TASK: &str = "Unknown Task";
const UNKNOWN: &str = "Unknown";

/// Output lines longer than this are cut and end with an ellipsis.
pub const OUTPUT_PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub class: StatusClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityLine {
    pub label: &'static str,
    pub value: String,
}

/// Per-card action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    /// Shown on every card. Has no backing behaviour yet.
    PreviewAsset,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::PreviewAsset => "Preview Asset",
        }
    }

    pub fn activate(self, card_key: &str) {
        debug!(card = card_key, action = self.label(), "card action has no handler");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub agent: String,
    pub status: StatusBadge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priorities: Vec<PriorityLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub action: CardAction,
}

impl Card {
    fn from_record(key: String, rec: &TaskRecord) -> Self {
        let priorities = [
            ("Griptape Priority", &rec.griptape_priority),
            ("OpenAI Priority", &rec.openai_priority),
            ("Grok Priority", &rec.grok_priority),
        ]
        .into_iter()
        .filter_map(|(label, field)| {
            non_empty(field).map(|v| PriorityLine {
                label,
                value: v.to_string(),
            })
        })
        .collect();

        Self {
            key,
            title: non_empty(&rec.task).unwrap_or(UNKNOWN_TASK).to_string(),
            agent: non_empty(&rec.agent).unwrap_or(UNKNOWN).to_string(),
            status: StatusBadge {
                label: non_empty(&rec.status).unwrap_or(UNKNOWN).to_string(),
                class: rec.status_class(),
            },
            output: non_empty(&rec.output).map(|o| truncate(o, OUTPUT_PREVIEW_CHARS)),
            priorities,
            error: non_empty(&rec.error).map(str::to_string),
            action: CardAction::PreviewAsset,
        }
    }
}

/// Builds one card. `used_keys` keeps keys unique across the board.
pub fn build_card(
    index: usize,
    raw: &Value,
    used_keys: &mut HashSet<String>,
) -> Result<Card, RecordError> {
    let rec = TaskRecord::from_value(raw.clone())?;
    let mut key = rec
        .id()
        .map(str::to_string)
        .unwrap_or_else(|| format!("task-{index}"));
    while used_keys.contains(&key) {
        key = format!("{key}-{index}");
    }
    used_keys.insert(key.clone());
    Ok(Card::from_record(key, &rec))
}

/// Builds cards for every renderable record, in order.
pub fn build_cards(records: &[Value]) -> Vec<Card> {
    let mut used_keys = HashSet::new();
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match build_card(index, raw, &mut used_keys) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!(index, error = %e, "omitting task that could not be rendered");
                None
            }
        })
        .collect()
}

/// Renders the whole board for a terminal.
pub fn render_board(state: &BoardState) -> String {
    match state {
        BoardState::Loading => LOADING_TEXT.to_string(),
        BoardState::Error(msg) => format!("Error: {msg}"),
        BoardState::Ready(records) => {
            let cards = build_cards(records);
            if cards.is_empty() {
                return NO_TASKS_TEXT.to_string();
            }
            let mut out = format!("{BOARD_TITLE}\n{BOARD_SUBTITLE}\n");
            for card in &cards {
                out.push('\n');
                out.push_str(&render_card(card));
            }
            out
        }
    }
}

pub fn render_card(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} [{}]", card.title, card.key);
    let _ = writeln!(out, "Agent: {}", card.agent);
    let _ = writeln!(
        out,
        "Status: {} ({})",
        card.status.label,
        card.status.class.as_str()
    );
    if let Some(output) = &card.output {
        let _ = writeln!(out, "Output: {output}");
    }
    for p in &card.priorities {
        let _ = writeln!(out, "{}: {}", p.label, p.value);
    }
    if let Some(error) = &card.error {
        let _ = writeln!(out, "Error: {error}");
    }
    let _ = writeln!(out, "[{}]", card.action.label());
    out
}

/// Cuts `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
