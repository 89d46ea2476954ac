//! Scene script data model
//!
//! A script is an ordered list of [`Step`]s. It carries no runtime logic:
//! the director reads it by index and nothing else. Any index outside the
//! script resolves to the synthetic [`Step::End`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Position inside a script. Signed on purpose: negative and past-the-end
/// positions are legal and read as `end`.
pub type StepIndex = i64;

static END_STEP: Step = Step::End;

/// One instruction of a scene script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    /// A line of dialogue, displayed until the host advances
    Say { speaker: Speaker, text: String },
    /// A prompt with options; the host jumps to the picked option's target
    Choice {
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    /// Marker telling the host to mount a minigame
    StartGame { game: GameId },
    /// Suspension point until the mounted minigame reports a result
    AwaitGameResult { to_var: Variable },
    /// Jump selected by the recorded result; unmapped results fall through
    BranchOnResult {
        var: Variable,
        next_by_result: BTreeMap<ResultCategory, StepIndex>,
    },
    /// Jump target convention, followed only when the host decides to
    Goto { next: StepIndex },
    /// Terminal marker
    End,
}

impl Step {
    /// Discriminant of this step
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Say { .. } => StepKind::Say,
            Step::Choice { .. } => StepKind::Choice,
            Step::StartGame { .. } => StepKind::StartGame,
            Step::AwaitGameResult { .. } => StepKind::AwaitGameResult,
            Step::BranchOnResult { .. } => StepKind::BranchOnResult,
            Step::Goto { .. } => StepKind::Goto,
            Step::End => StepKind::End,
        }
    }

    /// Shorthand for building a `say` step
    pub fn say(speaker: Speaker, text: impl Into<String>) -> Self {
        Step::Say {
            speaker,
            text: text.into(),
        }
    }

    /// Indices this step names explicitly (choice options, gotos, branch arms)
    pub fn targets(&self) -> Vec<StepIndex> {
        match self {
            Step::Choice { options, .. } => options.iter().map(|o| o.next).collect(),
            Step::BranchOnResult { next_by_result, .. } => {
                next_by_result.values().copied().collect()
            }
            Step::Goto { next } => vec![*next],
            _ => Vec::new(),
        }
    }
}

/// Fieldless discriminant of [`Step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Say,
    Choice,
    StartGame,
    AwaitGameResult,
    BranchOnResult,
    Goto,
    End,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Say => "say",
            StepKind::Choice => "choice",
            StepKind::StartGame => "startGame",
            StepKind::AwaitGameResult => "awaitGameResult",
            StepKind::BranchOnResult => "branchOnResult",
            StepKind::Goto => "goto",
            StepKind::End => "end",
        };
        f.write_str(name)
    }
}

/// A selectable option of a choice step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub next: StepIndex,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, next: StepIndex) -> Self {
        Self {
            label: label.into(),
            next,
        }
    }
}

/// Who speaks a dialogue line
///
/// Serialized by name; any other name is rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    Ivan,
    Player,
    Narrator,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Minigames a host knows how to mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Dice,
    Minesweeper,
    Keypad,
    Snake,
    Blackjack,
    CodeCracker,
    LightsOut,
    Snowfall,
    HighCardDraw,
    Shots,
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a minigame concluded
///
/// The director never interprets these; they are only keys for
/// `branchOnResult` lookups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResultCategory {
    Win,
    Lose,
    Draw,
    Completed,
}

impl ResultCategory {
    pub const ALL: [ResultCategory; 4] = [
        ResultCategory::Win,
        ResultCategory::Lose,
        ResultCategory::Draw,
        ResultCategory::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCategory::Win => "win",
            ResultCategory::Lose => "lose",
            ResultCategory::Draw => "draw",
            ResultCategory::Completed => "completed",
        }
    }
}

impl fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown result category '{0}' (expected win, lose, draw or completed)")]
pub struct UnknownResultCategory(pub String);

impl FromStr for ResultCategory {
    type Err = UnknownResultCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownResultCategory(s.to_string()))
    }
}

/// Variable names the director stores results under
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Variable {
    #[serde(rename = "lastResult")]
    LastResult,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::LastResult => f.write_str("lastResult"),
        }
    }
}

/// An immutable, ordered scene script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Step at `index`, or the synthetic `end` step outside `[0, len)`
    pub fn get(&self, index: StepIndex) -> &Step {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.steps.get(i))
            .unwrap_or(&END_STEP)
    }

    /// Whether `index` addresses a real step
    pub fn contains(&self, index: StepIndex) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.steps.len())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<Vec<Step>> for Script {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<Step> for Script {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
