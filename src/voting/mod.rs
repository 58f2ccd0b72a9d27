pub mod mfk;
pub mod resolver;
pub mod smashpass;

use serde::{Deserialize, Serialize};
use std::fmt;

// The three Marry/Fuck/Kill outcomes. Declaration order is the resolver's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "marry")]
    Marry,
    #[serde(rename = "f")]
    Fuck,
    #[serde(rename = "kill")]
    Kill,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Marry, Category::Fuck, Category::Kill];

    pub fn label(self) -> &'static str {
        match self {
            Category::Marry => "💍 Marry",
            Category::Fuck => "🔥 Fuck",
            Category::Kill => "💀 Kill",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Category::Marry => "💍",
            Category::Fuck => "🔥",
            Category::Kill => "💀",
        }
    }

    // Accepts full names, wire keys and initials, case-insensitive
    pub fn parse(input: &str) -> Option<Category> {
        match input.trim().to_ascii_lowercase().as_str() {
            "marry" | "m" => Some(Category::Marry),
            "fuck" | "f" => Some(Category::Fuck),
            "kill" | "k" => Some(Category::Kill),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One candidate's vote counts within a display scope (current group or cumulative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
    pub identifier: String,
    pub marry: u32,
    pub fuck: u32,
    pub kill: u32,
}

impl CandidateTally {
    pub fn new(identifier: impl Into<String>, marry: u32, fuck: u32, kill: u32) -> Self {
        Self {
            identifier: identifier.into(),
            marry,
            fuck,
            kill,
        }
    }

    pub fn votes(&self, category: Category) -> u32 {
        match category {
            Category::Marry => self.marry,
            Category::Fuck => self.fuck,
            Category::Kill => self.kill,
        }
    }

    // Saturates rather than wrapping on absurd counts
    pub fn total(&self) -> u32 {
        self.marry.saturating_add(self.fuck).saturating_add(self.kill)
    }
}

// Share of `whole` as a percentage rounded to one decimal; 0 when nothing was cast
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / whole as f64).round() / 10.0
}
