pub mod poll;
pub mod smashpass;
pub mod vote;

use crate::config::Role;
use crate::error::ClientError;
use crate::models::{ImageId, PollId, SessionId, SmashOrPass};
use crate::voting::Category;
use lazy_static::lazy_static;
use regex::Regex;

/// A console line, parsed for the role this console plays.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Refresh,

    // Image library, both admin consoles
    Images,
    Toggle(ImageId),
    Activate(bool),
    Rename(ImageId, String),
    Delete(ImageId),
    Qr,

    // Marry/Fuck/Kill admin
    CreatePoll,
    StartPoll,
    NextGroup,
    EndPoll,
    Polls,
    Results(Option<PollId>),

    // Smash or Pass admin
    CreateSession,
    StartSession,
    NextImage,
    Sessions,
    SessionResults(Option<SessionId>),
    Apply(SessionId),

    // Voter
    Select(ImageId),
    Assign {
        image: Option<ImageId>,
        category: Category,
    },
    Unassign(Category),
    Submit,
    Vote(SmashOrPass),

    // Slideshow
    SlideNext,
    SlidePrevious,
    Grid,
    CloseGrid,
    Jump(usize),
}

lazy_static! {
    static ref JUMP: Regex = Regex::new(r"^(?:jump|go)\s+(\d+)$").unwrap();
}

pub fn parse(role: Role, line: &str) -> Result<Command, ClientError> {
    // Collapse runs of whitespace so patterns only need single separators
    let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = normalized.to_lowercase();

    let parsed = match lowered.as_str() {
        "help" | "?" => Some(Command::Help),
        "refresh" | "r" => Some(Command::Refresh),
        _ => match role {
            Role::Admin => poll::parse(&normalized, &lowered),
            Role::SmashPassAdmin => smashpass::parse(&normalized, &lowered),
            Role::Voter => vote::parse(&lowered),
            Role::Slideshow => parse_slideshow(&lowered),
        },
    };

    parsed.ok_or_else(|| ClientError::UnknownCommand(line.trim().to_string()))
}

// Image-library commands shared by both admin consoles. `original` keeps the case of new names.
pub(crate) fn parse_library(original: &str, lowered: &str) -> Option<Command> {
    lazy_static! {
        static ref TOGGLE: Regex = Regex::new(r"^toggle (\d+)$").unwrap();
        static ref ACTIVATE: Regex = Regex::new(r"^activate (all|none)$").unwrap();
        static ref RENAME: Regex = Regex::new(r"(?i)^rename (\d+) (.+)$").unwrap();
        static ref DELETE: Regex = Regex::new(r"^delete (\d+)$").unwrap();
    }

    match lowered {
        "images" => return Some(Command::Images),
        "qr" => return Some(Command::Qr),
        _ => {}
    }

    if let Some(caps) = TOGGLE.captures(lowered) {
        return caps[1].parse().ok().map(Command::Toggle);
    }
    if let Some(caps) = ACTIVATE.captures(lowered) {
        return Some(Command::Activate(&caps[1] == "all"));
    }
    if let Some(caps) = RENAME.captures(original) {
        let id = caps[1].parse().ok()?;
        return Some(Command::Rename(id, caps[2].trim().to_string()));
    }
    if let Some(caps) = DELETE.captures(lowered) {
        return caps[1].parse().ok().map(Command::Delete);
    }
    None
}

fn parse_slideshow(lowered: &str) -> Option<Command> {
    match lowered {
        "next" | "n" => Some(Command::SlideNext),
        "prev" | "previous" | "p" => Some(Command::SlidePrevious),
        "grid" | "g" => Some(Command::Grid),
        "close" | "esc" => Some(Command::CloseGrid),
        _ => {
            let caps = JUMP.captures(lowered)?;
            // Shown 1-based
            let position: usize = caps[1].parse().ok()?;
            position.checked_sub(1).map(Command::Jump)
        }
    }
}

pub fn help(role: Role) -> &'static str {
    match role {
        Role::Admin => poll::HELP,
        Role::SmashPassAdmin => smashpass::HELP,
        Role::Voter => vote::HELP,
        Role::Slideshow => "next | prev | grid | close | jump <n> | refresh | help",
    }
}
