use crate::commands::{Command, parse_library};
use lazy_static::lazy_static;
use regex::Regex;

pub const HELP: &str = "\
create | start | next | sessions | results [session] | apply <session>
images | toggle <id> | activate all|none | rename <id> <name> | delete <id> | qr
refresh | help";

lazy_static! {
    static ref RESULTS: Regex = Regex::new(r"^results(?: #?(\d+))?$").unwrap();
    static ref APPLY: Regex = Regex::new(r"^apply #?(\d+)$").unwrap();
}

// Smash or Pass admin console
pub fn parse(original: &str, lowered: &str) -> Option<Command> {
    match lowered {
        "create" | "new" => return Some(Command::CreateSession),
        "start" => return Some(Command::StartSession),
        "next" => return Some(Command::NextImage),
        "sessions" => return Some(Command::Sessions),
        _ => {}
    }

    if let Some(caps) = RESULTS.captures(lowered) {
        let session_id = match caps.get(1) {
            Some(id) => Some(id.as_str().parse().ok()?),
            None => None,
        };
        return Some(Command::SessionResults(session_id));
    }
    if let Some(caps) = APPLY.captures(lowered) {
        return caps[1].parse().ok().map(Command::Apply);
    }

    parse_library(original, lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_commands() {
        assert_eq!(parse("next", "next"), Some(Command::NextImage));
        assert_eq!(parse("sessions", "sessions"), Some(Command::Sessions));
        assert_eq!(parse("results", "results"), Some(Command::SessionResults(None)));
        assert_eq!(parse("results 3", "results 3"), Some(Command::SessionResults(Some(3))));
    }

    #[test]
    fn apply_needs_a_session() {
        assert_eq!(parse("apply #5", "apply #5"), Some(Command::Apply(5)));
        assert_eq!(parse("apply", "apply"), None);
    }
}
