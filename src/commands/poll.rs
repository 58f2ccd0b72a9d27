use crate::commands::{Command, parse_library};
use lazy_static::lazy_static;
use regex::Regex;

pub const HELP: &str = "\
create | start | next | end | polls | results [poll]
images | toggle <id> | activate all|none | rename <id> <name> | delete <id> | qr
refresh | help";

lazy_static! {
    static ref RESULTS: Regex = Regex::new(r"^results(?: #?(\d+))?$").unwrap();
}

// Marry/Fuck/Kill admin console
pub fn parse(original: &str, lowered: &str) -> Option<Command> {
    match lowered {
        "create" | "new" => return Some(Command::CreatePoll),
        "start" => return Some(Command::StartPoll),
        "next" => return Some(Command::NextGroup),
        "end" => return Some(Command::EndPoll),
        "polls" => return Some(Command::Polls),
        _ => {}
    }

    if let Some(caps) = RESULTS.captures(lowered) {
        let poll_id = match caps.get(1) {
            Some(id) => Some(id.as_str().parse().ok()?),
            None => None,
        };
        return Some(Command::Results(poll_id));
    }

    parse_library(original, lowered)
}
