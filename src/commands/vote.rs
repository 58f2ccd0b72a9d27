use crate::commands::Command;
use crate::models::SmashOrPass;
use crate::voting::Category;
use lazy_static::lazy_static;
use regex::Regex;

pub const HELP: &str = "\
select <image> | assign [image] <category> | unassign <category> | submit
smash | pass | refresh | help
categories: marry (m), fuck (f), kill (k)";

lazy_static! {
    static ref SELECT: Regex = Regex::new(r"^(?:select|pick) #?(\d+)$").unwrap();
    static ref ASSIGN: Regex = Regex::new(r"^assign(?: #?(\d+))? (\w+)$").unwrap();
    static ref UNASSIGN: Regex = Regex::new(r"^(?:unassign|clear) (\w+)$").unwrap();
}

// Voting page: MFK ballot taps and Smash or Pass buttons
pub fn parse(lowered: &str) -> Option<Command> {
    match lowered {
        "submit" => return Some(Command::Submit),
        "smash" => return Some(Command::Vote(SmashOrPass::Smash)),
        "pass" => return Some(Command::Vote(SmashOrPass::Pass)),
        _ => {}
    }

    if let Some(caps) = SELECT.captures(lowered) {
        return caps[1].parse().ok().map(Command::Select);
    }
    if let Some(caps) = ASSIGN.captures(lowered) {
        let image = match caps.get(1) {
            Some(id) => Some(id.as_str().parse().ok()?),
            None => None,
        };
        let category = Category::parse(&caps[2])?;
        return Some(Command::Assign { image, category });
    }
    if let Some(caps) = UNASSIGN.captures(lowered) {
        return Category::parse(&caps[1]).map(Command::Unassign);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ballot_commands() {
        assert_eq!(parse("select 4"), Some(Command::Select(4)));
        assert_eq!(
            parse("assign 4 kill"),
            Some(Command::Assign {
                image: Some(4),
                category: Category::Kill
            })
        );
        assert_eq!(
            parse("assign m"),
            Some(Command::Assign {
                image: None,
                category: Category::Marry
            })
        );
        assert_eq!(parse("unassign f"), Some(Command::Unassign(Category::Fuck)));
        assert_eq!(parse("submit"), Some(Command::Submit));
    }

    #[test]
    fn unknown_categories_are_rejected() {
        assert_eq!(parse("assign 4 date"), None);
        assert_eq!(parse("unassign x"), None);
    }

    #[test]
    fn smash_or_pass_buttons() {
        assert_eq!(parse("smash"), Some(Command::Vote(SmashOrPass::Smash)));
        assert_eq!(parse("pass"), Some(Command::Vote(SmashOrPass::Pass)));
    }
}
