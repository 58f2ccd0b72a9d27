use crate::models::{
    CumulativeResults, GroupResults, Image, LiveImage, PollStatus, SessionStatus, SmashPassResults,
    display_name,
};
use crate::state::slideshow::Slide;
use crate::state::{AdminPollView, SmashPassAdminView, VoterView};
use crate::voting::mfk::{bucket_by_leading_category, live_cards, submission_share};
use crate::voting::smashpass::{Verdict, smash_share, verdict};
use crate::voting::Category;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

// Horizontal percentage bar
pub fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn image_list(images: &[Image]) -> String {
    if images.is_empty() {
        return "No images uploaded yet".to_string();
    }
    let mut out = String::new();
    for image in images {
        let state = if image.is_active { "active" } else { "inactive" };
        let _ = writeln!(out, "#{:<4} {:<30} {}", image.id, image.display_name(), state);
    }
    let active = images.iter().filter(|image| image.is_active).count();
    let _ = write!(out, "{} of {} images active", active, images.len());
    out
}

pub fn admin_status(view: &AdminPollView) -> String {
    let Some(poll) = view.poll.as_ref() else {
        return "No active poll".to_string();
    };

    let mut out = format!("Poll #{}: ", poll.id);
    match poll.status {
        PollStatus::Setup => {
            let _ = write!(out, "ready to start ({} groups)", poll.total_groups);
        }
        PollStatus::Active => {
            let current = poll.current_group.map(|n| n + 1).unwrap_or(0);
            let _ = write!(out, "active, group {} of {}", current, poll.total_groups);
            let submissions = view.current_group.as_ref().and_then(|group| group.submission_count);
            if let Some(count) = submissions {
                let _ = write!(out, ", {} submissions", count);
            }
        }
        PollStatus::Ended => out.push_str("ended"),
    }

    let controls = view.controls();
    let available: Vec<&str> = [
        (controls.create, "create"),
        (controls.start, "start"),
        (controls.next, "next"),
        (controls.end, "end"),
    ]
    .into_iter()
    .filter_map(|(enabled, name)| enabled.then_some(name))
    .collect();
    if !available.is_empty() {
        let _ = write!(out, " [{}]", available.join(", "));
    }
    out
}

/// Live cards for the admin: resolver label, vote count and a bar per
/// category showing that image's own split, followed by the category's share
/// of all submissions for the group.
pub fn live_results(results: &GroupResults) -> String {
    let mut out = format!("Group results ({} submissions)\n", results.total_submissions);
    for card in live_cards(results) {
        let label = card.winner.map(Category::label).unwrap_or("");
        let _ = writeln!(
            out,
            "{} {} ({} votes)",
            display_name(&card.result.filename),
            label,
            card.result.tally().total()
        );
        for (category, share) in Category::ALL.into_iter().zip(card.shares) {
            let _ = writeln!(
                out,
                "  {} {} {:>5.1}% ({:.1}% of submissions)",
                category.badge(),
                bar(share),
                share,
                submission_share(&card.result, category, results.total_submissions)
            );
        }
    }
    out.trim_end().to_string()
}

pub fn cumulative_grid(results: &CumulativeResults) -> String {
    let columns = bucket_by_leading_category(&results.results);
    if columns.is_empty() {
        return "No votes recorded for this poll".to_string();
    }

    let mut out = format!("Final results ({} submissions)\n", results.total_submissions);
    let header: Vec<String> = Category::ALL.iter().map(|c| format!("{:<24}", c.label())).collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    for index in 0..columns.rows() {
        let cells: Vec<String> = Category::ALL
            .into_iter()
            .zip(columns.row(index))
            .map(|(category, cell)| match cell {
                Some(result) => format!(
                    "{:<24}",
                    format!("{} ({})", display_name(&result.filename), result.votes(category))
                ),
                None => " ".repeat(24),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
    out.trim_end().to_string()
}

// Results shown to a voter after submitting: backend shares of the group's submissions
pub fn voter_results(results: &GroupResults) -> String {
    let mut out = format!("Results ({} submissions)\n", results.total_submissions);
    for card in live_cards(results) {
        let result = &card.result;
        let _ = write!(out, "{}", display_name(&result.filename));
        if let Some(winner) = card.winner {
            let _ = write!(out, " {}", winner.badge());
        }
        out.push('\n');
        for category in Category::ALL {
            let share = result.share(category);
            let _ = writeln!(out, "  {} {} {:>5.1}%", category.badge(), bar(share), share);
        }
    }
    out.trim_end().to_string()
}

pub fn voter(view: &VoterView) -> String {
    match view {
        VoterView::Waiting(message) => message.clone(),
        VoterView::Mfk { group, ballot, .. } => {
            let mut out = String::from("Assign each image to Marry, Fuck or Kill\n");
            for image in &group.images {
                let marker = if ballot.selected() == Some(image.id) { ">" } else { " " };
                let placed = ballot
                    .category_of(image.id)
                    .map(Category::label)
                    .unwrap_or("unassigned");
                let _ = writeln!(
                    out,
                    "{} #{:<4} {:<30} {}",
                    marker,
                    image.id,
                    image.display_name(),
                    placed
                );
            }
            if ballot.is_complete() {
                out.push_str("Ready to submit");
            } else {
                let _ = write!(out, "{} left to assign", ballot.unplaced().len());
            }
            out
        }
        VoterView::MfkSubmitted { results: None, .. } => {
            "Vote submitted! Waiting for results...".to_string()
        }
        VoterView::MfkSubmitted {
            results: Some(results),
            ..
        } => voter_results(results),
        VoterView::SmashPass {
            image,
            selected,
            submitted,
            ..
        } => {
            let choice = match (selected, submitted) {
                (Some(vote), true) => format!("You voted {}", vote.as_str()),
                (Some(vote), false) => format!("Selected {}, submit to confirm", vote.as_str()),
                (None, _) => "Smash or pass?".to_string(),
            };
            format!("{}\n{}", image.name, choice)
        }
        VoterView::SmashPassCompleted => "Smash or Pass complete! Thanks for voting.".to_string(),
    }
}

fn live_image(image: &LiveImage) -> String {
    let verdict = match verdict(image.smash_count, image.pass_count) {
        Verdict::Smash => "smash",
        Verdict::Pass => "pass",
        Verdict::Tie => "tie",
    };
    format!(
        "{}: {} smash / {} pass ({:.1}% smash, {})",
        image.name,
        image.smash_count,
        image.pass_count,
        smash_share(image.smash_count, image.pass_count),
        verdict
    )
}

pub fn smashpass_admin(view: &SmashPassAdminView) -> String {
    let Some(session) = view.session.as_ref() else {
        return "No active session".to_string();
    };

    match session.status {
        SessionStatus::Setup => format!(
            "Session #{}: ready to start ({} images)",
            session.id, view.total_images
        ),
        SessionStatus::Completed => format!("Session #{}: completed", session.id),
        SessionStatus::Active => {
            let mut out = format!(
                "Session #{}: image {} of {}, {} remaining",
                session.id,
                view.position().unwrap_or(0),
                view.total_images,
                view.images_remaining
            );
            if let Some(image) = view.current_image.as_ref() {
                let share = smash_share(image.smash_count, image.pass_count);
                let _ = write!(out, "\n{}\n{}", live_image(image), bar(share));
            }
            out
        }
    }
}

pub fn smashpass_results(results: &SmashPassResults) -> String {
    let mut out = format!("Session #{} results\n", results.session_id);
    let _ = writeln!(out, "Smashed ({}):", results.smashes.len());
    for image in &results.smashes {
        let _ = writeln!(out, "  {}", live_image(image));
    }
    let _ = writeln!(out, "Passed ({}):", results.passes.len());
    for image in &results.passes {
        let _ = writeln!(out, "  {}", live_image(image));
    }
    out.trim_end().to_string()
}

pub fn slide(slide: Slide<'_>) -> String {
    match slide {
        Slide::Empty => "No images to show".to_string(),
        Slide::Image { index, total, image } => format!("[{}/{}] {}", index + 1, total, image.name),
        Slide::Grid(images) => images
            .iter()
            .enumerate()
            .map(|(index, image)| format!("{:>3}. {}", index + 1, image.name))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CumulativeImageResult, ImageResult, NamedImage, Poll, PollGroup};

    fn image_result(id: i64, filename: &str, marry: u32, fuck: u32, kill: u32) -> ImageResult {
        ImageResult {
            image_id: id,
            filename: filename.to_string(),
            marry,
            fuck,
            kill,
            marry_pct: 0.0,
            fuck_pct: 0.0,
            kill_pct: 0.0,
        }
    }

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.0), "░".repeat(20));
        assert_eq!(bar(50.0), format!("{}{}", "█".repeat(10), "░".repeat(10)));
        assert_eq!(bar(250.0), "█".repeat(20));
    }

    #[test]
    fn live_results_label_each_image_once() {
        let results = GroupResults {
            group_id: 1,
            total_submissions: 4,
            results: vec![
                image_result(1, "alice.png", 3, 1, 0),
                image_result(2, "bob.jpg", 1, 2, 1),
                image_result(3, "carol.gif", 0, 1, 3),
            ],
        };
        let text = live_results(&results);
        assert!(text.starts_with("Group results (4 submissions)"));
        assert!(text.contains("alice 💍 Marry (4 votes)"));
        assert!(text.contains("bob 🔥 Fuck (4 votes)"));
        assert!(text.contains("carol 💀 Kill (4 votes)"));
        assert!(text.contains(" 75.0%"));
    }

    #[test]
    fn live_results_show_each_category_against_all_submissions() {
        let results = GroupResults {
            group_id: 1,
            total_submissions: 8,
            results: vec![
                image_result(1, "alice.png", 3, 1, 0),
                image_result(2, "bob.png", 1, 2, 1),
                image_result(3, "carol.png", 0, 1, 3),
            ],
        };
        let text = live_results(&results);
        assert!(text.contains(" 75.0% (37.5% of submissions)"));
        assert!(text.contains(" 50.0% (25.0% of submissions)"));
        assert!(text.contains("  0.0% (0.0% of submissions)"));
    }

    #[test]
    fn live_results_for_an_empty_group_avoid_dividing_by_zero() {
        let results = GroupResults {
            group_id: 1,
            total_submissions: 0,
            results: vec![
                image_result(1, "alice.png", 0, 0, 0),
                image_result(2, "bob.png", 0, 0, 0),
                image_result(3, "carol.png", 0, 0, 0),
            ],
        };
        let text = live_results(&results);
        assert!(text.contains("alice 💍 Marry (0 votes)"));
        assert!(text.contains("bob 🔥 Fuck (0 votes)"));
        assert!(text.contains("carol 💀 Kill (0 votes)"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn cumulative_grid_places_images_under_their_leading_category() {
        let cumulative = |id: i64, filename: &str, marry, fuck, kill| CumulativeImageResult {
            image_id: id,
            filename: filename.to_string(),
            marry,
            fuck,
            kill,
            total_votes: marry + fuck + kill,
            marry_pct: 0.0,
            fuck_pct: 0.0,
            kill_pct: 0.0,
        };
        let results = CumulativeResults {
            poll_id: 1,
            total_submissions: 5,
            results: vec![cumulative(1, "a.png", 4, 1, 0), cumulative(2, "b.png", 0, 1, 4)],
        };
        let text = cumulative_grid(&results);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("a (4)"));
        assert!(lines[2].ends_with("b (4)"));
    }

    #[test]
    fn empty_cumulative_results_say_so() {
        let results = CumulativeResults {
            poll_id: 1,
            total_submissions: 0,
            results: Vec::new(),
        };
        assert_eq!(cumulative_grid(&results), "No votes recorded for this poll");
    }

    #[test]
    fn admin_status_lists_available_controls() {
        let mut view = AdminPollView::default();
        assert_eq!(admin_status(&view), "No active poll");

        view.poll = Some(Poll {
            id: 7,
            status: PollStatus::Active,
            started_at: None,
            ended_at: None,
            current_group: Some(0),
            created_at: None,
            total_groups: 2,
        });
        view.current_group = Some(PollGroup {
            id: 1,
            poll_id: 7,
            group_number: 0,
            images: Vec::new(),
            created_at: None,
            submission_count: Some(3),
        });
        assert_eq!(admin_status(&view), "Poll #7: active, group 1 of 2, 3 submissions [next, end]");
    }

    #[test]
    fn smashpass_results_list_both_sides() {
        let live = |id: i64, smash, pass| LiveImage {
            id,
            filename: format!("{}.png", id),
            name: format!("img{}", id),
            smash_count: smash,
            pass_count: pass,
            total_votes: smash + pass,
        };
        let results = SmashPassResults {
            session_id: 3,
            smashes: vec![live(1, 3, 1)],
            passes: vec![live(2, 0, 2)],
        };
        let text = smashpass_results(&results);
        assert!(text.contains("Smashed (1):\n  img1: 3 smash / 1 pass (75.0% smash, smash)"));
        assert!(text.contains("Passed (1):\n  img2: 0 smash / 2 pass (0.0% smash, pass)"));
    }

    #[test]
    fn slides_render_position_and_grid() {
        let images = vec![
            NamedImage {
                id: 1,
                filename: "a.png".to_string(),
                name: "a".to_string(),
            },
            NamedImage {
                id: 2,
                filename: "b.png".to_string(),
                name: "b".to_string(),
            },
        ];
        assert_eq!(
            slide(Slide::Image {
                index: 1,
                total: 2,
                image: &images[1]
            }),
            "[2/2] b"
        );
        assert_eq!(slide(Slide::Grid(&images)), "  1. a\n  2. b");
        assert_eq!(slide(Slide::Empty), "No images to show");
    }

    #[test]
    fn voter_waiting_and_completed_messages() {
        assert_eq!(voter(&VoterView::default()), "Waiting for voting to start...");
        assert_eq!(
            voter(&VoterView::SmashPassCompleted),
            "Smash or Pass complete! Thanks for voting."
        );
    }
}
