use crate::models::{Image, ImageId, SmashPassResults};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Smash,
    Pass,
    Tie,
}

pub fn verdict(smash_count: u32, pass_count: u32) -> Verdict {
    if smash_count > pass_count {
        Verdict::Smash
    } else if pass_count > smash_count {
        Verdict::Pass
    } else {
        Verdict::Tie
    }
}

pub fn smash_share(smash_count: u32, pass_count: u32) -> f64 {
    let total = u64::from(smash_count) + u64::from(pass_count);
    if total == 0 {
        return 0.0;
    }
    smash_count as f64 / total as f64 * 100.0
}

/// Toggles needed to bring the image library in line with a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPlan {
    pub enable: Vec<ImageId>,
    pub disable: Vec<ImageId>,
}

impl ActivationPlan {
    pub fn is_empty(&self) -> bool {
        self.enable.is_empty() && self.disable.is_empty()
    }

    // Every image id that has to be toggled, enables first
    pub fn toggles(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.enable.iter().chain(self.disable.iter()).copied()
    }
}

// Smashes become active, passes inactive; images are matched by filename
pub fn activation_plan(results: &SmashPassResults, images: &[Image]) -> ActivationPlan {
    let by_filename: HashMap<&str, &Image> = images
        .iter()
        .map(|image| (image.filename.as_str(), image))
        .collect();

    let mut plan = ActivationPlan::default();

    for smash in &results.smashes {
        if let Some(image) = by_filename.get(smash.filename.as_str()) {
            if !image.is_active && !plan.enable.contains(&image.id) {
                plan.enable.push(image.id);
            }
        }
    }

    for pass in &results.passes {
        if let Some(image) = by_filename.get(pass.filename.as_str()) {
            if image.is_active && !plan.disable.contains(&image.id) {
                plan.disable.push(image.id);
            }
        }
    }

    plan
}

// Images whose active flag differs from the requested state
pub fn bulk_activation(images: &[Image], active: bool) -> Vec<ImageId> {
    images
        .iter()
        .filter(|image| image.is_active != active)
        .map(|image| image.id)
        .collect()
}
