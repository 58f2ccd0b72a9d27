use crate::models::{GroupId, ImageId, MfkSubmission, PollGroup, PollId};
use crate::voting::Category;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BallotError {
    #[error("Image {0} is not part of this group")]
    UnknownImage(ImageId),
    #[error("Select an image first")]
    NoSelection,
    #[error("Please assign all images")]
    Incomplete,
}

/// A voter's Marry/Fuck/Kill choices for one group, built tap by tap.
///
/// Each category holds at most one image and each image sits in at most one
/// category, so a complete ballot is always a valid submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    group_id: GroupId,
    candidates: Vec<ImageId>,
    assignments: [Option<ImageId>; 3],
    selected: Option<ImageId>,
}

fn slot(category: Category) -> usize {
    match category {
        Category::Marry => 0,
        Category::Fuck => 1,
        Category::Kill => 2,
    }
}

impl Ballot {
    pub fn new(group: &PollGroup) -> Self {
        Self {
            group_id: group.id,
            candidates: group.images.iter().map(|image| image.id).collect(),
            assignments: [None; 3],
            selected: None,
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn selected(&self) -> Option<ImageId> {
        self.selected
    }

    pub fn assigned(&self, category: Category) -> Option<ImageId> {
        self.assignments[slot(category)]
    }

    pub fn category_of(&self, image_id: ImageId) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.assigned(*category) == Some(image_id))
    }

    pub fn select(&mut self, image_id: ImageId) -> Result<(), BallotError> {
        if !self.candidates.contains(&image_id) {
            return Err(BallotError::UnknownImage(image_id));
        }
        self.selected = Some(image_id);
        Ok(())
    }

    pub fn assign_selected(&mut self, category: Category) -> Result<(), BallotError> {
        let image_id = self.selected.ok_or(BallotError::NoSelection)?;
        self.assign(image_id, category)
    }

    // Moves the image out of any other category and displaces whoever held this one
    pub fn assign(&mut self, image_id: ImageId, category: Category) -> Result<(), BallotError> {
        if !self.candidates.contains(&image_id) {
            return Err(BallotError::UnknownImage(image_id));
        }
        for held in self.assignments.iter_mut() {
            if *held == Some(image_id) {
                *held = None;
            }
        }
        self.assignments[slot(category)] = Some(image_id);
        self.selected = None;
        Ok(())
    }

    pub fn unassign(&mut self, category: Category) -> Option<ImageId> {
        self.assignments[slot(category)].take()
    }

    pub fn is_complete(&self) -> bool {
        self.assignments.iter().all(Option::is_some)
    }

    // Images not yet placed in any category, in group order
    pub fn unplaced(&self) -> Vec<ImageId> {
        self.candidates
            .iter()
            .copied()
            .filter(|id| self.category_of(*id).is_none())
            .collect()
    }

    pub fn to_submission(&self, poll_id: PollId) -> Result<MfkSubmission, BallotError> {
        match self.assignments {
            [Some(marry), Some(fuck), Some(kill)] => Ok(MfkSubmission {
                poll_id,
                group_id: self.group_id,
                marry_image_id: marry,
                f_image_id: fuck,
                kill_image_id: kill,
            }),
            _ => Err(BallotError::Incomplete),
        }
    }
}
