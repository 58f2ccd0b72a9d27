use crate::models::{CumulativeImageResult, GroupResults, ImageResult, PollGroup};
use crate::voting::resolver::resolve_categories;
use crate::voting::{CandidateTally, Category, percentage};
use log::warn;

// One card of the admin's live results for the current group
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCard {
    pub result: ImageResult,
    pub winner: Option<Category>,
    // Per-category share of this image's own votes, unrounded
    pub shares: [f64; 3],
}

pub fn live_cards(results: &GroupResults) -> Vec<LiveCard> {
    let tallies: Vec<CandidateTally> = results.results.iter().map(ImageResult::tally).collect();

    let winners: Vec<Option<Category>> = match resolve_categories(&tallies) {
        Ok(labels) => labels.into_iter().map(Some).collect(),
        Err(e) => {
            warn!("Not labelling results for group {}: {}", results.group_id, e);
            vec![None; tallies.len()]
        }
    };

    results
        .results
        .iter()
        .zip(tallies.iter())
        .zip(winners)
        .map(|((result, tally), winner)| LiveCard {
            result: result.clone(),
            winner,
            shares: own_shares(tally),
        })
        .collect()
}

// Stand-in for a group nobody has voted in yet: one zero-count result per image
pub fn empty_results(group: &PollGroup) -> GroupResults {
    GroupResults {
        group_id: group.id,
        total_submissions: 0,
        results: group
            .images
            .iter()
            .map(|image| ImageResult {
                image_id: image.id,
                filename: image.filename.clone(),
                marry: 0,
                fuck: 0,
                kill: 0,
                marry_pct: 0.0,
                fuck_pct: 0.0,
                kill_pct: 0.0,
            })
            .collect(),
    }
}

fn own_shares(tally: &CandidateTally) -> [f64; 3] {
    let total = tally.total();
    Category::ALL.map(|category| {
        if total == 0 {
            0.0
        } else {
            tally.votes(category) as f64 / total as f64 * 100.0
        }
    })
}

// Category an image "won" across the whole poll. Ties favour the earlier category.
pub fn leading_category(tally: &CandidateTally) -> Category {
    if tally.marry >= tally.fuck && tally.marry >= tally.kill {
        Category::Marry
    } else if tally.fuck >= tally.kill {
        Category::Fuck
    } else {
        Category::Kill
    }
}

/// Cumulative results split into one column per leading category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryColumns {
    pub marry: Vec<CumulativeImageResult>,
    pub fuck: Vec<CumulativeImageResult>,
    pub kill: Vec<CumulativeImageResult>,
}

impl CategoryColumns {
    pub fn column(&self, category: Category) -> &[CumulativeImageResult] {
        match category {
            Category::Marry => &self.marry,
            Category::Fuck => &self.fuck,
            Category::Kill => &self.kill,
        }
    }

    fn column_mut(&mut self, category: Category) -> &mut Vec<CumulativeImageResult> {
        match category {
            Category::Marry => &mut self.marry,
            Category::Fuck => &mut self.fuck,
            Category::Kill => &mut self.kill,
        }
    }

    pub fn rows(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.column(*category).len())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    // Row `index` across the three columns; `None` where a column has run out
    pub fn row(&self, index: usize) -> [Option<&CumulativeImageResult>; 3] {
        Category::ALL.map(|category| self.column(category).get(index))
    }
}

pub fn bucket_by_leading_category(results: &[CumulativeImageResult]) -> CategoryColumns {
    let mut columns = CategoryColumns::default();

    for result in results {
        let category = leading_category(&result.tally());
        columns.column_mut(category).push(result.clone());
    }

    for category in Category::ALL {
        // Stable: equal counts keep backend order
        columns
            .column_mut(category)
            .sort_by(|a, b| b.votes(category).cmp(&a.votes(category)));
    }

    columns
}

// Share of the whole group's submissions, rounded like the backend does
pub fn submission_share(result: &ImageResult, category: Category, total_submissions: u32) -> f64 {
    percentage(result.tally().votes(category), total_submissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: i64, filename: &str, marry: u32, fuck: u32, kill: u32) -> ImageResult {
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

    fn cumulative(id: i64, marry: u32, fuck: u32, kill: u32) -> CumulativeImageResult {
        CumulativeImageResult {
            image_id: id,
            filename: format!("{}.png", id),
            marry,
            fuck,
            kill,
            total_votes: marry + fuck + kill,
            marry_pct: 0.0,
            fuck_pct: 0.0,
            kill_pct: 0.0,
        }
    }

    #[test]
    fn live_cards_carry_unique_winners_and_own_shares() {
        let results = GroupResults {
            group_id: 4,
            total_submissions: 4,
            results: vec![
                image(1, "a.png", 3, 1, 0),
                image(2, "b.png", 1, 2, 1),
                image(3, "c.png", 0, 1, 3),
            ],
        };

        let cards = live_cards(&results);
        let winners: Vec<_> = cards.iter().map(|card| card.winner).collect();
        assert_eq!(
            winners,
            vec![Some(Category::Marry), Some(Category::Fuck), Some(Category::Kill)]
        );
        assert_eq!(cards[0].shares, [75.0, 25.0, 0.0]);
        assert_eq!(cards[1].shares[1], 50.0);
    }

    #[test]
    fn live_cards_for_an_empty_group_still_label_everyone() {
        let results = GroupResults {
            group_id: 1,
            total_submissions: 0,
            results: vec![
                image(1, "a.png", 0, 0, 0),
                image(2, "b.png", 0, 0, 0),
                image(3, "c.png", 0, 0, 0),
            ],
        };
        let cards = live_cards(&results);
        assert!(cards.iter().all(|card| card.winner.is_some()));
        assert!(cards.iter().all(|card| card.shares == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn empty_results_cover_every_image_in_the_group() {
        use crate::models::Image;

        let group = PollGroup {
            id: 7,
            poll_id: 2,
            group_number: 0,
            images: ["a.png", "b.png", "c.png"]
                .iter()
                .zip(1..)
                .map(|(filename, id)| Image {
                    id,
                    filename: filename.to_string(),
                    is_active: true,
                    created_at: None,
                })
                .collect(),
            created_at: None,
            submission_count: None,
        };

        let results = empty_results(&group);
        assert_eq!(results.group_id, 7);
        assert_eq!(results.total_submissions, 0);
        let ids: Vec<i64> = results.results.iter().map(|r| r.image_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let winners: Vec<_> = live_cards(&results).iter().map(|card| card.winner).collect();
        assert_eq!(
            winners,
            vec![Some(Category::Marry), Some(Category::Fuck), Some(Category::Kill)]
        );
    }

    #[test]
    fn live_cards_leave_wrong_sized_groups_unlabelled() {
        let results = GroupResults {
            group_id: 9,
            total_submissions: 1,
            results: vec![image(1, "a.png", 1, 0, 0), image(2, "b.png", 0, 1, 0)],
        };
        let cards = live_cards(&results);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|card| card.winner.is_none()));
    }

    #[test]
    fn leading_category_prefers_earlier_category_on_ties() {
        assert_eq!(leading_category(&CandidateTally::new("a", 2, 2, 2)), Category::Marry);
        assert_eq!(leading_category(&CandidateTally::new("a", 1, 2, 2)), Category::Fuck);
        assert_eq!(leading_category(&CandidateTally::new("a", 1, 0, 2)), Category::Kill);
        assert_eq!(leading_category(&CandidateTally::new("a", 0, 0, 0)), Category::Marry);
    }

    #[test]
    fn bucketing_sorts_each_column_by_its_own_count() {
        let results = vec![
            cumulative(1, 2, 0, 0),
            cumulative(2, 5, 1, 1),
            cumulative(3, 0, 4, 1),
            cumulative(4, 0, 0, 3),
            cumulative(5, 0, 0, 6),
            cumulative(6, 5, 0, 0),
        ];

        let columns = bucket_by_leading_category(&results);
        let ids = |category| -> Vec<i64> {
            columns.column(category).iter().map(|r| r.image_id).collect()
        };

        assert_eq!(ids(Category::Marry), vec![2, 6, 1]);
        assert_eq!(ids(Category::Fuck), vec![3]);
        assert_eq!(ids(Category::Kill), vec![5, 4]);
        assert_eq!(columns.rows(), 3);

        let last_row = columns.row(2);
        assert_eq!(last_row[0].map(|r| r.image_id), Some(1));
        assert!(last_row[1].is_none());
        assert!(last_row[2].is_none());
    }

    #[test]
    fn bucketing_nothing_gives_an_empty_grid() {
        let columns = bucket_by_leading_category(&[]);
        assert!(columns.is_empty());
    }

    #[test]
    fn submission_share_matches_backend_rounding() {
        let result = image(1, "a.png", 1, 2, 0);
        assert_eq!(submission_share(&result, Category::Marry, 3), 33.3);
        assert_eq!(submission_share(&result, Category::Fuck, 3), 66.7);
        assert_eq!(submission_share(&result, Category::Kill, 0), 0.0);
    }
}
