use crate::domain::model::{Review, MAX_STARS};
use std::collections::BTreeSet;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = MAX_STARS;

/// Multi-select star filter. An empty selection shows every review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingFilter {
    selected: BTreeSet<u8>,
}

impl RatingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratings<I: IntoIterator<Item = u8>>(ratings: I) -> Self {
        let mut filter = Self::new();
        for rating in ratings {
            filter.select(rating);
        }
        filter
    }

    fn in_range(rating: u8) -> bool {
        let valid = (MIN_RATING..=MAX_RATING).contains(&rating);
        if !valid {
            tracing::debug!("Ignoring out of range rating: {}", rating);
        }
        valid
    }

    /// Adds the rating to the selection. Selecting twice keeps it selected.
    pub fn select(&mut self, rating: u8) -> bool {
        if !Self::in_range(rating) {
            return false;
        }
        self.selected.insert(rating);
        true
    }

    /// Returns whether the rating is selected after the toggle.
    pub fn toggle(&mut self, rating: u8) -> bool {
        if !Self::in_range(rating) {
            return false;
        }
        if self.selected.remove(&rating) {
            false
        } else {
            self.selected.insert(rating);
            true
        }
    }

    pub fn is_selected(&self, rating: u8) -> bool {
        self.selected.contains(&rating)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = u8> + '_ {
        self.selected.iter().copied()
    }

    pub fn matches(&self, review: &Review) -> bool {
        self.selected.is_empty() || self.selected.contains(&review.rating)
    }

    pub fn apply<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        reviews.iter().filter(|review| self.matches(review)).collect()
    }
}

/// Five slots, `true` for filled.
pub fn star_slots(rating: u8) -> [bool; 5] {
    std::array::from_fn(|slot| slot < rating as usize)
}
