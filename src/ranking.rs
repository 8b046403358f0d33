use std::cmp::Ordering;

use crate::entities::movie;

#[derive(Clone, Debug, PartialEq)]
pub struct RankedMovie {
    pub rank: i32,
    pub movie: movie::Model,
}

/// Assigns 1-based ranks by rating, highest first.
///
/// Unrated movies follow every rated one. Equal ratings keep creation order
/// (lower id first), so the ranks are always a permutation of `1..=n`.
pub fn rank(mut movies: Vec<movie::Model>) -> Vec<RankedMovie> {
    movies.sort_by(|a, b| by_rating_desc(a.rating, b.rating).then(a.id.cmp(&b.id)));
    movies
        .into_iter()
        .zip(1..)
        .map(|(movie, rank)| RankedMovie { rank, movie })
        .collect()
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
