//! Aggregate rating computation over a recipe's reviews.

use serde::Serialize;

/// Review count and mean rating, rounded to one decimal place.
///
/// The average is exactly `0.0` when there are no reviews; it is never NaN
/// or null on the wire. Aggregation is pure and order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub count: usize,
    pub average_rating: f64,
}

impl RatingSummary {
    /// Sum and count the ratings, then round half-up to one decimal.
    ///
    /// The rounding is done in integer tenths so the result is identical
    /// whether the ratings are streamed or materialised.
    pub fn aggregate<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (count, sum) = ratings
            .into_iter()
            .fold((0usize, 0u64), |(count, sum), rating| {
                (count + 1, sum + u64::from(rating))
            });

        if count == 0 {
            return Self {
                count: 0,
                average_rating: 0.0,
            };
        }

        let count_u64 = count as u64;
        // Ratings cap at 5, so tenths fits losslessly in an f64 mantissa.
        let tenths = (sum * 20 + count_u64) / (count_u64 * 2);
        let average_rating = tenths as f64 / 10.0;
        Self {
            count,
            average_rating,
        }
    }
}
