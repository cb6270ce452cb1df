//! Comparison Analytics
//!
//! Computes best-value / highest-rated / lowest-price insights and price
//! bounds over a small set of products. Insights are derived fresh per
//! request and never cached.
//!
//! Selection is a left-to-right fold with strict comparison, so the first
//! product reaching the maximal (or minimal) score wins ties.

use super::models::Product;
use serde::Serialize;

/// Minimum and maximum price over a compared product set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Derived comparison summary. Holds references into the compared set.
#[derive(Debug)]
pub struct ComparisonInsight<'a> {
    /// Product maximizing rating / price
    pub best_value: &'a Product,

    /// Product with the highest rating (missing rating counts as 0)
    pub highest_rated: &'a Product,

    /// Cheapest product
    pub lowest_price: &'a Product,

    /// Price bounds over the whole set
    pub price_range: PriceRange,
}

impl<'a> ComparisonInsight<'a> {
    /// Computes insights over the given products, or `None` when fewer than
    /// two are supplied.
    pub fn from_products(products: &[&'a Product]) -> Option<Self> {
        let (&first, rest) = products.split_first()?;
        if rest.is_empty() {
            return None;
        }

        let best_value = fold_best(first, rest, value_ratio, |a, b| a > b);
        let highest_rated = fold_best(first, rest, Product::rating_or_zero, |a, b| a > b);
        let lowest_price = fold_best(first, rest, |p| p.price, |a, b| a < b);

        let mut price_range = PriceRange {
            min: first.price,
            max: first.price,
        };
        for p in rest {
            price_range.min = price_range.min.min(p.price);
            price_range.max = price_range.max.max(p.price);
        }

        Some(Self {
            best_value,
            highest_rated,
            lowest_price,
            price_range,
        })
    }
}

/// Rating-per-dollar score used for the best-value pick.
///
/// Prices are expected to be positive; a zero price would divide by zero,
/// so it is treated as infinitely good value when the product has any
/// rating at all, and as no value otherwise.
fn value_ratio(product: &Product) -> f64 {
    let rating = product.rating_or_zero();
    if product.price > 0.0 {
        rating / product.price
    } else if rating > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Left fold keeping the current winner unless a later product strictly
/// beats it.
fn fold_best<'a>(
    first: &'a Product,
    rest: &[&'a Product],
    score: impl Fn(&Product) -> f64,
    beats: impl Fn(f64, f64) -> bool,
) -> &'a Product {
    let mut winner = first;
    let mut winner_score = score(first);
    for &candidate in rest {
        let candidate_score = score(candidate);
        if beats(candidate_score, winner_score) {
            winner = candidate;
            winner_score = candidate_score;
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64, rating: Option<f64>) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            category: "Test".into(),
            image: String::new(),
            color: None,
            material: None,
            rating,
            pros: None,
            cons: None,
            specs: None,
        }
    }

    #[test]
    fn ratio_beats_raw_rating_for_best_value() {
        // A: 4.5 / 100 = 0.045, B: 4.0 / 50 = 0.08
        let a = product("A", 100.0, Some(4.5));
        let b = product("B", 50.0, Some(4.0));
        let insight = ComparisonInsight::from_products(&[&a, &b]).unwrap();

        assert_eq!(insight.best_value.id, "B");
        assert_eq!(insight.highest_rated.id, "A");
        assert_eq!(insight.lowest_price.id, "B");
        assert_eq!(insight.price_range, PriceRange { min: 50.0, max: 100.0 });
    }

    #[test]
    fn ties_go_to_the_first_product_encountered() {
        let a = product("A", 50.0, Some(4.0));
        let b = product("B", 50.0, Some(4.0));
        let insight = ComparisonInsight::from_products(&[&a, &b]).unwrap();

        assert_eq!(insight.best_value.id, "A");
        assert_eq!(insight.highest_rated.id, "A");
        assert_eq!(insight.lowest_price.id, "A");
    }

    #[test]
    fn missing_rating_counts_as_zero() {
        let a = product("A", 10.0, None);
        let b = product("B", 20.0, Some(1.0));
        let insight = ComparisonInsight::from_products(&[&a, &b]).unwrap();

        assert_eq!(insight.highest_rated.id, "B");
        assert_eq!(insight.best_value.id, "B");
        assert_eq!(insight.lowest_price.id, "A");
    }

    #[test]
    fn zero_price_with_rating_is_unbeatable_value() {
        let a = product("A", 10.0, Some(5.0));
        let b = product("B", 0.0, Some(0.5));
        let insight = ComparisonInsight::from_products(&[&a, &b]).unwrap();

        assert_eq!(insight.best_value.id, "B");
        assert_eq!(insight.lowest_price.id, "B");
    }

    #[test]
    fn zero_price_without_rating_is_not_best_value() {
        let a = product("A", 10.0, Some(0.5));
        let b = product("B", 0.0, None);
        let insight = ComparisonInsight::from_products(&[&a, &b]).unwrap();

        assert_eq!(insight.best_value.id, "A");
    }

    #[test]
    fn fewer_than_two_products_yield_nothing() {
        let a = product("A", 10.0, Some(4.0));
        assert!(ComparisonInsight::from_products(&[]).is_none());
        assert!(ComparisonInsight::from_products(&[&a]).is_none());
    }

    #[test]
    fn four_way_comparison() {
        let a = product("A", 80.0, Some(4.0));
        let b = product("B", 40.0, Some(4.4));
        let c = product("C", 120.0, Some(4.9));
        let d = product("D", 60.0, None);
        let insight = ComparisonInsight::from_products(&[&a, &b, &c, &d]).unwrap();

        assert_eq!(insight.best_value.id, "B"); // 0.11 ratio
        assert_eq!(insight.highest_rated.id, "C");
        assert_eq!(insight.lowest_price.id, "B");
        assert_eq!(insight.price_range, PriceRange { min: 40.0, max: 120.0 });
    }
}
