//! Catalog query pipeline.
//!
//! A [`CatalogQuery`] captures the screen's current search text, category
//! selection, facet filter selections, and sort key. [`Catalog::query`] runs
//! the whole pipeline from scratch on every call; with a static in-memory
//! catalog there is nothing worth caching.
//!
//! Predicate semantics:
//! - search, category, and each facet AND together
//! - options selected *within* a facet OR together
//! - an empty selection set imposes no constraint on its facet

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Catalog, Product};

/// Sort orders for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most-reviewed first.
    #[default]
    Popularity,
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Highest rated first.
    Rating,
    /// New-flagged products first.
    Newest,
}

impl SortKey {
    /// Parse from the option id the UI passes around.
    ///
    /// Unknown values fall back to the default sort.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLowToHigh,
            "price-high" => Self::PriceHighToLow,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Popularity,
        }
    }

    /// The option id the UI passes around.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PriceLowToHigh => "price-low",
            Self::PriceHighToLow => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Popularity",
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
            Self::Rating => "Rating",
            Self::Newest => "Newest",
        }
    }

    /// Comparator for this sort order.
    ///
    /// Applied with an unstable sort; ties are unordered.
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popularity => b.review_count.cmp(&a.review_count),
            Self::PriceLowToHigh => a.price.amount.cmp(&b.price.amount),
            Self::PriceHighToLow => b.price.amount.cmp(&a.price.amount),
            Self::Rating => b.rating.cmp(&a.rating),
            Self::Newest => b.is_new.cmp(&a.is_new),
        }
    }
}

/// Category selection: a single category or the "all" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Pass every product through.
    #[default]
    All,
    /// Only products in this exact category.
    One(String),
}

impl CategoryFilter {
    /// Parse from the option id the UI passes around ("all" is the sentinel).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::One(s.to_owned())
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::One(category) => product.category == *category,
        }
    }
}

/// Price range facet options (inclusive INR brackets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceBracket {
    Under500,
    From500To999,
    From1000To2499,
    From2500AndUp,
}

impl PriceBracket {
    /// Every bracket, in display order.
    pub const ALL: [Self; 4] = [
        Self::Under500,
        Self::From500To999,
        Self::From1000To2499,
        Self::From2500AndUp,
    ];

    /// Inclusive bounds; the top bracket has no upper bound.
    #[must_use]
    pub fn bounds(self) -> (Decimal, Option<Decimal>) {
        match self {
            Self::Under500 => (Decimal::ZERO, Some(Decimal::from(499))),
            Self::From500To999 => (Decimal::from(500), Some(Decimal::from(999))),
            Self::From1000To2499 => (Decimal::from(1000), Some(Decimal::from(2499))),
            Self::From2500AndUp => (Decimal::from(2500), None),
        }
    }

    /// Whether an amount falls inside this bracket.
    #[must_use]
    pub fn contains(self, amount: Decimal) -> bool {
        let (min, max) = self.bounds();
        amount >= min && max.is_none_or(|max| amount <= max)
    }

    /// The option id the UI passes around.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under500 => "under-500",
            Self::From500To999 => "500-999",
            Self::From1000To2499 => "1000-2499",
            Self::From2500AndUp => "2500-up",
        }
    }

    /// Parse from the option id the UI passes around.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under500 => "Under ₹500",
            Self::From500To999 => "₹500 – ₹999",
            Self::From1000To2499 => "₹1000 – ₹2499",
            Self::From2500AndUp => "₹2500 & Up",
        }
    }
}

/// Availability facet options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    InStock,
    OnSale,
    New,
}

impl Availability {
    /// Every option, in display order.
    pub const ALL: [Self; 3] = [Self::InStock, Self::OnSale, Self::New];

    fn matches(self, product: &Product) -> bool {
        match self {
            Self::InStock => product.in_stock,
            Self::OnSale => product.is_on_sale,
            Self::New => product.is_new,
        }
    }

    /// The option id the UI passes around.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::OnSale => "on-sale",
            Self::New => "new",
        }
    }

    /// Parse from the option id the UI passes around.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OnSale => "On Sale",
            Self::New => "New Arrivals",
        }
    }
}

/// Minimum-rating facet options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingThreshold {
    FourAndUp,
    ThreeAndUp,
}

impl RatingThreshold {
    /// Every option, in display order.
    pub const ALL: [Self; 2] = [Self::FourAndUp, Self::ThreeAndUp];

    /// The minimum rating this option admits.
    #[must_use]
    pub const fn min(self) -> f32 {
        match self {
            Self::FourAndUp => 4.0,
            Self::ThreeAndUp => 3.0,
        }
    }

    fn matches(self, product: &Product) -> bool {
        product.rating.at_least(self.min())
    }

    /// The option id the UI passes around.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FourAndUp => "4-and-up",
            Self::ThreeAndUp => "3-and-up",
        }
    }

    /// Parse from the option id the UI passes around.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FourAndUp => "4★ & Up",
            Self::ThreeAndUp => "3★ & Up",
        }
    }
}

/// The screen's current query state.
///
/// Rebuilt per keystroke or selection change; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search; empty matches everything.
    pub search: String,
    /// Category selection.
    pub category: CategoryFilter,
    /// Sort order.
    pub sort: SortKey,
    /// Selected price brackets (OR-ed).
    pub price_ranges: BTreeSet<PriceBracket>,
    /// Selected availability options (OR-ed).
    pub availability: BTreeSet<Availability>,
    /// Selected rating thresholds (OR-ed).
    pub ratings: BTreeSet<RatingThreshold>,
}

impl CatalogQuery {
    /// A blank query: everything matches, default sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected facet options, for the filter badge.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.price_ranges.len() + self.availability.len() + self.ratings.len()
    }

    /// Clear every facet selection (the "Clear All" button). Search text,
    /// category, and sort are left alone.
    pub fn clear_filters(&mut self) {
        self.price_ranges.clear();
        self.availability.clear();
        self.ratings.clear();
    }

    /// Whether a product passes every active predicate.
    ///
    /// `needle` is the pre-lowercased search text.
    fn matches(&self, needle: &str, product: &Product) -> bool {
        matches_search(needle, product)
            && self.category.matches(product)
            && matches_facet(&self.price_ranges, |b| b.contains(product.price.amount))
            && matches_facet(&self.availability, |a| a.matches(product))
            && matches_facet(&self.ratings, |r| r.matches(product))
    }
}

/// Case-insensitive substring match against name, description, or any tag.
fn matches_search(needle: &str, product: &Product) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// OR within a facet; an empty selection set is no constraint.
fn matches_facet<T: Copy>(selected: &BTreeSet<T>, matches: impl Fn(T) -> bool) -> bool {
    selected.is_empty() || selected.iter().any(|&option| matches(option))
}

impl Catalog {
    /// Run the filter/sort pipeline.
    ///
    /// Returns the matching products in sort order. No matches is a normal
    /// outcome rendered by the caller as an empty state.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let needle = query.search.trim().to_lowercase();

        let mut results: Vec<&Product> = self
            .products()
            .iter()
            .filter(|product| query.matches(&needle, product))
            .collect();

        results.sort_unstable_by(|a, b| query.sort.compare(a, b));

        debug!(
            matched = results.len(),
            total = self.len(),
            sort = query.sort.as_str(),
            "catalog query"
        );

        results
    }
}
