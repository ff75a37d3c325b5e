//! Browse the demo catalog from the command line.

// Terminal output is this command's whole job.
#![allow(clippy::print_stdout)]

use kirana_shop::catalog::Catalog;
use kirana_shop::catalog::query::{
    Availability, CatalogQuery, CategoryFilter, PriceBracket, RatingThreshold, SortKey,
};

/// Parsed `browse` flags.
#[derive(Debug, Default)]
pub struct BrowseOptions {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: String,
    pub in_stock: bool,
    pub on_sale: bool,
    pub new_arrivals: bool,
    pub rating: Option<u8>,
    pub price: Vec<String>,
}

/// Build a catalog query from the flags.
fn build_query(options: &BrowseOptions) -> Result<CatalogQuery, String> {
    let mut query = CatalogQuery::new();

    if let Some(search) = &options.search {
        query.search.clone_from(search);
    }
    if let Some(category) = &options.category {
        query.category = CategoryFilter::parse(category);
    }
    query.sort = SortKey::parse(&options.sort);

    if options.in_stock {
        query.availability.insert(Availability::InStock);
    }
    if options.on_sale {
        query.availability.insert(Availability::OnSale);
    }
    if options.new_arrivals {
        query.availability.insert(Availability::New);
    }

    match options.rating {
        None => {}
        Some(4) => {
            query.ratings.insert(RatingThreshold::FourAndUp);
        }
        Some(3) => {
            query.ratings.insert(RatingThreshold::ThreeAndUp);
        }
        Some(other) => return Err(format!("unsupported rating threshold: {other} (use 3 or 4)")),
    }

    for id in &options.price {
        let bracket = PriceBracket::parse(id)
            .ok_or_else(|| format!("unknown price bracket: {id}"))?;
        query.price_ranges.insert(bracket);
    }

    Ok(query)
}

/// Run the query pipeline over the demo catalog and print the results.
///
/// # Errors
///
/// Returns an error for an unknown rating threshold or price bracket id.
pub fn run(options: &BrowseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::demo();
    let query = build_query(options)?;
    let results = catalog.query(&query);

    if results.is_empty() {
        println!("No products found");
        println!("Try adjusting your search or filters");
        return Ok(());
    }

    println!(
        "{count} of {total} products ({sort})",
        count = results.len(),
        total = catalog.len(),
        sort = query.sort.label(),
    );
    println!();

    for product in results {
        let mut badges = Vec::new();
        if !product.in_stock {
            badges.push("out of stock");
        }
        if product.is_on_sale {
            badges.push("sale");
        }
        if product.is_new {
            badges.push("new");
        }
        let badges = if badges.is_empty() {
            String::new()
        } else {
            format!("  [{}]", badges.join(", "))
        };

        println!(
            "{name:<28} {price:>10}  {rating}★ ({reviews}){badges}",
            name = product.name,
            price = product.price.to_string(),
            rating = product.rating,
            reviews = product.review_count,
        );
    }

    Ok(())
}
