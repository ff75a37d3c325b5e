//! Demo catalog data.
//!
//! The shipped app bundles this fixed product list; it stands in for a
//! merchandising backend. Prices are whole rupees.

use std::collections::BTreeSet;

use kirana_core::{Price, ProductId, Rating};

use super::Product;

/// Build one seed entry.
// Flat positional builder keeps the curated rows readable as a table.
#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    price: u32,
    original_price: Option<u32>,
    category: &str,
    tags: &[&str],
    rating: f32,
    review_count: u32,
    in_stock: bool,
    is_on_sale: bool,
    is_new: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::inr(price),
        original_price: original_price.map(Price::inr),
        category: category.to_owned(),
        tags: tags.iter().map(|&t| t.to_owned()).collect::<BTreeSet<_>>(),
        rating: Rating::clamped(rating),
        review_count,
        in_stock,
        is_on_sale,
        is_new,
        image: format!("https://cdn.kirana.app/products/{id}.jpg"),
    }
}

/// The demo product list seeded at app start.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    vec![
        entry(
            "p-001",
            "Wireless Earbuds Pro",
            "True wireless earbuds with active noise cancellation and 24-hour battery.",
            2999,
            Some(3999),
            "Electronics",
            &["audio", "wireless", "bluetooth"],
            4.5,
            1240,
            true,
            true,
            false,
        ),
        entry(
            "p-002",
            "Classic Cotton T-Shirt",
            "Soft 100% cotton crew neck tee, pre-shrunk.",
            499,
            None,
            "Fashion",
            &["cotton", "casual", "summer"],
            4.1,
            862,
            true,
            false,
            false,
        ),
        entry(
            "p-003",
            "Running Shoes Flex",
            "Lightweight running shoes with breathable mesh upper.",
            2499,
            Some(3199),
            "Footwear",
            &["running", "sports", "mesh"],
            4.3,
            2105,
            true,
            true,
            false,
        ),
        entry(
            "p-004",
            "Smart Fitness Band",
            "Heart-rate tracking, sleep insights, and a two-week battery.",
            1799,
            None,
            "Electronics",
            &["fitness", "wearable", "health"],
            3.9,
            640,
            true,
            false,
            true,
        ),
        entry(
            "p-005",
            "Leather Wallet Slim",
            "Handcrafted genuine leather wallet with RFID blocking.",
            899,
            Some(1199),
            "Accessories",
            &["leather", "rfid", "gift"],
            4.6,
            430,
            true,
            true,
            false,
        ),
        entry(
            "p-006",
            "Stainless Steel Water Bottle",
            "Double-walled vacuum insulation keeps drinks cold for 18 hours.",
            649,
            None,
            "Home",
            &["insulated", "eco", "travel"],
            4.2,
            318,
            true,
            false,
            true,
        ),
        entry(
            "p-007",
            "Denim Jacket Vintage",
            "Stonewashed denim jacket with a relaxed fit.",
            1899,
            None,
            "Fashion",
            &["denim", "jacket", "winter"],
            3.8,
            257,
            false,
            false,
            false,
        ),
        entry(
            "p-008",
            "Bluetooth Speaker Mini",
            "Palm-sized wireless speaker with surprisingly big sound.",
            1299,
            Some(1599),
            "Electronics",
            &["audio", "wireless", "portable"],
            4.0,
            980,
            true,
            true,
            false,
        ),
        entry(
            "p-009",
            "Canvas Sneakers",
            "Everyday low-top canvas sneakers in classic white.",
            799,
            None,
            "Footwear",
            &["canvas", "casual", "sneakers"],
            3.6,
            512,
            true,
            false,
            false,
        ),
        entry(
            "p-010",
            "Ceramic Coffee Mug Set",
            "Set of four hand-glazed ceramic mugs, dishwasher safe.",
            449,
            Some(599),
            "Home",
            &["ceramic", "kitchen", "gift"],
            4.4,
            195,
            true,
            true,
            false,
        ),
        entry(
            "p-011",
            "4K Action Camera",
            "Waterproof action camera shooting 4K at 60fps with stabilization.",
            8999,
            None,
            "Electronics",
            &["camera", "4k", "waterproof"],
            4.7,
            1530,
            true,
            false,
            true,
        ),
        entry(
            "p-012",
            "Silk Scarf Printed",
            "Lightweight printed silk scarf, hand-rolled edges.",
            349,
            None,
            "Accessories",
            &["silk", "gift", "summer"],
            3.2,
            88,
            false,
            false,
            true,
        ),
    ]
}
