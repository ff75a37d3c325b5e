//! Scripted end-to-end demo session.
//!
//! Drives a full app session against the in-process services: OTP sign-in,
//! browsing, cart building, checkout, and logout. The OTP code is printed
//! because the mock has no delivery channel.

// Terminal output is this command's whole job.
#![allow(clippy::print_stdout)]

use kirana_shop::catalog::query::{CatalogQuery, SortKey};
use kirana_shop::checkout::price_cart;
use kirana_shop::services::auth::ContactKind;
use kirana_shop::state::App;

/// Run the demo session.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a flow step fails;
/// neither should happen with the defaults.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_env()?;

    // Sign in with an emailed OTP. The mock hands the code back to us.
    let contact = "demo@example.com";
    println!("Requesting OTP for {contact} ...");
    let challenge = app.auth().generate_otp(contact, ContactKind::Email).await?;
    println!("  {} (code: {})", challenge.message, challenge.code);

    let verification = app
        .auth()
        .verify_otp(challenge.code.as_str(), &challenge)
        .await;
    println!("  {}", verification.message);

    let user = app.auth().login_user(contact, ContactKind::Email).await?;
    println!("Signed in as {} <{}>", user.name, user.contact_display());
    app.login(user);
    println!();

    // Browse the most popular products.
    let mut query = CatalogQuery::new();
    query.sort = SortKey::Popularity;
    let picks: Vec<_> = app
        .browse(&query)
        .into_iter()
        .take(2)
        .map(|product| (product.id.clone(), product.name.clone(), product.price))
        .collect();

    // Fill the cart.
    for (id, name, price) in &picks {
        app.add_to_cart(id, 1)?;
        println!("Added to cart: {name} ({price})");
    }

    let totals = price_cart(
        app.session().cart(),
        app.catalog(),
        &app.config().pricing,
    );
    println!();
    println!("Order Summary");
    println!("  Subtotal  ₹{:.2}", totals.subtotal);
    println!("  Tax       ₹{:.2}", totals.tax);
    println!("  Total     ₹{:.2}", totals.total);

    // Check out; the cart empties on confirmation.
    let order = app.checkout()?;
    println!();
    println!(
        "Order {} placed for ₹{:.2} ({} items)",
        order.id,
        order.totals.total,
        order.lines.len()
    );

    app.logout();
    println!("Signed out; cart is empty: {}", app.session().cart().is_empty());

    Ok(())
}
