//! Database seeding command.
//!
//! Inserts a small sample catalog and, unless `--products-only` is given, a
//! handful of completed demo orders so the analytics pages have data to show.
//! Products are keyed by `product_code`, so re-running the command is safe.

use atelier_noir_core::{OrderStatus, ProductStatus};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use super::CommandError;

/// A product row to seed.
struct SeedProduct {
    name: &'static str,
    subtitle: &'static str,
    description: &'static str,
    price_eur: Decimal,
    price_usd: Decimal,
    category: &'static str,
    materials: &'static [&'static str],
    essences: &'static [&'static str],
    product_code: &'static str,
    quantity_total: i32,
    status: ProductStatus,
}

/// The sample catalog.
fn sample_products() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Noir Essentiel",
            subtitle: "Signature eau de parfum",
            description: "A dark floral built around iris and smoked cedar.",
            price_eur: Decimal::new(14500, 2),
            price_usd: Decimal::new(15900, 2),
            category: "fragrance",
            materials: &["glass", "oak cap"],
            essences: &["iris", "cedar", "black pepper"],
            product_code: "AN-FR-001",
            quantity_total: 120,
            status: ProductStatus::Active,
        },
        SeedProduct {
            name: "Manteau Minuit",
            subtitle: "Wool overcoat",
            description: "Double-faced merino wool, hand-finished seams.",
            price_eur: Decimal::new(89000, 2),
            price_usd: Decimal::new(98000, 2),
            category: "outerwear",
            materials: &["merino wool", "horn buttons"],
            essences: &[],
            product_code: "AN-OW-001",
            quantity_total: 24,
            status: ProductStatus::Active,
        },
        SeedProduct {
            name: "Écharpe Brume",
            subtitle: "Cashmere scarf",
            description: "Featherweight cashmere in smoke grey.",
            price_eur: Decimal::new(19500, 2),
            price_usd: Decimal::new(21500, 2),
            category: "accessories",
            materials: &["cashmere"],
            essences: &[],
            product_code: "AN-AC-001",
            quantity_total: 60,
            status: ProductStatus::PreOrder,
        },
        SeedProduct {
            name: "Bougie Atelier",
            subtitle: "Scented candle",
            description: "Vetiver and burnt amber, poured in matte ceramic.",
            price_eur: Decimal::new(6500, 2),
            price_usd: Decimal::new(7200, 2),
            category: "home",
            materials: &["soy wax", "ceramic"],
            essences: &["vetiver", "amber"],
            product_code: "AN-HO-001",
            quantity_total: 0,
            status: ProductStatus::OutOfStock,
        },
    ]
}

/// Seed the database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or an insert fails.
pub async fn run(products_only: bool) -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let inserted = seed_products(&pool).await?;
    info!("Seeded {inserted} products");

    if products_only {
        return Ok(());
    }

    let orders = seed_demo_orders(&pool).await?;
    info!("Seeded {orders} demo orders");

    Ok(())
}

/// Insert the sample catalog, skipping codes that already exist.
async fn seed_products(pool: &PgPool) -> Result<u64, CommandError> {
    let mut inserted = 0;

    for product in sample_products() {
        let materials: Vec<String> = product.materials.iter().map(ToString::to_string).collect();
        let essences: Vec<String> = product.essences.iter().map(ToString::to_string).collect();

        let result = sqlx::query(
            r"
            INSERT INTO products (
                name, subtitle, description, price_eur, price_usd, images,
                category, materials, essences, product_code,
                quantity_available, quantity_total, status
            )
            VALUES ($1, $2, $3, $4, $5, '{}', $6, $7, $8, $9, $10, $10, $11)
            ON CONFLICT (product_code) DO NOTHING
            ",
        )
        .bind(product.name)
        .bind(product.subtitle)
        .bind(product.description)
        .bind(product.price_eur)
        .bind(product.price_usd)
        .bind(product.category)
        .bind(&materials)
        .bind(&essences)
        .bind(product.product_code)
        .bind(product.quantity_total)
        .bind(product.status)
        .execute(pool)
        .await?;

        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// Insert a few completed orders spread over recent weeks.
async fn seed_demo_orders(pool: &PgPool) -> Result<u64, CommandError> {
    // (product name, quantity, unit price, days ago)
    let demo_orders: &[(&str, i32, Decimal, i32)] = &[
        ("Noir Essentiel", 2, Decimal::new(14500, 2), 3),
        ("Manteau Minuit", 1, Decimal::new(89000, 2), 8),
        ("Noir Essentiel", 1, Decimal::new(14500, 2), 15),
        ("Écharpe Brume", 3, Decimal::new(19500, 2), 21),
    ];

    let mut created = 0;

    for (product_name, quantity, unit_price, days_ago) in demo_orders {
        let order_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO orders (status, created_at)
            VALUES ($1, NOW() - make_interval(days => $2))
            RETURNING id
            ",
        )
        .bind(OrderStatus::Completed)
        .bind(days_ago)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_name, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(order_id)
        .bind(product_name)
        .bind(quantity)
        .bind(unit_price)
        .execute(pool)
        .await?;

        created += 1;
    }

    Ok(created)
}
