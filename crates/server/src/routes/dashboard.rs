//! Server-rendered admin back-office pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    db::{
        OrderRepository, ProductRepository, SubscriberRepository,
        orders::{RevenueInterval, RevenuePoint, TopProduct},
    },
    filters,
    middleware::RequireAdmin,
    models::{OrderSummary, Product, Subscriber},
    state::AppState,
};

/// How many orders the orders page shows.
const RECENT_ORDERS_LIMIT: i64 = 50;

/// How many best-sellers the analytics page shows.
const TOP_PRODUCTS_LIMIT: i64 = 5;

/// Headline metrics shown on the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub products: String,
    pub subscribers: String,
    pub orders: String,
    pub revenue: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            products: "0".to_string(),
            subscribers: "0".to_string(),
            orders: "0".to_string(),
            revenue: "\u{20ac}0.00".to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub metrics: DashboardMetrics,
}

/// Product row for the inventory page.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub name: String,
    pub product_code: String,
    pub category: String,
    pub status: String,
    pub price_eur: Decimal,
    pub quantity_available: i32,
    pub quantity_total: i32,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            product_code: product.product_code.clone(),
            category: product.category.clone(),
            status: product.status.to_string(),
            price_eur: product.price_eur,
            quantity_available: product.quantity_available,
            quantity_total: product.quantity_total,
        }
    }
}

/// Inventory template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/inventory.html")]
pub struct InventoryTemplate {
    pub current_path: String,
    pub products: Vec<ProductRowView>,
}

/// Order row for the orders page.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub status: String,
    pub placed_at: String,
    pub item_count: i64,
    pub total: String,
}

impl From<&OrderSummary> for OrderRowView {
    fn from(order: &OrderSummary) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.to_string(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            item_count: order.item_count,
            total: filters::format_euros(order.total),
        }
    }
}

/// Orders template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct OrdersTemplate {
    pub current_path: String,
    pub orders: Vec<OrderRowView>,
}

/// Revenue bucket row for the analytics page.
#[derive(Debug, Clone)]
pub struct RevenueRowView {
    pub bucket: String,
    pub revenue: String,
    pub orders: i64,
}

impl From<&RevenuePoint> for RevenueRowView {
    fn from(point: &RevenuePoint) -> Self {
        Self {
            bucket: point.bucket.format("%Y-%m-%d").to_string(),
            revenue: filters::format_euros(point.revenue),
            orders: point.orders,
        }
    }
}

/// Best-seller row for the analytics page.
#[derive(Debug, Clone)]
pub struct TopProductView {
    pub product_name: String,
    pub units_sold: i64,
    pub revenue: String,
}

impl From<&TopProduct> for TopProductView {
    fn from(top: &TopProduct) -> Self {
        Self {
            product_name: top.product_name.clone(),
            units_sold: top.units_sold,
            revenue: filters::format_euros(top.revenue),
        }
    }
}

/// Analytics template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/analytics.html")]
pub struct AnalyticsTemplate {
    pub current_path: String,
    pub bucket: String,
    pub revenue: Vec<RevenueRowView>,
    pub top_products: Vec<TopProductView>,
}

/// Subscriber row for the newsletter page.
#[derive(Debug, Clone)]
pub struct SubscriberView {
    pub email: String,
    pub status: String,
    pub subscribed_at: String,
}

impl From<&Subscriber> for SubscriberView {
    fn from(subscriber: &Subscriber) -> Self {
        Self {
            email: subscriber.email.to_string(),
            status: subscriber.status.to_string(),
            subscribed_at: subscriber.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Newsletter template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/newsletter.html")]
pub struct NewsletterTemplate {
    pub current_path: String,
    pub total: i64,
    pub subscribers: Vec<SubscriberView>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginPageTemplate;

/// Render the login page.
///
/// GET /admin/login
pub async fn login_page() -> LoginPageTemplate {
    LoginPageTemplate
}

/// Dashboard page with headline store metrics.
///
/// GET /admin
#[instrument(skip(state))]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> DashboardTemplate {
    let pool = state.pool();
    let products = ProductRepository::new(pool);
    let subscribers = SubscriberRepository::new(pool);
    let orders = OrderRepository::new(pool);

    let (product_count, subscriber_count, totals) = tokio::join!(
        products.count(),
        subscribers.count(),
        orders.completed_totals(),
    );

    let mut metrics = DashboardMetrics::default();
    match product_count {
        Ok(count) => metrics.products = count.to_string(),
        Err(e) => tracing::error!("Failed to count products: {e}"),
    }
    match subscriber_count {
        Ok(count) => metrics.subscribers = count.to_string(),
        Err(e) => tracing::error!("Failed to count subscribers: {e}"),
    }
    match totals {
        Ok(totals) => {
            metrics.orders = totals.orders.to_string();
            metrics.revenue = filters::format_euros(totals.revenue);
        }
        Err(e) => tracing::error!("Failed to fetch order totals: {e}"),
    }

    DashboardTemplate {
        current_path: "/admin".to_string(),
        metrics,
    }
}

/// Inventory page listing every product with stock levels.
///
/// GET /admin/inventory
#[instrument(skip(state))]
pub async fn inventory_page(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> InventoryTemplate {
    let repo = ProductRepository::new(state.pool());
    let products = match repo.list_all().await {
        Ok(products) => products.iter().map(ProductRowView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            vec![]
        }
    };

    InventoryTemplate {
        current_path: "/admin/inventory".to_string(),
        products,
    }
}

/// Recent orders page.
///
/// GET /admin/orders
#[instrument(skip(state))]
pub async fn orders_page(_admin: RequireAdmin, State(state): State<AppState>) -> OrdersTemplate {
    let repo = OrderRepository::new(state.pool());
    let orders = match repo.recent(RECENT_ORDERS_LIMIT).await {
        Ok(orders) => orders.iter().map(OrderRowView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            vec![]
        }
    };

    OrdersTemplate {
        current_path: "/admin/orders".to_string(),
        orders,
    }
}

/// Query parameters for the analytics page.
#[derive(Debug, Deserialize)]
pub struct AnalyticsPageQuery {
    pub bucket: Option<String>,
}

/// Analytics page with revenue buckets and best sellers.
///
/// GET /admin/analytics?bucket=day|week|month
#[instrument(skip(state))]
pub async fn analytics_page(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsPageQuery>,
) -> AnalyticsTemplate {
    let interval = query
        .bucket
        .as_deref()
        .and_then(|raw| raw.parse::<RevenueInterval>().ok())
        .unwrap_or(RevenueInterval::Day);

    let repo = OrderRepository::new(state.pool());
    let (revenue_result, top_result) = tokio::join!(
        repo.revenue(interval),
        repo.top_products(TOP_PRODUCTS_LIMIT),
    );

    let revenue = match revenue_result {
        Ok(points) => points.iter().map(RevenueRowView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch revenue: {e}");
            vec![]
        }
    };
    let top_products = match top_result {
        Ok(tops) => tops.iter().map(TopProductView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch top products: {e}");
            vec![]
        }
    };

    AnalyticsTemplate {
        current_path: "/admin/analytics".to_string(),
        bucket: interval.as_str().to_string(),
        revenue,
        top_products,
    }
}

/// Newsletter page listing subscribers.
///
/// GET /admin/newsletter
#[instrument(skip(state))]
pub async fn newsletter_page(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> NewsletterTemplate {
    let repo = SubscriberRepository::new(state.pool());
    let (list_result, count_result) = tokio::join!(repo.list(), repo.count());

    let subscribers: Vec<SubscriberView> = match list_result {
        Ok(subscribers) => subscribers.iter().map(SubscriberView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch subscribers: {e}");
            vec![]
        }
    };
    let total = match count_result {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count subscribers: {e}");
            i64::try_from(subscribers.len()).unwrap_or(0)
        }
    };

    NewsletterTemplate {
        current_path: "/admin/newsletter".to_string(),
        total,
        subscribers,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_order_row_view_renders_euro_total() {
        let order = OrderSummary {
            id: atelier_noir_core::OrderId::new(7),
            status: atelier_noir_core::OrderStatus::Completed,
            created_at: chrono::Utc::now(),
            item_count: 2,
            total: Decimal::new(25900, 2),
        };
        let row = OrderRowView::from(&order);
        assert_eq!(row.total, "\u{20ac}259.00");
    }

    #[test]
    fn test_default_metrics_are_zeroed() {
        let metrics = DashboardMetrics::default();
        assert_eq!(metrics.products, "0");
        assert_eq!(metrics.revenue, "\u{20ac}0.00");
    }
}
