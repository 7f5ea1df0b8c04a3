//! SmartShelf Client - native entry point
//!
//! Restores the persisted session and cart, then checks the backend by
//! fetching the product categories. Useful for smoke-testing a deployment
//! against the same storage a desktop build would use.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use smartshelf_client::router::HistoryNavigator;
    use smartshelf_client::{AppContext, ClientConfig, LocalStorage};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smartshelf_client=debug")),
        )
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Using API at {}", config.api_base_url);

    let mut ctx = AppContext::new(
        config,
        Arc::new(LocalStorage::new()),
        Arc::new(HistoryNavigator::default()),
    );
    ctx.session.initialize();

    match ctx.session.role_kind() {
        Some(role) => tracing::info!("Signed in as {role}"),
        None => tracing::info!("No stored session"),
    }

    for group in ctx.cart.items_by_store() {
        tracing::info!(
            "Cart @ {} ({}): {} line(s), subtotal {}",
            group.store_name,
            group.store_id,
            group.items.len(),
            group.subtotal()
        );
    }
    tracing::info!(
        "Cart total: {} item(s), {}",
        ctx.cart.total_items(),
        ctx.cart.total_price()
    );

    let checked = ctx.client().get_product_categories().await;
    let categories = match checked {
        Ok(categories) => categories,
        Err(e) => {
            ctx.handle_api_error(&e);
            anyhow::bail!("backend check failed: {}", e.message());
        }
    };
    tracing::info!("Backend reachable; {} product categories", categories.len());

    if ctx.session.is_authenticated() {
        if let Err(e) = ctx.refresh_cart_stock().await {
            tracing::warn!("Could not refresh cart stock: {}", e.message());
        }
        for item in ctx.cart.over_stock_items() {
            tracing::warn!(
                "{} @ {}: {} in cart, {:?} in stock",
                item.product_name,
                item.store_name,
                item.quantity,
                item.stock
            );
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
