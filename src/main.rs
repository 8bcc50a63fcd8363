use printshop::config::StoreConfig;
use printshop::fixtures;
use printshop::pricing::QUICK_QUANTITIES;
use printshop::services::{cart, product, template};
use studio::engine::PlacementEngine;
use studio::geom::Point;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = StoreConfig::from_env().expect("invalid store configuration");
    let state = fixtures::seed_state(config).expect("fixture load failed");

    let catalog = product::list_products(&state).await;
    tracing::info!(products = catalog.len(), "catalog loaded");

    for item in &catalog {
        for quantity in std::iter::once(1).chain(QUICK_QUANTITIES) {
            match product::bulk_pricing(&state, item.id, quantity).await {
                Ok(quote) => {
                    let d = quote.summary.display();
                    tracing::info!(
                        product = %item.name,
                        quantity,
                        discount_percent = d.discount_percent,
                        unit_price = d.unit_price,
                        total_price = d.total_price,
                        savings = d.savings,
                        "bulk quote"
                    );
                }
                Err(e) => tracing::warn!(product_id = item.id, error = %e, "bulk quote failed"),
            }
        }
    }

    // Walk one design through the studio and into the cart.
    let Some(first_template) = template::list_templates(&state).await.into_iter().next() else {
        tracing::warn!("no templates to demo");
        return;
    };
    let Some(first_product) = catalog.first() else {
        return;
    };

    let mut engine = PlacementEngine::with_canvas(state.config.canvas);
    let placement = engine.load_design(first_template.descriptor());
    let grab = Point::new(placement.position.x + 10.0, placement.position.y + 10.0);
    engine.on_pointer_down(grab);
    engine.on_pointer_move(Point::new(grab.x - 60.0, grab.y + 500.0));
    engine.on_pointer_up(Point::new(grab.x - 60.0, grab.y + 500.0));
    tracing::info!(placement = ?engine.placement(), "design placed");

    let options = cart::LineOptions {
        product_id: first_product.id,
        color: first_product.colors.first().cloned().unwrap_or_default(),
        size: first_product.sizes.first().cloned().unwrap_or_default(),
        quantity: 25,
    };
    tracing::info!(
        color = %options.color,
        filter = ?studio::mockup::mockup_filter(&options.color),
        "mockup tint"
    );
    match cart::add_design_to_cart(&state, engine.design(), options).await {
        Ok(item) => {
            let total = cart::cart_total(&state).await;
            tracing::info!(cart_item_id = item.id, unit_price = item.unit_price, total, "cart updated");
        }
        Err(e) => tracing::warn!(error = %e, "add to cart failed"),
    }
}
