//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use detail_commerce::catalog::{arrange, Product, ProductFilter, SortOption};
use detail_commerce::{CategoryId, ProductId};
use detail_gateway::{GatewayError, ProductScope};
use serde_json::json;

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{format_rating, stock_badge, truncate};

/// List products in a scope, sorted and filtered.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let sort = SortOption::from_str(&args.sort)
        .ok_or_else(|| anyhow!("Unknown sort order: {}", args.sort))?;
    let filter = ProductFilter::from_str(&args.filter)
        .ok_or_else(|| anyhow!("Unknown filter: {}", args.filter))?;
    let scope = match (args.category, args.category_id) {
        (Some(name), _) => ProductScope::CategoryName(name),
        (None, Some(id)) => ProductScope::CategoryId(CategoryId::new(id)),
        (None, None) => ProductScope::All,
    };

    let spinner = ctx.output.spinner(&format!("Loading products ({})", scope));
    let result = ctx.gateway.fetch_products(scope.clone()).await;
    spinner.finish_and_clear();
    let fetched = result.map_err(|e| signed_out(e, ctx))?;
    let products = arrange(fetched.data, filter, sort);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "scope": scope.to_string(),
            "source": fetched.source,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Products: {} ({})", scope, sort.display_name()));
    if products.is_empty() {
        ctx.output.info("No products found");
    } else {
        let widths = [4, 32, 14, 12, 14];
        ctx.output.table_row(&["ID", "NAME", "PRICE", "RATING", "STOCK"], &widths);
        for product in &products {
            let price = product.price.display();
            let rating = format_rating(product.rating);
            let badge = stock_badge(product.in_stock);
            let name = truncate(&product.name, 32);
            ctx.output.table_row(
                &[product.id.as_str(), &name, &price, &rating, &badge],
                &widths,
            );
        }
    }
    ctx.output.source_note(&fetched.source);

    Ok(())
}

/// Show one product in full.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Loading product");
    let result = ctx.gateway.fetch_product(&id).await;
    spinner.finish_and_clear();
    let fetched = result.map_err(|e| signed_out(e, ctx))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": fetched.source,
            "product": fetched.data,
        }));
        return Ok(());
    }

    print_product(&fetched.data, ctx);
    ctx.output.source_note(&fetched.source);
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    if let Some(original) = product.original_price.filter(|_| product.is_on_sale()) {
        ctx.output.kv("Was", &original.display());
    }
    ctx.output.kv("Stock", &stock_badge(product.in_stock));
    if let Some(category) = &product.category {
        ctx.output.kv("Category", &category.name);
    }
    ctx.output.kv(
        "Rating",
        &format!("{} ({} reviews)", format_rating(product.rating), product.reviews),
    );
    ctx.output.kv("Image", &product.image.to_string());

    ctx.output.info("");
    ctx.output.info(product.detailed_description.as_deref().unwrap_or(&product.description));

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }
    if !product.specifications.is_empty() {
        ctx.output.header("Specifications");
        for spec in &product.specifications {
            ctx.output.kv(&spec.name, &spec.value);
        }
    }
    if !product.benefits.is_empty() {
        ctx.output.header("Benefits");
        for benefit in &product.benefits {
            ctx.output.list_item(benefit);
        }
    }
    if let Some(usage) = &product.usage {
        ctx.output.header("How to use");
        ctx.output.info(usage);
    }
}

/// List categories with their items.
pub async fn categories(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading categories");
    let result = ctx.gateway.fetch_categories().await;
    spinner.finish_and_clear();
    let fetched = result.map_err(|e| signed_out(e, ctx))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": fetched.source,
            "categories": fetched.data,
        }));
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &fetched.data {
        ctx.output.info("");
        ctx.output.info(&format!("{} ({})", category.name, category.id));
        ctx.output.kv("About", &category.description);
        ctx.output.kv("Image", category.image());
        for item in &category.items {
            ctx.output.list_item(item);
        }
    }
    ctx.output.source_note(&fetched.source);
    Ok(())
}

/// Turn a gateway error into a message, pointing at `detail login` when
/// the session was rejected.
pub(crate) fn signed_out(error: GatewayError, ctx: &Context) -> anyhow::Error {
    if error == GatewayError::Unauthorized {
        ctx.output.warn("Your session has expired. Run `detail login` to sign in again.");
    }
    error.into()
}
