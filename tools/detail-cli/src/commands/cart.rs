//! Cart commands.

use anyhow::{bail, Result};
use detail_commerce::cart::{CartProduct, CartSnapshot};
use detail_commerce::ProductId;
use dialoguer::Confirm;

use super::{CartArgs, CartCommand};
use crate::commands::products::signed_out;
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Add { id } => add_item(&id, ctx).await,
        CartCommand::Update { id, quantity } => update_item(&id, quantity, ctx),
        CartCommand::Remove { id } => remove_item(&id, ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let snapshot = ctx.cart.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    ctx.output.header("Cart");
    if snapshot.items.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [4, 32, 12, 5, 14];
    ctx.output.table_row(&["ID", "ITEM", "UNIT", "QTY", "TOTAL"], &widths);
    for item in &snapshot.items {
        let title = truncate(&item.title, 32);
        let unit = item.unit_price.display();
        let quantity = item.quantity.to_string();
        let total = item
            .line_total()
            .map(|m| m.display())
            .unwrap_or_else(|_| "-".to_string());
        ctx.output.table_row(
            &[item.id.as_str(), &title, &unit, &quantity, &total],
            &widths,
        );
    }
    print_totals(&snapshot, ctx);
    Ok(())
}

fn print_totals(snapshot: &CartSnapshot, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv("Items", &snapshot.total_item_count.to_string());
    match snapshot.total_price {
        Some(total) => ctx.output.kv("Total", &total.display()),
        None => ctx.output.warn("Cart total is too large to show"),
    }
}

async fn add_item(id: &str, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id);

    let spinner = ctx.output.spinner("Looking up product");
    let result = ctx.gateway.fetch_product(&id).await;
    spinner.finish_and_clear();
    let fetched = result.map_err(|e| signed_out(e, ctx))?;

    let product = fetched.data;
    if !product.in_stock {
        bail!("{} is out of stock", product.name);
    }

    let quantity = ctx.cart.add_item(CartProduct::from(&product))?;
    tracing::debug!(product_id = %product.id, quantity, "added to cart");
    if ctx.output.is_json() {
        ctx.output.json(&ctx.cart.snapshot());
        return Ok(());
    }
    ctx.output.success(&format!(
        "Added {} to cart (quantity {})",
        product.name, quantity
    ));
    ctx.output.source_note(&fetched.source);
    Ok(())
}

fn update_item(id: &str, quantity: u32, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id);
    let changed = ctx.cart.update_quantity(&id, quantity);

    if ctx.output.is_json() {
        ctx.output.json(&ctx.cart.snapshot());
    } else if !changed {
        ctx.output.info(&format!("Product {} is not in the cart", id));
    } else if quantity == 0 {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output.success(&format!("Set quantity of {} to {}", id, quantity));
    }
    Ok(())
}

fn remove_item(id: &str, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id);
    let removed = ctx.cart.remove_item(&id);

    if ctx.output.is_json() {
        ctx.output.json(&ctx.cart.snapshot());
    } else if !removed {
        ctx.output.info(&format!("Product {} is not in the cart", id));
    } else {
        ctx.output.success(&format!("Removed {} from cart", id));
    }
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    if ctx.cart.snapshot().items.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    ctx.cart.clear();
    if ctx.output.is_json() {
        ctx.output.json(&ctx.cart.snapshot());
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_context;
    use detail_commerce::{Currency, Money};

    fn wax() -> CartProduct {
        CartProduct::new(10u64, "Carnauba Wax", Money::new(459_900, Currency::INR))
    }

    #[test]
    fn test_unknown_id_leaves_cart_unchanged() {
        let (ctx, dir) = test_context("cart-unknown");
        ctx.cart.add_item(wax()).unwrap();

        update_item("99", 3, &ctx).unwrap();
        remove_item("99", &ctx).unwrap();

        let snapshot = ctx.cart.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_item_count, 1);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_update_to_zero_removes() {
        let (ctx, dir) = test_context("cart-zero");
        ctx.cart.add_item(wax()).unwrap();

        update_item("10", 0, &ctx).unwrap();

        assert!(ctx.cart.snapshot().items.is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
