//! Catalog listing.

use anyhow::Result;
use plantit_commerce::catalog::{
    CatalogProvider, CatalogQuery, ProductCategory, SortOption, StaticCatalog,
};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    let catalog = StaticCatalog::builtin();
    let products = catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    let title = match query.category {
        Some(category) => format!("{} products", category.display_name()),
        None => "All products".to_string(),
    };
    ctx.output.title(&title);

    if products.is_empty() {
        ctx.output.note("No products match.");
        return Ok(());
    }

    ctx.output.product_header();
    for product in &products {
        ctx.output.product_row(product);
    }

    let summary = format!("{} of {} products", products.len(), catalog.len());
    ctx.output.note(&summary);
    Ok(())
}

fn build_query(args: &CatalogArgs) -> Result<CatalogQuery> {
    let mut query = CatalogQuery::new().sort(args.sort.parse::<SortOption>()?);

    if let Some(category) = args.category.as_deref() {
        if !category.eq_ignore_ascii_case("all") {
            query = query.category(category.parse::<ProductCategory>()?);
        }
    }
    if let Some(term) = args.search.as_deref() {
        query = query.search(term);
    }

    Ok(query)
}
