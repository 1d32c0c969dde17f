//! Plant photo diagnosis.

use std::sync::Arc;

use anyhow::{bail, Result};
use plantit_commerce::cart::CartStore;
use plantit_commerce::checkout::Bill;
use plantit_commerce::diagnosis::{
    Diagnosis, FixedSelector, MockDiagnosisProvider, PlantImage, ScanSession,
};
use serde::Serialize;

use super::ScanArgs;
use crate::context::Context;
use crate::output::{format_bytes, severity_badge};

#[derive(Serialize)]
struct ScanReport<'a> {
    image: &'a PlantImage,
    diagnosis: &'a Diagnosis,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_bill: Option<Bill>,
}

/// Run the scan command.
pub async fn run(args: ScanArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    if !path.is_file() {
        bail!("No such file: {}", path.display());
    }

    let image = PlantImage::from_path(&path, args.mime.as_deref())?;
    let mut provider = MockDiagnosisProvider::new(&ctx.config.scan);
    if let Some(pick) = args.pick.as_deref() {
        let index = resolve_pick(&provider, pick)?;
        provider = provider.with_selector(FixedSelector(index));
    }

    let mut session = ScanSession::new(Arc::new(provider));
    session.select_image(image.clone());

    let spinner = ctx.output.spinner(&format!(
        "Analysing {} ({})",
        image.file_name(),
        format_bytes(image.size_bytes())
    ));
    let analysis = session.analyze().await;
    spinner.finish_and_clear();
    let diagnosis = analysis?.clone();

    let cart_bill = if args.add_products {
        let cart = CartStore::new();
        session.add_all_to_cart(&cart)?;
        Some(Bill::compute(cart.total(), &ctx.config.shipping))
    } else {
        None
    };

    if ctx.output.is_json() {
        ctx.output.json(&ScanReport {
            image: &image,
            diagnosis: &diagnosis,
            cart_bill,
        });
        return Ok(());
    }

    print_diagnosis(ctx, &diagnosis);

    if let Some(bill) = cart_bill {
        ctx.output.title("Cart");
        ctx.output.bill(&bill);
        let added = diagnosis.products.len();
        ctx.output.success(&format!("Added {added} recommended products"));
    }

    Ok(())
}

/// Interpret `--pick` as an index or a condition name.
fn resolve_pick(provider: &MockDiagnosisProvider, pick: &str) -> Result<usize> {
    let count = provider.diagnoses().len();
    if let Ok(index) = pick.parse::<usize>() {
        if index >= count {
            let last = count.saturating_sub(1);
            bail!("--pick index {} out of range (0-{})", index, last);
        }
        return Ok(index);
    }

    match provider.position_of(pick) {
        Some(index) => Ok(index),
        None => {
            let known: Vec<_> = provider
                .diagnoses()
                .iter()
                .map(|d| d.condition.as_str())
                .collect();
            bail!("Unknown condition '{}'. Known: {}", pick, known.join(", "))
        }
    }
}

fn print_diagnosis(ctx: &Context, diagnosis: &Diagnosis) {
    ctx.output.title(&diagnosis.condition);
    ctx.output
        .field("Severity", severity_badge(diagnosis.severity));
    ctx.output.note(&diagnosis.description);
    ctx.output.field("Treatment", &diagnosis.treatment);

    ctx.output.title("Recommended products");
    for product in &diagnosis.products {
        ctx.output.bullet(format_args!(
            "{} {}  {}  ({})",
            product.icon,
            product.name,
            product.price,
            product.id
        ));
    }
}

