//! Nursery partner registration.

use anyhow::{Context as _, Result};
use plantit_commerce::nursery::{NurseryApplication, NurseryRegistrar};

use super::NurseryArgs;
use crate::context::Context;

/// Run the nursery command.
pub async fn run(args: NurseryArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.application);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let application: NurseryApplication = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    let registrar = NurseryRegistrar::new(&ctx.config.nursery);
    let spinner = ctx.output.spinner(&format!("Submitting {}", application.nursery_name));
    let submitted = registrar.submit(&application).await;
    spinner.finish_and_clear();

    let receipt = match submitted {
        Ok(receipt) => receipt,
        Err(err) => {
            if let Some(errors) = err.validation_errors() {
                ctx.output.title("Application incomplete");
                for field in errors.iter() {
                    ctx.output
                        .bullet(format_args!("{} {}", field.field, field.message));
                }
            }
            return Err(err.into());
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success("Registration Submitted!");
    ctx.output.field("Application", &receipt.id);
    ctx.output.field("Nursery", &receipt.nursery_name);
    ctx.output.note(&format!(
        "We will review it within {} and contact you at {}.",
        receipt.review_window, receipt.contact_email
    ));

    ctx.output.title("What happens next?");
    for (i, step) in receipt.next_steps.iter().enumerate() {
        ctx.output.bullet(format_args!("{}. {}", i + 1, step));
    }

    Ok(())
}
