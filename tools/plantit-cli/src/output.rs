//! Terminal rendering for storefront objects.
//!
//! Everything human-readable is suppressed in `--json` mode; commands emit a
//! single JSON document through [`Output::json`] instead.

use std::fmt::Display;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use plantit_commerce::catalog::Product;
use plantit_commerce::checkout::{Bill, CheckoutStep};
use plantit_commerce::diagnosis::Severity;
use plantit_commerce::support::{ChatMessage, Sender};
use plantit_commerce::Money;

/// Column widths of the catalog table: id, name, price, stock.
const PRODUCT_COLUMNS: [usize; 4] = [22, 30, 8, 12];

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn line(&self, text: impl Display) {
        if !self.json {
            println!("{}", text);
        }
    }

    pub fn note(&self, msg: &str) {
        self.line(format_args!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.line(format_args!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors go to stderr in both modes.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn title(&self, msg: &str) {
        self.line(format_args!("\n{}", style(msg).bold().underlined()));
    }

    pub fn field(&self, label: &str, value: impl Display) {
        self.line(format_args!("  {}: {}", style(label).dim(), value));
    }

    pub fn bullet(&self, item: impl Display) {
        self.line(format_args!("  {} {}", style("•").dim(), item));
    }

    /// Progress marker for a checkout step. The confirmation step sits
    /// outside the numbered steps and gets a title instead.
    pub fn checkout_step(&self, step: CheckoutStep, progress: (u8, u8)) {
        match step_counter(step, progress) {
            Some(counter) => {
                let name = step.display_name();
                self.line(format_args!("{} {}", style(counter).dim(), name))
            }
            None => self.title(step.display_name()),
        }
    }

    pub fn line_item(&self, name: &str, quantity: i64, amount: Money) {
        let amount = style(amount).bold();
        self.line(format_args!("  {} x{}  {}", name, quantity, amount));
    }

    /// Subtotal, shipping and total, with free shipping called out.
    pub fn bill(&self, bill: &Bill) {
        self.field("Subtotal", bill.subtotal);
        if bill.has_free_shipping() {
            self.field("Shipping", style(bill.shipping_label()).green());
        } else {
            self.field("Shipping", bill.shipping_label());
        }
        self.field("Total", style(bill.total).bold());
    }

    pub fn product_header(&self) {
        self.row(&["ID", "NAME", "PRICE", "STOCK"]);
    }

    pub fn product_row(&self, product: &Product) {
        let name = format!("{} {}", product.icon, product.name);
        let price = product.price.display();
        let stock = stock_badge(product.in_stock);
        self.row(&[
            product.id.as_str(),
            name.as_str(),
            price.as_str(),
            stock.as_str(),
        ]);
    }

    fn row(&self, cells: &[&str; 4]) {
        let padded: Vec<String> = cells
            .iter()
            .zip(PRODUCT_COLUMNS)
            .map(|(cell, width)| format!("{:width$}", cell, width = width))
            .collect();
        self.line(format_args!("  {}", padded.join("  ")));
    }

    pub fn chat_message(&self, message: &ChatMessage) {
        let who = match message.sender {
            Sender::User => style("you").green().bold(),
            Sender::Support => style(message.channel.display_name()).cyan().bold(),
        };
        self.line(format_args!("  {} {}", who, message.text));
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Spinner shown while a simulated delay elapses; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        let template = "{spinner:.green} {msg}";
        if let Ok(spinner) = ProgressStyle::default_spinner().template(template) {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// `[n/N]` for the numbered steps; `None` once the order is confirmed.
fn step_counter(step: CheckoutStep, (current, total): (u8, u8)) -> Option<String> {
    if step.is_terminal() {
        None
    } else {
        Some(format!("[{}/{}]", current, total))
    }
}

pub fn severity_badge(severity: Severity) -> String {
    let label = severity.as_str();
    match severity {
        Severity::Healthy => style(label).green().to_string(),
        Severity::Mild => style(label).yellow().to_string(),
        Severity::Moderate => style(label).color256(208).to_string(),
        Severity::Severe => style(label).red().to_string(),
    }
}

pub fn stock_badge(in_stock: bool) -> String {
    if in_stock {
        style("in stock").green().to_string()
    } else {
        style("out of stock").dim().to_string()
    }
}

/// Image size for the scan spinner.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[test]
    fn test_step_counter_skips_confirmation() {
        assert_eq!(
            step_counter(CheckoutStep::Shipping, (2, 3)).as_deref(),
            Some("[2/3]")
        );
        assert_eq!(
            step_counter(CheckoutStep::Payment, (3, 3)).as_deref(),
            Some("[3/3]")
        );
        assert_eq!(step_counter(CheckoutStep::Confirmation, (3, 3)), None);
    }

    #[test]
    fn test_stock_badge_text() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(true), "in stock");
        assert_eq!(stock_badge(false), "out of stock");
    }
}
