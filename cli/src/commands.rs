use salesdash_core::{
    AppConfigExt, DashboardViews, InputEvent, KpiTripleExt, RegionSet, format_amount,
    format_currency, format_number,
};
use std::io::Write;

use crate::CliContext;

pub async fn list_regions(ctx: &CliContext) {
    let dispatcher = ctx.dispatcher.read().await;
    let selected = dispatcher.filter().regions();

    for region in dispatcher.dataset().distinct_regions() {
        let marker = if selected.contains(region) { "x" } else { " " };
        println!("[{marker}] {region}");
    }
    println!("\nMode: {}", dispatcher.filter().mode());
}

/// Route one control-surface event through the dispatcher and render whatever
/// it emits.
pub async fn apply(ctx: &CliContext, event: InputEvent) {
    let update = ctx.dispatcher.write().await.dispatch(event);

    if update.is_empty() {
        println!("No change");
        return;
    }
    if let Some(regions) = &update.regions {
        println!("Regions: {}", join_regions(regions));
    }
    if let Some(views) = update.views {
        print_views(&views);
        *ctx.views.write().await = views;
    }
}

pub async fn show(ctx: &CliContext) {
    {
        let dispatcher = ctx.dispatcher.read().await;
        let filter = dispatcher.filter();
        println!(
            "Regions: {}  |  Mode: {}",
            join_regions(filter.regions()),
            filter.mode()
        );
    }
    print_views(&*ctx.views.read().await);
}

pub async fn export(ctx: &CliContext, path: &str) -> Result<(), String> {
    let document = {
        let dispatcher = ctx.dispatcher.read().await;
        let views = ctx.views.read().await;
        serde_json::json!({
            "regions": dispatcher.filter().regions(),
            "mode": dispatcher.filter().mode(),
            "kpi_display": views.kpis.display(),
            "views": &*views,
        })
    };

    let json = serde_json::to_string_pretty(&document).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| format!("failed to write {path}: {e}"))?;

    tracing::info!(path, "Exported dashboard views");
    println!("Exported views to {path}");
    Ok(())
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match salesdash_core::AppConfig::config_path() {
        Ok(path) => println!("Config file:  {}", path.display()),
        Err(e) => println!("Config file:  unavailable ({e})"),
    }
    println!("Data path:    {}", config.data_path);
    println!("Date format:  {}", config.date_format);
    println!("Default mode: {}", config.default_mode);
}

pub async fn save_config(ctx: &CliContext) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    config.default_mode = ctx.dispatcher.read().await.filter().mode();
    config.save().map_err(|e| e.to_string())?;
    println!("Saved configuration (default mode: {})", config.default_mode);
    Ok(())
}

pub fn exit() {
    let mut out = std::io::stdout();
    let _ = write!(out, "quitting...");
    let _ = out.flush();
}

// ─────────────────────────────────────────────────────────────────────────────
// Text rendering
// ─────────────────────────────────────────────────────────────────────────────

fn join_regions(regions: &RegionSet) -> String {
    if regions.is_empty() {
        return "(none)".to_string();
    }
    regions.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn print_views(views: &DashboardViews) {
    let kpis = views.kpis.display();
    println!();
    println!(
        "Total Revenue: {}   Average Units / Order: {}   Orders (Rows): {}",
        kpis.total_revenue, kpis.mean_units, kpis.row_count
    );

    let series = &views.time_series;
    println!("\n{}", series.labels.title);
    if series.is_empty() {
        println!("  (no data)");
    }
    for row in &series.rows {
        let group = row.group.as_deref().unwrap_or("");
        println!(
            "  {:<12} {:<16} {:>14}",
            row.date,
            group,
            format_currency(row.revenue)
        );
    }

    let summary = &views.product_summary;
    println!("\n{}", summary.labels.title);
    if summary.is_empty() {
        println!("  (no data)");
    }
    for row in &summary.rows {
        println!("  {:<20} {:>10}", row.product, format_number(row.mean_units));
    }

    let matrix = &views.matrix;
    println!("\n{}", matrix.labels.title);
    print!("  {:<12}", "");
    for product in &matrix.products {
        print!(" {:>12}", product);
    }
    println!();
    for (region, values) in matrix.regions.iter().zip(&matrix.values) {
        print!("  {:<12}", region);
        for value in values {
            print!(" {:>12}", format_amount(*value));
        }
        println!();
    }
    println!();
}
