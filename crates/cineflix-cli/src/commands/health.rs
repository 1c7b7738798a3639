use super::progress::Spinner;
use super::{AppContext, GlobalOptions};
use crate::output::Output;
use crate::tables;
use color_eyre::Result;

pub async fn run_health(options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;

    let spinner = Spinner::start("Checking services...", output);
    let report = ctx.services.health.check_all().await;
    spinner.finish();

    let endpoints = ctx.config.services.named();
    output.table_or_json(tables::health_table(&report, &endpoints), &report)?;

    if report.all_healthy() {
        output.success(format!("All {} services are healthy", report.len()));
    } else {
        output.warn(format!(
            "{} of {} services unavailable: {}",
            report.len() - report.healthy_count(),
            report.len(),
            report.unhealthy_services().join(", ")
        ));
    }

    Ok(())
}
