//! CRM Employee Sync - Main entry point
//!
//! Records a fixed demonstration employment relationship in HubSpot and exits.

use anyhow::{Context, Result};
use crm_employee_sync::{
    Config, Employment, EmploymentSync, HubSpotClient, NewCompany, NewContact,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn demo_employment() -> Employment {
    Employment::new(
        NewContact::new("candidate.test@example.com", "Candidate", "Test"),
        NewCompany::new("Test Challenge Company", "test-challenge-company.com"),
    )
}

fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Syncing to CRM API at {}", config.api_url);

    let client = HubSpotClient::new(&config);
    let sync = EmploymentSync::new(client).with_company_dedupe(config.dedupe_companies);

    let employment = demo_employment();
    let result = sync.sync(&employment);

    let summary = sync.client().metrics().summary();
    info!(
        "HTTP requests: {} ({} errors, {} recovered conflicts, {} retries, avg {:.1} ms)",
        summary.http_requests_total,
        summary.http_errors_total,
        summary.http_recovered_total,
        summary.http_retries_total,
        summary.http_duration_avg_ms
    );
    info!(
        "Contacts: {} created, {} reused; companies: {} created, {} reused",
        summary.contacts_created_total,
        summary.contacts_reused_total,
        summary.companies_created_total,
        summary.companies_reused_total
    );

    match result {
        Ok(outcome) => {
            println!(
                "Successfully linked contact {} to company {} as Employee.",
                outcome.contact_id, outcome.company_id
            );
            Ok(())
        }
        Err(e) => {
            error!("Sync failed: {}", e);
            Err(e).context(format!(
                "Failed to sync employment of {} at {}",
                employment.contact.email, employment.company.domain
            ))
        }
    }
}
