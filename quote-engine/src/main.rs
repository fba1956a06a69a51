//! Batch pricing binary
//!
//! ```text
//! quote-engine check                       validate the catalog
//! quote-engine price [request.json]        print the calculation as JSON
//! quote-engine quote <client> [request.json]   save a quote and print it
//! ```
//!
//! The request is read from stdin when no file is given.

use anyhow::{Context, bail};
use quote_engine::audit::{AuditAction, AuditTrail, Operator, create_snapshot};
use quote_engine::dependency::check_rule;
use quote_engine::quote::render_quote;
use quote_engine::{Catalog, Config, Quote, QuoteRequest, calculate_quote, setup_environment};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("price");

    // 2. 加载目录
    let catalog = load_catalog(&config)?;
    let mut trail = AuditTrail::new();
    trail.append(
        AuditAction::CatalogLoaded,
        "catalog",
        config.catalog_path.display().to_string(),
        &Operator::system(),
        serde_json::json!({
            "services": catalog.services.len(),
            "factors": catalog.factors.len(),
            "dependency_rules": catalog.dependency_rules.len(),
        }),
    );

    match command {
        "check" => {
            // Replay rules in insertion order, as the admin workflow would
            for (i, rule) in catalog.dependency_rules.iter().enumerate() {
                let check = check_rule(rule, &catalog.dependency_rules[..i], &catalog.factors);
                let action = if check.is_valid {
                    AuditAction::DependencyRuleAccepted
                } else {
                    AuditAction::DependencyRuleRejected
                };
                trail.append(
                    action,
                    "dependency_rule",
                    rule.id.to_string(),
                    &Operator::system(),
                    create_snapshot(rule, "dependency_rule"),
                );
            }

            let issues = catalog.validate();
            for issue in &issues {
                println!("{}", issue);
            }
            if !issues.is_empty() {
                bail!("catalog has {} issue(s)", issues.len());
            }
            println!("catalog ok");
        }
        "price" => {
            let request = read_request(args.get(1).map(String::as_str))?;
            let calc = calculate_quote(&catalog, &request);
            println!("{}", serde_json::to_string_pretty(&calc)?);
        }
        "quote" => {
            let client = args.get(1).context("usage: quote-engine quote <client> [request.json]")?;
            let request = read_request(args.get(2).map(String::as_str))?;
            let calc = calculate_quote(&catalog, &request);
            let service_name = catalog
                .service(request.service_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            let quote = Quote::create(client.as_str(), service_name, &calc, 1)
                .map_err(shared::AppError::from)?;

            trail.append(
                AuditAction::QuoteCreated,
                "quote",
                quote.id.to_string(),
                &Operator::system(),
                create_snapshot(&quote, "quote"),
            );

            print!("{}", render_quote(&quote, &config.currency_symbol));
        }
        other => bail!("unknown command '{}'", other),
    }

    Ok(())
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = if config.strict_catalog {
        Catalog::load_strict(&config.catalog_path)
    } else {
        Catalog::load(&config.catalog_path)
    };
    catalog.with_context(|| format!("loading catalog {}", config.catalog_path.display()))
}

fn read_request(path: Option<&str>) -> anyhow::Result<QuoteRequest> {
    let content = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&content).context("parsing quote request")
}
