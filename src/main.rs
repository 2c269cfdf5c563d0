//! Wedding negotiation CLI binary

use anyhow::Context;
use clap::Parser;
use wedding_negotiation::cli::{
    example_preferences, render_evaluation, render_outcome, Cli, Commands, NegotiationApp,
};
use wedding_negotiation::{NegotiationConfig, Offer, Preferences, Role};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            customer,
            planner,
            config,
            json,
        } => {
            let app = NegotiationApp::from_files(
                customer.as_deref(),
                planner.as_deref(),
                config.as_deref(),
            )
            .context("Failed to load negotiation inputs")?;

            tracing::info!(
                "Starting negotiation ({:?} protocol, max {} rounds)",
                app.config().protocol,
                app.config().max_rounds
            );
            let outcome = app.run().context("Negotiation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_outcome(&outcome)?);
            }
        }

        Commands::Evaluate {
            role,
            budget,
            services,
            timeline,
            preferences,
            config,
        } => {
            let config = match config {
                Some(path) => NegotiationConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => NegotiationConfig::default(),
            };
            let preferences = match preferences {
                Some(path) => Preferences::from_file(&path)
                    .with_context(|| format!("Failed to load preferences: {}", path.display()))?,
                None => example_preferences(role),
            };

            let counterpart = example_preferences(role.counterpart());
            let app = match role {
                Role::Customer => NegotiationApp::new(config, preferences, counterpart),
                Role::WeddingPlanner => NegotiationApp::new(config, counterpart, preferences),
            };

            let evaluation = app
                .evaluate(role, Offer::new(budget, services, timeline))
                .context("Evaluation failed")?;
            println!("{}", render_evaluation(&evaluation));
        }

        Commands::Preferences { role } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&example_preferences(role))?
            );
        }
    }

    Ok(())
}
