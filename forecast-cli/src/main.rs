use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use forecast_cli::{PortfolioLoader, report};
use forecast_core::{
    ClientId, LegalStatus, Profile, RemunerationStrategy, ReverseSolver, ScenarioSimulator,
    SimulationParams, TaxEngine, adjusted_monthly_expenses,
};

/// Forecast a freelance portfolio's revenue and net income under
/// hypothetical changes to work pattern, pricing and client mix.
#[derive(Parser, Debug)]
#[command(name = "forecast")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a client portfolio under a what-if scenario
    Project(ProjectArgs),
    /// Convert gross annual revenue into net income
    Net(NetArgs),
    /// Compute the revenue and daily rate required for a target net income
    Target(TargetArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Profile TOML file; the flags below override its values
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Legal status code: micro, ei, eirl, portage, eurl, sasu.
    /// Unknown codes fall back to the flat-rate status.
    #[arg(long)]
    status: Option<String>,

    /// Remuneration strategy: salary, dividends or mixed
    #[arg(long)]
    strategy: Option<String>,

    /// Salary share of revenue in percent for the mixed strategy
    #[arg(long)]
    mixed_share: Option<Decimal>,

    /// Share capital; drives the EURL dividend threshold
    #[arg(long)]
    capital: Option<Decimal>,

    /// Override the status's social-contribution rate
    #[arg(long)]
    social_rate: Option<Decimal>,

    /// Override the status's income-tax rate
    #[arg(long)]
    income_tax_rate: Option<Decimal>,

    /// Apply the ACRE contribution reduction
    #[arg(long)]
    acre: bool,
}

impl ProfileArgs {
    fn resolve(&self) -> Result<Profile> {
        let mut profile = match &self.profile {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read profile: {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("Failed to parse profile: {}", path.display()))?
            }
            None => Profile::default(),
        };

        if let Some(status) = &self.status {
            profile.legal_status = LegalStatus::parse_or_default(status);
        }
        if let Some(strategy) = &self.strategy {
            profile.remuneration = parse_strategy(strategy)?;
        }
        if let Some(share) = self.mixed_share {
            profile.mixed_salary_share = share;
        }
        if let Some(capital) = self.capital {
            profile.share_capital = capital;
        }
        if self.social_rate.is_some() {
            profile.social_rate_override = self.social_rate;
        }
        if self.income_tax_rate.is_some() {
            profile.income_tax_rate_override = self.income_tax_rate;
        }

        Ok(profile)
    }

    fn engine(&self, profile: &Profile) -> TaxEngine {
        let engine = TaxEngine::for_profile(profile);
        if self.acre { engine.with_acre() } else { engine }
    }

    fn solver(&self, profile: &Profile) -> ReverseSolver {
        let solver = ReverseSolver::for_profile(profile);
        if self.acre { solver.with_acre() } else { solver }
    }
}

fn parse_strategy(s: &str) -> Result<RemunerationStrategy> {
    match s {
        "salary" => Ok(RemunerationStrategy::Salary),
        "dividends" => Ok(RemunerationStrategy::Dividends),
        "mixed" => Ok(RemunerationStrategy::Mixed),
        other => anyhow::bail!(
            "unknown remuneration strategy '{other}' (expected salary, dividends or mixed)"
        ),
    }
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Path to the portfolio CSV file
    #[arg(short, long)]
    portfolio: PathBuf,

    /// Calendar year for business-day counts (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Weeks of vacation over the year; fractional values allowed
    #[arg(long, default_value = "0")]
    vacation_weeks: Decimal,

    /// Immediate rate change in percent
    #[arg(long, default_value = "0")]
    rate_change: Decimal,

    /// Staged rate change in percent, effective from the third month
    #[arg(long, default_value = "0")]
    rate_change_after: Decimal,

    /// Id of a client to drop from the scenario
    #[arg(long)]
    lose_client: Option<i64>,

    /// Number of new clients ramped in over three months
    #[arg(long, default_value_t = 0)]
    new_clients: u32,

    /// Hypothetical weekly working days
    #[arg(long)]
    weekly_days: Option<Decimal>,

    /// Monthly expense change
    #[arg(long, default_value = "0")]
    expense_delta: Decimal,

    #[command(flatten)]
    profile: ProfileArgs,
}

#[derive(Args, Debug)]
struct NetArgs {
    /// Gross annual revenue
    #[arg(short, long)]
    revenue: Decimal,

    #[command(flatten)]
    profile: ProfileArgs,
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Target net annual income
    #[arg(short, long)]
    net: Decimal,

    /// Worked days per year used for the daily-rate figure
    #[arg(long, default_value = "214")]
    worked_days: Decimal,

    #[command(flatten)]
    profile: ProfileArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project(args) => cmd_project(&args),
        Command::Net(args) => cmd_net(&args),
        Command::Target(args) => cmd_target(&args),
    }
}

fn cmd_project(args: &ProjectArgs) -> Result<()> {
    let file = File::open(&args.portfolio)
        .with_context(|| format!("Failed to open: {}", args.portfolio.display()))?;
    let clients = PortfolioLoader::load(file)
        .with_context(|| format!("Failed to parse portfolio: {}", args.portfolio.display()))?;
    tracing::info!(clients = clients.len(), "portfolio loaded");

    let profile = args.profile.resolve()?;
    let params = SimulationParams {
        vacation_weeks: args.vacation_weeks,
        rate_change_pct: args.rate_change,
        rate_change_after_pct: args.rate_change_after,
        lost_client: args.lose_client.map(ClientId),
        new_clients: args.new_clients,
        weekly_days: args.weekly_days,
        expense_delta: args.expense_delta,
    };

    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
    let result = ScenarioSimulator::for_year(year).project(&clients, &params, &profile);

    println!("Projection for {} clients, {year}", clients.len());
    println!();
    print!("{}", report::projection_table(&result));

    let engine = args.profile.engine(&profile);
    let before = engine.net_income(result.annual_before(), &profile);
    let after = engine.net_income(result.annual_after(), &profile);

    println!();
    println!("Net annual income ({}):", profile.legal_status.as_str());
    println!("  before: {:>14}", before.net_income);
    println!("  after:  {:>14}", after.net_income);
    println!(
        "Monthly expenses after delta: {}",
        adjusted_monthly_expenses(&profile, &params)
    );

    Ok(())
}

fn cmd_net(args: &NetArgs) -> Result<()> {
    let profile = args.profile.resolve()?;
    let breakdown = args.profile.engine(&profile).net_income(args.revenue, &profile);

    print!("{}", report::breakdown_summary(&breakdown));

    Ok(())
}

fn cmd_target(args: &TargetArgs) -> Result<()> {
    let profile = args.profile.resolve()?;
    let solver = args.profile.solver(&profile);

    let revenue = solver.required_revenue(args.net, &profile)?;
    let rate = ReverseSolver::required_daily_rate(revenue, args.worked_days)?;

    println!("Target net income:   {:>14}", args.net);
    println!("Required revenue:    {:>14}", revenue);
    println!("Required daily rate: {:>14}", rate);

    Ok(())
}
