mod campaign;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use std::time::Instant;

use campaign::{CampaignReport, run_campaign};

#[derive(Debug, Parser)]
#[command(name = "pixelfields-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for Pixel Fields - headless campaign simulation")]
struct Args {
    /// In-game days to simulate per run
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Calendar start date (YYYY-MM-DD); every per-day seed derives from it
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// Number of identical runs to compare for determinism
    #[arg(long, default_value_t = 3)]
    runs: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }
    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .context("start date must be YYYY-MM-DD")?;

    println!(
        "{} {} days from {} across {} runs",
        "Simulating".bold(),
        args.days,
        args.start,
        args.runs
    );

    let started = Instant::now();
    let mut reports: Vec<CampaignReport> = Vec::with_capacity(args.runs as usize);
    for run in 1..=args.runs {
        let report = run_campaign(start, args.days)
            .with_context(|| format!("campaign run {run} failed"))?;
        if args.verbose {
            println!(
                "  run {run}: day {} coins {} achievements {} quests {} digest {:#018x}",
                report.final_day_num,
                report.final_coins,
                report.achievements,
                report.quests_claimed,
                report.digest
            );
        }
        reports.push(report);
    }

    let reference = &reports[0];
    let mut divergent = false;
    for (idx, report) in reports.iter().enumerate().skip(1) {
        if report.digest != reference.digest {
            divergent = true;
            let day = first_divergent_day(reference, report);
            println!(
                "{} run {} diverged from run 1 (first differing day: {})",
                "FAIL".red().bold(),
                idx + 1,
                day.map_or_else(|| "none".to_string(), |d| (d + 1).to_string())
            );
        }
    }

    let elapsed = started.elapsed();
    if divergent {
        bail!("determinism check failed: identical inputs produced different campaigns");
    }

    println!(
        "{} {} identical {}-day runs, final day {} with {} coins, {} achievements, {} quest claims ({:.2?})",
        "PASS".green().bold(),
        args.runs,
        reference.days,
        reference.final_day_num,
        reference.final_coins,
        reference.achievements,
        reference.quests_claimed,
        elapsed
    );
    Ok(())
}

fn first_divergent_day(a: &CampaignReport, b: &CampaignReport) -> Option<usize> {
    a.daily_digests
        .iter()
        .zip(b.daily_digests.iter())
        .position(|(x, y)| x != y)
}
