use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use walkcast::scoring;
use walkcast::{
    Day, IdealTemp, RatedRecord, WalkcastConfig, WeatherClient, build_days, merge_air_quality,
    possible_walk_hours,
};

/// Find the best hours for a walk from multi-cadence weather forecasts
#[derive(Debug, Parser)]
#[command(name = "walkcast", version)]
struct Cli {
    /// Place name or postal code to look up
    location: String,

    /// Ideal apparent temperature in °F, strictly between 20 and 100
    #[arg(long)]
    ideal_temp: Option<f64>,

    /// Number of forecast days to report
    #[arg(long)]
    days: Option<usize>,

    /// Print the sub-score breakdown for each listed hour
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = WalkcastConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let ideal_temp = IdealTemp::new(cli.ideal_temp.unwrap_or(config.defaults.ideal_temp))?;
    let days_wanted = cli.days.unwrap_or(config.defaults.forecast_days as usize);

    let client = WeatherClient::new(&config.weather)?;

    let locations = client.geocode(&cli.location).await?;
    let location = locations
        .into_iter()
        .next()
        .with_context(|| format!("Location not found: {}", cli.location))?;
    info!(
        "Resolved {} to ({})",
        location.name,
        location.format_coordinates()
    );

    let (mut bundle, air_quality) =
        tokio::try_join!(client.forecast(&location), client.air_quality(&location))?;

    if let Some(current) = bundle.current.take() {
        let current = merge_air_quality(vec![current], &air_quality).remove(0);
        let rated = RatedRecord::new(current, ideal_temp);
        println!(
            "Now: {:.0}°F (feels {:.0}°F)  rating {:.1}\n",
            rated.record().temperature_2m,
            rated.record().apparent_temperature,
            rated.rating()
        );
    }

    let days = build_days(bundle, &air_quality, ideal_temp)?;
    let shown = &days[..days.len().min(days_wanted)];

    print_report(shown, config.defaults.min_walk_temp, cli.verbose, ideal_temp);
    Ok(())
}

fn print_report(days: &[Day], min_walk_temp: f64, verbose: bool, ideal_temp: IdealTemp) {
    for day in days {
        println!(
            "{:04}-{:02}-{:02}  high {:.0}°F  sunrise {}  sunset {}",
            day.year,
            day.month,
            day.date,
            day.summary.temperature_2m_max,
            day.summary.sunrise.format("%H:%MZ"),
            day.summary.sunset.format("%H:%MZ"),
        );

        let mut hours: Vec<&RatedRecord> = day.hourly.iter().filter(|h| h.record().is_day).collect();
        hours.sort_by(|a, b| b.rating().total_cmp(&a.rating()));

        for hour in hours.iter().take(5) {
            print_hour(hour, verbose, ideal_temp);
        }
        println!();
    }

    let mut best = possible_walk_hours(days, min_walk_temp);
    best.sort_by(|a, b| b.rating().total_cmp(&a.rating()));

    if best.is_empty() {
        println!("No walkable hours in this forecast window.");
        return;
    }

    println!("Best walk times:");
    for hour in best.iter().take(10) {
        println!(
            "  {}  {:>5.1}",
            hour.record().time.format("%Y-%m-%d %H:%MZ"),
            hour.rating()
        );
    }
}

fn print_hour(hour: &RatedRecord, verbose: bool, ideal_temp: IdealTemp) {
    let record = hour.record();
    let flags = hour
        .flags()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "  {}  {:>5.1}  {:.0}°F  {}",
        record.time.format("%H:%MZ"),
        hour.rating(),
        record.apparent_temperature,
        flags
    );

    if verbose {
        let scores = scoring::breakdown(record, ideal_temp);
        println!(
            "         temp {:.0} | uv {:.0} | precip {:.0} | vis {:.0} | cloud {:.0} | wind {:.0} | gusts {:.0} | moisture {:.0}",
            scores.apparent_temperature,
            scores.uv_index,
            scores.precipitation_probability,
            scores.visibility,
            scores.cloud_cover,
            scores.wind_speed,
            scores.wind_gusts,
            scores.air_moisture,
        );
    }
}
