use std::{path::PathBuf, sync::Arc, time::Duration};

use camino::{
    cancel::CancelToken,
    directions::{DirectionsService, OsrmDirections, StraightLineDirections},
    gpx_export::write_gpx,
    itinerary,
    models::LocationPoint,
    route_builder::{BuildOutcome, RouteBuilder, RouteMode},
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "Write a Camino stage, or the whole route, as a GPX file")]
struct Args {
    /// Day to export (1-based). Omit to export one track across every stage.
    #[arg(long)]
    day: Option<u32>,

    /// Output path of the GPX file
    #[arg(long)]
    output: PathBuf,

    /// OSRM-compatible router; straight lines between stops when omitted
    #[arg(long, env = "DIRECTIONS_URL")]
    directions_url: Option<String>,

    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl Args {
    fn points(&self) -> Result<(String, Vec<LocationPoint>, RouteMode), String> {
        match self.day {
            None => Ok((
                "Camino Francés".to_string(),
                itinerary::overview_points(),
                RouteMode::Overview,
            )),
            Some(day) => {
                let detail = itinerary::route_detail(day).ok_or_else(|| {
                    format!("day {day} is outside 1..={}", itinerary::day_count())
                })?;
                let end = detail.end.as_ref().map_or("", |p| p.name.as_str());
                Ok((
                    format!("Day {day}: {end}"),
                    itinerary::detail_points(&detail),
                    RouteMode::Detail,
                ))
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let (name, points, mode) = args.points()?;

    let directions: Arc<dyn DirectionsService> = match &args.directions_url {
        Some(url) => Arc::new(OsrmDirections::new(
            url.clone(),
            Duration::from_secs(args.timeout_secs),
        )?),
        None => Arc::new(StraightLineDirections::default()),
    };
    tracing::info!("routing {} stops for {:?}", points.len(), name);

    let path = match RouteBuilder::new(directions)
        .build(&points, mode, &CancelToken::never())
        .await
    {
        BuildOutcome::Path(path) => path,
        BuildOutcome::NoPath | BuildOutcome::Cancelled => {
            return Err(format!("no walking path could be built for {name}").into());
        }
    };
    tracing::info!(
        "{} segments, {} points, {:.1} km",
        path.segments.len(),
        path.coordinates.len(),
        path.distance_km()
    );

    let gpx = write_gpx(&name, &path.coordinates, &points)?;
    std::fs::write(&args.output, gpx)?;
    tracing::info!("GPX written to {:?}", args.output);

    Ok(())
}
