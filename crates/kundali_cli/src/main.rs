use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use kundali_chart::{ChartRequest, compute_chart, search_place};
use kundali_config::KundaliConfig;
use kundali_ephem::{EphemerisAdapter, Provider, SwetestProvider};
use kundali_geo::{Geocoder, NoaaSolarTimes, SolarTimes};
use kundali_time::{BirthMoment, hours_to_hms, local_sidereal_time_hours};
use kundali_vedic_base::{
    Vaar, deg_to_dms, format_sign_degree, nakshatra_from_longitude, navamsa_longitude, panchanga,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "kundali", about = "Vedic sidereal chart CLI")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Swiss ephemeris data directory
    #[arg(long, global = true)]
    ephe_path: Option<PathBuf>,

    /// swetest executable
    #[arg(long, global = true)]
    swetest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full sidereal chart for a birth moment and place
    Chart {
        /// Local birth date (1990-01-15, 01/15/1990, ...)
        #[arg(long)]
        date: String,
        /// Local birth time (07:22:00, 7:22 PM, ...)
        #[arg(long)]
        time: String,
        /// IANA timezone (Asia/Kolkata)
        #[arg(long)]
        tz: String,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// House system letter (P, W, E)
        #[arg(long)]
        house: Option<String>,
        /// Force an engine: SWIEPH or MOSEPH
        #[arg(long)]
        engine: Option<String>,
        /// Skip sunrise/sunset
        #[arg(long)]
        no_sun: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up a place name
    Geocode {
        /// Free-text place query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Nakshatra and pada of a sidereal longitude
    Nakshatra {
        /// Sidereal longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Navamsa (D9) longitude of a sidereal longitude
    Navamsa {
        /// Sidereal longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
    /// Local sidereal time
    Lst {
        /// Julian Day (UT)
        #[arg(long)]
        jd: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Panchanga from sidereal Sun and Moon longitudes
    Panchanga {
        /// Sidereal Sun longitude
        #[arg(long)]
        sun: f64,
        /// Sidereal Moon longitude
        #[arg(long)]
        moon: f64,
        /// Local date (for the weekday)
        #[arg(long)]
        date: String,
        /// Local time
        #[arg(long)]
        time: String,
        /// IANA timezone
        #[arg(long)]
        tz: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<KundaliConfig> {
    KundaliConfig::builder()
        .config_path(cli.config.clone())
        .ephe_path(cli.ephe_path.clone())
        .swetest(cli.swetest.clone())
        .build()
        .context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Chart {
            date,
            time,
            tz,
            lat,
            lon,
            house,
            engine,
            no_sun,
            json,
        } => {
            let config = load_config(&cli)?;
            let ephem = Arc::new(config.ephemeris_config());
            let provider = Provider::direct(SwetestProvider::from_config(&ephem));
            let adapter = EphemerisAdapter::new(provider, ephem)
                .context("failed to set up the ephemeris adapter")?;

            let request = ChartRequest {
                date: Some(date.clone()),
                time: Some(time.clone()),
                timezone: Some(tz.clone()),
                latitude: Some(*lat),
                longitude: Some(*lon),
                house_system: Some(house.clone().unwrap_or_else(|| config.house_system().to_string())),
                force_engine: engine.clone(),
            };
            let solar = NoaaSolarTimes;
            let solar_ref: Option<&dyn SolarTimes> =
                if *no_sun { None } else { Some(&solar) };

            match compute_chart(&adapter, solar_ref, &request).await {
                Ok(report) if *json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Ok(report) => print!("{}", render::render_chart(&report)),
                Err(e) => {
                    if *json {
                        println!("{}", serde_json::to_string_pretty(&e.body())?);
                    }
                    let kind = e.kind();
                    return Err(anyhow::Error::new(e).context(format!("chart failed ({kind})")));
                }
            }
        }

        Commands::Geocode { query, json } => {
            let config = load_config(&cli)?;
            let geocoder = Geocoder::new(config.geocode_config())
                .context("failed to set up the geocoder")?;
            let query = query.join(" ");
            let hits = search_place(&geocoder, &query)
                .await
                .with_context(|| format!("geocoding '{query}' failed"))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No places found.");
            } else {
                for h in &hits {
                    println!("{:>10.5} {:>11.5}  {}", h.latitude, h.longitude, h.label);
                }
            }
        }

        Commands::Nakshatra { lon } => {
            let info = nakshatra_from_longitude(*lon);
            println!(
                "{} (index {}) - Pada {}, lord {} ({:.4} deg in nakshatra, {:.4} deg in pada)",
                info.nakshatra.name(),
                info.nakshatra_index,
                info.pada,
                info.lord,
                info.degrees_in_nakshatra,
                info.degrees_in_pada
            );
        }

        Commands::Navamsa { lon } => {
            let d9 = navamsa_longitude(*lon);
            println!(
                "D1 {} -> D9 {} ({d9:.4})",
                format_sign_degree(*lon),
                format_sign_degree(d9)
            );
        }

        Commands::Dms { deg } => {
            let d = deg_to_dms(*deg);
            println!("{} deg {} min {} sec", d.degrees, d.minutes, d.seconds);
        }

        Commands::Lst { jd, lon } => {
            if !jd.is_finite() || !lon.is_finite() || lon.abs() > 180.0 {
                bail!("jd must be finite and lon within [-180, 180]");
            }
            let hours = local_sidereal_time_hours(*jd, *lon);
            let hms = hours_to_hms(hours);
            println!(
                "{:02}:{:02}:{:02} ({hours:.6} h)",
                hms.hours, hms.minutes, hms.seconds
            );
        }

        Commands::Panchanga {
            sun,
            moon,
            date,
            time,
            tz,
        } => {
            let birth = BirthMoment::resolve(date, time, tz)
                .with_context(|| format!("cannot resolve '{date} {time}' in {tz}"))?;
            let vaar = Vaar::from_days_from_sunday(birth.local.weekday().num_days_from_sunday());
            let p = panchanga(*sun, *moon, vaar);
            println!("Vaar:      {}", p.weekday);
            println!("Tithi:     {} {} ({})", p.tithi_number, p.tithi_name, p.paksha.name());
            println!("Nakshatra: {} pada {}", p.nakshatra, p.pada);
            println!("Yoga:      {}", p.yoga);
            println!("Karana:    {}", p.karana);
        }
    }

    Ok(())
}
