use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::debug;
use miqat_config::Settings;
use miqat_prayer::{
    ALL_PRAYERS, AsrConvention, CalculationMethod, GeoTime, HighLatitudeRule, Prayer,
    PrayerConfig, PrayerTime, TimeAdjustments, compute_schedule, iftar_time, plan_reminders,
    suhoor_end_time,
};

#[derive(Parser)]
#[command(name = "miqat", about = "Islamic prayer times from solar position")]
struct Cli {
    /// Log intermediate solar quantities (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Six prayer times for one day
    Times {
        #[command(flatten)]
        day: DayArgs,
    },
    /// Iftar (Maghrib) time
    Iftar {
        #[command(flatten)]
        day: DayArgs,
    },
    /// End of suhoor (Fajr) time
    Suhoor {
        #[command(flatten)]
        day: DayArgs,
    },
    /// Reminder instants still ahead of a given moment
    Reminders {
        #[command(flatten)]
        day: DayArgs,
        /// Current instant (RFC 3339, e.g. 2024-03-20T10:00:00+03:00)
        #[arg(long)]
        now: String,
        /// Minutes before each prayer (default from settings, else 15)
        #[arg(long)]
        lead: Option<u32>,
    },
    /// List calculation methods with their angles
    Methods,
}

#[derive(Args)]
struct DayArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Timezone offset from UTC in hours (e.g. 3, -5, 5.75)
    #[arg(long, allow_negative_numbers = true)]
    tz: f64,
    /// Date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Calculation method: name (mwl, isna, egypt, makkah, karachi, tehran, jafari) or code 0-6
    #[arg(long)]
    method: Option<CalculationMethod>,
    /// Asr convention: shafii or hanafi
    #[arg(long)]
    asr: Option<AsrConvention>,
    /// High-latitude rule: none, middle-of-night, seventh-of-night, angle-based
    #[arg(long)]
    high_lat: Option<HighLatitudeRule>,
    /// Minute adjustments, e.g. fajr=2,isha=-3
    #[arg(long, value_parser = parse_adjustments)]
    adjust: Option<TimeAdjustments>,
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Parse `prayer=minutes` pairs separated by commas.
fn parse_adjustments(s: &str) -> Result<TimeAdjustments, String> {
    let mut adj = TimeAdjustments::default();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, minutes) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected prayer=minutes, got {pair:?}"))?;
        let prayer: Prayer = name.parse().map_err(|e| format!("{e}"))?;
        let minutes: i32 = minutes
            .trim()
            .parse()
            .map_err(|e| format!("{name}: {e}"))?;
        adj.set(prayer, minutes);
    }
    Ok(adj)
}

/// `HH:MM:SS`, suffixed with the day difference when the time falls on
/// another calendar date than `date` (Isha after midnight).
fn format_time(t: &PrayerTime, date: NaiveDate) -> String {
    match t {
        Ok(t) => {
            let clock = t.format("%H:%M:%S");
            match (t.date_naive() - date).num_days() {
                0 => clock.to_string(),
                days => format!("{clock} ({days:+}d)"),
            }
        }
        Err(_) => "--".to_string(),
    }
}

fn load_settings(path: Option<&PathBuf>) -> Settings {
    match path {
        Some(p) => Settings::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load settings: {e}");
            std::process::exit(1);
        }),
        None => Settings::default(),
    }
}

/// Settings file first, then command-line overrides.
fn resolve(day: &DayArgs, settings: &Settings) -> (GeoTime, PrayerConfig) {
    let mut config = settings.prayer_config().unwrap_or_else(|e| {
        eprintln!("Invalid settings: {e}");
        std::process::exit(1);
    });
    if let Some(m) = day.method {
        config.method = m;
    }
    if let Some(a) = day.asr {
        config.asr_convention = a;
    }
    if let Some(r) = day.high_lat {
        config.high_latitude_rule = r;
    }
    if let Some(adj) = day.adjust {
        config.adjustments = adj;
    }
    let date = day.date.unwrap_or_else(|| Local::now().date_naive());
    let geo = GeoTime::new(day.lat, day.lon, day.tz, date).unwrap_or_else(|e| {
        eprintln!("Invalid input: {e}");
        std::process::exit(1);
    });
    debug!("{geo:?} {config:?}");
    (geo, config)
}

fn parse_instant(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_else(|e| {
        eprintln!("Invalid --now {s:?}: {e}");
        std::process::exit(1);
    })
}

fn print_methods() {
    println!("{:<4} {:<8} {:>6} {:>10} {:>8}  Name", "Code", "Slug", "Fajr", "Isha", "Maghrib");
    for &m in CalculationMethod::all() {
        let p = m.params();
        let isha = match p.isha_angle_deg() {
            Some(a) => format!("{a}"),
            None => format!("+{} min", p.isha_offset_minutes()),
        };
        let maghrib = if p.maghrib_offset_minutes > 0.0 {
            format!("+{} min", p.maghrib_offset_minutes)
        } else {
            "sunset".to_string()
        };
        println!(
            "{:<4} {:<8} {:>6} {:>10} {:>8}  {}",
            m.code(),
            m.slug(),
            p.fajr_angle_deg,
            isha,
            maghrib,
            m.name()
        );
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Times { day } => {
            let settings = load_settings(day.config.as_ref());
            let (geo, config) = resolve(&day, &settings);
            let schedule = compute_schedule(&geo, &config);
            println!("{} ({}, {})", schedule.date, config.method.name(), config.asr_convention);
            for prayer in ALL_PRAYERS {
                println!("{:<8} {}", prayer.name(), format_time(&schedule.get(prayer), schedule.date));
            }
        }

        Commands::Iftar { day } => {
            let settings = load_settings(day.config.as_ref());
            let (geo, config) = resolve(&day, &settings);
            println!("{}", format_time(&iftar_time(&geo, &config), geo.date()));
        }

        Commands::Suhoor { day } => {
            let settings = load_settings(day.config.as_ref());
            let (geo, config) = resolve(&day, &settings);
            println!("{}", format_time(&suhoor_end_time(&geo, &config), geo.date()));
        }

        Commands::Reminders { day, now, lead } => {
            let settings = load_settings(day.config.as_ref());
            let (geo, config) = resolve(&day, &settings);
            let now = parse_instant(&now);
            let lead = lead.unwrap_or(settings.reminders.lead_minutes);
            let schedule = compute_schedule(&geo, &config);
            let reminders = plan_reminders(&schedule, &settings.reminders.prayers, lead, &now);
            if reminders.is_empty() {
                println!("No reminders left for {}", schedule.date);
            }
            for r in reminders {
                println!(
                    "{:<8} remind at {}  (prayer at {})",
                    r.prayer.name(),
                    format_time(&Ok(r.remind_at), schedule.date),
                    format_time(&Ok(r.prayer_time), schedule.date)
                );
            }
        }

        Commands::Methods => print_methods(),
    }
}
