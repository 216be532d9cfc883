#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
use clinic_outcomes::core::ChartKind;

#[cfg(feature = "cairo-backend")]
const DEFAULT_DATA_DIR: &str = "data";
#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_DIR: &str = ".";
#[cfg(feature = "cairo-backend")]
const CHART_SIZES: [(ChartKind, u32, u32); 5] = [
    (ChartKind::TimeInRangeStack, 240, 320),
    (ChartKind::GlucoseScale, 480, 72),
    (ChartKind::TimeInRangeBar, 480, 48),
    (ChartKind::GmiPie, 360, 280),
    (ChartKind::GmiDistributionBar, 480, 48),
];

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    data_dir: PathBuf,
    output_dir: PathBuf,
    period_days: u32,
    config_path: Option<PathBuf>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = clinic_outcomes::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use clinic_outcomes::api::{Dashboard, DashboardConfig, MountedSurfaces};
    use clinic_outcomes::core::{ReportingPeriod, Viewport};
    use clinic_outcomes::data::{DataProvider, FileMetricsSource};
    use clinic_outcomes::export::{ExportOutcome, Exporter};
    use clinic_outcomes::render::CairoRenderer;

    let args = parse_args()?;
    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };
    config.lifecycle.settle_delay_ms = 0;
    config.export.output_dir = args.output_dir.clone();

    let mut host = MountedSurfaces::new();
    for (kind, width, height) in CHART_SIZES {
        let renderer = CairoRenderer::new(width as i32, height as i32)
            .map_err(|err| format!("surface `{kind}` init failed: {err}"))?;
        host.mount(kind, renderer, Viewport::new(width, height));
    }

    let provider = DataProvider::new(FileMetricsSource::new(&args.data_dir));
    let mut dashboard = Dashboard::new(provider, host, &config).map_err(|err| err.to_string())?;
    let snapshot = dashboard
        .select_period(ReportingPeriod::from_days(args.period_days))
        .map_err(|err| err.to_string())?;
    println!(
        "{} | {} patients | {} | updated {}",
        snapshot.reporting_period, snapshot.patient_count, snapshot.date_range, snapshot.last_updated
    );

    let mut exporter = Exporter::from_config(config.export.clone());
    match dashboard.export(&mut exporter, chrono::Utc::now()) {
        ExportOutcome::Saved { path, method } => {
            println!("saved {} ({method})", path.display());
            Ok(())
        }
        ExportOutcome::Notified { message } => Err(message),
    }
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut data_dir = PathBuf::from(DEFAULT_DATA_DIR);
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    let mut period_days = 30;
    let mut config_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data".to_owned())?;
                data_dir = PathBuf::from(value);
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                output_dir = PathBuf::from(value);
            }
            "--period" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --period".to_owned())?;
                period_days = value
                    .parse()
                    .map_err(|_| format!("invalid --period `{value}`"))?;
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        data_dir,
        output_dir,
        period_days,
        config_path,
    })
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "usage: render_dashboard [--data <dir>] [--period <30|60|90>] [--out <dir>] [--config <json>]\n\
         defaults: --data {DEFAULT_DATA_DIR} --period 30 --out {DEFAULT_OUTPUT_DIR}"
    )
}
