use {
    anyhow::Result,
    asset_cycle::{
        ASSETS, ChartRequest, ChartView, Cli, Command, CorrelationRequest, CorrelationView,
        DashboardEngine, PipelineError, YahooProvider,
        utils::format_date,
    },
    clap::Parser,
    std::{panic, sync::Arc},
    tabled::{Table, Tabled, builder::Builder, settings::Style},
};

#[derive(Tabled)]
struct AssetLine {
    #[tabled(rename = "Asset")]
    name: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Scale")]
    scale: &'static str,
}

fn print_assets() {
    let lines = ASSETS.iter().map(|a| AssetLine {
        name: a.name,
        symbol: a.symbol,
        scale: if a.is_rate_like() { "fixed %" } else { "0-100" },
    });
    println!("{}", Table::new(lines).with(Style::rounded()));
}

fn print_chart(view: &ChartView, assets: &[String]) {
    let mut builder = Builder::default();
    let mut header = vec!["date".to_string()];
    for asset in assets {
        header.push(asset.clone());
        header.push(format!("{} (raw)", asset));
    }
    builder.push_record(header);

    for row in &view.rows {
        let mut record = vec![format_date(row.date)];
        for asset in assets {
            record.push(row.values.get(asset).map(|v| format!("{:.1}", v)).unwrap_or_default());
            record.push(row.originals.get(asset).map(|v| format!("{:.2}", v)).unwrap_or_default());
        }
        builder.push_record(record);
    }

    println!("{}", builder.build().with(Style::rounded()));
    if let Some(window) = view.window {
        println!("rows {}..{} of {}", window.start(), window.end(), view.total_rows);
    }
}

fn print_correlation(view: &CorrelationView) {
    let mut builder = Builder::default();
    builder.push_record(["date".to_string(), "correlation".to_string()]);
    for point in view.visible() {
        builder.push_record([format_date(point.date), format!("{:+.3}", point.correlation)]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    println!("{} of {} windows shown", view.visible().len(), view.points.len());
}

fn engine() -> Result<DashboardEngine> {
    Ok(DashboardEngine::new(Arc::new(YahooProvider::new()?)))
}

async fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Assets => print_assets(),

        Command::Chart {
            assets,
            scale,
            start,
            end,
        } => {
            let mut request = ChartRequest::new(assets, scale);
            if let (Some(start), Some(end)) = (start, end) {
                request = request.with_range(start, end);
            }
            let resolved: Vec<String> = DashboardEngine::resolve(&request.assets)?
                .iter()
                .map(|a| a.name.to_string())
                .collect();
            if let Some(view) = engine()?.chart(request).await? {
                print_chart(&view, &resolved);
            }
        }

        Command::Correlate { a, b, scale, window } => {
            let request = match window {
                Some(size) => CorrelationRequest::new(&a, &b, scale, size),
                None => CorrelationRequest::with_default_window(&a, &b, scale),
            };
            let request = match request {
                Ok(request) => request,
                Err(PipelineError::SameAsset(name)) => {
                    log::warn!("Same asset selected for A and B: {}", name);
                    println!("Please select two different assets (both are {}).", name);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if let Some(view) = engine()?.correlation(request).await? {
                print_correlation(&view);
            }
        }

        Command::Export { assets, out } => {
            let engine = engine()?;
            engine.load(&assets).await?;
            engine.export_csv(&out)?;
            println!("Wrote {} series to {}", engine.cache().len(), out.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("asset_cycle"), my_code_level)
        .init();

    run(Cli::parse()).await
}
