//! Cluster-pulse binary entry point.

use cluster_pulse::config::Config;
use cluster_pulse::{cli, logging, ClusterPulseError, Report, ReportAssembler};
use tracing::info;

#[tokio::main]
async fn main() -> cluster_pulse::Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("cluster-pulse: {}", err);
            eprintln!("Try 'cluster-pulse --help' for usage.");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }

    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = Config::load(&args)?;

    // Initialize logging
    logging::init(config.log_filter());

    info!("cluster-pulse v{}", env!("CARGO_PKG_VERSION"));

    let runner = config.to_runner()?;
    let sections = config.to_sections()?;
    let assembler = ReportAssembler::with_sections(runner, sections);

    if args.list {
        for title in assembler.titles() {
            println!("{}", title);
        }
        return Ok(());
    }

    let report = match args.section {
        Some(ref title) => Report::new(vec![assembler.assemble_section(title).await?]),
        None => assembler.assemble().await?,
    };

    let rendered = report.render();
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &rendered).map_err(|source| ClusterPulseError::ReportWrite {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), bytes = rendered.len(), "report written");
        }
        None => print!("{}", rendered),
    }

    info!("{}", report.summary());

    Ok(())
}
