use anyhow::{Context, Result};
use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use log::{error, info, LevelFilter};
use proxylink::{config, Registry};

#[derive(Parser, Debug)]
#[clap(version, about = "Convert proxy share links into outbound configurations")]
struct Args {
    /// YAML config file with `tag`, `plugin_port` and `links`
    #[clap(short, long)]
    config: Option<String>,
    #[clap(long)]
    tag: Option<String>,
    #[clap(long)]
    plugin_port: Option<u16>,
    /// Print normalized share links instead of configurations
    #[clap(long)]
    export: bool,
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
    links: Vec<String>,
}

fn setup_logger(level: LevelFilter) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

async fn load_config(args: &Args) -> Result<config::Config> {
    let mut config = match &args.config {
        Some(path) => config::load_file(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path))?,
        None => config::Config::default(),
    };
    if let Some(tag) = &args.tag {
        config.tag = tag.as_str().into();
    }
    if let Some(port) = args.plugin_port {
        config.plugin_port = port;
    }
    config.links.extend(args.links.iter().cloned());
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.log_level)?;

    let config = load_config(&args).await?;
    let registry = Registry::new();
    info!(
        "Supported schemes: {}",
        registry.schemes().collect::<Vec<_>>().join(", ")
    );

    if args.export {
        for obj in registry.parse_links_lossy(&config.links.join("\n")) {
            println!("{}", obj.export_to_url()?);
        }
        return Ok(());
    }

    let mut failed = 0;
    for (obj, conf) in proxylink::build_all(&registry, &config)? {
        match conf {
            Ok(conf) => {
                info!("{}", obj);
                println!("{}", serde_json::to_string_pretty(&conf)?);
            }
            Err(err) => {
                failed += 1;
                error!("Failed to build {}: {}", obj, err);
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} server(s) could not be converted", failed);
    }
    Ok(())
}
