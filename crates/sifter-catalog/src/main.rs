use clap::Parser;
use sifter_catalog::{catalog, demonstrations, Color, Combine, Criteria, Size};

#[derive(Parser)]
#[command(
    name = "sifter-catalog",
    about = "Filter a small product catalog with composed specifications",
    after_help = "Without criteria, walks through the canonical examples."
)]
struct Cli {
    /// Keep products of this color.
    #[arg(long, value_enum)]
    color: Option<Color>,

    /// Keep products of this size.
    #[arg(long, value_enum)]
    size: Option<Size>,

    /// Drop products of this color.
    #[arg(long, value_enum)]
    exclude_color: Option<Color>,

    /// Keep products whose name contains this text.
    #[arg(long)]
    name_contains: Option<String>,

    /// Keep products matching any criterion instead of all of them.
    #[arg(long)]
    any: bool,

    /// Print debug logs to stderr (filter with RUST_LOG).
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn criteria(&self) -> Criteria {
        Criteria {
            color: self.color,
            size: self.size,
            exclude_color: self.exclude_color,
            name_contains: self.name_contains.clone(),
            combine: if self.any { Combine::Any } else { Combine::All },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sifter-catalog debug log started");
    }

    let products = catalog();
    let criteria = cli.criteria();

    if criteria.is_empty() {
        if cli.any {
            anyhow::bail!("--any needs at least one criterion to combine");
        }
        for demo in demonstrations() {
            for line in demo.lines(&products) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let selected = criteria.select(&products)?;
    if selected.is_empty() {
        println!("No products match.");
    }
    for product in selected {
        println!("{product}");
    }
    Ok(())
}
