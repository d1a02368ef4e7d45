use colorcloud::{AppError, CoordinatorBuilder, Settings};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: colorcloud <image> [--config <file>]";

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

struct Args {
    image: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, AppError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut image = None;
    let mut config = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| AppError::InvalidConfig(USAGE.to_string()))?;
                config = Some(PathBuf::from(path));
                i += 2;
            }
            arg if image.is_none() && !arg.starts_with("--") => {
                image = Some(PathBuf::from(arg));
                i += 1;
            }
            other => {
                return Err(AppError::InvalidConfig(format!(
                    "unexpected argument '{other}'\n{USAGE}"
                )));
            }
        }
    }

    let image = image.ok_or_else(|| AppError::InvalidConfig(USAGE.to_string()))?;
    Ok(Args { image, config })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    init_logging();
    let args = parse_args()?;
    let settings = Settings::load(args.config.as_deref())?;

    let mut coordinator = CoordinatorBuilder::new(settings).build()?;
    let context = coordinator.run(&args.image).await?;

    if let Some(failure) = &context.authoring_error {
        tracing::warn!("Scene authoring did not complete: {}", failure);
    }
    Ok(())
}
