use anyhow::Context;
use clap::Parser;
use dermacore::TreatmentMap;
use results::view;
use std::path::PathBuf;
use submission::session::{Session, SubmitRoute};
use submission::settings::ClientSettings;
use tokio::runtime::Builder as TokioBuilder;

mod results;
mod submission;

#[derive(Parser)]
#[command(author, version, about = "Console client for the DermaScan acne detection service")]
struct Args {
    /// Photo to submit for analysis
    #[arg(long, value_name = "FILE")]
    image: PathBuf,
    /// Load client settings from YAML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the detection service base URL
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,
    /// Use the one-shot upload endpoint instead of the annotated flow
    #[arg(long, default_value_t = false)]
    upload: bool,
    /// Save the annotated image to this path
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = ClientSettings::resolve(args.config.as_deref(), args.api_base.as_deref())?;
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating client runtime")?;
    runtime.block_on(run(args, settings))
}

async fn run(args: Args, settings: ClientSettings) -> anyhow::Result<()> {
    let mut session = Session::new(settings, TreatmentMap::standard())?;
    session.select(args.image.clone());

    let route = if args.upload {
        SubmitRoute::Upload
    } else {
        SubmitRoute::Annotated
    };

    println!("Processing {}...", args.image.display());
    match session.submit(route).await? {
        Some(model) => {
            print!("{}", view::render(&model));
            if let Some(dest) = &args.save {
                match session.annotated() {
                    Some(image) => {
                        let bytes = image.persist_to(dest).with_context(|| {
                            format!("saving annotated image to {}", dest.display())
                        })?;
                        println!("Annotated image saved to {} ({} bytes)", dest.display(), bytes);
                    }
                    None => println!("No annotated image was returned; nothing saved."),
                }
            }
        }
        None => println!("Nothing was submitted: {} is empty.", args.image.display()),
    }

    let (submissions, fallbacks, failures) = session.metrics_snapshot();
    log::debug!(
        "session metrics: submissions={} fallbacks={} failures={}",
        submissions,
        fallbacks,
        failures
    );
    session.clear();
    Ok(())
}
