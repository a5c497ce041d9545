use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

use asthma_inference::predict;
use asthma_inference::records::AsthmaRecord;

#[derive(Parser, Debug)]
#[command(
    name = "predict-asthma",
    version,
    about = "Score one patient feature record against the fitted asthma model"
)]
struct PredictArgs {
    /// JSON object with the 26 patient feature fields, values pre-encoded
    record: Option<String>,
    /// Directory holding the fitted artifacts (scaler, model, encoders)
    #[arg(short, long, default_value = ".")]
    model_dir: PathBuf,
    /// Display the expected input schema and exit
    #[arg(long)]
    schema: bool,
    /// Verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = PredictArgs::parse();

    let log_level = match cli.verbose {
        1 => LevelFilter::Debug,
        2 => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let env = Env::new().filter("ASTHMA_LOG");
    Builder::new()
        .filter(Some("asthma_inference"), log_level)
        .filter(Some("predict_asthma"), log_level)
        .parse_env(env)
        .init();

    debug!("arguments {:?}", cli);

    if cli.schema {
        for field in AsthmaRecord::raw_schema().iter_fields() {
            println!("{}: {}", field.name(), field.data_type());
        }
        return;
    }

    let start_time = Instant::now();
    match predict::run(&cli.model_dir, cli.record.as_deref()).await {
        Ok(prediction) => {
            debug!("prediction took {:?}", start_time.elapsed());
            println!("{prediction}");
        }
        Err(err) => {
            eprintln!("error: {err}");
            debug!("{err:?}");
            process::exit(1);
        }
    }
}
