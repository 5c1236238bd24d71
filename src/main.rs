use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use auditoria_importer::bundle::ExportBundle;
use auditoria_importer::error::ImportError;
use auditoria_importer::import::Importer;
use auditoria_importer::store::{FirestoreClient, FirestoreConfig, ServiceAccountKey};

#[derive(Parser, Debug)]
#[command(
    name = "auditoria-importer",
    about = "Import an exported auditoria JSON bundle into Cloud Firestore"
)]
struct Args {
    /// Path of the JSON export produced by the relational exporter.
    #[arg(long, default_value = "./data_export_firestore.json")]
    data: PathBuf,

    /// Path of the service account key file for the target project.
    #[arg(long, default_value = "./firebase-service-account.json")]
    credentials: PathBuf,

    /// Target project id. Defaults to the project id in the key file.
    #[arg(long)]
    project: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if let Err(error) = run(args).await {
        log::error!("import failed: {error}");
        if let ImportError::Store(store_error) = &error {
            if let Some(code) = store_error.store_code() {
                log::error!("store error code: {code}");
            }
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ImportError> {
    let key = ServiceAccountKey::load(&args.credentials)?;

    let project_id = args
        .project
        .or_else(|| key.project_id.clone())
        .ok_or(ImportError::ProjectId)?;

    let config = FirestoreConfig::new(project_id);
    log::info!("starting import into project '{}'", config.project_id);

    let client = FirestoreClient::new(config, key)?;

    let bundle = ExportBundle::load(&args.data)?;
    log::info!("loaded export with {} collections", bundle.len());

    let report = Importer::new(&client).run(&bundle).await?;

    log::info!(
        "import complete: {} operations across {} collections",
        report.total_operations(),
        report
            .collections
            .iter()
            .filter(|collection| !collection.skipped)
            .count()
    );

    Ok(())
}
