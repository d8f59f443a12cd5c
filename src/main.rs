use std::sync::Arc;

use mimalloc::MiMalloc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use userstore::config::{CONFIG, redact_url};
use userstore::service::repository::{NoSession, SessionProvider, StaticSession};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &*CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(
        database_url = %redact_url(&cfg.database_url),
        loglevel = %cfg.loglevel,
        api_key = %cfg.api_key,
        worker_concurrency = cfg.worker_concurrency,
        "starting userstore"
    );
    if cfg.api_key.is_empty() {
        warn!("USERSTORE_API_KEY is not set; downstream calls will be unauthenticated");
    }

    // Review mode: analyze a diff and print the report instead of
    // serving the store.
    if let Some(diff_path) = cfg.review_diff.as_ref() {
        info!(path = %diff_path.display(), "analyzing diff");
        let diff = std::fs::read_to_string(diff_path)?;
        let review = userstore::review::analyze(&diff);
        info!(issues = review.total_issues(), "analysis complete");
        print!("{}", userstore::review::render_markdown(&review));
        return Ok(());
    }

    let storage = userstore::UserStorage::connect(&cfg.database_url).await?;
    storage.init_schema().await?;

    let session: Arc<dyn SessionProvider> = match cfg.session_user.as_deref() {
        Some(user) => Arc::new(StaticSession::new(user)),
        None => Arc::new(NoSession),
    };
    let repo = userstore::UserRepository::new(storage, session);

    if let Some(seed_path) = cfg.seed_path.as_ref() {
        match userstore::service::loader::load_from_dir(seed_path) {
            Ok(seeds) if !seeds.is_empty() => {
                info!(
                    path = %seed_path.display(),
                    count = seeds.len(),
                    "seeding users loaded from filesystem"
                );
                for seed in seeds {
                    repo.add_user(seed).await?;
                }
            }
            Ok(_) => {
                info!(path = %seed_path.display(), "no seed files discovered");
            }
            Err(e) => {
                warn!(
                    path = %seed_path.display(),
                    error = %e,
                    "failed to load seed users from directory"
                );
            }
        }
    }

    let users = repo.list_users().await?;
    info!(count = users.len(), "listing users");
    for user in &users {
        println!("User: {}", user.name);
    }

    if let Some(target) = cfg.session_user.as_deref() {
        let valid = repo.validate_user(target).await?;
        info!(user = target, valid, "session validation");
    }

    let pool = userstore::ProcessingPool::spawn(cfg.worker_concurrency, cfg.worker_queue_depth);
    let mut tickets = Vec::with_capacity(users.len());
    for user in &users {
        tickets.push(pool.submit(user.name.clone()).await?);
    }
    for ticket in tickets {
        ticket.wait().await?;
    }
    pool.shutdown().await;

    Ok(())
}
