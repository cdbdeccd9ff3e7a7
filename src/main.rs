use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use log::info;

use fractal_frontier::controllers::interactive::ports::bookmark_store::BookmarkStore;
use fractal_frontier::core::data::bookmark::BookmarkKey;
use fractal_frontier::{
    ExplorerConfig, FractalEngine, JsonBookmarkStore, PpmFilePresenter, SnapshotController,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let bookmark_name = args.next().map(|arg| arg.to_string_lossy().into_owned());

    let config = match config_path {
        Some(path) => ExplorerConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => {
            info!("no config given, using defaults");
            ExplorerConfig::default()
        }
    };

    let settings = config.validate().context("validating config")?;
    let engine = Arc::new(FractalEngine::new(settings.worker_count).context("starting render engine")?);

    let mut controller = SnapshotController::new(engine, PpmFilePresenter::new());
    match bookmark_name {
        Some(name) => {
            let store = JsonBookmarkStore::new(&settings.bookmark_path);
            let bookmark = store
                .load(&BookmarkKey::Name(name.clone()))
                .with_context(|| {
                    format!(
                        "loading bookmark \"{}\" from {}",
                        name,
                        settings.bookmark_path.display()
                    )
                })?;
            controller.generate_bookmark(settings.home, bookmark)
        }
        None => controller.generate(settings.home),
    }
    .context("rendering frame")?;

    if let Some(parent) = settings.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let written = controller
        .write(&settings.output_path)
        .with_context(|| format!("writing {}", settings.output_path.display()))?;
    if !written {
        bail!("no frame was rendered");
    }

    Ok(())
}
