use log::error;
use protocodegen::catalog::{default_catalog_root, JsonFileCatalog};
use protocodegen::Config;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> protocodegen::Result<()> {
    let config = Config::from_env()?;
    let catalog = JsonFileCatalog::new(default_catalog_root());
    config.compile(&catalog)
}
