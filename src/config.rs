//! Generator configuration: which protocol version to compile, and where to
//! write the three output artifacts. Mirrors `prost-build`'s `Config`
//! builder — construct with defaults, override with setters, then call
//! [`Config::compile`].

use std::path::{Path, PathBuf};

use log::info;

use crate::emit::driver;
use crate::error::{GeneratorError, Result};
use crate::schema_types::SchemaCatalog;

/// Default output directory, matching the source generator's own
/// `MCP_PATH` default of the current working directory.
const DEFAULT_OUT_DIR: &str = ".";

pub struct Config {
    mc_version: String,
    out_dir: PathBuf,
}

impl Config {
    pub fn new(mc_version: impl Into<String>) -> Self {
        Config {
            mc_version: mc_version.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }

    /// Reads `MCP_MC` (protocol version, required) and `MCP_PATH` (output
    /// directory, optional) from the environment, matching the source
    /// generator's own `run(version)` entry point.
    pub fn from_env() -> Result<Self> {
        let mc_version = std::env::var("MCP_MC")
            .map_err(|_| GeneratorError::Catalog("MCP_MC is not set; export the target protocol version".into()))?;
        let mut config = Config::new(mc_version);
        if let Ok(path) = std::env::var("MCP_PATH") {
            config.out_dir = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn out_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.out_dir = path.as_ref().to_path_buf();
        self
    }

    /// Loads the protocol tree for the configured version through
    /// `catalog`, compiles every packet, and writes `mcp/particle.h`,
    /// `mcp/protocol.h`, and `protocol.c` under `out_dir`.
    pub fn compile(&self, catalog: &dyn SchemaCatalog) -> Result<()> {
        info!("loading protocol schema for version {}", self.mc_version);
        let tree = catalog.load(&self.mc_version)?;

        info!(
            "compiling {} packets across {} state/source listings",
            tree.packets.iter().map(|(_, _, p)| p.len()).sum::<usize>(),
            tree.packets.len()
        );
        let output = driver::generate(&tree)?;

        let mcp_dir = self.out_dir.join("mcp");
        std::fs::create_dir_all(&mcp_dir)?;
        std::fs::write(mcp_dir.join("particle.h"), output.particle_h)?;
        std::fs::write(mcp_dir.join("protocol.h"), output.protocol_h)?;
        std::fs::write(self.out_dir.join("protocol.c"), output.protocol_c)?;

        info!("wrote protocol.c and mcp/{{particle,protocol}}.h under {}", self.out_dir.display());
        Ok(())
    }
}
