//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Device-local storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding guest cart and wishlist state
    #[arg(long, env = "QUIRE_DATA_DIR", default_value = ".quire")]
    pub data_dir: PathBuf,
}
