use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
pub struct BackendConfig {
    #[arg(
        long,
        env = "CATALOG_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db or similar, default is sqlite://[data-dir]/catalog.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "CATALOG_DATA_DIR",
        help = "Data directory for the catalog database, default is system default like ~/.local/share/codeflix-catalog",
        default_value_t = default_data_dir()
    )]
    data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("codeflix-catalog"))
        .unwrap_or_else(|| PathBuf::from("codeflix-catalog"))
        .to_string_lossy()
        .to_string()
}

impl BackendConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/catalog.db", self.data_dir))
    }

    /// True when the database file lives in the data directory
    pub fn uses_data_dir(&self) -> bool {
        self.database_url.is_none()
    }
}
