use control_map_catalog::CatalogError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}
