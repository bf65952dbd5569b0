pub mod loader;
pub mod joiner;

use std::path::Path;

use crate::{common::error::LoadError, models::dataset::Dataset};

/// Carrega o diretório e devolve o conjunto desnormalizado pronto para agregação.
pub fn load_dataset(dir: &Path) -> Result<Dataset, LoadError> {
    let tables = loader::load_tables(dir)?;
    Ok(joiner::join(&tables))
}
