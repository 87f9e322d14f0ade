pub mod autores;
mod docs;
pub mod libros;

#[cfg(test)]
pub(crate) mod testing;

use biblioteca_db::Database;
use biblioteca_kernel::ModuleRegistry;

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) -> anyhow::Result<()> {
    registry.register(autores::create_module(db))?;
    registry.register(libros::create_module(db))?;
    Ok(())
}
