use super::{Catalog, CatalogItem};
use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub fn read_catalog_items<R: Read>(reader: R) -> Result<Vec<CatalogItem>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut items = vec![];
    for (row, record) in csv_reader.deserialize::<CatalogItem>().enumerate() {
        let item = record.with_context(|| format!("Invalid catalog row {}", row))?;
        items.push(item);
    }
    Ok(items)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open catalog file {}", path.display()))?;
    let items = read_catalog_items(file)
        .with_context(|| format!("Could not read catalog file {}", path.display()))?;

    let catalog_result = Catalog::build(items);
    let problems = catalog_result.problems;
    let catalog = catalog_result.catalog;

    if !problems.is_empty() {
        warn!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            warn!("- {:?}", problem);
        }
    }

    match (&catalog, problems.is_empty()) {
        (Some(_), true) => info!("Catalog checked, no issues found."),
        (Some(_), false) => info!(
            "Catalog was built, but check the {} non-fatal issues above.",
            problems.len()
        ),
        (None, _) => info!(
            "Check the {} problems above, the catalog could not be initialized.",
            problems.len()
        ),
    }
    if let Some(catalog) = catalog {
        info!("Catalog has {} tracks", catalog.size());
        return Ok(catalog);
    }

    bail!("Could not load catalog from {}", path.display());
}
