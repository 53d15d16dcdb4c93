//! Loading the three planning inputs: catalog, goals, and inventory.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML; anything else is
//! parsed as JSON. Goals and inventory are flat `good: quantity` maps.
//! Quantities may be written as numbers or as decimal strings.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use oreganizer_types::{Good, Quantity, validate_quantity};

use crate::catalog::{Catalog, CatalogError, CatalogSpec};

/// Top-level goals: good -> quantity to have on hand, in file order.
pub type Goals = IndexMap<Good, Quantity>;

/// Starting inventory: good -> quantity held, in file order.
pub type Inventory = IndexMap<Good, Quantity>;

/// Errors that can occur while loading inputs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// JSON content did not match the expected shape.
    #[error("failed to parse {what} JSON: {source}")]
    Json {
        /// Which input was being parsed.
        what: &'static str,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// YAML content did not match the expected shape.
    #[error("failed to parse {what} YAML: {source}")]
    Yaml {
        /// Which input was being parsed.
        what: &'static str,
        /// The underlying YAML error.
        source: serde_yml::Error,
    },

    /// The catalog parsed but is not usable.
    #[error("invalid catalog: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// A goal or inventory entry was negative.
    #[error("{what} entry {good} has negative quantity {quantity}")]
    NegativeQuantity {
        /// Which input held the entry.
        what: &'static str,
        /// The offending good.
        good: Good,
        /// The negative quantity.
        quantity: Quantity,
    },
}

/// Text format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl InputFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Everything needed for one planning run, before compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanInput {
    /// Recipes as written.
    pub catalog: CatalogSpec,
    /// Top-level goals.
    pub goals: Goals,
    /// Starting inventory. Empty when no inventory file is given.
    pub inventory: Inventory,
}

impl PlanInput {
    /// Load catalog, goals, and (optionally) inventory files.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] from any of the three loaders.
    pub fn load(
        catalog: &Path,
        goals: &Path,
        inventory: Option<&Path>,
    ) -> Result<Self, InputError> {
        Ok(Self {
            catalog: load_catalog_spec(catalog)?,
            goals: load_goals(goals)?,
            inventory: inventory.map(load_inventory).transpose()?.unwrap_or_default(),
        })
    }

    /// Compile the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Catalog`] if the catalog is invalid.
    pub fn compile_catalog(&self) -> Result<Catalog, InputError> {
        let catalog = Catalog::compile(self.catalog.clone())?;
        tracing::info!(
            recipes = catalog.len(),
            goals = self.goals.len(),
            inventory = self.inventory.len(),
            "catalog compiled"
        );
        Ok(catalog)
    }
}

/// Load a catalog file without compiling it.
///
/// # Errors
///
/// Returns [`InputError::Io`] or a parse error.
pub fn load_catalog_spec(path: &Path) -> Result<CatalogSpec, InputError> {
    let text = read(path)?;
    parse(&text, InputFormat::from_path(path), "catalog")
}

/// Load a goals file.
///
/// # Errors
///
/// Returns [`InputError::Io`], a parse error, or
/// [`InputError::NegativeQuantity`].
pub fn load_goals(path: &Path) -> Result<Goals, InputError> {
    parse_quantities(&read(path)?, InputFormat::from_path(path), "goals")
}

/// Load an inventory file.
///
/// # Errors
///
/// Returns [`InputError::Io`], a parse error, or
/// [`InputError::NegativeQuantity`].
pub fn load_inventory(path: &Path) -> Result<Inventory, InputError> {
    parse_quantities(&read(path)?, InputFormat::from_path(path), "inventory")
}

/// Parse a catalog from text.
///
/// # Errors
///
/// Returns a parse error or [`InputError::Catalog`].
pub fn parse_catalog(text: &str, format: InputFormat) -> Result<Catalog, InputError> {
    let spec: CatalogSpec = parse(text, format, "catalog")?;
    Ok(Catalog::compile(spec)?)
}

/// Parse a `good: quantity` map from text, rejecting negative entries.
///
/// `what` names the input in error messages.
///
/// # Errors
///
/// Returns a parse error or [`InputError::NegativeQuantity`].
pub fn parse_quantities(
    text: &str,
    format: InputFormat,
    what: &'static str,
) -> Result<IndexMap<Good, Quantity>, InputError> {
    let map: IndexMap<Good, Quantity> = parse(text, format, what)?;
    for (good, quantity) in &map {
        if validate_quantity(*quantity).is_err() {
            return Err(InputError::NegativeQuantity {
                what,
                good: good.clone(),
                quantity: *quantity,
            });
        }
    }
    Ok(map)
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: DeserializeOwned>(
    text: &str,
    format: InputFormat,
    what: &'static str,
) -> Result<T, InputError> {
    match format {
        InputFormat::Json => {
            serde_json::from_str(text).map_err(|source| InputError::Json { what, source })
        }
        InputFormat::Yaml => {
            serde_yml::from_str(text).map_err(|source| InputError::Yaml { what, source })
        }
    }
}
