//! wt-database: technology performance database for zero-order models.
//!
//! Records are ingested as raw `{units, value}` documents (`schema`), checked
//! once against the static technology classification (`technology`,
//! `validate`), and stored as immutable, typed `ParameterRecord`s.
//!
//! # Example
//!
//! ```
//! use wt_database::{Database, TechnologyRegistry};
//!
//! let yaml = r#"
//! default:
//!   recovery_frac_mass_H2O: {units: dimensionless, value: 0.99}
//!   default_removal_frac_mass_solute: {units: dimensionless, value: 0}
//!   removal_frac_mass_solute:
//!     tss: {units: dimensionless, value: 0.5}
//! "#;
//!
//! let db = Database::builder(TechnologyRegistry::builtin())
//!     .technology_yaml("sedimentation", yaml)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let rec = db.get_record("sedimentation", "default").unwrap();
//! assert_eq!(rec.removal_frac_mass_solute("tss").unwrap().value(), 0.5);
//! ```

pub mod record;
pub mod schema;
pub mod technology;
pub mod validate;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use wt_properties::SoluteRegistry;

pub use record::{DEFAULT_VARIANT, Param, ParameterRecord, RecordSet};
pub use schema::{ComponentListDef, RecordDef, TechnologyDef, ValueDef};
pub use technology::{TechnologyFlags, TechnologyRegistry};
pub use validate::{ValidationError, validate_technology};

/// Files in a parameter directory that do not describe a technology.
pub const NON_TECHNOLOGY_FILES: &[&str] = &["component_list.yaml", "water_sources.yaml"];

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("Unknown technology: {technology}")]
    NotFound { technology: String },

    #[error("Technology '{technology}' has no variant '{variant}'")]
    VariantNotFound { technology: String, variant: String },

    #[error("Technology '{technology}' defined more than once")]
    DuplicateTechnology { technology: String },

    #[error("Solutes without database coverage: {}", solutes.join(", "))]
    UnknownSolutes { solutes: Vec<String> },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("YAML error in {what}: {source}")]
    Yaml {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validated technology database.
///
/// Built once per run and passed by reference to the unit models that need it.
#[derive(Debug, Clone)]
pub struct Database {
    registry: TechnologyRegistry,
    technologies: BTreeMap<String, RecordSet>,
    components: Option<BTreeSet<String>>,
    catalog: BTreeSet<String>,
}

impl Database {
    pub fn builder(registry: TechnologyRegistry) -> DatabaseBuilder {
        DatabaseBuilder::new(registry)
    }

    /// Load every `<technology>.yaml` in `dir`, plus `component_list.yaml` if present.
    pub fn load_dir(dir: &Path, registry: TechnologyRegistry) -> DatabaseResult<Self> {
        let mut builder = DatabaseBuilder::new(registry);

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            if file_name == "component_list.yaml" {
                builder.component_list_yaml(&content)?;
                continue;
            }
            if NON_TECHNOLOGY_FILES.contains(&file_name) {
                continue;
            }
            let technology = file_name.trim_end_matches(".yaml");
            builder.technology_yaml(technology, &content)?;
        }

        builder.build()
    }

    /// Resolve one record.
    pub fn get_record(
        &self,
        technology: &str,
        variant: &str,
    ) -> DatabaseResult<Arc<ParameterRecord>> {
        let set = self.get_unit_operation_parameters(technology)?;
        set.get(variant)
            .cloned()
            .ok_or_else(|| DatabaseError::VariantNotFound {
                technology: technology.to_string(),
                variant: variant.to_string(),
            })
    }

    /// Resolve the `"default"` record of a technology.
    pub fn get_default_record(&self, technology: &str) -> DatabaseResult<Arc<ParameterRecord>> {
        self.get_record(technology, DEFAULT_VARIANT)
    }

    /// All variants of a technology. Always contains `"default"`.
    pub fn get_unit_operation_parameters(&self, technology: &str) -> DatabaseResult<&RecordSet> {
        self.technologies
            .get(technology)
            .ok_or_else(|| DatabaseError::NotFound {
                technology: technology.to_string(),
            })
    }

    /// Every solute any record has removal data for, plus the declared component list.
    pub fn get_solute_catalog(&self) -> &BTreeSet<String> {
        &self.catalog
    }

    /// Check that every solute of a flowsheet registry appears in the catalog.
    pub fn check_registry(&self, solutes: &SoluteRegistry) -> DatabaseResult<()> {
        let missing = solutes.missing_from(self.catalog.iter().map(String::as_str));
        if missing.is_empty() {
            return Ok(());
        }
        tracing::debug!(?missing, "solute registry not covered by the database");
        Err(DatabaseError::UnknownSolutes {
            solutes: missing.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn component_list(&self) -> Option<&BTreeSet<String>> {
        self.components.as_ref()
    }

    pub fn registry(&self) -> &TechnologyRegistry {
        &self.registry
    }

    pub fn technology_flags(&self, technology: &str) -> TechnologyFlags {
        self.registry.flags(technology)
    }

    pub fn technologies(&self) -> impl Iterator<Item = &str> + '_ {
        self.technologies.keys().map(String::as_str)
    }

    pub fn contains(&self, technology: &str) -> bool {
        self.technologies.contains_key(technology)
    }
}

/// Collects raw technology documents; `build` validates them all at once.
#[derive(Debug)]
pub struct DatabaseBuilder {
    registry: TechnologyRegistry,
    raw: BTreeMap<String, TechnologyDef>,
    components: Option<BTreeSet<String>>,
}

impl DatabaseBuilder {
    pub fn new(registry: TechnologyRegistry) -> Self {
        Self {
            registry,
            raw: BTreeMap::new(),
            components: None,
        }
    }

    pub fn technology(
        &mut self,
        technology: impl Into<String>,
        def: TechnologyDef,
    ) -> DatabaseResult<&mut Self> {
        let technology = technology.into();
        if self.raw.contains_key(&technology) {
            return Err(DatabaseError::DuplicateTechnology { technology });
        }
        self.raw.insert(technology, def);
        Ok(self)
    }

    pub fn technology_yaml(&mut self, technology: &str, yaml: &str) -> DatabaseResult<&mut Self> {
        let def: TechnologyDef =
            serde_yaml::from_str(yaml).map_err(|source| DatabaseError::Yaml {
                what: format!("technology '{technology}'"),
                source,
            })?;
        self.technology(technology, def)
    }

    pub fn component_list<I, S>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = Some(components.into_iter().map(Into::into).collect());
        self
    }

    pub fn component_list_yaml(&mut self, yaml: &str) -> DatabaseResult<&mut Self> {
        let list: ComponentListDef =
            serde_yaml::from_str(yaml).map_err(|source| DatabaseError::Yaml {
                what: "component list".to_string(),
                source,
            })?;
        let names: Vec<String> = list.names().map(str::to_string).collect();
        Ok(self.component_list(names))
    }

    /// Validate every technology. Any failure rejects the whole database.
    pub fn build(&mut self) -> DatabaseResult<Database> {
        let mut technologies = BTreeMap::new();
        let mut catalog = self.components.clone().unwrap_or_default();

        for (name, def) in &self.raw {
            let flags = self.registry.flags(name);
            let set = validate_technology(name, def, flags, self.components.as_ref())?;
            for (_, rec) in set.iter() {
                catalog.extend(rec.removal_fracs().map(|(j, _)| j.to_string()));
            }
            technologies.insert(name.clone(), set);
        }

        tracing::info!(
            technologies = technologies.len(),
            solutes = catalog.len(),
            "parameter database loaded"
        );

        Ok(Database {
            registry: self.registry.clone(),
            technologies,
            components: self.components.clone(),
            catalog,
        })
    }
}
