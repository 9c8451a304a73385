use crate::errors::{CatalogError, CatalogResult};
use schema::{SpeciesStats, TrainerProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

/// On-disk layout of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogData {
    species: Vec<SpeciesStats>,
    #[serde(default)]
    trainers: Vec<TrainerProfile>,
}

/// Read-only creature catalog and trainer roster. Species are shared with
/// every participant instantiated from them.
#[derive(Debug, Clone)]
pub struct Catalog {
    species: Vec<Arc<SpeciesStats>>,
    trainers: Vec<TrainerProfile>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_ron_str(&content)?;
        info!(
            path = %path.display(),
            species = catalog.species.len(),
            trainers = catalog.trainers.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let data: CatalogData = ron::from_str(source)?;
        validate(&data)?;
        Ok(Catalog {
            species: data.species.into_iter().map(Arc::new).collect(),
            trainers: data.trainers,
        })
    }

    /// Every species, in catalog order. This is the candidate pool for
    /// team generation.
    pub fn species(&self) -> &[Arc<SpeciesStats>] {
        &self.species
    }

    pub fn trainers(&self) -> &[TrainerProfile] {
        &self.trainers
    }

    /// Case-insensitive lookup by species name.
    pub fn find_species(&self, name: &str) -> Option<Arc<SpeciesStats>> {
        self.species
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Case-insensitive lookup by trainer name.
    pub fn trainer(&self, name: &str) -> CatalogResult<&TrainerProfile> {
        self.trainers
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::TrainerNotFound(name.to_string()))
    }
}

fn validate(data: &CatalogData) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for species in &data.species {
        if !(1..=2).contains(&species.types.len()) {
            return Err(CatalogError::MalformedData(format!(
                "{} must have one or two types, found {}",
                species.name,
                species.types.len()
            )));
        }
        let stats = &species.base_stats;
        if stats.hp == 0 || stats.defense == 0 || stats.sp_defense == 0 {
            return Err(CatalogError::MalformedData(format!(
                "{} has a zero HP or defensive stat",
                species.name
            )));
        }
        if !seen.insert(species.name.to_lowercase()) {
            return Err(CatalogError::DuplicateSpecies(species.name.clone()));
        }
    }
    for trainer in &data.trainers {
        if trainer.team_size == 0 {
            return Err(CatalogError::MalformedData(format!(
                "trainer {} has an empty team",
                trainer.name
            )));
        }
    }
    Ok(())
}
