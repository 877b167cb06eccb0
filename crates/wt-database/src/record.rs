//! Validated parameter records.

use std::collections::BTreeMap;
use std::sync::Arc;

use wt_core::UnitTag;

use crate::technology::TechnologyFlags;

/// Name of the variant every technology must provide.
pub const DEFAULT_VARIANT: &str = "default";

/// A validated, unit-tagged scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    value: f64,
    units: UnitTag,
}

impl Param {
    pub(crate) fn new(value: f64, units: UnitTag) -> Self {
        Self { value, units }
    }

    /// Value in the record's own units.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &UnitTag {
        &self.units
    }

    /// Value expressed in `target` units, if the dimensions agree.
    pub fn value_in(&self, target: &UnitTag) -> Option<f64> {
        self.units.convert_to(self.value, target)
    }
}

/// One variant of one technology's performance data.
///
/// Immutable once validated; shared by reference between unit models.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    pub(crate) technology: String,
    pub(crate) variant: String,
    pub(crate) recovery_frac_mass_h2o: Option<Param>,
    pub(crate) removal_frac_mass_solute: BTreeMap<String, Param>,
    pub(crate) default_removal_frac_mass_solute: Option<Param>,
    pub(crate) energy_electric_flow_vol_inlet: Option<Param>,
}

impl ParameterRecord {
    pub fn technology(&self) -> &str {
        &self.technology
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn recovery_frac_mass_h2o(&self) -> Option<&Param> {
        self.recovery_frac_mass_h2o.as_ref()
    }

    /// Explicit removal fraction of one solute.
    pub fn removal_frac_mass_solute(&self, solute: &str) -> Option<&Param> {
        self.removal_frac_mass_solute.get(solute)
    }

    pub fn removal_fracs(&self) -> impl Iterator<Item = (&str, &Param)> + '_ {
        self.removal_frac_mass_solute
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn default_removal_frac_mass_solute(&self) -> Option<&Param> {
        self.default_removal_frac_mass_solute.as_ref()
    }

    pub fn energy_electric_flow_vol_inlet(&self) -> Option<&Param> {
        self.energy_electric_flow_vol_inlet.as_ref()
    }
}

/// All validated variants of one technology.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub(crate) technology: String,
    pub(crate) flags: TechnologyFlags,
    pub(crate) records: BTreeMap<String, Arc<ParameterRecord>>,
}

impl RecordSet {
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Flags the records were validated against.
    pub fn flags(&self) -> TechnologyFlags {
        self.flags
    }

    pub fn get(&self, variant: &str) -> Option<&Arc<ParameterRecord>> {
        self.records.get(variant)
    }

    pub fn contains_key(&self, variant: &str) -> bool {
        self.records.contains_key(variant)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ParameterRecord>)> + '_ {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}
