//! Parameter record validation.
//!
//! Runs once, when the database is built. Any violation rejects the whole
//! database so a unit model never sees a partially valid record.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use wt_core::{Dimension, UnitError, UnitTag, ensure_fraction, ensure_non_negative};

use crate::record::{DEFAULT_VARIANT, Param, ParameterRecord, RecordSet};
use crate::schema::{RecordDef, TechnologyDef, ValueDef};
use crate::technology::TechnologyFlags;

pub const RECOVERY_FIELD: &str = "recovery_frac_mass_H2O";
pub const REMOVAL_FIELD: &str = "removal_frac_mass_solute";
pub const DEFAULT_REMOVAL_FIELD: &str = "default_removal_frac_mass_solute";
pub const ENERGY_FIELD: &str = "energy_electric_flow_vol_inlet";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Technology '{technology}' has no 'default' record")]
    MissingDefault { technology: String },

    #[error("Missing field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Field not allowed: {field} in {context} ({reason})")]
    ForbiddenField {
        field: String,
        context: String,
        reason: &'static str,
    },

    #[error("Invalid value: {field} = {value} in {context} ({reason})")]
    InvalidValue {
        field: String,
        value: f64,
        context: String,
        reason: &'static str,
    },

    #[error("Invalid units for {field} in {context}: {source}")]
    InvalidUnits {
        field: String,
        context: String,
        #[source]
        source: UnitError,
    },

    #[error(
        "Units '{units}' for {field} in {context} have dimension {found}, expected {expected}"
    )]
    WrongDimension {
        field: String,
        context: String,
        units: String,
        expected: Dimension,
        found: Dimension,
    },

    #[error("Unknown component '{component}' in {context}")]
    UnknownComponent { component: String, context: String },
}

/// Validate every variant of one technology against its flags.
///
/// `components`, when given, is the declared component list; every solute with
/// explicit removal data must appear in it.
pub fn validate_technology(
    technology: &str,
    def: &TechnologyDef,
    flags: TechnologyFlags,
    components: Option<&BTreeSet<String>>,
) -> Result<RecordSet, ValidationError> {
    if !def.contains_key(DEFAULT_VARIANT) {
        return Err(ValidationError::MissingDefault {
            technology: technology.to_string(),
        });
    }

    let mut records = BTreeMap::new();
    for (variant, rec) in def {
        let record = validate_record(technology, variant, rec, flags, components)?;
        records.insert(variant.clone(), Arc::new(record));
    }

    Ok(RecordSet {
        technology: technology.to_string(),
        flags,
        records,
    })
}

fn validate_record(
    technology: &str,
    variant: &str,
    rec: &RecordDef,
    flags: TechnologyFlags,
    components: Option<&BTreeSet<String>>,
) -> Result<ParameterRecord, ValidationError> {
    let context = format!("{technology}/{variant}");

    if flags.pass_through {
        let declared = [
            (RECOVERY_FIELD, rec.recovery_frac_mass_h2o.is_some()),
            (REMOVAL_FIELD, rec.removal_frac_mass_solute.is_some()),
            (
                DEFAULT_REMOVAL_FIELD,
                rec.default_removal_frac_mass_solute.is_some(),
            ),
        ];
        if let Some((field, _)) = declared.iter().find(|(_, present)| *present) {
            return Err(ValidationError::ForbiddenField {
                field: field.to_string(),
                context,
                reason: "pass-through technologies have no recovery or removal",
            });
        }
    } else {
        if rec.recovery_frac_mass_h2o.is_none() {
            return Err(missing(RECOVERY_FIELD, &context));
        }
        if rec.default_removal_frac_mass_solute.is_none() {
            return Err(missing(DEFAULT_REMOVAL_FIELD, &context));
        }
    }

    if flags.no_electricity {
        if rec.energy_electric_flow_vol_inlet.is_some() {
            return Err(ValidationError::ForbiddenField {
                field: ENERGY_FIELD.to_string(),
                context,
                reason: "technology is registered as drawing no electricity",
            });
        }
    } else if rec.energy_electric_flow_vol_inlet.is_none() {
        return Err(missing(ENERGY_FIELD, &context));
    }

    let recovery = rec
        .recovery_frac_mass_h2o
        .as_ref()
        .map(|v| fraction(RECOVERY_FIELD, v, &context))
        .transpose()?;

    let default_removal = rec
        .default_removal_frac_mass_solute
        .as_ref()
        .map(|v| fraction(DEFAULT_REMOVAL_FIELD, v, &context))
        .transpose()?;

    let mut removal = BTreeMap::new();
    for (solute, v) in rec.removal_frac_mass_solute.iter().flatten() {
        if let Some(components) = components {
            if !components.contains(solute) {
                return Err(ValidationError::UnknownComponent {
                    component: solute.clone(),
                    context,
                });
            }
        }
        let field = format!("{REMOVAL_FIELD}[{solute}]");
        removal.insert(solute.clone(), fraction(&field, v, &context)?);
    }

    let energy = rec
        .energy_electric_flow_vol_inlet
        .as_ref()
        .map(|v| energy_intensity(v, &context))
        .transpose()?;

    Ok(ParameterRecord {
        technology: technology.to_string(),
        variant: variant.to_string(),
        recovery_frac_mass_h2o: recovery,
        removal_frac_mass_solute: removal,
        default_removal_frac_mass_solute: default_removal,
        energy_electric_flow_vol_inlet: energy,
    })
}

fn missing(field: &str, context: &str) -> ValidationError {
    ValidationError::MissingField {
        field: field.to_string(),
        context: context.to_string(),
    }
}

fn units_of(
    field: &str,
    v: &ValueDef,
    expected: Dimension,
    context: &str,
) -> Result<UnitTag, ValidationError> {
    let units = UnitTag::parse(&v.units).map_err(|source| ValidationError::InvalidUnits {
        field: field.to_string(),
        context: context.to_string(),
        source,
    })?;
    if units.dimension() != expected {
        return Err(ValidationError::WrongDimension {
            field: field.to_string(),
            context: context.to_string(),
            units: v.units.clone(),
            expected,
            found: units.dimension(),
        });
    }
    Ok(units)
}

fn fraction(field: &str, v: &ValueDef, context: &str) -> Result<Param, ValidationError> {
    let units = units_of(field, v, Dimension::NONE, context)?;
    // Percent tags are allowed; the bound applies to the dimensionless value.
    let frac = ensure_fraction(units.to_si(v.value), "fraction").map_err(|_| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            value: v.value,
            context: context.to_string(),
            reason: "fractions must lie in [0, 1]",
        }
    })?;
    Ok(Param::new(frac, UnitTag::dimensionless()))
}

fn energy_intensity(v: &ValueDef, context: &str) -> Result<Param, ValidationError> {
    let units = units_of(ENERGY_FIELD, v, Dimension::ENERGY_PER_VOLUME, context)?;
    let value = ensure_non_negative(v.value, "energy intensity").map_err(|_| {
        ValidationError::InvalidValue {
            field: ENERGY_FIELD.to_string(),
            value: v.value,
            context: context.to_string(),
            reason: "energy intensity must be finite and non-negative",
        }
    })?;
    Ok(Param::new(value, units))
}
