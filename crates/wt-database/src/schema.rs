//! Raw parameter file schema.
//!
//! These types mirror the on-disk record shape exactly. They never leave this
//! crate's loading path: `validate` turns them into `ParameterRecord`s.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// A `{units, value}` leaf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueDef {
    pub units: String,
    pub value: f64,
}

impl ValueDef {
    pub fn new(units: impl Into<String>, value: f64) -> Self {
        Self {
            units: units.into(),
            value,
        }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new("dimensionless", value)
    }
}

/// One parameter record (one variant of a technology).
///
/// Keys not listed here (cost data, references, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordDef {
    #[serde(
        rename = "recovery_frac_mass_H2O",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recovery_frac_mass_h2o: Option<ValueDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_frac_mass_solute: Option<BTreeMap<String, ValueDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_removal_frac_mass_solute: Option<ValueDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_electric_flow_vol_inlet: Option<ValueDef>,
}

/// All variants of one technology, keyed by variant name (`"default"`, ...).
pub type TechnologyDef = BTreeMap<String, RecordDef>;

/// Component list file: component name mapped to free-form metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ComponentListDef {
    pub components: BTreeMap<String, IgnoredAny>,
}

impl ComponentListDef {
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_with_unknown_keys() {
        let yaml = r#"
default:
  recovery_frac_mass_H2O:
    units: dimensionless
    value: 0.85
  default_removal_frac_mass_solute:
    units: dimensionless
    value: 0
  removal_frac_mass_solute:
    toc:
      units: dimensionless
      value: 0.75
  capital_cost:
    cost_factor: 1.2
"#;
        let def: TechnologyDef = serde_yaml::from_str(yaml).unwrap();
        let rec = &def["default"];
        assert_eq!(rec.recovery_frac_mass_h2o, Some(ValueDef::dimensionless(0.85)));
        assert_eq!(
            rec.removal_frac_mass_solute.as_ref().unwrap()["toc"].value,
            0.75
        );
        assert!(rec.energy_electric_flow_vol_inlet.is_none());
    }

    #[test]
    fn empty_record() {
        let def: TechnologyDef = serde_yaml::from_str("default: {}\n").unwrap();
        assert_eq!(def["default"], RecordDef::default());
    }

    #[test]
    fn yaml_round_trip_keeps_field_names() {
        let rec = RecordDef {
            recovery_frac_mass_h2o: Some(ValueDef::dimensionless(0.9)),
            ..RecordDef::default()
        };
        let text = serde_yaml::to_string(&rec).unwrap();
        assert!(text.contains("recovery_frac_mass_H2O"));
        let back: RecordDef = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn component_list_keys() {
        let list: ComponentListDef =
            serde_yaml::from_str("tss:\n  name: total suspended solids\ntoc: {}\n").unwrap();
        let names: Vec<&str> = list.names().collect();
        assert_eq!(names, vec!["toc", "tss"]);
    }
}
