//! Static technology classification.
//!
//! Whether a technology is pass-through or draws no electricity is a property of
//! its registration, not of the database. Database content is validated against
//! these flags at load.

use std::collections::BTreeMap;

/// Capability flags of a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TechnologyFlags {
    /// No recovery or removal: treated stream equals the inlet.
    pub pass_through: bool,
    /// No electricity demand relation.
    pub no_electricity: bool,
}

impl TechnologyFlags {
    /// Single inlet, treated + byproduct outlets, constant electricity intensity.
    pub const SEPARATOR: TechnologyFlags = TechnologyFlags {
        pass_through: false,
        no_electricity: false,
    };

    pub const PASS_THROUGH: TechnologyFlags = TechnologyFlags {
        pass_through: true,
        no_electricity: false,
    };

    pub const NO_ELECTRICITY: TechnologyFlags = TechnologyFlags {
        pass_through: false,
        no_electricity: true,
    };
}

const BUILTIN_PASS_THROUGH: &[&str] = &["chemical_addition", "pump"];

const BUILTIN_NO_ELECTRICITY: &[&str] = &[
    "energy_recovery",
    "mbr_denitrification",
    "mbr_nitrification",
    "multi_stage_bubble_aeration",
    "tri_media_filtration",
    "cartridge_filtration_with_backflush",
    "landfill",
    "well_field",
    "uv_aop",
    "anion_exchange",
    "ozone_aop",
    "fixed_bed_pressure_vessel",
    "holding_tank",
    "heap_leaching",
    "nuclear_cooling_tower",
    "lime_softening",
    "ozonation",
    "cooling_tower",
    "gac_pressure_vessel",
    "tri_media_filtration_with_backflush",
    "sedimentation",
    "backwash_solids_handling",
    "ph_decrease",
    "ph_increase",
    "co2_addition",
    "coag_and_floc",
    "crystallizer",
    "gac_gravity",
    "iron_and_manganese_removal",
    "fluidized_bed",
    "uv_irradiation",
    "cation_exchange",
    "surface_discharge",
    "solution_distribution_and_recovery_plant",
    "chemical_addition",
    "cartridge_filtration",
    "injection_well",
    "sw_onshore_intake",
    "filter_press",
    "municipal_drinking",
    "gac_pressure_30_min",
    "packed_tower_aeration",
    "treated_storage",
    "gac_gravity_60_min",
    "evaporation_pond",
    "lime_addition",
    "brine_concentrator",
    "fixed_bed_gravity_basin",
    "agglom_stacking",
    "landfill_zld",
];

/// Technology name to flags. Unregistered technologies use the default flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechnologyRegistry {
    flags: BTreeMap<String, TechnologyFlags>,
}

impl TechnologyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the classification of the standard technology set.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        for name in BUILTIN_PASS_THROUGH {
            reg.entry(name).pass_through = true;
        }
        for name in BUILTIN_NO_ELECTRICITY {
            reg.entry(name).no_electricity = true;
        }
        reg
    }

    /// Register (or replace) the flags of a technology.
    pub fn register(&mut self, technology: impl Into<String>, flags: TechnologyFlags) -> &mut Self {
        self.flags.insert(technology.into(), flags);
        self
    }

    pub fn flags(&self, technology: &str) -> TechnologyFlags {
        self.flags.get(technology).copied().unwrap_or_default()
    }

    pub fn is_registered(&self, technology: &str) -> bool {
        self.flags.contains_key(technology)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TechnologyFlags)> + '_ {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn entry(&mut self, technology: &str) -> &mut TechnologyFlags {
        self.flags.entry(technology.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_classification() {
        let reg = TechnologyRegistry::builtin();
        assert_eq!(reg.flags("pump"), TechnologyFlags::PASS_THROUGH);
        assert_eq!(reg.flags("sedimentation"), TechnologyFlags::NO_ELECTRICITY);
        assert_eq!(
            reg.flags("chemical_addition"),
            TechnologyFlags {
                pass_through: true,
                no_electricity: true
            }
        );
        assert_eq!(reg.flags("nanofiltration"), TechnologyFlags::SEPARATOR);
        assert!(!reg.is_registered("nanofiltration"));
    }

    #[test]
    fn register_overrides() {
        let mut reg = TechnologyRegistry::builtin();
        reg.register("sedimentation", TechnologyFlags::SEPARATOR);
        assert_eq!(reg.flags("sedimentation"), TechnologyFlags::SEPARATOR);
    }
}
