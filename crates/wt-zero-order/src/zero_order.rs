//! Generic zero-order unit model.
//!
//! Provides:
//! - `ZeroOrderUnit::build` / `build_with`: inlet, treated and byproduct
//!   streams, mass balances and (unless flagged otherwise) the electricity
//!   relation
//! - `load_parameters`: binds a parameter record to the unit's variables
//! - read-back helpers (`flow_mass_comp`, `stream_state`, `electricity_demand`)
//!
//! ## Mass balances
//!
//! For a separator (not pass-through), per time point `t` and solute `j`:
//!
//! ```text
//! treated[H2O]    = recovery · inlet[H2O]          (constraint)
//! byproduct[H2O] := inlet[H2O] - treated[H2O]      (expression)
//! byproduct[j]    = removal[j] · inlet[j]          (constraint)
//! treated[j]     := inlet[j] - byproduct[j]        (expression)
//! ```
//!
//! Derived streams are subtraction expressions, so inlet = treated + byproduct
//! holds for any variable values. A pass-through unit exposes the inlet
//! variables as its treated stream and a zero byproduct stream.

use std::collections::BTreeMap;
use std::sync::Arc;

use uom::si::mass_rate::kilogram_per_second;
use wt_core::units::{MassRate, Power, kgps, kw};
use wt_core::{UnitTag, VarId};
use wt_database::{Database, Param, ParameterRecord, TechnologyFlags};
use wt_model::{
    Block, Constraint, Expr, Port, SolveReport, Var, assert_units_consistent, degrees_of_freedom,
    solve_sequential,
};
use wt_properties::{PropertyError, StreamState, WATER, WaterProperties};

use crate::config::UnitConfig;
use crate::electricity;
use crate::error::{UnitModelError, UnitModelResult};
use crate::traits::{ExtraRelations, NoExtraRelations};

pub const INLET: &str = "inlet";
pub const TREATED: &str = "treated";
pub const BYPRODUCT: &str = "byproduct";

/// Lower bound of the water recovery fraction.
pub const RECOVERY_LOWER: f64 = 1e-8;
/// Upper bound of the water recovery fraction.
pub const RECOVERY_UPPER: f64 = 1.0000001;

pub(crate) const MASS_FLOW_UNITS: &str = "kg/s";

/// A zero-order treatment unit and its algebraic model.
#[derive(Debug, Clone)]
pub struct ZeroOrderUnit {
    pub(crate) config: UnitConfig,
    pub(crate) properties: Arc<WaterProperties>,
    pub(crate) block: Block,
    pub(crate) inlet: BTreeMap<(usize, String), VarId>,
    pub(crate) recovery: Vec<VarId>,
    pub(crate) removal: BTreeMap<(usize, String), VarId>,
    pub(crate) electricity: Vec<VarId>,
    pub(crate) energy_intensity: Option<VarId>,
}

fn time_index(t: usize) -> String {
    t.to_string()
}

fn species_index(t: usize, species: &str) -> String {
    format!("{t},{species}")
}

impl ZeroOrderUnit {
    /// Build the generic structure for `config`.
    pub fn build(properties: Arc<WaterProperties>, config: UnitConfig) -> UnitModelResult<Self> {
        Self::build_with(properties, config, &NoExtraRelations)
    }

    /// Build the generic structure, then apply technology-specific relations.
    pub fn build_with(
        properties: Arc<WaterProperties>,
        config: UnitConfig,
        extra: &dyn ExtraRelations,
    ) -> UnitModelResult<Self> {
        config.validate()?;

        let flags = config.flags;
        let mut unit = Self {
            block: Block::new(config.technology.clone()),
            config,
            properties,
            inlet: BTreeMap::new(),
            recovery: Vec::new(),
            removal: BTreeMap::new(),
            electricity: Vec::new(),
            energy_intensity: None,
        };

        let inlet_port = unit.build_inlet()?;
        let (treated, byproduct) = if flags.pass_through {
            unit.build_pass_through()?
        } else {
            unit.build_separator()?
        };
        unit.block.add_port(inlet_port)?;
        unit.block.add_port(treated)?;
        unit.block.add_port(byproduct)?;

        if !flags.no_electricity {
            electricity::constant_intensity(&mut unit)?;
        }

        extra.build_extra(&mut unit)?;

        tracing::debug!(
            technology = %unit.config.technology,
            pass_through = flags.pass_through,
            no_electricity = flags.no_electricity,
            vars = unit.block.num_vars(),
            constraints = unit.block.num_constraints(),
            "built zero-order unit"
        );
        Ok(unit)
    }

    fn component_names(&self) -> Vec<String> {
        self.properties
            .component_list()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn solute_names(&self) -> Vec<String> {
        self.properties.solutes().solutes().to_vec()
    }

    fn build_inlet(&mut self) -> UnitModelResult<Port> {
        let kgps = UnitTag::parse(MASS_FLOW_UNITS)?;
        let components = self.component_names();
        let mut port = Port::new(INLET);

        for t in 0..self.config.time.len() {
            for j in &components {
                let id = self.block.add_var(
                    Var::new("inlet.flow_mass_comp", kgps.clone())
                        .indexed(species_index(t, j))
                        .bounds(Some(0.0), None),
                )?;
                self.inlet.insert((t, j.clone()), id);
                port.insert(t, j.clone(), Expr::var(id));
            }
        }
        Ok(port)
    }

    fn build_pass_through(&mut self) -> UnitModelResult<(Port, Port)> {
        let kgps = UnitTag::parse(MASS_FLOW_UNITS)?;
        let mut treated = Port::new(TREATED);
        let mut byproduct = Port::new(BYPRODUCT);

        for ((t, j), id) in &self.inlet {
            treated.insert(*t, j.clone(), Expr::var(*id));
            byproduct.insert(*t, j.clone(), Expr::zero(kgps.clone()));
        }
        Ok((treated, byproduct))
    }

    fn build_separator(&mut self) -> UnitModelResult<(Port, Port)> {
        let kgps = UnitTag::parse(MASS_FLOW_UNITS)?;
        let solutes = self.solute_names();
        let mut treated = Port::new(TREATED);
        let mut byproduct = Port::new(BYPRODUCT);

        for t in 0..self.config.time.len() {
            let inlet_w = self.inlet_var(t, WATER)?;

            let recovery = self.block.add_var(
                Var::new("recovery_frac_mass_H2O", UnitTag::dimensionless())
                    .indexed(time_index(t))
                    .bounds(Some(RECOVERY_LOWER), Some(RECOVERY_UPPER))
                    .initial(0.8),
            )?;
            let treated_w = self.block.add_var(
                Var::new("treated.flow_mass_comp", kgps.clone())
                    .indexed(species_index(t, WATER))
                    .bounds(Some(0.0), None),
            )?;
            self.block.add_constraint(
                Constraint::new(
                    "water_recovery_equation",
                    Expr::var(treated_w),
                    Expr::var(recovery) * Expr::var(inlet_w),
                )
                .indexed(time_index(t)),
            )?;
            self.recovery.push(recovery);
            treated.insert(t, WATER, Expr::var(treated_w));
            byproduct.insert(t, WATER, Expr::var(inlet_w) - Expr::var(treated_w));

            for j in &solutes {
                let inlet_j = self.inlet_var(t, j)?;
                let removal = self.block.add_var(
                    Var::new("removal_frac_mass_solute", UnitTag::dimensionless())
                        .indexed(species_index(t, j))
                        .bounds(Some(0.0), None),
                )?;
                let byproduct_j = self.block.add_var(
                    Var::new("byproduct.flow_mass_comp", kgps.clone())
                        .indexed(species_index(t, j))
                        .bounds(Some(0.0), None),
                )?;
                self.block.add_constraint(
                    Constraint::new(
                        "solute_removal_equation",
                        Expr::var(byproduct_j),
                        Expr::var(removal) * Expr::var(inlet_j),
                    )
                    .indexed(species_index(t, j)),
                )?;
                self.removal.insert((t, j.clone()), removal);
                byproduct.insert(t, j.clone(), Expr::var(byproduct_j));
                treated.insert(t, j.clone(), Expr::var(inlet_j) - Expr::var(byproduct_j));
            }
        }
        Ok((treated, byproduct))
    }

    fn inlet_var(&self, t: usize, species: &str) -> UnitModelResult<VarId> {
        self.check_time(t)?;
        self.inlet
            .get(&(t, species.to_string()))
            .copied()
            .ok_or_else(|| UnitModelError::UnknownSpecies {
                name: species.to_string(),
            })
    }

    fn check_time(&self, t: usize) -> UnitModelResult<()> {
        let len = self.config.time.len();
        if t >= len {
            return Err(UnitModelError::TimeIndex { t, len });
        }
        Ok(())
    }

    // ---- parameters ----

    /// Fix the unit's parameter variables from `record`.
    ///
    /// Explicit per-solute removal fractions take precedence; otherwise the
    /// record's default removal fraction is used when `use_default_removal` is
    /// set. Every value is resolved before anything is fixed, so a failure
    /// leaves the unit untouched. Calling this twice with the same record is
    /// a no-op the second time.
    pub fn load_parameters(
        &mut self,
        record: &ParameterRecord,
        use_default_removal: bool,
    ) -> UnitModelResult<()> {
        if record.technology() != self.config.technology {
            tracing::warn!(
                unit = %self.config.technology,
                record = %record.technology(),
                "loading parameters recorded for a different technology"
            );
        }

        let mut plan: Vec<(VarId, f64)> = Vec::new();

        if !self.config.flags.pass_through {
            let recovery = record.recovery_frac_mass_h2o().ok_or_else(|| {
                UnitModelError::MissingParameter {
                    field: "recovery_frac_mass_H2O",
                    technology: record.technology().to_string(),
                }
            })?;
            let value = fraction(recovery, "recovery_frac_mass_H2O")?;
            plan.extend(self.recovery.iter().map(|id| (*id, value)));

            for ((t, j), id) in &self.removal {
                let value = match record.removal_frac_mass_solute(j) {
                    Some(p) => fraction(p, "removal_frac_mass_solute")?,
                    None => match record.default_removal_frac_mass_solute() {
                        Some(p) if use_default_removal => {
                            if *t == 0 {
                                tracing::warn!(
                                    technology = %record.technology(),
                                    solute = %j,
                                    value = p.value(),
                                    "no removal fraction for solute, using default"
                                );
                            }
                            fraction(p, "default_removal_frac_mass_solute")?
                        }
                        _ => {
                            return Err(UnitModelError::MissingRemovalData { solute: j.clone() });
                        }
                    },
                };
                plan.push((*id, value));
            }
        }

        if let Some(id) = self.energy_intensity {
            let param = record.energy_electric_flow_vol_inlet().ok_or_else(|| {
                UnitModelError::MissingParameter {
                    field: "energy_electric_flow_vol_inlet",
                    technology: record.technology().to_string(),
                }
            })?;
            let target = self.block.try_var(id)?.units();
            let value =
                param
                    .value_in(target)
                    .ok_or_else(|| UnitModelError::UnitInconsistency {
                        field: "energy_electric_flow_vol_inlet",
                        expected: target.to_string(),
                        found: param.units().to_string(),
                    })?;
            plan.push((id, value));
        }

        for (id, value) in plan.iter().copied() {
            self.block.fix(id, value)?;
        }

        tracing::debug!(
            technology = %record.technology(),
            variant = %record.variant(),
            fixed = plan.len(),
            "loaded parameters"
        );
        Ok(())
    }

    /// Resolve this unit's technology and variant in `db` and load it.
    pub fn load_parameters_from_database(
        &mut self,
        db: &Database,
        use_default_removal: bool,
    ) -> UnitModelResult<()> {
        if db.technology_flags(&self.config.technology) != self.config.flags {
            return Err(UnitModelError::FlagMismatch {
                technology: self.config.technology.clone(),
            });
        }
        let record = db.get_record(&self.config.technology, &self.config.variant)?;
        self.load_parameters(&record, use_default_removal)
    }

    /// Fix an inlet component mass flow.
    pub fn fix_inlet(&mut self, t: usize, species: &str, flow: MassRate) -> UnitModelResult<()> {
        let id = self.inlet_var(t, species)?;
        let value = flow.get::<kilogram_per_second>();
        if !(value.is_finite() && value >= 0.0) {
            return Err(PropertyError::NonPhysical {
                what: "inlet mass flow must be finite and non-negative",
            }
            .into());
        }
        self.block.fix(id, value)?;
        Ok(())
    }

    // ---- structure and solve ----

    pub fn degrees_of_freedom(&self) -> i64 {
        degrees_of_freedom(&self.block)
    }

    pub fn check_units(&self) -> UnitModelResult<()> {
        assert_units_consistent(&self.block)?;
        Ok(())
    }

    /// Evaluate the unit's constraints with the sequential solver.
    pub fn solve(&mut self) -> UnitModelResult<SolveReport> {
        Ok(solve_sequential(&mut self.block)?)
    }

    // ---- accessors ----

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn technology(&self) -> &str {
        &self.config.technology
    }

    pub fn flags(&self) -> TechnologyFlags {
        self.config.flags
    }

    pub fn time(&self) -> &[f64] {
        &self.config.time
    }

    pub fn properties(&self) -> &WaterProperties {
        &self.properties
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn port(&self, name: &str) -> UnitModelResult<&Port> {
        self.block
            .port(name)
            .ok_or_else(|| UnitModelError::UnknownPort {
                name: name.to_string(),
            })
    }

    pub fn inlet_flow_mass_comp(&self, t: usize, species: &str) -> Option<VarId> {
        self.inlet.get(&(t, species.to_string())).copied()
    }

    pub fn recovery_frac_mass_h2o(&self, t: usize) -> Option<VarId> {
        self.recovery.get(t).copied()
    }

    pub fn removal_frac_mass_solute(&self, t: usize, solute: &str) -> Option<VarId> {
        self.removal.get(&(t, solute.to_string())).copied()
    }

    pub fn electricity(&self, t: usize) -> Option<VarId> {
        self.electricity.get(t).copied()
    }

    pub fn energy_electric_flow_vol_inlet(&self) -> Option<VarId> {
        self.energy_intensity
    }

    /// Current value of a variable in its declared units.
    pub fn value(&self, id: VarId) -> UnitModelResult<f64> {
        Ok(self.block.value(id)?)
    }

    /// Current mass flow of `species` at port `port_name`.
    pub fn flow_mass_comp(
        &self,
        port_name: &str,
        t: usize,
        species: &str,
    ) -> UnitModelResult<MassRate> {
        self.check_time(t)?;
        let port = self.port(port_name)?;
        let value = port
            .value_si(&self.block, t, species)?
            .ok_or_else(|| UnitModelError::UnknownSpecies {
                name: species.to_string(),
            })?;
        Ok(kgps(value))
    }

    /// Stream state of a port at time `t`, including volumetric flow.
    pub fn stream_state(&self, port_name: &str, t: usize) -> UnitModelResult<StreamState> {
        let flows = self
            .component_names()
            .into_iter()
            .map(|j| {
                let mdot = self.flow_mass_comp(port_name, t, &j)?;
                Ok((j, mdot))
            })
            .collect::<UnitModelResult<Vec<_>>>()?;
        Ok(StreamState::new(flows, self.properties.density_model())?)
    }

    /// Electricity demand at time `t`, or `None` for units without one.
    pub fn electricity_demand(&self, t: usize) -> UnitModelResult<Option<Power>> {
        self.check_time(t)?;
        match self.electricity(t) {
            Some(id) => Ok(Some(kw(self.value(id)?))),
            None => Ok(None),
        }
    }
}

fn fraction(param: &Param, field: &'static str) -> UnitModelResult<f64> {
    param
        .value_in(&UnitTag::dimensionless())
        .ok_or_else(|| UnitModelError::UnitInconsistency {
            field,
            expected: UnitTag::dimensionless().to_string(),
            found: param.units().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_database::{DatabaseError, TechnologyRegistry};
    use wt_properties::SoluteRegistry;

    const NF: &str = r#"
default:
  energy_electric_flow_vol_inlet: {units: kWh/m^3, value: 0.231344952}
  recovery_frac_mass_H2O: {units: dimensionless, value: 0.85}
  default_removal_frac_mass_solute: {units: dimensionless, value: 0}
  removal_frac_mass_solute:
    sulfur: {units: dimensionless, value: 0.97}
    toc: {units: dimensionless, value: 0.75}
    tss: {units: dimensionless, value: 0.97}
"#;

    fn props(solutes: &[&str]) -> Arc<WaterProperties> {
        Arc::new(WaterProperties::new(
            SoluteRegistry::new(solutes.iter().copied()).unwrap(),
        ))
    }

    fn db() -> Database {
        Database::builder(TechnologyRegistry::builtin())
            .technology_yaml("nanofiltration", NF)
            .unwrap()
            .build()
            .unwrap()
    }

    fn nf(solutes: &[&str]) -> ZeroOrderUnit {
        ZeroOrderUnit::build(
            props(solutes),
            UnitConfig::new("nanofiltration", TechnologyFlags::SEPARATOR),
        )
        .unwrap()
    }

    #[test]
    fn separator_structure() {
        let unit = nf(&["sulfur", "toc"]);
        let block = unit.block();

        // inlet (3) + recovery + treated H2O + 2 x (removal + byproduct) + intensity + electricity
        assert_eq!(block.num_vars(), 3 + 2 + 4 + 2);
        // water recovery + 2 solute removal + electricity
        assert_eq!(block.num_constraints(), 4);

        let rec = block.try_var(unit.recovery_frac_mass_h2o(0).unwrap()).unwrap();
        assert_eq!(rec.lower(), Some(RECOVERY_LOWER));
        assert_eq!(rec.upper(), Some(RECOVERY_UPPER));
        let rem = block
            .try_var(unit.removal_frac_mass_solute(0, "toc").unwrap())
            .unwrap();
        assert_eq!(rem.lower(), Some(0.0));
        assert_eq!(rem.upper(), None);
        assert!(block.find_constraint("electricity_consumption", Some("0")).is_some());
        assert!(unit.removal_frac_mass_solute(0, "H2O").is_none());
    }

    #[test]
    fn pass_through_structure() {
        let unit = ZeroOrderUnit::build(
            props(&["tss"]),
            UnitConfig::new("chemical_addition", TechnologyFlags {
                pass_through: true,
                no_electricity: true,
            }),
        )
        .unwrap();
        assert_eq!(unit.block().num_vars(), 2);
        assert_eq!(unit.block().num_constraints(), 0);
        assert!(unit.recovery_frac_mass_h2o(0).is_none());
        assert!(unit.removal_frac_mass_solute(0, "tss").is_none());
        assert!(unit.electricity(0).is_none());
        assert!(unit.energy_electric_flow_vol_inlet().is_none());
    }

    #[test]
    fn no_electricity_separator_has_no_demand() {
        let mut unit = ZeroOrderUnit::build(
            props(&["tss"]),
            UnitConfig::new("sedimentation", TechnologyFlags::NO_ELECTRICITY),
        )
        .unwrap();
        assert!(unit.electricity(0).is_none());
        assert!(unit.block().find_constraint("electricity_consumption", Some("0")).is_none());
        unit.fix_inlet(0, "H2O", kgps(1.0)).unwrap();
        assert_eq!(unit.electricity_demand(0).unwrap(), None);
    }

    #[test]
    fn multi_period_indexes_every_time_point() {
        let unit = ZeroOrderUnit::build(
            props(&["toc"]),
            UnitConfig::new("nanofiltration", TechnologyFlags::SEPARATOR)
                .with_time(vec![0.0, 3600.0]),
        )
        .unwrap();
        assert!(unit.recovery_frac_mass_h2o(1).is_some());
        assert!(unit.electricity(1).is_some());
        assert!(unit.recovery_frac_mass_h2o(2).is_none());
        assert_eq!(unit.degrees_of_freedom(), 2 * 2 + 2 * 2 + 1);
    }

    #[test]
    fn load_parameters_fixes_values() {
        let mut unit = nf(&["sulfur", "toc", "tss"]);
        unit.load_parameters_from_database(&db(), false).unwrap();

        let rec = unit.recovery_frac_mass_h2o(0).unwrap();
        assert!(unit.block().try_var(rec).unwrap().is_fixed());
        assert_eq!(unit.value(rec).unwrap(), 0.85);
        assert_eq!(
            unit.value(unit.removal_frac_mass_solute(0, "toc").unwrap()).unwrap(),
            0.75
        );
        let e = unit.energy_electric_flow_vol_inlet().unwrap();
        assert_eq!(unit.value(e).unwrap(), 0.231344952);
    }

    #[test]
    fn missing_removal_without_default() {
        let mut unit = nf(&["sulfur", "foo"]);
        let err = unit.load_parameters_from_database(&db(), false).unwrap_err();
        assert!(matches!(err, UnitModelError::MissingRemovalData { ref solute } if solute == "foo"));

        // nothing was fixed
        let rec = unit.recovery_frac_mass_h2o(0).unwrap();
        assert!(!unit.block().try_var(rec).unwrap().is_fixed());
    }

    #[test]
    fn default_removal_fallback() {
        let mut unit = nf(&["sulfur", "foo"]);
        unit.load_parameters_from_database(&db(), true).unwrap();
        let foo = unit.removal_frac_mass_solute(0, "foo").unwrap();
        assert!(unit.block().try_var(foo).unwrap().is_fixed());
        assert_eq!(unit.value(foo).unwrap(), 0.0);
    }

    #[test]
    fn load_is_idempotent() {
        let mut unit = nf(&["sulfur", "toc", "tss"]);
        let db = db();
        unit.load_parameters_from_database(&db, false).unwrap();
        let snapshot: Vec<(f64, bool)> = unit
            .block()
            .vars()
            .map(|(_, v)| (v.value(), v.is_fixed()))
            .collect();
        unit.load_parameters_from_database(&db, false).unwrap();
        let again: Vec<(f64, bool)> = unit
            .block()
            .vars()
            .map(|(_, v)| (v.value(), v.is_fixed()))
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn flag_mismatch_with_database() {
        let mut unit = ZeroOrderUnit::build(
            props(&["sulfur"]),
            UnitConfig::new("nanofiltration", TechnologyFlags::NO_ELECTRICITY),
        )
        .unwrap();
        let err = unit.load_parameters_from_database(&db(), true).unwrap_err();
        assert!(matches!(err, UnitModelError::FlagMismatch { .. }));
    }

    #[test]
    fn unknown_variant() {
        let mut unit = ZeroOrderUnit::build(
            props(&["sulfur"]),
            UnitConfig::new("nanofiltration", TechnologyFlags::SEPARATOR)
                .with_variant("brackish"),
        )
        .unwrap();
        let err = unit.load_parameters_from_database(&db(), true).unwrap_err();
        assert!(matches!(
            err,
            UnitModelError::Database(DatabaseError::VariantNotFound { .. })
        ));
    }

    #[test]
    fn fix_inlet_validation() {
        let mut unit = nf(&["sulfur"]);
        assert!(matches!(
            unit.fix_inlet(0, "lead", kgps(1.0)),
            Err(UnitModelError::UnknownSpecies { .. })
        ));
        assert!(matches!(
            unit.fix_inlet(1, "H2O", kgps(1.0)),
            Err(UnitModelError::TimeIndex { t: 1, len: 1 })
        ));
        assert!(matches!(
            unit.fix_inlet(0, "H2O", kgps(-1.0)),
            Err(UnitModelError::Property(_))
        ));
        unit.fix_inlet(0, "H2O", kgps(5.0)).unwrap();
        let id = unit.inlet_flow_mass_comp(0, "H2O").unwrap();
        assert_eq!(unit.value(id).unwrap(), 5.0);
    }

    #[test]
    fn units_are_consistent() {
        assert!(nf(&["sulfur", "toc", "tss"]).check_units().is_ok());
    }

    #[test]
    fn unknown_port() {
        let unit = nf(&["sulfur"]);
        assert!(matches!(
            unit.flow_mass_comp("permeate", 0, "H2O"),
            Err(UnitModelError::UnknownPort { .. })
        ));
    }
}
