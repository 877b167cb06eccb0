//! Technology-specific relations layered on the generic builder.

use std::sync::Arc;

use wt_core::UnitTag;
use wt_core::units::kgps;
use wt_database::TechnologyFlags;
use wt_model::{Constraint, Expr, Var};
use wt_properties::{SoluteRegistry, WaterProperties};
use wt_zero_order::{
    ExtraRelations, UnitConfig, UnitModelResult, ZeroOrderUnit, electricity::inlet_flow_vol,
};

/// Chemical dosing: `chemical_flow_mass[t] = dosage · flow_vol(inlet[t])`.
struct Dosing {
    dosage_mg_per_l: f64,
}

impl ExtraRelations for Dosing {
    fn build_extra(&self, unit: &mut ZeroOrderUnit) -> UnitModelResult<()> {
        let dosage = unit.block_mut().add_var(
            Var::new("chemical_dosage", UnitTag::parse("mg/L")?).bounds(Some(0.0), None),
        )?;
        unit.block_mut().fix(dosage, self.dosage_mg_per_l)?;

        for t in 0..unit.time().len() {
            let flow_vol = inlet_flow_vol(unit, t)?;
            let chem = unit.block_mut().add_var(
                Var::new("chemical_flow_mass", UnitTag::parse("kg/s")?)
                    .indexed(t.to_string())
                    .bounds(Some(0.0), None),
            )?;
            unit.block_mut().add_constraint(
                Constraint::new(
                    "chemical_flow_mass_equation",
                    Expr::var(chem),
                    Expr::var(dosage) * flow_vol,
                )
                .indexed(t.to_string()),
            )?;
        }
        Ok(())
    }
}

fn dosing_unit() -> ZeroOrderUnit {
    let props = Arc::new(WaterProperties::new(SoluteRegistry::new(["tss"]).unwrap()));
    ZeroOrderUnit::build_with(
        props,
        UnitConfig::new("chemical_addition", TechnologyFlags {
            pass_through: true,
            no_electricity: true,
        }),
        &Dosing {
            dosage_mg_per_l: 5.0,
        },
    )
    .unwrap()
}

#[test]
fn hook_adds_relations() {
    let unit = dosing_unit();
    let block = unit.block();
    assert!(block.find_var("chemical_dosage", None).is_some());
    assert!(
        block
            .find_constraint("chemical_flow_mass_equation", Some("0"))
            .is_some()
    );
    unit.check_units().unwrap();
}

#[test]
fn hook_relations_are_solved() {
    let mut unit = dosing_unit();
    unit.fix_inlet(0, "H2O", kgps(1000.0)).unwrap();
    unit.fix_inlet(0, "tss", kgps(0.0)).unwrap();
    assert_eq!(unit.degrees_of_freedom(), 0);
    unit.solve().unwrap();

    // 5 mg/L over 1 m^3/s is 5 g/s
    let chem = unit.block().find_var("chemical_flow_mass", Some("0")).unwrap();
    let value = unit.value(chem).unwrap();
    assert!((value - 0.005).abs() < 1e-12);
}
