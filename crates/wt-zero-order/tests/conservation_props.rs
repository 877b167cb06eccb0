//! Property tests: mass closure and fraction bounds for arbitrary records.

use std::sync::Arc;

use proptest::prelude::*;
use uom::si::mass_rate::kilogram_per_second;
use wt_core::units::kgps;
use wt_core::{Tolerances, nearly_equal};
use wt_database::{Database, TechnologyRegistry};
use wt_properties::{SoluteRegistry, WaterProperties};
use wt_zero_order::{BYPRODUCT, INLET, TREATED, check_conservation, nanofiltration};

fn record_yaml(recovery: f64, removal: f64) -> String {
    format!(
        "default:\n  \
         energy_electric_flow_vol_inlet: {{units: kWh/m^3, value: 0.2}}\n  \
         recovery_frac_mass_H2O: {{units: dimensionless, value: {recovery}}}\n  \
         default_removal_frac_mass_solute: {{units: dimensionless, value: 0}}\n  \
         removal_frac_mass_solute:\n    \
         toc: {{units: dimensionless, value: {removal}}}\n"
    )
}

proptest! {
    #[test]
    fn solved_unit_conserves_mass(
        recovery in 1e-6_f64..=1.0,
        removal in 0.0_f64..=1.0,
        water in 0.0_f64..1e5,
        toc in 0.0_f64..100.0,
    ) {
        let db = Database::builder(TechnologyRegistry::builtin())
            .technology_yaml("nanofiltration", &record_yaml(recovery, removal))
            .unwrap()
            .build()
            .unwrap();
        let props = Arc::new(WaterProperties::new(SoluteRegistry::new(["toc"]).unwrap()));
        let mut unit = nanofiltration::build(props).unwrap();
        unit.load_parameters_from_database(&db, false).unwrap();
        unit.fix_inlet(0, "H2O", kgps(water)).unwrap();
        unit.fix_inlet(0, "toc", kgps(toc)).unwrap();

        let report = unit.solve().unwrap();
        prop_assert!(report.bound_violations.is_empty());
        prop_assert!(check_conservation(&unit, Tolerances::conservation()).is_ok());

        for j in ["H2O", "toc"] {
            let get = |port: &str| {
                unit.flow_mass_comp(port, 0, j)
                    .unwrap()
                    .get::<kilogram_per_second>()
            };
            let (inlet, treated, byproduct) = (get(INLET), get(TREATED), get(BYPRODUCT));
            prop_assert!(treated >= -1e-9 * inlet.max(1.0));
            prop_assert!(byproduct >= -1e-9 * inlet.max(1.0));
            prop_assert!(nearly_equal(inlet, treated + byproduct, Tolerances::conservation()));
        }
    }

    #[test]
    fn fractions_outside_unit_interval_are_rejected(recovery in 1.0001_f64..10.0) {
        let result = Database::builder(TechnologyRegistry::builtin())
            .technology_yaml("nanofiltration", &record_yaml(recovery, 0.5))
            .unwrap()
            .build();
        prop_assert!(result.is_err());
    }
}
