//! Loads the shipped parameter directory and checks every record's contents.

use std::path::PathBuf;

use wt_database::{DEFAULT_VARIANT, Database, DatabaseError, TechnologyRegistry};
use wt_properties::SoluteRegistry;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/techno_economic")
}

#[test]
fn load_shipped_parameter_files() {
    let db = Database::load_dir(&data_dir(), TechnologyRegistry::builtin()).unwrap();

    let techs: Vec<&str> = db.technologies().collect();
    assert_eq!(
        techs,
        vec!["chemical_addition", "nanofiltration", "pump", "sedimentation"]
    );
    assert!(!db.contains("component_list"));
}

#[test]
fn every_record_matches_its_flags() {
    let db = Database::load_dir(&data_dir(), TechnologyRegistry::builtin()).unwrap();

    for tech in db.technologies() {
        let flags = db.technology_flags(tech);
        let set = db.get_unit_operation_parameters(tech).unwrap();
        assert!(set.contains_key(DEFAULT_VARIANT), "{tech} has no default");

        for (_, rec) in set.iter() {
            if flags.pass_through {
                assert!(rec.recovery_frac_mass_h2o().is_none());
                assert!(rec.default_removal_frac_mass_solute().is_none());
            } else {
                let r = rec.recovery_frac_mass_h2o().unwrap().value();
                assert!((0.0..=1.0).contains(&r));
                let d = rec.default_removal_frac_mass_solute().unwrap().value();
                assert!((0.0..=1.0).contains(&d));
            }

            if flags.no_electricity {
                assert!(rec.energy_electric_flow_vol_inlet().is_none());
            } else {
                assert!(rec.energy_electric_flow_vol_inlet().unwrap().value() >= 0.0);
            }

            for (j, frac) in rec.removal_fracs() {
                assert!((0.0..=1.0).contains(&frac.value()));
                assert!(db.component_list().unwrap().contains(j));
            }
        }
    }
}

#[test]
fn catalog_includes_component_list() {
    let db = Database::load_dir(&data_dir(), TechnologyRegistry::builtin()).unwrap();
    let catalog = db.get_solute_catalog();
    for j in ["sulfur", "toc", "tss", "tds"] {
        assert!(catalog.contains(j), "missing {j}");
    }
}

#[test]
fn registry_checked_against_catalog() {
    let db = Database::load_dir(&data_dir(), TechnologyRegistry::builtin()).unwrap();
    db.check_registry(&SoluteRegistry::new(["sulfur", "toc", "tss"]).unwrap())
        .unwrap();

    let err = db
        .check_registry(&SoluteRegistry::new(["toc", "foo", "bar"]).unwrap())
        .unwrap_err();
    match err {
        DatabaseError::UnknownSolutes { solutes } => assert_eq!(solutes, ["foo", "bar"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_directory_is_io_error() {
    let err = Database::load_dir(
        &data_dir().join("does_not_exist"),
        TechnologyRegistry::builtin(),
    )
    .unwrap_err();
    assert!(matches!(err, DatabaseError::Io(_)));
}

#[test]
fn invalid_file_rejects_directory() {
    let dir = std::env::temp_dir()
        .join(format!("wt_database_invalid_dir_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("pump.yaml"),
        "default:\n  recovery_frac_mass_H2O: {units: dimensionless, value: 0.5}\n  energy_electric_flow_vol_inlet: {units: kWh/m^3, value: 0.05}\n",
    )
    .unwrap();

    let err = Database::load_dir(&dir, TechnologyRegistry::builtin()).unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));

    std::fs::remove_dir_all(&dir).ok();
}
