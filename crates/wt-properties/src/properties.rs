//! Property package shared by the unit models of one flowsheet.

use std::sync::Arc;

use wt_core::units::Density;

use crate::density::{ConstantDensity, DensityModel};
use crate::solutes::{SoluteRegistry, WATER};

/// Water + solutes property package.
///
/// Bundles the solute registry with the density model that converts mass flows
/// to volumetric flows. Construct once per flowsheet and share it by `Arc`.
#[derive(Debug, Clone)]
pub struct WaterProperties {
    solutes: SoluteRegistry,
    density: Arc<dyn DensityModel>,
}

impl WaterProperties {
    /// Property package with the reference water density.
    pub fn new(solutes: SoluteRegistry) -> Self {
        Self::with_density(solutes, Arc::new(ConstantDensity::water()))
    }

    pub fn with_density(solutes: SoluteRegistry, density: Arc<dyn DensityModel>) -> Self {
        Self { solutes, density }
    }

    pub fn solutes(&self) -> &SoluteRegistry {
        &self.solutes
    }

    pub fn density_model(&self) -> &dyn DensityModel {
        self.density.as_ref()
    }

    pub fn dens_mass(&self) -> Density {
        self.density.dens_mass()
    }

    /// `"H2O"` followed by the registered solutes.
    pub fn component_list(&self) -> Vec<&str> {
        self.solutes.component_list()
    }

    pub fn is_component(&self, name: &str) -> bool {
        name == WATER || self.solutes.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::units::kg_per_m3;

    #[test]
    fn default_density_is_water() {
        let props = WaterProperties::new(SoluteRegistry::new(["tds"]).unwrap());
        assert_eq!(props.dens_mass(), kg_per_m3(1000.0));
        assert!(props.is_component("H2O"));
        assert!(props.is_component("tds"));
        assert!(!props.is_component("toc"));
    }

    #[test]
    fn custom_density() {
        let rho = ConstantDensity::new(kg_per_m3(1025.0)).unwrap();
        let props =
            WaterProperties::with_density(SoluteRegistry::new(["tds"]).unwrap(), Arc::new(rho));
        assert_eq!(props.dens_mass(), kg_per_m3(1025.0));
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WaterProperties>();
    }
}
