//! Density models for volumetric flow conversion.

use wt_core::units::{Density, MassRate, VolumeRate, constants, kgps};

use crate::error::{PropertyError, PropertyResult};

/// Mass density used to convert a stream's mass flows into a volumetric flow.
///
/// Implementations must be thread-safe (Send + Sync); a property package is
/// shared by every unit model in a flowsheet.
pub trait DensityModel: Send + Sync + std::fmt::Debug {
    /// Mass density of the bulk stream.
    fn dens_mass(&self) -> Density;

    /// Volumetric flow for the given component mass flows.
    fn flow_vol(&self, mass_flows: &[MassRate]) -> PropertyResult<VolumeRate> {
        let rho = self.dens_mass();
        if !(rho.value.is_finite() && rho.value > 0.0) {
            return Err(PropertyError::NonPhysical { what: "density" });
        }
        let total = mass_flows.iter().fold(kgps(0.0), |acc, m| acc + *m);
        Ok(total / rho)
    }
}

/// Composition-independent density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDensity {
    rho: Density,
}

impl ConstantDensity {
    pub fn new(rho: Density) -> PropertyResult<Self> {
        if !(rho.value.is_finite() && rho.value > 0.0) {
            return Err(PropertyError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(Self { rho })
    }

    /// Reference water density (1000 kg/m³).
    pub fn water() -> Self {
        Self {
            rho: constants::rho_water(),
        }
    }
}

impl Default for ConstantDensity {
    fn default() -> Self {
        Self::water()
    }
}

impl DensityModel for ConstantDensity {
    fn dens_mass(&self) -> Density {
        self.rho
    }
}
