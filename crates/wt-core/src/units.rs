// wt-core/src/units.rs

use uom::si::f64::{
    MassConcentration as UomMassConcentration, MassDensity as UomMassDensity,
    MassRate as UomMassRate, Power as UomPower, VolumeRate as UomVolumeRate,
};

// Typed quantities at the stream and unit-model boundaries (SI, f64)
pub type MassConc = UomMassConcentration;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

pub mod constants {
    use super::*;

    /// Reference density of water used by the default property package.
    pub const RHO_WATER_KG_M3: f64 = 1000.0;

    #[inline]
    pub fn rho_water() -> Density {
        kg_per_m3(RHO_WATER_KG_M3)
    }
}
