//! Stream state: component mass flows at one time point.

use uom::si::mass_concentration::kilogram_per_cubic_meter;
use wt_core::units::{MassConc, MassRate, VolumeRate};

use crate::density::DensityModel;
use crate::error::{PropertyError, PropertyResult};

/// Component mass flows of a stream, with derived volumetric quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    /// Component name and mass flow, in component-list order.
    flows: Vec<(String, MassRate)>,
    flow_vol: VolumeRate,
}

impl StreamState {
    /// Build a stream state from component mass flows.
    ///
    /// Flows must be finite and non-negative.
    pub fn new(
        flows: Vec<(String, MassRate)>,
        density: &dyn DensityModel,
    ) -> PropertyResult<Self> {
        for (_, mdot) in &flows {
            if !mdot.value.is_finite() {
                return Err(PropertyError::NonPhysical {
                    what: "non-finite mass flow",
                });
            }
            if mdot.value < 0.0 {
                return Err(PropertyError::NonPhysical {
                    what: "negative mass flow",
                });
            }
        }
        let mass: Vec<MassRate> = flows.iter().map(|(_, m)| *m).collect();
        let flow_vol = density.flow_vol(&mass)?;
        Ok(Self { flows, flow_vol })
    }

    pub fn flow_mass_comp(&self, name: &str) -> PropertyResult<MassRate> {
        self.flows
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| *m)
            .ok_or_else(|| PropertyError::UnknownSpecies {
                name: name.to_string(),
            })
    }

    pub fn flow_vol(&self) -> VolumeRate {
        self.flow_vol
    }

    /// Mass concentration of a component (mass flow / volumetric flow).
    ///
    /// Zero when the stream carries no volume.
    pub fn conc_mass_comp(&self, name: &str) -> PropertyResult<MassConc> {
        let mdot = self.flow_mass_comp(name)?;
        if self.flow_vol.value <= 0.0 {
            return Ok(MassConc::new::<kilogram_per_cubic_meter>(0.0));
        }
        let rho_j = mdot / self.flow_vol;
        Ok(MassConc::new::<kilogram_per_cubic_meter>(rho_j.value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MassRate)> + '_ {
        self.flows.iter().map(|(n, m)| (n.as_str(), *m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::ConstantDensity;
    use uom::si::volume_rate::cubic_meter_per_second;
    use wt_core::units::kgps;

    fn treated() -> StreamState {
        StreamState::new(
            vec![
                ("H2O".into(), kgps(8500.0)),
                ("sulfur".into(), kgps(0.03)),
                ("toc".into(), kgps(0.5)),
                ("tss".into(), kgps(0.09)),
            ],
            &ConstantDensity::water(),
        )
        .unwrap()
    }

    #[test]
    fn volumetric_flow_and_concentration() {
        let s = treated();
        let q = s.flow_vol().get::<cubic_meter_per_second>();
        assert!((q - 8.50062).abs() / 8.50062 < 1e-5);

        let c = s
            .conc_mass_comp("sulfur")
            .unwrap()
            .get::<kilogram_per_cubic_meter>();
        assert!((c - 0.00352915).abs() / 0.00352915 < 1e-5);
    }

    #[test]
    fn unknown_species() {
        let err = treated().conc_mass_comp("foo").unwrap_err();
        assert!(matches!(err, PropertyError::UnknownSpecies { .. }));
    }

    #[test]
    fn zero_volume_has_zero_concentration() {
        let s = StreamState::new(vec![("H2O".into(), kgps(0.0))], &ConstantDensity::water())
            .unwrap();
        let c = s.conc_mass_comp("H2O").unwrap();
        assert_eq!(c.get::<kilogram_per_cubic_meter>(), 0.0);
    }

    #[test]
    fn rejects_negative_flow() {
        let err = StreamState::new(vec![("H2O".into(), kgps(-1.0))], &ConstantDensity::water())
            .unwrap_err();
        assert!(matches!(err, PropertyError::NonPhysical { .. }));
    }
}
