//! Electricity demand relations.

use uom::si::mass_density::kilogram_per_cubic_meter;
use wt_core::UnitTag;
use wt_model::{Constraint, Expr, Var};
use wt_properties::PropertyError;

use crate::error::{UnitModelError, UnitModelResult};
use crate::zero_order::ZeroOrderUnit;

pub const POWER_UNITS: &str = "kW";
pub const INTENSITY_UNITS: &str = "kWh/m^3";

/// Electricity demand proportional to inlet volumetric flow.
///
/// Adds `energy_electric_flow_vol_inlet` (kWh/m^3), `electricity[t]` (kW) and
///
/// ```text
/// electricity[t] = energy_electric_flow_vol_inlet · flow_vol(inlet[t])
/// ```
///
/// Unit conversion (hours to seconds, kW to W) is carried by the unit tags.
pub fn constant_intensity(unit: &mut ZeroOrderUnit) -> UnitModelResult<()> {
    let power = UnitTag::parse(POWER_UNITS)?;
    let intensity = UnitTag::parse(INTENSITY_UNITS)?;

    let e = unit.block.add_var(
        Var::new("energy_electric_flow_vol_inlet", intensity).bounds(Some(0.0), None),
    )?;

    for t in 0..unit.time().len() {
        let flow_vol = inlet_flow_vol(unit, t)?;
        let p = unit.block.add_var(
            Var::new("electricity", power.clone())
                .indexed(t.to_string())
                .bounds(Some(0.0), None),
        )?;
        unit.block.add_constraint(
            Constraint::new("electricity_consumption", Expr::var(p), Expr::var(e) * flow_vol)
                .indexed(t.to_string()),
        )?;
        unit.electricity.push(p);
    }

    unit.energy_intensity = Some(e);
    Ok(())
}

/// Inlet volumetric flow at `t`: total inlet mass flow over the property
/// package's mass density.
pub fn inlet_flow_vol(unit: &ZeroOrderUnit, t: usize) -> UnitModelResult<Expr> {
    let rho = unit.properties().dens_mass().get::<kilogram_per_cubic_meter>();
    if !(rho.is_finite() && rho > 0.0) {
        return Err(PropertyError::NonPhysical { what: "density" }.into());
    }

    let terms: Vec<Expr> = unit
        .properties()
        .component_list()
        .into_iter()
        .map(|j| {
            unit.inlet_flow_mass_comp(t, j)
                .map(Expr::var)
                .ok_or_else(|| UnitModelError::UnknownSpecies {
                    name: j.to_string(),
                })
        })
        .collect::<UnitModelResult<_>>()?;

    Ok(Expr::sum(terms) / Expr::constant(rho, UnitTag::parse("kg/m^3")?))
}
