//! Model variables.

use wt_core::UnitTag;

/// A scalar model variable.
///
/// `value` is expressed in `units`. A fixed variable is a parameter as far as
/// the solver is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    name: String,
    index: Option<String>,
    value: f64,
    fixed: bool,
    lower: Option<f64>,
    upper: Option<f64>,
    units: UnitTag,
}

impl Var {
    pub fn new(name: impl Into<String>, units: UnitTag) -> Self {
        Self {
            name: name.into(),
            index: None,
            value: 0.0,
            fixed: false,
            lower: None,
            upper: None,
            units,
        }
    }

    pub fn indexed(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn initial(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// `name[index]`, or `name` for scalar variables.
    pub fn full_name(&self) -> String {
        match &self.index {
            Some(idx) => format!("{}[{}]", self.name, idx),
            None => self.name.clone(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn value_si(&self) -> f64 {
        self.units.to_si(self.value)
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn units(&self) -> &UnitTag {
        &self.units
    }

    /// Whether the current value lies within the bounds.
    pub fn within_bounds(&self) -> bool {
        self.lower.is_none_or(|lb| self.value >= lb) && self.upper.is_none_or(|ub| self.value <= ub)
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub(crate) fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_with_index() {
        let v = Var::new("removal_frac_mass_solute", UnitTag::dimensionless()).indexed("0,toc");
        assert_eq!(v.full_name(), "removal_frac_mass_solute[0,toc]");
        let s = Var::new("energy_electric_flow_vol_inlet", UnitTag::dimensionless());
        assert_eq!(s.full_name(), "energy_electric_flow_vol_inlet");
    }

    #[test]
    fn bounds_check() {
        let v = Var::new("x", UnitTag::dimensionless())
            .bounds(Some(0.0), Some(1.0))
            .initial(0.5);
        assert!(v.within_bounds());
        let v = v.initial(1.5);
        assert!(!v.within_bounds());
        let free = Var::new("y", UnitTag::dimensionless()).initial(-1e9);
        assert!(free.within_bounds());
    }

    #[test]
    fn si_value_uses_unit_factor() {
        let units = UnitTag::parse("kW").unwrap();
        let v = Var::new("electricity", units).initial(2.0);
        assert_eq!(v.value_si(), 2000.0);
    }
}
