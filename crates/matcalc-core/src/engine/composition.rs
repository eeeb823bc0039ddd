use std::fmt;

/// The quantity an `enter-composition` command sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionUnit {
    MoleFraction,
    WeightFraction,
    SiteFraction,
}

impl CompositionUnit {
    /// The single-letter code the engine expects.
    pub fn code(self) -> char {
        match self {
            Self::MoleFraction => 'X',
            Self::WeightFraction => 'W',
            Self::SiteFraction => 'U',
        }
    }
}

impl fmt::Display for CompositionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MoleFraction => "mole fraction",
            Self::WeightFraction => "weight fraction",
            Self::SiteFraction => "site fraction",
        };
        f.write_str(name)
    }
}

/// One element's share in a composition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionEntry {
    pub unit: CompositionUnit,
    pub element: String,
    pub value: f64,
}

impl CompositionEntry {
    pub fn new(unit: CompositionUnit, element: impl Into<String>, value: f64) -> Self {
        Self {
            unit,
            element: element.into(),
            value,
        }
    }

    pub fn command(&self) -> String {
        composition_command(self.unit, &self.element, self.value)
    }
}

/// Builds `enter-composition {X|W|U} {element}={value}`.
pub fn composition_command(unit: CompositionUnit, element: &str, value: f64) -> String {
    format!(
        "enter-composition {} {}={}",
        unit.code(),
        element,
        format_value(value)
    )
}

/// Shortest decimal that round-trips, with exponent notation for very small or very
/// large magnitudes (`0.98`, `0.5`, `1e-05`, `1e+16`).
///
/// Exponents carry a sign and at least two digits, the way the engine's own scripts
/// print them.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !magnitude.is_finite() || (1e-4..1e16).contains(&magnitude) {
        return format!("{}", value);
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_codes_match_engine_letters() {
        assert_eq!(CompositionUnit::MoleFraction.code(), 'X');
        assert_eq!(CompositionUnit::WeightFraction.code(), 'W');
        assert_eq!(CompositionUnit::SiteFraction.code(), 'U');
    }

    #[test]
    fn format_value_uses_plain_decimals_in_the_usual_range() {
        assert_eq!(format_value(0.98), "0.98");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn format_value_switches_to_exponents_at_the_extremes() {
        assert_eq!(format_value(1e-5), "1e-05");
        assert_eq!(format_value(2.5e-7), "2.5e-07");
        assert_eq!(format_value(-3e-9), "-3e-09");
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(1.5e-120), "1.5e-120");
    }

    #[test]
    fn scan_start_fraction_uses_a_two_digit_exponent() {
        assert_eq!(
            composition_command(CompositionUnit::MoleFraction, "C", 1e-5),
            "enter-composition X C=1e-05"
        );
    }

    #[test]
    fn composition_command_has_the_engine_layout() {
        assert_eq!(
            composition_command(CompositionUnit::MoleFraction, "Fe", 0.98),
            "enter-composition X Fe=0.98"
        );
        assert_eq!(
            CompositionEntry::new(CompositionUnit::SiteFraction, "Va", 1e-6).command(),
            "enter-composition U Va=1e-06"
        );
    }
}
