use super::open_session;
use crate::cli::{CompositionArgs, EquilibriumArgs};
use crate::config::SessionConfig;
use crate::error::Result;
use matcalc::engine::composition::{CompositionEntry, CompositionUnit};
use matcalc::workflows::equilibrium::{self, EquilibriumPoint, EquilibriumQuery};
use tracing::info;

pub fn run(args: EquilibriumArgs, session: &SessionConfig) -> Result<()> {
    let query = EquilibriumQuery {
        temperature_kelvin: args.temperature,
        composition: composition_entries(&args.composition),
        variables: args.variables,
    };

    let mut engine = open_session(session)?;
    let point = equilibrium::run(&mut engine, &query)?;
    info!("Equilibrium calculated at {} K.", point.temperature_kelvin);

    print!("{}", render(&point));
    Ok(())
}

/// Mole fractions first, then weight fractions, then site fractions; each group in the
/// order given.
fn composition_entries(args: &CompositionArgs) -> Vec<CompositionEntry> {
    let groups = [
        (CompositionUnit::MoleFraction, &args.mole_fractions),
        (CompositionUnit::WeightFraction, &args.weight_fractions),
        (CompositionUnit::SiteFraction, &args.site_fractions),
    ];
    groups
        .into_iter()
        .flat_map(|(unit, assignments)| {
            assignments
                .iter()
                .map(move |a| CompositionEntry::new(unit, a.element.clone(), a.value))
        })
        .collect()
}

fn render(point: &EquilibriumPoint) -> String {
    point
        .values
        .iter()
        .map(|(name, value)| format!("{} = {}\n", name, value))
        .collect()
}
