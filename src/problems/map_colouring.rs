use std::collections::BTreeMap;

use crate::error::Result;
use crate::solver::constraint::Constraint;
use crate::solver::constraints::not_equal::NotEqual;
use crate::solver::csp::Csp;
use crate::solver::delta::DeltaRecord;
use crate::solver::domain::Domain;
use crate::solver::problem::Problem;
use crate::solver::state::State;
use crate::solver::variable::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Colour a map so that no two bordering regions share a colour: one
/// variable per region, the palette as its domain, and a [`NotEqual`]
/// constraint per border.
#[derive(Debug, Clone)]
pub struct MapColouring {
    regions: Vec<String>,
    borders: Vec<(String, String)>,
    palette: Vec<Colour>,
    colours: BTreeMap<String, Colour>,
}

impl MapColouring {
    pub fn new<R, S>(regions: R, borders: &[(S, S)], palette: Vec<Colour>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            regions: regions.into_iter().map(|r| r.as_ref().to_string()).collect(),
            borders: borders
                .iter()
                .map(|(a, b)| (a.as_ref().to_string(), b.as_ref().to_string()))
                .collect(),
            palette,
            colours: BTreeMap::new(),
        }
    }

    /// Fixes a region's colour before solving.
    pub fn with_fixed_colour(mut self, region: &str, colour: Colour) -> Self {
        self.colours.insert(region.to_string(), colour);
        self
    }

    pub fn colour(&self, region: &str) -> Option<Colour> {
        self.colours.get(region).copied()
    }

    pub fn colours(&self) -> &BTreeMap<String, Colour> {
        &self.colours
    }

    pub fn borders(&self) -> &[(String, String)] {
        &self.borders
    }

    /// The textbook instance: mainland Australia plus Tasmania, three
    /// colours.
    pub fn australia() -> Self {
        Self::new(
            ["WA", "NT", "SA", "Q", "NSW", "V", "T"],
            &[
                ("WA", "NT"),
                ("WA", "SA"),
                ("NT", "SA"),
                ("NT", "Q"),
                ("SA", "Q"),
                ("SA", "NSW"),
                ("SA", "V"),
                ("Q", "NSW"),
                ("NSW", "V"),
            ],
            vec![Colour::Red, Colour::Green, Colour::Blue],
        )
    }
}

impl Problem<Colour> for MapColouring {
    fn to_state(&self) -> Result<(Csp<Colour>, State<Colour>)> {
        let record = DeltaRecord::new();
        let mut variables = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let domain = Domain::new(&record, self.palette.iter().copied());
            variables.push(Variable::new(
                &record,
                region.clone(),
                domain,
                self.colours.get(region).copied(),
            )?);
        }
        let state = State::new(&record, variables)?;

        let constraints: Vec<Box<dyn Constraint<Colour>>> = self
            .borders
            .iter()
            .map(|(a, b)| {
                Box::new(NotEqual::new(a.clone(), b.clone())) as Box<dyn Constraint<Colour>>
            })
            .collect();
        Ok((Csp::new(constraints), state))
    }

    fn from_state(&self, _csp: &Csp<Colour>, state: &State<Colour>) -> Result<Self> {
        let mut solved = self.clone();
        solved.colours.clear();
        for region in &self.regions {
            if let Some(colour) = state.variable(region)?.value() {
                solved.colours.insert(region.clone(), colour);
            }
        }
        Ok(solved)
    }
}
