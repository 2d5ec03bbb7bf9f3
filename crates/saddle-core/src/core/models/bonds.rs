use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// An unordered pair of atom indices, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondPair {
    i: usize,
    j: usize,
}

impl BondPair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }

    pub fn first(&self) -> usize {
        self.i
    }

    pub fn second(&self) -> usize {
        self.j
    }
}

impl From<(usize, usize)> for BondPair {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for BondPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RearrangementError {
    #[error("Bond {0} joins an atom to itself")]
    SelfBond(BondPair),

    #[error("Bond {0} is declared as both forming and breaking")]
    FormingAndBreaking(BondPair),

    #[error("Bond rearrangement declares no forming or breaking bonds")]
    Empty,
}

/// The declared set of bonds expected to form and break in a reaction step.
///
/// Forming and breaking sets are disjoint. The derived `active_atoms` and
/// `all` sets are computed once at construction; the rearrangement is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondRearrangement {
    forming: BTreeSet<BondPair>,
    breaking: BTreeSet<BondPair>,
    active_atoms: BTreeSet<usize>,
    all: BTreeSet<BondPair>,
}

impl BondRearrangement {
    /// Creates a bond rearrangement from forming and breaking atom pairs.
    ///
    /// # Arguments
    ///
    /// * `forming` - Atom pairs whose bond forms going from reactant to product.
    /// * `breaking` - Atom pairs whose bond breaks going from reactant to product.
    ///
    /// # Errors
    ///
    /// Returns a [`RearrangementError`] if a pair joins an atom to itself, if a
    /// pair appears in both sets, or if both sets are empty.
    pub fn new<F, B>(forming: F, breaking: B) -> Result<Self, RearrangementError>
    where
        F: IntoIterator,
        F::Item: Into<BondPair>,
        B: IntoIterator,
        B::Item: Into<BondPair>,
    {
        let forming: BTreeSet<BondPair> = forming.into_iter().map(Into::into).collect();
        let breaking: BTreeSet<BondPair> = breaking.into_iter().map(Into::into).collect();

        if forming.is_empty() && breaking.is_empty() {
            return Err(RearrangementError::Empty);
        }
        if let Some(pair) = forming.iter().chain(&breaking).find(|p| p.i == p.j) {
            return Err(RearrangementError::SelfBond(*pair));
        }
        if let Some(pair) = forming.intersection(&breaking).next() {
            return Err(RearrangementError::FormingAndBreaking(*pair));
        }

        let all: BTreeSet<BondPair> = forming.union(&breaking).copied().collect();
        let active_atoms = all.iter().flat_map(|p| [p.i, p.j]).collect();

        Ok(Self {
            forming,
            breaking,
            active_atoms,
            all,
        })
    }

    pub fn forming(&self) -> &BTreeSet<BondPair> {
        &self.forming
    }

    pub fn breaking(&self) -> &BTreeSet<BondPair> {
        &self.breaking
    }

    /// Indices of every atom that takes part in a forming or breaking bond.
    pub fn active_atoms(&self) -> &BTreeSet<usize> {
        &self.active_atoms
    }

    /// Union of forming and breaking bonds.
    pub fn all(&self) -> &BTreeSet<BondPair> {
        &self.all
    }

    /// Largest atom index referenced by the rearrangement.
    pub fn max_atom_index(&self) -> Option<usize> {
        self.active_atoms.iter().next_back().copied()
    }
}
