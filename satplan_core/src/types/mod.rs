//! Core scalar and collection types shared by the encoder and solver.

pub mod err;

/// A stable positive integer identifying a variable in the variable table.
///
/// Id `0` is never allocated and is reserved as a sentinel.
pub type VarId = u32;

/// A signed, nonzero literal. `abs(lit)` is always a valid [`VarId`]; the
/// sign encodes polarity (negative means negated).
pub type Literal = i64;

/// Returns the variable id underlying a literal.
pub fn var_of(lit: Literal) -> VarId {
    lit.unsigned_abs() as VarId
}

/// Returns the polarity of a literal: `true` if it asserts its variable,
/// `false` if it negates it.
pub fn polarity_of(lit: Literal) -> bool {
    lit > 0
}

/// Builds the literal for `var` under `polarity`.
pub fn literal_of(var: VarId, polarity: bool) -> Literal {
    if polarity {
        var as Literal
    } else {
        -(var as Literal)
    }
}

/// An ordered disjunction of literals with no duplicate literal.
///
/// Represented as a plain vector: clause sizes arising from this encoder
/// are small (at most a handful of literals), so a linear duplicate check
/// on insertion is cheaper than any fancier set structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause(Vec<Literal>);

impl Clause {
    pub fn new() -> Self {
        Clause(Vec::new())
    }

    pub fn unit(lit: Literal) -> Self {
        Clause(vec![lit])
    }

    pub fn from_literals(lits: impl IntoIterator<Item = Literal>) -> Self {
        let mut clause = Clause::new();
        for lit in lits {
            clause.push(lit);
        }
        clause
    }

    /// Appends `lit` unless it is already present.
    pub fn push(&mut self, lit: Literal) {
        if !self.0.contains(&lit) {
            self.0.push(lit);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Literal] {
        &self.0
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.0.contains(&lit)
    }

    pub fn into_vec(self) -> Vec<Literal> {
        self.0
    }

    /// A canonical (sorted) copy, used as a dedup key for clause groups
    /// that may otherwise emit the same clause more than once.
    pub fn canonical_key(&self) -> Vec<Literal> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted
    }
}

impl std::ops::Deref for Clause {
    type Target = [Literal];

    fn deref(&self) -> &[Literal] {
        &self.0
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause::from_literals(iter)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|lit| lit.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{rendered} 0")
    }
}
