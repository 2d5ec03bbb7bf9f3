use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    Hessian,
    Optimization,
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hessian => write!(f, "hessian"),
            Self::Optimization => write!(f, "optimization"),
        }
    }
}

/// An electronic-structure method and the keywords used for each kind of
/// calculation run with it.
///
/// For the optimized minima to lie on the same surface as the Hessian, the
/// Hessian and optimization keywords should describe the same level of theory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Method {
    pub name: String,
    pub hess_keywords: Vec<String>,
    pub opt_keywords: Vec<String>,
}

impl Method {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_hess_keywords(mut self, keywords: Vec<String>) -> Self {
        self.hess_keywords = keywords;
        self
    }

    pub fn with_opt_keywords(mut self, keywords: Vec<String>) -> Self {
        self.opt_keywords = keywords;
        self
    }

    /// Keywords for a calculation of the given kind.
    pub fn keywords(&self, kind: CalculationKind) -> &[String] {
        match kind {
            CalculationKind::Hessian => &self.hess_keywords,
            CalculationKind::Optimization => &self.opt_keywords,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
