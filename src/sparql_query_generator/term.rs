//! Building blocks of a SPARQL SELECT block: terms, triple patterns,
//! filter expressions, aggregates and order conditions.
//!
//! `Display` renders every IRI in full and is meant for logging and error
//! messages; query text goes through [`super::to_sparql::ToSparql`], which
//! abbreviates IRIs with the registered prefixes.

use std::fmt;

use oxrdf::{Literal, NamedNode, Variable};

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Term {
    Variable(Variable),
    NamedNode(NamedNode),
    Literal(Literal),
}

impl Term {
    /// Whether the term can stand in subject position
    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Variable(_) | Term::NamedNode(_))
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::Variable(variable)
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(variable) => write!(f, "{}", variable),
            Term::NamedNode(node) => write!(f, "{}", node),
            Term::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: impl Into<Term>, predicate: impl Into<Term>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SparqlOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    And,
    Or,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl SparqlOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            SparqlOperator::Equal => "=",
            SparqlOperator::NotEqual => "!=",
            SparqlOperator::Less => "<",
            SparqlOperator::LessOrEqual => "<=",
            SparqlOperator::Greater => ">",
            SparqlOperator::GreaterOrEqual => ">=",
            SparqlOperator::And => "&&",
            SparqlOperator::Or => "||",
            SparqlOperator::Add => "+",
            SparqlOperator::Subtract => "-",
            SparqlOperator::Multiply => "*",
            SparqlOperator::Divide => "/",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SparqlFunction {
    Contains,
    StrStarts,
    StrEnds,
    LCase,
    UCase,
    Coalesce,
    Bound,
}

impl SparqlFunction {
    pub fn name(&self) -> &'static str {
        match self {
            SparqlFunction::Contains => "CONTAINS",
            SparqlFunction::StrStarts => "STRSTARTS",
            SparqlFunction::StrEnds => "STRENDS",
            SparqlFunction::LCase => "LCASE",
            SparqlFunction::UCase => "UCASE",
            SparqlFunction::Coalesce => "COALESCE",
            SparqlFunction::Bound => "BOUND",
        }
    }
}

/// Value or boolean expression used in FILTER and ORDER BY
#[derive(Debug, PartialEq, Clone)]
pub enum SparqlExpr {
    Term(Term),
    Binary {
        operator: SparqlOperator,
        left: Box<SparqlExpr>,
        right: Box<SparqlExpr>,
    },
    Not(Box<SparqlExpr>),
    Call {
        function: SparqlFunction,
        arguments: Vec<SparqlExpr>,
    },
}

impl SparqlExpr {
    pub fn binary(operator: SparqlOperator, left: SparqlExpr, right: SparqlExpr) -> Self {
        SparqlExpr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: SparqlFunction, arguments: Vec<SparqlExpr>) -> Self {
        SparqlExpr::Call {
            function,
            arguments,
        }
    }
}

impl From<Term> for SparqlExpr {
    fn from(term: Term) -> Self {
        SparqlExpr::Term(term)
    }
}

impl From<Variable> for SparqlExpr {
    fn from(variable: Variable) -> Self {
        SparqlExpr::Term(Term::Variable(variable))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
}

impl AggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Sample => "SAMPLE",
        }
    }
}

/// Aggregate selected in place of the object variable, bound to `alias`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Aggregate {
    pub function: AggregateFunction,
    pub argument: Variable,
    pub alias: Variable,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function.name(), self.argument)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OrderCondition {
    pub expression: SparqlExpr,
    pub direction: SortDirection,
}
