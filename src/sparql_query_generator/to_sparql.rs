use std::collections::BTreeSet;

use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};

use super::term::{
    Aggregate, OrderCondition, SortDirection, SparqlExpr, Term, TriplePattern,
};
use crate::resource_mapping::PrefixMap;

/// Rendering state shared by every node of one query text.
///
/// Records which prefixes were used while abbreviating IRIs so the caller
/// can emit exactly the matching `PREFIX` declarations.
pub struct RenderContext<'a> {
    prefixes: &'a PrefixMap,
    used: BTreeSet<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(prefixes: &'a PrefixMap) -> Self {
        Self {
            prefixes,
            used: BTreeSet::new(),
        }
    }

    /// `prefix:local` when a registered namespace covers the IRI, `<iri>` otherwise
    pub fn named_node(&mut self, node: &NamedNode) -> String {
        match self.prefixes.abbreviate(node.as_str()) {
            Some((prefix, local)) => {
                self.used.insert(prefix.to_string());
                format!("{}:{}", prefix, local)
            }
            None => node.to_string(),
        }
    }

    /// `PREFIX` declarations for every prefix used so far, one per line
    pub fn prologue(&self) -> String {
        self.used
            .iter()
            .filter_map(|prefix| {
                self.prefixes
                    .namespace(prefix)
                    .map(|namespace| format!("PREFIX {}: <{}>\n", prefix, namespace))
            })
            .collect()
    }
}

/// Convert a query node to SPARQL text
pub trait ToSparql {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String;
}

impl ToSparql for NamedNode {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        ctx.named_node(self)
    }
}

impl ToSparql for Literal {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        if self.language().is_some() || self.datatype() == xsd::STRING {
            return self.to_string();
        }
        if self.datatype() == xsd::INTEGER || self.datatype() == xsd::BOOLEAN {
            return self.value().to_string();
        }
        // Escape through a simple literal, then attach the abbreviated datatype
        let lexical = Literal::new_simple_literal(self.value()).to_string();
        let datatype = ctx.named_node(&self.datatype().into_owned());
        format!("{}^^{}", lexical, datatype)
    }
}

impl ToSparql for Term {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        match self {
            Term::Variable(variable) => variable.to_string(),
            Term::NamedNode(node) => node.to_sparql(ctx),
            Term::Literal(literal) => literal.to_sparql(ctx),
        }
    }
}

impl ToSparql for TriplePattern {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        format!(
            "{} {} {} .",
            self.subject.to_sparql(ctx),
            self.predicate.to_sparql(ctx),
            self.object.to_sparql(ctx)
        )
    }
}

impl ToSparql for SparqlExpr {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        match self {
            SparqlExpr::Term(term) => term.to_sparql(ctx),
            SparqlExpr::Binary {
                operator,
                left,
                right,
            } => format!(
                "({} {} {})",
                left.to_sparql(ctx),
                operator.symbol(),
                right.to_sparql(ctx)
            ),
            SparqlExpr::Not(inner) => format!("!{}", bracketed(inner, ctx)),
            SparqlExpr::Call {
                function,
                arguments,
            } => {
                let arguments: Vec<String> =
                    arguments.iter().map(|arg| arg.to_sparql(ctx)).collect();
                format!("{}({})", function.name(), arguments.join(", "))
            }
        }
    }
}

impl ToSparql for Aggregate {
    fn to_sparql(&self, _ctx: &mut RenderContext) -> String {
        format!("({} AS {})", self, self.alias)
    }
}

impl ToSparql for OrderCondition {
    fn to_sparql(&self, ctx: &mut RenderContext) -> String {
        let keyword = match self.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        format!("{}{}", keyword, bracketed(&self.expression, ctx))
    }
}

/// Render an expression as a SPARQL bracketted expression.
///
/// Binary expressions already carry their own parentheses.
pub fn bracketed(expr: &SparqlExpr, ctx: &mut RenderContext) -> String {
    match expr {
        SparqlExpr::Binary { .. } => expr.to_sparql(ctx),
        _ => format!("({})", expr.to_sparql(ctx)),
    }
}
