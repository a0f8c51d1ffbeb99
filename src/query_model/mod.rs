//! Query model: the typed query tree handed to the compiler.
//!
//! The tree is produced by an external front end (a LINQ-style expression
//! parser, generated resource classes, ...) and is read-only to the
//! compiler. It serializes with serde so it can also be loaded from JSON or
//! YAML files.
//!
//! ```text
//! from x in Person                           MainFromClause
//! where x.Name == "A"                        BodyClause::Where
//! orderby x.Age descending                   BodyClause::OrderBy
//! select x).Skip(5).Count()                  ResultOperator::Skip, ResultOperator::Count
//! ```

pub mod ast;
mod builder;
pub mod errors;

use std::path::Path;

pub use ast::{
    AdditionalFromClause, BinaryExpression, BinaryOperator, BodyClause, Constant, Expression,
    GroupJoinClause, JoinClause, MainFromClause, MemberExpression, MethodCallExpression,
    OrderByClause, Ordering, OrderingDirection, QueryModel, ResultOperator, StringMethod,
    SubQueryExpression, SubQueryId, WhereClause,
};
pub use errors::QueryModelError;

impl QueryModel {
    /// Parse a query model from JSON
    pub fn from_json_str(json: &str) -> Result<Self, QueryModelError> {
        serde_json::from_str(json).map_err(|e| QueryModelError::Parse {
            format: "JSON",
            error: e.to_string(),
        })
    }

    /// Parse a query model from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, QueryModelError> {
        serde_yaml::from_str(yaml).map_err(|e| QueryModelError::Parse {
            format: "YAML",
            error: e.to_string(),
        })
    }

    /// Load a query model file; `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QueryModelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| QueryModelError::Read {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// Sub-query expressions directly reachable from this model's clauses
    /// and result operators (not descending into the sub-queries themselves).
    pub fn sub_queries(&self) -> Vec<&SubQueryExpression> {
        let mut found = Vec::new();
        self.main_from.from_expression.collect_sub_queries(&mut found);
        for clause in &self.body_clauses {
            match clause {
                BodyClause::Where(where_clause) => {
                    where_clause.predicate.collect_sub_queries(&mut found)
                }
                BodyClause::OrderBy(order_by) => {
                    for ordering in &order_by.orderings {
                        ordering.expression.collect_sub_queries(&mut found);
                    }
                }
                BodyClause::AdditionalFrom(from) => {
                    from.from_expression.collect_sub_queries(&mut found)
                }
                BodyClause::Join(join) => join.collect_sub_queries(&mut found),
                BodyClause::GroupJoin(group_join) => {
                    group_join.join_clause.collect_sub_queries(&mut found)
                }
            }
        }
        for operator in &self.result_operators {
            if let ResultOperator::Contains(expression) = operator {
                expression.collect_sub_queries(&mut found);
            }
        }
        found
    }
}

impl JoinClause {
    fn collect_sub_queries<'a>(&'a self, found: &mut Vec<&'a SubQueryExpression>) {
        self.inner_sequence.collect_sub_queries(found);
        self.outer_key_selector.collect_sub_queries(found);
        self.inner_key_selector.collect_sub_queries(found);
    }
}

impl Expression {
    /// Collect the outermost sub-query expressions inside this expression.
    pub fn collect_sub_queries<'a>(&'a self, found: &mut Vec<&'a SubQueryExpression>) {
        match self {
            Expression::SubQuery(sub_query) => found.push(sub_query),
            Expression::Member(member) => member.expression.collect_sub_queries(found),
            Expression::Binary(binary) => {
                binary.left.collect_sub_queries(found);
                binary.right.collect_sub_queries(found);
            }
            Expression::Not(inner) => inner.collect_sub_queries(found),
            Expression::MethodCall(call) => {
                call.target.collect_sub_queries(found);
                for argument in &call.arguments {
                    argument.collect_sub_queries(found);
                }
            }
            Expression::QuerySourceReference(_) | Expression::Constant(_) => {}
        }
    }
}
