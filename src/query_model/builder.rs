//! Convenience constructors for assembling query trees in code.

use super::ast::{
    BinaryExpression, BinaryOperator, BodyClause, Constant, Expression, MainFromClause,
    MemberExpression, MethodCallExpression, OrderByClause, Ordering, OrderingDirection,
    QueryModel, ResultOperator, StringMethod, SubQueryExpression, SubQueryId, WhereClause,
};

impl QueryModel {
    /// `from <item_name> in <item_type>`: a query over all resources
    pub fn from_item(item_name: impl Into<String>, item_type: impl Into<String>) -> Self {
        let item_name = item_name.into();
        QueryModel {
            main_from: MainFromClause {
                from_expression: Expression::QuerySourceReference(item_name.clone()),
                item_name,
                item_type: item_type.into(),
            },
            body_clauses: Vec::new(),
            result_operators: Vec::new(),
        }
    }

    /// `from <item_name> in <from_expression>`, e.g. over `x.Accounts`
    pub fn from_expression(
        item_name: impl Into<String>,
        item_type: impl Into<String>,
        from_expression: Expression,
    ) -> Self {
        QueryModel {
            main_from: MainFromClause {
                item_name: item_name.into(),
                item_type: item_type.into(),
                from_expression,
            },
            body_clauses: Vec::new(),
            result_operators: Vec::new(),
        }
    }

    pub fn with_where(mut self, predicate: Expression) -> Self {
        self.body_clauses
            .push(BodyClause::Where(WhereClause { predicate }));
        self
    }

    pub fn with_ordering(mut self, expression: Expression, direction: OrderingDirection) -> Self {
        self.body_clauses.push(BodyClause::OrderBy(OrderByClause {
            orderings: vec![Ordering {
                expression,
                direction,
            }],
        }));
        self
    }

    pub fn with_body_clause(mut self, clause: BodyClause) -> Self {
        self.body_clauses.push(clause);
        self
    }

    pub fn with_result_operator(mut self, operator: ResultOperator) -> Self {
        self.result_operators.push(operator);
        self
    }
}

impl Expression {
    pub fn source(item_name: impl Into<String>) -> Self {
        Expression::QuerySourceReference(item_name.into())
    }

    pub fn member(
        expression: Expression,
        member: impl Into<String>,
        declaring_type: impl Into<String>,
    ) -> Self {
        Expression::Member(MemberExpression {
            expression: Box::new(expression),
            member: member.into(),
            declaring_type: declaring_type.into(),
        })
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Equal, left, right)
    }

    pub fn greater_than(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::GreaterThan, left, right)
    }

    pub fn and_also(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::AndAlso, left, right)
    }

    pub fn or_else(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::OrElse, left, right)
    }

    pub fn not(inner: Expression) -> Self {
        Expression::Not(Box::new(inner))
    }

    pub fn method_call(target: Expression, method: StringMethod, arguments: Vec<Expression>) -> Self {
        Expression::MethodCall(MethodCallExpression {
            target: Box::new(target),
            method,
            arguments,
        })
    }

    pub fn sub_query(id: u32, query_model: QueryModel) -> Self {
        Expression::SubQuery(SubQueryExpression {
            id: SubQueryId(id),
            query_model: Box::new(query_model),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Constant(Constant::String(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Expression::Constant(Constant::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Constant(Constant::Boolean(value))
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Expression::Constant(Constant::Uri(value.into()))
    }
}
