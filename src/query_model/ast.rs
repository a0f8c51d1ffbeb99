use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete query over typed resources: one source, ordered body clauses
/// and ordered result operators.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct QueryModel {
    pub main_from: MainFromClause,
    #[serde(default)]
    pub body_clauses: Vec<BodyClause>,
    #[serde(default)]
    pub result_operators: Vec<ResultOperator>,
}

/// `from <item_name> in <from_expression>`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MainFromClause {
    pub item_name: String,
    /// Logical resource type of the item (e.g. `Person`)
    pub item_type: String,
    pub from_expression: Expression,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyClause {
    Where(WhereClause),
    OrderBy(OrderByClause),
    AdditionalFrom(AdditionalFromClause),
    Join(JoinClause),
    GroupJoin(GroupJoinClause),
}

impl BodyClause {
    pub fn kind_name(&self) -> &'static str {
        match self {
            BodyClause::Where(_) => "where",
            BodyClause::OrderBy(_) => "order by",
            BodyClause::AdditionalFrom(_) => "additional from",
            BodyClause::Join(_) => "join",
            BodyClause::GroupJoin(_) => "group join",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct WhereClause {
    pub predicate: Expression,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OrderByClause {
    pub orderings: Vec<Ordering>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Ordering {
    pub expression: Expression,
    #[serde(default)]
    pub direction: OrderingDirection,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingDirection {
    #[default]
    Ascending,
    Descending,
}

/// Second `from` over another sequence. Never translated.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AdditionalFromClause {
    pub item_name: String,
    pub item_type: String,
    pub from_expression: Expression,
}

/// `join <item> in <inner> on <outer_key> equals <inner_key>`. Never translated.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct JoinClause {
    pub item_name: String,
    pub item_type: String,
    pub inner_sequence: Expression,
    pub outer_key_selector: Expression,
    pub inner_key_selector: Expression,
}

/// `join ... into <item_name>`. Never translated.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GroupJoinClause {
    pub item_name: String,
    pub join_clause: JoinClause,
}

/// Post-processing step applied to the result set of a query scope
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOperator {
    Any,
    Average,
    Count,
    First,
    Last,
    Max,
    Min,
    Sum,
    /// Restrict to resources of the given logical type
    OfType(String),
    Skip(u64),
    Take(u64),
    Distinct,
    Reverse,
    Contains(Expression),
}

impl ResultOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ResultOperator::Any => "Any",
            ResultOperator::Average => "Average",
            ResultOperator::Count => "Count",
            ResultOperator::First => "First",
            ResultOperator::Last => "Last",
            ResultOperator::Max => "Max",
            ResultOperator::Min => "Min",
            ResultOperator::Sum => "Sum",
            ResultOperator::OfType(_) => "OfType",
            ResultOperator::Skip(_) => "Skip",
            ResultOperator::Take(_) => "Take",
            ResultOperator::Distinct => "Distinct",
            ResultOperator::Reverse => "Reverse",
            ResultOperator::Contains(_) => "Contains",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// Reference to a query item by name, e.g. `x` in `from x in ...`
    QuerySourceReference(String),

    /// Member access, e.g. `x.Name`
    Member(MemberExpression),

    Constant(Constant),

    /// Comparison, boolean connective or arithmetic
    Binary(BinaryExpression),

    Not(Box<Expression>),

    /// String method call, e.g. `x.Name.Contains("a")`
    MethodCall(MethodCallExpression),

    /// Nested query whose result feeds the enclosing one
    SubQuery(SubQueryExpression),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberExpression {
    pub expression: Box<Expression>,
    pub member: String,
    /// Resource type declaring the member, used for property lookup
    pub declaring_type: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    AndAlso,
    OrElse,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Coalesce,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MethodCallExpression {
    pub target: Box<Expression>,
    pub method: StringMethod,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringMethod {
    Contains,
    StartsWith,
    EndsWith,
    ToLower,
    ToUpper,
}

impl StringMethod {
    /// Number of arguments the method takes besides its target
    pub fn arity(&self) -> usize {
        match self {
            StringMethod::Contains | StringMethod::StartsWith | StringMethod::EndsWith => 1,
            StringMethod::ToLower | StringMethod::ToUpper => 0,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SubQueryExpression {
    pub id: SubQueryId,
    pub query_model: Box<QueryModel>,
}

/// Handle assigned by the front end to each sub-query node.
///
/// Pairs the node with the query generator built for it, so no identity
/// lookups on the caller's tree are needed.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubQueryId(pub u32);

impl fmt::Display for SubQueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// Resource IRI
    Uri(String),
    Null,
}
