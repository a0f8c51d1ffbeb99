use std::fmt;

/// One rendered SELECT block.
///
/// Nested sub-selects live in `children` and are serialized at the start of
/// the WHERE group, each inside its own `{ }`. Every other field is already
/// rendered text, so serialization is pure string assembly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryBlock {
    pub projection: Vec<String>,
    pub children: Vec<QueryBlock>,
    /// Triple patterns and FILTERs, in emission order
    pub elements: Vec<String>,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
    pub offset: u64,
}

impl QueryBlock {
    /// Number of blocks in this subtree, this one included
    pub fn block_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(QueryBlock::block_count)
            .sum::<usize>()
    }
}

impl fmt::Display for QueryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.projection.is_empty() {
            write!(f, "SELECT *")?;
        } else {
            write!(f, "SELECT {}", self.projection.join(" "))?;
        }

        write!(f, " WHERE {{")?;
        for child in &self.children {
            write!(f, " {{ {} }}", child)?;
        }
        for element in &self.elements {
            write!(f, " {}", element)?;
        }
        write!(f, " }}")?;

        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", self.group_by.join(" "))?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", self.order_by.join(" "))?;
        }
        if self.offset > 0 {
            write!(f, " OFFSET {}", self.offset)?;
        }
        Ok(())
    }
}
