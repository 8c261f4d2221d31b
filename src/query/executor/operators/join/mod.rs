// Join Operators Module
//
// Equality joins between the current dataset and one foreign dataset.

pub use self::hash_join::{HashJoin, JoinIndex};

mod hash_join;

/// Join flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Drop local records without a match
    #[default]
    Inner,
    /// Keep local records without a match, with null foreign columns
    Left,
}

impl JoinType {
    /// `left` in any case is a left join; anything else is an inner join.
    pub fn parse(join_type: &str) -> Self {
        if join_type.trim().eq_ignore_ascii_case("left") {
            JoinType::Left
        } else {
            JoinType::Inner
        }
    }
}
