//! Operator precedence used to decide when an inlined expression needs parentheses.
//!
//! Categories are ordered from the tightest binding (`Atomic`) to the loosest
//! (`None`). A child expression must be wrapped when it binds more loosely than
//! the context its parent asks for.

/// Precedence category of an emitted expression, tightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Order {
    /// Literals, identifiers, parenthesised expressions.
    Atomic,
    /// `a.b`, `a[b]`, method calls.
    Member,
    /// `a++`, `a--`.
    Postfix,
    /// `!a`, `-a`, casts.
    Unary,
    /// `*`, `/`, `%`.
    Multiplicative,
    /// `+`, `-`.
    Additive,
    /// `<<`, `>>`, `>>>`.
    Shift,
    /// `<`, `>`, `<=`, `>=`, `instanceof`.
    Relational,
    /// `==`, `!=`.
    Equality,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    /// `a ? b : c`.
    Conditional,
    /// `=`, `+=`, ...
    Assignment,
    /// No surrounding expression, e.g. a naked expression statement or a call argument.
    None,
}

impl Order {
    /// Returns the next tighter category.
    ///
    /// Binary operators that are left-associative request their right operand at
    /// this level so that `a - (b - c)` keeps its parentheses.
    pub fn tighter(self) -> Order {
        match self {
            Order::Atomic | Order::Member => Order::Atomic,
            Order::Postfix => Order::Member,
            Order::Unary => Order::Postfix,
            Order::Multiplicative => Order::Unary,
            Order::Additive => Order::Multiplicative,
            Order::Shift => Order::Additive,
            Order::Relational => Order::Shift,
            Order::Equality => Order::Relational,
            Order::BitwiseAnd => Order::Equality,
            Order::BitwiseXor => Order::BitwiseAnd,
            Order::BitwiseOr => Order::BitwiseXor,
            Order::LogicalAnd => Order::BitwiseOr,
            Order::LogicalOr => Order::LogicalAnd,
            Order::Conditional => Order::LogicalOr,
            Order::Assignment => Order::Conditional,
            Order::None => Order::Assignment,
        }
    }
}

/// True iff `child` binds more loosely than the `parent` context requires.
///
/// A `None` context never requires parentheses.
pub fn needs_parens(child: Order, parent: Order) -> bool {
    parent != Order::None && child > parent
}
