pub mod decl;
pub mod node;
pub mod type_expr;
