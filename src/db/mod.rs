pub mod article;
pub mod contact;
pub mod postgres_service;
pub mod user;

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::ColumnTrait;

use crate::types::article::DEFAULT_PAGE_LIMIT;

/// Case-insensitive substring match on a text column.
pub(crate) fn ilike_contains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// `(offset, limit)` with the limit clamped to `1..=DEFAULT_PAGE_LIMIT`.
pub(crate) fn page(skip: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, DEFAULT_PAGE_LIMIT);
    (skip.unwrap_or(0), limit)
}
