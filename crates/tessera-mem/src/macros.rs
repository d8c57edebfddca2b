//! Internal assertion macro.

/// Precondition check gated on [`config::CHECKED`](crate::config::CHECKED).
///
/// Expands to `assert!` behind a constant condition, so with checks
/// disabled the whole expression (including the condition) is dead code
/// and folds away.
macro_rules! mem_assert {
    ($cond:expr, $($arg:tt)+) => {
        if $crate::config::CHECKED {
            assert!($cond, $($arg)+);
        }
    };
}
