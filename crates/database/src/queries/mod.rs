use std::fmt::Write as _;

use crate::DatabaseError;

pub mod journey;
pub mod station;
pub mod statistics;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

/// Appends optional `departure_at` bound conditions, numbering placeholders
/// from `first_placeholder`. The window is half open: `from` inclusive,
/// `to` exclusive.
pub(crate) fn departure_window_sql(first_placeholder: usize, from: bool, to: bool) -> String {
    let mut sql = String::new();
    let mut placeholder = first_placeholder;
    if from {
        let _ = write!(sql, " AND departure_at >= ${}", placeholder);
        placeholder += 1;
    }
    if to {
        let _ = write!(sql, " AND departure_at < ${}", placeholder);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::departure_window_sql;

    #[test]
    fn window_sql_numbers_placeholders_in_order() {
        assert_eq!(departure_window_sql(2, false, false), "");
        assert_eq!(departure_window_sql(2, true, false), " AND departure_at >= $2");
        assert_eq!(departure_window_sql(3, false, true), " AND departure_at < $3");
        assert_eq!(
            departure_window_sql(3, true, true),
            " AND departure_at >= $3 AND departure_at < $4"
        );
    }
}
