#![forbid(unsafe_code)]

mod activities;
mod sales;
mod system;
mod users;

fn sql_limit(limit: Option<usize>) -> i64 {
    // SQLite treats a negative LIMIT as "no limit".
    match limit {
        Some(limit) => i64::try_from(limit).unwrap_or(i64::MAX),
        None => -1,
    }
}
