#![forbid(unsafe_code)]

mod activities;
mod indexes;
mod meta;
mod pragmas;
mod sales;
mod system_metrics;
mod user_metrics;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(pragmas::SQL);
    sql.push_str(meta::SQL);
    sql.push_str(sales::SQL);
    sql.push_str(user_metrics::SQL);
    sql.push_str(system_metrics::SQL);
    sql.push_str(activities::SQL);
    sql.push_str(indexes::SQL);
    sql
}
