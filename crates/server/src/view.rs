#![forbid(unsafe_code)]

use dash_core::timestamps::ts_ms_to_rfc3339;
use dash_core::{DashboardSummary, Money};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2328}\
table{border-collapse:collapse;margin-bottom:2rem}\
td,th{border-bottom:1px solid #d0d7de;padding:.25rem .75rem;text-align:left}\
.cards{display:flex;gap:1rem;margin-bottom:2rem}\
.card{border:1px solid #d0d7de;border-radius:6px;padding:1rem;min-width:10rem}\
.card b{display:block;font-size:1.5rem}";

/// Renders the dashboard page. All dynamic text is HTML-escaped.
pub fn render_summary_page(summary: &DashboardSummary) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Dashboard</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<h1>Dashboard</h1>\n");

    out.push_str("<div class=\"cards\">\n");
    card(&mut out, "Total revenue", &summary.total_revenue.to_string());
    card(&mut out, "Total orders", &summary.total_orders.to_string());
    card(&mut out, "Active users", &summary.active_users.to_string());
    card(
        &mut out,
        "Conversion rate",
        &format!("{:.2}%", summary.conversion_rate),
    );
    out.push_str("</div>\n");

    out.push_str("<h2>Recent sales</h2>\n<table>\n");
    out.push_str("<tr><th>Date</th><th>Category</th><th>Region</th><th>Orders</th><th>Revenue</th></tr>\n");
    for sale in &summary.recent_sales {
        row(
            &mut out,
            &[
                &ts_ms_to_rfc3339(sale.ts_ms),
                &sale.category,
                &sale.region,
                &sale.order_count.to_string(),
                &sale.revenue.to_string(),
            ],
        );
    }
    out.push_str("</table>\n");

    breakdown(&mut out, "Sales by category", &summary.sales_by_category);
    breakdown(&mut out, "Sales by region", &summary.sales_by_region);

    out.push_str("<h2>User metrics</h2>\n<table>\n");
    out.push_str("<tr><th>Date</th><th>Active users</th><th>New signups</th><th>Page views</th><th>Bounce rate</th></tr>\n");
    for metric in &summary.user_metrics {
        row(
            &mut out,
            &[
                &ts_ms_to_rfc3339(metric.date_ms),
                &metric.active_users.to_string(),
                &metric.new_signups.to_string(),
                &metric.page_views.to_string(),
                &format!("{:.1}%", metric.bounce_rate * 100.0),
            ],
        );
    }
    out.push_str("</table>\n");

    out.push_str("<h2>System (last 24h)</h2>\n<table>\n");
    out.push_str("<tr><th>Time</th><th>CPU</th><th>Memory</th><th>Disk</th><th>Connections</th><th>Response</th></tr>\n");
    for metric in &summary.system_metrics {
        row(
            &mut out,
            &[
                &ts_ms_to_rfc3339(metric.ts_ms),
                &format!("{:.1}%", metric.cpu_usage_pct),
                &format!("{:.1}%", metric.mem_usage_pct),
                &format!("{:.1}%", metric.disk_usage_pct),
                &metric.active_connections.to_string(),
                &format!("{:.0} ms", metric.response_time_ms),
            ],
        );
    }
    out.push_str("</table>\n");

    out.push_str("<h2>Recent activity</h2>\n<table>\n");
    out.push_str("<tr><th>Time</th><th>User</th><th>Action</th><th>Description</th><th>Status</th></tr>\n");
    for activity in &summary.recent_activities {
        row(
            &mut out,
            &[
                &ts_ms_to_rfc3339(activity.ts_ms),
                &activity.user_name,
                &activity.action,
                &activity.description,
                activity.status.as_str(),
            ],
        );
    }
    out.push_str("</table>\n");

    let _ = writeln!(
        out,
        "<footer>Generated {}</footer>\n</body>\n</html>",
        ts_ms_to_rfc3339(summary.generated_at_ms)
    );
    out
}

fn card(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "<div class=\"card\">{}<b>{}</b></div>",
        escape_html(label),
        escape_html(value)
    );
}

fn row(out: &mut String, cells: &[&str]) {
    out.push_str("<tr>");
    for cell in cells {
        let _ = write!(out, "<td>{}</td>", escape_html(cell));
    }
    out.push_str("</tr>\n");
}

fn breakdown(out: &mut String, title: &str, totals: &BTreeMap<String, Money>) {
    let _ = writeln!(out, "<h2>{}</h2>\n<table>", escape_html(title));
    for (key, total) in totals {
        row(out, &[key, &total.to_string()]);
    }
    out.push_str("</table>\n");
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::{ActivityRecord, ActivityStatus};

    #[test]
    fn page_escapes_user_supplied_text() {
        let summary = DashboardSummary {
            recent_activities: vec![ActivityRecord {
                ts_ms: 0,
                user_name: "<script>alert(1)</script>".to_string(),
                action: "Login".to_string(),
                description: "Tom & Jerry".to_string(),
                status: ActivityStatus::Failed,
            }],
            ..DashboardSummary::default()
        };
        let html = render_summary_page(&summary);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("<td>Failed</td>"));
    }

    #[test]
    fn page_shows_breakdowns_and_totals() {
        let mut summary = DashboardSummary {
            total_revenue: Money::from_units(350),
            total_orders: 7,
            ..DashboardSummary::default()
        };
        summary
            .sales_by_category
            .insert("Home & Garden".to_string(), Money::from_units(350));
        let html = render_summary_page(&summary);
        assert!(html.contains("<b>350.00</b>"));
        assert!(html.contains("<td>Home &amp; Garden</td><td>350.00</td>"));
    }
}
