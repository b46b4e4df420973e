//! Partner embed widget page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::EmbedWidget;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmbedWidgetQuery {
    pub token: Option<String>,
}

/// Template for the embeddable partner widget.
///
/// Renders `templates/embed_widget.html`: program branding, the partner's
/// short link, conversion counters and total earnings.
#[derive(Template, WebTemplate)]
#[template(path = "embed_widget.html")]
pub struct EmbedWidgetTemplate {
    pub program_name: String,
    pub program_logo: Option<String>,
    pub reward: Option<String>,
    pub short_url: String,
    pub clicks: i64,
    pub leads: i64,
    pub sales: i64,
    pub earnings: String,
}

impl From<EmbedWidget> for EmbedWidgetTemplate {
    fn from(widget: EmbedWidget) -> Self {
        Self {
            earnings: format_cents(widget.earnings, &widget.program.currency),
            short_url: widget.link.short_url(),
            clicks: widget.link.clicks,
            leads: widget.link.leads,
            sales: widget.link.sales,
            program_name: widget.program.name,
            program_logo: widget.program.logo,
            reward: widget.program.reward_description,
        }
    }
}

/// Renders the embed widget for a partner link.
///
/// # Endpoint
///
/// `GET /embed/widget?token=<embed token>`
///
/// # Errors
///
/// - `400 Bad Request` - token missing
/// - `404 Not Found` - token unknown or expired, link or program gone
pub async fn embed_widget_handler(
    State(state): State<AppState>,
    Query(query): Query<EmbedWidgetQuery>,
) -> Result<EmbedWidgetTemplate, AppError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing embed token", json!({ "field": "token" })))?;

    let widget = state.embed_service.get_widget(&token).await?;

    Ok(widget.into())
}

/// Formats an amount in minor units, e.g. `12345, "USD"` as `$123.45`.
fn format_cents(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let amount = format!("{}.{:02}", abs / 100, abs % 100);

    match currency.to_ascii_uppercase().as_str() {
        "USD" => format!("{sign}${amount}"),
        "EUR" => format!("{sign}€{amount}"),
        "GBP" => format!("{sign}£{amount}"),
        other => format!("{sign}{amount} {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PartnerLink, Program};

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(12_345, "USD"), "$123.45");
        assert_eq!(format_cents(5, "usd"), "$0.05");
        assert_eq!(format_cents(0, "EUR"), "€0.00");
        assert_eq!(format_cents(-250, "GBP"), "-£2.50");
        assert_eq!(format_cents(100_000, "SEK"), "1000.00 SEK");
    }

    #[test]
    fn test_template_renders_widget() {
        let widget = EmbedWidget {
            link: PartnerLink {
                id: 1,
                domain: "ref.example.com".to_string(),
                key: "alice".to_string(),
                url: "https://example.com".to_string(),
                program_id: Some(2),
                clicks: 120,
                leads: 8,
                sales: 3,
            },
            program: Program {
                id: 2,
                name: "Acme <Partners>".to_string(),
                logo: Some("https://cdn.example.com/acme.png".to_string()),
                reward_description: Some("30% recurring".to_string()),
                currency: "USD".to_string(),
            },
            earnings: 12_345,
        };

        let html = EmbedWidgetTemplate::from(widget).render().unwrap();

        assert!(html.contains("Acme &#60;Partners&#62;") || html.contains("Acme &lt;Partners&gt;"));
        assert!(html.contains("https://ref.example.com/alice"));
        assert!(html.contains("$123.45"));
        assert!(html.contains("30% recurring"));
        assert!(html.contains("https://cdn.example.com/acme.png"));
        assert!(html.contains(">120<"));
    }
}
