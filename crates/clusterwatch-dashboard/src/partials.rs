//! HTML fragments.
//!
//! Each partial is swapped into one region of the page: the health-check
//! `<tbody>`, the alert area, or the warning slot after the cluster
//! selector. Askama escapes every interpolated value.

use askama::Template;

use crate::error::ViewResult;
use crate::table::Alert;
use crate::views::{CheckRow, WarningBanner};

/// Element id of the health-check table body.
pub const HEALTH_CHECKS_BODY_ID: &str = "health_checks_body";

/// Class marking warning banners, used to find and remove them.
pub const WARNING_CLASS: &str = "not_active_state_warning";

pub(crate) fn render<T: Template>(tmpl: &T) -> ViewResult<String> {
    Ok(tmpl.render()?)
}

// ── Health check rows ───────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<tbody id="{{ body_id }}">
{%- for row in rows %}
<tr id="{{ row.id }}"><td><span class="label label-{{ row.label }}">{{ row.status }}</span></td><td>{{ row.name }}</td><td>{{ row.duration }}</td><td>{{ row.description }}</td></tr>
{%- endfor %}
</tbody>"#
)]
pub(crate) struct HealthRowsPartial<'a> {
    pub body_id: &'a str,
    pub rows: &'a [CheckRow],
}

// ── Alerts ──────────────────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for alert in alerts %}<div class="alert alert-dismissable alert-{{ alert.level.as_str() }}">{{ alert.message }}</div>
{% endfor %}"#
)]
pub(crate) struct AlertsPartial<'a> {
    pub alerts: &'a [Alert],
}

// ── Warning banners ─────────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for banner in banners %}<div class="{{ class }} alert alert-dismissable alert-warning" style="margin-top: 5px"><h4>{{ banner.heading }}</h4><p>{{ banner.message }}</p></div>
{% endfor %}"#
)]
pub(crate) struct BannersPartial<'a> {
    pub class: &'a str,
    pub banners: &'a [WarningBanner],
}
