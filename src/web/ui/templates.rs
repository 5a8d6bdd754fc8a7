use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub station_name: Option<String>,
    /// The page asks the browser for its position when this is false.
    pub location_known: bool,
    pub refresh_ms: u128,
}
