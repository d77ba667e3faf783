//! Terminal dashboard adapter: banner, theme, session state, HTTP client.

pub mod api_client;
pub mod banner;
pub mod dashboard;
pub mod session;
pub mod tui;

pub use api_client::HttpAdvisorClient;
pub use dashboard::TuiDashboard;
pub use session::{DashboardSession, Page};

/// Prints the welcome banner and applies the neon theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui(api_url: &str) {
    banner::print_welcome(api_url);
    tui::apply_theme();
}
