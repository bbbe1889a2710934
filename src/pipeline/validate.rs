// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::log as banner;

/// Validate configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    banner::header("Validating configuration");

    match config.validate() {
        Ok(()) => {
            banner::summary(
                "Configuration OK",
                &[
                    ("Portal", config.portal.base_url.clone()),
                    ("Timezone", config.portal.timezone.clone()),
                    (
                        "Session cookie",
                        if config.portal.session_cookie.is_some() { "set" } else { "not set" }
                            .to_string(),
                    ),
                    ("User agent", config.crawler.user_agent.clone()),
                    ("Timeout", format!("{}s", config.crawler.timeout_secs)),
                    ("Max concurrent", config.crawler.max_concurrent.to_string()),
                    (
                        "Semester filter",
                        config.filters.current_semester.clone().unwrap_or_else(|| "-".to_string()),
                    ),
                    (
                        "Level filter",
                        config
                            .filters
                            .course_level
                            .map_or_else(|| "-".to_string(), |level| level.to_string()),
                    ),
                ],
            );
            if config.portal.session_cookie.is_none() {
                log::warn!("No session cookie configured; only public pages will be visible");
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            Err(e)
        }
    }
}
