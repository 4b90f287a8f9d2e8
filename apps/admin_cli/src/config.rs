use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Defaults, then `admin.toml` in the working directory, then environment.
/// The `--server-url` flag overrides all of these in main.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("admin.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("FESTADMIN_SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_local_server() {
        assert_eq!(Settings::default().server_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn file_values_parse_from_plain_toml() {
        let parsed: HashMap<String, String> =
            toml::from_str("server_url = \"https://admin.fest.example\"").expect("toml");
        assert_eq!(
            parsed.get("server_url").map(String::as_str),
            Some("https://admin.fest.example")
        );
    }
}
