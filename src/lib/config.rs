//! Frontend configuration. Values are baked in at compile time and may be
//! overridden at runtime through `window.COMPASS_CONFIG`, so one built
//! bundle can point at different backends. Nothing here is secret.

/// Resolved configuration the rest of the app reads.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub demo_mode: bool,
}

impl AppConfig {
    /// Compile-time values first, then whatever `window.COMPASS_CONFIG`
    /// carries on top.
    pub fn load() -> Self {
        let mut config = Self {
            api_base_url: option_env!("COMPASS_API_BASE_URL")
                .or(option_env!("COMPASS_API_HOST"))
                .unwrap_or("/api")
                .to_string(),
            environment: option_env!("COMPASS_ENVIRONMENT")
                .unwrap_or("production")
                .to_string(),
            demo_mode: option_env!("COMPASS_DEMO_MODE")
                .and_then(parse_flag)
                .unwrap_or(false),
        };
        if let Some(overrides) = RuntimeOverrides::from_window() {
            overrides.merge_into(&mut config);
        }
        config
    }
}

/// Optional per-deployment overrides; a missing or blank entry leaves the
/// compiled value alone.
#[derive(Default)]
struct RuntimeOverrides {
    api_base_url: Option<String>,
    environment: Option<String>,
    demo_mode: Option<bool>,
}

impl RuntimeOverrides {
    fn merge_into(self, config: &mut AppConfig) {
        if let Some(url) = self.api_base_url {
            config.api_base_url = url;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(demo) = self.demo_mode {
            config.demo_mode = demo;
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn from_window() -> Option<Self> {
        use js_sys::{Object, Reflect};
        use wasm_bindgen::JsValue;

        let window = web_sys::window()?;
        let raw = Reflect::get(&window, &JsValue::from_str("COMPASS_CONFIG")).ok()?;
        if raw.is_null() || raw.is_undefined() {
            return None;
        }
        let object = Object::from(raw);
        Some(Self {
            api_base_url: string_prop(&object, "api_base_url"),
            environment: string_prop(&object, "environment"),
            demo_mode: bool_prop(&object, "demo_mode"),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_window() -> Option<Self> {
        None
    }
}

#[cfg(target_arch = "wasm32")]
fn string_prop(object: &js_sys::Object, key: &str) -> Option<String> {
    js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()
        .as_deref()
        .and_then(non_empty)
}

#[cfg(target_arch = "wasm32")]
fn bool_prop(object: &js_sys::Object, key: &str) -> Option<bool> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    if let Some(flag) = value.as_bool() {
        return Some(flag);
    }
    value.as_string().and_then(|text| parse_flag(&text))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeOverrides, non_empty, parse_flag};

    fn compiled_defaults() -> AppConfig {
        AppConfig {
            api_base_url: "/api".to_string(),
            environment: "production".to_string(),
            demo_mode: false,
        }
    }

    #[test]
    fn non_empty_trims_and_rejects_blank() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(
            non_empty("  https://compass.example.com/api "),
            Some("https://compass.example.com/api".to_string())
        );
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn blank_overrides_leave_compiled_values() {
        let mut config = compiled_defaults();
        let overrides = RuntimeOverrides {
            api_base_url: non_empty(""),
            environment: non_empty("  "),
            demo_mode: None,
        };

        overrides.merge_into(&mut config);

        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.environment, "production");
        assert!(!config.demo_mode);
    }

    #[test]
    fn populated_overrides_replace_compiled_values() {
        let mut config = compiled_defaults();
        let overrides = RuntimeOverrides {
            api_base_url: non_empty("https://api.compass.example"),
            environment: non_empty("staging"),
            demo_mode: parse_flag("true"),
        };

        overrides.merge_into(&mut config);

        assert_eq!(config.api_base_url, "https://api.compass.example");
        assert_eq!(config.environment, "staging");
        assert!(config.demo_mode);
    }
}
