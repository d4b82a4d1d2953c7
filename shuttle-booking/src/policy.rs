use serde::Deserialize;
use std::env;

/// Workspace configuration, layered the same way for every deployment:
/// `config/default` then `config/<RUN_MODE>` then `config/local`, with
/// `SHUTTLE__`-prefixed environment variables on top. Every field carries a
/// default so a bare environment still gets the shipped policy.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BookingConfig {
    #[serde(default)]
    pub policy: FamilyPolicy,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Family-ticket policy caps. An employee booking for relatives may take at
/// most `family_cap` family tickets per leg, reduced to
/// `family_cap_with_employee` when the employee occupies a seat themself.
#[derive(Debug, Deserialize, Clone)]
pub struct FamilyPolicy {
    #[serde(default = "default_family_cap")]
    pub family_cap: u32,
    #[serde(default = "default_family_cap_with_employee")]
    pub family_cap_with_employee: u32,
}

fn default_family_cap() -> u32 {
    3
}

fn default_family_cap_with_employee() -> u32 {
    2
}

impl Default for FamilyPolicy {
    fn default() -> Self {
        Self {
            family_cap: default_family_cap(),
            family_cap_with_employee: default_family_cap_with_employee(),
        }
    }
}

impl FamilyPolicy {
    /// Cap applicable to one leg given whether the employee travels on it.
    pub fn cap(&self, employee_traveling: bool) -> u32 {
        if employee_traveling {
            self.family_cap_with_employee
        } else {
            self.family_cap
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Simulated round-trip latency of the mock booking gateway.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay_ms() -> u64 {
    800
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl BookingConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SHUTTLE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_policy_caps() {
        let policy = FamilyPolicy::default();
        assert_eq!(policy.cap(false), 3);
        assert_eq!(policy.cap(true), 2);
    }

    #[test]
    fn config_defaults_without_files() {
        let config = BookingConfig::default();
        assert_eq!(config.policy.family_cap, 3);
        assert_eq!(config.gateway.submit_delay_ms, 800);
    }

    #[test]
    fn env_override_beats_shipped_default() {
        env::set_var("SHUTTLE__POLICY__FAMILY_CAP", "5");
        let loaded = BookingConfig::load();
        env::remove_var("SHUTTLE__POLICY__FAMILY_CAP");

        let config = loaded.unwrap();
        assert_eq!(config.policy.family_cap, 5);
        // Untouched fields keep their serde defaults
        assert_eq!(config.policy.family_cap_with_employee, 2);
        assert_eq!(config.gateway.submit_delay_ms, 800);
    }
}
