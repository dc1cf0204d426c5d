use log::Level;

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info  // Production
}

/// Countdown length, restarted in full on every page load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountdownConfig {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownConfig {
    pub fn duration_millis(&self) -> u64 {
        (self.hours * 60 * 60 + self.minutes * 60 + self.seconds) * 1000
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhoneConfig {
    /// Shown in front of every number and never removable, trailing space included.
    pub prefix: String,
    /// Digits of the prefix, dropped when they reappear at the start of the input.
    pub calling_code: String,
    pub groups: Vec<usize>,
    /// Length of a fully populated masked value.
    pub min_formatted_len: usize,
}

impl PhoneConfig {
    pub fn max_digits(&self) -> usize {
        self.groups.iter().sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandingConfig {
    pub telegram_channel: String,
    pub countdown: CountdownConfig,
    pub tick_interval_ms: u32,
    pub phone: PhoneConfig,
    pub min_name_len: usize,
    pub lead_source: String,
    pub storage_key: String,
    pub simulated_latency_ms: u32,
    pub success_open_delay_ms: u32,
    pub animation_selector: String,
    pub animation_threshold: f64,
    pub failure_message: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            telegram_channel: "https://t.me/aisaytuz".to_string(),
            countdown: CountdownConfig {
                hours: 5,
                minutes: 15,
                seconds: 25,
            },
            tick_interval_ms: 1000,
            phone: PhoneConfig {
                prefix: "+998 ".to_string(),
                calling_code: "998".to_string(),
                groups: vec![2, 3, 2, 2],
                min_formatted_len: 17,
            },
            min_name_len: 2,
            lead_source: "instagram_landing".to_string(),
            storage_key: "leads".to_string(),
            simulated_latency_ms: 1000,
            success_open_delay_ms: 300,
            animation_selector: ".fade-in, .fade-in-up".to_string(),
            animation_threshold: 0.1,
            failure_message: "Xatolik yuz berdi. Iltimos qayta urinib ko'ring.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_countdown_duration() {
        let config = LandingConfig::default();
        assert_eq!(config.countdown.duration_millis(), (5 * 3600 + 15 * 60 + 25) * 1000);
    }

    #[test]
    fn test_full_phone_matches_min_length() {
        let phone = LandingConfig::default().phone;
        // prefix + digits + one space between each group
        let full = phone.prefix.len() + phone.max_digits() + phone.groups.len() - 1;
        assert_eq!(full, phone.min_formatted_len);
    }
}
