use crate::config::PhoneConfig;

/// Keeps the phone input in the `+998 XX XXX XX XX` shape while typing.
///
/// Purely cosmetic: the caret position is not preserved and whatever the
/// user types is reduced to digits.
#[derive(Clone, Debug)]
pub struct PhoneMask {
    config: PhoneConfig,
}

impl PhoneMask {
    pub fn new(config: PhoneConfig) -> Self {
        Self { config }
    }

    /// Value to pre-fill on focus, only when the field is empty.
    pub fn on_focus(&self, current: &str) -> Option<String> {
        current.is_empty().then(|| self.config.prefix.clone())
    }

    /// Value the field should hold after the user changed it to `raw`.
    pub fn on_input(&self, raw: &str) -> String {
        if raw.chars().count() < self.config.prefix.chars().count() {
            // Tried to delete into the prefix.
            return self.config.prefix.clone();
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let number = digits
            .strip_prefix(self.config.calling_code.as_str())
            .unwrap_or(&digits);

        let mut groups = Vec::with_capacity(self.config.groups.len());
        let mut rest = &number[..number.len().min(self.config.max_digits())];
        for &size in &self.config.groups {
            if rest.is_empty() {
                break;
            }
            let (group, tail) = rest.split_at(size.min(rest.len()));
            groups.push(group);
            rest = tail;
        }

        format!("{}{}", self.config.prefix, groups.join(" "))
    }

    pub fn is_complete(&self, value: &str) -> bool {
        value.chars().count() >= self.config.min_formatted_len
    }
}
