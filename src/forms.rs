/*
 * Responsibility
 * - Hold submitted form values (field -> values) and field-scoped errors
 * - Chainable validation rules; a failing rule never stops the next one
 * - No I/O
 */
use std::sync::LazyLock;

use regex::Regex;

pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Field-scoped validation messages.
///
/// Fields keep the order in which their first error was added, and each
/// field keeps its messages in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, Vec<String>)>,
}

impl Errors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }

    /// First message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.all(field).first().map(String::as_str)
    }

    pub fn all(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    values: Vec<(String, Vec<String>)>,
    pub errors: Errors,
}

impl Form {
    pub fn new<I, K, V>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (field, value) in data {
            form.add_value(field.into(), value.into());
        }
        form
    }

    /// A form with no submitted values, used to render blank pages.
    pub fn empty() -> Self {
        Self::default()
    }

    fn add_value(&mut self, field: String, value: String) {
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, values)) => values.push(value),
            None => self.values.push((field, vec![value])),
        }
    }

    /// First submitted value for `field`, or "" when the field is absent.
    pub fn get(&self, field: &str) -> &str {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.retain(|(name, _)| name != field);
        self.values.push((field.to_string(), vec![value.into()]));
    }

    pub fn required(&mut self, fields: &[&str]) -> &mut Self {
        for field in fields {
            if self.get(field).trim().is_empty() {
                self.errors.add(field, "This field cannot be blank");
            }
        }
        self
    }

    pub fn max_length(&mut self, field: &str, max: usize) -> &mut Self {
        let value = self.get(field);
        if !value.is_empty() && value.chars().count() > max {
            self.errors.add(
                field,
                format!("This field is too long (maximum is {max} characters)"),
            );
        }
        self
    }

    pub fn min_length(&mut self, field: &str, min: usize) -> &mut Self {
        let value = self.get(field);
        if !value.is_empty() && value.chars().count() < min {
            self.errors.add(
                field,
                format!("This field is too short (minimum is {min} characters)"),
            );
        }
        self
    }

    pub fn matches_pattern(&mut self, field: &str, pattern: &Regex) -> &mut Self {
        let value = self.get(field);
        if !value.is_empty() && !pattern.is_match(value) {
            self.errors.add(field, "This field is invalid");
        }
        self
    }

    pub fn permitted_values(&mut self, field: &str, options: &[&str]) -> &mut Self {
        let value = self.get(field);
        if !value.is_empty() && !options.contains(&value) {
            self.errors.add(field, "This field is not valid");
        }
        self
    }

    /// Runs an ad hoc rule. The rule reports violations through [`Form::fail`].
    pub fn custom<F>(&mut self, field: &str, rule: F) -> &mut Self
    where
        F: FnOnce(&str, &str, &mut Form),
    {
        let value = self.get(field).to_string();
        rule(field, &value, self);
        self
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(pairs: &[(&str, &str)]) -> Form {
        Form::new(pairs.iter().copied())
    }

    #[test]
    fn required_treats_whitespace_as_blank() {
        let mut blank = form(&[("title", "")]);
        let mut spaces = form(&[("title", " \t\n ")]);
        blank.required(&["title"]);
        spaces.required(&["title"]);

        assert_eq!(blank.errors, spaces.errors);
        assert_eq!(spaces.errors.get("title"), Some("This field cannot be blank"));
    }

    #[test]
    fn required_flags_missing_fields_in_call_order() {
        let mut f = form(&[("name", "bob")]);
        f.required(&["name", "email", "password"]);

        assert!(!f.valid());
        assert_eq!(f.errors.fields().collect::<Vec<_>>(), ["email", "password"]);
    }

    #[test]
    fn length_rules_count_chars_not_bytes() {
        let mut f = form(&[("title", "ééééé")]);
        f.max_length("title", 5).min_length("title", 5);
        assert!(f.valid());

        f.max_length("title", 4);
        assert_eq!(
            f.errors.get("title"),
            Some("This field is too long (maximum is 4 characters)")
        );
    }

    #[test]
    fn optional_rules_skip_empty_values() {
        let mut f = form(&[("email", ""), ("expires", "")]);
        f.max_length("email", 1)
            .min_length("email", 10)
            .matches_pattern("email", &EMAIL_RX)
            .permitted_values("expires", &["1", "7", "365"]);

        assert!(f.valid());
    }

    #[test]
    fn rules_do_not_short_circuit() {
        let mut f = form(&[("password", "short")]);
        f.min_length("password", 10)
            .custom("password", |field, value, form| {
                if value == "short" {
                    form.fail(field, "This value is not allowed");
                }
            });

        assert_eq!(
            f.errors.all("password"),
            [
                "This field is too short (minimum is 10 characters)".to_string(),
                "This value is not allowed".to_string(),
            ]
        );
    }

    #[test]
    fn permitted_values_and_pattern() {
        let mut f = form(&[("expires", "30"), ("email", "not-an-email")]);
        f.permitted_values("expires", &["1", "7", "365"])
            .matches_pattern("email", &EMAIL_RX);

        assert_eq!(f.errors.get("expires"), Some("This field is not valid"));
        assert_eq!(f.errors.get("email"), Some("This field is invalid"));

        let mut ok = form(&[("expires", "7"), ("email", "bob@example.com")]);
        ok.permitted_values("expires", &["1", "7", "365"])
            .matches_pattern("email", &EMAIL_RX);
        assert!(ok.valid());
    }

    #[test]
    fn get_returns_first_value_and_set_replaces() {
        let mut f = form(&[("tag", "a"), ("tag", "b")]);
        assert_eq!(f.get("tag"), "a");
        assert_eq!(f.get("missing"), "");

        f.set("tag", "c");
        assert_eq!(f.get("tag"), "c");
    }

    proptest! {
        #[test]
        fn max_length_accepts_values_within_limit(value in "\\PC{1,40}", extra in 0usize..10) {
            let max = value.chars().count() + extra;
            let mut f = Form::new([("field", value.clone())]);
            f.max_length("field", max);
            prop_assert!(f.valid());
        }

        #[test]
        fn max_length_adds_exactly_one_error_when_too_long(value in "\\PC{2,40}") {
            let max = value.chars().count() - 1;
            let mut f = Form::new([("field", value.clone())]);
            f.max_length("field", max);
            prop_assert_eq!(f.errors.all("field").len(), 1);
            prop_assert_eq!(f.errors.len(), 1);
        }

        #[test]
        fn valid_iff_no_rule_failed(title in "\\PC{0,12}", expires in "[0-9]{0,3}") {
            let mut f = Form::new([("title", title.clone()), ("expires", expires.clone())]);
            f.required(&["title", "expires"])
                .max_length("title", 8)
                .permitted_values("expires", &["1", "7", "365"]);

            let title_len = title.chars().count();
            let expected_failures = title.trim().is_empty()
                || expires.is_empty()
                || title_len > 8
                || !["1", "7", "365"].contains(&expires.as_str());
            prop_assert_eq!(f.valid(), !expected_failures);
        }
    }
}
