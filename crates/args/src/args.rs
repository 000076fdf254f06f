use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ArgsError;
use crate::props::Properties;

/// Parsed `name=value` task arguments.
///
/// The name is everything before the first `=`, the value everything after
/// it. An argument without `=` is specified but has no value; `name=` has an
/// empty value. A repeated name keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArgs {
    args: BTreeMap<String, Option<String>>,
}

impl TaskArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().collect()
    }

    /// Parsed argument names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// The value of `name`, or `None` if it was not given or has no value.
    pub fn string_value(&self, name: &str) -> Option<&str> {
        self.args.get(name).and_then(Option::as_deref)
    }

    /// The value of `name` as an `i64`, or `default` if it has no value.
    pub fn long_value(&self, name: &str, default: i64) -> Result<i64, ArgsError> {
        self.number_value(name, default)
    }

    /// The value of `name` as an `i32`, or `default` if it has no value.
    pub fn int_value(&self, name: &str, default: i32) -> Result<i32, ArgsError> {
        self.number_value(name, default)
    }

    /// The value of `name` as a `usize`, or `default` if it has no value.
    pub fn usize_value(&self, name: &str, default: usize) -> Result<usize, ArgsError> {
        self.number_value(name, default)
    }

    fn number_value<N>(&self, name: &str, default: N) -> Result<N, ArgsError>
    where
        N: FromStr<Err = std::num::ParseIntError>,
    {
        match self.string_value(name) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|source| ArgsError::InvalidNumber {
                name: name.to_owned(),
                value: value.to_owned(),
                source,
            }),
        }
    }

    /// Whether `name` was given, with or without a value.
    pub fn is_specified(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// The value of `name`; fails if it is missing, has no value or is empty.
    pub fn required_string_value(&self, name: &str) -> Result<&str, ArgsError> {
        match self.string_value(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ArgsError::ArgumentRequired(name.to_owned())),
        }
    }

    /// The value of `name` as a path, or `None` if missing or empty.
    pub fn file_value(&self, name: &str) -> Option<PathBuf> {
        self.string_value(name)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Load the properties file named by `name`. Returns empty properties
    /// when the argument is missing or empty.
    pub fn props_value(&self, name: &str) -> Result<Properties, ArgsError> {
        match self.file_value(name) {
            Some(path) => Ok(Properties::load(&path)?),
            None => Ok(Properties::new()),
        }
    }

    /// Check every given argument against `expected`.
    ///
    /// An unexpected argument that would be expected with one more leading
    /// `-` (e.g. `-file` for `--file`) carries that name as a suggestion.
    pub fn validate_expected_args<S: AsRef<str>>(&self, expected: &[S]) -> Result<&Self, ArgsError> {
        let is_expected = |name: &str| expected.iter().any(|e| e.as_ref() == name);

        for name in self.args.keys() {
            if is_expected(name.as_str()) {
                continue;
            }
            let dashed = format!("-{name}");
            let suggestion = is_expected(dashed.as_str()).then_some(dashed);
            return Err(ArgsError::Unrecognized {
                arg: name.clone(),
                suggestion,
            });
        }
        Ok(self)
    }

    /// The value of `name` if it is one of `permitted`, `default` if the
    /// value is missing or empty, otherwise an error.
    pub fn verify_string_value<S: AsRef<str>>(
        &self,
        name: &str,
        permitted: &[S],
        default: &str,
    ) -> Result<String, ArgsError> {
        match self.string_value(name) {
            None | Some("") => Ok(default.to_owned()),
            Some(value) if permitted.iter().any(|p| p.as_ref() == value) => Ok(value.to_owned()),
            Some(value) => Err(ArgsError::InvalidValue {
                name: name.to_owned(),
                value: value.to_owned(),
                permitted: permitted.iter().map(|p| p.as_ref().to_owned()).collect(),
            }),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TaskArgs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let args = iter
            .into_iter()
            .map(|arg| match arg.as_ref().split_once('=') {
                Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
                None => (arg.as_ref().to_owned(), None),
            })
            .collect();
        Self { args }
    }
}
