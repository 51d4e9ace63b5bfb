use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

/// Key marking the field that declares the table name: `table=<name>`.
pub const TAG_TABLE: &str = "table";
/// Flag marking the primary key field: `pkey`.
pub const TAG_PRIMARY_KEY: &str = "pkey";
/// Column name override: `column=<name>`.
pub const TAG_COLUMN: &str = "column";
/// Flag excluding the field from result materialization: `ignore`.
pub const TAG_IGNORE: &str = "ignore";
/// Name of a user registered codec: `codec=<name>`.
pub const TAG_CODEC: &str = "codec";

/// Parsed field annotation: a mapping from key to (possibly empty) value.
///
/// The raw annotation is a comma separated list of `key[=value]` tokens:
/// - each token is split on the **first** `=` only, `column=a=b` maps
///   `column` to `a=b`;
/// - a token without `=` is a flag, its value is the empty string;
/// - tokens are trimmed and empty tokens are skipped;
/// - when a key repeats, the last occurrence wins.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct StructTag(BTreeMap<String, String>);

impl StructTag {
    pub fn parse(raw: &str) -> Self {
        let mut result = BTreeMap::new();
        for token in raw.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            result.insert(key.trim().to_string(), value.trim().to_string());
        }
        Self(result)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn table(&self) -> Option<&str> {
        self.get(TAG_TABLE)
    }

    pub fn column(&self) -> Option<&str> {
        self.get(TAG_COLUMN).filter(|v| !v.is_empty())
    }

    pub fn codec(&self) -> Option<&str> {
        self.get(TAG_CODEC).filter(|v| !v.is_empty())
    }

    pub fn is_primary_key(&self) -> bool {
        self.contains(TAG_PRIMARY_KEY)
    }

    /// True for fields that do not receive a column during materialization.
    pub fn is_ignored(&self) -> bool {
        self.contains(TAG_IGNORE) || self.contains(TAG_TABLE)
    }
}

impl Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(k)?;
            if !v.is_empty() {
                write!(f, "={}", v)?;
            }
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StructTag {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
