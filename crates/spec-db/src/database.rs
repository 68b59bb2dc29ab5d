//! Database engines

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Engine of a managed relational database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Mysql,
    Postgres,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::Mysql, Database::Postgres];

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Mysql => "mysql",
            Database::Postgres => "postgres",
        }
    }
}

impl FromStr for Database {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Database::Mysql),
            "postgres" | "postgresql" => Ok(Database::Postgres),
            _ => Err(Error::InvalidDatabase {
                database: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mysql", Database::Mysql)]
    #[case("MySQL", Database::Mysql)]
    #[case("postgres", Database::Postgres)]
    #[case("postgresql", Database::Postgres)]
    fn test_parse(#[case] input: &str, #[case] expected: Database) {
        assert_eq!(input.parse::<Database>().unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid() {
        let error = "oracle".parse::<Database>().unwrap_err();
        assert!(matches!(error, Error::InvalidDatabase { database } if database == "oracle"));
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        for database in Database::ALL {
            let json = serde_json::to_value(database).unwrap();
            assert_eq!(json, serde_json::Value::String(database.to_string()));
        }
    }
}
