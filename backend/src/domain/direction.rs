//! Directions (curricula) versioned by catalog year.

use std::fmt;

/// Database identifier of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectionId(i32);

impl DirectionId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A curriculum line. The same `code` recurs across catalog years; the
/// `(code, year)` pair is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub id: DirectionId,
    pub code: String,
    pub name: String,
    pub year: Option<i32>,
}

impl Direction {
    /// Label shown in selection lists, e.g. `09.03.01 Informatics (2023)`.
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} {} ({year})", self.code, self.name),
            None => format!("{} {}", self.code, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_includes_catalog_year_when_known() {
        let mut direction = Direction {
            id: DirectionId::new(3),
            code: "09.03.01".to_owned(),
            name: "Informatics".to_owned(),
            year: Some(2023),
        };
        assert_eq!(direction.label(), "09.03.01 Informatics (2023)");
        direction.year = None;
        assert_eq!(direction.label(), "09.03.01 Informatics");
    }
}
