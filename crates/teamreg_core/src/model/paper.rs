//! Publication model.

use crate::model::person::Person;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// One published paper owned by a research team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub author: Person,
    /// Publication timestamp, used for "latest" and "recent" queries.
    pub published_at: DateTime<Utc>,
}

impl Paper {
    pub fn new(title: impl Into<String>, author: Person, published_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author,
            published_at,
        }
    }

    /// Orders papers by title, ignoring ASCII case.
    pub fn cmp_title_ci(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.title, &other.title)
    }

    /// Orders papers by author last name, ignoring ASCII case.
    pub fn cmp_author_ci(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.author.last_name, &other.author.last_name)
    }
}

impl PartialOrd for Paper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Natural order is publication time; title and author break ties so that
// `Ord` stays consistent with `Eq`.
impl Ord for Paper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.published_at
            .cmp(&other.published_at)
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.author.name.cmp(&other.author.name))
    }
}

impl Display for Paper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Title: {}, Author: {} {}, Publication Date: {}",
            self.title,
            self.author.name,
            self.author.last_name,
            self.published_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

fn cmp_ignore_case(left: &str, right: &str) -> Ordering {
    left.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(right.bytes().map(|b| b.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::Paper;
    use crate::model::person::Person;
    use chrono::{TimeZone, Utc};
    use std::cmp::Ordering;

    fn paper(title: &str, last_name: &str, year: i32) -> Paper {
        Paper::new(
            title,
            Person::new("Author", last_name),
            Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn natural_order_follows_publication_time() {
        let older = paper("b", "x", 2019);
        let newer = paper("a", "x", 2021);
        assert_eq!(older.cmp(&newer), Ordering::Less);
    }

    #[test]
    fn title_and_author_comparators_ignore_case() {
        assert_eq!(
            paper("alpha", "x", 2020).cmp_title_ci(&paper("ALPHA", "x", 2021)),
            Ordering::Equal
        );
        assert_eq!(
            paper("t", "smith", 2020).cmp_author_ci(&paper("t", "Jones", 2020)),
            Ordering::Greater
        );
    }
}
