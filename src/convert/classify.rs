//! Subject and grade-band classification from a course slug.
//!
//! Both classifiers walk an ordered keyword table and return the result of
//! the first row with a keyword contained in the lowercased slug. A slug
//! matching nothing gets the table's default, so classification never fails.

use serde::{Deserialize, Serialize};

/// Subject tag on a converted course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Mathematics,
    Science,
    SocialStudies,
    LanguageArts,
}

impl Subject {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mathematics => "mathematics",
            Self::Science => "science",
            Self::SocialStudies => "social-studies",
            Self::LanguageArts => "language-arts",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade band on a converted course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeBand {
    #[serde(rename = "K-5")]
    Elementary,
    #[serde(rename = "6-8")]
    Middle,
    #[serde(rename = "9-12")]
    High,
}

impl GradeBand {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Elementary => "K-5",
            Self::Middle => "6-8",
            Self::High => "9-12",
        }
    }
}

impl std::fmt::Display for GradeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_SUBJECT: Subject = Subject::Mathematics;
pub const DEFAULT_GRADE_BAND: GradeBand = GradeBand::Middle;

pub const SUBJECT_RULES: &[(&[&str], Subject)] = &[
    (&["algebra", "math"], Subject::Mathematics),
    (&["science", "physics", "chemistry"], Subject::Science),
    (&["history"], Subject::SocialStudies),
    (&["english", "grammar"], Subject::LanguageArts),
];

// "pre-algebra" must precede "algebra2"-style rows.
pub const GRADE_RULES: &[(&[&str], GradeBand)] = &[
    (&["pre-algebra", "middle"], GradeBand::Middle),
    (&["algebra2", "calculus", "high"], GradeBand::High),
    (&["elementary", "arithmetic"], GradeBand::Elementary),
];

fn first_match<T: Copy>(slug: &str, rules: &[(&[&str], T)], default: T) -> T {
    let slug = slug.to_lowercase();
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| slug.contains(kw)))
        .map_or(default, |(_, result)| *result)
}

#[must_use]
pub fn classify_subject(slug: &str) -> Subject {
    first_match(slug, SUBJECT_RULES, DEFAULT_SUBJECT)
}

#[must_use]
pub fn classify_grade(slug: &str) -> GradeBand {
    first_match(slug, GRADE_RULES, DEFAULT_GRADE_BAND)
}
