//! crates/institute_core/src/catalog.rs
//!
//! The institute's course catalogue. It is configuration data: loaded once at startup,
//! served read-only to the site, and rendered into the course advisor's system prompt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
    pub name: String,
    pub city: String,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub fees: String,
    pub description: String,
    /// Who the course suits, in one line.
    pub best_for: String,
    pub highlights: Vec<String>,
    pub syllabus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub institute: Institute,
    pub courses: Vec<Course>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Fills the `{institute}`, `{courses}` and `{features}` placeholders of a prompt template.
    pub fn render_system_prompt(&self, template: &str) -> String {
        let institute = format!(
            "{}, a leading computer training institute in {} with {}+ years of experience",
            self.institute.name, self.institute.city, self.institute.years_of_experience
        );

        let courses = self
            .courses
            .iter()
            .enumerate()
            .map(|(idx, course)| {
                format!(
                    "{}. {} - {}, {}\n   - {}\n   - Best for: {}",
                    idx + 1,
                    course.name,
                    course.duration,
                    course.fees,
                    course.highlights.join(", "),
                    course.best_for
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let features = self
            .features
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n");

        template
            .replace("{institute}", &institute)
            .replace("{courses}", &courses)
            .replace("{features}", &features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../config/catalog.json");

    #[test]
    fn shipped_catalog_parses() {
        let catalog = Catalog::from_json(SHIPPED).unwrap();
        let ids: Vec<&str> = catalog.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["adca", "dca", "tally", "kushal-yuva", "deep-mkcl"]);
        assert!(catalog.courses.iter().all(|c| !c.syllabus.is_empty()));
    }

    #[test]
    fn prompt_mentions_every_course_and_feature() {
        let catalog = Catalog::from_json(SHIPPED).unwrap();
        let prompt = catalog.render_system_prompt(
            "You advise for {institute}.\n\nAvailable Courses:\n{courses}\n\nFeatures:\n{features}",
        );
        for course in &catalog.courses {
            assert!(prompt.contains(&course.name), "missing {}", course.name);
        }
        for feature in &catalog.features {
            assert!(prompt.contains(feature.as_str()));
        }
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn features_are_optional() {
        let catalog = Catalog::from_json(
            r#"{"institute":{"name":"X","city":"Y","yearsOfExperience":1},"courses":[]}"#,
        )
        .unwrap();
        assert!(catalog.features.is_empty());
        assert_eq!(catalog.render_system_prompt("{features}"), "");
    }
}
