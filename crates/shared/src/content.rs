//! Static site content: profile copy, the services step list and the work
//! catalog. Everything here is read-only input to rendering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{StepId, WorkItemId},
    error::CatalogError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub approach: String,
    pub email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub number: StepId,
    pub title: String,
    pub description: String,
}

/// Case-study block carried only by the richer catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemDetail {
    pub platform: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub team: String,
    pub timeline: String,
    pub context: String,
    pub gap: String,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub solution: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<WorkItemDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub profile: Profile,
    pub steps: Vec<ProcessStep>,
    pub work: Vec<WorkItem>,
}

impl Catalog {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_steps = HashSet::new();
        for step in &self.steps {
            if !seen_steps.insert(&step.number) {
                return Err(CatalogError::DuplicateStep(step.number.clone()));
            }
        }

        let mut seen_work = HashSet::new();
        for item in &self.work {
            if !seen_work.insert(&item.id) {
                return Err(CatalogError::DuplicateWorkItem(item.id.clone()));
            }
            if item.title.trim().is_empty() {
                return Err(CatalogError::UntitledWorkItem(item.id.clone()));
            }
        }
        Ok(())
    }

    pub fn work_item(&self, id: &WorkItemId) -> Option<&WorkItem> {
        self.work.iter().find(|item| &item.id == id)
    }

    pub fn step(&self, id: &StepId) -> Option<&ProcessStep> {
        self.steps.iter().find(|step| &step.number == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            steps: default_steps(),
            work: default_work(),
        }
    }
}

fn default_profile() -> Profile {
    Profile {
        name: "Megan Perpich".into(),
        title: "Marketer".into(),
        bio: "I am a strategic Marketer focused on bridging the gap between innovative technology and human emotion. With over a decade of experience in growth marketing, brand strategy, and digital transformation, I specialize in crafting narratives that resonate and drive measurable impact.".into(),
        approach: "My approach combines data-driven insights with a keen eye for aesthetic excellence, ensuring every campaign not only reaches its audience but leaves a lasting impression. I believe that in an increasingly automated world, the most successful brands are those that remain unapologetically human.".into(),
        email: "hello@meganperpich.com".into(),
        socials: ["LinkedIn", "Twitter", "Instagram"]
            .into_iter()
            .map(|name| SocialLink {
                name: name.into(),
                url: "#".into(),
            })
            .collect(),
    }
}

fn default_steps() -> Vec<ProcessStep> {
    [
        (
            "01",
            "Art Direction",
            "Defining visual languages that capture brand essence through sophisticated color theory, typography, and imagery.",
        ),
        (
            "02",
            "Digital Design",
            "Creating high-fidelity digital interfaces that balance minimalist aesthetics with high-performance user experience.",
        ),
        (
            "03",
            "Webflow Development",
            "Transforming complex designs into pixel-perfect, responsive, and blazing-fast web experiences.",
        ),
        (
            "04",
            "Interaction Design",
            "Bringing static interfaces to life through purposeful motion, meaningful transitions, and human-centric feedback loops.",
        ),
    ]
    .into_iter()
    .map(|(number, title, description)| ProcessStep {
        number: StepId::from(number),
        title: title.into(),
        description: description.into(),
    })
    .collect()
}

fn default_work() -> Vec<WorkItem> {
    [
        (
            "1",
            "Global Brand Launch",
            "Brand Strategy",
            "Reimagining the visual identity for a Silicon Valley fintech startup.",
        ),
        (
            "2",
            "E-commerce Growth",
            "Growth Marketing",
            "Scaling a direct-to-consumer fashion brand by 300% in 12 months.",
        ),
        (
            "3",
            "Content Ecosystem",
            "Content Marketing",
            "Developing a multi-channel content strategy for a lifestyle publication.",
        ),
    ]
    .into_iter()
    .map(|(id, title, category, description)| WorkItem {
        id: WorkItemId::from(id),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        image_ref: None,
        detail: None,
    })
    .collect()
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod tests;
