//! Writable field sets of each collection.
//!
//! Values are kept as untyped JSON: the API stores what it is given for the
//! named fields, drops anything else, and omits fields the caller left out.

use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CollectionKind;

type Field = Option<Value>;

/// A typed field set bound to the collection it is written to.
pub trait Entity: Serialize {
    const KIND: CollectionKind;
    /// Singular name used in error payloads ("Project not found").
    const LABEL: &'static str;

    fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Project document fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Field,
    #[serde(rename = "gitHub_link", default, skip_serializing_if = "Option::is_none")]
    pub github_link: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_showcasing: Field,
    #[serde(
        rename = "gitHub_link_server",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub github_link_server: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec1: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec2: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec3: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec4: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec5: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec6: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec7: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tec8: Field,
    #[serde(rename = "Des1", default, skip_serializing_if = "Option::is_none")]
    pub des1: Field,
    #[serde(rename = "Des2", default, skip_serializing_if = "Option::is_none")]
    pub des2: Field,
    #[serde(rename = "Des3", default, skip_serializing_if = "Option::is_none")]
    pub des3: Field,
    #[serde(rename = "Des4", default, skip_serializing_if = "Option::is_none")]
    pub des4: Field,
}

impl Entity for ProjectFields {
    const KIND: CollectionKind = CollectionKind::Projects;
    const LABEL: &'static str = "Project";
}

/// Skill fields touched by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Field,
}

impl Entity for SkillFields {
    const KIND: CollectionKind = CollectionKind::Skills;
    const LABEL: &'static str = "Skill";
}

/// Blog fields touched by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Field,
}

impl Entity for BlogFields {
    const KIND: CollectionKind = CollectionKind::Blogs;
    const LABEL: &'static str = "Blog";
}
