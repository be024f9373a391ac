//! Agent draft (cart) and community agent types.
//!
//! An `AgentDraft` is the user's in-progress selection of skills plus a
//! chosen agent name, accumulated before a deployment run. A
//! `CommunityAgent` is the validated, shareable record of a deployed
//! configuration pushed to the community registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CartError;
use crate::skill::Skill;

/// The user's in-progress agent assembly: a name and a list of skills.
///
/// The draft is mutable up to the moment a deployment run starts; the run
/// captures a frozen snapshot and later cart edits do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDraft {
    /// User-chosen agent name. Display is uppercased; the installer
    /// filename is derived from the lowercased, hyphenated form.
    pub agent_name: String,
    /// Selected skills, in cart order.
    pub skills: Vec<Skill>,
    /// Last time the draft was touched.
    pub updated_at: DateTime<Utc>,
}

impl AgentDraft {
    /// Create an empty draft with the given agent name.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            skills: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Add a skill to the end of the cart.
    ///
    /// Skill names are unique within a cart; adding a duplicate name fails.
    pub fn add_skill(&mut self, skill: Skill) -> Result<(), CartError> {
        if self.skills.iter().any(|s| s.name == skill.name) {
            return Err(CartError::DuplicateSkill(skill.name));
        }
        self.skills.push(skill);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a skill by name. Preserves the order of the remaining skills.
    pub fn remove_skill(&mut self, name: &str) -> Result<(), CartError> {
        let before = self.skills.len();
        self.skills.retain(|s| s.name != name);
        if self.skills.len() == before {
            return Err(CartError::SkillNotFound(name.to_string()));
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Drop all skills, keeping the agent name.
    pub fn clear_skills(&mut self) {
        self.skills.clear();
        self.updated_at = Utc::now();
    }

    /// Whether there is nothing to deploy.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// A shared agent configuration in the community registry.
///
/// Unlike the local draft, this is an explicit schema: records are
/// validated before submission rather than accepted shapeless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityAgent {
    /// Registry-assigned ID; absent on records we are about to insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub agent_name: String,
    /// Who shared the configuration.
    pub author: String,
    pub skills: Vec<Skill>,
    /// Registry-assigned creation timestamp; absent before insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommunityAgent {
    /// Build a shareable record from a draft.
    ///
    /// Fails if the draft has no agent name or no skills -- an empty
    /// configuration is not worth sharing and the registry would accept
    /// it silently otherwise.
    pub fn from_draft(draft: &AgentDraft, author: impl Into<String>) -> Result<Self, CartError> {
        if draft.agent_name.trim().is_empty() {
            return Err(CartError::MissingAgentName);
        }
        if draft.skills.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(Self {
            id: None,
            agent_name: draft.agent_name.trim().to_string(),
            author: author.into(),
            skills: draft.skills.clone(),
            created_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(skills: &[(&str, &str)]) -> AgentDraft {
        let mut draft = AgentDraft::new("Sentinel");
        for (name, cmd) in skills {
            draft.add_skill(Skill::new(*name, *cmd)).unwrap();
        }
        draft
    }

    #[test]
    fn test_add_skill_preserves_order() {
        let draft = draft_with(&[("Alpha", "pip install alpha"), ("Beta", "npm i beta")]);
        assert_eq!(draft.skills[0].name, "Alpha");
        assert_eq!(draft.skills[1].name, "Beta");
    }

    #[test]
    fn test_add_duplicate_skill_rejected() {
        let mut draft = draft_with(&[("Alpha", "pip install alpha")]);
        let err = draft.add_skill(Skill::new("Alpha", "other")).unwrap_err();
        assert!(matches!(err, CartError::DuplicateSkill(name) if name == "Alpha"));
        assert_eq!(draft.skills.len(), 1);
    }

    #[test]
    fn test_remove_skill() {
        let mut draft = draft_with(&[("Alpha", "a"), ("Beta", "b"), ("Gamma", "c")]);
        draft.remove_skill("Beta").unwrap();
        let names: Vec<&str> = draft.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_remove_missing_skill_fails() {
        let mut draft = draft_with(&[("Alpha", "a")]);
        let err = draft.remove_skill("Omega").unwrap_err();
        assert!(matches!(err, CartError::SkillNotFound(name) if name == "Omega"));
    }

    #[test]
    fn test_clear_skills_keeps_name() {
        let mut draft = draft_with(&[("Alpha", "a"), ("Beta", "b")]);
        draft.clear_skills();
        assert!(draft.is_empty());
        assert_eq!(draft.agent_name, "Sentinel");
    }

    #[test]
    fn test_community_agent_from_draft() {
        let draft = draft_with(&[("Alpha", "pip install alpha")]);
        let agent = CommunityAgent::from_draft(&draft, "m0nk").unwrap();
        assert_eq!(agent.agent_name, "Sentinel");
        assert_eq!(agent.author, "m0nk");
        assert_eq!(agent.skills.len(), 1);
        assert!(agent.id.is_none());
        assert!(agent.created_at.is_none());
    }

    #[test]
    fn test_community_agent_requires_skills() {
        let draft = AgentDraft::new("Sentinel");
        let err = CommunityAgent::from_draft(&draft, "m0nk").unwrap_err();
        assert!(matches!(err, CartError::EmptyCart));
    }

    #[test]
    fn test_community_agent_requires_name() {
        let draft = draft_with(&[("Alpha", "a")]);
        let mut unnamed = draft.clone();
        unnamed.agent_name = "   ".to_string();
        let err = CommunityAgent::from_draft(&unnamed, "m0nk").unwrap_err();
        assert!(matches!(err, CartError::MissingAgentName));
    }

    #[test]
    fn test_community_agent_insert_serialization_omits_registry_fields() {
        let draft = draft_with(&[("Alpha", "a")]);
        let agent = CommunityAgent::from_draft(&draft, "m0nk").unwrap();
        let json = serde_json::to_value(&agent).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }
}
