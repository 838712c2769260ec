// Copyright 2025 Folio Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use chrono::Utc;
use snafu::Snafu;
use tokio::sync::RwLock;
use tracing::info;

use crate::content::{
    NewProject, NewThought, Project, ProjectPatch, Thought, ThoughtPatch, slugify,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    #[snafu(display("{} '{}' not found", kind, key))]
    NotFound { kind: &'static str, key: String },

    #[snafu(display("{} slug '{}' is already in use", kind, slug))]
    SlugTaken { kind: &'static str, slug: String },

    #[snafu(display("invalid {}: {}", kind, message))]
    Invalid { kind: &'static str, message: String },
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Filter for project listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    pub published_only: bool,
    pub featured: Option<bool>,
}

trait Entry: Clone {
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn slug(&self) -> &str;
    fn is_published(&self) -> bool;
}

impl Entry for Thought {
    const KIND: &'static str = "thought";

    fn id(&self) -> u64 {
        self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn is_published(&self) -> bool {
        self.published
    }
}

impl Entry for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn is_published(&self) -> bool {
        self.published
    }
}

/// Entries of one kind keyed by id. Ids are never reused.
struct Collection<T> {
    next_id: u64,
    items: BTreeMap<u64, T>,
}

impl<T: Entry> Collection<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }

    fn ensure_slug_free(&self, slug: &str, owner: Option<u64>) -> Result<()> {
        let taken = self
            .items
            .values()
            .any(|item| item.slug() == slug && Some(item.id()) != owner);
        if taken {
            return SlugTakenSnafu {
                kind: T::KIND,
                slug,
            }
            .fail();
        }
        Ok(())
    }

    fn get(&self, id: u64) -> Result<T> {
        self.items.get(&id).cloned().ok_or_else(|| not_found::<T>(id))
    }

    fn by_slug(&self, slug: &str, published_only: bool) -> Result<T> {
        self.items
            .values()
            .find(|item| item.slug() == slug && (item.is_published() || !published_only))
            .cloned()
            .ok_or_else(|| not_found::<T>(slug))
    }

    fn insert(&mut self, slug: &str, build: impl FnOnce(u64) -> T) -> Result<T> {
        self.ensure_slug_free(slug, None)?;
        let id = self.next_id;
        self.next_id += 1;
        let item = build(id);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    fn replace(&mut self, item: T) -> Result<T> {
        self.ensure_slug_free(item.slug(), Some(item.id()))?;
        self.items.insert(item.id(), item.clone());
        Ok(item)
    }

    fn remove(&mut self, id: u64) -> Result<T> {
        self.items.remove(&id).ok_or_else(|| not_found::<T>(id))
    }

    /// Newest first.
    fn list(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.items.values().rev().filter(|item| keep(item)).cloned().collect()
    }
}

fn not_found<T: Entry>(key: impl ToString) -> StoreError {
    StoreError::NotFound {
        kind: T::KIND,
        key: key.to_string(),
    }
}

fn required_title(kind: &'static str, title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return InvalidSnafu {
            kind,
            message: "title must not be empty",
        }
        .fail();
    }
    Ok(title.to_string())
}

/// Empty optional text is stored as absent, on create and on update alike.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Explicit slugs are normalized the same way as derived ones.
fn resolve_slug(kind: &'static str, title: &str, explicit: Option<&str>) -> Result<String> {
    let slug = slugify(explicit.unwrap_or(title));
    if slug.is_empty() {
        return InvalidSnafu {
            kind,
            message: "slug must contain at least one letter or digit",
        }
        .fail();
    }
    Ok(slug)
}

/// In-memory content store for thoughts and projects.
pub struct ContentStore {
    thoughts: RwLock<Collection<Thought>>,
    projects: RwLock<Collection<Project>>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            thoughts: RwLock::new(Collection::new()),
            projects: RwLock::new(Collection::new()),
        }
    }

    pub async fn create_thought(&self, new: NewThought) -> Result<Thought> {
        let title = required_title(Thought::KIND, &new.title)?;
        let slug = resolve_slug(Thought::KIND, &title, new.slug.as_deref())?;
        let now = Utc::now();

        let thought = self.thoughts.write().await.insert(&slug, |id| Thought {
            id,
            slug: slug.clone(),
            title,
            content: new.content,
            excerpt: non_empty(new.excerpt),
            tags: new.tags,
            published: new.published,
            created_at: now,
            updated_at: now,
            published_at: new.published.then_some(now),
        })?;

        info!(id = thought.id, slug = %thought.slug, "thought created");
        Ok(thought)
    }

    pub async fn get_thought(&self, id: u64) -> Result<Thought> {
        self.thoughts.read().await.get(id)
    }

    pub async fn thought_by_slug(&self, slug: &str, published_only: bool) -> Result<Thought> {
        self.thoughts.read().await.by_slug(slug, published_only)
    }

    pub async fn list_thoughts(&self, published_only: bool) -> Vec<Thought> {
        self.thoughts
            .read()
            .await
            .list(|t| t.published || !published_only)
    }

    pub async fn update_thought(&self, id: u64, patch: ThoughtPatch) -> Result<Thought> {
        let mut thoughts = self.thoughts.write().await;
        let mut thought = thoughts.get(id)?;
        let now = Utc::now();

        if let Some(title) = patch.title {
            thought.title = required_title(Thought::KIND, &title)?;
        }
        if let Some(slug) = patch.slug {
            thought.slug = resolve_slug(Thought::KIND, &thought.title, Some(&slug))?;
        }
        if let Some(content) = patch.content {
            thought.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            thought.excerpt = non_empty(Some(excerpt));
        }
        if let Some(tags) = patch.tags {
            thought.tags = tags;
        }
        if let Some(published) = patch.published {
            if published && thought.published_at.is_none() {
                thought.published_at = Some(now);
            }
            thought.published = published;
        }
        thought.updated_at = now;

        let thought = thoughts.replace(thought)?;
        info!(id, slug = %thought.slug, "thought updated");
        Ok(thought)
    }

    pub async fn delete_thought(&self, id: u64) -> Result<Thought> {
        let thought = self.thoughts.write().await.remove(id)?;
        info!(id, slug = %thought.slug, "thought deleted");
        Ok(thought)
    }

    pub async fn create_project(&self, new: NewProject) -> Result<Project> {
        let title = required_title(Project::KIND, &new.title)?;
        let slug = resolve_slug(Project::KIND, &title, new.slug.as_deref())?;
        let now = Utc::now();

        let project = self.projects.write().await.insert(&slug, |id| Project {
            id,
            slug: slug.clone(),
            title,
            description: new.description,
            content: non_empty(new.content),
            tech_stack: new.tech_stack,
            repo_url: non_empty(new.repo_url),
            live_url: non_empty(new.live_url),
            featured: new.featured,
            published: new.published,
            created_at: now,
            updated_at: now,
        })?;

        info!(id = project.id, slug = %project.slug, "project created");
        Ok(project)
    }

    pub async fn get_project(&self, id: u64) -> Result<Project> {
        self.projects.read().await.get(id)
    }

    pub async fn project_by_slug(&self, slug: &str, published_only: bool) -> Result<Project> {
        self.projects.read().await.by_slug(slug, published_only)
    }

    pub async fn list_projects(&self, filter: ProjectFilter) -> Vec<Project> {
        self.projects.read().await.list(|p| {
            (p.published || !filter.published_only)
                && filter.featured.is_none_or(|featured| p.featured == featured)
        })
    }

    pub async fn update_project(&self, id: u64, patch: ProjectPatch) -> Result<Project> {
        let mut projects = self.projects.write().await;
        let mut project = projects.get(id)?;

        if let Some(title) = patch.title {
            project.title = required_title(Project::KIND, &title)?;
        }
        if let Some(slug) = patch.slug {
            project.slug = resolve_slug(Project::KIND, &project.title, Some(&slug))?;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(content) = patch.content {
            project.content = non_empty(Some(content));
        }
        if let Some(tech_stack) = patch.tech_stack {
            project.tech_stack = tech_stack;
        }
        if let Some(repo_url) = patch.repo_url {
            project.repo_url = non_empty(Some(repo_url));
        }
        if let Some(live_url) = patch.live_url {
            project.live_url = non_empty(Some(live_url));
        }
        if let Some(featured) = patch.featured {
            project.featured = featured;
        }
        if let Some(published) = patch.published {
            project.published = published;
        }
        project.updated_at = Utc::now();

        let project = projects.replace(project)?;
        info!(id, slug = %project.slug, "project updated");
        Ok(project)
    }

    pub async fn delete_project(&self, id: u64) -> Result<Project> {
        let project = self.projects.write().await.remove(id)?;
        info!(id, slug = %project.slug, "project deleted");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thought(title: &str, published: bool) -> NewThought {
        NewThought {
            title: title.to_string(),
            content: "body".to_string(),
            published,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_thought_derives_slug_and_publish_time() {
        let store = ContentStore::new();
        let draft = store.create_thought(thought("First Post!", false)).await.unwrap();
        assert_eq!(draft.id, 1);
        assert_eq!(draft.slug, "first-post");
        assert!(draft.published_at.is_none());

        let live = store.create_thought(thought("Second", true)).await.unwrap();
        assert_eq!(live.id, 2);
        assert_eq!(live.published_at, Some(live.created_at));
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let store = ContentStore::new();
        store.create_thought(thought("Same Title", false)).await.unwrap();
        let err = store
            .create_thought(thought("same title", false))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken { .. }));
    }

    #[tokio::test]
    async fn test_empty_title_is_invalid() {
        let store = ContentStore::new();
        let err = store.create_thought(thought("   ", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));

        let err = store.create_thought(thought("???", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
    }

    #[tokio::test]
    async fn test_public_lookups_hide_drafts() {
        let store = ContentStore::new();
        store.create_thought(thought("Draft", false)).await.unwrap();
        store.create_thought(thought("Live", true)).await.unwrap();

        assert_eq!(store.list_thoughts(false).await.len(), 2);
        let public = store.list_thoughts(true).await;
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].slug, "live");

        assert!(store.thought_by_slug("draft", true).await.is_err());
        assert!(store.thought_by_slug("draft", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_thought_keeps_first_publish_time() {
        let store = ContentStore::new();
        let created = store.create_thought(thought("Post", false)).await.unwrap();

        let published = store
            .update_thought(
                created.id,
                ThoughtPatch {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let first_publish = published.published_at;
        assert!(first_publish.is_some());

        let renamed = store
            .update_thought(
                created.id,
                ThoughtPatch {
                    title: Some("Renamed".to_string()),
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.title, "Renamed");
        assert_eq!(renamed.slug, "post");
        assert_eq!(renamed.published_at, first_publish);
    }

    #[tokio::test]
    async fn test_update_slug_conflict() {
        let store = ContentStore::new();
        store.create_thought(thought("Alpha", false)).await.unwrap();
        let beta = store.create_thought(thought("Beta", false)).await.unwrap();

        let err = store
            .update_thought(
                beta.id,
                ThoughtPatch {
                    slug: Some("alpha".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken { .. }));

        // Re-saving its own slug is fine.
        let same = store
            .update_thought(
                beta.id,
                ThoughtPatch {
                    slug: Some("Beta".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.slug, "beta");
    }

    #[tokio::test]
    async fn test_delete_and_missing_ids() {
        let store = ContentStore::new();
        let created = store.create_thought(thought("Gone", true)).await.unwrap();
        store.delete_thought(created.id).await.unwrap();

        assert!(matches!(
            store.get_thought(created.id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_thought(created.id).await,
            Err(StoreError::NotFound { .. })
        ));

        // Ids are not reused after deletion.
        let next = store.create_thought(thought("Next", true)).await.unwrap();
        assert_eq!(next.id, created.id + 1);
    }

    #[tokio::test]
    async fn test_project_filters() {
        let store = ContentStore::new();
        for (title, featured, published) in [
            ("Compiler", true, true),
            ("Blog Engine", false, true),
            ("Secret", true, false),
        ] {
            store
                .create_project(NewProject {
                    title: title.to_string(),
                    featured,
                    published,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let all = store.list_projects(ProjectFilter::default()).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].slug, "secret");

        let public = store
            .list_projects(ProjectFilter {
                published_only: true,
                featured: None,
            })
            .await;
        assert_eq!(public.len(), 2);

        let featured = store
            .list_projects(ProjectFilter {
                published_only: true,
                featured: Some(true),
            })
            .await;
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "compiler");
    }

    #[tokio::test]
    async fn test_create_drops_empty_optional_fields() {
        let store = ContentStore::new();
        let thought = store
            .create_thought(NewThought {
                title: "Quiet".to_string(),
                excerpt: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(thought.excerpt, None);

        let project = store
            .create_project(NewProject {
                title: "Bare".to_string(),
                content: Some(String::new()),
                repo_url: Some(String::new()),
                live_url: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(project.content, None);
        assert_eq!(project.repo_url, None);
        assert_eq!(project.live_url, None);
    }

    #[tokio::test]
    async fn test_delete_project() {
        let store = ContentStore::new();
        let project = store
            .create_project(NewProject {
                title: "Retired".to_string(),
                published: true,
                ..Default::default()
            })
            .await
            .unwrap();

        let removed = store.delete_project(project.id).await.unwrap();
        assert_eq!(removed.slug, "retired");
        assert!(matches!(
            store.get_project(project.id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.project_by_slug("retired", true).await.is_err());
        assert!(store.list_projects(ProjectFilter::default()).await.is_empty());
        assert!(matches!(
            store.delete_project(project.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_project_clears_optional_urls() {
        let store = ContentStore::new();
        let project = store
            .create_project(NewProject {
                title: "Site".to_string(),
                repo_url: Some("https://example.com/repo".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = store
            .update_project(
                project.id,
                ProjectPatch {
                    repo_url: Some(String::new()),
                    live_url: Some("https://example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.repo_url, None);
        assert_eq!(updated.live_url.as_deref(), Some("https://example.com"));
    }
}
