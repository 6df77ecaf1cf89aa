//! Subject / topic / sub-topic catalogs.
//!
//! Topics depend on the selected subject and sub-topics on the selected
//! topics. Each dependent list carries a generation counter: a fetch is
//! tagged with the generation current when it started, and its result is
//! dropped if the selection changed in the meantime.

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::api::{SubTopic, Subject, TestBackend, Topic};
use crate::error::ApiError;

/// Tag handed out when a dependent fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Default, Clone)]
pub struct Catalogs {
    subjects: Vec<Subject>,
    topics: Vec<Topic>,
    sub_topics: Vec<SubTopic>,
    topic_generation: u64,
    sub_topic_generation: u64,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn sub_topics(&self) -> &[SubTopic] {
        &self.sub_topics
    }

    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    /// Start a topic fetch. Clears topics and everything below them.
    pub fn begin_topics(&mut self) -> Generation {
        self.topic_generation += 1;
        self.topics.clear();
        self.begin_sub_topics();
        Generation(self.topic_generation)
    }

    /// Returns `false` when `generation` is stale and the list was dropped.
    pub fn finish_topics(&mut self, generation: Generation, topics: Vec<Topic>) -> bool {
        if generation.0 != self.topic_generation {
            warn!(
                stale = generation.0,
                current = self.topic_generation,
                "Dropping stale topic list"
            );
            return false;
        }
        self.topics = topics;
        true
    }

    pub fn begin_sub_topics(&mut self) -> Generation {
        self.sub_topic_generation += 1;
        self.sub_topics.clear();
        Generation(self.sub_topic_generation)
    }

    pub fn finish_sub_topics(&mut self, generation: Generation, sub_topics: Vec<SubTopic>) -> bool {
        if generation.0 != self.sub_topic_generation {
            warn!(
                stale = generation.0,
                current = self.sub_topic_generation,
                "Dropping stale sub-topic list"
            );
            return false;
        }
        self.sub_topics = sub_topics;
        true
    }

    pub async fn load_subjects<B: TestBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<(), ApiError> {
        let subjects = backend.subjects().await?;
        debug!(count = subjects.len(), "Loaded subjects");
        self.subjects = subjects;
        Ok(())
    }

    /// Fetch the topics of `subject_id`.
    pub async fn select_subject<B: TestBackend + ?Sized>(
        &mut self,
        backend: &B,
        subject_id: &str,
    ) -> Result<(), ApiError> {
        let generation = self.begin_topics();
        let topics = backend.topics_by_subject(subject_id).await?;
        debug!(subject_id, count = topics.len(), "Loaded topics");
        self.finish_topics(generation, topics);
        Ok(())
    }

    /// Fetch sub-topics for every selected topic and concatenate them in
    /// selection order.
    pub async fn select_topics<B: TestBackend + ?Sized>(
        &mut self,
        backend: &B,
        topic_ids: &[String],
    ) -> Result<(), ApiError> {
        let generation = self.begin_sub_topics();
        if topic_ids.is_empty() {
            return Ok(());
        }
        let lists = try_join_all(topic_ids.iter().map(|id| backend.sub_topics_by_topic(id))).await?;
        let merged: Vec<SubTopic> = lists.into_iter().flatten().collect();
        debug!(topics = topic_ids.len(), count = merged.len(), "Loaded sub-topics");
        self.finish_sub_topics(generation, merged);
        Ok(())
    }

    pub fn subject_id_for(&self, value: &str) -> Option<&str> {
        self.subjects
            .iter()
            .find(|s| s.id == value || s.name == value)
            .map(|s| s.id.as_str())
    }

    pub fn topic_id_for(&self, value: &str) -> Option<&str> {
        self.topics
            .iter()
            .find(|t| t.id == value || t.name == value)
            .map(|t| t.id.as_str())
    }

    pub fn sub_topic_id_for(&self, value: &str) -> Option<&str> {
        self.sub_topics
            .iter()
            .find(|t| t.id == value || t.name == value)
            .map(|t| t.id.as_str())
    }

    pub fn subject_name(&self, id: &str) -> Option<&str> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }
}
