//! Topics a new subscriber can listen to.
use super::candidate::{Candidate, CandidateSet, Qualify};
use super::error::{ResourceKind, SelectResult, StageContext};
use super::reconcile::{index_by, intersect};
use super::resolver::{SelectRequest, Selector};
use crate::model::Topic;
use crate::prompt::PromptConfig;
use crate::store::{DeployStore, Store};

pub struct TopicSelector<'a> {
    base: &'a Selector<'a>,
    store: &'a dyn Store,
    deploy: &'a dyn DeployStore,
}

impl<'a> TopicSelector<'a> {
    pub fn new(base: &'a Selector<'a>, store: &'a dyn Store, deploy: &'a dyn DeployStore) -> Self {
        Self { base, store, deploy }
    }

    /// Choose any number of topics that exist in every environment of `app`.
    ///
    /// Topics are matched across environments by workload and topic name; the
    /// returned records are those of the first environment listed. An
    /// application without shared topics yields an empty selection.
    pub fn topics(&self, message: &str, help: &str, app: &str) -> SelectResult<Vec<Topic>> {
        let envs = self
            .store
            .list_environments(app)
            .stage(|| "list environments")?;
        let Some((first, rest)) = envs.split_first() else {
            tracing::info!(app, "no environments, so no topics to subscribe to");
            return Ok(Vec::new());
        };

        let first_topics = self.env_topics(app, &first.name)?;
        let mut shared = index_by(&first_topics, Topic::id);
        for env in rest {
            let others = index_by(&self.env_topics(app, &env.name)?, Topic::id);
            let current: Vec<Topic> = shared.into_values().collect();
            shared = intersect(&others, &current, Topic::id);
        }
        let topics: Vec<Topic> = first_topics
            .into_iter()
            .filter(|topic| shared.contains_key(&topic.id()))
            .collect();
        if topics.is_empty() {
            tracing::info!(app, "no topics are published in every environment");
            return Ok(Vec::new());
        }

        let candidates: CandidateSet<Topic> = topics
            .into_iter()
            .map(|topic| Candidate::qualified(topic.name.clone(), topic.workload.clone(), topic))
            .collect();
        let req = SelectRequest::new(ResourceKind::Topic, format!("application {app}"), message)
            .help(help)
            .qualify(Qualify::Always)
            .config(PromptConfig::with_final_message("Topics:"));
        let (picked, _) = self.base.select_many(&req, candidates, &[])?;
        Ok(picked.into_iter().map(|candidate| candidate.value).collect())
    }

    fn env_topics(&self, app: &str, env: &str) -> SelectResult<Vec<Topic>> {
        let topics = self
            .deploy
            .list_topics(app, env)
            .stage(|| format!("list topics in environment {env}"))?;
        tracing::debug!(app, env, count = topics.len(), "listed topics");
        Ok(topics)
    }
}

#[cfg(test)]
#[path = "topic_tests.rs"]
mod tests;
