//! Research/Writer Crew
//!
//! Two agents run one after the other. The research agent distils the raw
//! search findings into notes; the writer agent receives exactly those notes
//! (the research call's literal output) and writes the blog post.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{CompletionSettings, Summarizer};
use crate::llm::LLMAdapter;
use crate::pipeline::Query;
use crate::search::SearchResults;
use crate::types::{LLMMessage, LLMRequest, LLMResult};

/// Persona given to an agent as its system instruction
#[derive(Debug, Clone, Copy)]
pub struct AgentRole {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub temperature: f32,
}

impl AgentRole {
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a {}. {}\nYour goal: {}",
            self.role, self.backstory, self.goal
        )
    }
}

pub const RESEARCHER: AgentRole = AgentRole {
    role: "Senior Research Analyst",
    goal: "Uncover the most relevant facts and developments about the topic from the search findings",
    backstory: "You work at a technology think tank and are known for turning scattered sources into clear, accurate research notes.",
    temperature: 0.3,
};

pub const WRITER: AgentRole = AgentRole {
    role: "Tech Content Strategist",
    goal: "Write an engaging, well-structured blog post in markdown based on the research notes",
    backstory: "You are a renowned content writer who makes complex topics approachable without losing accuracy.",
    temperature: 0.7,
};

pub struct ResearchWriterCrew {
    llm: Arc<dyn LLMAdapter>,
    settings: CompletionSettings,
}

impl ResearchWriterCrew {
    pub fn new(llm: Arc<dyn LLMAdapter>, settings: CompletionSettings) -> Self {
        Self { llm, settings }
    }

    fn create_research_prompt(topic: &Query, findings: &SearchResults) -> String {
        format!(
            "Analyze the following web search findings about \"{topic}\".\n\
             Identify the key facts, trends and notable sources. Respond with concise research notes.\n\n\
             FINDINGS:\n{findings}",
            topic = topic,
            findings = findings.as_text()
        )
    }

    fn create_writer_prompt(topic: &Query, research_notes: &str) -> String {
        format!(
            "Using the research notes below, write a blog post about \"{topic}\".\n\
             Use markdown with a title, short sections and a conclusion.\n\n\
             RESEARCH NOTES:\n{notes}",
            topic = topic,
            notes = research_notes
        )
    }

    async fn run_task(&self, agent: &AgentRole, prompt: String) -> LLMResult<String> {
        let request = LLMRequest {
            model: self.settings.model.clone(),
            messages: vec![LLMMessage::user(prompt)],
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(agent.temperature),
            system_instruction: Some(agent.system_instruction()),
        };

        let response = self.llm.create_chat_completion(&request).await?;
        info!(
            agent = agent.role,
            response_len = response.content.len(),
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "Agent task complete"
        );
        Ok(response.content)
    }
}

#[async_trait]
impl Summarizer for ResearchWriterCrew {
    async fn summarize(&self, topic: &Query, findings: &SearchResults) -> LLMResult<String> {
        info!(topic = %topic, snippets = findings.len(), "Running research/writer crew");

        let notes = self
            .run_task(&RESEARCHER, Self::create_research_prompt(topic, findings))
            .await?;

        self.run_task(&WRITER, Self::create_writer_prompt(topic, &notes))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoLLM;
    use crate::types::LLMError;

    fn findings() -> SearchResults {
        SearchResults::new(vec!["Article A".into(), "Article B".into()])
    }

    #[tokio::test]
    async fn test_writer_consumes_research_output() {
        let llm = Arc::new(EchoLLM::new());
        let crew = ResearchWriterCrew::new(llm.clone(), CompletionSettings::default());
        let topic = Query::parse("quantum computing").unwrap();

        let post = crew.summarize(&topic, &findings()).await.unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);

        let research_prompt = &requests[0].messages[0].content;
        assert!(research_prompt.contains("Article A\nArticle B"));
        assert_eq!(
            requests[0].system_instruction.as_deref(),
            Some(RESEARCHER.system_instruction().as_str())
        );

        // The echo stub's research reply is embedded verbatim in the writer prompt.
        let research_output = format!("SUMMARY: {}", research_prompt);
        let writer_prompt = &requests[1].messages[0].content;
        assert!(writer_prompt.ends_with(&research_output));
        assert_eq!(
            requests[1].system_instruction.as_deref(),
            Some(WRITER.system_instruction().as_str())
        );
        assert_eq!(post, format!("SUMMARY: {}", writer_prompt));
    }

    #[tokio::test]
    async fn test_research_failure_skips_writer() {
        let llm = Arc::new(EchoLLM::failing(LLMError::Status {
            provider: "Groq".into(),
            status: 503,
        }));
        let crew = ResearchWriterCrew::new(llm.clone(), CompletionSettings::default());

        let err = crew
            .summarize(&Query::parse("rust").unwrap(), &findings())
            .await
            .unwrap_err();

        assert!(matches!(err, LLMError::Status { status: 503, .. }));
        assert_eq!(llm.calls(), 1);
    }

    #[test]
    fn test_roles_use_different_temperatures() {
        assert!(RESEARCHER.temperature < WRITER.temperature);
        assert!(RESEARCHER.system_instruction().contains("Senior Research Analyst"));
    }
}
