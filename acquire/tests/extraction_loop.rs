//! Retry behaviour of the JSON extraction loop against scripted agents.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use acquire::prelude::*;
use acquire::extraction::{Rejection, CORRECTIVE_INSTRUCTION};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Agent that replays scripted answers and records every conversation it saw.
struct ScriptedAgent {
    answers: Vec<Result<String, String>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedAgent {
    fn new(answers: Vec<Result<&str, &str>>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|a| a.map(str::to_string).map_err(str::to_string))
                .collect(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRunner for ScriptedAgent {
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        let answer = self
            .answers
            .get(index)
            .or_else(|| self.answers.last())
            .cloned()
            .unwrap_or_else(|| Ok(String::new()));
        answer.map_err(GeneratorError::Transport)
    }
}

#[tokio::test]
async fn test_accepts_prose_wrapped_answer_on_first_attempt() {
    let agent = ScriptedAgent::new(vec![Ok(r#"I think the answer is {"alex": 4, "sam": 2}"#)]);
    let orchestrator = ExtractionOrchestrator::new().max_attempts(3);

    let extraction = orchestrator.extract(&agent, "count").await.unwrap();

    assert_eq!(Value::Object(extraction.value), json!({"alex": 4, "sam": 2}));
    assert_eq!(extraction.metrics.total_attempts, 1);
    assert_eq!(agent.calls(), 1);
    let seen = agent.seen.lock().unwrap();
    assert_eq!(seen[0], vec![ChatMessage::user("count")]);
}

#[tokio::test]
async fn test_succeeds_on_kth_attempt_with_exactly_k_calls() {
    for k in 1..=4 {
        let mut answers = vec![Ok("not json"); k - 1];
        answers.push(Ok(r#"{"k": 1}"#));
        let agent = ScriptedAgent::new(answers);

        let extraction = ExtractionOrchestrator::new()
            .max_attempts(4)
            .extract(&agent, "task")
            .await
            .unwrap();

        assert_eq!(agent.calls(), k);
        assert_eq!(extraction.metrics.total_attempts, k);
    }
}

#[tokio::test]
async fn test_exhaustion_makes_exactly_max_attempts_calls() {
    let agent = ScriptedAgent::new(vec![Ok("still thinking")]);

    let err = ExtractionOrchestrator::new()
        .max_attempts(3)
        .extract(&agent, "task")
        .await
        .unwrap_err();

    assert_eq!(agent.calls(), 3);
    let ExtractionError::Exhausted {
        attempts,
        history,
        metrics,
    } = err;
    assert_eq!(attempts, 3);
    assert_eq!(metrics.total_attempts, 3);
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|r| r.rejection == Rejection::NotJson));
    assert_eq!(history[2].raw_agent_output, "still thinking");
}

#[tokio::test]
async fn test_retries_carry_one_corrective_message() {
    let agent = ScriptedAgent::new(vec![Ok("nope"), Ok("nope"), Ok(r#"{"done": true}"#)]);

    ExtractionOrchestrator::new()
        .extract(&agent, "task")
        .await
        .unwrap();

    let seen = agent.seen.lock().unwrap();
    assert_eq!(seen[0].len(), 1);
    for later in &seen[1..] {
        assert_eq!(
            later,
            &vec![ChatMessage::user("task"), ChatMessage::user(CORRECTIVE_INSTRUCTION)]
        );
    }
}

#[tokio::test]
async fn test_agent_failure_counts_as_attempt() {
    let agent = ScriptedAgent::new(vec![Err("connection refused"), Ok(r#"{"alex": 1}"#)]);

    let extraction = ExtractionOrchestrator::new()
        .extract(&agent, "task")
        .await
        .unwrap();

    assert_eq!(agent.calls(), 2);
    assert_eq!(extraction.metrics.total_attempts, 2);
    assert_eq!(extraction.metrics.failed_runs, 1);
}

#[tokio::test]
async fn test_agent_failures_never_escape() {
    let agent = ScriptedAgent::new(vec![Err("boom")]);

    let err = ExtractionOrchestrator::with_config(ExtractionConfig::default().with_max_attempts(2))
        .extract(&agent, "task")
        .await
        .unwrap_err();

    let ExtractionError::Exhausted { history, .. } = err;
    assert_eq!(history.len(), 2);
    assert!(matches!(&history[0].rejection, Rejection::Generator(msg) if msg.contains("boom")));
}

#[tokio::test]
async fn test_custom_corrective_instruction() {
    let agent = ScriptedAgent::new(vec![Ok("nope"), Ok("{}")]);
    let config = ExtractionConfig::default().with_corrective_instruction("JSON please");

    ExtractionOrchestrator::with_config(config)
        .extract(&agent, "task")
        .await
        .unwrap();

    let seen = agent.seen.lock().unwrap();
    assert_eq!(seen[1][1].content, "JSON please");
}
